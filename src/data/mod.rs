pub mod calendar;
pub mod fmp;
pub mod models;
pub mod provider;
pub mod resolve;
pub mod watchlist;
