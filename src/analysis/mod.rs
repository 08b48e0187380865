pub mod alerts;
pub mod exposure;
pub mod sector_tags;
