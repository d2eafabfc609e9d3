pub mod dataset;
pub mod params;
