pub mod parser;
pub mod tilemap;
