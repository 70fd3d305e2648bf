pub mod commands;
pub mod utils;

// Re-export the scene crates for external use
pub use svgscene;
pub use svgscene_raster;
