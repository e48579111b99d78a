//! Image file helpers
//!
//! - Luminance conversion (RGBA over white, parallel for large rasters)
//! - Raster file reading and writing

pub mod grayscale;
pub mod raster_io;
