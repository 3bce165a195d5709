//! pgmfilter Core - Basic data structures for PGM filtering
//!
//! This crate provides the raster container shared by every stage of the
//! filtering pipeline:
//!
//! - [`Raster`] - A `width x height` row-major grid of samples
//! - [`GrayRaster`] - 8-bit pixel domain (decoded images, filter output)
//! - [`IntRaster`] - Signed intermediate domain (convolution output)
//!
//! Every transformation allocates a new, independently owned raster.
//! Border cells can be added and removed, but no operation changes the
//! dimensions of an existing raster in place.

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{GrayRaster, IntRaster, Raster};

/// Largest value an 8-bit sample can hold.
pub const MAX_PIXEL_VALUE: u8 = 255;
