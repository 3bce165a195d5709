//! pgmfilter - Batch filtering of 8-bit PGM images
//!
//! Decodes a grayscale PGM raster, applies a convolution or median filter
//! with configurable border handling and normalization, and encodes the
//! result.
//!
//! # Example
//!
//! ```
//! use pgmfilter::GrayRaster;
//! use pgmfilter::filter::averaging;
//!
//! let raster = GrayRaster::new_with_value(8, 8, 90).unwrap();
//! let smoothed = averaging(&raster).unwrap();
//! assert_eq!(smoothed.dimensions(), (8, 8));
//! assert_eq!(smoothed.get_pixel(4, 4), Some(90));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pgmfilter_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pgmfilter_filter as filter;
pub use pgmfilter_io as io;

pub mod shell;
