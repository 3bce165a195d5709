//! pgmfilter-filter - Grayscale raster filters
//!
//! This crate provides the filtering stages of pgmfilter:
//!
//! - Border padding (zero and mirrored edge replication)
//! - Convolution with integer kernels and a scalar coefficient
//! - Median filtering by randomized quickselect
//! - Normalization back to 8 bits (clip or min-max stretch)
//! - Derived filters (averaging, Prewitt, Sobel, custom kernels)

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;
pub mod normalize;
pub mod padding;
pub mod pipeline;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use convolve::{Accumulation, convolve};
pub use edge::{
    EdgeOrientation, horizontal_prewitt, prewitt, sobel, sobel_magnitude, sobel_with_config,
    vertical_prewitt,
};
pub use normalize::{Normalization, filter_min_max, filter_slice};
pub use padding::{
    PaddingPolicy, PaddingTiming, does_kernel_fit, mirror_pad, pad, pad_with_policy, padding_amount,
};
pub use pipeline::{
    AVERAGING_COEFFICIENT, FilterConfig, FilterKind, apply_filter, apply_kernel, averaging,
    custom, median, median_with_size,
};
pub use rank::{DEFAULT_SEED, MedianSelector, median_filter};
