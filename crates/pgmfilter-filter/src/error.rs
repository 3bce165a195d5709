//! Error types for pgmfilter-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pgmfilter_core::Error),

    /// Invalid kernel configuration (even, too small, or malformed)
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// The raster is too small for the kernel without pre-padding
    #[error(
        "kernel of size {kernel_size} is too big for a {width}x{height} raster without pre-padding"
    )]
    KernelTooLarge {
        /// Kernel side length
        kernel_size: u32,
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
