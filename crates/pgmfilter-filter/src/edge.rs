//! Edge detection
//!
//! Prewitt gradients and their Sobel-style magnitude. The magnitude is
//! taken on the raw signed gradients, before any normalization.

use crate::pipeline::{FilterConfig, FilterKind, apply_kernel, finish_output, prepare_input};
use crate::{FilterResult, Kernel, convolve};
use pgmfilter_core::{Error, GrayRaster, IntRaster};
use tracing::debug;

/// Gradient direction of a Prewitt kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOrientation {
    /// Responds to intensity change from top to bottom
    Vertical,
    /// Responds to intensity change from left to right
    Horizontal,
}

impl EdgeOrientation {
    /// The Prewitt kernel for this orientation.
    pub fn kernel(self) -> Kernel {
        match self {
            Self::Vertical => Kernel::prewitt_vertical(),
            Self::Horizontal => Kernel::prewitt_horizontal(),
        }
    }
}

/// Apply a Prewitt kernel.
pub fn prewitt(
    raster: &GrayRaster,
    orientation: EdgeOrientation,
    config: &FilterConfig,
) -> FilterResult<GrayRaster> {
    apply_kernel(raster, &orientation.kernel(), config)
}

/// Vertical Prewitt gradient, clipped, with a zero border.
pub fn vertical_prewitt(raster: &GrayRaster) -> FilterResult<GrayRaster> {
    prewitt(
        raster,
        EdgeOrientation::Vertical,
        &FilterKind::VerticalPrewitt.default_config(),
    )
}

/// Horizontal Prewitt gradient, clipped, with a zero border.
pub fn horizontal_prewitt(raster: &GrayRaster) -> FilterResult<GrayRaster> {
    prewitt(
        raster,
        EdgeOrientation::Horizontal,
        &FilterKind::HorizontalPrewitt.default_config(),
    )
}

/// Combine two gradients pixel-wise into `trunc(sqrt(gx^2 + gy^2))`.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the gradients differ in size.
pub fn sobel_magnitude(gx: &IntRaster, gy: &IntRaster) -> FilterResult<IntRaster> {
    if !gx.sizes_equal(gy) {
        return Err(Error::DimensionMismatch {
            expected: gx.dimensions(),
            actual: gy.dimensions(),
        }
        .into());
    }
    let mut out = gx.clone();
    for (m, &y) in out.data_mut().iter_mut().zip(gy.data()) {
        let x = *m as i64;
        let y = y as i64;
        *m = ((x * x + y * y) as f64).sqrt() as i32;
    }
    Ok(out)
}

/// Sobel magnitude of both Prewitt gradients, clipped, with a zero
/// border.
pub fn sobel(raster: &GrayRaster) -> FilterResult<GrayRaster> {
    sobel_with_config(raster, &FilterKind::Sobel.default_config())
}

/// Sobel magnitude under an explicit configuration.
///
/// The coefficient of `config` is not used; both gradients are exact
/// integer sums.
pub fn sobel_with_config(raster: &GrayRaster, config: &FilterConfig) -> FilterResult<GrayRaster> {
    let vertical = Kernel::prewitt_vertical();
    let size = vertical.size();
    let input = prepare_input(raster, size, config)?;
    let gx = convolve(&Kernel::prewitt_horizontal(), 1.0, &input)?;
    let gy = convolve(&vertical, 1.0, &input)?;
    let magnitude = sobel_magnitude(&gx, &gy)?;
    debug!(
        width = magnitude.width(),
        height = magnitude.height(),
        "sobel magnitude"
    );
    let filtered = config.normalization.apply(&magnitude)?;
    finish_output(filtered, size, config)
}
