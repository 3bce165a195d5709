//! Normalization back into the 8-bit pixel domain
//!
//! Convolution produces signed sums that can leave `[0, 255]`. Two
//! mappings bring them back:
//!
//! - [`Normalization::Clip`] clamps every value ([`filter_slice`])
//! - [`Normalization::MinMax`] stretches `[min, max]` onto `[0, 255]`
//!   ([`filter_min_max`])

use crate::FilterResult;
use pgmfilter_core::{GrayRaster, IntRaster, MAX_PIXEL_VALUE};
use tracing::debug;

/// Mapping from the signed convolution domain to 8-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Clamp into `[0, 255]`
    Clip,
    /// Affine rescale of the observed range onto `[0, 255]`
    #[default]
    MinMax,
}

impl Normalization {
    /// Normalize `raster` with this mapping.
    pub fn apply(self, raster: &IntRaster) -> FilterResult<GrayRaster> {
        match self {
            Self::Clip => filter_slice(raster),
            Self::MinMax => filter_min_max(raster),
        }
    }
}

/// Clamp every sample into `[0, 255]`.
pub fn filter_slice(raster: &IntRaster) -> FilterResult<GrayRaster> {
    debug!(
        width = raster.width(),
        height = raster.height(),
        "clip normalization"
    );
    Ok(raster.map(|v| v.clamp(0, MAX_PIXEL_VALUE as i32) as u8)?)
}

/// Rescale the sample range `[min, max]` onto `[0, 255]`.
///
/// Each value maps to `floor((v - min) * 255 / (max - min))`, computed in
/// integer arithmetic. This stretches low-contrast results, so relative
/// contrast between images is not preserved.
///
/// A constant raster (`min == max`) has no range to stretch and maps to
/// all zeros.
pub fn filter_min_max(raster: &IntRaster) -> FilterResult<GrayRaster> {
    let (min, max) = raster.min_max();
    debug!(
        min,
        max,
        width = raster.width(),
        height = raster.height(),
        "min-max normalization"
    );
    if min == max {
        return Ok(raster.map(|_| 0u8)?);
    }
    let range = max as i64 - min as i64;
    let top = MAX_PIXEL_VALUE as i64;
    Ok(raster.map(|v| ((v as i64 - min as i64) * top / range) as u8)?)
}
