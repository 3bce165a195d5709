//! Border padding
//!
//! Every interior pixel needs a full `size x size` neighborhood, so the
//! filters operate on a raster bordered by `p = size >> 1` samples on each
//! side. Two border policies exist:
//!
//! - [`PaddingPolicy::Zero`] fills the border with a constant
//! - [`PaddingPolicy::Mirror`] replicates the nearest interior sample
//!
//! Mirroring is an in-place fill of an already bordered raster: [`pad`]
//! establishes the final dimensions, then [`mirror_pad`] overwrites only
//! the border ring.

use crate::{FilterError, FilterResult};
use pgmfilter_core::GrayRaster;

/// Border fill policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    /// Border samples are zero
    #[default]
    Zero,
    /// Border samples replicate the nearest interior sample
    Mirror,
}

/// When the border is added relative to filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingTiming {
    /// Pad the input, then filter; every pixel gets a full neighborhood
    Pre,
    /// Filter the unpadded input, then pad the smaller result back to the
    /// input size
    #[default]
    Post,
}

/// Border width needed by a kernel of side `kernel_size`.
#[inline]
pub const fn padding_amount(kernel_size: u32) -> u32 {
    kernel_size >> 1
}

/// Check whether a kernel can be applied to an unpadded raster.
///
/// True iff the raster is strictly larger than the kernel in both axes.
pub fn does_kernel_fit(kernel_size: u32, width: u32, height: u32) -> bool {
    width > kernel_size && height > kernel_size
}

/// Return a copy of `raster` with a border of `kernel_size >> 1` samples
/// set to `border_value`.
///
/// # Errors
///
/// Returns [`FilterError::Core`] wrapping an allocation failure.
pub fn pad(raster: &GrayRaster, border_value: u8, kernel_size: u32) -> FilterResult<GrayRaster> {
    Ok(raster.add_border(padding_amount(kernel_size), border_value)?)
}

/// Pad according to a border policy.
///
/// Zero padding followed, for [`PaddingPolicy::Mirror`], by [`mirror_pad`].
pub fn pad_with_policy(
    raster: &GrayRaster,
    policy: PaddingPolicy,
    kernel_size: u32,
) -> FilterResult<GrayRaster> {
    let mut padded = pad(raster, 0, kernel_size)?;
    if policy == PaddingPolicy::Mirror {
        mirror_pad(&mut padded, kernel_size)?;
    }
    Ok(padded)
}

/// Overwrite the border ring of a bordered raster by nearest-interior
/// replication.
///
/// `raster` must already carry a border of `kernel_size >> 1` samples.
/// The four corner blocks take the value of the nearest interior corner
/// pixel; the top and bottom edges copy the nearest interior row, the
/// left and right edges the nearest interior column. Interior samples are
/// never written.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if the raster has no
/// interior left once the border is excluded.
pub fn mirror_pad(raster: &mut GrayRaster, kernel_size: u32) -> FilterResult<()> {
    let p = padding_amount(kernel_size) as usize;
    let (width, height) = raster.dimensions();
    let (width, height) = (width as usize, height as usize);
    if width <= 2 * p || height <= 2 * p {
        return Err(FilterError::InvalidParameters(format!(
            "{width}x{height} raster has no interior inside a border of {p}"
        )));
    }
    if p == 0 {
        return Ok(());
    }
    let w = width - 2 * p;
    let h = height - 2 * p;
    let data = raster.data_mut();

    // Left and right edges of every interior row
    for y in p..p + h {
        let row = &mut data[y * width..(y + 1) * width];
        let left = row[p];
        let right = row[p + w - 1];
        row[..p].fill(left);
        row[p + w..].fill(right);
    }

    // Top and bottom bands copy the first/last interior row, whose edge
    // cells now hold the corner values
    let first = p * width;
    let last = (p + h - 1) * width;
    for y in 0..p {
        data.copy_within(first..first + width, y * width);
        data.copy_within(last..last + width, (p + h + y) * width);
    }
    Ok(())
}
