//! Median (order-statistic) filtering
//!
//! Each output pixel is the median of its `size x size` neighborhood,
//! found by randomized quickselect rather than a full sort:
//!
//! - a pivot is drawn uniformly from the current sub-range and
//!   partitioned Lomuto-style (smaller values to the left, pivot to the
//!   boundary)
//! - selection continues only in the half holding the target rank
//! - for an even count both middle ranks are tracked in the same pass and
//!   their truncated average is returned
//!
//! The median of 8-bit samples is itself an 8-bit sample, so no
//! normalization follows this stage.

use crate::padding::padding_amount;
use crate::{FilterError, FilterResult};
use pgmfilter_core::GrayRaster;
use rand::prelude::*;
use tracing::debug;

/// Seed used when no seed is configured.
pub const DEFAULT_SEED: u64 = 0x5eed_f11e;

/// Randomized median selector.
///
/// Owns the pivot RNG so results are reproducible for a given seed.
#[derive(Debug)]
pub struct MedianSelector {
    rng: StdRng,
}

impl Default for MedianSelector {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl MedianSelector {
    /// Create a selector whose pivots are drawn from a seeded RNG.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Compute the median of `values`, reordering them in place.
    ///
    /// Odd counts return the element of rank `n / 2`. Even counts return
    /// the truncated mean of ranks `n / 2 - 1` and `n / 2`.
    ///
    /// Returns `None` for an empty slice.
    pub fn select_median(&mut self, values: &mut [u8]) -> Option<u8> {
        let n = values.len();
        if n == 0 {
            return None;
        }
        let k = n / 2;
        let need_lower = n % 2 == 0;

        let mut lower: Option<u8> = None;
        let mut upper: Option<u8> = None;
        let (mut lo, mut hi) = (0usize, n - 1);
        while lo <= hi {
            let p = self.random_partition(values, lo, hi);
            if p == k {
                upper = Some(values[p]);
                if !need_lower || lower.is_some() {
                    break;
                }
            } else if p + 1 == k {
                lower = Some(values[p]);
                if upper.is_some() {
                    break;
                }
            }

            if p >= k {
                match p.checked_sub(1) {
                    Some(h) => hi = h,
                    None => break,
                }
            } else {
                lo = p + 1;
            }
        }

        // Once the range is exhausted every visited rank sits in its
        // sorted position.
        let upper = upper.unwrap_or(values[k]);
        if !need_lower {
            return Some(upper);
        }
        let lower = lower.unwrap_or(values[k - 1]);
        Some(((lower as u16 + upper as u16) / 2) as u8)
    }

    /// Swap a uniformly chosen pivot to `hi`, then partition `lo..=hi`.
    fn random_partition(&mut self, values: &mut [u8], lo: usize, hi: usize) -> usize {
        let pivot = self.rng.random_range(lo..=hi);
        values.swap(pivot, hi);
        partition(values, lo, hi)
    }
}

/// Lomuto partition of `lo..=hi` around `values[hi]`.
///
/// Returns the final pivot index; everything left of it is strictly less
/// than the pivot.
fn partition(values: &mut [u8], lo: usize, hi: usize) -> usize {
    let pivot = values[hi];
    let mut i = lo;
    for j in lo..hi {
        if values[j] < pivot {
            values.swap(i, j);
            i += 1;
        }
    }
    values.swap(i, hi);
    i
}

/// Apply a median filter to a padded raster.
///
/// # Arguments
///
/// * `padded` - Input carrying a border of `kernel_size >> 1` samples
/// * `kernel_size` - Neighborhood side length
/// * `selector` - Quickselect state (pivot RNG)
///
/// # Returns
///
/// 8-bit raster of size `(width - 2p) x (height - 2p)`.
///
/// # Errors
///
/// Returns [`FilterError::KernelTooLarge`] if `padded` has no interior, or
/// [`FilterError::InvalidKernel`] if `kernel_size` is 0.
pub fn median_filter(
    padded: &GrayRaster,
    kernel_size: u32,
    selector: &mut MedianSelector,
) -> FilterResult<GrayRaster> {
    if kernel_size == 0 {
        return Err(FilterError::InvalidKernel(
            "median window must not be empty".into(),
        ));
    }
    let p = padding_amount(kernel_size);
    let (pw, ph) = padded.dimensions();
    if pw <= 2 * p || ph <= 2 * p {
        return Err(FilterError::KernelTooLarge {
            kernel_size,
            width: pw,
            height: ph,
        });
    }
    let ow = pw - 2 * p;
    let oh = ph - 2 * p;
    debug!(kernel_size, width = ow, height = oh, "median filter");

    let size = kernel_size as usize;
    let stride = pw as usize;
    let src = padded.data();
    let mut out = GrayRaster::new(ow, oh)?;
    let dst = out.data_mut();
    // Reused for every pixel
    let mut window = vec![0u8; size * size];

    for y in 0..oh as usize {
        for x in 0..ow as usize {
            for i in 0..size {
                let start = (y + i) * stride + x;
                window[i * size..(i + 1) * size].copy_from_slice(&src[start..start + size]);
            }
            // The window is never empty here
            dst[y * ow as usize + x] = selector.select_median(&mut window).unwrap_or(0);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_median(values: &[u8]) -> u8 {
        let mut v = values.to_vec();
        v.sort_unstable();
        let n = v.len();
        if n % 2 == 1 {
            v[n / 2]
        } else {
            ((v[n / 2 - 1] as u16 + v[n / 2] as u16) / 2) as u8
        }
    }

    #[test]
    fn test_partition_lomuto() {
        let mut v = [5, 1, 9, 3, 7];
        let p = partition(&mut v, 0, 4);
        assert_eq!(p, 3);
        assert_eq!(v, [5, 1, 3, 7, 9]);
    }

    #[test]
    fn test_median_of_nine() {
        let mut sel = MedianSelector::default();
        let mut v = [5, 1, 9, 3, 7, 2, 8, 4, 6];
        assert_eq!(sel.select_median(&mut v), Some(5));
    }

    #[test]
    fn test_median_small_and_even() {
        let mut sel = MedianSelector::new(7);
        assert_eq!(sel.select_median(&mut []), None);
        assert_eq!(sel.select_median(&mut [42]), Some(42));
        assert_eq!(sel.select_median(&mut [10, 3]), Some(6));
        assert_eq!(sel.select_median(&mut [4, 1, 3, 2]), Some(2));
        assert_eq!(sel.select_median(&mut [200, 255, 255, 200]), Some(227));
    }

    #[test]
    fn test_median_with_duplicates() {
        let mut sel = MedianSelector::new(3);
        for _ in 0..50 {
            let mut v = [7, 7, 7, 1, 7, 9, 7, 7, 0];
            assert_eq!(sel.select_median(&mut v), Some(7));
            let mut v = [0u8; 16];
            assert_eq!(sel.select_median(&mut v), Some(0));
        }
    }

    #[test]
    fn test_median_matches_sort_for_all_lengths() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sel = MedianSelector::new(12);
        for n in 1..=64usize {
            for _ in 0..20 {
                let values: Vec<u8> = (0..n).map(|_| rng.random_range(0..=255)).collect();
                let mut work = values.clone();
                assert_eq!(
                    sel.select_median(&mut work),
                    Some(sorted_median(&values)),
                    "values = {values:?}"
                );
            }
        }
    }

    #[test]
    fn test_median_filter_removes_impulse() {
        let mut padded = GrayRaster::new_with_value(5, 5, 10).unwrap();
        padded.set_pixel(2, 2, 255).unwrap();
        let out = median_filter(&padded, 3, &mut MedianSelector::default()).unwrap();
        assert_eq!(out.dimensions(), (3, 3));
        assert!(out.data().iter().all(|&v| v == 10));
    }
}
