//! Convolution engine
//!
//! Applies an integer [`Kernel`] and a scalar coefficient to every
//! interior pixel of a padded raster. The result is a signed
//! [`IntRaster`] sized to the interior; normalization back to 8 bits is a
//! separate stage.
//!
//! For interior pixel (x, y) the output is
//!
//! ```text
//! trunc(coefficient * sum_{i,j} padded[y + i][x + j] * kernel[i][j])
//! ```
//!
//! where `padded` is indexed in bordered coordinates.

use crate::{FilterError, FilterResult, Kernel};
use pgmfilter_core::{GrayRaster, IntRaster};
use tracing::debug;

/// How the raw kernel sum becomes an output sample.
///
/// Selected once per convolution from the coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accumulation {
    /// Coefficient is exactly 1: the integer sum is the result, with no
    /// floating-point step at all
    Exact,
    /// Multiply the sum by the coefficient and truncate toward zero
    Scaled(f32),
}

impl Accumulation {
    /// Pick the accumulation mode for `coefficient`.
    pub fn from_coefficient(coefficient: f32) -> Self {
        if coefficient == 1.0 {
            Self::Exact
        } else {
            Self::Scaled(coefficient)
        }
    }

    /// Turn a raw kernel sum into an output sample.
    #[inline]
    pub fn finish(self, sum: i64) -> i32 {
        match self {
            Self::Exact => sum.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            // `as` truncates toward zero and saturates
            Self::Scaled(c) => (sum as f32 * c) as i32,
        }
    }
}

/// Convolve a padded raster with `kernel`.
///
/// # Arguments
///
/// * `kernel` - Square integer kernel
/// * `coefficient` - Scalar applied to every kernel sum
/// * `padded` - Input carrying a border of `kernel.padding()` samples
///
/// # Returns
///
/// Signed raster of size `(width - 2p) x (height - 2p)`.
///
/// # Errors
///
/// Returns [`FilterError::KernelTooLarge`] if `padded` has no interior.
pub fn convolve(kernel: &Kernel, coefficient: f32, padded: &GrayRaster) -> FilterResult<IntRaster> {
    let size = kernel.size() as usize;
    let p = kernel.padding();
    let (pw, ph) = padded.dimensions();
    if pw <= 2 * p || ph <= 2 * p {
        return Err(FilterError::KernelTooLarge {
            kernel_size: kernel.size(),
            width: pw,
            height: ph,
        });
    }
    let ow = pw - 2 * p;
    let oh = ph - 2 * p;
    let mode = Accumulation::from_coefficient(coefficient);
    debug!(
        kernel_size = kernel.size(),
        ?mode,
        width = ow,
        height = oh,
        "convolve"
    );

    let src = padded.data();
    let stride = pw as usize;
    let weights = kernel.data();
    let mut out = IntRaster::new(ow, oh)?;
    let dst = out.data_mut();

    for y in 0..oh as usize {
        for x in 0..ow as usize {
            let mut sum = 0i64;
            for i in 0..size {
                let row = &src[(y + i) * stride + x..(y + i) * stride + x + size];
                let krow = &weights[i * size..(i + 1) * size];
                for (&v, &k) in row.iter().zip(krow) {
                    sum += v as i64 * k as i64;
                }
            }
            dst[y * ow as usize + x] = mode.finish(sum);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulation_selection() {
        assert_eq!(Accumulation::from_coefficient(1.0), Accumulation::Exact);
        assert_eq!(
            Accumulation::from_coefficient(0.5),
            Accumulation::Scaled(0.5)
        );
    }

    #[test]
    fn test_scaled_truncates_toward_zero() {
        let mode = Accumulation::Scaled(0.5);
        assert_eq!(mode.finish(7), 3);
        assert_eq!(mode.finish(-7), -3);
        assert_eq!(Accumulation::Exact.finish(-7), -7);
    }

    #[test]
    fn test_convolve_single_interior_pixel() {
        #[rustfmt::skip]
        let padded = GrayRaster::from_data(3, 3, vec![
            1, 2, 3,
            4, 5, 6,
            7, 8, 9,
        ]).unwrap();
        let out = convolve(&Kernel::prewitt_vertical(), 1.0, &padded).unwrap();
        assert_eq!(out.dimensions(), (1, 1));
        assert_eq!(out.data(), &[(1 + 2 + 3) - (7 + 8 + 9)]);

        let out = convolve(&Kernel::prewitt_horizontal(), 1.0, &padded).unwrap();
        assert_eq!(out.data(), &[(1 + 4 + 7) - (3 + 6 + 9)]);
    }

    #[test]
    fn test_convolve_rejects_no_interior() {
        let padded = GrayRaster::new(2, 5).unwrap();
        assert!(matches!(
            convolve(&Kernel::prewitt_vertical(), 1.0, &padded),
            Err(FilterError::KernelTooLarge { .. })
        ));
    }
}
