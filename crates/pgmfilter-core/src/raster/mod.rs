//! Raster - The sample grid shared by all pipeline stages
//!
//! A `Raster<T>` is a rectangular, row-major grid of samples. Two sample
//! domains are used throughout the crate family:
//!
//! - [`GrayRaster`] (`u8`) - decoded pixels and final filter output
//! - [`IntRaster`] (`i32`) - convolution results before normalization
//!
//! # Memory Layout
//!
//! Data is stored in row-major order with no padding. The sample at (x, y)
//! is at index `y * width + x`, and the buffer length is always exactly
//! `width * height`.
//!
//! # Ownership model
//!
//! Unlike a shared image handle, a `Raster` is exclusively owned by the
//! stage holding it. Transformations borrow their input and return a new
//! raster, so no buffer is ever aliased between two stages.
//!
//! # Examples
//!
//! ```
//! use pgmfilter_core::GrayRaster;
//!
//! let mut raster = GrayRaster::new(4, 3).unwrap();
//! raster.set_pixel(1, 2, 200).unwrap();
//! assert_eq!(raster.get_pixel(1, 2), Some(200));
//! assert_eq!(raster.data().len(), 12);
//! ```

mod access;
mod border;

use crate::error::{Error, Result};

/// 8-bit grayscale raster (pixel domain).
pub type GrayRaster = Raster<u8>;

/// Signed integer raster (post-convolution domain).
pub type IntRaster = Raster<i32>;

/// Rectangular grid of samples
///
/// Invariants: `width > 0`, `height > 0`, `data.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster<T> {
    /// Width in samples
    width: u32,
    /// Height in samples
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<T>,
}

/// Compute the sample count of a `width x height` grid.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if either side is 0 or the product
/// overflows `usize`.
pub(crate) fn sample_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })
}

/// Allocate a buffer of `len` copies of `value`.
///
/// Reservation failure is reported instead of aborting the process.
pub(crate) fn alloc_samples<T: Copy>(len: usize, value: T) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed(len))?;
    data.resize(len, value);
    Ok(data)
}

impl<T: Copy + Default> Raster<T> {
    /// Create a new raster with every sample set to `T::default()` (zero).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::AllocationFailed`] if the buffer cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, T::default())
    }
}

impl<T: Copy> Raster<T> {
    /// Create a new raster with every sample set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::AllocationFailed`] if the buffer cannot be reserved.
    pub fn new_with_value(width: u32, height: u32, value: T) -> Result<Self> {
        let len = sample_count(width, height)?;
        let data = alloc_samples(len, value)?;
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Create a raster from row-major sample data.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or the data length is not
    /// exactly `width * height`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = sample_count(width, height)?;
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Raster {
            width,
            height,
            data,
        })
    }

    /// Get the raster width in samples.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in samples.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the raster dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the sample data in row-major order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get mutable access to the sample data.
    ///
    /// The length of the buffer cannot change through this slice.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the raster and return its sample buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Check whether two rasters have the same width and height.
    pub fn sizes_equal<U: Copy>(&self, other: &Raster<U>) -> bool {
        self.width == other.width() && self.height == other.height()
    }

    /// Apply `f` to every sample, producing a new raster of the same size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the output cannot be reserved.
    pub fn map<U, F>(&self, f: F) -> Result<Raster<U>>
    where
        U: Copy,
        F: FnMut(T) -> U,
    {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| Error::AllocationFailed(self.data.len()))?;
        data.extend(self.data.iter().copied().map(f));
        Ok(Raster {
            width: self.width,
            height: self.height,
            data,
        })
    }
}

impl<T: Copy + Ord> Raster<T> {
    /// Get the smallest and largest sample as `(min, max)`.
    pub fn min_max(&self) -> (T, T) {
        let first = self.data[0];
        self.data[1..]
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}
