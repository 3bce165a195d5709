//! Convolution kernels
//!
//! A [`Kernel`] is a square matrix of signed integer weights with an odd
//! side length of at least 3, so that a unique center sample and a
//! symmetric border exist. The scalar coefficient that scales each
//! convolution result is not part of the kernel; it travels in the
//! filter configuration.

use crate::{FilterError, FilterResult};

/// Smallest accepted kernel side length.
pub const MIN_KERNEL_SIZE: u32 = 3;

/// Check that `size` is an odd number `>= MIN_KERNEL_SIZE`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] otherwise.
pub fn validate_kernel_size(size: u32) -> FilterResult<()> {
    if size < MIN_KERNEL_SIZE || size % 2 == 0 {
        return Err(FilterError::InvalidKernel(format!(
            "kernel size must be >= {MIN_KERNEL_SIZE} and odd, got {size}"
        )));
    }
    Ok(())
}

/// A square 2D convolution kernel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    /// Side length (odd, >= 3)
    size: u32,
    /// Kernel weights (row-major order)
    data: Vec<i32>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is even or below 3,
    /// or if `data` does not hold exactly `size * size` weights.
    pub fn new(size: u32, data: Vec<i32>) -> FilterResult<Self> {
        validate_kernel_size(size)?;
        let expected = size as usize * size as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "expected {expected} values for a {size}x{size} kernel, got {}",
                data.len()
            )));
        }
        Ok(Self { size, data })
    }

    /// Create a kernel from a slice of row-major weights.
    pub fn from_slice(size: u32, data: &[i32]) -> FilterResult<Self> {
        Self::new(size, data.to_vec())
    }

    /// Parse a kernel from text.
    ///
    /// Rows are separated by `;` or newlines, values within a row by
    /// whitespace or commas. The number of rows determines the size and
    /// every row must have that many values.
    ///
    /// ```
    /// use pgmfilter_filter::Kernel;
    ///
    /// let k = Kernel::parse("1 1 1; 0 0 0; -1 -1 -1").unwrap();
    /// assert_eq!(k, Kernel::prewitt_vertical());
    /// ```
    pub fn parse(text: &str) -> FilterResult<Self> {
        let rows: Vec<&str> = text
            .split([';', '\n'])
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();
        let size = rows.len() as u32;
        validate_kernel_size(size)?;

        let mut data = Vec::with_capacity(rows.len() * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let before = data.len();
            for token in row.split(|c: char| c.is_whitespace() || c == ',') {
                if token.is_empty() {
                    continue;
                }
                let value = token.parse::<i32>().map_err(|_| {
                    FilterError::InvalidKernel(format!(
                        "'{token}' in row {} is not an integer",
                        i + 1
                    ))
                })?;
                data.push(value);
            }
            let count = data.len() - before;
            if count != rows.len() {
                return Err(FilterError::InvalidKernel(format!(
                    "row {} has {count} values, expected {}",
                    i + 1,
                    rows.len()
                )));
            }
        }
        Self::new(size, data)
    }

    /// Create an identity kernel (1 at the center, 0 elsewhere).
    pub fn identity(size: u32) -> FilterResult<Self> {
        validate_kernel_size(size)?;
        let n = size as usize;
        let mut data = vec![0; n * n];
        data[(n / 2) * n + n / 2] = 1;
        Self::new(size, data)
    }

    /// Create a box kernel with every weight set to 1.
    ///
    /// Pair it with a coefficient of `1 / (size * size)` for averaging.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        validate_kernel_size(size)?;
        Self::new(size, vec![1; size as usize * size as usize])
    }

    /// Prewitt kernel responding to vertical intensity change.
    ///
    /// Rows `[1,1,1], [0,0,0], [-1,-1,-1]`.
    pub fn prewitt_vertical() -> Self {
        Self {
            size: 3,
            data: vec![1, 1, 1, 0, 0, 0, -1, -1, -1],
        }
    }

    /// Prewitt kernel responding to horizontal intensity change.
    ///
    /// Columns `[1,0,-1]` on each of the three rows.
    pub fn prewitt_horizontal() -> Self {
        Self {
            size: 3,
            data: vec![1, 0, -1, 1, 0, -1, 1, 0, -1],
        }
    }

    /// Get the kernel side length.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Get the border width a full neighborhood needs (`size >> 1`).
    #[inline]
    pub fn padding(&self) -> u32 {
        self.size >> 1
    }

    /// Get the kernel weights in row-major order.
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Get the weight at (row, col).
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> Option<i32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.data[(row * self.size + col) as usize])
    }

    /// Get the sum of all kernel weights.
    pub fn sum(&self) -> i64 {
        self.data.iter().map(|&v| v as i64).sum()
    }
}
