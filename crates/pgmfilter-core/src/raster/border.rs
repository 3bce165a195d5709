//! Border operations for rasters
//!
//! This module provides functions for adding and removing uniform borders
//! (padding) around rasters. Both allocate a new raster; the source is
//! never resized in place.

use super::{Raster, alloc_samples, sample_count};
use crate::error::{Error, Result};

impl<T: Copy> Raster<T> {
    /// Add a uniform border around the raster.
    ///
    /// Creates a new raster with `npix` samples of border on all sides,
    /// filled with `val`. The original samples occupy the centered interior.
    ///
    /// # Returns
    ///
    /// New raster with dimensions `(width + 2*npix, height + 2*npix)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the bordered size overflows,
    /// or [`Error::AllocationFailed`] if the buffer cannot be reserved.
    pub fn add_border(&self, npix: u32, val: T) -> Result<Raster<T>> {
        let overflow = || Error::InvalidDimension {
            width: self.width,
            height: self.height,
        };
        let border = npix.checked_mul(2).ok_or_else(overflow)?;
        let wd = self.width.checked_add(border).ok_or_else(overflow)?;
        let hd = self.height.checked_add(border).ok_or_else(overflow)?;

        let data = alloc_samples(sample_count(wd, hd)?, val)?;
        let mut out = Raster {
            width: wd,
            height: hd,
            data,
        };

        let w = self.width as usize;
        for y in 0..self.height {
            let start = out.index(npix, y + npix);
            out.data[start..start + w].copy_from_slice(self.row(y));
        }
        Ok(out)
    }

    /// Remove a uniform border from the raster.
    ///
    /// Returns the interior obtained by dropping `npix` samples on every
    /// side, i.e. the inverse of [`Raster::add_border`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the border is not smaller than
    /// half of either dimension.
    pub fn remove_border(&self, npix: u32) -> Result<Raster<T>> {
        let wd = self.width.saturating_sub(npix.saturating_mul(2));
        let hd = self.height.saturating_sub(npix.saturating_mul(2));
        let len = sample_count(wd, hd)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::AllocationFailed(len))?;
        let npix_us = npix as usize;
        for y in npix..npix + hd {
            data.extend_from_slice(&self.row(y)[npix_us..npix_us + wd as usize]);
        }
        Ok(Raster {
            width: wd,
            height: hd,
            data,
        })
    }
}
