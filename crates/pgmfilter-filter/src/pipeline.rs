//! Filter pipeline
//!
//! Every filter runs the same stages:
//!
//! ```text
//! [pad] -> convolve | median -> [normalize] -> [re-pad]
//! ```
//!
//! [`PaddingTiming::Pre`] pads the input with zeros so the output keeps
//! the input size. [`PaddingTiming::Post`] filters the unpadded input
//! (which must be larger than the kernel), then pads the smaller result
//! back to the input size with zeros.
//!
//! [`PaddingPolicy::Mirror`] never feeds the filter stage. It is a border
//! fill applied to the finished output under either timing.

use crate::edge::sobel_with_config;
use crate::kernel::validate_kernel_size;
use crate::normalize::Normalization;
use crate::padding::{
    PaddingPolicy, PaddingTiming, does_kernel_fit, mirror_pad, pad, padding_amount,
};
use crate::rank::{MedianSelector, median_filter};
use crate::{FilterError, FilterResult, Kernel, convolve};
use pgmfilter_core::GrayRaster;
use std::borrow::Cow;
use tracing::debug;

/// Coefficient of the 3x3 averaging filter.
pub const AVERAGING_COEFFICIENT: f32 = 1.0 / 9.0;

/// Per-invocation filter configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// How border samples are filled
    pub padding_policy: PaddingPolicy,
    /// Whether the border is added before or after filtering
    pub padding_timing: PaddingTiming,
    /// Mapping back to 8-bit samples (unused by the median filter)
    pub normalization: Normalization,
    /// Scalar applied to every convolution sum
    pub coefficient: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            padding_policy: PaddingPolicy::Zero,
            padding_timing: PaddingTiming::Post,
            normalization: Normalization::MinMax,
            coefficient: 1.0,
        }
    }
}

impl FilterConfig {
    /// Configuration of a built-in filter: zero border added after
    /// filtering.
    pub fn builtin(normalization: Normalization, coefficient: f32) -> Self {
        Self {
            padding_policy: PaddingPolicy::Zero,
            padding_timing: PaddingTiming::Post,
            normalization,
            coefficient,
        }
    }

    /// Set the padding policy.
    pub fn with_padding_policy(mut self, policy: PaddingPolicy) -> Self {
        self.padding_policy = policy;
        self
    }

    /// Set the padding timing.
    pub fn with_padding_timing(mut self, timing: PaddingTiming) -> Self {
        self.padding_timing = timing;
        self
    }

    /// Set the normalization.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Set the coefficient.
    pub fn with_coefficient(mut self, coefficient: f32) -> Self {
        self.coefficient = coefficient;
        self
    }
}

/// A filter the pipeline can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// 3x3 box average
    Averaging,
    /// Vertical Prewitt gradient
    VerticalPrewitt,
    /// Horizontal Prewitt gradient
    HorizontalPrewitt,
    /// Gradient magnitude of both Prewitt kernels
    Sobel,
    /// 3x3 median
    Median,
    /// User-supplied kernel
    Custom(Kernel),
}

impl FilterKind {
    /// Short name, used in command names and default output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Averaging => "avg",
            Self::VerticalPrewitt => "verprewitt",
            Self::HorizontalPrewitt => "horprewitt",
            Self::Sobel => "sobel",
            Self::Median => "median",
            Self::Custom(_) => "custom",
        }
    }

    /// Configuration the filter runs with unless overridden.
    pub fn default_config(&self) -> FilterConfig {
        match self {
            Self::Averaging => FilterConfig::builtin(Normalization::Clip, AVERAGING_COEFFICIENT),
            Self::VerticalPrewitt | Self::HorizontalPrewitt | Self::Sobel | Self::Median => {
                FilterConfig::builtin(Normalization::Clip, 1.0)
            }
            Self::Custom(_) => FilterConfig::default(),
        }
    }

    /// Side length of the neighborhood the filter reads.
    pub fn kernel_size(&self) -> u32 {
        match self {
            Self::Custom(kernel) => kernel.size(),
            _ => 3,
        }
    }
}

/// Run `kind` over `raster`.
///
/// `selector` is only consulted by [`FilterKind::Median`].
pub fn apply_filter(
    kind: &FilterKind,
    raster: &GrayRaster,
    config: &FilterConfig,
    selector: &mut MedianSelector,
) -> FilterResult<GrayRaster> {
    debug!(filter = kind.name(), ?config, "apply filter");
    match kind {
        FilterKind::Averaging => apply_kernel(raster, &Kernel::box_kernel(3)?, config),
        FilterKind::VerticalPrewitt => apply_kernel(raster, &Kernel::prewitt_vertical(), config),
        FilterKind::HorizontalPrewitt => {
            apply_kernel(raster, &Kernel::prewitt_horizontal(), config)
        }
        FilterKind::Sobel => sobel_with_config(raster, config),
        FilterKind::Median => median_with_size(raster, 3, config, selector),
        FilterKind::Custom(kernel) => custom(raster, kernel, config),
    }
}

/// Bring the input into the shape the filter stage reads.
///
/// Pre timing returns a zero-padded copy whatever the policy. Post timing
/// borrows the input after checking that the kernel fits inside it.
pub(crate) fn prepare_input<'a>(
    raster: &'a GrayRaster,
    kernel_size: u32,
    config: &FilterConfig,
) -> FilterResult<Cow<'a, GrayRaster>> {
    match config.padding_timing {
        PaddingTiming::Pre => Ok(Cow::Owned(pad(raster, 0, kernel_size)?)),
        PaddingTiming::Post => {
            let (width, height) = raster.dimensions();
            if !does_kernel_fit(kernel_size, width, height) {
                return Err(FilterError::KernelTooLarge {
                    kernel_size,
                    width,
                    height,
                });
            }
            Ok(Cow::Borrowed(raster))
        }
    }
}

/// Restore the input size after a Post-timed filter, then apply the
/// border fill of the padding policy.
///
/// The mirror fill is skipped when the output has no interior inside the
/// border ring.
pub(crate) fn finish_output(
    filtered: GrayRaster,
    kernel_size: u32,
    config: &FilterConfig,
) -> FilterResult<GrayRaster> {
    let mut out = match config.padding_timing {
        PaddingTiming::Pre => filtered,
        PaddingTiming::Post => pad(&filtered, 0, kernel_size)?,
    };
    if config.padding_policy == PaddingPolicy::Mirror {
        let p = padding_amount(kernel_size);
        let (width, height) = out.dimensions();
        if width > 2 * p && height > 2 * p {
            mirror_pad(&mut out, kernel_size)?;
        }
    }
    Ok(out)
}

/// Convolve `raster` with `kernel` and normalize the result.
///
/// # Errors
///
/// - [`FilterError::InvalidParameters`] if the coefficient is not finite
/// - [`FilterError::KernelTooLarge`] if Post timing is selected and the
///   raster is not larger than the kernel
pub fn apply_kernel(
    raster: &GrayRaster,
    kernel: &Kernel,
    config: &FilterConfig,
) -> FilterResult<GrayRaster> {
    if !config.coefficient.is_finite() {
        return Err(FilterError::InvalidParameters(format!(
            "coefficient must be finite, got {}",
            config.coefficient
        )));
    }
    let size = kernel.size();
    let input = prepare_input(raster, size, config)?;
    let sums = convolve(kernel, config.coefficient, &input)?;
    let filtered = config.normalization.apply(&sums)?;
    finish_output(filtered, size, config)
}

/// 3x3 box average, clipped, with a zero border.
pub fn averaging(raster: &GrayRaster) -> FilterResult<GrayRaster> {
    apply_kernel(
        raster,
        &Kernel::box_kernel(3)?,
        &FilterKind::Averaging.default_config(),
    )
}

/// Apply a user-supplied kernel.
pub fn custom(
    raster: &GrayRaster,
    kernel: &Kernel,
    config: &FilterConfig,
) -> FilterResult<GrayRaster> {
    debug!(
        kernel_size = kernel.size(),
        coefficient = config.coefficient,
        "custom kernel"
    );
    apply_kernel(raster, kernel, config)
}

/// 3x3 median with a zero border.
pub fn median(raster: &GrayRaster, selector: &mut MedianSelector) -> FilterResult<GrayRaster> {
    median_with_size(raster, 3, &FilterKind::Median.default_config(), selector)
}

/// Median over a `size x size` neighborhood.
///
/// The normalization and coefficient of `config` are ignored.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if `size` is even or below 3.
pub fn median_with_size(
    raster: &GrayRaster,
    size: u32,
    config: &FilterConfig,
    selector: &mut MedianSelector,
) -> FilterResult<GrayRaster> {
    validate_kernel_size(size)?;
    let input = prepare_input(raster, size, config)?;
    let filtered = median_filter(&input, size, selector)?;
    finish_output(filtered, size, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> GrayRaster {
        let data = (0..width * height).map(|i| (i * 7 % 256) as u8).collect();
        GrayRaster::from_data(width, height, data).unwrap()
    }

    #[test]
    fn test_names_and_defaults() {
        assert_eq!(FilterKind::Averaging.name(), "avg");
        assert_eq!(FilterKind::Custom(Kernel::identity(5).unwrap()).name(), "custom");
        assert_eq!(FilterKind::Custom(Kernel::identity(5).unwrap()).kernel_size(), 5);

        let avg = FilterKind::Averaging.default_config();
        assert_eq!(avg.normalization, Normalization::Clip);
        assert_eq!(avg.padding_timing, PaddingTiming::Post);
        assert_eq!(avg.coefficient, AVERAGING_COEFFICIENT);

        let custom = FilterKind::Custom(Kernel::identity(3).unwrap()).default_config();
        assert_eq!(custom, FilterConfig::default());
        assert_eq!(custom.normalization, Normalization::MinMax);
    }

    #[test]
    fn test_averaging_constant_image() {
        let raster = GrayRaster::new_with_value(5, 4, 90).unwrap();
        let out = averaging(&raster).unwrap();
        assert_eq!(out.dimensions(), (5, 4));
        assert_eq!(out.row(0), &[0, 0, 0, 0, 0]);
        assert_eq!(out.row(1), &[0, 90, 90, 90, 0]);
        assert_eq!(out.row(2), &[0, 90, 90, 90, 0]);
        assert_eq!(out.row(3), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_post_timing_requires_fit() {
        let raster = GrayRaster::new_with_value(3, 8, 1).unwrap();
        assert!(matches!(
            averaging(&raster),
            Err(FilterError::KernelTooLarge { kernel_size: 3, width: 3, height: 8 })
        ));
    }

    #[test]
    fn test_pre_timing_identity_keeps_input() {
        let raster = ramp(3, 3);
        let config = FilterConfig::default()
            .with_padding_timing(PaddingTiming::Pre)
            .with_normalization(Normalization::Clip);
        let out = custom(&raster, &Kernel::identity(3).unwrap(), &config).unwrap();
        assert_eq!(out, raster);
    }

    #[test]
    fn test_post_timing_mirror_fill() {
        let raster = ramp(4, 4);
        let config = FilterConfig::default()
            .with_padding_policy(PaddingPolicy::Mirror)
            .with_normalization(Normalization::Clip);
        let out = custom(&raster, &Kernel::identity(3).unwrap(), &config).unwrap();
        assert_eq!(out.dimensions(), (4, 4));
        // Interior is untouched by the identity kernel
        assert_eq!(out.get_pixel(1, 1), raster.get_pixel(1, 1));
        assert_eq!(out.get_pixel(2, 2), raster.get_pixel(2, 2));
        // Border replicates the filtered interior
        assert_eq!(out.get_pixel(0, 0), raster.get_pixel(1, 1));
        assert_eq!(out.get_pixel(3, 0), raster.get_pixel(2, 1));
        assert_eq!(out.get_pixel(0, 3), raster.get_pixel(1, 2));
    }

    #[test]
    fn test_pre_timing_mirror_only_fills_border() {
        let raster = GrayRaster::new_with_value(4, 4, 90).unwrap();
        let kernel = Kernel::box_kernel(3).unwrap();
        let zero = FilterConfig::default()
            .with_padding_timing(PaddingTiming::Pre)
            .with_normalization(Normalization::Clip)
            .with_coefficient(AVERAGING_COEFFICIENT);
        let mirror = zero.with_padding_policy(PaddingPolicy::Mirror);

        let zero_out = custom(&raster, &kernel, &zero).unwrap();
        let mirror_out = custom(&raster, &kernel, &mirror).unwrap();
        // Zero pre-padding darkens the edges of a constant image
        assert_eq!(zero_out.row(0), &[40, 60, 60, 40]);
        assert_eq!(zero_out.row(1), &[60, 90, 90, 60]);
        // Interior is identical under both policies
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(mirror_out.get_pixel(x, y), zero_out.get_pixel(x, y));
        }
        // Mirror border replicates the nearest interior pixel
        assert_eq!(mirror_out.row(0), &[90, 90, 90, 90]);
        assert_eq!(mirror_out.row(3), &[90, 90, 90, 90]);
        assert_eq!(mirror_out.get_pixel(0, 1), Some(90));
    }

    #[test]
    fn test_pre_timing_mirror_small_output() {
        let raster = GrayRaster::new_with_value(2, 2, 9).unwrap();
        let config = FilterConfig::default()
            .with_padding_timing(PaddingTiming::Pre)
            .with_padding_policy(PaddingPolicy::Mirror)
            .with_normalization(Normalization::Clip);
        let out = custom(&raster, &Kernel::identity(3).unwrap(), &config).unwrap();
        assert_eq!(out, raster);
    }

    #[test]
    fn test_non_finite_coefficient_rejected() {
        let config = FilterConfig::default().with_coefficient(f32::NAN);
        assert!(matches!(
            custom(&ramp(6, 6), &Kernel::identity(3).unwrap(), &config),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_median_with_size() {
        let mut raster = GrayRaster::new_with_value(7, 7, 20).unwrap();
        raster.set_pixel(3, 3, 250).unwrap();
        raster.set_pixel(2, 3, 0).unwrap();
        let mut selector = MedianSelector::default();
        let config = FilterConfig::default().with_padding_timing(PaddingTiming::Pre);
        let out = median_with_size(&raster, 5, &config, &mut selector).unwrap();
        assert_eq!(out.dimensions(), (7, 7));
        assert_eq!(out.get_pixel(3, 3), Some(20));

        assert!(median_with_size(&raster, 4, &config, &mut selector).is_err());
    }

    #[test]
    fn test_apply_filter_dispatch() {
        let raster = ramp(6, 5);
        let mut selector = MedianSelector::new(1);
        for kind in [
            FilterKind::Averaging,
            FilterKind::VerticalPrewitt,
            FilterKind::HorizontalPrewitt,
            FilterKind::Sobel,
            FilterKind::Median,
            FilterKind::Custom(Kernel::box_kernel(3).unwrap()),
        ] {
            let out = apply_filter(&kind, &raster, &kind.default_config(), &mut selector).unwrap();
            assert_eq!(out.dimensions(), raster.dimensions(), "{}", kind.name());
        }
    }
}
