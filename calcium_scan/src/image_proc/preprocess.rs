//! Contrast enhancement applied before thresholding
//!
//! A small Gaussian blur suppresses speckle so isolated noisy pixels do not
//! become one-pixel "deposits", then global histogram equalization stretches
//! the intensity range so Otsu sees well separated classes.

use ndarray::{Array2, ArrayView2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{CalciumError, Result};
use crate::image_proc::histogram::{Histogram, INTENSITY_LEVELS};
use crate::image_proc::intensity::IntensityImage;

/// Settings for the enhancement stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Run the Gaussian blur
    pub blur: bool,
    /// Blur kernel width and height, must be odd
    pub kernel_size: usize,
    /// Blur sigma in pixels; derived from `kernel_size` when absent
    pub sigma: Option<f64>,
    /// Run global histogram equalization after the blur
    pub equalize: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur: true,
            kernel_size: 5,
            sigma: None,
            equalize: true,
        }
    }
}

impl PreprocessConfig {
    /// Pass-through settings for arrays that are already enhanced
    pub fn disabled() -> Self {
        Self {
            blur: false,
            equalize: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(CalciumError::Config(format!(
                "blur kernel size must be odd, got {}",
                self.kernel_size
            )));
        }
        if let Some(sigma) = self.sigma {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(CalciumError::Config(format!(
                    "blur sigma must be positive, got {sigma}"
                )));
            }
        }
        Ok(())
    }
}

/// Sigma used when only a kernel size is given
///
/// Matches the common convention `0.3 * ((size - 1) / 2 - 1) + 0.8`, which is
/// 1.1 for a 5×5 kernel.
pub fn default_sigma(kernel_size: usize) -> f64 {
    0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian kernel of odd length `size`
pub fn gaussian_kernel(size: usize, sigma: f64) -> Vec<f64> {
    let center = (size / 2) as f64;
    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (-(x * x) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / sum).collect()
}

/// Mirror an out-of-range index back into `0..len` without repeating the edge
fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let wrapped = index.rem_euclid(period);
    if wrapped >= len as isize {
        (period - wrapped) as usize
    } else {
        wrapped as usize
    }
}

/// Separable Gaussian blur with reflect-101 borders
///
/// # Arguments
/// * `image` - Source intensities
/// * `kernel_size` - Odd kernel width
/// * `sigma` - Standard deviation in pixels, `None` for [`default_sigma`]
///
/// # Returns
/// Blurred image rounded back to 8 bits
pub fn gaussian_blur(image: ArrayView2<u8>, kernel_size: usize, sigma: Option<f64>) -> Array2<u8> {
    let sigma = sigma.unwrap_or_else(|| default_sigma(kernel_size));
    let kernel = gaussian_kernel(kernel_size, sigma);
    let radius = (kernel_size / 2) as isize;
    let (rows, cols) = image.dim();

    // Rows are independent in both passes; each task writes only its own row
    let mut horizontal = Array2::<f64>::zeros((rows, cols));
    horizontal
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut out)| {
            for (col, value) in out.iter_mut().enumerate() {
                *value = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, weight)| {
                        let src = reflect_101(col as isize + k as isize - radius, cols);
                        weight * image[[row, src]] as f64
                    })
                    .sum();
            }
        });

    let mut blurred = Array2::<u8>::zeros((rows, cols));
    blurred
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(row, mut out)| {
            for (col, value) in out.iter_mut().enumerate() {
                let sum: f64 = kernel
                    .iter()
                    .enumerate()
                    .map(|(k, weight)| {
                        let src = reflect_101(row as isize + k as isize - radius, rows);
                        weight * horizontal[[src, col]]
                    })
                    .sum();
                *value = sum.round().clamp(0.0, 255.0) as u8;
            }
        });

    blurred
}

/// Global histogram equalization
///
/// The lowest occupied level maps to 0 and the remaining levels spread over
/// 0..=255 in proportion to their cumulative count. An image with a single
/// level has nothing to spread and is returned unchanged.
pub fn equalize_histogram(image: ArrayView2<u8>) -> Array2<u8> {
    let histogram = Histogram::from_pixels(image);
    let total = histogram.total();
    let Some(first) = histogram.first_occupied() else {
        return image.to_owned();
    };
    let first_count = histogram.count(first);
    if first_count == total {
        return image.to_owned();
    }

    let scale = 255.0 / (total - first_count) as f64;
    let cdf = histogram.cumulative();
    let mut lut = [0u8; INTENSITY_LEVELS];
    for level in (first as usize + 1)..INTENSITY_LEVELS {
        lut[level] = ((cdf[level] - first_count) as f64 * scale)
            .round()
            .min(255.0) as u8;
    }

    image.mapv(|pixel| lut[pixel as usize])
}

/// Run the configured enhancement steps
pub fn preprocess(image: &IntensityImage, config: &PreprocessConfig) -> Result<IntensityImage> {
    config.validate()?;

    let mut pixels = image.view().to_owned();
    if config.blur {
        log::debug!(
            "Blurring {} image with {}x{} Gaussian kernel",
            image.size(),
            config.kernel_size,
            config.kernel_size
        );
        pixels = gaussian_blur(pixels.view(), config.kernel_size, config.sigma);
    }
    if config.equalize {
        log::debug!("Equalizing histogram");
        pixels = equalize_histogram(pixels.view());
    }

    Ok(IntensityImage::from_array(pixels)?)
}
