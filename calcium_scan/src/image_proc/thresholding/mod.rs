//! Global thresholding of intensity images
//!
//! Otsu's method picks the cutoff separating bright deposits from tissue, and
//! the binarizer turns that cutoff into a foreground mask.

use ndarray::{Array2, ArrayView2};

use crate::image_proc::histogram::Histogram;

/// Calculate Otsu's threshold from an intensity histogram
///
/// Every candidate `t` splits pixels into a lower class (≤ t) and an upper
/// class (> t). The chosen `t` maximizes the between-class variance
/// `w_low * w_high * (mean_low - mean_high)^2`. Ties resolve to the smallest
/// `t`, as the scan runs upward and only a strictly larger variance replaces
/// the current best.
///
/// Class sums are kept as integers, so two candidates producing the same split
/// of pixels produce bit-identical variances.
///
/// # Arguments
///
/// * `histogram` - 256-bin histogram of the image
///
/// # Returns
///
/// The threshold level. If only one intensity is present no split exists and
/// that intensity is returned, which leaves the whole image as background.
pub fn otsu_threshold(histogram: &Histogram) -> u8 {
    let Some(lowest) = histogram.first_occupied() else {
        return 0;
    };

    let total = histogram.total();
    let weighted_total: u64 = histogram
        .bins()
        .iter()
        .enumerate()
        .map(|(level, &count)| level as u64 * count)
        .sum();

    let mut count_low = 0u64;
    let mut weighted_low = 0u64;
    let mut best: Option<(u8, f64)> = None;

    for (level, &count) in histogram.bins().iter().enumerate() {
        count_low += count;
        weighted_low += level as u64 * count;

        let count_high = total - count_low;
        // One class is empty: not a split
        if count_low == 0 || count_high == 0 {
            continue;
        }

        let w_low = count_low as f64 / total as f64;
        let w_high = count_high as f64 / total as f64;
        let mean_low = weighted_low as f64 / count_low as f64;
        let mean_high = (weighted_total - weighted_low) as f64 / count_high as f64;

        let variance = w_low * w_high * (mean_low - mean_high).powi(2);

        let improves = match best {
            Some((_, best_variance)) => variance > best_variance,
            None => true,
        };
        if improves {
            best = Some((level as u8, variance));
        }
    }

    best.map_or(lowest, |(level, _)| level)
}

/// Otsu's threshold computed directly from an image
pub fn otsu_threshold_image(image: ArrayView2<u8>) -> u8 {
    otsu_threshold(&Histogram::from_pixels(image))
}

/// Apply thresholding to an image and return a binary mask
///
/// # Arguments
///
/// * `image` - Input intensity image
/// * `threshold` - Cutoff level
///
/// # Returns
///
/// A mask of the same shape where true marks a pixel strictly above threshold
pub fn apply_threshold(image: ArrayView2<u8>, threshold: u8) -> Array2<bool> {
    image.mapv(|pixel| pixel > threshold)
}

/// Number of pixels strictly above `threshold`, counted without building a mask
pub fn count_above(image: ArrayView2<u8>, threshold: u8) -> usize {
    image.iter().filter(|&&pixel| pixel > threshold).count()
}
