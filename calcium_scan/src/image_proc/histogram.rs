//! Intensity histograms of 8-bit images

use ndarray::ArrayView2;

/// Number of distinct 8-bit intensity levels
pub const INTENSITY_LEVELS: usize = 256;

/// Pixel counts per intensity level
///
/// Index is the intensity, value is how many pixels carry it. Built from an
/// image, the counts always sum to width × height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; INTENSITY_LEVELS],
}

impl Histogram {
    /// Count every pixel of the image into its intensity bin
    pub fn from_pixels(image: ArrayView2<u8>) -> Self {
        let mut bins = [0u64; INTENSITY_LEVELS];
        for &pixel in image.iter() {
            bins[pixel as usize] += 1;
        }
        Self { bins }
    }

    pub fn from_bins(bins: [u64; INTENSITY_LEVELS]) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[u64; INTENSITY_LEVELS] {
        &self.bins
    }

    pub fn count(&self, level: u8) -> u64 {
        self.bins[level as usize]
    }

    /// Total number of pixels counted
    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Running sum of counts, `cumulative()[i]` = pixels with intensity ≤ i
    pub fn cumulative(&self) -> [u64; INTENSITY_LEVELS] {
        let mut cdf = [0u64; INTENSITY_LEVELS];
        let mut running = 0u64;
        for (slot, &count) in cdf.iter_mut().zip(self.bins.iter()) {
            running += count;
            *slot = running;
        }
        cdf
    }

    /// Lowest intensity present, `None` for an empty histogram
    pub fn first_occupied(&self) -> Option<u8> {
        self.bins
            .iter()
            .position(|&count| count > 0)
            .map(|level| level as u8)
    }

    /// Number of distinct intensities present
    pub fn occupied_levels(&self) -> usize {
        self.bins.iter().filter(|&&count| count > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_counts_every_pixel_once() {
        let image = arr2(&[[0u8, 0, 255], [10, 10, 10]]);
        let hist = Histogram::from_pixels(image.view());

        assert_eq!(hist.count(0), 2);
        assert_eq!(hist.count(10), 3);
        assert_eq!(hist.count(255), 1);
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.occupied_levels(), 3);
        assert_eq!(hist.first_occupied(), Some(0));
    }

    #[test]
    fn test_cumulative() {
        let image = arr2(&[[3u8, 1], [1, 200]]);
        let cdf = Histogram::from_pixels(image.view()).cumulative();

        assert_eq!(cdf[0], 0);
        assert_eq!(cdf[1], 2);
        assert_eq!(cdf[2], 2);
        assert_eq!(cdf[3], 3);
        assert_eq!(cdf[199], 3);
        assert_eq!(cdf[255], 4);
    }

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram::from_bins([0; INTENSITY_LEVELS]);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.first_occupied(), None);
        assert_eq!(hist.occupied_levels(), 0);
    }
}
