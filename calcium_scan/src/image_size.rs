//! Image dimensions

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width and height of an intensity image, mask or label map
///
/// ndarray shapes are (rows, cols), i.e. (height, width). This type exists so
/// the two orders never get mixed up at API boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
}

impl ImageSize {
    pub fn from_width_height(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Size of any 2-D array view, reading its (rows, cols) shape
    pub fn of_view<T>(view: &ArrayView2<T>) -> Self {
        let (height, width) = view.dim();
        Self { width, height }
    }

    /// Shape tuple in ndarray order (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// True if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
