//! Axis-aligned bounding boxes of labeled regions
//!
//! Boxes are grown pixel by pixel while the region aggregator scans the label
//! map, and give presentation code a rectangle to draw around each deposit.

use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in image coordinates
///
/// Rows increase downward, columns rightward. Both min and max bounds are
/// inclusive, so a single pixel at (r, c) is `AABB::from_coords(r, c, r, c)`.
///
/// # Examples
///
/// ```rust
/// use calcium_scan::image_proc::aabb::AABB;
///
/// let mut bbox = AABB::new();
/// assert!(!bbox.is_valid());
///
/// bbox.expand_to_include(4, 10);
/// bbox.expand_to_include(6, 8);
/// assert_eq!(bbox, AABB::from_coords(4, 8, 6, 10));
/// assert_eq!(bbox.width(), 3);
/// assert_eq!(bbox.height(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AABB {
    /// Minimum row (y) coordinate (inclusive)
    pub min_row: usize,
    /// Minimum column (x) coordinate (inclusive)
    pub min_col: usize,
    /// Maximum row (y) coordinate (inclusive)
    pub max_row: usize,
    /// Maximum column (x) coordinate (inclusive)
    pub max_col: usize,
}

impl AABB {
    /// Create an empty box that becomes valid once a point is added
    pub fn new() -> Self {
        Self {
            min_row: usize::MAX,
            min_col: usize::MAX,
            max_row: 0,
            max_col: 0,
        }
    }

    pub fn from_coords(min_row: usize, min_col: usize, max_row: usize, max_col: usize) -> Self {
        Self {
            min_row,
            min_col,
            max_row,
            max_col,
        }
    }

    /// Grow the box to cover pixel (row, col)
    pub fn expand_to_include(&mut self, row: usize, col: usize) {
        self.min_row = self.min_row.min(row);
        self.min_col = self.min_col.min(col);
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
    }

    /// False until at least one pixel has been included
    pub fn is_valid(&self) -> bool {
        self.min_row <= self.max_row && self.min_col <= self.max_col
    }

    /// Width in pixels, 0 for an empty box
    pub fn width(&self) -> usize {
        if self.is_valid() {
            self.max_col - self.min_col + 1
        } else {
            0
        }
    }

    /// Height in pixels, 0 for an empty box
    pub fn height(&self) -> usize {
        if self.is_valid() {
            self.max_row - self.min_row + 1
        } else {
            0
        }
    }

    /// Pixel count of the rectangle (not of the region inside it)
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains_point(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    /// Center as fractional (row, col)
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_row + self.max_row) as f64 / 2.0,
            (self.min_col + self.max_col) as f64 / 2.0,
        )
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::new()
    }
}
