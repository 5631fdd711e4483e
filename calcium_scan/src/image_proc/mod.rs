//! Image processing stages for calcium deposit measurement
//!
//! Stages run left to right, each a pure function of its input:
//! histogram → Otsu threshold → binary mask → connected-component labels →
//! per-region areas. Optional contrast enhancement sits in front of the chain
//! and the `image` submodule turns results into pictures.

pub mod aabb;
pub mod histogram;
pub mod image;
pub mod intensity;
pub mod labeling;
pub mod preprocess;
pub mod regions;
pub mod thresholding;

// Re-export key functionality for easier access
pub use aabb::AABB;
pub use histogram::{Histogram, INTENSITY_LEVELS};
pub use intensity::IntensityImage;
pub use labeling::{label_components, Connectivity, LabelMap};
pub use preprocess::{equalize_histogram, gaussian_blur, preprocess, PreprocessConfig};
pub use regions::{aggregate_regions, RegionRecord, RegionSummary};
pub use thresholding::{apply_threshold, count_above, otsu_threshold, otsu_threshold_image};
