//! Calcium deposit quantification for grayscale medical images
//!
//! Otsu thresholding separates bright calcifications from tissue, two-pass
//! union-find labeling groups deposit pixels into 8-connected regions, and the
//! region aggregator reports each region's area plus the total.
//!
//! ```rust
//! use calcium_scan::{measure_calcium, Connectivity, IntensityImage};
//!
//! let image = IntensityImage::from_rows(&[
//!     [0u8, 0, 0],
//!     [0, 255, 0],
//!     [0, 0, 255],
//! ])
//! .unwrap();
//!
//! let measurement = measure_calcium(&image, Connectivity::Eight);
//! assert_eq!(measurement.summary.total_area(), 2);
//! assert_eq!(measurement.summary.areas(), vec![2]);
//! ```

pub mod error;
pub mod image_proc;
pub mod image_size;
pub mod phantom;
pub mod pipeline;

pub use error::{CalciumError, InputError, Result};
pub use image_proc::{
    Connectivity, Histogram, IntensityImage, LabelMap, PreprocessConfig, RegionRecord,
    RegionSummary,
};
pub use image_size::ImageSize;
pub use pipeline::{analyze, measure_calcium, CalciumMeasurement, CalciumReport, PipelineConfig};
