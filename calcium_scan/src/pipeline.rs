//! End-to-end calcium measurement
//!
//! [`measure_calcium`] runs the core stages on an array that is already
//! enhanced. [`analyze`] adds the configured enhancement and an optional fixed
//! threshold in front of it.

use std::path::Path;

use log::{debug, info};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{CalciumError, Result};
use crate::image_proc::{
    aggregate_regions, apply_threshold, label_components, otsu_threshold, preprocess,
    Connectivity, Histogram, IntensityImage, LabelMap, PreprocessConfig, RegionRecord,
    RegionSummary,
};
use crate::image_size::ImageSize;

/// Settings for a configured pipeline run
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Enhancement applied before thresholding
    pub preprocess: PreprocessConfig,
    /// Adjacency rule for grouping deposit pixels
    pub connectivity: Connectivity,
    /// Fixed cutoff replacing Otsu's automatic choice
    pub threshold: Option<u8>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            connectivity: Connectivity::Eight,
            threshold: None,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        self.preprocess.validate()
    }

    /// Load a JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CalciumError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| CalciumError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Every intermediate product of one measurement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalciumMeasurement {
    /// Histogram of the image fed to the threshold stage
    pub histogram: Histogram,
    /// Cutoff used to build the mask
    pub threshold: u8,
    /// Foreground mask, true for deposit pixels
    pub mask: Array2<bool>,
    pub labels: LabelMap,
    pub summary: RegionSummary,
}

/// Serializable digest of a measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalciumReport {
    pub size: ImageSize,
    pub threshold: u8,
    /// Total deposit area in pixels
    pub total_area: usize,
    /// Region areas in discovery order
    pub region_areas: Vec<usize>,
    pub regions: Vec<RegionRecord>,
}

impl CalciumMeasurement {
    pub fn size(&self) -> ImageSize {
        self.labels.size()
    }

    /// Number of foreground pixels in the mask
    pub fn foreground_count(&self) -> usize {
        self.mask.iter().filter(|&&fg| fg).count()
    }

    pub fn report(&self) -> CalciumReport {
        CalciumReport {
            size: self.size(),
            threshold: self.threshold,
            total_area: self.summary.total_area(),
            region_areas: self.summary.areas(),
            regions: self.summary.regions().to_vec(),
        }
    }
}

fn run_stages(
    image: &IntensityImage,
    threshold: Option<u8>,
    connectivity: Connectivity,
) -> CalciumMeasurement {
    let view = image.view();

    let histogram = Histogram::from_pixels(view);
    debug!(
        "Histogram of {} image: {} occupied levels",
        image.size(),
        histogram.occupied_levels()
    );

    let threshold = match threshold {
        Some(t) => {
            debug!("Using provided threshold: {t}");
            t
        }
        None => {
            let t = otsu_threshold(&histogram);
            debug!("Otsu's threshold: {t}");
            t
        }
    };

    let mask = apply_threshold(view, threshold);
    let labels = label_components(mask.view(), connectivity);
    debug!(
        "Labeled {} regions with {:?} connectivity",
        labels.count(),
        connectivity
    );

    let summary = aggregate_regions(&labels);
    info!(
        "Calcium measurement: threshold {}, {} regions, total area {} px",
        threshold,
        summary.len(),
        summary.total_area()
    );

    CalciumMeasurement {
        histogram,
        threshold,
        mask,
        labels,
        summary,
    }
}

/// Threshold, label and measure an enhanced intensity image
///
/// # Arguments
/// * `image` - Validated intensity image, already blurred/equalized if needed
/// * `connectivity` - Adjacency rule, `Connectivity::Eight` for deposits
///
/// # Returns
/// All stage outputs. Flat images and images without any pixel above the
/// threshold produce an empty summary rather than an error.
pub fn measure_calcium(image: &IntensityImage, connectivity: Connectivity) -> CalciumMeasurement {
    run_stages(image, None, connectivity)
}

/// Enhance then measure, according to `config`
pub fn analyze(image: &IntensityImage, config: &PipelineConfig) -> Result<CalciumMeasurement> {
    config.validate()?;
    let enhanced = preprocess(image, &config.preprocess)?;
    Ok(run_stages(&enhanced, config.threshold, config.connectivity))
}
