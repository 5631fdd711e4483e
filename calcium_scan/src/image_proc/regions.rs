//! Per-region area measurement
//!
//! One pass over a label map counts the pixels carrying each label. Areas are
//! reported in ascending label order, which is the order regions were first
//! met in a row-major scan. Nothing is dropped here; callers that want a size
//! cutoff apply [`RegionSummary::with_min_area`] themselves.

use serde::{Deserialize, Serialize};

use crate::image_proc::aabb::AABB;
use crate::image_proc::labeling::LabelMap;

/// Measurements of one connected region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRecord {
    /// Label in the label map, starting at 1
    pub label: u32,
    /// Number of pixels carrying the label
    pub area: usize,
    /// Inclusive extent of the region
    pub bbox: AABB,
}

/// All regions of one label map plus their combined area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSummary {
    regions: Vec<RegionRecord>,
    total_area: usize,
}

impl RegionSummary {
    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    /// Sum of all region areas, equal to the mask's foreground count
    pub fn total_area(&self) -> usize {
        self.total_area
    }

    /// Region areas in ascending label order
    pub fn areas(&self) -> Vec<usize> {
        self.regions.iter().map(|region| region.area).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Region with the largest area, first one on ties
    pub fn largest(&self) -> Option<&RegionRecord> {
        self.regions
            .iter()
            .reduce(|best, region| if region.area > best.area { region } else { best })
    }

    /// A new summary keeping only regions of at least `min_area` pixels
    ///
    /// Labels are kept as they were so records still index the label map.
    pub fn with_min_area(&self, min_area: usize) -> RegionSummary {
        let regions: Vec<RegionRecord> = self
            .regions
            .iter()
            .filter(|region| region.area >= min_area)
            .copied()
            .collect();
        let total_area = regions.iter().map(|region| region.area).sum();
        RegionSummary {
            regions,
            total_area,
        }
    }
}

/// Count pixels per label and grow each label's bounding box
///
/// # Arguments
/// * `labels` - Output of the connected-component labeler
///
/// # Returns
/// One record per label `1..=count`, in label order
pub fn aggregate_regions(labels: &LabelMap) -> RegionSummary {
    let count = labels.count() as usize;
    let mut areas = vec![0usize; count];
    let mut bboxes = vec![AABB::new(); count];

    for ((row, col), &label) in labels.labels().indexed_iter() {
        if label == 0 {
            continue;
        }
        let index = label as usize - 1;
        areas[index] += 1;
        bboxes[index].expand_to_include(row, col);
    }

    let regions: Vec<RegionRecord> = areas
        .into_iter()
        .zip(bboxes)
        .enumerate()
        .map(|(index, (area, bbox))| RegionRecord {
            label: index as u32 + 1,
            area,
            bbox,
        })
        .collect();
    let total_area = regions.iter().map(|region| region.area).sum();

    RegionSummary {
        regions,
        total_area,
    }
}
