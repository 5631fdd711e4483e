//! Synthetic calcification phantoms
//!
//! Renders a flat soft-tissue background with uniform noise and bright
//! elliptical deposits on top. Rendering is deterministic for a seeded RNG,
//! which is what the CLI, tests and benchmarks rely on.

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::image_proc::IntensityImage;
use crate::image_size::ImageSize;

/// One elliptical deposit, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhantomDeposit {
    pub row: f64,
    pub col: f64,
    /// Semi-axis along rows
    pub radius_rows: f64,
    /// Semi-axis along columns
    pub radius_cols: f64,
    /// Intensity inside the ellipse before noise
    pub intensity: f64,
}

impl PhantomDeposit {
    fn covers(&self, row: usize, col: usize) -> bool {
        let dy = (row as f64 - self.row) / self.radius_rows;
        let dx = (col as f64 - self.col) / self.radius_cols;
        dx * dx + dy * dy <= 1.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhantomConfig {
    pub size: ImageSize,
    /// Mean background intensity
    pub tissue_level: f64,
    /// Noise is drawn uniformly from ±amplitude
    pub noise_amplitude: f64,
    pub deposits: Vec<PhantomDeposit>,
}

impl PhantomConfig {
    pub fn new(size: ImageSize, deposits: Vec<PhantomDeposit>) -> Self {
        Self {
            size,
            tissue_level: 60.0,
            noise_amplitude: 12.0,
            deposits,
        }
    }
}

/// Scatter `count` deposits of random size and brightness across the image
pub fn random_deposits<R: Rng>(size: ImageSize, count: usize, rng: &mut R) -> Vec<PhantomDeposit> {
    if size.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|_| PhantomDeposit {
            row: rng.random_range(0.0..size.height as f64),
            col: rng.random_range(0.0..size.width as f64),
            radius_rows: rng.random_range(1.0..6.0),
            radius_cols: rng.random_range(1.0..6.0),
            intensity: rng.random_range(190.0..250.0),
        })
        .collect()
}

/// Render the phantom described by `config`
///
/// # Returns
/// The phantom as a validated image, or `InputError::Empty` for a zero size
pub fn render_phantom<R: Rng>(
    config: &PhantomConfig,
    rng: &mut R,
) -> Result<IntensityImage, InputError> {
    let mut frame = Array2::<f64>::from_elem(config.size.shape(), config.tissue_level);

    for deposit in &config.deposits {
        for ((row, col), pixel) in frame.indexed_iter_mut() {
            if deposit.covers(row, col) {
                *pixel = pixel.max(deposit.intensity);
            }
        }
    }

    if config.noise_amplitude > 0.0 {
        let amplitude = config.noise_amplitude;
        for pixel in frame.iter_mut() {
            *pixel += rng.random_range(-amplitude..=amplitude);
        }
    }

    IntensityImage::from_array(frame.mapv(|v| v.round().clamp(0.0, 255.0) as u8))
}
