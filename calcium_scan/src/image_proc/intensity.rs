//! Validated grayscale input for the measurement pipeline
//!
//! Everything downstream assumes a rectangular, non-empty array of 8-bit
//! intensities. This is the only place those assumptions are checked.

use ndarray::{Array2, ArrayView2};
use num_traits::ToPrimitive;

use crate::error::InputError;
use crate::image_size::ImageSize;

/// A non-empty 2-D array of 0..=255 intensities, indexed `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityImage {
    pixels: Array2<u8>,
}

impl IntensityImage {
    /// Wrap an existing array, rejecting zero-sized shapes
    pub fn from_array(pixels: Array2<u8>) -> Result<Self, InputError> {
        let (height, width) = pixels.dim();
        if width == 0 || height == 0 {
            return Err(InputError::Empty { width, height });
        }
        Ok(Self { pixels })
    }

    /// Build from a row-major buffer of exactly `width * height` bytes
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::Empty { width, height });
        }

        let expected = width
            .checked_mul(height)
            .ok_or(InputError::TooLarge { width, height })?;
        let len = data.len();
        let size_error = InputError::BufferSize {
            len,
            width,
            height,
            expected,
        };
        if len != expected {
            return Err(size_error);
        }

        let pixels = Array2::from_shape_vec((height, width), data).map_err(|_| size_error)?;
        Ok(Self { pixels })
    }

    /// Build from nested rows of any primitive numeric type
    ///
    /// Every row must have the same length as the first and every value must
    /// convert losslessly into `u8`. Fractional values such as `1.7` are
    /// rejected rather than truncated.
    ///
    /// # Arguments
    /// * `rows` - Image rows, top to bottom
    ///
    /// # Returns
    /// The validated image, or the first problem found while scanning in
    /// raster order
    pub fn from_rows<R, T>(rows: &[R]) -> Result<Self, InputError>
    where
        R: AsRef<[T]>,
        T: ToPrimitive,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 || height == 0 {
            return Err(InputError::Empty { width, height });
        }

        let capacity = width
            .checked_mul(height)
            .ok_or(InputError::TooLarge { width, height })?;
        let mut data = Vec::with_capacity(capacity);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(InputError::RaggedRows {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, value) in values.iter().enumerate() {
                let level = value
                    .to_u8()
                    .filter(|&level| value.to_f64() == Some(level as f64))
                    .ok_or(InputError::IntensityOutOfRange { row, col })?;
                data.push(level);
            }
        }

        Self::from_raw(width, height, data)
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.pixels.view()
    }

    pub fn size(&self) -> ImageSize {
        ImageSize::of_view(&self.pixels.view())
    }

    pub fn into_array(self) -> Array2<u8> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_accepts_wide_integer_types() {
        let rows = vec![vec![0i32, 128, 255], vec![1, 2, 3]];
        let image = IntensityImage::from_rows(&rows).unwrap();

        assert_eq!(image.size(), ImageSize::from_width_height(3, 2));
        assert_eq!(image.view()[[0, 2]], 255);
        assert_eq!(image.view()[[1, 0]], 1);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![0u16, 1, 2], vec![3, 4]];
        assert_eq!(
            IntensityImage::from_rows(&rows),
            Err(InputError::RaggedRows {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_out_of_range() {
        let rows = vec![vec![0i32, 1], vec![256, 3]];
        assert_eq!(
            IntensityImage::from_rows(&rows),
            Err(InputError::IntensityOutOfRange { row: 1, col: 0 })
        );

        let negative = vec![vec![-1i64]];
        assert_eq!(
            IntensityImage::from_rows(&negative),
            Err(InputError::IntensityOutOfRange { row: 0, col: 0 })
        );
    }

    #[test]
    fn test_from_rows_rejects_fractional_values() {
        let rows = vec![vec![1.7f64, 254.9]];
        assert_eq!(
            IntensityImage::from_rows(&rows),
            Err(InputError::IntensityOutOfRange { row: 0, col: 0 })
        );

        let nan = vec![vec![3.0f32, f32::NAN]];
        assert_eq!(
            IntensityImage::from_rows(&nan),
            Err(InputError::IntensityOutOfRange { row: 0, col: 1 })
        );

        // Whole-valued floats are fine
        let whole = vec![vec![0.0f64, 255.0]];
        let image = IntensityImage::from_rows(&whole).unwrap();
        assert_eq!(image.view()[[0, 1]], 255);
    }

    #[test]
    fn test_from_raw_rejects_overflowing_dimensions() {
        assert_eq!(
            IntensityImage::from_raw(usize::MAX, 2, vec![0u8; 4]),
            Err(InputError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let no_rows: Vec<Vec<u8>> = Vec::new();
        assert_eq!(
            IntensityImage::from_rows(&no_rows),
            Err(InputError::Empty {
                width: 0,
                height: 0
            })
        );

        let empty_row: Vec<Vec<u8>> = vec![Vec::new()];
        assert!(matches!(
            IntensityImage::from_rows(&empty_row),
            Err(InputError::Empty { .. })
        ));

        assert!(matches!(
            IntensityImage::from_array(Array2::zeros((0, 5))),
            Err(InputError::Empty {
                width: 5,
                height: 0
            })
        ));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert_eq!(
            IntensityImage::from_raw(2, 2, vec![0; 3]),
            Err(InputError::BufferSize {
                len: 3,
                width: 2,
                height: 2,
                expected: 4
            })
        );

        let image = IntensityImage::from_raw(3, 1, vec![7, 8, 9]).unwrap();
        assert_eq!(image.into_array().row(0).to_vec(), vec![7, 8, 9]);
    }
}
