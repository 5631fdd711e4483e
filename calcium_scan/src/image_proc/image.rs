use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::ArrayView2;

use crate::error::{CalciumError, Result};

/// Converts an intensity array to an image::GrayImage
///
/// Array indices [row, col] map to pixel coordinates (x = col, y = row).
/// Note that array dimensions are (height, width) while image dimensions are
/// (width, height).
///
/// # Arguments
/// * `arr` - Grayscale pixel values
///
/// # Returns
/// * A new GrayImage containing the same data as the input array
pub fn intensity_to_gray_image(arr: ArrayView2<u8>) -> GrayImage {
    let (height, width) = arr.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([arr[[y as usize, x as usize]]])
    })
}

/// Renders a binary mask as black background with white foreground
pub fn mask_to_gray_image(mask: ArrayView2<bool>) -> GrayImage {
    let (height, width) = mask.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        if mask[[y as usize, x as usize]] {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CalciumError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Writes a mask to disk; the format follows the file extension
pub fn save_mask_png(mask: ArrayView2<bool>, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    mask_to_gray_image(mask).save(path)?;
    Ok(())
}

/// Writes an intensity array to disk as an 8-bit grayscale image
pub fn save_intensity_png(arr: ArrayView2<u8>, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    intensity_to_gray_image(arr).save(path)?;
    Ok(())
}
