//! Invariants checked on seeded random images
//!
//! Labels are compared against a plain flood fill, which numbers regions in the
//! same raster discovery order and is easy to trust.

use calcium_scan::image_proc::{
    aggregate_regions, apply_threshold, count_above, label_components, otsu_threshold,
};
use calcium_scan::{measure_calcium, Connectivity, Histogram, IntensityImage};
use ndarray::{Array2, ArrayView2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_image(rng: &mut ChaCha8Rng, rows: usize, cols: usize) -> IntensityImage {
    let data: Vec<u8> = (0..rows * cols).map(|_| rng.random()).collect();
    IntensityImage::from_raw(cols, rows, data).unwrap()
}

fn random_mask(rng: &mut ChaCha8Rng, rows: usize, cols: usize, density: f64) -> Array2<bool> {
    Array2::from_shape_fn((rows, cols), |_| rng.random_bool(density))
}

/// Reference labeling by depth-first flood fill
fn flood_fill_labels(mask: ArrayView2<bool>, connectivity: Connectivity) -> (Array2<u32>, u32) {
    let (rows, cols) = mask.dim();
    let mut labels = Array2::<u32>::zeros((rows, cols));
    let mut label_counter = 0;

    for i in 0..rows {
        for j in 0..cols {
            if !mask[[i, j]] || labels[[i, j]] != 0 {
                continue;
            }
            label_counter += 1;
            labels[[i, j]] = label_counter;
            let mut stack = vec![(i, j)];

            while let Some((y, x)) = stack.pop() {
                for &(dy, dx) in connectivity.offsets() {
                    let ny = y as isize + dy;
                    let nx = x as isize + dx;
                    if ny < 0 || nx < 0 || ny >= rows as isize || nx >= cols as isize {
                        continue;
                    }
                    let (ny, nx) = (ny as usize, nx as usize);
                    if mask[[ny, nx]] && labels[[ny, nx]] == 0 {
                        labels[[ny, nx]] = label_counter;
                        stack.push((ny, nx));
                    }
                }
            }
        }
    }

    (labels, label_counter)
}

#[test]
fn test_histogram_sums_to_pixel_count() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..20 {
        let rows = rng.random_range(1..40);
        let cols = rng.random_range(1..40);
        let image = random_image(&mut rng, rows, cols);

        let hist = Histogram::from_pixels(image.view());
        assert_eq!(hist.total(), (rows * cols) as u64);
    }
}

#[test]
fn test_mask_count_matches_recount() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    for _ in 0..20 {
        let image = random_image(&mut rng, 23, 31);
        let t = otsu_threshold(&Histogram::from_pixels(image.view()));

        let mask = apply_threshold(image.view(), t);
        let foreground = mask.iter().filter(|&&fg| fg).count();

        assert_eq!(foreground, count_above(image.view(), t));
        let manual = image.view().iter().filter(|&&p| p > t).count();
        assert_eq!(foreground, manual);
    }
}

#[test]
fn test_labels_match_flood_fill() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for connectivity in [Connectivity::Eight, Connectivity::Four] {
        for density in [0.1, 0.3, 0.45, 0.6, 0.9] {
            let mask = random_mask(&mut rng, 37, 29, density);

            let labels = label_components(mask.view(), connectivity);
            let (expected, expected_count) = flood_fill_labels(mask.view(), connectivity);

            assert_eq!(labels.count(), expected_count);
            assert_eq!(labels.labels(), expected.view());
        }
    }
}

#[test]
fn test_adjacent_foreground_shares_label() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mask = random_mask(&mut rng, 50, 50, 0.4);
    let labels = label_components(mask.view(), Connectivity::Eight);
    let (rows, cols) = mask.dim();

    for ((r, c), &fg) in mask.indexed_iter() {
        assert_eq!(fg, labels.label_at(r, c) > 0);
        if !fg {
            continue;
        }
        for &(dy, dx) in Connectivity::Eight.offsets() {
            let (Some(nr), Some(nc)) = (r.checked_add_signed(dy), c.checked_add_signed(dx)) else {
                continue;
            };
            if nr < rows && nc < cols && mask[[nr, nc]] {
                assert_eq!(labels.label_at(r, c), labels.label_at(nr, nc));
            }
        }
    }
}

#[test]
fn test_region_areas_conserve_foreground() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for density in [0.0, 0.2, 0.5, 1.0] {
        let mask = random_mask(&mut rng, 41, 17, density);
        let labels = label_components(mask.view(), Connectivity::Eight);

        let summary = aggregate_regions(&labels);

        let foreground = mask.iter().filter(|&&fg| fg).count();
        assert_eq!(summary.total_area(), foreground);
        assert_eq!(summary.areas().iter().sum::<usize>(), foreground);
        assert_eq!(summary.len(), labels.count() as usize);
        assert!(summary.areas().iter().all(|&area| area > 0));
    }
}

#[test]
fn test_pipeline_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let image = random_image(&mut rng, 64, 48);

    let first = measure_calcium(&image, Connectivity::Eight);
    let second = measure_calcium(&image, Connectivity::Eight);

    assert_eq!(first.labels, second.labels);
    assert_eq!(first.summary, second.summary);
    assert_eq!(first, second);
}
