use calcium_scan::image_proc::{apply_threshold, label_components, otsu_threshold_image};
use calcium_scan::phantom::{random_deposits, render_phantom, PhantomConfig};
use calcium_scan::{analyze, measure_calcium, Connectivity, ImageSize, PipelineConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_pipeline(c: &mut Criterion) {
    let size = ImageSize::from_width_height(512, 512);
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let phantom = PhantomConfig::new(size, random_deposits(size, 40, &mut rng));
    let image = render_phantom(&phantom, &mut rng).expect("phantom size is non-zero");

    let threshold = otsu_threshold_image(image.view());
    let mask = apply_threshold(image.view(), threshold);

    c.bench_function("label_components_512", |b| {
        b.iter(|| label_components(black_box(mask.view()), Connectivity::Eight))
    });

    c.bench_function("measure_calcium_512", |b| {
        b.iter(|| measure_calcium(black_box(&image), Connectivity::Eight))
    });

    let config = PipelineConfig::default();
    c.bench_function("analyze_with_enhancement_512", |b| {
        b.iter(|| analyze(black_box(&image), &config))
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
