use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use minmax_relevel as mr;
use mr::image::{Rgb, RgbImage};
use std::time::{Duration, Instant};

fn test_image(dim: u32) -> RgbImage {
    RgbImage::from_fn(dim, dim, |x, y| {
        let v = ((x ^ y) & 0xff) as u8;
        Rgb([v, (x & 0xff) as u8, (y & 0xff) as u8])
    })
}

fn build(c: &mut Criterion) {
    static DIM: u32 = 64;

    let mut group = c.benchmark_group("build");
    group.sample_size(10);

    for dim in [DIM, 2 * DIM, 4 * DIM, 8 * DIM, 16 * DIM].iter() {
        // Generate once, we still do a memcpy each run
        let img = test_image(*dim);

        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |b, _| {
            b.iter_custom(|iters| {
                let mut total_elapsed = Duration::new(0, 0);
                for _i in 0..iters {
                    let input = img.clone();

                    let start = Instant::now();
                    black_box(mr::MinMaxPyramid::new(input).unwrap());
                    total_elapsed += start.elapsed();
                }

                total_elapsed
            });
        });
    }
    group.finish();
}

fn relevel(c: &mut Criterion) {
    static DIM: u32 = 64;

    let mut group = c.benchmark_group("relevel");

    for dim in [DIM, 4 * DIM, 16 * DIM].iter() {
        let pyramid = mr::MinMaxPyramid::new(test_image(*dim)).unwrap();
        let scale = pyramid.min_scale();

        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |b, _| {
            b.iter(|| black_box(pyramid.relevel(black_box(scale))));
        });
    }
    group.finish();
}

fn downsample(c: &mut Criterion) {
    let img = test_image(1024);

    c.bench_function("downsample_min_1024", |b| {
        b.iter(|| black_box(mr::downsample_min(&img)))
    });
    c.bench_function("downsample_max_1024", |b| {
        b.iter(|| black_box(mr::downsample_max(&img)))
    });
}

criterion_group!(benches, build, relevel, downsample);
criterion_main!(benches);
