//! Criterion microbenches for mask geometry and annotation building.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use mask2coco::annotation::build_annotation;
use mask2coco::geometry::{area, bounding_box, encode, polygons};
use mask2coco::ir::{AnnotationId, BinaryMask, CategoryId, ImageId};
use mask2coco::validation::ValidationThresholds;

/// 640x480 mask holding a filled ellipse and a ring, roughly what a
/// single object looks like in a camera frame.
fn object_mask() -> BinaryMask {
    BinaryMask::from_fn(640, 480, |x, y| {
        let (dx, dy) = (x as f64 - 320.0, y as f64 - 240.0);
        let ellipse = (dx / 150.0).powi(2) + (dy / 100.0).powi(2) <= 1.0;
        let r = ((x as f64 - 100.0).powi(2) + (y as f64 - 100.0).powi(2)).sqrt();
        ellipse || (30.0..45.0).contains(&r)
    })
}

fn bench_rle(c: &mut Criterion) {
    let mask = object_mask();
    let mut group = c.benchmark_group("rle");
    group.throughput(Throughput::Elements(mask.as_raw().len() as u64));

    group.bench_function("encode", |b| b.iter(|| black_box(encode(black_box(&mask)))));

    let encoded = encode(&mask);
    group.bench_function("area_and_bbox", |b| {
        b.iter(|| {
            let e = black_box(&encoded);
            black_box((area(e), bounding_box(e)))
        })
    });

    group.finish();
}

fn bench_polygons(c: &mut Criterion) {
    let mask = object_mask();
    let mut group = c.benchmark_group("polygons");
    group.throughput(Throughput::Elements(mask.as_raw().len() as u64));

    group.bench_function("raw", |b| b.iter(|| black_box(polygons(black_box(&mask), 0.0))));
    group.bench_function("tolerance_1", |b| {
        b.iter(|| black_box(polygons(black_box(&mask), 1.0)))
    });

    group.finish();
}

fn bench_build_annotation(c: &mut Criterion) {
    let mask = object_mask();
    let thresholds = ValidationThresholds::default();

    c.bench_function("build_annotation", |b| {
        b.iter(|| {
            black_box(build_annotation(
                AnnotationId::new(0),
                ImageId::new(0),
                CategoryId::new(1),
                black_box(&mask),
                &thresholds,
            ))
        })
    });
}

criterion_group!(benches, bench_rle, bench_polygons, bench_build_annotation);
criterion_main!(benches);
