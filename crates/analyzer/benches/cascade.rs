//! Benchmarks for the detection cascade.

use aspect_analyzer::{detect, infer_from_key, AnalysisRequest};
use aspect_image::{read_image_info, ImageDecoder};
use aspect_store::{MemoryStore, OfflineStore};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn png_header(width: u32, height: u32) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    data
}

fn bench_key_inference(c: &mut Criterion) {
    c.bench_function("infer_pattern", |b| {
        b.iter(|| infer_from_key(black_box("uploads/2024/hero_1080x1920_final.jpg")))
    });

    c.bench_function("infer_keyword", |b| {
        b.iter(|| infer_from_key(black_box("uploads/2024/team/avatar.png")))
    });

    c.bench_function("infer_miss", |b| {
        b.iter(|| infer_from_key(black_box("uploads/2024/IMG_0042.jpg")))
    });
}

fn bench_header_decode(c: &mut Criterion) {
    let png = png_header(4000, 3000);
    let gif = b"GIF89a\x80\x02\xe0\x01\x00\x00\x00".to_vec();

    c.bench_function("read_png_header", |b| b.iter(|| read_image_info(black_box(&png))));
    c.bench_function("read_gif_header", |b| b.iter(|| read_image_info(black_box(&gif))));
}

fn bench_cascade(c: &mut Criterion) {
    let store = MemoryStore::new().with_object("media", "photo.png", png_header(1080, 1920));
    let fetched = AnalysisRequest::new("media", "photo.png");
    let offline = AnalysisRequest::new("media", "banner_top.png");

    c.bench_function("detect_binary", |b| {
        b.iter(|| detect(black_box(&fetched), &store, &ImageDecoder))
    });

    c.bench_function("detect_offline", |b| {
        b.iter(|| detect(black_box(&offline), &OfflineStore, &ImageDecoder))
    });
}

criterion_group!(benches, bench_key_inference, bench_header_decode, bench_cascade);
criterion_main!(benches);
