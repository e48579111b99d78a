use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_qr_codec::utils::grayscale::rgba_to_luma_over_white;
use rust_qr_codec::{SymbolImage, SymbolOptions, decode, encode};
use std::num::NonZeroU32;

fn symbol(text: &str, module_size: u32) -> SymbolImage {
    let opts = SymbolOptions::default().with_module_size(NonZeroU32::new(module_size).unwrap());
    encode(text, &opts).unwrap()
}

fn bench_decode_hello(c: &mut Criterion) {
    let image = symbol("HELLO", 20);
    c.bench_function("decode_hello_500px", |b| {
        b.iter(|| decode(black_box(&image)))
    });
}

fn bench_decode_dense(c: &mut Criterion) {
    let image = symbol(&"0123456789abcdef".repeat(40), 4);
    c.bench_function("decode_640_bytes", |b| {
        b.iter(|| decode(black_box(&image)))
    });
}

fn bench_decode_blank(c: &mut Criterion) {
    let image = SymbolImage::blank(640, 480);
    c.bench_function("decode_blank_640x480", |b| {
        b.iter(|| decode(black_box(&image)))
    });
}

fn bench_luma_medium(c: &mut Criterion) {
    let rgba = vec![128u8; 640 * 480 * 4];
    let mut gray = vec![0u8; 640 * 480];
    c.bench_function("rgba_to_luma_640x480", |b| {
        b.iter(|| rgba_to_luma_over_white(black_box(&rgba), black_box(&mut gray)))
    });
}

fn bench_luma_large(c: &mut Criterion) {
    let rgba = vec![128u8; 1920 * 1080 * 4];
    let mut gray = vec![0u8; 1920 * 1080];
    c.bench_function("rgba_to_luma_1920x1080", |b| {
        b.iter(|| rgba_to_luma_over_white(black_box(&rgba), black_box(&mut gray)))
    });
}

criterion_group!(
    benches,
    bench_decode_hello,
    bench_decode_dense,
    bench_decode_blank,
    bench_luma_medium,
    bench_luma_large
);
criterion_main!(benches);
