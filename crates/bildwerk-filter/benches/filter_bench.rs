// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the per-pixel filters. Each filter is a full pass
// over the image on the calling thread, so these numbers are the latency a
// slider move pays.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use bildwerk_core::{BrightnessDelta, GrayscaleIntensity, LumaCoefficients, ParameterPolicy};
use bildwerk_filter::image::{apply_brightness, apply_grayscale};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A 512x512 gradient so that every HSL branch gets exercised.
fn gradient() -> RgbaImage {
    RgbaImage::from_fn(512, 512, |x, y| {
        Rgba([(x / 2) as u8, (y / 2) as u8, ((x + y) / 4) as u8, 255])
    })
}

fn bench_grayscale(c: &mut Criterion) {
    let img = gradient();
    let intensity = GrayscaleIntensity::new(40, ParameterPolicy::Reject).expect("in range");

    c.bench_function("grayscale (512x512)", |b| {
        b.iter(|| {
            let out = apply_grayscale(black_box(&img), intensity, LumaCoefficients::Rec601);
            black_box(out);
        });
    });
}

fn bench_brightness(c: &mut Criterion) {
    let img = gradient();
    let delta = BrightnessDelta::new(25, ParameterPolicy::Reject).expect("in range");

    c.bench_function("brightness (512x512)", |b| {
        b.iter(|| {
            let out = apply_brightness(black_box(&img), delta);
            black_box(out);
        });
    });
}

criterion_group!(benches, bench_grayscale, bench_brightness);
criterion_main!(benches);
