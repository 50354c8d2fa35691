// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for border removal in the clipping-scan crate.
// Measures the in-memory pipeline (detection, edge fill, pruning) separately
// from the full decode/encode round trip.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use clipping_core::{BorderConfig, BorderMode, ThresholdOverrides};
use clipping_scan::codec::encode_png;
use clipping_scan::{remove_borders, remove_borders_rgba};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// An 800x1100 synthetic scan, roughly the size the game requests from the
/// IIIF server: a 12px black film edge, an 8px white margin, and newsprint
/// with horizontal rules of "text".
fn synthetic_scan() -> RgbaImage {
    let (width, height) = (800u32, 1100u32);
    RgbaImage::from_fn(width, height, |x, y| {
        let depth = x.min(y).min(width - 1 - x).min(height - 1 - y);
        if depth < 12 {
            Rgba([14, 12, 12, 255])
        } else if depth < 20 {
            Rgba([244, 240, 236, 255])
        } else if y % 14 < 4 && x % 200 > 20 {
            Rgba([35, 30, 28, 255])
        } else {
            Rgba([196, 184, 160, 255])
        }
    })
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_remove_borders_rgba(c: &mut Criterion) {
    let scan = synthetic_scan();
    let config = BorderConfig::default();

    c.bench_function("remove_borders_rgba (800x1100)", |b| {
        b.iter(|| {
            let mut image = black_box(scan.clone());
            let used = remove_borders_rgba(
                &mut image,
                BorderMode::Both,
                ThresholdOverrides::default(),
                &config,
            );
            black_box((image, used));
        });
    });
}

fn bench_remove_borders_png(c: &mut Criterion) {
    let bytes = encode_png(&synthetic_scan()).expect("fixture encodes");

    c.bench_function("remove_borders png round trip (800x1100)", |b| {
        b.iter(|| {
            let outcome = remove_borders(black_box(&bytes), ThresholdOverrides::default())
                .expect("fixture decodes");
            black_box(outcome);
        });
    });
}

criterion_group!(benches, bench_remove_borders_rgba, bench_remove_borders_png);
criterion_main!(benches);
