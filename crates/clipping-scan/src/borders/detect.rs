// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Threshold detection — calibrates black/white border cut-offs from the tones
// found on the image's outermost pixel ring.

use clipping_core::{BorderConfig, Thresholds};
use image::RgbaImage;
use tracing::debug;

use super::edge_pixels;

/// Sample every pixel on the outermost ring and derive thresholds calibrated
/// to the border tones found there.
///
/// "Dark" uses `max(R,G,B)` per sample (all channels low) and "bright" uses
/// `min(R,G,B)` (all channels high). When at least `cluster_share` of the
/// ring falls into a cluster, its percentile plus/minus `slack` becomes the
/// threshold, clamped so a noisy edge can never claim mid-tones. Otherwise the
/// conservative defaults apply. Never fails; a zero-sized image yields the
/// defaults.
pub fn detect_thresholds(image: &RgbaImage, config: &BorderConfig) -> Thresholds {
    let (width, height) = image.dimensions();

    let mut dark = Vec::new();
    let mut bright = Vec::new();
    let mut samples = 0usize;

    for (x, y) in edge_pixels(width, height) {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        samples += 1;

        let value_max = r.max(g).max(b);
        if value_max < config.dark_cutoff {
            dark.push(value_max);
        }
        let value_min = r.min(g).min(b);
        if value_min > config.bright_cutoff {
            bright.push(value_min);
        }
    }

    let black_threshold = if is_cluster(dark.len(), samples, config.cluster_share) {
        dark.sort_unstable();
        let p = percentile(&dark, config.black_percentile);
        p.saturating_add(config.slack).min(config.black_ceiling)
    } else {
        config.default_black
    };

    let white_threshold = if is_cluster(bright.len(), samples, config.cluster_share) {
        bright.sort_unstable();
        let p = percentile(&bright, config.white_percentile);
        p.saturating_sub(config.slack).max(config.white_floor)
    } else {
        config.default_white
    };

    debug!(
        samples,
        dark = dark.len(),
        bright = bright.len(),
        black_threshold,
        white_threshold,
        "Edge thresholds detected"
    );

    Thresholds {
        black_threshold,
        white_threshold,
    }
}

fn is_cluster(members: usize, samples: usize, share: f64) -> bool {
    members > 0 && members as f64 / samples as f64 >= share
}

/// Value at rank `floor(len × q)` of an ascending, non-empty slice.
fn percentile(sorted: &[u8], q: f64) -> u8 {
    let rank = (sorted.len() as f64 * q).floor() as usize;
    sorted[rank.min(sorted.len() - 1)]
}
