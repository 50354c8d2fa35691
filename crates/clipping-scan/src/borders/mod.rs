// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border removal — threshold detection, edge flood fill, and fragment pruning,
// sequenced over a single decoded buffer.

pub mod detect;
pub mod fill;
pub mod prune;

use clipping_core::error::Result;
use clipping_core::{BorderConfig, BorderMode, RemovalOutcome, ThresholdOverrides, Thresholds};
use image::RgbaImage;
use tracing::{info, instrument};

use crate::codec;

/// Removes scan borders with a fixed tuning configuration.
///
/// Holds no per-image state, so one remover can serve any number of
/// concurrent requests.
///
/// ```ignore
/// let remover = BorderRemover::new(BorderConfig::default());
/// let outcome = remover.remove(&jpeg_bytes, BorderMode::Both, ThresholdOverrides::default())?;
/// std::fs::write("clipping.png", &outcome.png)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct BorderRemover {
    config: BorderConfig,
}

impl BorderRemover {
    pub fn new(config: BorderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BorderConfig {
        &self.config
    }

    /// Decode, remove borders, and re-encode as PNG.
    ///
    /// Detection always runs, so the channel without an override still
    /// reports its auto-detected threshold.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn remove(
        &self,
        data: &[u8],
        mode: BorderMode,
        overrides: ThresholdOverrides,
    ) -> Result<RemovalOutcome> {
        let mut image = codec::decode_rgba(data)?;
        let thresholds = remove_borders_rgba(&mut image, mode, overrides, &self.config);
        let png = codec::encode_png(&image)?;
        Ok(RemovalOutcome { png, thresholds })
    }

    /// Decode and report the auto-detected thresholds without touching any
    /// pixel.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn detect(&self, data: &[u8]) -> Result<Thresholds> {
        let image = codec::decode_rgba(data)?;
        let thresholds = detect::detect_thresholds(&image, &self.config);
        info!(
            black_threshold = thresholds.black_threshold,
            white_threshold = thresholds.white_threshold,
            "Border thresholds detected"
        );
        Ok(thresholds)
    }
}

/// Remove near-black borders, then detached fragments. `threshold` is the
/// maximum R/G/B for "black"; `None` auto-detects.
pub fn remove_black_borders(data: &[u8], threshold: Option<u8>) -> Result<RemovalOutcome> {
    BorderRemover::default().remove(data, BorderMode::Black, ThresholdOverrides::black(threshold))
}

/// Remove near-white borders, then detached fragments. `threshold` is the
/// minimum R/G/B for "white"; `None` auto-detects.
pub fn remove_white_borders(data: &[u8], threshold: Option<u8>) -> Result<RemovalOutcome> {
    BorderRemover::default().remove(data, BorderMode::White, ThresholdOverrides::white(threshold))
}

/// Remove near-black and near-white borders in one combined pass, then
/// detached fragments. Either override may be omitted.
pub fn remove_borders(data: &[u8], overrides: ThresholdOverrides) -> Result<RemovalOutcome> {
    BorderRemover::default().remove(data, BorderMode::Both, overrides)
}

/// Thresholds auto-detection would choose, for pre-seeding interactive
/// controls before anything is processed.
pub fn detect_border_thresholds(data: &[u8]) -> Result<Thresholds> {
    BorderRemover::default().detect(data)
}

/// Run detection, the edge fill, and fragment pruning over an
/// already-decoded buffer. Only alpha is modified. Returns the thresholds
/// actually applied.
pub fn remove_borders_rgba(
    image: &mut RgbaImage,
    mode: BorderMode,
    overrides: ThresholdOverrides,
    config: &BorderConfig,
) -> Thresholds {
    let detected = detect::detect_thresholds(image, config);
    let thresholds = overrides.resolve(detected);
    let max_depth = config.max_depth(image.width());

    let erased = fill::fill_edges(image, max_depth, |r, g, b| {
        mode.matches(&thresholds, r, g, b)
    });
    let pruned = prune::remove_detached_fragments(image);

    info!(
        width = image.width(),
        height = image.height(),
        %mode,
        black_threshold = thresholds.black_threshold,
        white_threshold = thresholds.white_threshold,
        max_depth,
        erased,
        pruned,
        "Borders removed"
    );
    thresholds
}

/// The outermost ring in scan order: top row, bottom row, then the left and
/// right columns between them. Every pixel appears once, including for
/// single-row and single-column images.
pub(crate) fn edge_pixels(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let rows = if width == 0 { 0 } else { height };
    let top = (0..width).filter(move |_| rows > 0).map(|x| (x, 0));
    let bottom = (0..width)
        .filter(move |_| rows > 1)
        .map(move |x| (x, rows - 1));
    let sides = (1..rows.saturating_sub(1))
        .flat_map(move |y| std::iter::once((0, y)).chain((width > 1).then_some((width - 1, y))));
    top.chain(bottom).chain(sides)
}
