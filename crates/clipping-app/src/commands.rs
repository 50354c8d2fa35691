// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command implementations: file handling around the border remover.

use std::path::{Path, PathBuf};

use clipping_core::error::Result;
use clipping_core::{BorderConfig, BorderMode, ThresholdOverrides, Thresholds};
use clipping_scan::BorderRemover;
use serde::Serialize;
use tracing::{info, instrument};

/// Arguments of `clipping remove`.
#[derive(Debug, Clone)]
pub struct RemoveArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub mode: BorderMode,
    pub black: Option<u8>,
    pub white: Option<u8>,
    pub config: Option<PathBuf>,
}

/// What `clipping remove` wrote and which thresholds it applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveReport {
    pub output: PathBuf,
    pub mode: BorderMode,
    #[serde(flatten)]
    pub thresholds: Thresholds,
}

impl RemoveArgs {
    #[instrument(skip(self), fields(input = %self.input.display(), mode = %self.mode))]
    pub fn run(self) -> Result<RemoveReport> {
        let remover = BorderRemover::new(load_config(self.config.as_deref())?);
        let data = std::fs::read(&self.input)?;

        // Only the channels the mode uses take an override.
        let overrides = match self.mode {
            BorderMode::Black => ThresholdOverrides::black(self.black),
            BorderMode::White => ThresholdOverrides::white(self.white),
            BorderMode::Both => ThresholdOverrides {
                black_threshold: self.black,
                white_threshold: self.white,
            },
        };
        let outcome = remover.remove(&data, self.mode, overrides)?;

        let output = self
            .output
            .unwrap_or_else(|| default_output_path(&self.input));
        std::fs::write(&output, &outcome.png)?;
        info!(
            output = %output.display(),
            png_bytes = outcome.png.len(),
            "Clipping written"
        );

        Ok(RemoveReport {
            output,
            mode: self.mode,
            thresholds: outcome.thresholds,
        })
    }
}

/// `clipping detect`: decode and report thresholds without processing.
pub fn detect(input: &Path, config: Option<&Path>) -> Result<Thresholds> {
    let remover = BorderRemover::new(load_config(config)?);
    let data = std::fs::read(input)?;
    remover.detect(&data)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<BorderConfig> {
    match path {
        Some(path) => BorderConfig::from_json_file(path),
        None => Ok(BorderConfig::default()),
    }
}

/// `scans/page.jpg` becomes `scans/page-clipped.png`.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "clipping".to_string());
    input.with_file_name(format!("{stem}-clipped.png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipping_core::ClippingError;
    use image::{ImageFormat, Rgba, RgbaImage};

    /// Black film edge around paper, written as PNG into `dir`.
    fn write_scan(dir: &Path) -> PathBuf {
        let img = RgbaImage::from_fn(60, 60, |x, y| {
            let depth = x.min(y).min(59 - x).min(59 - y);
            if depth < 2 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([180, 170, 150, 255])
            }
        });
        let path = dir.join("page.png");
        img.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    fn remove_args(input: PathBuf) -> RemoveArgs {
        RemoveArgs {
            input,
            output: None,
            mode: BorderMode::Both,
            black: None,
            white: None,
            config: None,
        }
    }

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("scans/page.jpg")),
            PathBuf::from("scans/page-clipped.png")
        );
    }

    #[test]
    fn remove_writes_transparent_png() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_scan(dir.path());

        let report = remove_args(input).run().unwrap();
        assert_eq!(report.output, dir.path().join("page-clipped.png"));
        assert_eq!(report.thresholds, Thresholds::new(20, 215));

        let result = image::open(&report.output).unwrap().into_rgba8();
        assert_eq!(result.get_pixel(0, 0).0[3], 0);
        assert_eq!(result.get_pixel(30, 30).0, [180, 170, 150, 255]);
    }

    #[test]
    fn black_mode_ignores_white_override() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_scan(dir.path());

        let report = RemoveArgs {
            mode: BorderMode::Black,
            black: Some(10),
            white: Some(160),
            ..remove_args(input)
        }
        .run()
        .unwrap();
        assert_eq!(report.thresholds, Thresholds::new(10, 215));
    }

    #[test]
    fn config_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_scan(dir.path());
        let config = dir.path().join("tuning.json");
        std::fs::write(&config, r#"{ "slack": 5 }"#).unwrap();

        assert_eq!(
            detect(&input, Some(&config)).unwrap(),
            Thresholds::new(5, 215)
        );
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = detect(&dir.path().join("absent.jpg"), None).unwrap_err();
        assert!(matches!(err, ClippingError::Io(_)));
    }

    #[test]
    fn report_serializes_flat() {
        let report = RemoveReport {
            output: PathBuf::from("out.png"),
            mode: BorderMode::White,
            thresholds: Thresholds::new(40, 200),
        };
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"output":"out.png","mode":"white","blackThreshold":40,"whiteThreshold":200}"#
        );
    }
}
