// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Border-removal tuning configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClippingError, Result};

/// Tuning constants for threshold detection and the edge flood fill.
///
/// The defaults are the empirically tuned values the game ships with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    /// Maximum flood-fill depth as a fraction of image width.
    pub depth_ratio: f64,
    /// Minimum fraction of edge samples a tone cluster needs before it counts
    /// as a border.
    pub cluster_share: f64,
    /// Slack added to (black) or subtracted from (white) the cluster
    /// percentile to absorb compression noise.
    pub slack: u8,
    /// Black threshold used when the edge has no dark cluster.
    pub default_black: u8,
    /// White threshold used when the edge has no bright cluster.
    pub default_white: u8,
    /// Upper clamp for a detected black threshold.
    pub black_ceiling: u8,
    /// Lower clamp for a detected white threshold.
    pub white_floor: u8,
    /// Samples with `max(R,G,B)` below this join the dark cluster.
    pub dark_cutoff: u8,
    /// Samples with `min(R,G,B)` above this join the bright cluster.
    pub bright_cutoff: u8,
    /// Percentile of the sorted dark cluster taken as the black cut.
    pub black_percentile: f64,
    /// Percentile of the sorted bright cluster taken as the white cut.
    pub white_percentile: f64,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            depth_ratio: 0.02,
            cluster_share: 0.2,
            slack: 20,
            default_black: 40,
            default_white: 215,
            black_ceiling: 100,
            white_floor: 155,
            dark_cutoff: 128,
            bright_cutoff: 128,
            black_percentile: 0.95,
            white_percentile: 0.05,
        }
    }
}

impl BorderConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject ratios and percentiles outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("depth_ratio", self.depth_ratio),
            ("cluster_share", self.cluster_share),
            ("black_percentile", self.black_percentile),
            ("white_percentile", self.white_percentile),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ClippingError::InvalidArgument(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Depth guard for an image of the given width: `round(width × depth_ratio)`.
    pub fn max_depth(&self, width: u32) -> u32 {
        (f64::from(width) * self.depth_ratio).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn depth_guard_is_two_percent_of_width() {
        let config = BorderConfig::default();
        assert_eq!(config.max_depth(100), 2);
        assert_eq!(config.max_depth(200), 4);
        assert_eq!(config.max_depth(800), 16);
        assert_eq!(config.max_depth(10), 0);
        assert_eq!(config.max_depth(0), 0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "depth_ratio": 0.05, "slack": 10 }}"#).unwrap();

        let config = BorderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.depth_ratio, 0.05);
        assert_eq!(config.slack, 10);
        assert_eq!(config.default_black, 40);
        assert_eq!(config.default_white, 215);
    }

    #[test]
    fn out_of_range_ratio_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cluster_share": 1.5 }}"#).unwrap();

        let err = BorderConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ClippingError::InvalidArgument(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = BorderConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ClippingError::Serialization(_)));
    }
}
