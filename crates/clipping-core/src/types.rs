// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for border removal.

use serde::{Deserialize, Serialize};

use crate::error::ClippingError;

/// Response header carrying the black threshold actually applied.
pub const BLACK_THRESHOLD_HEADER: &str = "X-Black-Threshold";
/// Response header carrying the white threshold actually applied.
pub const WHITE_THRESHOLD_HEADER: &str = "X-White-Threshold";

/// Luminance cut-offs separating border tones from page content.
///
/// A pixel is near-black if `max(R,G,B) <= black_threshold` and near-white
/// if `min(R,G,B) >= white_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    pub black_threshold: u8,
    pub white_threshold: u8,
}

impl Thresholds {
    pub fn new(black_threshold: u8, white_threshold: u8) -> Self {
        Self {
            black_threshold,
            white_threshold,
        }
    }

    /// Every channel at or below the black threshold.
    pub fn is_near_black(&self, r: u8, g: u8, b: u8) -> bool {
        let bt = self.black_threshold;
        r <= bt && g <= bt && b <= bt
    }

    /// Every channel at or above the white threshold.
    pub fn is_near_white(&self, r: u8, g: u8, b: u8) -> bool {
        let wt = self.white_threshold;
        r >= wt && g >= wt && b >= wt
    }
}

/// Which border tones a removal pass erases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    /// Near-black microfilm edges only.
    Black,
    /// Near-white page margins only.
    White,
    /// Both, in a single combined traversal.
    #[default]
    Both,
}

impl BorderMode {
    /// Border predicate for this mode under the given thresholds.
    pub fn matches(self, thresholds: &Thresholds, r: u8, g: u8, b: u8) -> bool {
        match self {
            Self::Black => thresholds.is_near_black(r, g, b),
            Self::White => thresholds.is_near_white(r, g, b),
            Self::Both => thresholds.is_near_black(r, g, b) || thresholds.is_near_white(r, g, b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Both => "both",
        }
    }
}

impl std::fmt::Display for BorderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BorderMode {
    type Err = ClippingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            "both" => Ok(Self::Both),
            other => Err(ClippingError::InvalidArgument(format!(
                "mode must be black, white, or both (got {other:?})"
            ))),
        }
    }
}

/// Caller-supplied thresholds. `None` means auto-detect from the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdOverrides {
    pub black_threshold: Option<u8>,
    pub white_threshold: Option<u8>,
}

impl ThresholdOverrides {
    pub fn black(threshold: Option<u8>) -> Self {
        Self {
            black_threshold: threshold,
            white_threshold: None,
        }
    }

    pub fn white(threshold: Option<u8>) -> Self {
        Self {
            black_threshold: None,
            white_threshold: threshold,
        }
    }

    /// Explicit values win; the rest fall back to `detected`.
    pub fn resolve(&self, detected: Thresholds) -> Thresholds {
        Thresholds {
            black_threshold: self.black_threshold.unwrap_or(detected.black_threshold),
            white_threshold: self.white_threshold.unwrap_or(detected.white_threshold),
        }
    }
}

/// Encoded result of a removal pass plus the thresholds that were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    /// PNG bytes with an alpha channel.
    pub png: Vec<u8>,
    /// Thresholds actually used, whether explicit or auto-detected.
    pub thresholds: Thresholds,
}

impl RemovalOutcome {
    pub fn black_threshold(&self) -> u8 {
        self.thresholds.black_threshold
    }

    pub fn white_threshold(&self) -> u8 {
        self.thresholds.white_threshold
    }

    /// Header name/value pairs exposing the applied thresholds, for an HTTP
    /// layer to attach to the PNG response.
    pub fn threshold_headers(&self) -> [(&'static str, String); 2] {
        [
            (BLACK_THRESHOLD_HEADER, self.black_threshold().to_string()),
            (WHITE_THRESHOLD_HEADER, self.white_threshold().to_string()),
        ]
    }
}

/// Parse a threshold query value the way the game's routes do: read a
/// leading (optionally signed) integer, clamp it into `[0, 255]`, and treat
/// anything without digits as "auto-detect".
pub fn parse_threshold(raw: &str) -> Option<u8> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    if negative {
        return Some(0);
    }
    // Overlong digit runs saturate rather than fail.
    let magnitude = digits[..end].parse::<u64>().unwrap_or(u64::MAX);
    Some(magnitude.min(255) as u8)
}
