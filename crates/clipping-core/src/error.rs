// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Clipping.

use thiserror::Error;

/// Top-level error type for all Clipping operations.
///
/// The border-removal stages themselves never fail on a decoded buffer; every
/// variant here comes from the codec boundary or from caller-supplied input.
#[derive(Debug, Error)]
pub enum ClippingError {
    // -- Codec errors --
    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("raw RGBA buffer has wrong length: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    // -- Caller input --
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ClippingError>;
