// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// clipping-scan — Border removal for archival newspaper scans.
//
// Decodes a scan, calibrates black/white border thresholds from its outermost
// pixel ring, erases border-coloured pixels reachable from the edge (bounded
// by a depth guard), prunes opaque fragments detached from the main page body,
// and re-encodes the result as a transparent PNG.

pub mod borders;
pub mod codec;

// Re-export the primary entry points so callers can use
// `clipping_scan::remove_borders` etc.
pub use borders::detect::detect_thresholds;
pub use borders::fill::fill_edges;
pub use borders::prune::{main_body_seed, remove_detached_fragments};
pub use borders::{
    BorderRemover, detect_border_thresholds, remove_black_borders, remove_borders,
    remove_borders_rgba, remove_white_borders,
};
