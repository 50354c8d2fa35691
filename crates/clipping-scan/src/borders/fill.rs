// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pass 1 — edge flood fill. Erases border-coloured pixels reachable from the
// image edge, never travelling deeper than the depth guard.

use image::RgbaImage;
use tracing::debug;

use super::edge_pixels;

/// Flood-fill inward from every edge pixel through pixels satisfying
/// `is_border`, setting each one fully transparent. Returns the number of
/// pixels erased.
///
/// The fill is hard-stopped at `max_depth` pixels from the nearest edge
/// (`min(x, y, w-1-x, h-1-y)`): a pixel deeper than that is never erased and
/// never propagates the fill, whatever its colour. A thin rule of black ink
/// touching a black film edge therefore cannot eat into the page.
///
/// Neighbours are 4-connected and the traversal uses an explicit stack, so
/// multi-thousand-pixel scans cannot overflow the call stack. Only alpha is
/// written.
pub fn fill_edges<F>(image: &mut RgbaImage, max_depth: u32, is_border: F) -> usize
where
    F: Fn(u8, u8, u8) -> bool,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return 0;
    }

    let mut fill = EdgeFill {
        width: width as usize,
        height: height as usize,
        max_depth: max_depth as usize,
        visited: vec![false; width as usize * height as usize],
        stack: Vec::new(),
    };
    let pixels: &mut [u8] = &mut **image;

    for (x, y) in edge_pixels(width, height) {
        fill.examine(pixels, y as usize * fill.width + x as usize, &is_border);
    }
    let seeds = fill.stack.len();

    let mut erased = 0usize;
    while let Some(idx) = fill.stack.pop() {
        pixels[idx * 4 + 3] = 0;
        erased += 1;

        let x = idx % fill.width;
        let y = idx / fill.width;
        if y > 0 {
            fill.examine(pixels, idx - fill.width, &is_border);
        }
        if y < fill.height - 1 {
            fill.examine(pixels, idx + fill.width, &is_border);
        }
        if x > 0 {
            fill.examine(pixels, idx - 1, &is_border);
        }
        if x < fill.width - 1 {
            fill.examine(pixels, idx + 1, &is_border);
        }
    }

    debug!(seeds, erased, max_depth, "Edge fill complete");
    erased
}

/// Scratch state for a single fill pass.
struct EdgeFill {
    width: usize,
    height: usize,
    max_depth: usize,
    visited: Vec<bool>,
    stack: Vec<usize>,
}

impl EdgeFill {
    /// Examine each pixel at most once; queue it when it is within the depth
    /// guard and border-coloured.
    fn examine<F>(&mut self, pixels: &[u8], idx: usize, is_border: &F)
    where
        F: Fn(u8, u8, u8) -> bool,
    {
        if self.visited[idx] {
            return;
        }
        self.visited[idx] = true;

        let x = idx % self.width;
        let y = idx / self.width;
        let depth = x.min(y).min(self.width - 1 - x).min(self.height - 1 - y);
        if depth > self.max_depth {
            return;
        }

        let off = idx * 4;
        if is_border(pixels[off], pixels[off + 1], pixels[off + 2]) {
            self.stack.push(idx);
        }
    }
}
