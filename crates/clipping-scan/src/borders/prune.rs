// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pass 2 — fragment pruning. Keeps the 4-connected opaque region around the
// image centre and erases every opaque pixel outside it.

use image::RgbaImage;
use tracing::{debug, warn};

/// Erase every opaque pixel that is not 4-connected to the main body.
/// Returns the number of pixels pruned.
///
/// The main body is seeded at the opaque pixel closest to the geometric
/// centre. Pass 1 only erodes inward from the edges, so dust, emulsion specks
/// and slivers cut off by the border fill survive it; they are removed here by
/// connectivity, not distance. An image with no opaque pixel left is a no-op.
///
/// Note that an image made of two large disconnected regions keeps only the
/// one holding the seed.
pub fn remove_detached_fragments(image: &mut RgbaImage) -> usize {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);
    let pixels: &mut [u8] = &mut **image;

    let Some(seed) = find_seed(pixels, w, h) else {
        warn!(width, height, "No opaque pixels left; nothing to prune");
        return 0;
    };

    let main_body = main_body_mask(pixels, w, h, seed);

    let mut pruned = 0usize;
    for (idx, px) in pixels.chunks_exact_mut(4).enumerate() {
        if px[3] > 0 && !main_body[idx] {
            px[3] = 0;
            pruned += 1;
        }
    }

    debug!(
        seed_x = seed % w,
        seed_y = seed / w,
        pruned,
        "Detached fragments removed"
    );
    pruned
}

/// Coordinates of the opaque pixel closest to the image centre, if any.
/// Ties go to the first pixel in row-major order.
pub fn main_body_seed(image: &RgbaImage) -> Option<(u32, u32)> {
    let w = image.width() as usize;
    find_seed(image.as_raw(), w, image.height() as usize)
        .map(|idx| ((idx % w) as u32, (idx / w) as u32))
}

fn find_seed(pixels: &[u8], width: usize, height: usize) -> Option<usize> {
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;

    let mut best: Option<(usize, f64)> = None;
    for (idx, px) in pixels.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        let dx = (idx % width) as f64 - cx;
        let dy = (idx / width) as f64 - cy;
        let dist = dx * dx + dy * dy;
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((idx, dist)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Depth-first walk over opaque 4-neighbours starting at `seed`.
fn main_body_mask(pixels: &[u8], width: usize, height: usize, seed: usize) -> Vec<bool> {
    let mut mask = vec![false; width * height];
    mask[seed] = true;
    let mut stack = vec![seed];

    while let Some(idx) = stack.pop() {
        let x = idx % width;
        let y = idx / width;

        let neighbours = [
            (y > 0).then(|| idx - width),
            (y < height - 1).then(|| idx + width),
            (x > 0).then(|| idx - 1),
            (x < width - 1).then(|| idx + 1),
        ];
        for n in neighbours.into_iter().flatten() {
            if !mask[n] && pixels[n * 4 + 3] > 0 {
                mask[n] = true;
                stack.push(n);
            }
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const INK: Rgba<u8> = Rgba([40, 35, 30, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn opaque_count(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p.0[3] > 0).count()
    }

    #[test]
    fn isolated_speck_is_removed() {
        let mut img = RgbaImage::from_pixel(20, 20, CLEAR);
        for y in 6..14 {
            for x in 6..14 {
                img.put_pixel(x, y, INK);
            }
        }
        img.put_pixel(1, 1, INK);
        img.put_pixel(18, 2, INK);

        assert_eq!(remove_detached_fragments(&mut img), 2);
        assert_eq!(img.get_pixel(1, 1).0, [40, 35, 30, 0]);
        assert_eq!(opaque_count(&img), 64);
    }

    #[test]
    fn diagonal_neighbour_is_not_connected() {
        let mut img = RgbaImage::from_pixel(9, 9, CLEAR);
        img.put_pixel(4, 4, INK);
        img.put_pixel(5, 5, INK);

        remove_detached_fragments(&mut img);
        assert_eq!(img.get_pixel(4, 4).0[3], 255);
        assert_eq!(img.get_pixel(5, 5).0[3], 0);
    }

    #[test]
    fn fully_transparent_image_is_a_no_op() {
        let mut img = RgbaImage::from_pixel(7, 5, CLEAR);
        assert_eq!(remove_detached_fragments(&mut img), 0);
        assert_eq!(main_body_seed(&img), None);

        let mut empty = RgbaImage::new(0, 0);
        assert_eq!(remove_detached_fragments(&mut empty), 0);
    }

    #[test]
    fn seed_is_closest_opaque_pixel_to_centre() {
        let mut img = RgbaImage::from_pixel(10, 10, CLEAR);
        img.put_pixel(0, 0, INK);
        img.put_pixel(7, 5, INK);
        img.put_pixel(5, 8, INK);
        assert_eq!(main_body_seed(&img), Some((7, 5)));
    }

    #[test]
    fn partial_alpha_counts_as_opaque() {
        let mut img = RgbaImage::from_pixel(5, 5, Rgba([90, 90, 90, 128]));
        assert_eq!(remove_detached_fragments(&mut img), 0);
        assert!(img.pixels().all(|p| p.0[3] == 128));
    }

    #[test]
    fn two_column_scan_keeps_only_the_column_nearest_centre() {
        // A crease erased down x = 9 splits the page just left of centre.
        // The seed lands in the right-hand column, so the left column is lost
        // even though it is genuine content.
        let mut img = RgbaImage::from_pixel(20, 10, INK);
        for y in 0..10 {
            img.put_pixel(9, y, CLEAR);
        }

        assert_eq!(remove_detached_fragments(&mut img), 90);
        assert!((0..10).all(|y| img.get_pixel(0, y).0[3] == 0));
        assert!((0..10).all(|y| img.get_pixel(10, y).0[3] == 255));
    }
}
