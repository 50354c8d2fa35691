// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Codec boundary — encoded bytes to RGBA8 pixels and back to PNG, using the
// `image` crate. The border stages never see encoded data.

use clipping_core::error::{ClippingError, Result};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, instrument};

/// Decode any supported image format (JPEG, PNG, TIFF, ...) into RGBA8.
///
/// Images without an alpha channel gain a fully opaque one.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_rgba(data: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(data)
        .map_err(|err| ClippingError::Decode(format!("failed to decode image: {}", err)))?;
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Image decoded from bytes"
    );
    Ok(img.into_rgba8())
}

/// Wrap an already-decoded row-major RGBA8 buffer.
pub fn rgba_from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<RgbaImage> {
    let expected = width as usize * height as usize * 4;
    let actual = data.len();
    RgbaImage::from_raw(width, height, data)
        .filter(|_| actual == expected)
        .ok_or(ClippingError::InvalidBuffer { expected, actual })
}

/// Encode an RGBA8 buffer as PNG bytes, alpha channel included.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| ClippingError::Encode(format!("image encoding failed: {}", err)))?;
    debug!(png_bytes = buffer.len(), "PNG encoded");
    Ok(buffer)
}
