//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Affine rescaling and TMS-grid padding.
//!
//! `stretch` and `shrink` are deliberately not inverses of each other: each
//! encodes the alignment convention correct for its direction (pixel-center
//! for enlargement, pixel-corner for reduction). A combined `resize` would
//! hide that choice, so none is provided.

use crate::error::{TileError, TileResult};
use crate::raster::{Image, TRANSPARENT};

/// Upsample by `xscale`/`yscale`, both `>= 1.0`, using pixel-center
/// alignment: the centers of the four input corner pixels map exactly to
/// the centers of the four output corner pixels.
pub fn stretch(img: &Image, xscale: f64, yscale: f64) -> TileResult<Image> {
    if xscale < 1.0 || yscale < 1.0 {
        return Err(TileError::InvalidScale(format!(
            "stretch requires scale >= 1.0, got ({xscale}, {yscale})"
        )));
    }
    let (w, h) = (img.width(), img.height());
    if w < 2 || h < 2 {
        return Err(TileError::InvalidScale(format!(
            "stretch requires W >= 2 && H >= 2, got {w}x{h}"
        )));
    }

    let n = (w as f64 * xscale).floor() as u32;
    let m = (h as f64 * yscale).floor() as u32;

    let a = (n as f64 - 1.0) / (w as f64 - 1.0);
    let d = (m as f64 - 1.0) / (h as f64 - 1.0);

    Ok(img.affine(a, 0.0, 0.0, d, 0.0, 0.0, 0, 0, n, m))
}

/// Downsample by `xscale`/`yscale`, both in `(0.0, 1.0]`, using
/// pixel-corner alignment: the outer corners of the input map to the outer
/// corners of the output.
pub fn shrink(img: &Image, xscale: f64, yscale: f64) -> TileResult<Image> {
    if !(0.0 < xscale && xscale <= 1.0) || !(0.0 < yscale && yscale <= 1.0) {
        return Err(TileError::InvalidScale(format!(
            "shrink requires scale in (0, 1], got ({xscale}, {yscale})"
        )));
    }
    let (w, h) = (img.width(), img.height());
    if w < 2 || h < 2 {
        return Err(TileError::InvalidScale(format!(
            "shrink requires W >= 2 && H >= 2, got {w}x{h}"
        )));
    }

    let n = (w as f64 * xscale).floor() as u32;
    let m = (h as f64 * yscale).floor() as u32;

    let offset_x = (xscale - 1.0) / 2.0;
    let offset_y = (yscale - 1.0) / 2.0;

    Ok(img.affine(xscale, 0.0, 0.0, yscale, offset_x, offset_y, 0, 0, n, m))
}

/// The x/y pad amount and resulting whole-tile dimensions `tms_align` would
/// produce, without performing the embed. Exposed separately so callers
/// (and tests) can assert on the padding math directly.
pub struct Alignment {
    pub x: u32,
    pub y: u32,
    pub out_w: u32,
    pub out_h: u32,
}

fn compute_alignment(width: u32, height: u32, tile_width: u32, tile_height: u32, offset_x: f64, offset_y: f64) -> Alignment {
    let x = (offset_x * tile_width as f64).round() as i64;
    let x = x.rem_euclid(tile_width as i64) as u32;

    let y = (height as i64) - (offset_y * tile_height as f64).round() as i64;
    let y = y.rem_euclid(tile_height as i64) as u32;

    // Reproduced verbatim from the original implementation: only half of
    // the pre-pad offset is folded into the ceiling here.
    let tiles_x = ((width as f64 + x as f64 / 2.0) / tile_width as f64).ceil() as u32;
    let tiles_y = ((height as f64 + y as f64 / 2.0) / tile_height as f64).ceil() as u32;

    Alignment {
        x,
        y,
        out_w: tiles_x * tile_width,
        out_h: tiles_y * tile_height,
    }
}

/// Pad `img` on the right and bottom to whole-tile multiples, positioning
/// the original content so the TMS grid aligns with the level's fractional
/// `offset`.
///
/// Returns the input unchanged (no copy) when it is already aligned.
pub fn tms_align(img: &Image, tile_width: u32, tile_height: u32, offset_x: f64, offset_y: f64) -> Image {
    let align = compute_alignment(img.width(), img.height(), tile_width, tile_height, offset_x, offset_y);

    if align.out_w == img.width() && align.out_h == img.height() {
        debug_assert!(
            align.x == 0 && align.y == 0,
            "already-aligned image must have zero pad offset"
        );
        return img.clone();
    }

    img.embed(TRANSPARENT, align.x, align.y, align.out_w, align.out_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> Image {
        Image::filled(w, h, crate::raster::TRANSPARENT)
    }

    #[test]
    fn stretch_rejects_sub_unity_scale() {
        let img = solid(4, 4);
        assert!(stretch(&img, 0.5, 1.0).is_err());
    }

    #[test]
    fn stretch_rejects_tiny_images() {
        let img = solid(1, 4);
        assert!(stretch(&img, 2.0, 2.0).is_err());
    }

    #[test]
    fn stretch_yields_floor_of_scaled_dims() {
        let img = solid(4, 4);
        let out = stretch(&img, 2.0, 2.0).unwrap();
        assert_eq!(out.width(), 8);
        assert_eq!(out.height(), 8);
    }

    #[test]
    fn shrink_rejects_above_unity_scale() {
        let img = solid(4, 4);
        assert!(shrink(&img, 1.5, 1.0).is_err());
    }

    #[test]
    fn shrink_yields_floor_of_scaled_dims() {
        let img = solid(5, 5);
        let out = shrink(&img, 0.5, 0.5).unwrap();
        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 2);
    }

    #[test]
    fn tms_align_is_identity_when_already_aligned() {
        let img = solid(256, 256);
        let out = tms_align(&img, 256, 256, 0.0, 0.0);
        assert_eq!(out.width(), 256);
        assert_eq!(out.height(), 256);
    }

    #[test]
    fn tms_align_pads_to_whole_tile_multiples() {
        let img = solid(300, 300);
        let out = tms_align(&img, 256, 256, 0.0, 0.0);
        assert_eq!(out.width() % 256, 0);
        assert_eq!(out.height() % 256, 0);
        assert!(out.width() >= 300);
        assert!(out.height() >= 300);
    }
}
