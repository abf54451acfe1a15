//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Thin façade over the `image` crate.
//!
//! Nothing outside this module touches `image::RgbaImage` directly, so the
//! rest of the crate sees a stable, spec-shaped API (`extract_area`,
//! `affine`, `embed`, `to_raw_bytes`, `encode_png`) regardless of which
//! underlying image library backs it.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{TileError, TileResult};

/// A fully transparent RGBA background, used to pad images to tile
/// boundaries.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An RGBA raster image.
///
/// Always 4 channels, 8-bit unsigned samples, matching the data model in
/// §3 of the specification this crate implements.
#[derive(Debug, Clone)]
pub struct Image {
    buf: RgbaImage,
}

impl Image {
    /// Wrap an already-decoded `image` crate buffer.
    pub fn from_rgba(buf: RgbaImage) -> Self {
        Self { buf }
    }

    /// Load an image from a file, converting to RGBA8 regardless of the
    /// source format's channel layout.
    pub fn open(path: impl AsRef<Path>) -> TileResult<Self> {
        let path = path.as_ref();
        let dynamic = image::open(path).map_err(|source| TileError::DecodeFailure {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            buf: dynamic.to_rgba8(),
        })
    }

    /// Create a new image filled with `background`.
    pub fn filled(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            buf: ImageBuffer::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    /// Non-overlapping windowed copy of this image.
    pub fn extract_area(&self, left: u32, top: u32, width: u32, height: u32) -> Image {
        let mut out = ImageBuffer::from_pixel(width, height, TRANSPARENT);
        for y in 0..height {
            for x in 0..width {
                let pixel = *self.buf.get_pixel(left + x, top + y);
                out.put_pixel(x, y, pixel);
            }
        }
        Image { buf: out }
    }

    /// Apply the affine transform `[[a, b], [c, d]]` plus offset `(ox, oy)`
    /// to map input coordinates to output coordinates, nearest-neighbor
    /// sampled, writing into an `out_w x out_h` canvas translated by
    /// `(out_x, out_y)`.
    ///
    /// This mirrors the underlying image library's `affine` primitive
    /// exactly: the matrix here is always diagonal (`b == c == 0`) for the
    /// `stretch`/`shrink` callers in `geometry.rs`, so sampling reduces to
    /// independent per-axis nearest-neighbor lookup.
    #[allow(clippy::too_many_arguments)]
    pub fn affine(
        &self,
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        ox: f64,
        oy: f64,
        out_x: i64,
        out_y: i64,
        out_w: u32,
        out_h: u32,
    ) -> Image {
        // Forward transform is X = a*x + b*y + ox, Y = c*x + d*y + oy.
        // For the diagonal matrices used here, the inverse is just
        // per-axis division: x = (X - ox) / a, y = (Y - oy) / d.
        let mut out = ImageBuffer::from_pixel(out_w, out_h, TRANSPARENT);
        let (in_w, in_h) = (self.buf.width() as i64, self.buf.height() as i64);
        for oy_px in 0..out_h {
            for ox_px in 0..out_w {
                let dst_x = (ox_px as i64 + out_x) as f64;
                let dst_y = (oy_px as i64 + out_y) as f64;
                let src_x = inverse_axis(dst_x, b, a, ox);
                let src_y = inverse_axis(dst_y, c, d, oy);
                let sx = src_x.round() as i64;
                let sy = src_y.round() as i64;
                if sx >= 0 && sx < in_w && sy >= 0 && sy < in_h {
                    let pixel = *self.buf.get_pixel(sx as u32, sy as u32);
                    out.put_pixel(ox_px, oy_px, pixel);
                }
            }
        }
        Image { buf: out }
    }

    /// Place this image at offset `(x, y)` inside a new `w x h` canvas
    /// filled with `background`.
    pub fn embed(&self, background: Rgba<u8>, x: u32, y: u32, w: u32, h: u32) -> Image {
        let mut out = ImageBuffer::from_pixel(w, h, background);
        image::imageops::overlay(&mut out, &self.buf, x as i64, y as i64);
        Image { buf: out }
    }

    /// Raw RGBA8 pixel buffer, row-major, used as the hash input for
    /// deduplication.
    pub fn to_raw_bytes(&self) -> &[u8] {
        self.buf.as_raw()
    }

    /// Encode this image as PNG to `path`, creating parent directories is
    /// the caller's responsibility (see `path::ensure_dir`).
    pub fn encode_png(&self, path: impl AsRef<Path>) -> TileResult<()> {
        let path = path.as_ref();
        self.buf
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|source| TileError::EncodeFailure {
                path: path.display().to_string(),
                source,
            })
    }
}

/// Solve `dst = m1 * cross + m2 * main + offset` for `main`, assuming the
/// off-axis coefficient `m1` is zero (true for every diagonal affine matrix
/// this crate constructs).
fn inverse_axis(dst: f64, cross_coeff: f64, main_coeff: f64, offset: f64) -> f64 {
    debug_assert_eq!(cross_coeff, 0.0, "affine matrices here are always diagonal");
    (dst - offset) / main_coeff
}
