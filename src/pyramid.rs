//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! The pyramid driver: native-level slice, then descending downsamples,
//! then ascending upsamples, each level fully written before the next
//! begins.

use std::path::Path;

use crate::config::RenderConfig;
use crate::dataset::DatasetReader;
use crate::env_guard::ScopedEnvOverride;
use crate::error::{TileError, TileResult};
use crate::geometry::{shrink, stretch, tms_align};
use crate::tile::TmsTiles;
use crate::xy::XY;

/// Slice a single image at a single resolution, no pyramid levels above
/// or below it.
pub fn image_slice(image: crate::raster::Image, outputdir: &Path, offset: XY<i64>, config: &RenderConfig) -> TileResult<()> {
    config.validate()?;
    let _guard = ScopedEnvOverride::disable_image_warnings();

    let level = TmsTiles::new(image, config.tile_width, config.tile_height, offset, None);
    level.slice(outputdir, config)
}

/// Render a full pyramid: the dataset's native level, optionally
/// descending to `min_resolution` and/or ascending to `max_resolution`.
pub fn image_pyramid(
    dataset: &dyn DatasetReader,
    outputdir: &Path,
    min_resolution: Option<i32>,
    max_resolution: Option<i32>,
    config: &RenderConfig,
) -> TileResult<()> {
    config.validate()?;

    let native_resolution = dataset.native_resolution();
    if let Some(min_r) = min_resolution {
        if min_r > native_resolution {
            return Err(TileError::InvalidResolution(format!(
                "min_resolution {min_r} is above native resolution {native_resolution}"
            )));
        }
    }
    if let Some(max_r) = max_resolution {
        if max_r < native_resolution {
            return Err(TileError::InvalidResolution(format!(
                "max_resolution {max_r} is below native resolution {native_resolution}"
            )));
        }
    }
    if let (Some(min_r), Some(max_r)) = (min_resolution, max_resolution) {
        if min_r > max_r {
            return Err(TileError::InvalidResolution(format!(
                "min_resolution {min_r} is above max_resolution {max_r}"
            )));
        }
    }

    let _guard = ScopedEnvOverride::disable_image_warnings();

    let (lower_left, _upper_right) = dataset.tms_extents();
    let image = dataset.load_image()?;

    tracing::info!(resolution = native_resolution, "slicing native level");
    let native_offset = lower_left.floor_to_i64();
    let current = TmsTiles::new(image, config.tile_width, config.tile_height, native_offset, Some(native_resolution));
    current.slice(outputdir, config)?;

    if let Some(min_r) = min_resolution {
        let mut resolution = native_resolution;
        let mut level_offset = XY::new(native_offset.x as f64, native_offset.y as f64);
        let mut level_image = current.image.clone();
        while resolution > min_r {
            let target_r = resolution - 1;
            tracing::info!(resolution = target_r, "downsampling level");
            let (next_image, next_offset) = downsample(&level_image, level_offset, config)?;
            let floored_offset = next_offset.floor_to_i64();
            let next_tiles = TmsTiles::new(next_image.clone(), config.tile_width, config.tile_height, floored_offset, Some(target_r));
            next_tiles.slice(outputdir, config)?;
            level_image = next_image;
            level_offset = XY::new(floored_offset.x as f64, floored_offset.y as f64);
            resolution = target_r;
        }
    }

    if let Some(max_r) = max_resolution {
        let mut resolution = native_resolution;
        let mut level_offset = XY::new(native_offset.x as f64, native_offset.y as f64);
        let mut level_image = current.image.clone();
        while resolution < max_r {
            let target_r = resolution + 1;
            tracing::info!(resolution = target_r, "upsampling level");
            let (next_image, next_offset) = upsample(&level_image, level_offset, resolution, target_r, config)?;
            let floored_offset = next_offset.floor_to_i64();
            let next_tiles = TmsTiles::new(next_image.clone(), config.tile_width, config.tile_height, floored_offset, Some(target_r));
            next_tiles.slice(outputdir, config)?;
            level_image = next_image;
            level_offset = XY::new(floored_offset.x as f64, floored_offset.y as f64);
            resolution = target_r;
        }
    }

    Ok(())
}

/// Produce the next level down: halve the offset, shrink the image by
/// 0.5, then re-align to whole-tile multiples at the new fractional
/// offset.
fn downsample(image: &crate::raster::Image, offset: XY<f64>, config: &RenderConfig) -> TileResult<(crate::raster::Image, XY<f64>)> {
    let new_offset = XY::new(offset.x / 2.0, offset.y / 2.0);
    let shrunk = shrink(image, 0.5, 0.5)?;
    let aligned = tms_align(&shrunk, config.tile_width, config.tile_height, new_offset.x, new_offset.y);
    Ok((aligned, new_offset))
}

/// Produce the next level up: scale the offset and stretch the image by
/// `2^(target_r - current_r)`, performed on the whole image to avoid
/// seams at tile boundaries, then re-align.
fn upsample(
    image: &crate::raster::Image,
    offset: XY<f64>,
    current_r: i32,
    target_r: i32,
    config: &RenderConfig,
) -> TileResult<(crate::raster::Image, XY<f64>)> {
    debug_assert_eq!(target_r, current_r + 1, "upsample walks one level at a time");
    let scale = 2f64.powi(target_r - current_r);
    let new_offset = XY::new(offset.x * scale, offset.y * scale);
    let stretched = stretch(image, scale, scale)?;
    let aligned = tms_align(&stretched, config.tile_width, config.tile_height, new_offset.x, new_offset.y);
    Ok((aligned, new_offset))
}
