//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! The tile slicer: one level's aligned image in, a directory of tile
//! files and symlinks out.

use std::path::Path;

use crate::config::RenderConfig;
use crate::error::{TileError, TileResult};
use crate::hash::SeenMap;
use crate::raster::Image;
use crate::path;
use crate::pool::WorkerPool;
use crate::xy::XY;

/// A single extracted tile plus its TMS coordinates.
pub struct Tile {
    pub image: Image,
    pub tx: i64,
    pub ty: i64,
}

/// One zoom level: an image already padded to whole-tile multiples, the
/// tile size it will be cut at, and the TMS coordinates of its
/// lower-left tile.
pub struct TmsTiles {
    pub image: Image,
    pub tile_width: u32,
    pub tile_height: u32,
    pub offset: XY<i64>,
    pub resolution: Option<i32>,
}

impl TmsTiles {
    pub fn new(image: Image, tile_width: u32, tile_height: u32, offset: XY<i64>, resolution: Option<i32>) -> Self {
        Self {
            image,
            tile_width,
            tile_height,
            offset,
            resolution,
        }
    }

    /// Cut this level's image into tiles, writing each unique tile's PNG
    /// (via the worker pool) or a relative symlink to its first-seen
    /// duplicate, under `outputdir`.
    pub fn slice(&self, outputdir: &Path, config: &RenderConfig) -> TileResult<()> {
        let (w, h) = (self.image.width(), self.image.height());
        if w % self.tile_width != 0 || h % self.tile_height != 0 {
            return Err(TileError::MisalignedImage {
                width: w,
                height: h,
                tile_width: self.tile_width,
                tile_height: self.tile_height,
            });
        }

        path::ensure_output_dir(outputdir, self.resolution)?;

        let tiles_x = w / self.tile_width;
        let tiles_y = h / self.tile_height;

        let span = tracing::info_span!(
            "slice_level",
            resolution = ?self.resolution,
            tile_count = tiles_x * tiles_y,
            width = w,
            height = h,
        );
        let _enter = span.enter();

        let mut seen: SeenMap = SeenMap::new();
        let pool = WorkerPool::new(config.workers, config.queue_depth);

        for ty_idx in 0..tiles_y {
            let y = ty_idx * self.tile_height;
            for tx_idx in 0..tiles_x {
                let x = tx_idx * self.tile_width;
                let sub = self.image.extract_area(x, y, self.tile_width, self.tile_height);

                let tx = (x / self.tile_width) as i64 + self.offset.x;
                let ty = (h - y) as i64 / self.tile_height as i64 + self.offset.y - 1;
                let tile = Tile { image: sub, tx, ty };

                tracing::trace!(tx, ty, "dispatching tile");
                self.dispatch_tile(tile, outputdir, config, &mut seen, &pool)?;
            }
        }

        pool.join()
    }

    fn dispatch_tile(
        &self,
        tile: Tile,
        outputdir: &Path,
        config: &RenderConfig,
        seen: &mut SeenMap,
        pool: &WorkerPool,
    ) -> TileResult<()> {
        let hash = config.hasher.hash(tile.image.to_raw_bytes());
        let relpath = path::relative_path(self.resolution, tile.tx, tile.ty, hash);

        if let Some(target_relpath) = seen.get(&hash) {
            path::create_relative_symlink(outputdir, &relpath, target_relpath)?;
        } else {
            seen.insert(hash, relpath.clone());
            pool.submit(tile.image, outputdir.join(&relpath));
        }

        Ok(())
    }
}
