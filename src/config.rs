//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Render configuration: the knobs of the core that are not hard-coded
//! constants. Flag/env parsing is the excluded CLI front-end's job; this
//! is the plain struct it would build and pass in.

use std::sync::Arc;

use crate::error::{TileError, TileResult};
use crate::hash::{Hasher, Xxh3Hasher};

/// Tile size and pipeline knobs shared by every level of a render.
#[derive(Clone)]
pub struct RenderConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    pub workers: usize,
    pub queue_depth: usize,
    pub hasher: Arc<dyn Hasher>,
}

impl RenderConfig {
    pub fn validate(&self) -> TileResult<()> {
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(TileError::InvalidResolution(format!(
                "tile size must be non-zero, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if self.workers == 0 {
            return Err(TileError::InvalidResolution("worker count must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let workers = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        Self {
            tile_width: 256,
            tile_height: 256,
            workers,
            queue_depth: workers * 2,
            hasher: Arc::new(Xxh3Hasher),
        }
    }
}
