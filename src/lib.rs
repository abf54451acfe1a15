//! Geometry engine, tile slicer, and dedupe-aware render pipeline for TMS
//! tile pyramids.
//!
//! ## Flat slice
//!
//! ```no_run
//! use tile_pyramid::{image_slice, Image, RenderConfig, XY};
//!
//! # fn main() -> tile_pyramid::TileResult<()> {
//! let image = Image::open("input.png")?;
//! let config = RenderConfig::default();
//! image_slice(image, std::path::Path::new("out"), XY::new(0, 0), &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Pyramid
//!
//! A full pyramid additionally needs a [`DatasetReader`] supplying the
//! native resolution and TMS extents:
//!
//! ```no_run
//! use tile_pyramid::{image_pyramid, DatasetReader, RenderConfig};
//!
//! # fn run(dataset: &dyn DatasetReader) -> tile_pyramid::TileResult<()> {
//! let config = RenderConfig::default();
//! image_pyramid(dataset, std::path::Path::new("out"), Some(0), Some(4), &config)?;
//! # Ok(())
//! # }
//! ```

mod config;
mod dataset;
mod env_guard;
mod error;
mod geometry;
mod hash;
mod raster;
mod path;
mod pool;
mod pyramid;
mod tile;
mod xy;

pub use config::RenderConfig;
pub use dataset::DatasetReader;
pub use env_guard::ScopedEnvOverride;
pub use error::{TileError, TileResult};
pub use geometry::{shrink, stretch, tms_align};
pub use hash::{hex, Hasher, SeenMap, Xxh3Hasher};
pub use raster::Image;
pub use pool::WorkerPool;
pub use pyramid::{image_pyramid, image_slice};
pub use tile::{Tile, TmsTiles};
pub use xy::XY;
