//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use thiserror::Error;

/// Errors raised while computing or rendering a TMS tile pyramid.
#[derive(Error, Debug)]
pub enum TileError {
    /// `stretch` was called with a factor below 1.0, `shrink` with a factor
    /// outside `(0, 1]`, or either was called on an image with `W < 2` or
    /// `H < 2`.
    #[error("invalid scale factor: {0}")]
    InvalidScale(String),

    /// An image's dimensions are not whole-tile multiples.
    #[error("image {width}x{height} is not a whole multiple of tile size {tile_width}x{tile_height}")]
    MisalignedImage {
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
    },

    /// A requested resolution violates the pyramid's zoom-range ordering.
    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    /// A worker failed to encode a tile to PNG.
    #[error("failed to encode tile {path}")]
    EncodeFailure {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// An input image failed to load or decode.
    #[error("failed to load image {path}")]
    DecodeFailure {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// Directory or symlink creation failed.
    #[error("I/O failure at {path}")]
    IoFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias used throughout this crate.
pub type TileResult<T> = Result<T, TileError>;
