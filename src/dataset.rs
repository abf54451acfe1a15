//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! External collaborator interface: the georeferenced dataset reader.
//!
//! The real reader (GDAL-backed) lives outside this crate. This trait is
//! the seam it plugs into, so tests can substitute a synthetic dataset
//! without a GDAL dependency.

use crate::error::TileResult;
use crate::raster::Image;
use crate::xy::XY;

/// A source raster plus the TMS placement metadata needed to seed the
/// native-resolution level.
///
/// The concrete implementation (GDAL-backed) lives outside this crate;
/// `image_pyramid` only ever talks to this trait.
pub trait DatasetReader {
    /// Load the full-resolution raster.
    fn load_image(&self) -> TileResult<Image>;

    /// TMS tile coordinates of the lower-left and upper-right corners of
    /// this dataset at its native resolution.
    fn tms_extents(&self) -> (XY<f64>, XY<f64>);

    /// The zoom level this dataset's pixels were captured at.
    fn native_resolution(&self) -> i32;
}
