//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

/// A generic x,y pair.
///
/// Used both as fractional TMS offsets (`XY<f64>`) during level transitions
/// and as integer tile coordinates (`XY<i64>`) once a level has been
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XY<T> {
    pub x: T,
    pub y: T,
}

impl<T> XY<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl XY<f64> {
    /// Integer-floors both components, used when an offset computed during a
    /// level transition becomes the new level's fixed tile offset.
    pub fn floor_to_i64(self) -> XY<i64> {
        XY::new(self.x.floor() as i64, self.y.floor() as i64)
    }
}
