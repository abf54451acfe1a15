//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Content hashing for tile deduplication.

use std::collections::HashMap;

use xxhash_rust::xxh3::xxh3_64;

/// A content hasher: takes a raw pixel buffer, returns an integer
/// renderable as lowercase hex in a tile's filename.
///
/// Boxed as a trait object so the pyramid driver and tests can swap in a
/// different hash without a generic parameter threading through every
/// type in the crate.
pub trait Hasher: Send + Sync {
    fn hash(&self, bytes: &[u8]) -> u64;
}

/// Default hasher: `xxh3_64`, a fast non-cryptographic 64-bit hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Xxh3Hasher;

impl Hasher for Xxh3Hasher {
    fn hash(&self, bytes: &[u8]) -> u64 {
        xxh3_64(bytes)
    }
}

/// Format a hash as the lowercase hex fragment used in tile filenames.
pub fn hex(h: u64) -> String {
    format!("{h:x}")
}

/// Per-level dedup table: content hash -> relative path of the first tile
/// with that hash. Fresh at the start of every level's slice; never shared
/// across levels.
pub type SeenMap = HashMap<u64, String>;
