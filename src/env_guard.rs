//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Scoped environment-variable override.
//!
//! The underlying image library prints warnings (e.g. ICC profile mismatches)
//! to stderr unless a process-wide env var is toggled off. We only want that
//! toggle active for the duration of a single slice operation, restored
//! afterwards no matter how the call exits.

use std::env;

/// Name of the env var the underlying image library checks to suppress
/// warnings. Kept as a single constant so both the guard and any future
/// caller agree on it.
pub const IMAGE_WARNINGS_VAR: &str = "TILE_PYRAMID_SUPPRESS_IMAGE_WARNINGS";

/// RAII guard that sets `IMAGE_WARNINGS_VAR` to `"0"` for its lifetime and
/// restores whatever value (or absence) was there before on drop.
pub struct ScopedEnvOverride {
    prior: Option<String>,
}

impl ScopedEnvOverride {
    /// Disable image-library warnings for as long as the returned guard lives.
    pub fn disable_image_warnings() -> Self {
        let prior = env::var(IMAGE_WARNINGS_VAR).ok();
        // SAFETY: scoped to a single-threaded slice driver; no other code in
        // this crate reads or writes this var concurrently.
        unsafe {
            env::set_var(IMAGE_WARNINGS_VAR, "0");
        }
        Self { prior }
    }
}

impl Drop for ScopedEnvOverride {
    fn drop(&mut self) {
        unsafe {
            match &self.prior {
                Some(value) => env::set_var(IMAGE_WARNINGS_VAR, value),
                None => env::remove_var(IMAGE_WARNINGS_VAR),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_prior_value_on_drop() {
        unsafe {
            env::set_var(IMAGE_WARNINGS_VAR, "prior");
        }
        {
            let _guard = ScopedEnvOverride::disable_image_warnings();
            assert_eq!(env::var(IMAGE_WARNINGS_VAR).unwrap(), "0");
        }
        assert_eq!(env::var(IMAGE_WARNINGS_VAR).unwrap(), "prior");
        unsafe {
            env::remove_var(IMAGE_WARNINGS_VAR);
        }
    }

    #[test]
    fn restores_absence_on_drop() {
        unsafe {
            env::remove_var(IMAGE_WARNINGS_VAR);
        }
        {
            let _guard = ScopedEnvOverride::disable_image_warnings();
            assert_eq!(env::var(IMAGE_WARNINGS_VAR).unwrap(), "0");
        }
        assert!(env::var(IMAGE_WARNINGS_VAR).is_err());
    }
}
