//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Tile filename policy, symlink target resolution, directory creation.

use std::path::{Path, PathBuf};

use crate::error::{TileError, TileResult};

/// Filename for a tile at TMS coordinates `(tx, ty)` with content hash
/// `hash`, not including a resolution prefix.
pub fn tile_filename(tx: i64, ty: i64, hash: u64) -> String {
    format!("{tx}-{ty}-{hash:x}.png", hash = hash)
}

/// Path of a tile relative to the output directory: `{resolution}/{name}`
/// when `resolution` is set, otherwise just `{name}`.
pub fn relative_path(resolution: Option<i32>, tx: i64, ty: i64, hash: u64) -> String {
    let name = tile_filename(tx, ty, hash);
    match resolution {
        Some(r) => format!("{r}/{name}"),
        None => name,
    }
}

/// Create `outputdir` (and its `{resolution}/` subdirectory, if any),
/// tolerating pre-existing directories.
pub fn ensure_output_dir(outputdir: &Path, resolution: Option<i32>) -> TileResult<()> {
    let dir = match resolution {
        Some(r) => outputdir.join(r.to_string()),
        None => outputdir.to_path_buf(),
    };
    std::fs::create_dir_all(&dir).map_err(|source| TileError::IoFailure {
        path: dir.display().to_string(),
        source,
    })
}

/// Relative path from `link_relpath`'s directory to `target_relpath`,
/// both expressed relative to the same `outputdir`. When both share a
/// directory (the common case: same resolution level, or both bare), this
/// is just the target's file name; otherwise it climbs out of the link's
/// directory and back down to the target.
pub fn relative_symlink_target(link_relpath: &str, target_relpath: &str) -> PathBuf {
    let link_dir = Path::new(link_relpath).parent().unwrap_or_else(|| Path::new(""));
    let target = Path::new(target_relpath);
    let target_dir = target.parent().unwrap_or_else(|| Path::new(""));

    if link_dir == target_dir {
        return PathBuf::from(target.file_name().expect("target_relpath has a file name"));
    }

    let link_dir_depth = link_dir.components().count();
    let mut out = PathBuf::new();
    for _ in 0..link_dir_depth {
        out.push("..");
    }
    out.push(target);
    out
}

/// Create a relative symlink at `outputdir/link_relpath` pointing at
/// `outputdir/target_relpath`.
pub fn create_relative_symlink(outputdir: &Path, link_relpath: &str, target_relpath: &str) -> TileResult<()> {
    let link_path = outputdir.join(link_relpath);
    let target = relative_symlink_target(link_relpath, target_relpath);

    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(&target, &link_path);
    #[cfg(windows)]
    let result = std::os::windows::fs::symlink_file(&target, &link_path);

    match result {
        Ok(()) => Ok(()),
        Err(source) if source.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(TileError::IoFailure {
            path: link_path.display().to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_matches_policy() {
        assert_eq!(tile_filename(3, 7, 0xabc), "3-7-abc.png");
    }

    #[test]
    fn relative_path_adds_resolution_prefix() {
        assert_eq!(relative_path(Some(4), 1, 2, 0xff), "4/1-2-ff.png");
        assert_eq!(relative_path(None, 1, 2, 0xff), "1-2-ff.png");
    }

    #[test]
    fn symlink_target_same_directory_is_bare_filename() {
        let target = relative_symlink_target("0-0-a.png", "0-1-a.png");
        assert_eq!(target, PathBuf::from("0-1-a.png"));
    }

    #[test]
    fn symlink_target_within_same_resolution_dir_is_bare_filename() {
        let target = relative_symlink_target("4/0-0-a.png", "4/0-1-a.png");
        assert_eq!(target, PathBuf::from("0-1-a.png"));
    }

    #[test]
    fn symlink_target_across_different_resolution_dirs_climbs_out() {
        let target = relative_symlink_target("4/0-0-a.png", "3/0-1-a.png");
        assert_eq!(target, PathBuf::from("../3/0-1-a.png"));
    }

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        ensure_output_dir(dir.path(), Some(2)).unwrap();
        ensure_output_dir(dir.path(), Some(2)).unwrap();
        assert!(dir.path().join("2").is_dir());
    }

    #[test]
    fn symlink_round_trips_to_real_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0-0-a.png"), b"data").unwrap();
        create_relative_symlink(dir.path(), "0-1-a.png", "0-0-a.png").unwrap();
        let resolved = std::fs::read(dir.path().join("0-1-a.png")).unwrap();
        assert_eq!(resolved, b"data");
        let meta = std::fs::symlink_metadata(dir.path().join("0-1-a.png")).unwrap();
        assert!(meta.file_type().is_symlink());
    }
}
