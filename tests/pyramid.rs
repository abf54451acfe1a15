use image::Rgba;
use tile_pyramid::{image_pyramid, DatasetReader, Image, RenderConfig, TileResult, XY};

struct SyntheticDataset {
    image: Image,
    lower_left: XY<f64>,
    upper_right: XY<f64>,
    native_resolution: i32,
}

impl DatasetReader for SyntheticDataset {
    fn load_image(&self) -> TileResult<Image> {
        Ok(self.image.clone())
    }

    fn tms_extents(&self) -> (XY<f64>, XY<f64>) {
        (self.lower_left, self.upper_right)
    }

    fn native_resolution(&self) -> i32 {
        self.native_resolution
    }
}

fn count_entries(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn flat_transparent_image_dedupes_to_one_file_and_rest_symlinks() {
    let dir = tempfile::tempdir().unwrap();
    let image = Image::filled(1024, 1024, Rgba([0, 0, 0, 0]));
    let config = RenderConfig::default();

    tile_pyramid::image_slice(image, dir.path(), XY::new(0, 0), &config).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 16);

    let mut files = 0;
    let mut symlinks = 0;
    for entry in entries {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        assert!(name.ends_with(".png"));
        let meta = std::fs::symlink_metadata(entry.path()).unwrap();
        if meta.file_type().is_symlink() {
            symlinks += 1;
            let resolved = std::fs::canonicalize(entry.path()).unwrap();
            assert!(resolved.starts_with(std::fs::canonicalize(dir.path()).unwrap()));
        } else {
            files += 1;
        }
    }
    assert_eq!(files, 1);
    assert_eq!(symlinks, 15);
}

#[test]
fn pyramid_descends_and_ascends_with_expected_tile_counts() {
    let dir = tempfile::tempdir().unwrap();
    // Native level 2 produces 4x4 tiles (1024 / 256); descending to 1
    // halves linear size, ascending to 3 doubles it.
    let dataset = SyntheticDataset {
        image: Image::filled(1024, 1024, Rgba([5, 6, 7, 255])),
        lower_left: XY::new(0.0, 0.0),
        upper_right: XY::new(4.0, 4.0),
        native_resolution: 2,
    };
    let config = RenderConfig::default();

    image_pyramid(&dataset, dir.path(), Some(1), Some(3), &config).unwrap();

    assert!(count_entries(&dir.path().join("1")) > 0);
    assert!(count_entries(&dir.path().join("2")) > 0);
    assert!(count_entries(&dir.path().join("3")) > 0);
}

#[test]
fn pyramid_fails_fast_before_writing_any_tile() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = SyntheticDataset {
        image: Image::filled(256, 256, Rgba([0, 0, 0, 0])),
        lower_left: XY::new(0.0, 0.0),
        upper_right: XY::new(1.0, 1.0),
        native_resolution: 2,
    };
    let config = RenderConfig::default();

    let result = image_pyramid(&dataset, dir.path(), Some(3), None, &config);
    assert!(result.is_err());
    assert!(!dir.path().exists() || count_entries(dir.path()) == 0);
}
