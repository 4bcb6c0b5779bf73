use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::Context as _;

use crate::error::{StillreelError, StillreelResult};

/// File extensions (lowercased) accepted as slideshow images.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp",
];

/// List the image files directly inside `dir`, ordered by modification time
/// ascending (ties broken by path so the order is deterministic).
///
/// The returned order is the pool order consumed by the sequence builder;
/// callers must not re-sort it. An existing directory with no images yields
/// an empty pool, a missing directory is `NotFound`.
pub fn discover_images(dir: &Path) -> StillreelResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(StillreelError::not_found(format!(
            "image directory '{}' does not exist",
            dir.display()
        )));
    }

    let mut found: Vec<(SystemTime, PathBuf)> = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read image directory '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !has_image_extension(&path) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .with_context(|| format!("read modification time of '{}'", path.display()))?;
        found.push((modified, path));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "stillreel_{name}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn filters_by_extension_case_insensitively() {
        let tmp = temp_dir("discover_filter");
        std::fs::create_dir_all(&tmp).unwrap();
        for name in ["a.png", "b.JPG", "c.jpeg", "d.txt", "e.mp3", "f"] {
            std::fs::write(tmp.join(name), b"x").unwrap();
        }
        std::fs::create_dir_all(tmp.join("nested.png")).unwrap();

        let images = discover_images(&tmp).unwrap();
        let mut names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.jpeg"]);

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn orders_by_modification_time_ascending() {
        let tmp = temp_dir("discover_order");
        std::fs::create_dir_all(&tmp).unwrap();
        for name in ["z.png", "m.png", "a.png"] {
            std::fs::write(tmp.join(name), b"x").unwrap();
        }

        let images = discover_images(&tmp).unwrap();
        assert_eq!(images.len(), 3);

        let mut expected: Vec<(std::time::SystemTime, PathBuf)> = images
            .iter()
            .map(|p| (std::fs::metadata(p).unwrap().modified().unwrap(), p.clone()))
            .collect();
        expected.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        let expected: Vec<PathBuf> = expected.into_iter().map(|(_, p)| p).collect();
        assert_eq!(images, expected);

        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn empty_directory_yields_empty_pool() {
        let tmp = temp_dir("discover_empty");
        std::fs::create_dir_all(&tmp).unwrap();
        assert!(discover_images(&tmp).unwrap().is_empty());
        std::fs::remove_dir_all(&tmp).ok();
    }

    #[test]
    fn missing_directory_is_not_found() {
        let tmp = temp_dir("discover_missing");
        assert!(matches!(
            discover_images(&tmp),
            Err(StillreelError::NotFound(_))
        ));
    }
}
