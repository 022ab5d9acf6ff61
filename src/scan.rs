//! Image file discovery.
//!
//! Recursively enumerates files under a directory root whose extension is on
//! a configured allow-list (default: jpg, png, tiff). Matching is
//! case-insensitive; order is directory-traversal order, not sorted. Nothing
//! here opens the files — a matching extension is the whole check, the codec
//! reports undecodable content later.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Default extension allow-list.
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "png", "tiff"];

/// Whether `path` names an image file, judged by its extension alone.
pub fn is_image(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}

/// Recursively list every image file under `root`.
pub fn list_image_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() && is_image(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn default_extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn lists_images_recursively() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), "x").unwrap();
        fs::write(tmp.path().join("b.png"), "x").unwrap();
        let nested = tmp.path().join("sub").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("c.tiff"), "x").unwrap();

        let files = list_image_files(tmp.path(), &default_extensions()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().any(|p| p.ends_with("sub/deeper/c.tiff")));
    }

    #[test]
    fn skips_non_image_extensions() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();
        fs::write(tmp.path().join("photo.jpg"), "x").unwrap();
        fs::write(tmp.path().join("noext"), "x").unwrap();

        let files = list_image_files(tmp.path(), &default_extensions()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("photo.jpg"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("SHOUTY.JPG"), "x").unwrap();

        let files = list_image_files(tmp.path(), &default_extensions()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn jpeg_extension_not_in_default_list() {
        // The default allow-list is exactly jpg/png/tiff; .jpeg needs config
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photo.jpeg"), "x").unwrap();

        let files = list_image_files(tmp.path(), &default_extensions()).unwrap();
        assert!(files.is_empty());

        let extended = vec!["jpeg".to_string()];
        let files = list_image_files(tmp.path(), &extended).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn directories_with_image_like_names_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("folder.png")).unwrap();

        let files = list_image_files(tmp.path(), &default_extensions()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn empty_root_yields_empty_list() {
        let tmp = TempDir::new().unwrap();
        let files = list_image_files(tmp.path(), &default_extensions()).unwrap();
        assert!(files.is_empty());
    }
}
