//! Input acquisition: turns command-line paths into [`SourceImage`]s.
//!
//! ## Rules
//!
//! - **Files** are taken as given, if their extension is a decodable image type.
//! - **Directories** are walked recursively; hidden entries (`.name`) are skipped
//!   and files are visited in sorted order, so batches are reproducible.
//! - **Everything else** (text files, unsupported image types) is filtered out
//!   here. The batch encoder only ever sees inputs that claim to be images.
//! - A path reached twice (listed directly and via its directory) is loaded once.
//!
//! The declared MIME type comes from the extension; decoding still sniffs the
//! actual bytes, so a mislabeled file is handled by content.

use crate::imaging::mime_for_extension;
use crate::types::SourceImage;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input not found: {0}")]
    NotFound(PathBuf),
    #[error("Not a supported image file: {0}")]
    NotAnImage(PathBuf),
    #[error("No image files found in the given inputs")]
    NoImages,
}

/// A loaded input together with where it came from.
#[derive(Debug, Clone)]
pub struct ScannedInput {
    pub path: PathBuf,
    pub image: SourceImage,
}

/// Declared MIME type for a path, `None` if it is not a decodable image.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    mime_for_extension(ext)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Expand inputs into the image files they name, in order, without duplicates.
pub fn collect_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let walker = WalkDir::new(input)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()));
            for entry in walker {
                let entry = entry?;
                if entry.file_type().is_file() {
                    push_if_image(entry.path(), &mut seen, &mut paths);
                }
            }
        } else if input.is_file() {
            push_if_image(input, &mut seen, &mut paths);
        } else {
            return Err(ScanError::NotFound(input.clone()));
        }
    }

    Ok(paths)
}

fn push_if_image(path: &Path, seen: &mut HashSet<PathBuf>, paths: &mut Vec<PathBuf>) {
    if mime_for_path(path).is_none() {
        debug!(path = %path.display(), "skipping non-image input");
        return;
    }
    let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if seen.insert(key) {
        paths.push(path.to_path_buf());
    }
}

/// Read one image file into memory.
pub fn load(path: &Path) -> Result<SourceImage, ScanError> {
    let mime = mime_for_path(path).ok_or_else(|| ScanError::NotAnImage(path.to_path_buf()))?;
    let bytes = fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    Ok(SourceImage::new(filename, mime, bytes))
}

/// Collect and load every image the inputs name. Fails if there are none.
pub fn scan(inputs: &[PathBuf]) -> Result<Vec<ScannedInput>, ScanError> {
    let paths = collect_paths(inputs)?;
    if paths.is_empty() {
        return Err(ScanError::NoImages);
    }
    paths
        .into_iter()
        .map(|path| {
            let image = load(&path)?;
            Ok(ScannedInput { path, image })
        })
        .collect()
}
