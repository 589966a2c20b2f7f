//! Output filename conventions.
//!
//! Every output name is derived from either the input filename or a preset's
//! filename template:
//! - Resize keeps the input name unchanged: `photo.jpg` → `photo.jpg`
//! - Convert swaps the extension: `photo.png` → `photo.webp`
//! - Presets use their template plus `.png`: `favicon_32x32.png`
//!
//! Only the *last* dot counts as the extension separator, so
//! `archive.tar.png` → `archive.tar.webp`. A name without a dot gets the
//! extension appended.
//!
//! Inputs from different directories can share a name. [`UniqueNames`]
//! hands out `name-2.ext`, `name-3.ext`, ... for repeats so no output
//! replaces another.

use crate::imaging::OutputFormat;
use std::collections::HashSet;

/// Split at the last dot. `None` when there is no dot.
fn split_extension(filename: &str) -> Option<(&str, &str)> {
    filename.rfind('.').map(|pos| (&filename[..pos], &filename[pos + 1..]))
}

/// Filename without its final extension.
///
/// - `"photo.jpg"` → `"photo"`
/// - `"archive.tar.png"` → `"archive.tar"`
/// - `"README"` → `"README"`
pub fn file_stem(filename: &str) -> &str {
    split_extension(filename).map_or(filename, |(stem, _)| stem)
}

/// Final extension without the dot, if any.
pub fn file_extension(filename: &str) -> Option<&str> {
    split_extension(filename).map(|(_, ext)| ext)
}

/// Replace everything after the last dot with `extension`.
pub fn change_extension(filename: &str, extension: &str) -> String {
    match split_extension(filename) {
        Some((stem, _)) => format!("{stem}.{extension}"),
        None => format!("{filename}.{extension}"),
    }
}

/// Name for a resized file. The input name is kept unless the declared type
/// cannot be encoded and the output falls back to PNG.
pub fn resized_name(filename: &str, mime: &str) -> String {
    match OutputFormat::from_mime(mime) {
        Some(_) => filename.to_string(),
        None => change_extension(filename, OutputFormat::Png.extension()),
    }
}

/// Name for a converted file.
pub fn converted_name(filename: &str, format: OutputFormat) -> String {
    change_extension(filename, format.extension())
}

/// Name for one preset variant, given its rendered template stem.
pub fn preset_name(stem: &str) -> String {
    format!("{stem}.{}", OutputFormat::Png.extension())
}

/// Directory-safe version of a filename stem, used when several inputs share
/// one preset run and each needs its own sub-directory.
pub fn directory_name(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `name` with `-{n}` added before its extension.
fn with_suffix(name: &str, n: usize) -> String {
    match split_extension(name) {
        Some((stem, ext)) => format!("{stem}-{n}.{ext}"),
        None => format!("{name}-{n}"),
    }
}

/// Names already handed out within one output directory.
///
/// Compared case-insensitively, since the same run may land on a
/// case-insensitive filesystem.
#[derive(Debug, Default)]
pub struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// `name` if it is still free, otherwise the first free `-{n}` variant.
    pub fn claim(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_lowercase()) {
            return name.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = with_suffix(name, n);
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }
}
