//! # socialsize
//!
//! Batch image transforms for the web: resize to explicit dimensions, convert
//! between JPEG, PNG and WebP, and cut the fixed-size variants that icon and
//! social-media slots demand (favicons, app icons, profile pictures, covers,
//! thumbnails).
//!
//! # Architecture: Geometry First, Pixels Last
//!
//! Every output is described by a pure geometry decision before any pixel
//! moves:
//!
//! ```text
//! 1. Resolve   source size + target size + fit policy  →  Placement
//! 2. Composite Placement + background                  →  RGBA surface
//! 3. Encode    surface + format + quality              →  EncodedFile
//! ```
//!
//! The [`batch`] encoder drives these steps over many inputs in parallel and
//! isolates failures per item: one corrupt file yields one error entry, never
//! a failed batch.
//!
//! - **Testability**: placement math and catalog lookups are pure functions,
//!   tested without decoding a single image.
//! - **Swappable pixels**: decoding and encoding sit behind
//!   [`imaging::ImageBackend`], so batch logic is tested against a mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Geometry resolver, fit policies, compositor, encode backend |
//! | [`catalog`] | Named output presets (favicon, instagram-story, ...) grouped by platform |
//! | [`batch`] | Validates a request, runs it in parallel, reports per-item results |
//! | [`scan`] | Expands command-line paths into in-memory source images |
//! | [`config`] | `socialsize.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | Output filename rules (extension swaps, preset names, sub-directories) |
//! | [`types`] | `SourceImage` and `EncodedFile`, shared by every stage |
//! | [`output`] | CLI output formatting for progress and the preset list |
//!
//! # Design Decisions
//!
//! ## Crop Squares, Letterbox Rectangles
//!
//! Square presets center-crop the largest square from the source, so an
//! avatar never shows bars. Rectangular presets fit the whole source inside
//! the target and pad with the background color, so a banner never loses
//! content. Fitting always keeps *both* axes inside the target.
//!
//! ## PNG for Presets
//!
//! Preset outputs are always PNG: icons need lossless edges and most
//! platforms re-encode uploads anyway. Explicit conversions pick their format.
//! JPEG has no alpha, so transparent pixels are flattened onto the background
//! before a JPEG encode.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, resampling and encoding all use the `image` crate. No system
//! libraries, no external binaries.

pub mod batch;
pub mod catalog;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
