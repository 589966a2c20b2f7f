//! Shared test utilities for the socialsize test suite.
//!
//! Two kinds of fixtures:
//! - **Mock inputs** whose bytes are `b"WxH"` payloads understood by
//!   [`MockBackend`](crate::imaging::backend::tests::MockBackend). A payload
//!   that does not parse (e.g. `"corrupt"`) stages a decode failure.
//! - **Real encoded images** built in memory with the `image` crate, for
//!   tests that go through [`RustBackend`](crate::imaging::RustBackend).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let images = mock_images(&["640x480", "corrupt"]);
//! let png = encoded_image(OutputFormat::Png, 64, 48);
//! ```

use crate::batch::BatchResult;
use crate::imaging::{EncodeSpec, ImageBackend, OutputFormat, Quality, RustBackend};
use crate::types::SourceImage;
use image::{Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Mock inputs
// =========================================================================

/// A PNG-declared input named `{payload}.png` carrying `payload` as bytes.
pub fn mock_image(payload: &str) -> SourceImage {
    SourceImage::new(
        format!("{payload}.png"),
        "image/png",
        payload.as_bytes().to_vec(),
    )
}

pub fn mock_images(payloads: &[&str]) -> Vec<SourceImage> {
    payloads.iter().map(|p| mock_image(p)).collect()
}

// =========================================================================
// Real pixels
// =========================================================================

/// Deterministic high-entropy pixels, so lossy encoders cannot cheat.
pub fn noisy_surface(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let v = x.wrapping_mul(2_654_435_761).wrapping_add(y.wrapping_mul(40_503));
        Rgba([(v >> 3) as u8, (v >> 11) as u8, (v >> 19) as u8, 255])
    })
}

/// A real encoded image of the given size and format.
pub fn encoded_image(format: OutputFormat, width: u32, height: u32) -> Vec<u8> {
    RustBackend::new()
        .encode(
            &noisy_surface(width, height),
            &EncodeSpec::new(format, Quality::default()),
        )
        .unwrap()
}

/// Write a real encoded image to `dir/name`.
pub fn write_image(dir: &Path, name: &str, format: OutputFormat, width: u32, height: u32) {
    std::fs::write(dir.join(name), encoded_image(format, width, height)).unwrap();
}

// =========================================================================
// Result lookups
// =========================================================================

/// Output file names of a successful result. Panics on failure.
pub fn output_names(result: &BatchResult) -> Vec<&str> {
    match &result.outcome {
        Ok(files) => files.iter().map(|f| f.filename.as_str()).collect(),
        Err(e) => panic!("item {} ({}) failed: {e}", result.index, result.source),
    }
}
