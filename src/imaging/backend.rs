//! Codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the boundary between the transform engine
//! and the pixel codecs. Every backend supports three operations: identify
//! (cheap header read), decode, and encode. The engine never touches
//! compressed bytes itself.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::calculations::{DimensionError, Rect};
use super::params::EncodeSpec;
use image::{DynamicImage, Rgba, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// Decoded pixels of one source image.
///
/// Always non-empty: construction rejects zero-area images with
/// [`DimensionError::DegenerateSource`]. The engine only ever reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Result<Self, DimensionError> {
        let size = Rect::new(pixels.width(), pixels.height());
        if size.is_empty() {
            return Err(DimensionError::DegenerateSource(size));
        }
        Ok(Self { pixels })
    }

    pub fn from_dynamic(image: DynamicImage) -> Result<Self, DimensionError> {
        Self::new(image.into_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Rect {
        Rect::new(self.width(), self.height())
    }

    /// Pixel at `(x, y)`. Panics when out of bounds, like `image` does.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.pixels.get_pixel(x, y)
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Trait for codec backends.
///
/// `Sync` so one backend can serve every rayon worker of a batch.
pub trait ImageBackend: Sync {
    /// Read image dimensions from the header without a full decode.
    fn identify(&self, bytes: &[u8]) -> Result<Rect, BackendError>;

    /// Decode compressed bytes. `mime` is the type the caller declared.
    fn decode(&self, bytes: &[u8], mime: &str) -> Result<RasterImage, BackendError>;

    /// Encode a composited surface.
    fn encode(&self, surface: &RgbaImage, spec: &EncodeSpec) -> Result<Vec<u8>, BackendError>;
}
