//! Pure Rust codec backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, WebP) | `ImageReader::decode`, content-sniffed first, declared MIME second |
//! | Encode → JPEG | `JpegEncoder::new_with_quality` (alpha dropped, callers flatten first) |
//! | Encode → PNG | `PngEncoder` (lossless, quality ignored) |
//! | Encode → WebP | `WebPEncoder::new_lossless` (the `image` crate has no lossy WebP encoder) |

use super::backend::{BackendError, ImageBackend, RasterImage};
use super::calculations::Rect;
use super::params::{EncodeSpec, OutputFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::sync::LazyLock;

/// Extensions we hand to the engine, with the MIME type they are declared as.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// MIME type for a decodable file extension, `None` for anything else.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    if !supported_input_extensions().contains(&ext.as_str()) {
        return None;
    }
    INPUT_CANDIDATES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, fmt)| fmt.to_mime_type())
}

/// Codec backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a reader that trusts the bytes over the declared type.
fn reader_for<'a>(
    bytes: &'a [u8],
    mime: Option<&str>,
) -> Result<ImageReader<Cursor<&'a [u8]>>, BackendError> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    if reader.format().is_none() {
        if let Some(format) = mime.and_then(|m| ImageFormat::from_mime_type(m)) {
            reader.set_format(format);
        }
    }
    Ok(reader)
}

fn encode_failed(format: OutputFormat, err: image::ImageError) -> BackendError {
    BackendError::Encode(format!("{} encode failed: {}", format, err))
}

impl ImageBackend for RustBackend {
    fn identify(&self, bytes: &[u8]) -> Result<Rect, BackendError> {
        let (width, height) = reader_for(bytes, None)?
            .into_dimensions()
            .map_err(|e| BackendError::Decode(format!("Failed to read dimensions: {}", e)))?;
        Ok(Rect::new(width, height))
    }

    fn decode(&self, bytes: &[u8], mime: &str) -> Result<RasterImage, BackendError> {
        let image = reader_for(bytes, Some(mime))?
            .decode()
            .map_err(|e| BackendError::Decode(format!("Failed to decode {}: {}", mime, e)))?;
        Ok(RasterImage::from_dynamic(image)?)
    }

    fn encode(&self, surface: &RgbaImage, spec: &EncodeSpec) -> Result<Vec<u8>, BackendError> {
        let (width, height) = surface.dimensions();
        let mut buf = Vec::new();

        match spec.format {
            OutputFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(surface.clone()).into_rgb8();
                JpegEncoder::new_with_quality(&mut buf, spec.quality.percent())
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
                    .map_err(|e| encode_failed(spec.format, e))?;
            }
            OutputFormat::Png => {
                PngEncoder::new(&mut buf)
                    .write_image(surface.as_raw(), width, height, ExtendedColorType::Rgba8)
                    .map_err(|e| encode_failed(spec.format, e))?;
            }
            OutputFormat::Webp => {
                WebPEncoder::new_lossless(&mut buf)
                    .write_image(surface.as_raw(), width, height, ExtendedColorType::Rgba8)
                    .map_err(|e| encode_failed(spec.format, e))?;
            }
        }

        Ok(buf)
    }
}
