//! Pixel transfer from a source image onto a freshly allocated canvas.
//!
//! The canvas is always exactly the target size and starts out filled with
//! an opaque background, so letterbox borders never end up transparent.
//! [`scale`] is the exception: a plain resize has no borders, so it keeps
//! the source's alpha and leaves flattening to the encoder.
//! The source is only ever borrowed.

use super::backend::RasterImage;
use super::calculations::{GeometryError, Placement, Rect};
use super::params::Color;
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// The one resampling filter every transform uses (bilinear).
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Paint `placement.src` of `source` into `placement.dst` of a new canvas.
pub fn composite(
    source: &RasterImage,
    target: Rect,
    placement: &Placement,
    background: Color,
) -> Result<RgbaImage, GeometryError> {
    if target.is_empty() {
        return Err(GeometryError::EmptyTarget(target));
    }
    if !placement.src.fits_within(source.size()) {
        return Err(GeometryError::OutOfBounds {
            region: placement.src,
            bounds: source.size(),
        });
    }
    if !placement.dst.fits_within(target) {
        return Err(GeometryError::OutOfBounds {
            region: placement.dst,
            bounds: target,
        });
    }

    let mut canvas = RgbaImage::from_pixel(target.width, target.height, background.to_rgba());
    if placement.src.size().is_empty() || placement.dst.size().is_empty() {
        return Ok(canvas);
    }

    let src = placement.src;
    let sample =
        imageops::crop_imm(source.as_rgba(), src.x, src.y, src.width, src.height).to_image();
    let dst = placement.dst;
    let scaled = if src.size() == dst.size() {
        sample
    } else {
        imageops::resize(&sample, dst.width, dst.height, RESAMPLE_FILTER)
    };

    imageops::overlay(&mut canvas, &scaled, dst.x as i64, dst.y as i64);
    Ok(canvas)
}

/// Scale the whole source onto the whole target, alpha intact.
pub fn scale(source: &RasterImage, target: Rect) -> Result<RgbaImage, GeometryError> {
    if target.is_empty() {
        return Err(GeometryError::EmptyTarget(target));
    }
    if source.size() == target {
        return Ok(source.as_rgba().clone());
    }
    Ok(imageops::resize(
        source.as_rgba(),
        target.width,
        target.height,
        RESAMPLE_FILTER,
    ))
}

/// Blend any transparency onto an opaque background.
pub fn flatten(surface: &RgbaImage, background: Color) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(surface.width(), surface.height(), background.to_rgba());
    imageops::overlay(&mut canvas, surface, 0, 0);
    canvas
}
