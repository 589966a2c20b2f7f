//! High-level image operations.
//!
//! These functions combine calculations with the compositor and the codec
//! backend. They never touch the filesystem: bytes in, bytes out.

use super::backend::{BackendError, ImageBackend, RasterImage};
use super::calculations::{FitPolicy, GeometryError, Placement, Rect, resolve_placement};
use super::compositor::{composite, flatten, scale};
use super::params::{Color, EncodeSpec, OutputFormat};
use image::RgbaImage;
use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Everything needed to produce one output surface.
#[derive(Debug, Clone, Copy)]
pub struct TransformRequest<'a> {
    pub source: &'a RasterImage,
    pub target: Rect,
    pub policy: FitPolicy,
    pub background: Color,
}

/// Plan a transform without touching pixels.
pub fn plan_transform(request: &TransformRequest) -> Result<Placement, GeometryError> {
    resolve_placement(request.source.size(), request.target, request.policy)
}

/// Produce a target-sized surface according to the request's fit policy.
pub fn transform(request: &TransformRequest) -> Result<RgbaImage, GeometryError> {
    let placement = plan_transform(request)?;
    composite(request.source, request.target, &placement, request.background)
}

/// Plain resize: the whole source stretched onto the whole target.
///
/// Transparency survives; [`encode_surface`] flattens it only for formats
/// without alpha.
pub fn stretch(source: &RasterImage, target: Rect) -> Result<RgbaImage, GeometryError> {
    scale(source, target)
}

/// The surface the encoder should see: formats without alpha get the
/// background blended in first.
pub fn prepare_for_encode(
    surface: &RgbaImage,
    format: OutputFormat,
    background: Color,
) -> Cow<'_, RgbaImage> {
    if format.supports_alpha() {
        Cow::Borrowed(surface)
    } else {
        Cow::Owned(flatten(surface, background))
    }
}

/// Encode a surface, flattening it first when the format needs that.
pub fn encode_surface(
    backend: &impl ImageBackend,
    surface: &RgbaImage,
    spec: &EncodeSpec,
    background: Color,
) -> Result<Vec<u8>, BackendError> {
    let prepared = prepare_for_encode(surface, spec.format, background);
    backend.encode(&prepared, spec)
}

/// Transform and encode in one go.
pub fn render(
    backend: &impl ImageBackend,
    request: &TransformRequest,
    spec: &EncodeSpec,
) -> Result<Vec<u8>, TransformError> {
    let surface = transform(request)?;
    Ok(encode_surface(backend, &surface, spec, request.background)?)
}
