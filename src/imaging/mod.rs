//! Image transform engine: pure Rust on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Decode** | `ImageReader::decode` (JPEG, PNG, WebP) |
//! | **Crop / fit / stretch** | `imageops::crop_imm` + `imageops::resize` (bilinear) + `imageops::overlay` |
//! | **Encode** | `JpegEncoder`, `PngEncoder`, `WebPEncoder` (lossless) |
//!
//! The module is split into:
//! - **Calculations**: Geometry resolver, fit policies, dimension model (pure, unit testable)
//! - **Parameters**: Quality, output formats, background color
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Compositor**: pixel transfer onto a background-filled canvas
//! - **Operations**: High-level functions combining the above

pub mod backend;
mod calculations;
mod compositor;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, RasterImage};
pub use calculations::{
    AspectRatio, DimensionError, FitPolicy, GeometryError, MAX_DIMENSION, Placement, Rect,
    Region, ResizeSpec, check_dimension, derive_from_height, derive_from_width, lock_aspect,
    parse_dimension, resolve_placement, resolve_resize_target,
};
pub use compositor::{RESAMPLE_FILTER, composite, flatten, scale};
pub use operations::{
    TransformError, TransformRequest, encode_surface, plan_transform, render, stretch, transform,
};
pub use params::{Color, EncodeSpec, OutputFormat, ParamsError, Quality};
pub use rust_backend::{RustBackend, mime_for_extension, supported_input_extensions};
