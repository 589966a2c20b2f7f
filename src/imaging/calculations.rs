//! Pure calculation functions for placement geometry and dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Two concerns live here:
//!
//! - **Geometry**: given a source size, a target canvas, and a [`FitPolicy`],
//!   [`resolve_placement`] decides which part of the source to sample and
//!   where on the canvas to paint it.
//! - **Dimension model**: aspect-ratio locking for plain resizes, where
//!   editing one axis recomputes the other ([`lock_aspect`],
//!   [`derive_from_width`], [`derive_from_height`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A width × height pair, used both for source images and target canvases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle anchored at an offset inside some image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The region covering all of `rect`.
    pub const fn full(rect: Rect) -> Self {
        Self::new(0, 0, rect.width, rect.height)
    }

    pub fn size(self) -> Rect {
        Rect::new(self.width, self.height)
    }

    /// Whether the region lies entirely inside `bounds`.
    pub fn fits_within(self, bounds: Rect) -> bool {
        self.x as u64 + self.width as u64 <= bounds.width as u64
            && self.y as u64 + self.height as u64 <= bounds.height as u64
    }
}

/// How a source is placed on a canvas of a different shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Cover the whole canvas with a centered square cut of the source.
    CropToFill,
    /// Show the whole source, letterboxed against the background color.
    FitWithin,
}

impl fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CropToFill => f.write_str("crop"),
            Self::FitWithin => f.write_str("fit"),
        }
    }
}

/// The resolved pair of rectangles for one transform.
///
/// `src` lies within the source image, `dst` within the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub src: Region,
    pub dst: Region,
}

impl Placement {
    /// Sample the entire source and stretch it over the entire canvas.
    ///
    /// Used by plain resizes, where the caller already chose the output shape.
    pub fn stretch(source: Rect, target: Rect) -> Self {
        Self {
            src: Region::full(source),
            dst: Region::full(target),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("source image has zero area ({0})")]
    EmptySource(Rect),
    #[error("target canvas has zero area ({0})")]
    EmptyTarget(Rect),
    #[error("region {region:?} does not fit inside {bounds}")]
    OutOfBounds { region: Region, bounds: Rect },
}

/// Compute where to sample the source and where to paint it.
///
/// - [`FitPolicy::CropToFill`]: samples the centered `m×m` square of the
///   source (`m` = shorter source side) and paints it over the full canvas.
/// - [`FitPolicy::FitWithin`]: samples the full source and paints it at the
///   largest size that keeps both axes inside the canvas, centered.
///
/// # Examples
/// ```text
/// 4000x2000 → 1280x720 fit:  dst 1280x640 at (0, 40)
/// 500x500   → 1080x1920 crop: src 500x500 at (0, 0), dst full canvas
/// ```
pub fn resolve_placement(
    source: Rect,
    target: Rect,
    policy: FitPolicy,
) -> Result<Placement, GeometryError> {
    if source.is_empty() {
        return Err(GeometryError::EmptySource(source));
    }
    if target.is_empty() {
        return Err(GeometryError::EmptyTarget(target));
    }

    let placement = match policy {
        FitPolicy::CropToFill => {
            let m = source.width.min(source.height);
            Placement {
                src: Region::new((source.width - m) / 2, (source.height - m) / 2, m, m),
                dst: Region::full(target),
            }
        }
        FitPolicy::FitWithin => {
            let (dst_w, dst_h) = calculate_fit_dimensions(source, target);
            Placement {
                src: Region::full(source),
                dst: Region::new(
                    (target.width - dst_w) / 2,
                    (target.height - dst_h) / 2,
                    dst_w,
                    dst_h,
                ),
            }
        }
    };
    Ok(placement)
}

/// Largest source-shaped size that fits inside the target on both axes.
///
/// A target relatively wider than the source is bound by its height; a
/// relatively taller (or equal) one by its width. Results are rounded and
/// kept within `1..=target` on each axis, so both rects must be non-empty;
/// [`resolve_placement`] checks that first.
fn calculate_fit_dimensions(source: Rect, target: Rect) -> (u32, u32) {
    let source_ratio = source.aspect_ratio();
    let target_ratio = target.aspect_ratio();

    let (w, h) = if target_ratio > source_ratio {
        let w = (target.height as f64 * source_ratio).round() as u32;
        (w, target.height)
    } else {
        let h = (target.width as f64 / source_ratio).round() as u32;
        (target.width, h)
    };

    (w.clamp(1, target.width), h.clamp(1, target.height))
}

// =============================================================================
// Dimension model
// =============================================================================

/// Largest output side accepted from user input. A canvas this size is
/// already 1 GiB of RGBA pixels.
pub const MAX_DIMENSION: u32 = 16_384;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("invalid dimension '{0}': must be a positive whole number")]
    InvalidDimension(String),
    #[error("dimension {0} exceeds the maximum of {MAX_DIMENSION} pixels")]
    TooLarge(u32),
    #[error("source image has zero area ({0})")]
    DegenerateSource(Rect),
}

/// Width-over-height ratio captured from an original image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio(f64);

impl AspectRatio {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Capture the aspect ratio of `original` for later axis derivation.
pub fn lock_aspect(original: Rect) -> Result<AspectRatio, DimensionError> {
    if original.is_empty() {
        return Err(DimensionError::DegenerateSource(original));
    }
    Ok(AspectRatio(original.aspect_ratio()))
}

/// Height that keeps `ratio` for the given width.
pub fn derive_from_width(width: u32, ratio: AspectRatio) -> u32 {
    (width as f64 / ratio.0).round() as u32
}

/// Width that keeps `ratio` for the given height.
pub fn derive_from_height(height: u32, ratio: AspectRatio) -> u32 {
    (height as f64 * ratio.0).round() as u32
}

/// Parse a user-entered size. Zero, negatives and non-numbers are rejected,
/// as is anything above [`MAX_DIMENSION`].
pub fn parse_dimension(input: &str) -> Result<u32, DimensionError> {
    match input.trim().parse::<u32>() {
        Ok(n) if n > 0 => check_dimension(n),
        _ => Err(DimensionError::InvalidDimension(input.to_string())),
    }
}

/// Accept a positive side length no larger than [`MAX_DIMENSION`].
pub fn check_dimension(value: u32) -> Result<u32, DimensionError> {
    match value {
        0 => Err(DimensionError::InvalidDimension(value.to_string())),
        n if n > MAX_DIMENSION => Err(DimensionError::TooLarge(n)),
        n => Ok(n),
    }
}

/// Requested output size for a plain resize.
///
/// Missing axes are filled from the original image: derived through the
/// aspect lock when `keep_aspect` is set, copied unchanged otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub keep_aspect: bool,
}

impl ResizeSpec {
    pub fn exact(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            keep_aspect: false,
        }
    }

    /// Whether the target can be resolved without looking at any image.
    pub fn is_explicit(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }

    /// Reject zero-sized or oversized axes before anything is decoded.
    pub fn validate(&self) -> Result<(), DimensionError> {
        for axis in [self.width, self.height].into_iter().flatten() {
            check_dimension(axis)?;
        }
        Ok(())
    }
}

/// Turn a [`ResizeSpec`] into a concrete output size.
///
/// `original` is the reference image the aspect lock was taken from; it may
/// be `None` only when both axes are given.
pub fn resolve_resize_target(
    spec: &ResizeSpec,
    original: Option<Rect>,
) -> Result<Rect, DimensionError> {
    spec.validate()?;

    let (width, height) = match (spec.width, spec.height) {
        (Some(w), Some(h)) => (w, h),
        (w, h) => {
            let original =
                original.ok_or_else(|| DimensionError::InvalidDimension(String::new()))?;
            let ratio = lock_aspect(original)?;
            match (w, h) {
                (Some(w), None) if spec.keep_aspect => (w, derive_from_width(w, ratio)),
                (None, Some(h)) if spec.keep_aspect => (derive_from_height(h, ratio), h),
                (w, h) => (
                    w.unwrap_or(original.width),
                    h.unwrap_or(original.height),
                ),
            }
        }
    };

    if width == 0 || height == 0 {
        return Err(DimensionError::InvalidDimension(format!(
            "{}x{}",
            width, height
        )));
    }
    // A derived or copied axis can still blow past the limit.
    check_dimension(width)?;
    check_dimension(height)?;
    Ok(Rect::new(width, height))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (1u32..=6000, 1u32..=6000).prop_map(|(w, h)| Rect::new(w, h))
    }

    proptest! {
        /// Crop always paints the full canvas from a centered min-side square.
        #[test]
        fn prop_crop_covers_canvas(source in rect_strategy(), target in rect_strategy()) {
            let p = resolve_placement(source, target, FitPolicy::CropToFill).unwrap();
            let m = source.width.min(source.height);

            prop_assert_eq!(p.dst, Region::full(target));
            prop_assert_eq!(p.src.size(), Rect::square(m));
            prop_assert_eq!(p.src.x, (source.width - m) / 2);
            prop_assert_eq!(p.src.y, (source.height - m) / 2);
            prop_assert!(p.src.fits_within(source));
        }

        /// Fit stays inside the canvas, is centered, and keeps the aspect ratio.
        #[test]
        fn prop_fit_within_bounds(source in rect_strategy(), target in rect_strategy()) {
            let p = resolve_placement(source, target, FitPolicy::FitWithin).unwrap();
            let (dw, dh) = (p.dst.width, p.dst.height);

            prop_assert_eq!(p.src, Region::full(source));
            prop_assert!(dw <= target.width && dh <= target.height);
            prop_assert!(p.dst.fits_within(target));
            prop_assert_eq!(p.dst.x, (target.width - dw) / 2);
            prop_assert_eq!(p.dst.y, (target.height - dh) / 2);
            // One axis always touches the canvas edge
            prop_assert!(dw == target.width || dh == target.height);

            let ratio = source.aspect_ratio();
            let width_err = (dw as f64 - dh as f64 * ratio).abs();
            let height_err = (dh as f64 - dw as f64 / ratio).abs();
            prop_assert!(
                width_err <= 1.0 || height_err <= 1.0,
                "aspect drift: {}x{} for source {}", dw, dh, source
            );
        }

        /// Same inputs, same placement.
        #[test]
        fn prop_placement_is_deterministic(
            source in rect_strategy(),
            target in rect_strategy(),
            crop in any::<bool>(),
        ) {
            let policy = if crop { FitPolicy::CropToFill } else { FitPolicy::FitWithin };
            prop_assert_eq!(
                resolve_placement(source, target, policy),
                resolve_placement(source, target, policy)
            );
        }

        /// Width → height → width returns within a pixel for portrait-or-square ratios.
        #[test]
        fn prop_aspect_lock_roundtrip_from_width(
            w in 1u32..=8000,
            original in (1u32..=4000, 0u32..=4000).prop_map(|(w, extra)| Rect::new(w, w + extra)),
        ) {
            let ratio = lock_aspect(original).unwrap();
            let back = derive_from_height(derive_from_width(w, ratio), ratio);
            prop_assert!((back as i64 - w as i64).abs() <= 1, "{} -> {}", w, back);
        }

        /// Height → width → height returns within a pixel for landscape-or-square ratios.
        #[test]
        fn prop_aspect_lock_roundtrip_from_height(
            h in 1u32..=8000,
            original in (1u32..=4000, 0u32..=4000).prop_map(|(h, extra)| Rect::new(h + extra, h)),
        ) {
            let ratio = lock_aspect(original).unwrap();
            let back = derive_from_width(derive_from_height(h, ratio), ratio);
            prop_assert!((back as i64 - h as i64).abs() <= 1, "{} -> {}", h, back);
        }
    }
}
