//! Parameter types for image operations.
//!
//! These types describe *what* to produce, not *how*. They sit between the
//! high-level [`operations`](super::operations) (which decide the target
//! surface) and the [`backend`](super::backend) (which does the codec work).
//!
//! ## Types
//!
//! - [`Quality`]: abstract encode quality in `[0, 1]`. Clamped on construction.
//! - [`OutputFormat`]: JPEG, PNG or WEBP, with MIME and extension mapping.
//! - [`EncodeSpec`]: format + quality handed to the encoder.
//! - [`Color`]: opaque RGB background used for letterboxing and alpha flattening.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Encode quality as a unit interval (0.0 = smallest file, 1.0 = best).
///
/// PNG ignores it (lossless). JPEG maps it onto the 1–100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Build from a 0–100 percentage, the unit users type.
    pub fn from_percent(percent: u32) -> Self {
        Self::new(percent as f32 / 100.0)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// The 1–100 scale codecs such as JPEG expect.
    pub fn percent(self) -> u8 {
        ((self.0 * 100.0).round() as u8).clamp(1, 100)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.9)
    }
}

/// Output container formats the engine can ask the encoder for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::Webp];

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }

    /// File extension, also the lowercase name users pick formats by.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    /// Whether the encoded file can carry an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }

    /// Exact match on an encodable MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Format to re-encode a source of the given MIME type with.
    ///
    /// Types we cannot encode fall back to PNG, like a canvas does.
    pub fn for_mime(mime: &str) -> Self {
        Self::from_mime(mime).unwrap_or(Self::Png)
    }

    /// Resolve a user-supplied format name. Unknown names map to JPEG.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or(Self::Jpeg)
    }
}

impl FromStr for OutputFormat {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            other => Err(ParamsError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// What the encoder should produce for one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeSpec {
    pub format: OutputFormat,
    pub quality: Quality,
}

impl EncodeSpec {
    pub fn new(format: OutputFormat, quality: Quality) -> Self {
        Self { format, quality }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("unknown output format '{0}' (expected jpeg, png or webp)")]
    UnknownFormat(String),
    #[error("invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),
}

/// Opaque RGB color.
///
/// Serialized as a `#rrggbb` string so it reads naturally in `socialsize.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParamsError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ParamsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_unit_interval() {
        assert_eq!(Quality::new(-0.5).value(), 0.0);
        assert_eq!(Quality::new(0.5).value(), 0.5);
        assert_eq!(Quality::new(3.0).value(), 1.0);
    }

    #[test]
    fn quality_nan_falls_back_to_default() {
        assert_eq!(Quality::new(f32::NAN), Quality::default());
    }

    #[test]
    fn quality_default_is_point_nine() {
        assert_eq!(Quality::default().value(), 0.9);
        assert_eq!(Quality::default().percent(), 90);
    }

    #[test]
    fn quality_percent_never_zero() {
        assert_eq!(Quality::new(0.0).percent(), 1);
        assert_eq!(Quality::from_percent(75).percent(), 75);
        assert_eq!(Quality::from_percent(250).percent(), 100);
    }

    #[test]
    fn format_from_mime() {
        assert_eq!(OutputFormat::for_mime("image/jpeg"), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::for_mime("IMAGE/WEBP"), OutputFormat::Webp);
        assert_eq!(OutputFormat::for_mime("image/png"), OutputFormat::Png);
        // Formats we cannot write come back as PNG
        assert_eq!(OutputFormat::for_mime("image/gif"), OutputFormat::Png);
        assert_eq!(OutputFormat::for_mime("image/bmp"), OutputFormat::Png);
    }

    #[test]
    fn format_parse_names() {
        assert_eq!("jpg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert_eq!(" PNG ".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert!(matches!(
            "tiff".parse::<OutputFormat>(),
            Err(ParamsError::UnknownFormat(_))
        ));
    }

    #[test]
    fn format_lossy_defaults_to_jpeg() {
        assert_eq!(OutputFormat::from_name_lossy("bogus"), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from_name_lossy("webp"), OutputFormat::Webp);
    }

    #[test]
    fn only_jpeg_lacks_alpha() {
        assert!(!OutputFormat::Jpeg.supports_alpha());
        assert!(OutputFormat::Png.supports_alpha());
        assert!(OutputFormat::Webp.supports_alpha());
    }

    #[test]
    fn color_parses_long_and_short_hex() {
        assert_eq!("#ffffff".parse::<Color>(), Ok(Color::WHITE));
        assert_eq!("#1a2B3c".parse::<Color>(), Ok(Color::rgb(0x1a, 0x2b, 0x3c)));
        assert_eq!("#f00".parse::<Color>(), Ok(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn color_rejects_garbage() {
        for bad in ["ffffff", "#ffff", "#gggggg", "", "#"] {
            assert!(bad.parse::<Color>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn color_display_roundtrips() {
        let c = Color::rgb(10, 200, 255);
        assert_eq!(c.to_string(), "#0ac8ff");
        assert_eq!(c.to_string().parse::<Color>(), Ok(c));
    }

    #[test]
    fn color_rgba_is_opaque() {
        assert_eq!(Color::BLACK.to_rgba(), image::Rgba([0, 0, 0, 255]));
    }
}
