//! Social-media and icon preset catalog.
//!
//! Every preset is a row in one static table, indexed by [`PresetId`], so a
//! preset's sizes, fit policy, and output filename can never drift apart.
//! The table is read-only for the life of the process.
//!
//! ## Fit policy by shape
//!
//! Square assets (icons, profile pictures, square posts) use
//! [`FitPolicy::CropToFill`]: a centered square cut of the source fills the
//! whole canvas. Everything else (banners, covers, stories) uses
//! [`FitPolicy::FitWithin`] and letterboxes the full source.
//!
//! ## Output names
//!
//! Most presets have a fixed name (`apple-touch-icon`, `twitter_header_image`).
//! Multi-size families and ad-hoc sizes embed the size instead
//! (`favicon_32x32`, `custom_100x100`). Unknown preset ids fall back to a
//! 256×256 letterboxed canvas named `image_256x256`.

use crate::imaging::{DimensionError, FitPolicy, Rect, check_dimension};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Canvas used when a preset id is not in the catalog.
pub const FALLBACK_SIZE: Rect = Rect::square(256);

/// Key of the ad-hoc square preset whose size the user supplies.
pub const CUSTOM_KEY: &str = "custom";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

/// Platform a preset belongs to, used to group the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Website,
    YouTube,
    Twitter,
    Facebook,
    Instagram,
    LinkedIn,
    Discord,
    Twitch,
    TikTok,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Website => "Website icons",
            Self::YouTube => "YouTube",
            Self::Twitter => "Twitter/X",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
            Self::LinkedIn => "LinkedIn",
            Self::Discord => "Discord",
            Self::Twitch => "Twitch",
            Self::TikTok => "TikTok",
        })
    }
}

/// How a preset names its output files (without extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameTemplate {
    /// The same stem regardless of size.
    Fixed(&'static str),
    /// `{prefix}_{w}x{h}`.
    PerSize(&'static str),
}

impl FilenameTemplate {
    pub fn render(self, size: Rect) -> String {
        match self {
            Self::Fixed(stem) => stem.to_string(),
            Self::PerSize(prefix) => format!("{}_{}x{}", prefix, size.width, size.height),
        }
    }
}

/// Identifier of every catalog preset. The discriminant indexes [`PRESETS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetId {
    Favicon,
    Apple,
    Android,
    YoutubeProfile,
    YoutubeChannel,
    YoutubeThumbnail,
    YoutubeCommunity,
    TwitterProfile,
    TwitterHeader,
    FacebookProfile,
    FacebookCover,
    FacebookPost,
    InstagramProfile,
    InstagramStory,
    InstagramPost,
    InstagramReels,
    LinkedinProfile,
    LinkedinCover,
    LinkedinPost,
    DiscordServer,
    DiscordBanner,
    TwitchProfile,
    TwitchBanner,
    TwitchOffline,
    TiktokProfile,
}

/// A named target: canvas sizes, fit policy, and filename convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: PresetId,
    pub key: &'static str,
    pub label: &'static str,
    pub platform: Platform,
    pub sizes: &'static [Rect],
    pub policy: FitPolicy,
    pub filename: FilenameTemplate,
}

const fn square(
    id: PresetId,
    key: &'static str,
    label: &'static str,
    platform: Platform,
    sizes: &'static [Rect],
    filename: FilenameTemplate,
) -> Preset {
    Preset {
        id,
        key,
        label,
        platform,
        sizes,
        policy: FitPolicy::CropToFill,
        filename,
    }
}

const fn framed(
    id: PresetId,
    key: &'static str,
    label: &'static str,
    platform: Platform,
    size: &'static [Rect],
    stem: &'static str,
) -> Preset {
    Preset {
        id,
        key,
        label,
        platform,
        sizes: size,
        policy: FitPolicy::FitWithin,
        filename: FilenameTemplate::Fixed(stem),
    }
}

use FilenameTemplate::{Fixed, PerSize};
use Platform::*;

/// The catalog, in [`PresetId`] order.
#[rustfmt::skip]
pub static PRESETS: [Preset; 25] = [
    square(PresetId::Favicon, "favicon", "Favicon", Website,
        &[Rect::square(16), Rect::square(32), Rect::square(48)], PerSize("favicon")),
    square(PresetId::Apple, "apple", "Apple touch icon", Website,
        &[Rect::square(180)], Fixed("apple-touch-icon")),
    square(PresetId::Android, "android", "Android icon", Website,
        &[Rect::square(192)], Fixed("android-icon")),
    square(PresetId::YoutubeProfile, "youtube-profile", "Profile image", YouTube,
        &[Rect::square(800)], Fixed("youtube_profile_image")),
    framed(PresetId::YoutubeChannel, "youtube-channel", "Channel art", YouTube,
        &[Rect::new(2560, 1440)], "youtube_channel_art"),
    framed(PresetId::YoutubeThumbnail, "youtube-thumbnail", "Video thumbnail", YouTube,
        &[Rect::new(1280, 720)], "youtube_thumbnail"),
    framed(PresetId::YoutubeCommunity, "youtube-community", "Community post", YouTube,
        &[Rect::new(1200, 675)], "youtube_community_post"),
    square(PresetId::TwitterProfile, "twitter-profile", "Profile image", Twitter,
        &[Rect::square(400)], Fixed("twitter_profile_image")),
    framed(PresetId::TwitterHeader, "twitter-header", "Header image", Twitter,
        &[Rect::new(1500, 500)], "twitter_header_image"),
    square(PresetId::FacebookProfile, "facebook-profile", "Profile picture", Facebook,
        &[Rect::square(170)], Fixed("facebook_profile_picture")),
    framed(PresetId::FacebookCover, "facebook-cover", "Cover photo", Facebook,
        &[Rect::new(820, 312)], "facebook_cover_photo"),
    framed(PresetId::FacebookPost, "facebook-post", "Post image", Facebook,
        &[Rect::new(1200, 630)], "facebook_post_image"),
    square(PresetId::InstagramProfile, "instagram-profile", "Profile picture", Instagram,
        &[Rect::square(320)], Fixed("instagram_profile_picture")),
    framed(PresetId::InstagramStory, "instagram-story", "Story", Instagram,
        &[Rect::new(1080, 1920)], "instagram_story"),
    square(PresetId::InstagramPost, "instagram-post", "Square post", Instagram,
        &[Rect::square(1080)], Fixed("instagram_post")),
    framed(PresetId::InstagramReels, "instagram-reels", "Reels cover", Instagram,
        &[Rect::new(1080, 1920)], "instagram_reels"),
    square(PresetId::LinkedinProfile, "linkedin-profile", "Profile photo", LinkedIn,
        &[Rect::square(400)], Fixed("linkedin_profile_photo")),
    framed(PresetId::LinkedinCover, "linkedin-cover", "Cover photo", LinkedIn,
        &[Rect::new(1584, 396)], "linkedin_cover_photo"),
    framed(PresetId::LinkedinPost, "linkedin-post", "Post image", LinkedIn,
        &[Rect::new(1200, 627)], "linkedin_post_image"),
    square(PresetId::DiscordServer, "discord-server", "Server icon", Discord,
        &[Rect::square(512)], Fixed("discord_server_icon")),
    framed(PresetId::DiscordBanner, "discord-banner", "Server banner", Discord,
        &[Rect::new(960, 540)], "discord_server_banner"),
    square(PresetId::TwitchProfile, "twitch-profile", "Profile image", Twitch,
        &[Rect::square(256)], Fixed("twitch_profile_image")),
    framed(PresetId::TwitchBanner, "twitch-banner", "Profile banner", Twitch,
        &[Rect::new(1920, 480)], "twitch_banner"),
    framed(PresetId::TwitchOffline, "twitch-offline", "Offline screen", Twitch,
        &[Rect::new(1920, 1080)], "twitch_offline_screen"),
    square(PresetId::TiktokProfile, "tiktok-profile", "Profile picture", TikTok,
        &[Rect::square(200)], Fixed("tiktok_profile_picture")),
];

impl PresetId {
    pub fn preset(self) -> &'static Preset {
        &PRESETS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.preset().key
    }
}

impl FromStr for PresetId {
    type Err = CatalogError;

    /// Keys are matched against the table itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PRESETS
            .iter()
            .find(|preset| preset.key == s)
            .map(|preset| preset.id)
            .ok_or_else(|| CatalogError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Strict lookup by preset key.
pub fn lookup(key: &str) -> Result<&'static Preset, CatalogError> {
    key.parse::<PresetId>().map(PresetId::preset)
}

/// A preset request resolved to concrete canvases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPreset {
    pub key: String,
    pub sizes: Vec<Rect>,
    pub policy: FitPolicy,
    pub filename: FilenameTemplate,
    /// Set when the key was unknown and [`FALLBACK_SIZE`] was substituted.
    pub fallback: bool,
}

impl ResolvedPreset {
    /// Output file stem for one of this preset's canvases.
    pub fn file_stem(&self, size: Rect) -> String {
        self.filename.render(size)
    }
}

impl From<&Preset> for ResolvedPreset {
    fn from(preset: &Preset) -> Self {
        Self {
            key: preset.key.to_string(),
            sizes: preset.sizes.to_vec(),
            policy: preset.policy,
            filename: preset.filename,
            fallback: false,
        }
    }
}

/// Resolve a preset key, the `custom` key, or an unknown key.
///
/// `custom` needs `custom_size`, a side length in `1..=MAX_DIMENSION`.
/// Unknown keys do not fail: they resolve to the [`FALLBACK_SIZE`] canvas.
pub fn resolve(key: &str, custom_size: Option<u32>) -> Result<ResolvedPreset, CatalogError> {
    if key == CUSTOM_KEY {
        let side = match custom_size {
            Some(side) => check_dimension(side)?,
            None => return Err(DimensionError::InvalidDimension(String::new()).into()),
        };
        return Ok(ResolvedPreset {
            key: CUSTOM_KEY.to_string(),
            sizes: vec![Rect::square(side)],
            policy: FitPolicy::FitWithin,
            filename: FilenameTemplate::PerSize("custom"),
            fallback: false,
        });
    }

    match lookup(key) {
        Ok(preset) => Ok(preset.into()),
        Err(CatalogError::UnknownPreset(_)) => {
            warn!(preset = key, fallback = %FALLBACK_SIZE, "unknown preset, using fallback canvas");
            Ok(ResolvedPreset {
                key: key.to_string(),
                sizes: vec![FALLBACK_SIZE],
                policy: FitPolicy::FitWithin,
                filename: FilenameTemplate::PerSize("image"),
                fallback: true,
            })
        }
        Err(other) => Err(other),
    }
}

/// Presets grouped by platform, in catalog order.
pub fn grouped() -> Vec<(Platform, Vec<&'static Preset>)> {
    let mut groups: Vec<(Platform, Vec<&'static Preset>)> = Vec::new();
    for preset in &PRESETS {
        match groups.last_mut() {
            Some((platform, members)) if *platform == preset.platform => members.push(preset),
            _ => groups.push((preset.platform, vec![preset])),
        }
    }
    groups
}
