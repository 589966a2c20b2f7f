//! CLI output formatting.
//!
//! # Result-First Display
//!
//! Every input gets one header line with its positional index and name; each
//! file produced for it follows as an indented `name (info)` line, where
//! `info` is the output size (`1280x720`) or, for conversions, the target
//! format (`WEBP`). Failures replace the output lines with one indented
//! `error:` line.
//!
//! ```text
//! ==> preset: 2 images
//! 001 logo.png
//!     favicon_16x16.png (16x16)
//!     favicon_32x32.png (32x32)
//!     favicon_48x48.png (48x48)
//! 002 broken.png
//!     error: Decode failed: ...
//! ==> 1 succeeded, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and, where the CLI needs it, a `print_*` wrapper that writes
//! to stdout. Format functions are pure.

use crate::batch::BatchEvent;
use crate::catalog::{self, Platform, Preset, ResolvedPreset};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 0-based batch index as a 1-based, 3-digit zero-padded position.
fn format_index(index: usize) -> String {
    format!("{:0>3}", index + 1)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `name (info)`, the line shown for every produced file.
fn output_line(filename: &str, info: &str) -> String {
    format!("{}{} ({})", indent(1), filename, info)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Batch progress
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Started { operation, total } => {
            vec![format!("==> {}: {}", operation, plural(*total, "image"))]
        }
        BatchEvent::ItemDone {
            index,
            source,
            outputs,
        } => {
            let mut lines = vec![format!("{} {}", format_index(*index), source)];
            lines.extend(outputs.iter().map(|(name, info)| output_line(name, info)));
            lines
        }
        BatchEvent::ItemFailed {
            index,
            source,
            error,
        } => vec![
            format!("{} {}", format_index(*index), source),
            format!("{}error: {}", indent(1), error),
        ],
        BatchEvent::Finished { succeeded, failed } => {
            vec![format!("==> {} succeeded, {} failed", succeeded, failed)]
        }
    }
}

/// Notice printed before a preset batch whose key was not in the catalog.
/// Empty for catalog presets.
pub fn format_preset_fallback(preset: &ResolvedPreset) -> Vec<String> {
    if !preset.fallback {
        return Vec::new();
    }
    let sizes: Vec<String> = preset.sizes.iter().map(|s| s.to_string()).collect();
    vec![format!(
        "==> unknown preset '{}', using {} (see `socialsize presets`)",
        preset.key,
        sizes.join(", ")
    )]
}

// ============================================================================
// Preset listing
// ============================================================================

fn sizes_label(preset: &Preset) -> String {
    preset
        .sizes
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format the preset catalog grouped by platform.
///
/// ```text
/// Website icons
///     favicon              Favicon            16x16, 32x32, 48x48  crop
/// ```
pub fn format_preset_list(groups: &[(Platform, Vec<&Preset>)]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (platform, presets)) in groups.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(platform.to_string());
        for preset in presets {
            lines.push(format!(
                "{}{:<20} {:<18} {:<20} {}",
                indent(1),
                preset.key,
                preset.label,
                sizes_label(preset),
                preset.policy
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{}{:<20} square of --size N, fit",
        indent(1),
        catalog::CUSTOM_KEY
    ));
    lines
}

pub fn print_preset_list() {
    for line in format_preset_list(&catalog::grouped()) {
        println!("{}", line);
    }
}
