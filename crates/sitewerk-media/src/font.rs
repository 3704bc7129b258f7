// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font loading for canvas text rendering.
//
// Fonts are optional: when none can be loaded the composer skips text spans
// and still renders the rest of the card.

use std::path::Path;

use ab_glyph::FontVec;
use tracing::{debug, info};

use sitewerk_core::error::{Result, SitewerkError};

/// Common system font locations probed by `load_system_font`.
const SYSTEM_FONT_PATHS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load a TrueType/OpenType font from an explicit path. Fatal if the file is
/// missing or not a parseable font.
pub fn load_font_from_path(path: impl AsRef<Path>) -> Result<FontVec> {
    let data = std::fs::read(path.as_ref()).map_err(|err| {
        SitewerkError::Font(format!(
            "failed to read font {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    let font = FontVec::try_from_vec(data).map_err(|_| {
        SitewerkError::Font(format!(
            "failed to parse font file {}",
            path.as_ref().display()
        ))
    })?;
    info!(path = %path.as_ref().display(), "Font loaded");
    Ok(font)
}

/// Probe common system locations for a usable font. Returns `None` when no
/// candidate exists, in which case text rendering is skipped.
pub fn load_system_font() -> Option<FontVec> {
    for path in SYSTEM_FONT_PATHS {
        if let Ok(data) = std::fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                info!(path, "Loaded system font");
                return Some(font);
            }
        }
    }
    debug!("No system font found, text rendering will be skipped");
    None
}
