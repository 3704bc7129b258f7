// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Palette classifier — single-pass breakdown of an image's opaque pixels
// into coarse dark/light/colored buckets.

use image::RgbaImage;
use tracing::{info, instrument};

use sitewerk_core::error::{Result, SitewerkError};
use sitewerk_core::types::ColorBucket;

/// Pixels with alpha at or below this value are ignored.
const ALPHA_THRESHOLD: u8 = 50;
/// All channels strictly below this value → dark.
const DARK_MAX: u8 = 50;
/// All channels strictly above this value → light.
const LIGHT_MIN: u8 = 200;

/// Per-bucket opaque-pixel counts for one image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteSummary {
    dark: u64,
    light: u64,
    colored: u64,
}

impl PaletteSummary {
    /// Count for one bucket.
    pub fn count(&self, bucket: ColorBucket) -> u64 {
        match bucket {
            ColorBucket::Dark => self.dark,
            ColorBucket::Light => self.light,
            ColorBucket::Colored => self.colored,
        }
    }

    /// Total qualifying (opaque enough) pixels.
    pub fn total(&self) -> u64 {
        self.dark + self.light + self.colored
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Percentages for non-empty buckets, in stable dark → light → colored
    /// order.
    pub fn percentages(&self) -> Vec<(ColorBucket, f64)> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }
        ColorBucket::ORDER
            .iter()
            .filter(|bucket| self.count(**bucket) > 0)
            .map(|bucket| {
                (
                    *bucket,
                    self.count(*bucket) as f64 / total as f64 * 100.0,
                )
            })
            .collect()
    }

    /// Textual report: `Empty image` when nothing qualifies, otherwise one
    /// `<bucket>: <percent>%` line per non-empty bucket, one decimal place.
    pub fn report(&self) -> String {
        if self.is_empty() {
            return "Empty image".to_owned();
        }
        self.percentages()
            .iter()
            .map(|(bucket, percent)| format!("{bucket}: {percent:.1}%"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Bucket a single RGB triple.
fn classify_pixel(r: u8, g: u8, b: u8) -> ColorBucket {
    if r < DARK_MAX && g < DARK_MAX && b < DARK_MAX {
        ColorBucket::Dark
    } else if r > LIGHT_MIN && g > LIGHT_MIN && b > LIGHT_MIN {
        ColorBucket::Light
    } else {
        ColorBucket::Colored
    }
}

/// Classify every sufficiently opaque pixel of an RGBA image.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn classify_image(image: &RgbaImage) -> PaletteSummary {
    let mut summary = PaletteSummary::default();

    for pixel in image.pixels() {
        let image::Rgba([r, g, b, a]) = *pixel;
        if a <= ALPHA_THRESHOLD {
            continue;
        }
        match classify_pixel(r, g, b) {
            ColorBucket::Dark => summary.dark += 1,
            ColorBucket::Light => summary.light += 1,
            ColorBucket::Colored => summary.colored += 1,
        }
    }

    info!(
        total = summary.total(),
        dark = summary.dark,
        light = summary.light,
        colored = summary.colored,
        "Palette classified"
    );
    summary
}

/// Open an image file, convert it to RGBA8, and classify it. Missing or
/// undecodable input is fatal.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn classify_file(path: impl AsRef<std::path::Path>) -> Result<PaletteSummary> {
    let img = image::open(path.as_ref()).map_err(|err| {
        SitewerkError::ImageDecode(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    Ok(classify_image(&img.to_rgba8()))
}

// -- Tests --------------------------------------------------------------------
