// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Social-preview card composer — fills a fixed-size canvas with a solid
// background, draws horizontally centred text spans, and adds accent rules,
// then writes the result as PNG.

use ab_glyph::{FontVec, PxScale};
use image::RgbImage;
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use sitewerk_core::error::{Result, SitewerkError};
use sitewerk_core::types::Rgb;

/// A horizontally centred line of text on the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    /// Font size in pixels.
    pub size_px: f32,
    pub color: Rgb,
    /// Top edge of the text, in pixels from the canvas top.
    pub y: i32,
}

/// A horizontally centred solid bar, used as a visual accent under the title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccentRule {
    pub y: i32,
    pub width: u32,
    pub thickness: u32,
    pub color: Rgb,
}

/// Declarative description of a social-preview card.
///
/// The default matches the site's Open Graph artifact: a 1200×630 canvas on a
/// dark blue-black background, a large violet title over a white subtitle,
/// and a short blue rule between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSpec {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    #[serde(default)]
    pub texts: Vec<TextSpan>,
    #[serde(default)]
    pub rules: Vec<AccentRule>,
}

impl Default for CardSpec {
    fn default() -> Self {
        let height: u32 = 630;
        let mid = height as i32 / 2;
        Self {
            width: 1200,
            height,
            background: Rgb::new(11, 15, 25),
            texts: vec![
                TextSpan {
                    text: "Title".into(),
                    size_px: 80.0,
                    color: Rgb::new(139, 92, 246),
                    y: mid - 80,
                },
                TextSpan {
                    text: "Subtitle".into(),
                    size_px: 40.0,
                    color: Rgb::new(255, 255, 255),
                    y: mid + 20,
                },
            ],
            rules: vec![AccentRule {
                y: mid + 80,
                width: 200,
                thickness: 4,
                color: Rgb::new(59, 130, 246),
            }],
        }
    }
}

impl CardSpec {
    /// Parse a card spec from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a card spec from a JSON file.
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }
}

/// Renders a `CardSpec` onto an RGB canvas.
///
/// The font is optional. Without one, text spans are skipped with a warning
/// and the background and rules still render, so the card degrades rather
/// than failing outright.
pub struct CardComposer {
    spec: CardSpec,
    font: Option<FontVec>,
}

impl CardComposer {
    /// Composer with no font: text spans will be skipped.
    pub fn new(spec: CardSpec) -> Self {
        Self { spec, font: None }
    }

    /// Composer with a font loaded from an explicit path.
    pub fn with_font_path(
        spec: CardSpec,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self> {
        let font = crate::font::load_font_from_path(path)?;
        Ok(Self {
            spec,
            font: Some(font),
        })
    }

    /// Composer using the first available system font, if any.
    pub fn with_system_font(spec: CardSpec) -> Self {
        Self {
            font: crate::font::load_system_font(),
            spec,
        }
    }

    /// Render the card to an in-memory image.
    #[instrument(skip(self), fields(width = self.spec.width, height = self.spec.height))]
    pub fn render(&self) -> RgbImage {
        let spec = &self.spec;
        let mut canvas = RgbImage::from_pixel(
            spec.width,
            spec.height,
            image::Rgb(spec.background.channels()),
        );

        match &self.font {
            Some(font) => {
                for span in &spec.texts {
                    draw_centred_text(&mut canvas, font, span, spec.width);
                }
            }
            None if !spec.texts.is_empty() => {
                warn!(
                    spans = spec.texts.len(),
                    "No font available, skipping text spans"
                );
            }
            None => {}
        }

        for rule in &spec.rules {
            let x = (spec.width.saturating_sub(rule.width)) as i32 / 2;
            draw_filled_rect_mut(
                &mut canvas,
                Rect::at(x, rule.y).of_size(rule.width.max(1), rule.thickness.max(1)),
                image::Rgb(rule.color.channels()),
            );
        }

        info!(
            texts = spec.texts.len(),
            rules = spec.rules.len(),
            "Card rendered"
        );
        canvas
    }

    /// Render the card and write it to `path` (format from the extension,
    /// normally PNG).
    pub fn render_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let canvas = self.render();
        canvas.save(path.as_ref()).map_err(|err| {
            SitewerkError::ImageEncode(format!(
                "failed to save card to {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!("Wrote card to {}", path.as_ref().display());
        Ok(())
    }
}

/// Draw one text span horizontally centred on the canvas.
fn draw_centred_text(canvas: &mut RgbImage, font: &FontVec, span: &TextSpan, canvas_w: u32) {
    let scale = PxScale::from(span.size_px);
    let (text_w, _text_h) = text_size(scale, font, &span.text);
    let x = (canvas_w.saturating_sub(text_w)) as i32 / 2;

    debug!(text = %span.text, text_w, x, y = span.y, "Drawing text span");
    draw_text_mut(
        canvas,
        image::Rgb(span.color.channels()),
        x,
        span.y,
        scale,
        font,
        &span.text,
    );
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_dimensions_and_background() {
        let composer = CardComposer::new(CardSpec::default());
        let img = composer.render();

        assert_eq!(img.width(), 1200);
        assert_eq!(img.height(), 630);
        assert_eq!(img.get_pixel(0, 0), &image::Rgb([11, 15, 25]));
    }

    #[test]
    fn accent_rule_is_centred() {
        let spec = CardSpec::default();
        let rule = spec.rules[0].clone();
        let composer = CardComposer::new(spec);
        let img = composer.render();

        // Middle of the rule.
        let centre = img.get_pixel(600, rule.y as u32 + 1);
        assert_eq!(centre, &image::Rgb(rule.color.channels()));

        // Just outside the rule's horizontal extent.
        let outside_x = 600 - rule.width / 2 - 5;
        let outside = img.get_pixel(outside_x, rule.y as u32 + 1);
        assert_eq!(outside, &image::Rgb([11, 15, 25]));
    }

    #[test]
    fn no_font_still_renders_background() {
        let spec = CardSpec {
            width: 64,
            height: 32,
            background: Rgb::new(1, 2, 3),
            texts: vec![TextSpan {
                text: "ignored".into(),
                size_px: 12.0,
                color: Rgb::new(255, 255, 255),
                y: 4,
            }],
            rules: vec![],
        };
        let img = CardComposer::new(spec).render();
        assert_eq!(img.get_pixel(10, 10), &image::Rgb([1, 2, 3]));
    }

    #[test]
    fn render_to_file_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");

        let composer = CardComposer::new(CardSpec::default());
        composer.render_to_file(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.width(), 1200);
        assert_eq!(reloaded.height(), 630);
        assert_eq!(reloaded.get_pixel(0, 0), &image::Rgb([11, 15, 25]));
    }

    #[test]
    fn card_spec_json_round_trip() {
        let spec = CardSpec::default();
        let json = serde_json::to_string(&spec).unwrap();
        let parsed = CardSpec::from_json_str(&json).unwrap();
        assert_eq!(parsed.width, spec.width);
        assert_eq!(parsed.background, spec.background);
        assert_eq!(parsed.texts.len(), spec.texts.len());
    }
}
