// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Slide deck specification types.
//
// Coordinates are in millimetres measured from the top-left corner of the
// slide (the writer converts to PDF's bottom-left origin). Specs are plain
// serde data so decks can be supplied as JSON files.

use serde::{Deserialize, Serialize};

use sitewerk_core::config::BrandPalette;
use sitewerk_core::error::{Result, SitewerkError};
use sitewerk_core::types::Rgb;

/// Horizontal text alignment within a text box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
}

fn default_size_pt() -> f32 {
    18.0
}

fn default_text_color() -> Rgb {
    BrandPalette::default().text_primary
}

/// One positioned element on a slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideElement {
    /// A wrapped text box. `width_mm` bounds the line length; overflow wraps
    /// onto subsequent lines.
    Text {
        text: String,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        #[serde(default = "default_size_pt")]
        size_pt: f32,
        #[serde(default)]
        bold: bool,
        #[serde(default = "default_text_color")]
        color: Rgb,
        #[serde(default)]
        align: Align,
    },
    /// A filled rectangle with a 1pt border, used as a card background.
    Card {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        fill: Rgb,
        border: Rgb,
    },
    /// A simple grid table with equal-width columns. Each inner vec is one
    /// row; the column count is taken from the longest row.
    Table {
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        row_height_mm: f32,
        rows: Vec<Vec<String>>,
        #[serde(default = "default_size_pt")]
        size_pt: f32,
        #[serde(default = "default_text_color")]
        text_color: Rgb,
        #[serde(default = "default_text_color")]
        line_color: Rgb,
    },
}

/// One slide: a background color plus elements drawn in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideSpec {
    #[serde(default = "default_background")]
    pub background: Rgb,
    #[serde(default)]
    pub elements: Vec<SlideElement>,
}

fn default_background() -> Rgb {
    BrandPalette::default().bg
}

impl Default for SlideSpec {
    fn default() -> Self {
        Self {
            background: default_background(),
            elements: Vec::new(),
        }
    }
}

/// A full deck: document title plus ordered slides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckSpec {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slides: Vec<SlideSpec>,
}

impl DeckSpec {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            SitewerkError::Deck(format!(
                "failed to read deck spec {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_spec_json_round_trip() {
        let deck = DeckSpec {
            title: "Quarterly".into(),
            slides: vec![SlideSpec {
                background: Rgb::new(255, 255, 255),
                elements: vec![
                    SlideElement::Text {
                        text: "Hello".into(),
                        x_mm: 20.0,
                        y_mm: 30.0,
                        width_mm: 200.0,
                        size_pt: 44.0,
                        bold: true,
                        color: Rgb::new(59, 130, 246),
                        align: Align::Center,
                    },
                    SlideElement::Card {
                        x_mm: 20.0,
                        y_mm: 60.0,
                        width_mm: 120.0,
                        height_mm: 40.0,
                        fill: Rgb::new(248, 250, 252),
                        border: Rgb::new(226, 232, 240),
                    },
                ],
            }],
        };

        let json = serde_json::to_string(&deck).unwrap();
        let parsed = DeckSpec::from_json_str(&json).unwrap();
        assert_eq!(parsed.title, "Quarterly");
        assert_eq!(parsed.slides.len(), 1);
        assert_eq!(parsed.slides[0].elements.len(), 2);
    }

    #[test]
    fn element_defaults_fill_in() {
        let json = r#"{
            "slides": [
                {
                    "elements": [
                        { "text": { "text": "t", "x_mm": 1.0, "y_mm": 2.0, "width_mm": 50.0 } }
                    ]
                }
            ]
        }"#;
        let deck = DeckSpec::from_json_str(json).unwrap();
        match &deck.slides[0].elements[0] {
            SlideElement::Text {
                size_pt,
                bold,
                align,
                ..
            } => {
                assert_eq!(*size_pt, 18.0);
                assert!(!*bold);
                assert_eq!(*align, Align::Left);
            }
            other => panic!("unexpected element: {other:?}"),
        }
        // Background defaults to the brand light theme.
        assert_eq!(deck.slides[0].background, Rgb::new(255, 255, 255));
    }
}
