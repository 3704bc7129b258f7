// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deck writer — renders a `DeckSpec` to a multi-page PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: each slide becomes a `PdfPage` built
// from a `Vec<Op>` operation list, and the whole document is serialised via
// `PdfDocument::save()`. Spec coordinates are millimetres from the top-left;
// PDF's origin is bottom-left, so all y values are flipped here.

use std::path::Path;

use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PaintMode, PdfDocument, PdfPage, PdfSaveOptions,
    PdfWarnMsg, Point, Polygon, PolygonRing, Pt, Rgb as PdfRgb, TextItem, WindingOrder,
};
use tracing::{debug, info, instrument};

use sitewerk_core::error::Result;
use sitewerk_core::types::Rgb;

use crate::slide::{Align, DeckSpec, SlideElement, SlideSpec};

/// Widescreen 16:9 slide, 13.333 x 7.5 inches.
const PAGE_W_MM: f32 = 338.667;
const PAGE_H_MM: f32 = 190.5;

/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.3;

/// Average Helvetica glyph width as a fraction of the font size, used for
/// wrap and centring estimates. Builtin fonts expose no real glyph metrics
/// here, so layout works from this approximation.
const AVG_GLYPH_FRACTION: f32 = 0.50;

/// Millimetres per PDF point.
const MM_PER_PT: f32 = 0.3528;

/// Renders slide decks to PDF, one page per slide.
pub struct DeckWriter {
    page_w: Mm,
    page_h: Mm,
}

impl Default for DeckWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckWriter {
    /// Writer targeting widescreen 16:9 slides.
    pub fn new() -> Self {
        Self {
            page_w: Mm(PAGE_W_MM),
            page_h: Mm(PAGE_H_MM),
        }
    }

    /// Writer with a custom page size in millimetres.
    pub fn with_page_size(width_mm: f32, height_mm: f32) -> Self {
        Self {
            page_w: Mm(width_mm),
            page_h: Mm(height_mm),
        }
    }

    /// Build the in-memory PDF document: one page per slide, in spec order.
    ///
    /// An empty deck yields a single blank page so the output is always a
    /// valid document.
    #[instrument(skip_all, fields(slides = spec.slides.len(), title = %spec.title))]
    pub fn document(&self, spec: &DeckSpec) -> PdfDocument {
        info!("Building deck document");

        let mut doc = PdfDocument::new(spec.title.as_str());
        let mut pages: Vec<PdfPage> = Vec::with_capacity(spec.slides.len().max(1));

        for (index, slide) in spec.slides.iter().enumerate() {
            let ops = self.slide_ops(slide);
            debug!(index, ops = ops.len(), "Slide laid out");
            pages.push(PdfPage::new(self.page_w, self.page_h, ops));
        }

        if pages.is_empty() {
            pages.push(PdfPage::new(self.page_w, self.page_h, Vec::new()));
        }

        doc.with_pages(pages);
        doc
    }

    /// Serialise the deck to PDF bytes.
    pub fn write(&self, spec: &DeckSpec) -> Result<Vec<u8>> {
        let doc = self.document(spec);
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        debug!(bytes = bytes.len(), warnings = warnings.len(), "Deck serialised");
        Ok(bytes)
    }

    /// Serialise the deck and write it to a file.
    pub fn write_to_file(&self, spec: &DeckSpec, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.write(spec)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote deck to {}", path.as_ref().display());
        Ok(())
    }

    // -- Slide layout ---------------------------------------------------------

    fn slide_ops(&self, slide: &SlideSpec) -> Vec<Op> {
        let mut ops: Vec<Op> = Vec::new();

        // Paint the background first so elements draw over it.
        ops.push(Op::SetFillColor {
            col: pdf_color(slide.background),
        });
        ops.push(Op::DrawPolygon {
            polygon: rect_polygon(
                Pt(0.0),
                Pt(0.0),
                self.page_w.into_pt(),
                self.page_h.into_pt(),
                PaintMode::Fill,
            ),
        });

        for element in &slide.elements {
            match element {
                SlideElement::Text {
                    text,
                    x_mm,
                    y_mm,
                    width_mm,
                    size_pt,
                    bold,
                    color,
                    align,
                } => self.text_ops(
                    &mut ops, text, *x_mm, *y_mm, *width_mm, *size_pt, *bold, *color, *align,
                ),
                SlideElement::Card {
                    x_mm,
                    y_mm,
                    width_mm,
                    height_mm,
                    fill,
                    border,
                } => self.card_ops(&mut ops, *x_mm, *y_mm, *width_mm, *height_mm, *fill, *border),
                SlideElement::Table {
                    x_mm,
                    y_mm,
                    width_mm,
                    row_height_mm,
                    rows,
                    size_pt,
                    text_color,
                    line_color,
                } => self.table_ops(
                    &mut ops,
                    *x_mm,
                    *y_mm,
                    *width_mm,
                    *row_height_mm,
                    rows,
                    *size_pt,
                    *text_color,
                    *line_color,
                ),
            }
        }

        ops
    }

    #[allow(clippy::too_many_arguments)]
    fn text_ops(
        &self,
        ops: &mut Vec<Op>,
        text: &str,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        size_pt: f32,
        bold: bool,
        color: Rgb,
        align: Align,
    ) {
        let font = if bold {
            BuiltinFont::HelveticaBold
        } else {
            BuiltinFont::Helvetica
        };

        let avg_char_mm = AVG_GLYPH_FRACTION * size_pt * MM_PER_PT;
        let max_chars = ((width_mm / avg_char_mm) as usize).max(1);
        let lines = wrap_text(text, max_chars);

        let line_height_pt = size_pt * LINE_SPACING;
        let page_h_pt = self.page_h.into_pt().0;

        ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });

        for (i, line) in lines.iter().enumerate() {
            let line_x_mm = match align {
                Align::Left => x_mm,
                Align::Center => {
                    let est_width_mm = line.chars().count() as f32 * avg_char_mm;
                    x_mm + ((width_mm - est_width_mm) / 2.0).max(0.0)
                }
            };

            // Baseline: drop by the font size for the first line, then by
            // the line height for each following line.
            let y_pt = page_h_pt - Mm(y_mm).into_pt().0 - size_pt - i as f32 * line_height_pt;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Mm(line_x_mm).into_pt(),
                    y: Pt(y_pt),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(size_pt),
                font,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.clone())],
                font,
            });
            ops.push(Op::EndTextSection);
        }
    }

    fn card_ops(
        &self,
        ops: &mut Vec<Op>,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
        fill: Rgb,
        border: Rgb,
    ) {
        let page_h_pt = self.page_h.into_pt().0;
        let x_pt = Mm(x_mm).into_pt();
        // Bottom edge in PDF space.
        let y_pt = Pt(page_h_pt - Mm(y_mm + height_mm).into_pt().0);

        ops.push(Op::SetFillColor {
            col: pdf_color(fill),
        });
        ops.push(Op::SetOutlineColor {
            col: pdf_color(border),
        });
        ops.push(Op::SetOutlineThickness { pt: Pt(1.0) });
        ops.push(Op::DrawPolygon {
            polygon: rect_polygon(
                x_pt,
                y_pt,
                Mm(width_mm).into_pt(),
                Mm(height_mm).into_pt(),
                PaintMode::FillStroke,
            ),
        });
    }

    #[allow(clippy::too_many_arguments)]
    fn table_ops(
        &self,
        ops: &mut Vec<Op>,
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        row_height_mm: f32,
        rows: &[Vec<String>],
        size_pt: f32,
        text_color: Rgb,
        line_color: Rgb,
    ) {
        if rows.is_empty() {
            return;
        }
        let columns = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let col_w_mm = width_mm / columns as f32;
        let table_h_mm = row_height_mm * rows.len() as f32;

        // Grid lines.
        ops.push(Op::SetOutlineColor {
            col: pdf_color(line_color),
        });
        ops.push(Op::SetOutlineThickness { pt: Pt(0.75) });

        for r in 0..=rows.len() {
            let line_y = y_mm + r as f32 * row_height_mm;
            ops.push(Op::DrawLine {
                line: self.horizontal_line(x_mm, x_mm + width_mm, line_y),
            });
        }
        for c in 0..=columns {
            let line_x = x_mm + c as f32 * col_w_mm;
            ops.push(Op::DrawLine {
                line: self.vertical_line(line_x, y_mm, y_mm + table_h_mm),
            });
        }

        // Cell text, left-aligned with a small inset, vertically roughly
        // centred in the row.
        let inset_mm = 2.0;
        let avg_char_mm = AVG_GLYPH_FRACTION * size_pt * MM_PER_PT;
        let max_cell_chars = (((col_w_mm - 2.0 * inset_mm) / avg_char_mm) as usize).max(1);

        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let cell_text: String = cell.chars().take(max_cell_chars).collect();
                let cell_x = x_mm + c as f32 * col_w_mm + inset_mm;
                let cell_y = y_mm + r as f32 * row_height_mm
                    + (row_height_mm - size_pt * MM_PER_PT) / 2.0;
                self.text_ops(
                    ops,
                    &cell_text,
                    cell_x,
                    cell_y,
                    col_w_mm - 2.0 * inset_mm,
                    size_pt,
                    false,
                    text_color,
                    Align::Left,
                );
            }
        }
    }

    fn horizontal_line(&self, x1_mm: f32, x2_mm: f32, y_mm: f32) -> Line {
        let y_pt = Pt(self.page_h.into_pt().0 - Mm(y_mm).into_pt().0);
        Line {
            points: vec![
                line_point(Mm(x1_mm).into_pt(), y_pt),
                line_point(Mm(x2_mm).into_pt(), y_pt),
            ],
            is_closed: false,
        }
    }

    fn vertical_line(&self, x_mm: f32, y1_mm: f32, y2_mm: f32) -> Line {
        let page_h_pt = self.page_h.into_pt().0;
        let x_pt = Mm(x_mm).into_pt();
        Line {
            points: vec![
                line_point(x_pt, Pt(page_h_pt - Mm(y1_mm).into_pt().0)),
                line_point(x_pt, Pt(page_h_pt - Mm(y2_mm).into_pt().0)),
            ],
            is_closed: false,
        }
    }
}

// -- printpdf helpers ---------------------------------------------------------

fn pdf_color(color: Rgb) -> Color {
    let (r, g, b) = color.unit_channels();
    Color::Rgb(PdfRgb {
        r,
        g,
        b,
        icc_profile: None,
    })
}

fn line_point(x: Pt, y: Pt) -> LinePoint {
    LinePoint {
        p: Point { x, y },
        bezier: false,
    }
}

/// Axis-aligned rectangle polygon with bottom-left corner (x, y).
fn rect_polygon(x: Pt, y: Pt, width: Pt, height: Pt, mode: PaintMode) -> Polygon {
    let points = vec![
        line_point(x, y),
        line_point(Pt(x.0 + width.0), y),
        line_point(Pt(x.0 + width.0), Pt(y.0 + height.0)),
        line_point(x, Pt(y.0 + height.0)),
    ];
    Polygon {
        rings: vec![PolygonRing { points }],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}

/// Wrap a multi-line string so no line exceeds `max_width` characters.
/// Paragraph breaks are preserved; words longer than the width are
/// force-broken.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            if word.chars().count() > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_width) {
                    let piece: String = chunk.iter().collect();
                    if chunk.len() == max_width {
                        lines.push(piece);
                    } else {
                        current = piece;
                    }
                }
            } else if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= max_width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }

        lines.push(current);
    }

    lines
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::{DeckSpec, SlideElement, SlideSpec};

    fn text_element(text: &str) -> SlideElement {
        SlideElement::Text {
            text: text.into(),
            x_mm: 20.0,
            y_mm: 20.0,
            width_mm: 280.0,
            size_pt: 24.0,
            bold: false,
            color: Rgb::new(15, 23, 42),
            align: Align::Left,
        }
    }

    #[test]
    fn n_slides_produce_n_pages_in_order() {
        let deck = DeckSpec {
            title: "Deck".into(),
            slides: (0..5)
                .map(|i| SlideSpec {
                    background: Rgb::new(255, 255, 255),
                    elements: vec![text_element(&format!("slide {i}"))],
                })
                .collect(),
        };

        let doc = DeckWriter::new().document(&deck);
        assert_eq!(doc.pages.len(), 5);

        // Page ops should contain each slide's text in order: the slide text
        // ends up in a WriteTextBuiltinFont op.
        for (i, page) in doc.pages.iter().enumerate() {
            let found = page.ops.iter().any(|op| match op {
                Op::WriteTextBuiltinFont { items, .. } => items.iter().any(|item| match item {
                    TextItem::Text(t) => t.contains(&format!("slide {i}")),
                    _ => false,
                }),
                _ => false,
            });
            assert!(found, "slide {i} text missing from page {i}");
        }
    }

    #[test]
    fn empty_deck_yields_single_blank_page() {
        let doc = DeckWriter::new().document(&DeckSpec::default());
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].ops.is_empty());
    }

    #[test]
    fn write_produces_pdf_bytes() {
        let deck = DeckSpec {
            title: "Bytes".into(),
            slides: vec![SlideSpec::default()],
        };
        let bytes = DeckWriter::new().write(&deck).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn write_to_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pdf");

        let deck = DeckSpec {
            title: "File".into(),
            slides: vec![SlideSpec::default(), SlideSpec::default()],
        };
        DeckWriter::new().write_to_file(&deck, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn card_and_table_generate_draw_ops() {
        let deck = DeckSpec {
            title: "Shapes".into(),
            slides: vec![SlideSpec {
                background: Rgb::new(255, 255, 255),
                elements: vec![
                    SlideElement::Card {
                        x_mm: 25.0,
                        y_mm: 55.0,
                        width_mm: 127.0,
                        height_mm: 45.0,
                        fill: Rgb::new(248, 250, 252),
                        border: Rgb::new(226, 232, 240),
                    },
                    SlideElement::Table {
                        x_mm: 25.0,
                        y_mm: 110.0,
                        width_mm: 200.0,
                        row_height_mm: 10.0,
                        rows: vec![
                            vec!["Year".into(), "Users".into()],
                            vec!["2026".into(), "12k".into()],
                        ],
                        size_pt: 12.0,
                        text_color: Rgb::new(15, 23, 42),
                        line_color: Rgb::new(226, 232, 240),
                    },
                ],
            }],
        };

        let doc = DeckWriter::new().document(&deck);
        let ops = &doc.pages[0].ops;

        // Background + card = at least two polygons.
        let polygons = ops
            .iter()
            .filter(|op| matches!(op, Op::DrawPolygon { .. }))
            .count();
        assert!(polygons >= 2, "expected background and card polygons");

        // 2 rows + 1 horizontal + 2 columns + 1 vertical = 6 grid lines.
        let lines = ops
            .iter()
            .filter(|op| matches!(op, Op::DrawLine { .. }))
            .count();
        assert_eq!(lines, 6);
    }

    #[test]
    fn wrap_text_preserves_paragraphs_and_breaks_long_words() {
        let wrapped = wrap_text("short\nsupercalifragilistic", 8);
        assert_eq!(wrapped[0], "short");
        assert!(wrapped[1..].iter().all(|l| l.chars().count() <= 8));
        let rejoined: String = wrapped[1..].concat();
        assert_eq!(rejoined, "supercalifragilistic");
    }

    #[test]
    fn wrap_text_wraps_at_word_boundaries() {
        let wrapped = wrap_text("one two three four", 9);
        assert_eq!(wrapped, vec!["one two", "three", "four"]);
    }
}
