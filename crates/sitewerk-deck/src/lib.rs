// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sitewerk-deck — Declarative slide decks rendered to PDF.
//
// A deck is an ordered list of slide specifications; each slide is a list of
// positioned text boxes, cards, and tables. The writer emits exactly one PDF
// page per slide, in specification order, using `printpdf` 0.8's
// data-oriented op-list API.

pub mod slide;
pub mod writer;

pub use slide::{Align, DeckSpec, SlideElement, SlideSpec};
pub use writer::DeckWriter;
