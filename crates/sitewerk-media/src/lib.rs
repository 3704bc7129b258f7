// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sitewerk-media — Raster image tooling for the site's static assets.
//
// Provides the social-preview card composer (background, centred text spans,
// accent rules → PNG) and the palette classifier (opaque-pixel color
// breakdown into dark/light/colored buckets).

pub mod compose;
pub mod font;
pub mod palette;

pub use compose::{AccentRule, CardComposer, CardSpec, TextSpan};
pub use palette::{PaletteSummary, classify_file, classify_image};
