// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Brand palette configuration.

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

/// Named brand colors shared by the card composer and the deck builder.
///
/// Defaults are the light theme used across the site's marketing assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub danger: Rgb,
    /// Page/canvas background.
    pub bg: Rgb,
    /// Card fill.
    pub card: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
    pub text_muted: Rgb,
    pub border: Rgb,
}

impl Default for BrandPalette {
    fn default() -> Self {
        Self {
            primary: Rgb::new(59, 130, 246),
            secondary: Rgb::new(139, 92, 246),
            accent: Rgb::new(6, 182, 212),
            success: Rgb::new(16, 185, 129),
            warning: Rgb::new(245, 158, 11),
            danger: Rgb::new(239, 68, 68),
            bg: Rgb::new(255, 255, 255),
            card: Rgb::new(248, 250, 252),
            text_primary: Rgb::new(15, 23, 42),
            text_secondary: Rgb::new(71, 85, 105),
            text_muted: Rgb::new(148, 163, 184),
            border: Rgb::new(226, 232, 240),
        }
    }
}
