// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Sitewerk.

use thiserror::Error;

/// Top-level error type for all Sitewerk operations.
#[derive(Debug, Error)]
pub enum SitewerkError {
    // -- Patch errors --
    #[error("patch script error: {0}")]
    Script(String),

    #[error("invalid match pattern: {0}")]
    Pattern(String),

    // -- Media errors --
    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    #[error("image encoding failed: {0}")]
    ImageEncode(String),

    #[error("font loading failed: {0}")]
    Font(String),

    // -- Deck errors --
    #[error("deck generation failed: {0}")]
    Deck(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SitewerkError>;
