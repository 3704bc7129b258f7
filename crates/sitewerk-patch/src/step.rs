// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Patch step and patch script definitions.
//
// A script is an ordered list of steps supplied as JSON data. Regex patterns
// are validated when the script is loaded, so a malformed pattern fails fast
// instead of halfway through a run.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use sitewerk_core::error::{Result, SitewerkError};

/// What a patch step matches against the current document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Matcher {
    /// Exact literal text.
    Literal(String),
    /// A regular expression. The replacement may reference capture groups
    /// with `$1`, `$name`, etc.
    Pattern(String),
}

/// Whether a step replaces only the first match or every match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    First,
    /// Replace every non-overlapping match (the default).
    #[default]
    All,
}

/// One match/replace unit of a patch script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchStep {
    /// Optional human-readable label used in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub matcher: Matcher,
    pub replacement: String,
    /// Idempotency guard: if this substring is present in the current
    /// document the step is skipped entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<String>,
    #[serde(default)]
    pub mode: ApplyMode,
}

impl PatchStep {
    /// A literal replace-all step with no guard.
    pub fn literal(target: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            name: None,
            matcher: Matcher::Literal(target.into()),
            replacement: replacement.into(),
            guard: None,
            mode: ApplyMode::All,
        }
    }

    /// A regex replace-all step with no guard.
    pub fn pattern(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            name: None,
            matcher: Matcher::Pattern(pattern.into()),
            replacement: replacement.into(),
            guard: None,
            mode: ApplyMode::All,
        }
    }

    /// Attach a guard substring.
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    /// Set the apply mode.
    pub fn with_mode(mut self, mode: ApplyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Label used in reports and logs: the explicit name if set, otherwise a
    /// short preview of the match target.
    pub fn display_label(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let target = match &self.matcher {
            Matcher::Literal(t) => t,
            Matcher::Pattern(p) => p,
        };
        let preview: String = target.chars().take(32).collect();
        if preview.len() < target.len() {
            format!("{preview}…")
        } else {
            preview
        }
    }
}

/// An ordered patch script, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchScript {
    pub steps: Vec<PatchStep>,
}

impl PatchScript {
    pub fn new(steps: Vec<PatchStep>) -> Self {
        Self { steps }
    }

    /// Parse a script from a JSON string and validate every regex pattern.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let script: PatchScript = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    /// Load a script from a JSON file. A missing file is fatal.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|err| {
            SitewerkError::Script(format!(
                "failed to read patch script {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        let script = Self::from_json_str(&json)?;
        info!(steps = script.steps.len(), "Patch script loaded");
        Ok(script)
    }

    /// Check that every `Pattern` matcher compiles.
    pub fn validate(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            if let Matcher::Pattern(pattern) = &step.matcher {
                Regex::new(pattern).map_err(|err| {
                    SitewerkError::Pattern(format!("step {index} ({pattern:?}): {err}"))
                })?;
            }
        }
        debug!(steps = self.steps.len(), "Patch script validated");
        Ok(())
    }
}

// -- Tests --------------------------------------------------------------------
