// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Patch engine — applies a validated script to an in-memory document.
//
// The engine never touches the filesystem. Callers read the document, run
// `apply`, inspect the reports, and decide whether to write the result back.

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use sitewerk_core::error::{Result, SitewerkError};

use crate::step::{ApplyMode, Matcher, PatchScript, PatchStep};

/// What happened when one step ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Zero-based position of the step in the script.
    pub index: usize,
    /// The step's display label.
    pub label: String,
    /// Number of occurrences replaced. Zero means the target was absent —
    /// the step was a no-op, which usually indicates a stale script.
    pub matches: usize,
    /// True when the guard substring was already present and the step was
    /// skipped without attempting a match.
    pub skipped_by_guard: bool,
}

impl std::fmt::Display for StepReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.skipped_by_guard {
            write!(f, "step {} ({}): skipped, guard present", self.index, self.label)
        } else {
            write!(
                f,
                "step {} ({}): {} match{}",
                self.index,
                self.label,
                self.matches,
                if self.matches == 1 { "" } else { "es" }
            )
        }
    }
}

/// Result of running a full script: the final document plus one report per
/// step, in script order.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub text: String,
    pub reports: Vec<StepReport>,
}

impl PatchOutcome {
    /// Steps that actually changed the document.
    pub fn applied_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| !r.skipped_by_guard && r.matches > 0)
            .count()
    }

    /// Steps that ran but matched nothing.
    pub fn zero_match_count(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| !r.skipped_by_guard && r.matches == 0)
            .count()
    }
}

/// One script step with its regex pre-compiled.
struct CompiledStep {
    step: PatchStep,
    regex: Option<Regex>,
}

/// Applies a patch script to documents.
///
/// Construction compiles every regex pattern once; `apply` can then be called
/// repeatedly (for example to verify idempotence) without re-parsing.
pub struct PatchEngine {
    steps: Vec<CompiledStep>,
}

impl PatchEngine {
    /// Build an engine from a validated script.
    pub fn new(script: PatchScript) -> Result<Self> {
        let mut steps = Vec::with_capacity(script.steps.len());
        for (index, step) in script.steps.into_iter().enumerate() {
            let regex = match &step.matcher {
                Matcher::Literal(_) => None,
                Matcher::Pattern(pattern) => Some(Regex::new(pattern).map_err(|err| {
                    SitewerkError::Pattern(format!("step {index} ({pattern:?}): {err}"))
                })?),
            };
            steps.push(CompiledStep { step, regex });
        }
        Ok(Self { steps })
    }

    /// Number of steps in the script.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order against `document` and return the final text
    /// with per-step reports.
    ///
    /// Each step observes the output of the previous step, never the original
    /// document. A step whose guard substring is already present is skipped.
    /// A step whose target is absent is a reported no-op, logged as a warning
    /// so stale scripts are noticed.
    #[instrument(skip_all, fields(steps = self.steps.len(), doc_len = document.len()))]
    pub fn apply(&self, document: &str) -> PatchOutcome {
        let mut text = document.to_owned();
        let mut reports = Vec::with_capacity(self.steps.len());

        for (index, compiled) in self.steps.iter().enumerate() {
            let step = &compiled.step;
            let label = step.display_label();

            if let Some(guard) = &step.guard {
                if text.contains(guard.as_str()) {
                    debug!(index, label = %label, "Guard present, skipping step");
                    reports.push(StepReport {
                        index,
                        label,
                        matches: 0,
                        skipped_by_guard: true,
                    });
                    continue;
                }
            }

            let (next, matches) = apply_step(&text, step, compiled.regex.as_ref());
            if matches == 0 {
                warn!(index, label = %label, "Patch step matched nothing");
            } else {
                debug!(index, label = %label, matches, "Patch step applied");
            }

            text = next;
            reports.push(StepReport {
                index,
                label,
                matches,
                skipped_by_guard: false,
            });
        }

        info!(
            applied = reports.iter().filter(|r| r.matches > 0).count(),
            skipped = reports.iter().filter(|r| r.skipped_by_guard).count(),
            "Patch script complete"
        );

        PatchOutcome { text, reports }
    }
}

/// Apply a single step to `text`, returning the new text and the number of
/// occurrences replaced.
fn apply_step(text: &str, step: &PatchStep, regex: Option<&Regex>) -> (String, usize) {
    match (&step.matcher, regex) {
        (Matcher::Literal(target), _) => {
            if target.is_empty() {
                // An empty literal would match everywhere; treat as a no-op.
                return (text.to_owned(), 0);
            }
            let occurrences = text.matches(target.as_str()).count();
            match step.mode {
                ApplyMode::First => {
                    let replaced = text.replacen(target.as_str(), &step.replacement, 1);
                    (replaced, occurrences.min(1))
                }
                ApplyMode::All => {
                    let replaced = text.replace(target.as_str(), &step.replacement);
                    (replaced, occurrences)
                }
            }
        }
        (Matcher::Pattern(_), Some(re)) => {
            let occurrences = re.find_iter(text).count();
            match step.mode {
                ApplyMode::First => {
                    let replaced = re.replace(text, step.replacement.as_str());
                    (replaced.into_owned(), occurrences.min(1))
                }
                ApplyMode::All => {
                    let replaced = re.replace_all(text, step.replacement.as_str());
                    (replaced.into_owned(), occurrences)
                }
            }
        }
        // Unreachable: `PatchEngine::new` compiles a regex for every
        // `Pattern` step.
        (Matcher::Pattern(_), None) => (text.to_owned(), 0),
    }
}

// -- Tests --------------------------------------------------------------------
