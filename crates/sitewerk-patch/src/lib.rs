// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sitewerk-patch — Sequential text-patch pipeline.
//
// Applies an ordered list of guarded literal/regex substitutions to a text
// document held in memory. Each step sees the output of the previous one;
// steps whose guard string is already present are skipped, which makes
// re-running a script against an already-patched document safe. Steps that
// match nothing are reported (and logged as warnings) rather than failing.
//
// File I/O stays at the caller's boundary: load, apply, save.

pub mod engine;
pub mod step;

pub use engine::{PatchEngine, PatchOutcome, StepReport};
pub use step::{ApplyMode, Matcher, PatchScript, PatchStep};
