// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command handlers. Each handler owns the file boundary (read input, call
// the library, write output) and the user-facing stdout reporting.

use std::path::Path;

use tracing::{info, warn};

use sitewerk_core::error::{Result, SitewerkError};
use sitewerk_deck::{DeckSpec, DeckWriter};
use sitewerk_media::compose::{CardComposer, CardSpec};
use sitewerk_patch::{PatchEngine, PatchScript};

/// Apply a patch script to a text file, printing one report line per step.
pub fn patch(file: &Path, script_path: &Path, dry_run: bool) -> Result<()> {
    let document = std::fs::read_to_string(file).map_err(|err| {
        SitewerkError::Script(format!("failed to read {}: {}", file.display(), err))
    })?;

    let script = PatchScript::from_json_file(script_path)?;
    let engine = PatchEngine::new(script)?;
    let outcome = engine.apply(&document);

    for report in &outcome.reports {
        println!("{report}");
    }
    println!(
        "{}: {} applied, {} skipped, {} unmatched",
        file.display(),
        outcome.applied_count(),
        outcome
            .reports
            .iter()
            .filter(|r| r.skipped_by_guard)
            .count(),
        outcome.zero_match_count()
    );

    if outcome.zero_match_count() > 0 {
        warn!(
            unmatched = outcome.zero_match_count(),
            "Some steps matched nothing; the script may be stale"
        );
    }

    if dry_run {
        info!("Dry run, not writing {}", file.display());
        return Ok(());
    }

    std::fs::write(file, outcome.text)?;
    info!("Patched {}", file.display());
    Ok(())
}

/// Render a card spec (or the built-in default) to a PNG file.
pub fn compose(output: &Path, spec: Option<&Path>, font: Option<&Path>) -> Result<()> {
    let card_spec = match spec {
        Some(path) => CardSpec::from_json_file(path)?,
        None => CardSpec::default(),
    };

    let composer = match font {
        Some(path) => CardComposer::with_font_path(card_spec, path)?,
        None => CardComposer::with_system_font(card_spec),
    };

    composer.render_to_file(output)?;
    println!("wrote {}", output.display());
    Ok(())
}

/// Render a deck spec to a PDF file.
pub fn deck(spec: &Path, output: &Path) -> Result<()> {
    let deck_spec = DeckSpec::from_json_file(spec)?;
    let slides = deck_spec.slides.len();

    DeckWriter::new().write_to_file(&deck_spec, output)?;
    println!("wrote {} ({} slides)", output.display(), slides);
    Ok(())
}

/// Print the palette breakdown of an image to stdout.
pub fn palette(image: &Path) -> Result<()> {
    let summary = sitewerk_media::classify_file(image)?;
    println!("{}", summary.report());
    Ok(())
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_rewrites_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.tsx");
        let script = dir.path().join("steps.json");

        std::fs::write(&file, "const colour = theme.colour;").unwrap();
        std::fs::write(
            &script,
            r#"{ "steps": [ { "matcher": { "literal": "colour" }, "replacement": "color" } ] }"#,
        )
        .unwrap();

        patch(&file, &script, false).unwrap();
        let patched = std::fs::read_to_string(&file).unwrap();
        assert_eq!(patched, "const color = theme.color;");
    }

    #[test]
    fn patch_dry_run_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.tsx");
        let script = dir.path().join("steps.json");

        std::fs::write(&file, "before").unwrap();
        std::fs::write(
            &script,
            r#"{ "steps": [ { "matcher": { "literal": "before" }, "replacement": "after" } ] }"#,
        )
        .unwrap();

        patch(&file, &script, true).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "before");
    }

    #[test]
    fn patch_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("steps.json");
        std::fs::write(&script, r#"{ "steps": [] }"#).unwrap();

        let err = patch(&dir.path().join("missing.txt"), &script, false).unwrap_err();
        assert!(matches!(err, SitewerkError::Script(_)));
    }

    #[test]
    fn compose_writes_default_card() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("og.png");

        compose(&output, None, None).unwrap();

        let img = image::open(&output).unwrap().to_rgb8();
        assert_eq!((img.width(), img.height()), (1200, 630));
        assert_eq!(img.get_pixel(0, 0), &image::Rgb([11, 15, 25]));
    }

    #[test]
    fn deck_writes_pdf_from_spec() {
        let dir = tempfile::tempdir().unwrap();
        let spec = dir.path().join("deck.json");
        let output = dir.path().join("deck.pdf");

        let json = serde_json::json!({
            "title": "Test deck",
            "slides": [
                { "elements": [] },
                { "elements": [] }
            ]
        });
        std::fs::write(&spec, json.to_string()).unwrap();

        deck(&spec, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn palette_missing_image_is_fatal() {
        let err = palette(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert!(matches!(err, SitewerkError::ImageDecode(_)));
    }
}
