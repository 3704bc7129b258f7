// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sitewerk — site-maintenance toolkit CLI.
//
// Entry point. Initialises logging, parses the command line, and dispatches
// to the command handlers. All real work lives in the library crates; the
// CLI only moves bytes between the filesystem and the libraries.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitewerk")]
#[command(about = "Site-maintenance toolkit: text patching, card rendering, deck generation, palette analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a patch script to a text file.
    Patch {
        /// File to patch (rewritten in place unless --dry-run).
        #[arg(long)]
        file: PathBuf,
        /// JSON patch script with the ordered step list.
        #[arg(long)]
        script: PathBuf,
        /// Report what would change without writing the file back.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Render a social-preview card to a PNG.
    Compose {
        /// Output PNG path.
        #[arg(long)]
        output: PathBuf,
        /// Optional JSON card spec; the built-in default is used when omitted.
        #[arg(long)]
        spec: Option<PathBuf>,
        /// Optional TTF/OTF font path; system fonts are probed when omitted.
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// Render a slide deck spec to a PDF.
    Deck {
        /// JSON deck spec.
        #[arg(long)]
        spec: PathBuf,
        /// Output PDF path.
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the dark/light/colored pixel breakdown of an image.
    Palette {
        /// Image to analyse.
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Patch {
            file,
            script,
            dry_run,
        } => commands::patch(&file, &script, dry_run),
        Commands::Compose {
            output,
            spec,
            font,
        } => commands::compose(&output, spec.as_deref(), font.as_deref()),
        Commands::Deck { spec, output } => commands::deck(&spec, &output),
        Commands::Palette { image } => commands::palette(&image),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
