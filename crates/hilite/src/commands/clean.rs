//! Clean command — strip every annotation from documents.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{instrument, warn};

use hilite_core::engine::Document;

use crate::output;
use crate::pdf::PdfDocument;

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Directory scanned for input documents
    #[arg(short, long, default_value = "./input/")]
    pub input: Utf8PathBuf,

    /// Directory cleaned copies are written to
    #[arg(short, long, default_value = "./output/")]
    pub output: Utf8PathBuf,

    /// Process a single document instead of the whole input directory
    #[arg(short, long, value_name = "NAME")]
    pub file: Option<String>,

    /// Replace each input in place, keeping the original as a .bkp sibling
    #[arg(short, long)]
    pub backup_and_replace: bool,
}

#[derive(Serialize)]
struct CleanReport<'a> {
    file: &'a str,
    saved_to: &'a str,
    removed: usize,
}

/// Remove all annotations from each target document.
#[instrument(name = "cmd_clean", skip_all)]
pub fn cmd_clean(args: CleanArgs, global_json: bool) -> anyhow::Result<()> {
    super::require_dir(&args.input, "input")?;
    if !args.backup_and_replace {
        super::require_dir(&args.output, "output")?;
    }

    let targets = super::resolve_targets(&args.input, args.file.as_deref())?;
    if targets.is_empty() {
        bail!("no PDF documents found in {}", args.input);
    }

    let mut failures = 0_usize;
    for path in &targets {
        if let Err(err) = clean_one(path, &args, global_json) {
            failures += 1;
            warn!(file = %path, error = %err, "document failed");
            eprintln!("{}: {err:#}", path.as_str().red());
        }
    }
    if failures > 0 {
        bail!("{failures} of {} document(s) failed", targets.len());
    }
    Ok(())
}

fn clean_one(path: &Utf8Path, args: &CleanArgs, json: bool) -> anyhow::Result<()> {
    let mut doc = PdfDocument::open(path).with_context(|| format!("failed to open {path}"))?;
    let removed = doc
        .clear_annotations()
        .with_context(|| format!("failed to clean {path}"))?;

    let saved_to = if args.backup_and_replace {
        output::backup_and_replace(path, |tmp| {
            doc.save(tmp)?;
            Ok(())
        })?;
        path.to_owned()
    } else {
        let stem = path.file_stem().unwrap_or("document");
        let dest = args.output.join(format!("{stem}_cleaned.pdf"));
        doc.save(&dest)
            .with_context(|| format!("failed to save {dest}"))?;
        dest
    };

    if json {
        let report = CleanReport {
            file: path.as_str(),
            saved_to: saved_to.as_str(),
            removed,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {} annotation(s) {} {}",
            "removed".green(),
            removed,
            "→".dimmed(),
            saved_to.as_str().cyan()
        );
    }
    Ok(())
}
