//! Restore command — put `.bkp` originals back in place.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::output;

/// Arguments for the `restore` subcommand.
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Directory scanned for .bkp backups
    #[arg(short, long, default_value = "./input/")]
    pub input: Utf8PathBuf,

    /// Restore a single document instead of every backup
    #[arg(short, long, value_name = "NAME")]
    pub file: Option<String>,
}

#[derive(Serialize)]
struct RestoreReport<'a> {
    restored: &'a [Utf8PathBuf],
}

/// Replace edited documents with their backed-up originals.
#[instrument(name = "cmd_restore", skip_all)]
pub fn cmd_restore(args: RestoreArgs, global_json: bool) -> anyhow::Result<()> {
    super::require_dir(&args.input, "input")?;

    let targets = match args.file.as_deref() {
        Some(name) => {
            let stem = name.strip_suffix(".pdf").unwrap_or(name);
            vec![args.input.join(format!("{stem}.pdf"))]
        }
        None => output::backed_up_documents(&args.input)?,
    };
    if targets.is_empty() {
        bail!("no backups found in {}", args.input);
    }

    let mut restored = Vec::new();
    let mut failures = 0_usize;
    for path in &targets {
        match output::restore_backup(path) {
            Ok(()) => restored.push(path.clone()),
            Err(err) => {
                failures += 1;
                warn!(file = %path, error = %err, "restore failed");
                eprintln!("{}: {err:#}", path.as_str().red());
            }
        }
    }

    if global_json {
        let report = RestoreReport {
            restored: &restored,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for path in &restored {
            println!("{} {}", "restored".green(), path.as_str().cyan());
        }
    }
    if failures > 0 {
        bail!("{failures} of {} backup(s) failed to restore", targets.len());
    }
    Ok(())
}
