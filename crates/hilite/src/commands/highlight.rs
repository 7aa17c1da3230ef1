//! Highlight command — rank the salient words and mark every occurrence.

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use hilite_core::config::Config;
use hilite_core::engine::Document;
use hilite_core::pipeline::{self, PodiumEntry};
use hilite_core::salience::SalienceOptions;
use hilite_core::stopwords::Language;

use crate::output;
use crate::pdf::PdfDocument;

/// Arguments for the `highlight` subcommand.
#[derive(Args, Debug)]
pub struct HighlightArgs {
    /// A word must occur strictly more often than this to qualify
    #[arg(
        short = 'c',
        long,
        value_name = "COUNT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub threshold_occurrence: Option<u64>,

    /// How many top words to highlight
    #[arg(
        short = 'p',
        long,
        value_name = "COUNT",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub threshold_podium: Option<usize>,

    /// Directory scanned for input documents
    #[arg(short, long, default_value = "./input/")]
    pub input: Utf8PathBuf,

    /// Directory highlighted copies are written to
    #[arg(short, long, default_value = "./output/")]
    pub output: Utf8PathBuf,

    /// Process a single document instead of the whole input directory
    #[arg(short, long, value_name = "NAME")]
    pub file: Option<String>,

    /// Replace each input in place, keeping the original as a .bkp sibling
    #[arg(short, long)]
    pub backup_and_replace: bool,

    /// Stop-word language
    #[arg(long, value_enum)]
    pub language: Option<Language>,

    /// Seed the color generator for a reproducible palette
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Serialize)]
struct HighlightReport<'a> {
    file: &'a str,
    saved_to: &'a str,
    annotations: usize,
    words: &'a [PodiumEntry],
}

/// Highlight the most represented words of each target document.
#[instrument(name = "cmd_highlight", skip_all)]
pub fn cmd_highlight(args: HighlightArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    super::require_dir(&args.input, "input")?;
    if !args.backup_and_replace {
        super::require_dir(&args.output, "output")?;
    }

    // CLI flag beats config file beats built-in default
    let defaults = SalienceOptions::default();
    let opts = SalienceOptions {
        threshold_occurrence: args
            .threshold_occurrence
            .or(config.threshold_occurrence)
            .unwrap_or(defaults.threshold_occurrence),
        threshold_podium: args
            .threshold_podium
            .or(config.threshold_podium)
            .unwrap_or(defaults.threshold_podium),
        language: args.language.or(config.language).unwrap_or(defaults.language),
    };
    debug!(
        threshold_occurrence = opts.threshold_occurrence,
        threshold_podium = opts.threshold_podium,
        language = %opts.language,
        "salience options resolved"
    );

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let targets = super::resolve_targets(&args.input, args.file.as_deref())?;
    if targets.is_empty() {
        bail!("no PDF documents found in {}", args.input);
    }

    let mut failures = 0_usize;
    for path in &targets {
        if let Err(err) = highlight_one(path, &args, &opts, &mut rng, global_json) {
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

fn highlight_one(
    path: &Utf8Path,
    args: &HighlightArgs,
    opts: &SalienceOptions,
    rng: &mut StdRng,
    json: bool,
) -> anyhow::Result<()> {
    let mut doc = PdfDocument::open(path).with_context(|| format!("failed to open {path}"))?;
    let podium =
        pipeline::analyze(&doc, opts, rng).with_context(|| format!("failed to analyze {path}"))?;
    if podium.is_empty() {
        info!(file = %path, "no salient words; saving an unmarked copy");
    }

    let placed = if json || podium.is_empty() {
        pipeline::highlight_podium(&mut doc, &podium)?
    } else {
        print_swatches(path, &podium);
        highlight_with_progress(&mut doc, &podium)?
    };

    let saved_to = if args.backup_and_replace {
        output::backup_and_replace(path, |tmp| {
            doc.save(tmp)?;
            Ok(())
        })?;
        path.to_owned()
    } else {
        let stem = path.file_stem().unwrap_or("document");
        let dest = args.output.join(format!("{stem}_highlighted.pdf"));
        doc.save(&dest)
            .with_context(|| format!("failed to save {dest}"))?;
        dest
    };

    if json {
        let report = HighlightReport {
            file: path.as_str(),
            saved_to: saved_to.as_str(),
            annotations: placed,
            words: &podium,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {} annotation(s) {} {}",
            "placed".green(),
            placed,
            "→".dimmed(),
            saved_to.as_str().cyan()
        );
    }
    Ok(())
}

fn highlight_with_progress(doc: &mut PdfDocument, podium: &[PodiumEntry]) -> anyhow::Result<usize> {
    let bar = ProgressBar::new(podium.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let mut total = 0;
    for entry in podium {
        bar.set_message(entry.word.clone());
        total += pipeline::highlight_word(doc, &entry.word, entry.color)?;
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(total)
}

/// One line per podium word, on its assigned highlight color.
fn print_swatches(path: &Utf8Path, podium: &[PodiumEntry]) {
    let name = path.file_name().unwrap_or(path.as_str());
    println!(
        "The most represented words in {} are:",
        name.bold()
    );
    for entry in podium {
        let (r, g, b) = entry.color.to_rgb8();
        println!(
            "  {}  {}  {}",
            format!("{:>6}", format!("×{}", entry.count)).dimmed(),
            format!(" {} ", entry.word).black().on_truecolor(r, g, b),
            format!(
                "rgb({:.2}, {:.2}, {:.2})",
                entry.color.r, entry.color.g, entry.color.b
            )
            .dimmed()
        );
    }
}
