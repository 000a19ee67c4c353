//! CLI tool for extracting and classifying pitch deck content.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_core::report::DEFAULT_REPORT_TITLE;
use deck_core::{pipeline, AnalysisPaths, Classifier, KeyInformation, ReportRenderer};
use deck_pptx::{ExtractionSummary, Extractor};
use std::path::PathBuf;

/// Extract slide text from pitch decks and summarize it by business category.
#[derive(Parser, Debug)]
#[command(name = "deck-analyze")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract slide text from every .pptx file in a directory
    Extract {
        /// Directory containing .pptx files
        input_dir: PathBuf,

        /// Directory to write the JSON exports to
        output_dir: PathBuf,
    },

    /// Classify a previous extraction and write the summary report
    Classify {
        /// Directory holding combined_analysis.json
        analysis_dir: PathBuf,

        /// Top-level heading of the markdown report
        #[arg(short, long, default_value = DEFAULT_REPORT_TITLE)]
        title: String,
    },

    /// Extract, then classify
    Run {
        /// Directory containing .pptx files
        input_dir: PathBuf,

        /// Directory to write all outputs to
        output_dir: PathBuf,

        /// Top-level heading of the markdown report
        #[arg(short, long, default_value = DEFAULT_REPORT_TITLE)]
        title: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match args.command {
        Command::Extract {
            input_dir,
            output_dir,
        } => {
            extract(&AnalysisPaths::new(input_dir, output_dir))?;
        }
        Command::Classify {
            analysis_dir,
            title,
        } => {
            classify(&AnalysisPaths::analysis_only(analysis_dir), &title)?;
        }
        Command::Run {
            input_dir,
            output_dir,
            title,
        } => {
            let paths = AnalysisPaths::new(input_dir, output_dir);
            extract(&paths)?;
            classify(&paths, &title)?;
        }
    }

    Ok(())
}

/// Run the extraction stage.
fn extract(paths: &AnalysisPaths) -> Result<ExtractionSummary> {
    let summary = Extractor::new(paths.clone())
        .run()
        .with_context(|| format!("Extraction from {} failed", paths.input_dir.display()))?;

    log::info!(
        "Extracted {} slides from {} decks",
        summary.store.slide_count(),
        summary.store.deck_count()
    );
    if !summary.failures.is_empty() {
        log::warn!("{} file(s) skipped:", summary.failures.len());
        for failure in &summary.failures {
            log::warn!("  {}: {}", failure.file_name, failure.reason);
        }
    }

    Ok(summary)
}

/// Run the classification and report stage.
fn classify(paths: &AnalysisPaths, title: &str) -> Result<KeyInformation> {
    let renderer = ReportRenderer::new().with_title(title);
    let info = pipeline::analyze(paths, &Classifier::new(), &renderer)
        .with_context(|| format!("Classification in {} failed", paths.output_dir.display()))?;

    log::info!("Found {} category matches", info.total_matches());

    Ok(info)
}
