//! Directory-level extraction stage.
//!
//! Every `.pptx` file in the input directory is parsed into a deck record
//! and written out on its own, then all decks are written as one combined
//! document. A file that fails to parse is logged and left out.

use crate::parser::PptxParser;
use deck_core::config::is_presentation_file;
use deck_core::{store, AnalysisPaths, CombinedStore, DeckRecord, Error, Result};
use std::path::{Path, PathBuf};

/// A presentation that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

/// Outcome of an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractionSummary {
    /// Decks that were extracted and saved.
    pub store: CombinedStore,

    /// Files that were skipped.
    pub failures: Vec<FileFailure>,
}

/// Runs the extraction stage over a directory.
pub struct Extractor {
    paths: AnalysisPaths,
    parser: PptxParser,
}

impl Extractor {
    pub fn new(paths: AnalysisPaths) -> Self {
        Self {
            paths,
            parser: PptxParser::new(),
        }
    }

    /// Extract every presentation and write the per-deck and combined exports.
    ///
    /// Fails only if the input directory cannot be listed, the output
    /// directory cannot be created, or the combined export cannot be written.
    pub fn run(&self) -> Result<ExtractionSummary> {
        let (files, mut failures) = self.list_presentations()?;
        self.paths.ensure_output_dir()?;

        let mut combined = CombinedStore::new();

        for (file_name, path) in files {
            log::info!("Analyzing: {}", file_name);

            match self.process_file(&file_name, &path) {
                Ok(deck) => {
                    combined.insert(file_name, deck);
                }
                Err(e) => {
                    log::error!("Error processing {}: {}", file_name, e);
                    failures.push(FileFailure {
                        file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let combined_path = self.paths.combined_path();
        store::save_combined(&combined_path, &combined)?;
        log::info!("Saved combined analysis to: {}", combined_path.display());

        Ok(ExtractionSummary {
            store: combined,
            failures,
        })
    }

    /// Parse one file and write its standalone export.
    fn process_file(&self, file_name: &str, path: &Path) -> Result<DeckRecord> {
        let deck = self.parser.parse_file(path)?;

        let output_path = self.paths.deck_output_path(file_name);
        store::save_deck(&output_path, &deck)?;
        log::info!("Saved analysis to: {}", output_path.display());

        Ok(deck)
    }

    /// Presentation files in the input directory, sorted by file name,
    /// along with any that cannot be processed because of their name.
    fn list_presentations(&self) -> Result<(Vec<(String, PathBuf)>, Vec<FileFailure>)> {
        let input_dir = &self.paths.input_dir;
        if !input_dir.is_dir() {
            return Err(Error::NotADirectory(input_dir.clone()));
        }

        let entries = std::fs::read_dir(input_dir).map_err(|e| Error::io(input_dir, e))?;
        let mut files = Vec::new();
        let mut failures = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| Error::io(input_dir, e))?;
            let path = entry.path();

            if !is_presentation_file(&path) {
                continue;
            }
            if !path.is_file() {
                log::debug!("Skipping non-file entry {}", path.display());
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => files.push((name, path)),
                Err(name) => {
                    let file_name = name.to_string_lossy().into_owned();
                    log::error!("Error processing {}: file name is not valid UTF-8", file_name);
                    failures.push(FileFailure {
                        file_name,
                        reason: "file name is not valid UTF-8".to_string(),
                    });
                }
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        failures.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok((files, failures))
    }
}
