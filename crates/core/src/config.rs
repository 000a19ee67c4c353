//! Input and output locations for the analysis stages.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension of presentation files picked up by the extractor.
pub const PRESENTATION_EXTENSION: &str = "pptx";

/// Suffix appended to a deck's file stem for its standalone JSON export.
pub const DECK_OUTPUT_SUFFIX: &str = "_analysis.json";

/// File name of the combined deck export.
pub const COMBINED_FILE_NAME: &str = "combined_analysis.json";

/// File name of the categorized export.
pub const KEY_INFORMATION_FILE_NAME: &str = "key_information.json";

/// File name of the markdown summary.
pub const REPORT_FILE_NAME: &str = "business_analysis_summary.md";

/// Directories read and written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPaths {
    /// Directory scanned for presentation files.
    pub input_dir: PathBuf,

    /// Directory all JSON and markdown artifacts are written to.
    pub output_dir: PathBuf,
}

impl AnalysisPaths {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Paths for a stage that only touches the analysis directory.
    pub fn analysis_only(output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self {
            input_dir: output_dir.clone(),
            output_dir,
        }
    }

    /// Standalone export path for a deck, e.g. `Deck1.pptx` -> `Deck1_analysis.json`.
    pub fn deck_output_path(&self, file_name: &str) -> PathBuf {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        self.output_dir.join(format!("{}{}", stem, DECK_OUTPUT_SUFFIX))
    }

    pub fn combined_path(&self) -> PathBuf {
        self.output_dir.join(COMBINED_FILE_NAME)
    }

    pub fn key_information_path(&self) -> PathBuf {
        self.output_dir.join(KEY_INFORMATION_FILE_NAME)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE_NAME)
    }

    /// Create the output directory if it does not exist.
    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| Error::io(&self.output_dir, e))
    }
}

/// Whether a file name carries the presentation extension (case-insensitive).
pub fn is_presentation_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(PRESENTATION_EXTENSION))
        .unwrap_or(false)
}
