//! PPTX (Office Open XML) slide text extraction for pitch deck analysis.
//!
//! Parses .pptx files, which are ZIP archives containing XML documents,
//! and runs the directory-level extraction stage.

pub mod extractor;
pub mod parser;

pub use extractor::{ExtractionSummary, Extractor, FileFailure};
pub use parser::PptxParser;
