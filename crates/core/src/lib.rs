//! Core slide records, keyword classification, and markdown reporting
//! for pitch deck analysis.

pub mod category;
pub mod classify;
pub mod config;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod types;

pub use category::Category;
pub use classify::Classifier;
pub use config::AnalysisPaths;
pub use error::{Error, Result};
pub use keywords::KeywordTable;
pub use report::ReportRenderer;
pub use types::{CategoryMatch, CombinedStore, DeckRecord, KeyInformation, SlideRecord};
