//! Keyword classification of slides into business categories.

use crate::category::Category;
use crate::keywords::KeywordTable;
use crate::types::{CategoryMatch, CombinedStore, KeyInformation, SlideRecord};

/// Scans slides against a keyword table.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    keywords: KeywordTable,
}

impl Classifier {
    /// Create a classifier using the built-in keyword table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom keyword table.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    /// Categories whose triggers occur in the slide's title or content.
    ///
    /// Matching is case-insensitive substring containment. Content
    /// fragments are joined with single spaces before matching, so a
    /// phrase may span two fragments.
    pub fn categorize(&self, slide: &SlideRecord) -> Vec<Category> {
        let title_lower = slide.slide_title.to_lowercase();
        let content_lower = slide.slide_content.join(" ").to_lowercase();

        Category::ALL
            .iter()
            .copied()
            .filter(|&c| self.keywords.matches(c, &title_lower, &content_lower))
            .collect()
    }

    /// Classify every slide of every deck.
    pub fn classify(&self, store: &CombinedStore) -> KeyInformation {
        let mut info = KeyInformation::new();

        for (deck_name, deck) in store.decks() {
            log::info!("Analyzing key information from: {}", deck_name);

            for slide in deck.slides() {
                for category in self.categorize(slide) {
                    let added = info.add(category, CategoryMatch::from_slide(deck_name, slide));
                    if added {
                        log::debug!(
                            "{} slide {} -> {}",
                            deck_name,
                            slide.slide_number,
                            category
                        );
                    }
                }
            }
        }

        for (category, matches) in info.iter() {
            log::debug!("{}: {} matching slides", category, matches.len());
        }

        info
    }
}
