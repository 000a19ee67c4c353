//! Domain types for extracted slide content and classification results.

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Text extracted from a single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based slide number.
    pub slide_number: usize,

    /// Text of the title placeholder, untrimmed. Empty if the slide has none.
    pub slide_title: String,

    /// Trimmed, non-empty text of each shape, in shape order.
    pub slide_content: Vec<String>,
}

impl SlideRecord {
    /// Create an empty slide with the given number.
    pub fn new(slide_number: usize) -> Self {
        Self {
            slide_number,
            slide_title: String::new(),
            slide_content: Vec::new(),
        }
    }

    /// Set the slide title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.slide_title = title.into();
        self
    }

    /// Append shape text. Blank text is ignored, anything else is stored trimmed.
    pub fn add_content(&mut self, text: &str) {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            self.slide_content.push(trimmed.to_string());
        }
    }

    /// Whether the slide carries any title or content text.
    pub fn has_text(&self) -> bool {
        !self.slide_title.is_empty() || !self.slide_content.is_empty()
    }
}

/// All slides of one presentation, in document order.
///
/// Serialized as a bare JSON array of slides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckRecord {
    slides: Vec<SlideRecord>,
}

impl DeckRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slide to the end of the deck.
    pub fn push_slide(&mut self, slide: SlideRecord) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

impl From<Vec<SlideRecord>> for DeckRecord {
    fn from(slides: Vec<SlideRecord>) -> Self {
        Self { slides }
    }
}

/// Every successfully extracted deck, keyed by presentation file name.
///
/// Keys iterate in lexicographic order, which is also the order the
/// extractor processes files in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinedStore {
    decks: BTreeMap<String, DeckRecord>,
}

impl CombinedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a deck, replacing any previous deck with the same name.
    pub fn insert(&mut self, file_name: impl Into<String>, deck: DeckRecord) {
        self.decks.insert(file_name.into(), deck);
    }

    pub fn get(&self, file_name: &str) -> Option<&DeckRecord> {
        self.decks.get(file_name)
    }

    /// Iterate decks by file name.
    pub fn decks(&self) -> impl Iterator<Item = (&str, &DeckRecord)> {
        self.decks.iter().map(|(name, deck)| (name.as_str(), deck))
    }

    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    /// Total slides across all decks.
    pub fn slide_count(&self) -> usize {
        self.decks.values().map(DeckRecord::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }
}

/// One slide qualifying for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatch {
    /// Presentation file name the slide came from.
    pub deck: String,
    pub slide_number: usize,
    pub slide_title: String,
    pub content: Vec<String>,
}

impl CategoryMatch {
    /// Snapshot a slide from the named deck.
    pub fn from_slide(deck: &str, slide: &SlideRecord) -> Self {
        Self {
            deck: deck.to_string(),
            slide_number: slide.slide_number,
            slide_title: slide.slide_title.clone(),
            content: slide.slide_content.clone(),
        }
    }
}

/// Classified slides grouped by category.
///
/// Every category is always present, possibly with no matches. Within a
/// category, matches keep the order they were added and are unique by
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Category, Vec<CategoryMatch>>",
    into = "BTreeMap<Category, Vec<CategoryMatch>>"
)]
pub struct KeyInformation {
    categories: BTreeMap<Category, Vec<CategoryMatch>>,
}

impl KeyInformation {
    /// Create an instance with every category present and empty.
    pub fn new() -> Self {
        Self {
            categories: Category::ALL.iter().map(|&c| (c, Vec::new())).collect(),
        }
    }

    /// Add a match to a category. Returns false if an equal match was
    /// already recorded there.
    pub fn add(&mut self, category: Category, entry: CategoryMatch) -> bool {
        let matches = self.categories.entry(category).or_default();
        if matches.contains(&entry) {
            return false;
        }
        matches.push(entry);
        true
    }

    /// Matches recorded for a category, in insertion order.
    pub fn matches(&self, category: Category) -> &[CategoryMatch] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate categories in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[CategoryMatch])> {
        self.categories.iter().map(|(&c, m)| (c, m.as_slice()))
    }

    /// Number of matches across all categories.
    pub fn total_matches(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}

impl Default for KeyInformation {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Category, Vec<CategoryMatch>>> for KeyInformation {
    fn from(mut categories: BTreeMap<Category, Vec<CategoryMatch>>) -> Self {
        for category in Category::ALL {
            categories.entry(category).or_default();
        }
        Self { categories }
    }
}

impl From<KeyInformation> for BTreeMap<Category, Vec<CategoryMatch>> {
    fn from(info: KeyInformation) -> Self {
        info.categories
    }
}
