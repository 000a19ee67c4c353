//! Keyword triggers for each category.

use crate::category::Category;

/// Built-in triggers, in category declaration order.
const DEFAULT_KEYWORDS: [(Category, &[&str]); 9] = [
    (
        Category::ServicesAndOfferings,
        &["service", "offering", "solution", "product", "provide", "deliver"],
    ),
    (
        Category::ValuePropositions,
        &["value", "benefit", "advantage", "impact", "roi", "return", "improve"],
    ),
    (
        Category::TargetMarkets,
        &["market", "industry", "sector", "client", "customer", "audience", "segment"],
    ),
    (
        Category::PastClients,
        &["client", "customer", "partner", "work with", "worked with", "portfolio"],
    ),
    (
        Category::CaseStudies,
        &["case study", "success story", "project", "result", "outcome"],
    ),
    (
        Category::TeamInformation,
        &["team", "expert", "specialist", "leadership", "founder", "experience"],
    ),
    (
        Category::Methodologies,
        &["method", "approach", "process", "framework", "strategy", "technique"],
    ),
    (
        Category::Technologies,
        &["technology", "tech", "platform", "tool", "software", "system", "ai", "ml"],
    ),
    (
        Category::UniqueSellingPoints,
        &["unique", "different", "competitive", "advantage", "usp", "stand out"],
    ),
];

/// Mapping from category to its lowercase substring triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<(Category, Vec<String>)>,
}

impl KeywordTable {
    /// Build a table from explicit entries. Triggers are lowercased.
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, K)>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let mut table = Self {
            entries: Vec::new(),
        };
        for (category, keywords) in entries {
            for keyword in keywords {
                table.push(category, keyword.as_ref());
            }
        }
        table
    }

    /// Add a trigger to a category.
    pub fn with_keyword(mut self, category: Category, keyword: &str) -> Self {
        self.push(category, keyword);
        self
    }

    /// Blank triggers are dropped, since they would match every slide.
    fn push(&mut self, category: Category, keyword: &str) {
        let keyword = keyword.to_lowercase();
        if keyword.trim().is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some((_, keywords)) => {
                if !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }
            None => self.entries.push((category, vec![keyword])),
        }
    }

    /// Triggers for a category, empty if it has none.
    pub fn keywords(&self, category: Category) -> &[String] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, keywords)| keywords.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any trigger of `category` occurs in either lowercased text.
    ///
    /// Plain substring containment: "ai" matches inside "maintain".
    pub fn matches(&self, category: Category, title_lower: &str, content_lower: &str) -> bool {
        self.keywords(category)
            .iter()
            .any(|kw| title_lower.contains(kw.as_str()) || content_lower.contains(kw.as_str()))
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().map(|(c, kws)| (*c, kws.iter())))
    }
}
