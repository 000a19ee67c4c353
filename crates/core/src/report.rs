//! Markdown summary report output.
//!
//! Sections follow category declaration order. Inside a section, matches
//! are grouped by deck in the order each deck was first seen.

use crate::types::{CategoryMatch, KeyInformation};

/// Title used when none is configured.
pub const DEFAULT_REPORT_TITLE: &str = "Jade Kite Business Analysis Summary";

/// Line emitted under a category heading with no matches.
pub const NO_MATCHES_LINE: &str = "No specific information found in the pitch decks.";

/// Renders classified slides as a markdown document.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    title: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
        }
    }
}

impl ReportRenderer {
    /// Create a renderer with the default title.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-level heading of the report.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render the full report.
    ///
    /// # Example output
    /// ```text
    /// # Jade Kite Business Analysis Summary
    ///
    /// ## Team Information
    ///
    /// ### From Deck1.pptx
    ///
    /// **Slide 1: Our Team**
    ///
    /// - We have 10 experts
    /// - Founded in 2015
    ///
    /// ```
    pub fn render(&self, info: &KeyInformation) -> String {
        let mut report = format!("# {}\n\n", self.title);

        for (category, matches) in info.iter() {
            report.push_str(&format!("## {}\n\n", category.display_name()));

            if matches.is_empty() {
                report.push_str(NO_MATCHES_LINE);
                report.push_str("\n\n");
                continue;
            }

            for (deck, deck_matches) in group_by_deck(matches) {
                report.push_str(&format!("### From {}\n\n", deck));

                for entry in deck_matches {
                    report.push_str(&format!(
                        "**Slide {}: {}**\n\n",
                        entry.slide_number, entry.slide_title
                    ));
                    for fragment in &entry.content {
                        if !fragment.trim().is_empty() {
                            report.push_str(&format!("- {}\n", fragment));
                        }
                    }
                    report.push('\n');
                }
            }
        }

        report
    }
}

/// Group matches by deck name, keeping first-seen deck order.
fn group_by_deck(matches: &[CategoryMatch]) -> Vec<(&str, Vec<&CategoryMatch>)> {
    let mut groups: Vec<(&str, Vec<&CategoryMatch>)> = Vec::new();

    for entry in matches {
        match groups.iter_mut().find(|(deck, _)| *deck == entry.deck) {
            Some((_, group)) => group.push(entry),
            None => groups.push((entry.deck.as_str(), vec![entry])),
        }
    }

    groups
}
