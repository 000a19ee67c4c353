//! The fixed classification buckets for slide content.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the nine business categories a slide can be classified into.
///
/// Variant order is the declaration order used for JSON keys and report
/// sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ServicesAndOfferings,
    ValuePropositions,
    TargetMarkets,
    PastClients,
    CaseStudies,
    TeamInformation,
    Methodologies,
    Technologies,
    UniqueSellingPoints,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 9] = [
        Category::ServicesAndOfferings,
        Category::ValuePropositions,
        Category::TargetMarkets,
        Category::PastClients,
        Category::CaseStudies,
        Category::TeamInformation,
        Category::Methodologies,
        Category::Technologies,
        Category::UniqueSellingPoints,
    ];

    /// The snake_case key used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ServicesAndOfferings => "services_and_offerings",
            Category::ValuePropositions => "value_propositions",
            Category::TargetMarkets => "target_markets",
            Category::PastClients => "past_clients",
            Category::CaseStudies => "case_studies",
            Category::TeamInformation => "team_information",
            Category::Methodologies => "methodologies",
            Category::Technologies => "technologies",
            Category::UniqueSellingPoints => "unique_selling_points",
        }
    }

    /// Heading text for reports, e.g. "Services And Offerings".
    pub fn display_name(&self) -> String {
        title_case(&self.as_str().replace('_', " "))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest.
fn title_case(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                output.extend(c.to_lowercase());
            } else {
                output.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            output.push(c);
            prev_is_letter = false;
        }
    }

    output
}
