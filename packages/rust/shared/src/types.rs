//! Domain types shared between the search client and the aggregation core.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Category tag attached to every planned query and to the hits it produced.
///
/// Declaration order is the battery order used for deduplication.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    General,
    Linkedin,
    Instagram,
    Facebook,
    Twitter,
    Employment,
    Context,
}

impl Category {
    /// Every category, in battery order.
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Linkedin,
        Category::Instagram,
        Category::Facebook,
        Category::Twitter,
        Category::Employment,
        Category::Context,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Linkedin => "linkedin",
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Employment => "employment",
            Self::Context => "context",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// One planned web search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Text sent to the search provider.
    pub text: String,
    /// Battery slot this query fills.
    pub category: Category,
    /// Requested number of results (clamped by the client).
    pub num: u32,
}

impl Query {
    pub fn new(text: impl Into<String>, category: Category, num: u32) -> Self {
        Self {
            text: text.into(),
            category,
            num,
        }
    }
}

// ---------------------------------------------------------------------------
// SearchHit
// ---------------------------------------------------------------------------

/// A single normalized search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result URL; unique within an aggregated set.
    pub url: String,
    pub title: String,
    pub snippet: String,
    /// Category of the query that produced this hit.
    pub category: Category,
    /// Placeholder hit produced without a live provider.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub simulated: bool,
}

impl SearchHit {
    /// Title and snippet joined, used as the lookup text by extractors.
    pub fn lookup_text(&self) -> String {
        format!("{} {}", self.title, self.snippet)
    }
}
