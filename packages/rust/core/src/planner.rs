//! Fixed battery of categorized web queries for one person.

use personscope_shared::{Category, Query};

/// Queries whose trimmed text is this short (in characters) or shorter are dropped.
pub const MIN_QUERY_CHARS: usize = 5;

/// Keywords appended to the employment query.
const EMPLOYMENT_TERMS: &str = "(trabalha OR empresa OR cargo OR emprego OR carreira)";

/// Build the battery for `full_name` plus free-text `context`.
///
/// Order is fixed and matches [`Category::ALL`]. The context query is kept
/// whenever its text passes the length check, even with an empty context,
/// because the quoted name alone already exceeds the threshold.
pub fn plan(full_name: &str, context: &str) -> Vec<Query> {
    let name = format!("\"{}\"", full_name.trim());

    let battery = [
        Query::new(name.clone(), Category::General, 10),
        Query::new(format!("{name} site:linkedin.com/in"), Category::Linkedin, 5),
        Query::new(format!("{name} site:instagram.com"), Category::Instagram, 3),
        Query::new(format!("{name} site:facebook.com"), Category::Facebook, 3),
        Query::new(
            format!("{name} (site:twitter.com OR site:x.com)"),
            Category::Twitter,
            3,
        ),
        Query::new(format!("{name} {EMPLOYMENT_TERMS}"), Category::Employment, 5),
        Query::new(format!("{name} {context}"), Category::Context, 5),
    ];

    battery
        .into_iter()
        .filter(|q| q.text.trim().chars().count() > MIN_QUERY_CHARS)
        .collect()
}
