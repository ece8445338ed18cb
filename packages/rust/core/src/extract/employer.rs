//! Employer heuristic: role titles, "works at" phrasing, legal-entity suffixes.

use std::sync::LazyLock;

use regex::Regex;

use personscope_shared::SearchHit;

use super::tables;
use super::{Collector, MAX_EMPLOYERS};

/// All three pattern families, in evaluation order.
static EMPLOYER: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let mut patterns = tables::role_employer_patterns();
    patterns.extend(tables::works_at_patterns());
    patterns.extend(tables::entity_suffix_patterns());
    tables::compile(&patterns)
});

/// Up to five distinct employer candidates mentioned across `hits`.
pub fn extract_employers(hits: &[SearchHit]) -> Vec<String> {
    let mut found = Collector::new(MAX_EMPLOYERS, 3, 59);

    for hit in hits {
        let text = hit.lookup_text();
        for re in EMPLOYER.iter() {
            for caps in re.captures_iter(&text) {
                found.push(clean(&caps[1]));
            }
        }
        if found.is_full() {
            break;
        }
    }

    found.into_vec()
}

/// Trim whitespace and trailing punctuation.
fn clean(candidate: &str) -> &str {
    candidate
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '-' | '!' | '?' | '|'))
        .trim_end()
}
