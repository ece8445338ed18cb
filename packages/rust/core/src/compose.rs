//! Merge of legal and web outcomes into one [`PersonProfile`].
//!
//! The fragment is the minimal HTML the downstream page needs to show the
//! legal status. Every interpolated value is escaped.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use personscope_legal::{InputMode, LegalOutcome, LegalRecords, LegalSummary};

use crate::profile::PersonSearch;

/// Everything known about one queried person.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonProfile {
    /// Raw query as typed.
    pub query: String,
    pub input: InputMode,
    pub legal: LegalOutcome<LegalRecords>,
    pub summary: LegalOutcome<LegalSummary>,
    pub web: PersonSearch,
    /// Presentational HTML for the legal section.
    pub fragment: String,
}

/// Assemble the profile and render its fragment.
pub fn compose(
    query: &str,
    input: InputMode,
    legal: LegalOutcome<LegalRecords>,
    summary: LegalOutcome<LegalSummary>,
    web: PersonSearch,
) -> PersonProfile {
    let fragment = legal_fragment(&legal, &summary);
    PersonProfile {
        query: query.to_string(),
        input,
        legal,
        summary,
        web,
        fragment,
    }
}

/// Render the legal-status fragment.
pub fn legal_fragment(
    legal: &LegalOutcome<LegalRecords>,
    summary: &LegalOutcome<LegalSummary>,
) -> String {
    match legal {
        LegalOutcome::Unconfigured => status_block(
            "legal-unavailable",
            "No legal data available",
            legal.error_message().as_deref(),
            "Set the legal-records access token to enable process lookups.",
        ),
        LegalOutcome::TransportError { message } => status_block(
            "legal-unavailable",
            "No legal data available",
            Some(message.as_str()),
            "The provider could not be reached. Run the query again later.",
        ),
        LegalOutcome::CreditsExhausted { message } => status_block(
            "legal-credits",
            "Legal-records credits exhausted",
            Some(message.as_str()),
            "Recharge the provider account to resume lookups.",
        ),
        LegalOutcome::NotFound { .. } => status_block(
            "legal-clean",
            "Clean record",
            None,
            "No legal processes were found for this query.",
        ),
        LegalOutcome::Found(records) => records_block(records, summary.found()),
    }
}

fn status_block(class: &str, title: &str, message: Option<&str>, hint: &str) -> String {
    let mut html = format!(
        "<div class=\"legal-status {class}\"><p class=\"legal-title\">{}</p>",
        escape_html(title)
    );
    if let Some(message) = message {
        let _ = write!(html, "<p class=\"legal-error\">{}</p>", escape_html(message));
    }
    let _ = write!(html, "<p class=\"legal-hint\">{}</p></div>", escape_html(hint));
    html
}

fn records_block(records: &LegalRecords, summary: Option<&LegalSummary>) -> String {
    let party = records.party.as_ref();
    let name = summary
        .map(|s| s.name.as_str())
        .filter(|n| !n.is_empty())
        .or_else(|| party.map(|p| p.name.as_str()));

    let mut html = format!(
        "<div class=\"legal-status legal-records\"><p class=\"legal-title\">{} legal process{} found</p>",
        records.total,
        if records.total == 1 { "" } else { "es" }
    );
    if let Some(name) = name {
        let _ = write!(html, "<p class=\"legal-party\">{}</p>", escape_html(name));
    }

    // Summary breakdowns take precedence over the ones derived from records.
    let by_role = pick(summary.map(|s| &s.by_role), party.map(|p| &p.by_role));
    let by_branch = pick(summary.map(|s| &s.by_branch), party.map(|p| &p.by_branch));

    if let Some(map) = by_role {
        html.push_str(&count_list("legal-roles", map));
    }
    if let Some(map) = by_branch {
        html.push_str(&count_list("legal-branches", map));
    }

    html.push_str("</div>");
    html
}

fn pick<'a>(
    preferred: Option<&'a BTreeMap<String, u64>>,
    fallback: Option<&'a BTreeMap<String, u64>>,
) -> Option<&'a BTreeMap<String, u64>> {
    preferred
        .filter(|m| !m.is_empty())
        .or(fallback.filter(|m| !m.is_empty()))
}

fn count_list(class: &str, counts: &BTreeMap<String, u64>) -> String {
    let mut html = format!("<ul class=\"{class}\">");
    for (label, count) in counts {
        let _ = write!(html, "<li>{}: {count}</li>", escape_html(label));
    }
    html.push_str("</ul>");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
