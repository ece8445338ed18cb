//! Aggregate-only lookup: name, person type and total process count.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::classify::classify;
use crate::client::LegalClient;
use crate::outcome::LegalOutcome;

/// Summary endpoint, relative to the API root.
const SUMMARY_ENDPOINT: &str = "envolvido/resumo";

/// Decoded answer of the summary endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalSummary {
    #[serde(rename = "nome", default)]
    pub name: String,
    /// Person-type classification (e.g. `FISICA`, `JURIDICA`).
    #[serde(rename = "tipo_pessoa", default, skip_serializing_if = "Option::is_none")]
    pub person_type: Option<String>,
    #[serde(rename = "quantidade_processos", default)]
    pub total: u64,
    /// Process count per procedural role, when supplied.
    #[serde(rename = "por_polo", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_role: BTreeMap<String, u64>,
    /// Process count per justice branch, when supplied.
    #[serde(rename = "por_justica", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub by_branch: BTreeMap<String, u64>,
    /// Value of the consumed-credits response header.
    #[serde(skip_deserializing)]
    pub credits_used: String,
}

impl LegalClient {
    /// Fetch the aggregate summary for the party described by `input`.
    #[instrument(skip_all)]
    pub async fn summarize(&self, input: &str) -> LegalOutcome<LegalSummary> {
        let mode = classify(input);
        match self.fetch(SUMMARY_ENDPOINT, &mode).await {
            LegalOutcome::Found(raw) => match serde_json::from_value::<LegalSummary>(raw.body) {
                Ok(mut summary) => {
                    summary.credits_used = raw.credits_used;
                    LegalOutcome::Found(summary)
                }
                Err(e) => LegalOutcome::TransportError {
                    message: format!("{SUMMARY_ENDPOINT}: unexpected payload: {e}"),
                },
            },
            other => other.map(|_| LegalSummary::default()),
        }
    }
}
