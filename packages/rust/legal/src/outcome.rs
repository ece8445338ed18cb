//! Canonical outcome shape shared by the process lookup and the summary.

use serde::Serialize;

/// Sentinel used when the provider does not report consumed credits.
pub const CREDITS_UNKNOWN: &str = "N/A";

/// Result of one legal-records provider call.
///
/// Exactly one variant per call. None of them is raised as an error;
/// callers branch on the variant.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum LegalOutcome<T> {
    /// The provider returned matching data.
    #[serde(rename = "success")]
    Found(T),

    /// HTTP 404: a valid zero-record answer.
    #[serde(rename = "success_empty")]
    NotFound { credits_used: String },

    /// HTTP 402: the account ran out of credits. Not retryable.
    #[serde(rename = "credits_exhausted")]
    CreditsExhausted { message: String },

    /// No access token configured; no request was made.
    #[serde(rename = "unconfigured")]
    Unconfigured,

    /// Any other failure, carrying the provider or transport message.
    #[serde(rename = "transport_error")]
    TransportError { message: String },
}

impl<T> LegalOutcome<T> {
    /// Found or NotFound.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Found(_) | Self::NotFound { .. })
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            _ => None,
        }
    }

    /// Human-readable failure message; `None` for both success variants.
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Found(_) | Self::NotFound { .. } => None,
            Self::CreditsExhausted { message } | Self::TransportError { message } => {
                Some(message.clone())
            }
            Self::Unconfigured => Some("legal-records access token is not configured".into()),
        }
    }

    /// Map the success payload, keeping every other variant as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LegalOutcome<U> {
        match self {
            Self::Found(value) => LegalOutcome::Found(f(value)),
            Self::NotFound { credits_used } => LegalOutcome::NotFound { credits_used },
            Self::CreditsExhausted { message } => LegalOutcome::CreditsExhausted { message },
            Self::Unconfigured => LegalOutcome::Unconfigured,
            Self::TransportError { message } => LegalOutcome::TransportError { message },
        }
    }

    /// Short label for logs and the CLI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Found(_) => "success",
            Self::NotFound { .. } => "success_empty",
            Self::CreditsExhausted { .. } => "credits_exhausted",
            Self::Unconfigured => "unconfigured",
            Self::TransportError { .. } => "transport_error",
        }
    }
}
