//! Authenticated HTTP client for the legal-records provider.
//!
//! Every call is logged with endpoint, status, consumed credits and payload.
//! Those lines are used for billing reconciliation, so they are emitted
//! regardless of the outcome.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{info, instrument, warn};

use personscope_shared::{LegalConfig, LegalCredentials, PersonScopeError, Result};

use crate::classify::{InputMode, classify};
use crate::outcome::{CREDITS_UNKNOWN, LegalOutcome};
use crate::records::LegalRecords;

/// User-Agent string for provider requests.
const USER_AGENT: &str = concat!("PersonScope/", env!("CARGO_PKG_VERSION"));

/// Response header carrying the credits consumed by the call.
pub const CREDITS_HEADER: &str = "Creditos-Utilizados";

/// Process-list endpoint, relative to the API root.
const PROCESSES_ENDPOINT: &str = "envolvido/processos";

/// Longest payload excerpt written to the log.
const MAX_LOGGED_PAYLOAD: usize = 4096;

/// Decoded JSON body plus the metering header of a successful call.
pub(crate) struct RawResponse {
    pub body: Value,
    pub credits_used: String,
}

// ---------------------------------------------------------------------------
// LegalClient
// ---------------------------------------------------------------------------

/// Client for the process-list and summary endpoints.
#[derive(Debug, Clone)]
pub struct LegalClient {
    client: Client,
    base_url: String,
    credentials: Option<LegalCredentials>,
}

impl LegalClient {
    /// Create a client with explicit credentials (`None` = unconfigured).
    pub fn new(config: &LegalConfig, credentials: Option<LegalCredentials>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                PersonScopeError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Create a client, resolving the token from the configured env var.
    pub fn from_config(config: &LegalConfig) -> Result<Self> {
        Self::new(config, config.credentials())
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Look up every process involving the party described by `input`.
    #[instrument(skip_all)]
    pub async fn lookup(&self, input: &str) -> LegalOutcome<LegalRecords> {
        let mode = classify(input);
        self.fetch(PROCESSES_ENDPOINT, &mode)
            .await
            .map(|raw| LegalRecords::from_payload(&raw.body, &mode, raw.credits_used))
    }

    /// Issue one GET and map the HTTP result onto the outcome taxonomy.
    pub(crate) async fn fetch(&self, endpoint: &str, mode: &InputMode) -> LegalOutcome<RawResponse> {
        let Some(credentials) = &self.credentials else {
            info!(endpoint, "legal-records token not configured, skipping request");
            return LegalOutcome::Unconfigured;
        };

        let url = format!("{}/{endpoint}", self.base_url);
        let (param, value) = mode.query_param();

        let response = match self
            .client
            .get(&url)
            .bearer_auth(&credentials.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[(param, value)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint, error = %e, "legal-records request failed");
                return LegalOutcome::TransportError {
                    message: format!("{endpoint}: {e}"),
                };
            }
        };

        let status = response.status();
        let credits_used = response
            .headers()
            .get(CREDITS_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| CREDITS_UNKNOWN.to_string());

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(endpoint, %status, credits = %credits_used, error = %e, "failed to read legal-records body");
                return LegalOutcome::TransportError {
                    message: format!("{endpoint}: failed to read body: {e}"),
                };
            }
        };

        info!(
            endpoint,
            param,
            status = status.as_u16(),
            credits = %credits_used,
            payload = %excerpt(&body),
            "legal-records response"
        );

        match status {
            StatusCode::NOT_FOUND => LegalOutcome::NotFound { credits_used },
            StatusCode::PAYMENT_REQUIRED => LegalOutcome::CreditsExhausted {
                message: provider_message(&body)
                    .unwrap_or_else(|| "legal-records credits exhausted".into()),
            },
            s if !s.is_success() => LegalOutcome::TransportError {
                message: provider_message(&body).unwrap_or_else(|| format!("HTTP {s}")),
            },
            _ => match serde_json::from_str::<Value>(&body) {
                Ok(body) => LegalOutcome::Found(RawResponse { body, credits_used }),
                Err(e) => LegalOutcome::TransportError {
                    message: format!("{endpoint}: invalid JSON: {e}"),
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pull a human-readable message out of a provider error body.
fn provider_message(body: &str) -> Option<String> {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message", "erro", "mensagem"] {
            match json.get(key) {
                Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().into()),
                Some(Value::Object(obj)) => {
                    if let Some(Value::String(s)) = obj.get("message") {
                        return Some(s.trim().into());
                    }
                }
                _ => {}
            }
        }
    }

    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| excerpt(trimmed))
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= MAX_LOGGED_PAYLOAD {
        body.to_string()
    } else {
        let mut cut: String = body.chars().take(MAX_LOGGED_PAYLOAD).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> LegalClient {
        let config = LegalConfig {
            base_url: server.uri(),
            ..LegalConfig::default()
        };
        let credentials = token.map(|t| LegalCredentials { token: t.into() });
        LegalClient::new(&config, credentials).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_unconfigured_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(!client.is_configured());
        let outcome = client.lookup("Maria Silva").await;
        assert!(matches!(outcome, LegalOutcome::Unconfigured));
    }

    #[tokio::test]
    async fn test_lookup_by_document_success() {
        let server = MockServer::start().await;

        let body = json!({
            "envolvido_encontrado": { "nome": "Maria Silva", "quantidade_processos": 7 },
            "items": [{ "numero_cnj": "1" }, { "numero_cnj": "2" }],
            "links": { "next": null }
        });

        Mock::given(method("GET"))
            .and(path("/envolvido/processos"))
            .and(query_param("cpf_cnpj", "12345678900"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header(CREDITS_HEADER, "5")
                    .set_body_json(&body),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-token"));
        let outcome = client.lookup("123.456.789-00").await;

        let records = outcome.found().expect("expected success");
        assert_eq!(records.total, 7);
        assert_eq!(records.items.len(), 2);
        assert_eq!(records.credits_used, "5");
        assert_eq!(records.party.as_ref().map(|p| p.name.as_str()), Some("Maria Silva"));
    }

    #[tokio::test]
    async fn test_lookup_by_name_without_credit_header() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/envolvido/processos"))
            .and(query_param("nome", "Maria Silva"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("t"));
        let outcome = client.lookup("Maria Silva").await;

        let records = outcome.found().expect("expected success");
        assert_eq!(records.total, 0);
        assert_eq!(records.credits_used, CREDITS_UNKNOWN);
    }

    #[tokio::test]
    async fn test_lookup_402_is_credits_exhausted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/envolvido/processos"))
            .respond_with(
                ResponseTemplate::new(402)
                    .set_body_json(json!({ "error": "Você não possui saldo em crédito" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Some("t"));
        let outcome = client.lookup("Maria Silva").await;

        match &outcome {
            LegalOutcome::CreditsExhausted { message } => {
                assert!(message.contains("saldo"));
            }
            other => panic!("expected CreditsExhausted, got {}", other.label()),
        }
        assert!(outcome.found().is_none());
    }

    #[tokio::test]
    async fn test_lookup_404_is_success_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/envolvido/processos"))
            .respond_with(ResponseTemplate::new(404).insert_header(CREDITS_HEADER, "1"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("t"));
        let outcome = client.lookup("Maria Silva").await;

        assert!(outcome.is_success());
        assert!(outcome.error_message().is_none());
        match outcome {
            LegalOutcome::NotFound { credits_used } => assert_eq!(credits_used, "1"),
            other => panic!("expected NotFound, got {}", other.label()),
        }
    }

    #[tokio::test]
    async fn test_lookup_500_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/envolvido/processos"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "message": "internal failure" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Some("t"));
        let outcome = client.lookup("Maria Silva").await;

        assert_eq!(outcome.error_message().as_deref(), Some("internal failure"));
        assert_eq!(outcome.label(), "transport_error");
    }

    #[tokio::test]
    async fn test_lookup_invalid_json_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("t"));
        let outcome = client.lookup("Maria Silva").await;

        assert_eq!(outcome.label(), "transport_error");
        assert!(outcome.error_message().unwrap().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn test_lookup_connection_refused_is_transport_error() {
        let config = LegalConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..LegalConfig::default()
        };
        let client =
            LegalClient::new(&config, Some(LegalCredentials { token: "t".into() })).unwrap();
        let outcome = client.lookup("Maria Silva").await;
        assert_eq!(outcome.label(), "transport_error");
    }

    #[test]
    fn test_provider_message_variants() {
        assert_eq!(provider_message(r#"{"error":"x"}"#).as_deref(), Some("x"));
        assert_eq!(
            provider_message(r#"{"error":{"message":"nested"}}"#).as_deref(),
            Some("nested")
        );
        assert_eq!(provider_message("plain text").as_deref(), Some("plain text"));
        assert!(provider_message("   ").is_none());
    }

    #[test]
    fn test_excerpt_truncates_long_payloads() {
        let long = "a".repeat(MAX_LOGGED_PAYLOAD + 10);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), MAX_LOGGED_PAYLOAD + 1);
        assert_eq!(excerpt("short"), "short");
    }
}
