//! Web search provider client.
//!
//! Wraps a single custom-search call and normalizes the hits. An empty
//! result is a valid answer ("try another source"): missing credentials,
//! provider error bodies and transport faults all collapse to an empty
//! list and are never propagated.

mod simulated;

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use personscope_shared::{
    Category, PersonScopeError, Result, SearchConfig, SearchCredentials, SearchHit,
};

pub use simulated::placeholder_hits;

/// User-Agent string for search requests.
const USER_AGENT: &str = concat!("PersonScope/", env!("CARGO_PKG_VERSION"));

/// Country bias applied to every request.
pub const REGION: &str = "br";

/// Provider limits on results per request.
pub const MIN_RESULTS: u32 = 1;
pub const MAX_RESULTS: u32 = 10;

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

// ---------------------------------------------------------------------------
// SearchClient
// ---------------------------------------------------------------------------

/// Client for the custom-search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: Url,
    credentials: Option<SearchCredentials>,
    simulate_when_unconfigured: bool,
}

impl SearchClient {
    /// Create a client with explicit credentials (`None` = unconfigured).
    pub fn new(config: &SearchConfig, credentials: Option<SearchCredentials>) -> Result<Self> {
        let endpoint = Url::parse(&config.base_url).map_err(|e| {
            PersonScopeError::config(format!("invalid search base_url '{}': {e}", config.base_url))
        })?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                PersonScopeError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            endpoint,
            credentials,
            simulate_when_unconfigured: config.simulate_when_unconfigured,
        })
    }

    /// Create a client, resolving key and engine id from the configured env vars.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(config, config.credentials())
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Whether this client will answer with placeholder hits.
    pub fn is_simulated(&self) -> bool {
        self.credentials.is_none() && self.simulate_when_unconfigured
    }

    /// Run one search. `num` is clamped to `[MIN_RESULTS, MAX_RESULTS]`.
    ///
    /// Hits are tagged [`Category::General`]; callers retag them.
    #[instrument(skip_all, fields(q = %text))]
    pub async fn search(&self, text: &str, num: u32) -> Vec<SearchHit> {
        let num = num.clamp(MIN_RESULTS, MAX_RESULTS);

        let Some(credentials) = &self.credentials else {
            if self.simulate_when_unconfigured {
                info!("search provider not configured, returning simulated hits");
                return placeholder_hits(text, num);
            }
            debug!("search provider not configured");
            return Vec::new();
        };

        let num_param = num.to_string();
        let response = match self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("key", credentials.api_key.as_str()),
                ("cx", credentials.cx.as_str()),
                ("q", text),
                ("num", num_param.as_str()),
                ("gl", REGION),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "search request failed");
                return Vec::new();
            }
        };

        let status = response.status();
        let body: SearchResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%status, error = %e, "undecodable search response");
                return Vec::new();
            }
        };

        if let Some(error) = body.error {
            warn!(%status, %error, "search provider returned an error");
            return Vec::new();
        }
        if !status.is_success() {
            warn!(%status, "search provider returned a non-success status");
            return Vec::new();
        }

        let hits: Vec<SearchHit> = body
            .items
            .into_iter()
            .filter(|item| !item.link.is_empty())
            .map(|item| SearchHit {
                url: item.link,
                title: item.title,
                snippet: item.snippet,
                category: Category::General,
                simulated: false,
            })
            .collect();

        debug!(hits = hits.len(), "search completed");
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, configured: bool, simulate: bool) -> SearchClient {
        let config = SearchConfig {
            base_url: format!("{}/customsearch/v1", server.uri()),
            simulate_when_unconfigured: simulate,
            ..SearchConfig::default()
        };
        let credentials = configured.then(|| SearchCredentials {
            api_key: "k".into(),
            cx: "c".into(),
        });
        SearchClient::new(&config, credentials).unwrap()
    }

    #[tokio::test]
    async fn test_search_normalizes_items() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("key", "k"))
            .and(query_param("cx", "c"))
            .and(query_param("q", "\"Ana Souza\""))
            .and(query_param("num", "10"))
            .and(query_param("gl", "br"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "link": "https://a.example.com", "title": "A", "snippet": "sa" },
                    { "link": "https://b.example.com", "title": "B" },
                    { "title": "no link" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, true, false);
        let hits = client.search("\"Ana Souza\"", 10).await;

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://a.example.com");
        assert_eq!(hits[1].snippet, "");
        assert!(hits.iter().all(|h| h.category == Category::General && !h.simulated));
    }

    #[tokio::test]
    async fn test_search_clamps_num() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("num", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(query_param("num", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, true, false);
        client.search("query high", 50).await;
        client.search("query low", 0).await;
    }

    #[tokio::test]
    async fn test_search_error_body_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "quota exceeded" }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, true, false);
        assert!(client.search("anything", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_field_with_200_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "bad cx",
                "items": [{ "link": "https://x.example.com", "title": "x", "snippet": "" }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server, true, false);
        assert!(client.search("anything", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_unconfigured_is_empty_without_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, false, false);
        assert!(!client.is_configured());
        assert!(!client.is_simulated());
        assert!(client.search("anything", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_unconfigured_simulated_hits_are_flagged() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, false, true);
        assert!(client.is_simulated());
        let hits = client.search("\"Ana Souza\"", 3).await;
        assert!(!hits.is_empty());
        assert!(hits.len() <= 3);
        assert!(hits.iter().all(|h| h.simulated));
    }

    #[tokio::test]
    async fn test_configured_client_never_simulates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server, true, true);
        assert!(!client.is_simulated());
        assert!(client.search("anything", 5).await.is_empty());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = SearchConfig {
            base_url: "not a url".into(),
            ..SearchConfig::default()
        };
        let err = SearchClient::new(&config, None).unwrap_err();
        assert!(err.to_string().contains("invalid search base_url"));
    }
}
