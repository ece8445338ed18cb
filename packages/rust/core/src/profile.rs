//! End-to-end profile pipeline: classify → legal lookup + summary → web
//! battery → extraction → composition.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{info, instrument};

use personscope_legal::{LegalClient, LegalOutcome, classify};
use personscope_search::SearchClient;
use personscope_shared::{AppConfig, Category, Result, SearchHit};

use crate::aggregator::run_battery;
use crate::compose::{PersonProfile, compose};
use crate::extract::{ExtractedData, Platform, SocialProfile, extract_data, extract_social_profiles};
use crate::planner::plan;

/// Web side of a profile: `{results, extractedData, socialProfiles}`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSearch {
    pub results: Vec<SearchHit>,
    pub extracted_data: ExtractedData,
    pub social_profiles: BTreeMap<Platform, SocialProfile>,
    pub queries_executed: usize,
    pub per_category: BTreeMap<Category, usize>,
    /// Results are placeholders, not live provider data.
    pub simulated: bool,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, profile: &PersonProfile);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _profile: &PersonProfile) {}
}

/// Owns both provider clients and runs the pipeline.
#[derive(Debug, Clone)]
pub struct Profiler {
    legal: LegalClient,
    search: SearchClient,
}

impl Profiler {
    pub fn new(legal: LegalClient, search: SearchClient) -> Self {
        Self { legal, search }
    }

    /// Build both clients from config, resolving credentials from the environment.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            LegalClient::from_config(&config.legal)?,
            SearchClient::from_config(&config.search)?,
        ))
    }

    pub fn legal(&self) -> &LegalClient {
        &self.legal
    }

    pub fn search(&self) -> &SearchClient {
        &self.search
    }

    /// Run the web battery for `name` and extract entities from the hits.
    #[instrument(skip_all, fields(name = %name))]
    pub async fn search_person(&self, name: &str, context: &str) -> PersonSearch {
        let aggregated = run_battery(&self.search, plan(name, context)).await;

        let extracted_data = extract_data(&aggregated.hits);
        let social_profiles = extract_social_profiles(&aggregated.hits);

        info!(
            results = aggregated.hits.len(),
            locations = extracted_data.locations.len(),
            employers = extracted_data.employers.len(),
            news = extracted_data.news.len(),
            profiles = social_profiles.len(),
            "person search completed"
        );

        PersonSearch {
            results: aggregated.hits,
            extracted_data,
            social_profiles,
            queries_executed: aggregated.queries_executed,
            per_category: aggregated.per_category,
            simulated: aggregated.simulated,
        }
    }

    /// Build the full profile for a document number or a name.
    ///
    /// In document mode the web battery searches for the party name the
    /// legal provider identified; with no name known it is skipped.
    #[instrument(skip_all, fields(query = %query))]
    pub async fn profile(
        &self,
        query: &str,
        context: &str,
        progress: &dyn ProgressReporter,
    ) -> PersonProfile {
        let start = Instant::now();
        let input = classify(query);

        progress.phase("Querying legal records");
        let (legal, summary) = tokio::join!(self.legal.lookup(query), self.legal.summarize(query));

        let name = input
            .name()
            .map(String::from)
            .or_else(|| {
                legal
                    .found()
                    .and_then(|r| r.party.as_ref())
                    .map(|p| p.name.clone())
            })
            .or_else(|| summary.found().map(|s| s.name.clone()))
            .filter(|n| !n.trim().is_empty());

        let web = match &name {
            Some(name) => {
                progress.phase("Searching the web");
                self.search_person(name, context).await
            }
            None => {
                info!("no name available for web search, skipping battery");
                PersonSearch::default()
            }
        };

        progress.phase("Composing profile");
        let profile = compose(query, input, legal, summary, web);

        info!(
            legal = profile.legal.label(),
            summary = profile.summary.label(),
            results = profile.web.results.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "profile composed"
        );

        progress.done(&profile);
        profile
    }
}

/// Whether a legal outcome calls for user action rather than a retry.
pub fn needs_remediation<T>(outcome: &LegalOutcome<T>) -> bool {
    matches!(
        outcome,
        LegalOutcome::Unconfigured | LegalOutcome::CreditsExhausted { .. }
    )
}
