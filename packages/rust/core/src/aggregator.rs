//! Concurrent execution and deduplication of a query battery.
//!
//! Each query runs as its own tokio task and owns its result slot. A failed
//! or panicked task yields an empty slot; it never aborts the others. The
//! join waits for every task, and deduplication then walks the slots in
//! battery order so the result does not depend on completion order.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use personscope_search::SearchClient;
use personscope_shared::{Category, Query, SearchHit};

/// Deduplicated hits of one battery run.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedHits {
    /// Unique-by-URL hits, in battery order.
    pub hits: Vec<SearchHit>,
    /// Number of queries issued.
    pub queries_executed: usize,
    /// Hits kept per category after deduplication.
    pub per_category: BTreeMap<Category, usize>,
    /// Hits removed as duplicates.
    pub duplicates_removed: usize,
    /// At least one hit is a placeholder.
    pub simulated: bool,
}

/// Run every query concurrently against the search provider and merge the results.
pub async fn run_battery(client: &SearchClient, queries: Vec<Query>) -> AggregatedHits {
    run_battery_with(queries, |query| {
        let client = client.clone();
        async move { client.search(&query.text, query.num).await }
    })
    .await
}

/// Run every query concurrently through `fetch` and merge the results.
///
/// Each query gets its own task. A task that panics yields an empty slot
/// for its query; the other slots are merged as usual.
#[instrument(skip_all, fields(queries = queries.len()))]
pub async fn run_battery_with<F, Fut>(queries: Vec<Query>, fetch: F) -> AggregatedHits
where
    F: Fn(Query) -> Fut,
    Fut: Future<Output = Vec<SearchHit>> + Send + 'static,
{
    let queries_executed = queries.len();

    let handles: Vec<_> = queries
        .into_iter()
        .map(|query| {
            let category = query.category;
            let pending = fetch(query);
            let handle = tokio::spawn(async move {
                let mut hits = pending.await;
                for hit in &mut hits {
                    hit.category = category;
                }
                hits
            });
            (category, handle)
        })
        .collect();

    let mut slots: Vec<(Category, Vec<SearchHit>)> = Vec::with_capacity(handles.len());
    for (category, handle) in handles {
        match handle.await {
            Ok(hits) => {
                debug!(%category, hits = hits.len(), "query settled");
                slots.push((category, hits));
            }
            Err(e) => {
                warn!(%category, error = %e, "search task failed");
                slots.push((category, Vec::new()));
            }
        }
    }

    let aggregated = merge(slots, queries_executed);

    info!(
        queries = aggregated.queries_executed,
        hits = aggregated.hits.len(),
        duplicates = aggregated.duplicates_removed,
        simulated = aggregated.simulated,
        "battery completed"
    );

    aggregated
}

/// Deduplicate settled slots by URL, first occurrence in battery order wins.
pub fn merge(mut slots: Vec<(Category, Vec<SearchHit>)>, queries_executed: usize) -> AggregatedHits {
    // Stable: slots of the same category keep their plan order.
    slots.sort_by_key(|(category, _)| *category);

    let mut seen: HashSet<String> = HashSet::new();
    let mut aggregated = AggregatedHits {
        queries_executed,
        ..AggregatedHits::default()
    };

    for (_, hits) in slots {
        for hit in hits {
            if !seen.insert(hit.url.clone()) {
                aggregated.duplicates_removed += 1;
                continue;
            }
            *aggregated.per_category.entry(hit.category).or_insert(0) += 1;
            aggregated.simulated |= hit.simulated;
            aggregated.hits.push(hit);
        }
    }

    aggregated
}
