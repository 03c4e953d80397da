/// Rating-index enrichment for already-resolved primary-catalog ids
///
/// Lookups fan out one task per id and results join back strictly by
/// positional index, so one slow or failed lookup never disturbs its
/// siblings; it only yields "no rating" for its own position.
use crate::{
    models::{MediaKind, RatingRecord},
    services::providers::RatingSource,
};
use std::sync::Arc;

/// Looks up rating records for a batch of primary-catalog ids concurrently.
/// The output vector is index-aligned with `tmdb_ids`.
pub async fn lookup_batch(
    source: Arc<dyn RatingSource>,
    kind: MediaKind,
    tmdb_ids: Vec<u64>,
) -> Vec<Option<RatingRecord>> {
    let mut tasks = Vec::with_capacity(tmdb_ids.len());

    for tmdb_id in tmdb_ids {
        let source = Arc::clone(&source);
        tasks.push(tokio::spawn(async move { source.lookup(tmdb_id, kind).await }));
    }

    let mut records = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(error = %e, "Rating lookup task join error");
                records.push(None);
            }
        }
    }

    let found = records.iter().filter(|r| r.is_some()).count();
    tracing::debug!(
        lookups = records.len(),
        ratings_found = found,
        "Rating enrichment completed"
    );

    records
}
