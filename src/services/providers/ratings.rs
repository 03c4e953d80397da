/// External rating-index provider
///
/// Looks up a single record by (tmdb_id, media type). The contract is
/// best-effort: a timeout, a non-2xx status, an unparseable body or an empty
/// response array are all the same "no rating" outcome, never an error.
use crate::{
    models::{MediaKind, RatingRecord},
    services::providers::RatingSource,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct RatingIndexProvider {
    http_client: HttpClient,
    api_url: String,
}

impl RatingIndexProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }
}

/// Only the first record of the index response is consumed
fn first_record(records: Vec<RatingRecord>) -> Option<RatingRecord> {
    records.into_iter().next()
}

#[async_trait::async_trait]
impl RatingSource for RatingIndexProvider {
    async fn lookup(&self, tmdb_id: u64, kind: MediaKind) -> Option<RatingRecord> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("tmdb_id", tmdb_id.to_string()),
                ("tmdb_media_type", kind.as_str().to_string()),
            ])
            .timeout(LOOKUP_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(tmdb_id = tmdb_id, error = %e, "Rating lookup transport failure");
            })
            .ok()?;

        if !response.status().is_success() {
            tracing::debug!(
                tmdb_id = tmdb_id,
                status = %response.status(),
                "Rating index returned non-success"
            );
            return None;
        }

        let records: Vec<RatingRecord> = response
            .json()
            .await
            .map_err(|e| {
                tracing::debug!(tmdb_id = tmdb_id, error = %e, "Rating index response unparseable");
            })
            .ok()?;

        first_record(records)
    }
}
