/// TMDB primary-catalog provider
///
/// Only the single operation the reconciliation pipeline needs: a title
/// search at a fixed locale, always page 1, optionally constrained by year.
use crate::{
    error::{AppError, AppResult},
    models::{tmdb::SearchResponse, MediaKind, PrimaryTitle},
    services::providers::CatalogSearch,
};
use reqwest::Client as HttpClient;

/// Locale for all primary-catalog searches. Matches the trending catalog's
/// title language so the title-string match has a chance of succeeding.
const DEFAULT_LANGUAGE: &str = "zh-CN";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

/// TMDB names the year constraint differently per search endpoint
fn year_param(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Movie => "primary_release_year",
        MediaKind::Tv => "first_air_date_year",
    }
}

#[async_trait::async_trait]
impl CatalogSearch for TmdbProvider {
    async fn search_title(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<i32>,
    ) -> AppResult<Vec<PrimaryTitle>> {
        let url = format!("{}/search/{}", self.api_url, kind.as_str());

        let mut query = vec![
            ("api_key", self.api_key.clone()),
            ("query", title.to_string()),
            ("language", DEFAULT_LANGUAGE.to_string()),
            ("page", "1".to_string()),
            ("include_adult", "false".to_string()),
        ];
        if let Some(year) = year {
            query.push((year_param(kind), year.to_string()));
        }

        let response = self.http_client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB search {} returned status {}: {}",
                kind, status, body
            )));
        }

        let payload: SearchResponse = response.json().await?;

        tracing::debug!(
            kind = %kind,
            title = %title,
            year = ?year,
            results = payload.results.len(),
            "Primary-catalog title search completed"
        );

        Ok(payload.results)
    }
}
