use serde::{Deserialize, Serialize};

/// A primary-catalog (TMDB) search result, as this service returns it.
///
/// `douban_rating` and `douban_id` are the reconciliation fields this service
/// adds on top of TMDB's own payload. They are absent unless a trending-catalog
/// match or a rating-index record set them; the TMDB id stays authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryTitle {
    pub id: u64,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default, alias = "first_air_date", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub douban_rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub douban_id: Option<String>,
}

/// TMDB `/search/movie` and `/search/tv` response body
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<PrimaryTitle>,
}
