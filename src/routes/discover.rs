use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{DiscoverFilters, DiscoverRequest, PagedEnvelope},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct DiscoverQuery {
    pub category: String,
    #[serde(default = "default_page")]
    pub page: u32,
    pub genre: Option<String>,
    pub format: Option<String>,
    pub region: Option<String>,
    pub year: Option<String>,
    pub sort: Option<String>,
}

fn default_page() -> u32 {
    1
}

/// Treats the "all" sentinel the same as an absent filter
fn not_all(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "all" && !v.is_empty())
}

/// Handler for the discover listing endpoint
pub async fn discover(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<DiscoverQuery>,
) -> AppResult<Json<PagedEnvelope>> {
    if params.page == 0 {
        return Err(AppError::InvalidInput("page must be >= 1".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        category = %params.category,
        page = params.page,
        "Processing discover request"
    );

    let request = DiscoverRequest {
        category: params.category,
        page: params.page,
        filters: DiscoverFilters {
            genre: not_all(params.genre),
            format: not_all(params.format),
            region: params.region,
            year: params.year,
            sort: params.sort,
        },
    };

    let envelope = state.discover.discover(&request).await?;
    Ok(Json(envelope))
}
