use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{MediaKind, RatingRecord},
    routes::AppState,
    services::enrichment,
};

/// Handler for a single rating lookup. Degrades gracefully: an unavailable
/// rating serializes as `null` rather than failing the response.
pub async fn rating(
    State(state): State<Arc<AppState>>,
    Path((media_type, tmdb_id)): Path<(MediaKind, u64)>,
) -> Json<Option<RatingRecord>> {
    Json(state.ratings.lookup(tmdb_id, media_type).await)
}

#[derive(Debug, Deserialize)]
pub struct RatingBatchQuery {
    pub media_type: MediaKind,
    /// Comma-separated TMDB ids; results come back index-aligned
    pub tmdb_ids: String,
}

/// Handler for batch rating lookups across a resolved listing
pub async fn rating_batch(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RatingBatchQuery>,
) -> AppResult<Json<Vec<Option<RatingRecord>>>> {
    let tmdb_ids = parse_id_list(&params.tmdb_ids)?;
    let records =
        enrichment::lookup_batch(Arc::clone(&state.ratings), params.media_type, tmdb_ids).await;
    Ok(Json(records))
}

fn parse_id_list(raw: &str) -> AppResult<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| AppError::InvalidInput(format!("Invalid TMDB id: {}", s)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("603, 1396,550").unwrap(), vec![603, 1396, 550]);
        assert_eq!(parse_id_list("").unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn test_parse_id_list_rejects_non_numeric() {
        let err = parse_id_list("603,tt1375666").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
