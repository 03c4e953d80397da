/// Discover pipeline: listing fetch → normalize → match → merge → envelope
///
/// Resolves each trending-catalog item against the primary catalog by
/// title/year search. Matching is heuristic: the first candidate is accepted
/// unconditionally, with one year-relaxed retry when a year-constrained
/// search comes back empty. Items without a title or without a match are
/// dropped, never null-padded.
use crate::{
    error::{AppError, AppResult},
    models::{
        CategorySelector, DiscoverRequest, MediaKind, NormalizedItem, PagedEnvelope, PrimaryTitle,
        RawCatalogItem,
    },
    services::providers::{CatalogSearch, TrendingCatalog},
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

pub struct DiscoverService {
    trending: Arc<dyn TrendingCatalog>,
    catalog: Arc<dyn CatalogSearch>,
    match_concurrency: usize,
}

impl DiscoverService {
    pub fn new(
        trending: Arc<dyn TrendingCatalog>,
        catalog: Arc<dyn CatalogSearch>,
        match_concurrency: usize,
    ) -> Self {
        Self {
            trending,
            catalog,
            match_concurrency: match_concurrency.max(1),
        }
    }

    /// Runs one listing request end to end. A listing fetch or primary-catalog
    /// search failure fails the whole request; zero-match items are dropped
    /// silently.
    pub async fn discover(&self, request: &DiscoverRequest) -> AppResult<PagedEnvelope> {
        let selector = CategorySelector::from_category(&request.category).ok_or_else(|| {
            AppError::InvalidInput(format!("Unknown discover category: {}", request.category))
        })?;

        let raw = self.fetch_listing(&selector, request).await?;
        let raw_count = raw.len();

        let normalized: Vec<NormalizedItem> = raw
            .into_iter()
            .filter_map(RawCatalogItem::normalize)
            .collect();

        if normalized.len() < raw_count {
            tracing::debug!(
                dropped = raw_count - normalized.len(),
                "Dropped titleless listing items"
            );
        }

        let results = self.match_batch(selector.kind(), normalized).await?;

        tracing::info!(
            category = %request.category,
            page = request.page,
            raw = raw_count,
            matched = results.len(),
            "Discover listing reconciled"
        );

        Ok(PagedEnvelope::new(request.page, results))
    }

    async fn fetch_listing(
        &self,
        selector: &CategorySelector,
        request: &DiscoverRequest,
    ) -> AppResult<Vec<RawCatalogItem>> {
        match selector {
            CategorySelector::Collection { collection, .. } => {
                self.trending
                    .collection_items(collection, request.page)
                    .await
            }
            CategorySelector::RecentHot {
                kind,
                category,
                subtype,
            } => {
                self.trending
                    .recent_hot(*kind, category, subtype, request.page)
                    .await
            }
            CategorySelector::Recommend { kind } => {
                self.trending
                    .recommend(*kind, &request.filters, request.page)
                    .await
            }
        }
    }

    /// Resolves items against the primary catalog with bounded concurrency.
    /// Output order is input order regardless of completion order.
    async fn match_batch(
        &self,
        kind: MediaKind,
        items: Vec<NormalizedItem>,
    ) -> AppResult<Vec<PrimaryTitle>> {
        let resolved: Vec<AppResult<Option<PrimaryTitle>>> = stream::iter(items)
            .map(|item| {
                let catalog = Arc::clone(&self.catalog);
                async move { resolve_item(catalog, kind, item).await }
            })
            .buffered(self.match_concurrency)
            .collect()
            .await;

        let mut results = Vec::with_capacity(resolved.len());
        for outcome in resolved {
            if let Some(title) = outcome? {
                results.push(title);
            }
        }
        Ok(results)
    }
}

/// Resolves one normalized item. A year-constrained search that comes back
/// empty is retried exactly once without the year; the first candidate of
/// whichever search succeeds is accepted.
async fn resolve_item(
    catalog: Arc<dyn CatalogSearch>,
    kind: MediaKind,
    item: NormalizedItem,
) -> AppResult<Option<PrimaryTitle>> {
    let mut candidates = catalog.search_title(kind, &item.title, item.year).await?;

    if candidates.is_empty() && item.year.is_some() {
        candidates = catalog.search_title(kind, &item.title, None).await?;
    }

    let Some(mut matched) = candidates.into_iter().next() else {
        tracing::debug!(title = %item.title, year = ?item.year, "No primary-catalog match");
        return Ok(None);
    };

    matched.douban_rating = item.rating;
    matched.douban_id = Some(item.douban_id);
    Ok(Some(matched))
}
