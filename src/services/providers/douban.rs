/// Douban "frodo" trending-catalog provider
///
/// Implements the three listing shapes the catalog exposes: curated paged
/// collections, recency-ranked hot lists, and the tag-filtered recommendation
/// feed. Listing failures are hard failures wrapped with the identifying
/// collection/category/kind; nothing is retried here.
use crate::{
    error::{AppError, AppResult},
    models::{
        douban::{CollectionItemsResponse, ItemListResponse},
        DiscoverFilters, MediaKind, RawCatalogItem, SelectedCategories,
    },
    services::providers::TrendingCatalog,
};
use reqwest::Client as HttpClient;

/// Items requested per listing page
pub const PAGE_SIZE: u32 = 30;

/// Sort value meaning "use the provider's default ordering"
const SORT_DEFAULT: &str = "T";

/// Filter value meaning "no constraint"
const FILTER_ALL: &str = "all";

#[derive(Clone)]
pub struct DoubanProvider {
    http_client: HttpClient,
    api_url: String,
}

impl DoubanProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        context: &str,
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("douban {}: {}", context, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "douban {} returned status {}: {}",
                context, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("douban {}: invalid response: {}", context, e)))
    }
}

/// Start offset for a 1-based page of `limit` items. Widened to u64 so a
/// caller-supplied page number can never overflow the multiplication.
pub fn page_offset(page: u32, limit: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(limit)
}

/// Composes the comma-joined tag string for the recommendation feed.
///
/// The genre slot is taken by the category tag when present, otherwise by the
/// format tag (mutually exclusive, category wins). Region and year are
/// appended independently unless they are the "all" sentinel.
pub fn compose_tags(filters: &DiscoverFilters) -> String {
    let mut tags: Vec<&str> = Vec::new();

    if let Some(genre) = filters.genre.as_deref() {
        tags.push(genre);
    } else if let Some(format) = filters.format.as_deref() {
        tags.push(format);
    }

    if let Some(region) = filters.region.as_deref() {
        if region != FILTER_ALL {
            tags.push(region);
        }
    }
    if let Some(year) = filters.year.as_deref() {
        if year != FILTER_ALL {
            tags.push(year);
        }
    }

    tags.join(",")
}

/// Sort parameter sent to the recommendation feed. The "T" sentinel means
/// no explicit sort; anything else passes through verbatim.
pub fn sort_param(filters: &DiscoverFilters) -> String {
    match filters.sort.as_deref() {
        None | Some(SORT_DEFAULT) => String::new(),
        Some(sort) => sort.to_string(),
    }
}

/// Structured filter side-channel for consumers that support it
pub fn selected_categories(filters: &DiscoverFilters) -> SelectedCategories {
    SelectedCategories {
        genre: filters.genre.clone(),
        format: filters.format.clone(),
        region: filters.region.clone().filter(|r| r != FILTER_ALL),
    }
}

#[async_trait::async_trait]
impl TrendingCatalog for DoubanProvider {
    async fn collection_items(
        &self,
        collection: &str,
        page: u32,
    ) -> AppResult<Vec<RawCatalogItem>> {
        let url = format!("{}/subject_collection/{}/items", self.api_url, collection);
        let start = page_offset(page, PAGE_SIZE);

        let payload: CollectionItemsResponse = self
            .fetch_json(
                &url,
                &[
                    ("start", start.to_string()),
                    ("count", PAGE_SIZE.to_string()),
                    ("updated_at", String::new()),
                    ("items_only", "1".to_string()),
                    ("for_mobile", "1".to_string()),
                ],
                &format!("collection {}", collection),
            )
            .await?;

        tracing::info!(
            collection = %collection,
            page = page,
            items = payload.subject_collection_items.len(),
            "Collection listing fetched"
        );

        Ok(payload.subject_collection_items)
    }

    async fn recent_hot(
        &self,
        kind: MediaKind,
        category: &str,
        subtype: &str,
        page: u32,
    ) -> AppResult<Vec<RawCatalogItem>> {
        let url = format!("{}/subject/recent_hot/{}", self.api_url, kind.as_str());
        let start = page_offset(page, PAGE_SIZE);

        let payload: ItemListResponse = self
            .fetch_json(
                &url,
                &[
                    ("start", start.to_string()),
                    ("limit", PAGE_SIZE.to_string()),
                    ("category", category.to_string()),
                    ("type", subtype.to_string()),
                ],
                &format!("recent_hot {}/{}", kind, category),
            )
            .await?;

        tracing::info!(
            kind = %kind,
            category = %category,
            subtype = %subtype,
            page = page,
            items = payload.items.len(),
            "Recency-ranked listing fetched"
        );

        Ok(payload.items)
    }

    async fn recommend(
        &self,
        kind: MediaKind,
        filters: &DiscoverFilters,
        page: u32,
    ) -> AppResult<Vec<RawCatalogItem>> {
        let url = format!("{}/{}/recommend", self.api_url, kind.as_str());
        let start = page_offset(page, PAGE_SIZE);

        let selected = serde_json::to_string(&selected_categories(filters))
            .map_err(|e| AppError::Internal(format!("selected_categories encoding: {}", e)))?;
        let tags = compose_tags(filters);

        let payload: ItemListResponse = self
            .fetch_json(
                &url,
                &[
                    ("refresh", "0".to_string()),
                    ("start", start.to_string()),
                    ("count", PAGE_SIZE.to_string()),
                    ("selected_categories", selected),
                    ("uncollect", "false".to_string()),
                    ("score_range", "0,10".to_string()),
                    ("tags", tags.clone()),
                    ("sort", sort_param(filters)),
                ],
                &format!("recommend {}", kind),
            )
            .await?;

        tracing::info!(
            kind = %kind,
            tags = %tags,
            page = page,
            items = payload.items.len(),
            "Recommendation listing fetched"
        );

        Ok(payload.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(
        genre: Option<&str>,
        format: Option<&str>,
        region: Option<&str>,
        year: Option<&str>,
        sort: Option<&str>,
    ) -> DiscoverFilters {
        DiscoverFilters {
            genre: genre.map(str::to_string),
            format: format.map(str::to_string),
            region: region.map(str::to_string),
            year: year.map(str::to_string),
            sort: sort.map(str::to_string),
        }
    }

    #[test]
    fn test_page_offset_formula() {
        assert_eq!(page_offset(1, 30), 0);
        assert_eq!(page_offset(2, 30), 30);
        assert_eq!(page_offset(5, 20), 80);
        assert_eq!(page_offset(7, 1), 6);
    }

    #[test]
    fn test_page_offset_page_zero_clamps() {
        assert_eq!(page_offset(0, 30), 0);
    }

    #[test]
    fn test_page_offset_large_page_does_not_overflow() {
        assert_eq!(page_offset(200_000_000, 30), 5_999_999_970);
        assert_eq!(
            page_offset(u32::MAX, u32::MAX),
            (u64::from(u32::MAX) - 1) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_compose_tags_category_excludes_format() {
        let f = filters(Some("Drama"), Some("Variety"), Some("USA"), Some("1999"), None);
        assert_eq!(compose_tags(&f), "Drama,USA,1999");
    }

    #[test]
    fn test_compose_tags_format_fills_genre_slot_when_no_category() {
        let f = filters(None, Some("Variety"), Some("USA"), Some("1999"), None);
        assert_eq!(compose_tags(&f), "Variety,USA,1999");
    }

    #[test]
    fn test_compose_tags_skips_all_sentinels() {
        let f = filters(Some("Comedy"), None, Some("all"), Some("all"), None);
        assert_eq!(compose_tags(&f), "Comedy");
    }

    #[test]
    fn test_compose_tags_empty_filters() {
        assert_eq!(compose_tags(&DiscoverFilters::default()), "");
    }

    #[test]
    fn test_sort_sentinel_translates_to_default() {
        let f = filters(None, None, None, None, Some("T"));
        assert_eq!(sort_param(&f), "");
        assert_eq!(sort_param(&DiscoverFilters::default()), "");
    }

    #[test]
    fn test_sort_passes_through_other_values() {
        let f = filters(None, None, None, None, Some("R"));
        assert_eq!(sort_param(&f), "R");
    }

    #[test]
    fn test_selected_categories_records_all_three_labels() {
        let f = filters(Some("Drama"), Some("Variety"), Some("USA"), Some("1999"), None);
        let selected = selected_categories(&f);
        assert_eq!(selected.genre.as_deref(), Some("Drama"));
        assert_eq!(selected.format.as_deref(), Some("Variety"));
        assert_eq!(selected.region.as_deref(), Some("USA"));
    }

    #[test]
    fn test_selected_categories_drops_all_region() {
        let f = filters(None, None, Some("all"), None, None);
        assert_eq!(selected_categories(&f), SelectedCategories::default());
    }
}
