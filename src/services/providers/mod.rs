/// External catalog provider abstractions
///
/// The reconciliation pipeline depends only on being able to issue a
/// parameterized GET and get typed JSON back, so each upstream is an injected
/// trait object rather than a concrete client. This also keeps the pipeline
/// testable without the network.
use crate::{
    error::AppResult,
    models::{DiscoverFilters, MediaKind, PrimaryTitle, RatingRecord, RawCatalogItem},
};

pub mod douban;
pub mod ratings;
pub mod tmdb;

pub use douban::DoubanProvider;
pub use ratings::RatingIndexProvider;
pub use tmdb::TmdbProvider;

/// The trending/recommendation catalog's three listing shapes.
///
/// Each returns a possibly-empty list of raw items; transport failures are
/// wrapped with the identifying collection/category/kind and re-raised, never
/// retried at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrendingCatalog: Send + Sync {
    /// Curated paged collection, e.g. "movie_showing"
    async fn collection_items(
        &self,
        collection: &str,
        page: u32,
    ) -> AppResult<Vec<RawCatalogItem>>;

    /// Recency-ranked hot list for a kind, category label and sub-type tag
    async fn recent_hot(
        &self,
        kind: MediaKind,
        category: &str,
        subtype: &str,
        page: u32,
    ) -> AppResult<Vec<RawCatalogItem>>;

    /// Tag-filtered recommendation feed
    async fn recommend(
        &self,
        kind: MediaKind,
        filters: &DiscoverFilters,
        page: u32,
    ) -> AppResult<Vec<RawCatalogItem>>;
}

/// The single primary-catalog operation this pipeline needs: a title search
/// at a fixed default locale, page 1, optionally constrained by year.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search_title(
        &self,
        kind: MediaKind,
        title: &str,
        year: Option<i32>,
    ) -> AppResult<Vec<PrimaryTitle>>;
}

/// External rating index keyed by (tmdb_id, media type).
///
/// Absence is not an error: empty responses, timeouts and transport failures
/// all come back as `None`, by contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    async fn lookup(&self, tmdb_id: u64, kind: MediaKind) -> Option<RatingRecord>;
}
