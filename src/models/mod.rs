use serde::{Deserialize, Serialize};

pub mod douban;
pub mod tmdb;

pub use douban::{RawCatalogItem, SelectedCategories};
pub use tmdb::PrimaryTitle;

/// Placeholder totals for the listing envelope. The trending catalog exposes
/// no reliable totals, so callers must paginate on non-empty pages only.
pub const TOTAL_RESULTS_PLACEHOLDER: u64 = 10_000;
pub const TOTAL_PAGES_PLACEHOLDER: u32 = 500;

/// Coarse media kind shared by both catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trending-catalog item reduced to the fields the matcher needs.
/// Items without a usable title never become one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub douban_id: String,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f32>,
}

/// Filter parameters for the tag-filtered recommendation listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverFilters {
    pub genre: Option<String>,
    pub format: Option<String>,
    pub region: Option<String>,
    pub year: Option<String>,
    pub sort: Option<String>,
}

/// A discover listing request after query-string parsing
#[derive(Debug, Clone)]
pub struct DiscoverRequest {
    pub category: String,
    pub page: u32,
    pub filters: DiscoverFilters,
}

/// Which trending-catalog endpoint a discover category maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    /// Curated subject collection, e.g. movies now in theaters
    Collection {
        kind: MediaKind,
        collection: &'static str,
    },
    /// Recency-ranked hot list with a provider category label and sub-type tag
    RecentHot {
        kind: MediaKind,
        category: &'static str,
        subtype: &'static str,
    },
    /// Tag-filtered recommendation feed
    Recommend { kind: MediaKind },
}

impl CategorySelector {
    /// Maps a caller-facing category name onto one of the three endpoint shapes.
    /// Returns `None` for categories this catalog does not know.
    pub fn from_category(category: &str) -> Option<Self> {
        let selector = match category {
            "movie_showing" => CategorySelector::Collection {
                kind: MediaKind::Movie,
                collection: "movie_showing",
            },
            "movie_top250" => CategorySelector::Collection {
                kind: MediaKind::Movie,
                collection: "movie_top250",
            },
            "movie_hot" => CategorySelector::RecentHot {
                kind: MediaKind::Movie,
                category: "热门",
                subtype: "全部",
            },
            "tv_hot" => CategorySelector::RecentHot {
                kind: MediaKind::Tv,
                category: "tv",
                subtype: "tv",
            },
            "tv_domestic" => CategorySelector::RecentHot {
                kind: MediaKind::Tv,
                category: "tv",
                subtype: "tv_domestic",
            },
            "tv_animation" => CategorySelector::RecentHot {
                kind: MediaKind::Tv,
                category: "tv",
                subtype: "tv_animation",
            },
            "show_hot" => CategorySelector::RecentHot {
                kind: MediaKind::Tv,
                category: "show",
                subtype: "show",
            },
            "movie_all" => CategorySelector::Recommend {
                kind: MediaKind::Movie,
            },
            "tv_all" => CategorySelector::Recommend { kind: MediaKind::Tv },
            _ => return None,
        };
        Some(selector)
    }

    /// Media kind used for primary-catalog matching of the listing's items
    pub fn kind(&self) -> MediaKind {
        match self {
            CategorySelector::Collection { kind, .. }
            | CategorySelector::RecentHot { kind, .. }
            | CategorySelector::Recommend { kind } => *kind,
        }
    }
}

/// Paginated listing envelope, shaped like the primary catalog's own search
/// response. Totals are synthesized placeholders, not ground truth.
#[derive(Debug, Serialize)]
pub struct PagedEnvelope {
    pub page: u32,
    pub total_results: u64,
    pub total_pages: u32,
    pub results: Vec<PrimaryTitle>,
}

impl PagedEnvelope {
    pub fn new(page: u32, results: Vec<PrimaryTitle>) -> Self {
        Self {
            page,
            total_results: TOTAL_RESULTS_PLACEHOLDER,
            total_pages: TOTAL_PAGES_PLACEHOLDER,
            results,
        }
    }
}

/// One record from the external rating index, keyed upstream by
/// (tmdb_id, media type). Absence of a record is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub id: String,
    #[serde(default)]
    pub rating: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_as_str() {
        assert_eq!(MediaKind::Movie.as_str(), "movie");
        assert_eq!(MediaKind::Tv.as_str(), "tv");
    }

    #[test]
    fn test_media_kind_deserializes_from_lowercase() {
        let kind: MediaKind = serde_json::from_str(r#""movie""#).unwrap();
        assert_eq!(kind, MediaKind::Movie);
        let kind: MediaKind = serde_json::from_str(r#""tv""#).unwrap();
        assert_eq!(kind, MediaKind::Tv);
    }

    #[test]
    fn test_category_routing_movie_showing_is_collection() {
        let selector = CategorySelector::from_category("movie_showing").unwrap();
        assert_eq!(
            selector,
            CategorySelector::Collection {
                kind: MediaKind::Movie,
                collection: "movie_showing",
            }
        );
    }

    #[test]
    fn test_category_routing_tv_hot_is_recent_hot() {
        let selector = CategorySelector::from_category("tv_hot").unwrap();
        assert_eq!(
            selector,
            CategorySelector::RecentHot {
                kind: MediaKind::Tv,
                category: "tv",
                subtype: "tv",
            }
        );
    }

    #[test]
    fn test_category_routing_movie_all_is_recommend() {
        let selector = CategorySelector::from_category("movie_all").unwrap();
        assert_eq!(
            selector,
            CategorySelector::Recommend {
                kind: MediaKind::Movie,
            }
        );
        assert_eq!(selector.kind(), MediaKind::Movie);
    }

    #[test]
    fn test_category_routing_unknown_category() {
        assert_eq!(CategorySelector::from_category("podcast_hot"), None);
    }

    #[test]
    fn test_envelope_uses_placeholder_totals() {
        let envelope = PagedEnvelope::new(3, vec![]);
        assert_eq!(envelope.page, 3);
        assert_eq!(envelope.total_results, TOTAL_RESULTS_PLACEHOLDER);
        assert_eq!(envelope.total_pages, TOTAL_PAGES_PLACEHOLDER);
        assert!(envelope.results.is_empty());
    }

    #[test]
    fn test_envelope_serializes_with_snake_case_totals() {
        let envelope = PagedEnvelope::new(1, vec![]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["total_results"], TOTAL_RESULTS_PLACEHOLDER);
        assert_eq!(json["total_pages"], TOTAL_PAGES_PLACEHOLDER);
        assert_eq!(json["results"], serde_json::json!([]));
    }

    #[test]
    fn test_rating_record_deserializes_without_rating() {
        let record: RatingRecord = serde_json::from_str(r#"{"id": "m_10052"}"#).unwrap();
        assert_eq!(record.id, "m_10052");
        assert_eq!(record.rating, None);
    }
}
