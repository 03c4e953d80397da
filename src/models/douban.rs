use serde::{Deserialize, Serialize};

use super::NormalizedItem;

/// Raw item from any of the trending catalog's three listing endpoints.
///
/// The three endpoints return overlapping shapes; one permissive struct covers
/// all of them. Items without a title are provider-side placeholders (inline
/// ads) and are dropped during normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pic: Option<ItemPic>,
    #[serde(default)]
    pub rating: Option<ItemRating>,
    #[serde(default)]
    pub year: Option<String>,
    /// Free-text locale/genre/date line, not machine-parsed further
    #[serde(default)]
    pub card_subtitle: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemPic {
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemRating {
    #[serde(default)]
    pub value: Option<f32>,
}

impl RawCatalogItem {
    /// Reduces the raw item to what the matcher needs, or `None` when the
    /// item carries no usable title.
    pub fn normalize(self) -> Option<NormalizedItem> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;
        let year = self.year.and_then(|y| y.trim().parse::<i32>().ok());
        let rating = self.rating.and_then(|r| r.value);
        Some(NormalizedItem {
            douban_id: self.id,
            title,
            year,
            rating,
        })
    }
}

/// Response body of `/subject_collection/{collection}/items`
#[derive(Debug, Deserialize)]
pub struct CollectionItemsResponse {
    #[serde(default)]
    pub subject_collection_items: Vec<RawCatalogItem>,
}

/// Response body of `/subject/recent_hot/{kind}` and `/{kind}/recommend`
#[derive(Debug, Deserialize)]
pub struct ItemListResponse {
    #[serde(default)]
    pub items: Vec<RawCatalogItem>,
}

/// Structured filter side-channel for the recommendation endpoint. The
/// provider expects these exact labels; fields are omitted when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectedCategories {
    #[serde(rename = "类型", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(rename = "形式", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "地区", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_item_deserialization() {
        let json = r#"{
            "id": "35120633",
            "title": "流浪地球2",
            "pic": {"normal": "https://img.example/p.jpg", "large": "https://img.example/l.jpg"},
            "rating": {"value": 8.3, "count": 600000},
            "year": "2023",
            "card_subtitle": "2023 / 中国大陆 / 科幻",
            "type": "movie"
        }"#;

        let item: RawCatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "35120633");
        assert_eq!(item.title.as_deref(), Some("流浪地球2"));
        assert_eq!(item.rating.as_ref().and_then(|r| r.value), Some(8.3));
        assert_eq!(item.year.as_deref(), Some("2023"));
        assert_eq!(item.kind.as_deref(), Some("movie"));
    }

    #[test]
    fn test_raw_item_deserialization_sparse() {
        // Ad placeholders come back with little more than an id
        let item: RawCatalogItem = serde_json::from_str(r#"{"id": "ad-1"}"#).unwrap();
        assert_eq!(item.id, "ad-1");
        assert!(item.title.is_none());
        assert!(item.rating.is_none());
    }

    #[test]
    fn test_normalize_extracts_fields() {
        let item: RawCatalogItem = serde_json::from_str(
            r#"{"id": "123", "title": "The Matrix", "year": "1999", "rating": {"value": 9.1}}"#,
        )
        .unwrap();

        let normalized = item.normalize().unwrap();
        assert_eq!(normalized.douban_id, "123");
        assert_eq!(normalized.title, "The Matrix");
        assert_eq!(normalized.year, Some(1999));
        assert_eq!(normalized.rating, Some(9.1));
    }

    #[test]
    fn test_normalize_drops_missing_title() {
        let item: RawCatalogItem = serde_json::from_str(r#"{"id": "ad-1"}"#).unwrap();
        assert!(item.normalize().is_none());
    }

    #[test]
    fn test_normalize_drops_blank_title() {
        let item: RawCatalogItem =
            serde_json::from_str(r#"{"id": "ad-2", "title": "   "}"#).unwrap();
        assert!(item.normalize().is_none());
    }

    #[test]
    fn test_normalize_non_numeric_year() {
        let item: RawCatalogItem =
            serde_json::from_str(r#"{"id": "123", "title": "Unknown", "year": "coming soon"}"#)
                .unwrap();
        let normalized = item.normalize().unwrap();
        assert_eq!(normalized.year, None);
    }

    #[test]
    fn test_collection_items_response_field_name() {
        let json = r#"{"subject_collection_items": [{"id": "1", "title": "A"}], "total": 50}"#;
        let response: CollectionItemsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.subject_collection_items.len(), 1);
    }

    #[test]
    fn test_selected_categories_labels() {
        let selected = SelectedCategories {
            genre: Some("喜剧".to_string()),
            format: None,
            region: Some("华语".to_string()),
        };
        let json = serde_json::to_string(&selected).unwrap();
        assert_eq!(json, r#"{"类型":"喜剧","地区":"华语"}"#);
    }

    #[test]
    fn test_selected_categories_empty_serializes_to_empty_object() {
        let json = serde_json::to_string(&SelectedCategories::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
