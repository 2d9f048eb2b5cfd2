//! News item data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::utils::parse_date;

/// A single news article as delivered by a source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline
    pub title: String,

    /// Lead paragraph (may be empty)
    #[serde(default)]
    pub summary: String,

    /// Link to the full article
    pub url: String,

    /// Publisher name
    pub source: String,

    /// Publication date as received
    pub date: String,

    /// Free-text section label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Illustration URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewsItem {
    /// Stable identifier: the URL, or a digest of title and source when the
    /// URL is missing.
    pub fn id(&self) -> String {
        if !self.url.trim().is_empty() {
            return self.url.clone();
        }
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update([0x1f]);
        hasher.update(self.source.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Parsed publication date, if the raw date is understood.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.date)
    }

    /// Format the item for display using a template.
    ///
    /// Supported placeholders:
    /// - `{title}`, `{summary}`, `{source}`, `{date}`, `{url}`, `{category}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{title}", &self.title)
            .replace("{summary}", &self.summary)
            .replace("{source}", &self.source)
            .replace("{date}", &self.date)
            .replace("{url}", &self.url)
            .replace("{category}", self.category.as_deref().unwrap_or(""))
    }
}

/// Tolerant wire shape of a news record.
///
/// Remote rows and fallback documents are not trusted to be complete; every
/// field is optional here and validated by [`NewsRecord::into_item`].
/// A field holding anything other than a string reads as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Decode a JSON array of records, dropping entries that are not objects.
pub fn records_from_values(values: Vec<Value>) -> Vec<NewsRecord> {
    let total = values.len();
    let records: Vec<NewsRecord> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("Skipping undecodable news record: {e}");
                None
            }
        })
        .collect();
    if records.len() < total {
        log::debug!("Decoded {} of {} news record(s)", records.len(), total);
    }
    records
}

fn lenient_records<'de, D>(deserializer: D) -> std::result::Result<Vec<NewsRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(records_from_values(Vec::<Value>::deserialize(deserializer)?))
}

impl NewsRecord {
    /// Convert into a [`NewsItem`], or `None` when a required field is absent.
    ///
    /// `title`, `url` and `source` are required. A missing `date` falls back
    /// to `created_at`, then to `default_date`.
    pub fn into_item(self, default_date: Option<&str>) -> Option<NewsItem> {
        let title = non_empty(self.title)?;
        let url = non_empty(self.url)?;
        let source = non_empty(self.source)?;
        let date = non_empty(self.date)
            .or_else(|| non_empty(self.created_at))
            .or_else(|| default_date.map(str::to_string))
            .unwrap_or_default();

        Some(NewsItem {
            title,
            summary: self.summary.map(|s| s.trim().to_string()).unwrap_or_default(),
            url,
            source,
            date,
            category: non_empty(self.category),
            image_url: non_empty(self.image_url),
        })
    }

    /// Whether the record carries every required field.
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.url, &self.source]
            .iter()
            .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()))
    }

    /// Timestamp used for the recency window: `created_at` when present,
    /// otherwise `date`. Blank values count as absent.
    pub fn freshness_date(&self) -> Option<&str> {
        fn present(field: &Option<String>) -> Option<&str> {
            field.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        present(&self.created_at).or_else(|| present(&self.date))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Convert a batch of records, skipping the malformed ones.
pub fn items_from_records(records: Vec<NewsRecord>, default_date: Option<&str>) -> Vec<NewsItem> {
    let total = records.len();
    let items: Vec<NewsItem> = records
        .into_iter()
        .filter_map(|record| record.into_item(default_date))
        .collect();
    if items.len() < total {
        log::debug!(
            "Skipped {} malformed news record(s) out of {}",
            total - items.len(),
            total
        );
    }
    items
}

/// Static fallback document with top-level metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsDocument {
    /// When the document was generated
    #[serde(default)]
    pub last_updated: String,

    #[serde(default)]
    pub total_articles: usize,

    /// Publisher names covered by the document
    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(default, deserialize_with = "lenient_records")]
    pub articles: Vec<NewsRecord>,
}

impl NewsDocument {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.last_updated)
    }
}

/// A news item with the tags and score derived from the taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotatedItem {
    #[serde(flatten)]
    pub item: NewsItem,

    /// Taxonomy categories matched by the title or summary
    #[serde(rename = "autoTags")]
    pub auto_tags: Vec<String>,

    #[serde(rename = "relevanceScore")]
    pub relevance_score: u32,

    /// Matched surface forms, first occurrence first
    #[serde(rename = "detectedKeywords")]
    pub detected_keywords: Vec<String>,
}

impl AnnotatedItem {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.auto_tags.iter().any(|t| t == tag)
    }

    /// Format with the item placeholders plus `{score}` and `{tags}`.
    pub fn format(&self, template: &str) -> String {
        self.item
            .format(template)
            .replace("{score}", &self.relevance_score.to_string())
            .replace("{tags}", &self.auto_tags.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> NewsItem {
        NewsItem {
            title: "Escavação em Jerusalém".to_string(),
            summary: "Arqueólogos encontram selo real.".to_string(),
            url: "https://example.com/selo".to_string(),
            source: "Guiame".to_string(),
            date: "2025-03-10T12:00:00Z".to_string(),
            category: Some("Arqueologia".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn test_id_prefers_url() {
        assert_eq!(sample_item().id(), "https://example.com/selo");
    }

    #[test]
    fn test_id_without_url_is_stable_digest() {
        let mut item = sample_item();
        item.url = String::new();
        let id = item.id();
        assert_eq!(id.len(), 64);
        assert_eq!(id, item.clone().id());

        let mut other = item.clone();
        other.source = "Folha Gospel".to_string();
        assert_ne!(other.id(), id);
    }

    #[test]
    fn test_format() {
        let item = sample_item();
        assert_eq!(
            item.format("[{source}] {title} ({category})"),
            "[Guiame] Escavação em Jerusalém (Arqueologia)"
        );
    }

    #[test]
    fn test_record_missing_required_fields_is_skipped() {
        let record = NewsRecord {
            title: Some("Sem link".to_string()),
            source: Some("Guiame".to_string()),
            ..NewsRecord::default()
        };
        assert!(!record.is_complete());
        assert!(record.into_item(None).is_none());

        let record = NewsRecord {
            title: Some("   ".to_string()),
            url: Some("https://example.com".to_string()),
            source: Some("Guiame".to_string()),
            ..NewsRecord::default()
        };
        assert!(record.into_item(None).is_none());
    }

    #[test]
    fn test_record_defaults_optional_fields() {
        let record: NewsRecord = serde_json::from_str(
            r#"{"id": 7, "title": "Culto especial", "url": "https://example.com/culto",
                "source": "Guiame", "summary": null, "category": "",
                "created_at": "2025-03-10T09:00:00Z"}"#,
        )
        .unwrap();

        let item = record.into_item(None).unwrap();
        assert_eq!(item.summary, "");
        assert_eq!(item.category, None);
        assert_eq!(item.date, "2025-03-10T09:00:00Z");
    }

    #[test]
    fn test_record_uses_default_date_last() {
        let record = NewsRecord {
            title: Some("Congresso".to_string()),
            url: Some("https://example.com/congresso".to_string()),
            source: Some("CPAD News".to_string()),
            ..NewsRecord::default()
        };
        let item = record.into_item(Some("2025-03-01")).unwrap();
        assert_eq!(item.date, "2025-03-01");
    }

    #[test]
    fn test_items_from_records_skips_malformed() {
        let records = vec![
            NewsRecord {
                title: Some("Válida".to_string()),
                url: Some("https://example.com/a".to_string()),
                source: Some("Guiame".to_string()),
                ..NewsRecord::default()
            },
            NewsRecord::default(),
        ];
        let items = items_from_records(records, None);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Válida");
    }

    #[test]
    fn test_mistyped_fields_read_as_absent() {
        let record: NewsRecord = serde_json::from_str(
            r#"{"title": "Missões na Ásia", "url": "https://example.com/asia",
                "source": "Guiame", "image_url": 42, "category": ["Missões"]}"#,
        )
        .unwrap();

        assert_eq!(record.image_url, None);
        assert_eq!(record.category, None);
        assert!(record.is_complete());
    }

    #[test]
    fn test_document_skips_undecodable_articles() {
        let document: NewsDocument = serde_json::from_str(
            r#"{"last_updated": "2025-03-10T08:00:00Z", "articles": [
                "not a record",
                {"title": "Válida", "url": "https://example.com/a", "source": "Guiame"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(document.articles.len(), 1);
        assert_eq!(document.articles[0].title.as_deref(), Some("Válida"));
    }

    #[test]
    fn test_freshness_date_ignores_blank_values() {
        let record = NewsRecord {
            date: Some("2025-03-10".to_string()),
            created_at: Some("  ".to_string()),
            ..NewsRecord::default()
        };
        assert_eq!(record.freshness_date(), Some("2025-03-10"));

        let blank = NewsRecord {
            date: Some(String::new()),
            ..NewsRecord::default()
        };
        assert_eq!(blank.freshness_date(), None);
    }

    #[test]
    fn test_annotated_item_serializes_flat() {
        let annotated = AnnotatedItem {
            item: sample_item(),
            auto_tags: vec!["Arqueologia Bíblica".to_string()],
            relevance_score: 9,
            detected_keywords: vec!["escavação".to_string()],
        };
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["title"], "Escavação em Jerusalém");
        assert_eq!(json["relevanceScore"], 9);
        assert_eq!(json["autoTags"][0], "Arqueologia Bíblica");
        assert!(json.get("image_url").is_none());

        let back: AnnotatedItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, annotated);
    }
}
