use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Serialize};

use crate::models::document::Document;
use crate::search::matcher::searchable_text;

/// A document as persisted by the stores.
///
/// Besides the document itself the record carries the lowercased
/// `search_text` the candidate filter runs against, and an insertion
/// timestamp that fixes the order candidates are returned in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(flatten)]
    pub document: Document,
    /// Lowercased title, author and content, one per line.
    pub search_text: String,
    /// Insertion key: milliseconds since the Unix epoch, bumped past the
    /// previous record's key so it strictly increases within a process.
    pub inserted_at: i64,
}

static LAST_INSERTED_AT: AtomicI64 = AtomicI64::new(i64::MIN);

/// Next insertion key, `max(now, previous + 1)`.
fn next_inserted_at() -> i64 {
    let now = chrono::Utc::now().timestamp_millis();
    let previous = LAST_INSERTED_AT
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last.saturating_add(1)))
        })
        .unwrap_or_else(|last| last);
    now.max(previous.saturating_add(1))
}

impl DocumentRecord {
    /// Assign a fresh id to `document` and wrap it for storage.
    pub fn new(mut document: Document) -> Self {
        document.id = Some(uuid::Uuid::new_v4().to_string());
        let search_text = searchable_text(&document);
        Self {
            document,
            search_text,
            inserted_at: next_inserted_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn document() -> Document {
        Document {
            id: None,
            title: "Teste documento".to_string(),
            author: "Autor".to_string(),
            content: "Conteúdo sobre Carros Antigos em Porto Alegre".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            latitude: Some(-30.0),
            longitude: Some(-51.0),
        }
    }

    #[test]
    fn test_new_assigns_id_and_search_text() {
        let record = DocumentRecord::new(document());
        assert!(record.document.id.is_some());
        assert!(record.search_text.contains("carros antigos em porto alegre"));
        assert!(record.inserted_at > 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = DocumentRecord::new(document());
        let b = DocumentRecord::new(document());
        assert_ne!(a.document.id, b.document.id);
    }

    #[test]
    fn test_insertion_keys_strictly_increase() {
        let keys: Vec<i64> = (0..1000)
            .map(|_| DocumentRecord::new(document()).inserted_at)
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_record_serialization_is_flat() {
        let record = DocumentRecord::new(document());
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["_id"].is_string());
        assert_eq!(value["titulo"], "Teste documento");
        assert!(value["search_text"].is_string());
        assert!(value.get("document").is_none());

        let deserialized: DocumentRecord = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized.document, record.document);
    }
}
