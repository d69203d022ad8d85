use std::sync::RwLock;

use async_trait::async_trait;

use crate::db::models::DocumentRecord;
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::models::document::Document;
use crate::search::matcher::contains_all;

/// Process-local, append-only document store.
///
/// Documents are lost when the process exits. Used for development runs
/// without a database and by the HTTP tests.
#[derive(Default)]
pub struct InMemoryDocumentRepository {
    records: RwLock<Vec<DocumentRecord>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.records.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::StoreUnavailable("in-memory store lock poisoned".into())
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert(&self, document: Document) -> Result<Document, AppError> {
        document.validate()?;
        let record = DocumentRecord::new(document);
        let stored = record.document.clone();

        self.records.write().map_err(poisoned)?.push(record);
        Ok(stored)
    }

    async fn find_candidates(&self, words: &[String]) -> Result<Vec<Document>, AppError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .filter(|record| contains_all(&record.search_text, words))
            .map(|record| record.document.clone())
            .collect())
    }
}
