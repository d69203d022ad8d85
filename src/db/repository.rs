use async_trait::async_trait;

use crate::db::models::DocumentRecord;
use crate::error::AppError;
use crate::models::document::Document;

/// Repository trait for document operations.
///
/// This trait allows swapping the database layer in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a new document and return it with its assigned id.
    ///
    /// Rejects documents that violate [`Document::validate`].
    async fn insert(&self, document: Document) -> Result<Document, AppError>;

    /// Return every stored document whose text fields contain all of the
    /// given lowercased words, in insertion order.
    ///
    /// Callers treat the result as a candidate pool: it may contain extra
    /// documents, but must never omit one that matches.
    async fn find_candidates(&self, words: &[String]) -> Result<Vec<Document>, AppError>;
}

/// MongoDB implementation of the DocumentRepository.
pub struct MongoDocumentRepository {
    collection: mongodb::Collection<DocumentRecord>,
}

impl MongoDocumentRepository {
    pub fn new(db: &mongodb::Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }

    /// Create the index backing the insertion-order sort.
    ///
    /// Should be called once on startup.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let index = IndexModel::builder()
            .keys(doc! { "inserted_at": 1, "_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("inserted_at_idx".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        Ok(())
    }
}

/// Build the MongoDB filter selecting records whose `search_text` contains
/// every word. Words are escaped so they match literally.
pub fn candidate_filter(words: &[String]) -> mongodb::bson::Document {
    use mongodb::bson::doc;

    if words.is_empty() {
        return doc! {};
    }

    let clauses: Vec<mongodb::bson::Document> = words
        .iter()
        .map(|word| doc! { "search_text": { "$regex": regex::escape(word) } })
        .collect();

    doc! { "$and": clauses }
}

#[async_trait]
impl DocumentRepository for MongoDocumentRepository {
    async fn insert(&self, document: Document) -> Result<Document, AppError> {
        document.validate()?;
        let record = DocumentRecord::new(document);

        self.collection.insert_one(&record).await.map_err(|e| {
            tracing::error!("Failed to insert document: {e}");
            AppError::StoreUnavailable(e.to_string())
        })?;

        Ok(record.document)
    }

    async fn find_candidates(&self, words: &[String]) -> Result<Vec<Document>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        // `inserted_at` strictly increases per process; `_id` only separates
        // writers in different processes.
        let options = FindOptions::builder()
            .sort(doc! { "inserted_at": 1, "_id": 1 })
            .build();

        let mut cursor = self
            .collection
            .find(candidate_filter(words))
            .with_options(options)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        let mut documents = Vec::new();
        while let Some(record) = cursor
            .try_next()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?
        {
            documents.push(record.document);
        }

        tracing::debug!(
            "MongoDB returned {} candidates for {} words",
            documents.len(),
            words.len()
        );
        Ok(documents)
    }
}
