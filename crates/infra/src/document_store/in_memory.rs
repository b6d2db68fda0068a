use std::sync::RwLock;

use chrono::Utc;

use folio_core::{Document, DocumentId};

use super::r#trait::{Collection, StoreError, StoreResult};

/// In-memory collection.
///
/// Intended for tests/dev. Keeps insertion order.
#[derive(Debug)]
pub struct InMemoryCollection<D> {
    docs: RwLock<Vec<D>>,
}

impl<D> InMemoryCollection<D> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Vec::new()),
        }
    }
}

impl<D> Default for InMemoryCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> InMemoryCollection<D> {
    /// Snapshot of the stored documents.
    pub fn all(&self) -> Vec<D> {
        self.docs.read().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl<D: Document> Collection<D> for InMemoryCollection<D> {
    async fn find(&self) -> StoreResult<Vec<D>> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Query(format!("{} collection lock poisoned", D::COLLECTION)))?;
        Ok(docs.clone())
    }

    async fn save(&self, draft: D::Draft) -> StoreResult<D> {
        let doc = D::from_draft(DocumentId::new(), Utc::now(), draft)?;

        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Query(format!("{} collection lock poisoned", D::COLLECTION)))?;
        docs.push(doc.clone());

        Ok(doc)
    }
}
