use std::sync::Arc;

use thiserror::Error;

use folio_core::{Document, DomainError};

/// Document store operation error.
///
/// Display is the bare message: it is what HTTP callers get back as
/// `{"message": ...}`.
///
/// ## Error Categories
///
/// - **Connection**: the store could not be reached (or was never connected)
/// - **Validation**: a draft was rejected before anything was written
/// - **Query**: the store answered with an error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Connection(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Query(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<DomainError> for StoreError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// A typed collection of documents.
///
/// Implementations assign the id (and timestamp, for documents that carry one)
/// and must build the document through [`Document::from_draft`] before writing,
/// so rejected drafts are never persisted.
#[async_trait::async_trait]
pub trait Collection<D: Document>: Send + Sync {
    /// Every document in the collection, in whatever order the store returns.
    async fn find(&self) -> StoreResult<Vec<D>>;

    /// Persist a new document built from `draft` and return it as stored.
    async fn save(&self, draft: D::Draft) -> StoreResult<D>;
}

#[async_trait::async_trait]
impl<D, C> Collection<D> for Arc<C>
where
    D: Document,
    C: Collection<D> + ?Sized,
{
    async fn find(&self) -> StoreResult<Vec<D>> {
        (**self).find().await
    }

    async fn save(&self, draft: D::Draft) -> StoreResult<D> {
        (**self).save(draft).await
    }
}
