//! Document trait: identity plus the rules for building a stored document.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::DomainResult;
use crate::id::DocumentId;

/// A kind of document kept in its own store collection.
///
/// Stores only know how to assign an id and a timestamp; everything else
/// about shaping the document (casting, defaults) lives in
/// [`Document::from_draft`]. Stores must call it before persisting anything so
/// that a rejected draft never reaches storage.
pub trait Document: Clone + core::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Unsaved input the document is built from.
    type Draft: Clone + core::fmt::Debug + Send + Sync + 'static;

    /// Collection name in the document store.
    const COLLECTION: &'static str;

    /// Model name used in validation messages.
    const MODEL: &'static str;

    /// Serialized name of the creation timestamp, if the document carries one.
    const TIMESTAMP_FIELD: Option<&'static str> = None;

    /// Returns the document identifier.
    fn id(&self) -> &DocumentId;

    /// Build the document the store is about to persist.
    fn from_draft(id: DocumentId, saved_at: DateTime<Utc>, draft: Self::Draft) -> DomainResult<Self>;
}
