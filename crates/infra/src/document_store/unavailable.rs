use folio_core::Document;

use super::r#trait::{Collection, StoreError, StoreResult};

/// Stand-in for a store that never connected.
///
/// Every call fails with [`StoreError::Connection`] carrying the boot-time
/// reason, so the server keeps running while store-backed routes fail.
#[derive(Debug, Clone)]
pub struct UnavailableCollection {
    reason: String,
}

impl UnavailableCollection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait::async_trait]
impl<D: Document> Collection<D> for UnavailableCollection {
    async fn find(&self) -> StoreResult<Vec<D>> {
        Err(StoreError::Connection(self.reason.clone()))
    }

    async fn save(&self, _draft: D::Draft) -> StoreResult<D> {
        Err(StoreError::Connection(self.reason.clone()))
    }
}
