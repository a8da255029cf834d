use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;
use crate::source::Source;
use crate::store::{render_document, DocumentStore};

/// In-memory document store with the same validation and rendering
/// semantics as the file-backed one. Lets the HTTP layer be exercised
/// without touching a filesystem.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<HashMap<Source, String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read(&self, source: Source) -> Result<Option<String>, StoreError> {
        Ok(self.inner.read().await.get(&source).cloned())
    }

    async fn write(&self, source: Source, body: &[u8]) -> Result<(), StoreError> {
        let document = render_document(body)?;
        self.inner.write().await.insert(source, document);
        Ok(())
    }
}
