use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::StoreError;
use crate::source::Source;
use crate::store::{render_document, DocumentStore};

/// Filesystem-backed document store.
///
/// One document file per source, at `<data_dir>/<source>/data.json`. The
/// filesystem is the sole owner: nothing is cached across requests, every
/// read and write goes back to the file. A per-source mutex serializes
/// writers so two concurrent replacements of the same document cannot
/// interleave at the file level.
pub struct FsDocumentStore {
    data_dir: PathBuf,
    write_locks: [Mutex<()>; 2],
}

impl FsDocumentStore {
    /// Initialize the store rooted at `data_dir`, creating the per-source
    /// subdirectories if absent. Safe to call repeatedly; existing
    /// documents are left untouched.
    pub async fn new<P: Into<PathBuf>>(data_dir: P) -> Result<Arc<Self>, StoreError> {
        let data_dir = data_dir.into();
        for source in Source::ALL {
            fs::create_dir_all(data_dir.join(source.as_str()))
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        Ok(Arc::new(Self { data_dir, write_locks: [Mutex::new(()), Mutex::new(())] }))
    }

    pub fn document_path(&self, source: Source) -> PathBuf {
        self.data_dir.join(source.as_str()).join("data.json")
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn read(&self, source: Source) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.document_path(source)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(%source, "no document on disk, treating as absent");
                Ok(None)
            }
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn write(&self, source: Source, body: &[u8]) -> Result<(), StoreError> {
        // Validate and render before taking the lock; a malformed body must
        // leave the document untouched.
        let document = render_document(body)?;
        let path = self.document_path(source);

        let _guard = self.write_locks[source as usize].lock().await;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        fs::write(&path, document.as_bytes())
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        debug!(%source, bytes = document.len(), "document replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_data_dir() -> PathBuf {
        std::env::temp_dir().join(format!("docstore_{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn round_trip_preserves_document_semantics() -> Result<(), anyhow::Error> {
        let dir = temp_data_dir();
        let store = FsDocumentStore::new(&dir).await?;

        let written = serde_json::json!({"tasks": [{"id": 1, "name": "plan"}], "team": ["Alice"]});
        store.write(Source::Local, written.to_string().as_bytes()).await?;

        let read = store.read(Source::Local).await?.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&read)?;
        assert_eq!(parsed, written);

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn sources_are_isolated() -> Result<(), anyhow::Error> {
        let dir = temp_data_dir();
        let store = FsDocumentStore::new(&dir).await?;

        store.write(Source::Local, br#"{"a": 1}"#).await?;
        store.write(Source::Cloud, br#"{"b": 2}"#).await?;

        let local: serde_json::Value =
            serde_json::from_str(&store.read(Source::Local).await?.unwrap())?;
        let cloud: serde_json::Value =
            serde_json::from_str(&store.read(Source::Cloud).await?.unwrap())?;
        assert_eq!(local, serde_json::json!({"a": 1}));
        assert_eq!(cloud, serde_json::json!({"b": 2}));

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn write_fully_replaces_previous_document() -> Result<(), anyhow::Error> {
        let dir = temp_data_dir();
        let store = FsDocumentStore::new(&dir).await?;

        store.write(Source::Local, br#"{"a": 1}"#).await?;
        store.write(Source::Local, br#"{"b": 2}"#).await?;

        let read = store.read(Source::Local).await?.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&read)?;
        assert_eq!(parsed, serde_json::json!({"b": 2}));
        assert!(!read.contains("\"a\""));

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_document_reads_as_absent() -> Result<(), anyhow::Error> {
        let dir = temp_data_dir();
        let store = FsDocumentStore::new(&dir).await?;
        assert!(store.read(Source::Cloud).await?.is_none());
        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_json_leaves_document_untouched() -> Result<(), anyhow::Error> {
        let dir = temp_data_dir();
        let store = FsDocumentStore::new(&dir).await?;

        // Never-written source: a rejected write must not create the file.
        let err = store.write(Source::Local, b"not json").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidJson(_)));
        assert!(!store.document_path(Source::Local).exists());

        // Already-written source: a rejected write must not modify the file.
        store.write(Source::Local, br#"{"keep": true}"#).await?;
        let before = store.read(Source::Local).await?.unwrap();
        assert!(store.write(Source::Local, b"{broken").await.is_err());
        assert_eq!(store.read(Source::Local).await?.unwrap(), before);

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn on_disk_form_is_pretty_printed() -> Result<(), anyhow::Error> {
        let dir = temp_data_dir();
        let store = FsDocumentStore::new(&dir).await?;

        store.write(Source::Local, br#"{"name":"plan","days":[1,2]}"#).await?;
        let raw = fs::read_to_string(store.document_path(Source::Local)).await?;
        assert!(raw.contains("\n    \"name\""));
        assert!(raw.contains("\n        1,"));

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn init_is_idempotent_and_preserves_documents() -> Result<(), anyhow::Error> {
        let dir = temp_data_dir();
        let store = FsDocumentStore::new(&dir).await?;
        store.write(Source::Local, br#"{"v": 7}"#).await?;

        // Second initialization over an existing tree must not error and
        // must not disturb what is already stored.
        let reopened = FsDocumentStore::new(&dir).await?;
        let parsed: serde_json::Value =
            serde_json::from_str(&reopened.read(Source::Local).await?.unwrap())?;
        assert_eq!(parsed, serde_json::json!({"v": 7}));

        let _ = fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
