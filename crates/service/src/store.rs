use async_trait::async_trait;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::errors::StoreError;
use crate::source::Source;

/// Trait abstraction for per-source document storage.
/// Implementations can be file-backed or in-memory.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the current document for a source. `None` means no document
    /// has been written yet; that is a valid state, not an error.
    async fn read(&self, source: Source) -> Result<Option<String>, StoreError>;

    /// Validate the body as JSON and replace the whole document for a
    /// source. Never merges; the previous content is gone after success.
    async fn write(&self, source: Source, body: &[u8]) -> Result<(), StoreError>;
}

/// Parse the raw body and render the canonical on-disk form: pretty-printed
/// JSON with 4-space indentation. Rejects anything that is not valid JSON
/// before any storage is touched.
pub(crate) fn render_document(body: &[u8]) -> Result<String, StoreError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| StoreError::InvalidJson(e.to_string()))?;
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::Io(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| StoreError::Io(e.to_string()))
}
