use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid JSON document: {0}")]
    InvalidJson(String),
    #[error("storage error: {0}")]
    Io(String),
}
