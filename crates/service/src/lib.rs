//! Service layer for the source-scoped document store.
//! - Separates storage mechanics from the HTTP layer.
//! - Exposes a capability trait so handlers can be tested against an
//!   in-memory store.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod file;
pub mod memory;
pub mod runtime;
pub mod source;
pub mod store;

pub use errors::StoreError;
pub use source::Source;
pub use store::DocumentStore;
