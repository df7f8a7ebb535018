//! Object storage trait for raw document bytes.
//!
//! The pipeline consumes object storage only as a byte-source for
//! summarization-by-reference; upload and download of whole files is
//! otherwise the transport layer's concern.

use async_trait::async_trait;

use crate::error::Result;

/// A store for raw document bytes, keyed by opaque string keys.
///
/// Failures map to
/// [`RagError::PersistenceFailure`](crate::RagError::PersistenceFailure)
/// with the backend name.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download the bytes stored under `key`.
    async fn download(&self, key: &str) -> Result<Vec<u8>>;

    /// Store `bytes` under `key`, returning the key the bytes live under.
    async fn upload(&self, bytes: &[u8], key: &str) -> Result<String>;
}
