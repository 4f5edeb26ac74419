//! The wire-client capability: existence checks and downloads in a container.

use async_trait::async_trait;
use bytes::Bytes;

use cumulo_core::error::Result;

/// Result of a successful download: the full object body plus the
/// content-type the remote store declares for it.
///
/// The declared type is authoritative; nothing downstream infers a type
/// from the file name or the bytes themselves.
#[derive(Debug, Clone)]
pub struct GetOutput {
    /// Raw bytes of the retrieved object.
    pub data: Bytes,
    /// MIME content-type, if the backend provides one.
    pub content_type: Option<String>,
}

/// Capability to check and download objects in a named container.
///
/// Existence answers are authoritative only at the instant they are made;
/// no caching and no consistency guarantee across consecutive calls.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Whether the named container exists on the remote store.
    async fn container_exists(&self, container: &str) -> Result<bool>;

    /// Whether the named blob exists inside `container`.
    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool>;

    /// Downloads the blob in full, together with its declared content-type.
    async fn download(&self, container: &str, blob: &str) -> Result<GetOutput>;
}
