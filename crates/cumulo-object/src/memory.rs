//! In-memory [`BlobStore`] for tests and local development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, PutOptions, PutPayload};
use tokio::sync::RwLock;

use cumulo_core::error::{Error, Result};

use crate::client::ObjectStoreClient;
use crate::store::{BlobStore, GetOutput};

/// Map of named containers, each backed by [`object_store::memory::InMemory`].
///
/// Containers must be created explicitly; a container that was never
/// created does not exist, and downloads from it fail.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    containers: Arc<RwLock<HashMap<String, ObjectStoreClient>>>,
}

impl MemoryBlobStore {
    /// Creates an empty store with no containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container.
    pub async fn create_container(&self, name: &str) {
        self.containers
            .write()
            .await
            .entry(name.to_string())
            .or_insert_with(|| ObjectStoreClient::new(InMemory::new()));
    }

    /// Stores a blob, creating the container if needed.
    pub async fn put_blob(
        &self,
        container: &str,
        blob: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<()> {
        self.create_container(container).await;
        let client = self
            .containers
            .read()
            .await
            .get(container)
            .cloned()
            .ok_or_else(|| Error::unexpected().with_detail("(container vanished)"))?;

        let mut opts = PutOptions::default();
        if let Some(ct) = content_type {
            opts.attributes
                .insert(Attribute::ContentType, ct.to_string().into());
        }
        client
            .0
            .put_opts(&Path::from(blob), PutPayload::from(data), opts)
            .await
            .map_err(|err| Error::storage_transport().with_source(err))?;
        Ok(())
    }

    async fn container(&self, name: &str) -> Option<ObjectStoreClient> {
        self.containers.read().await.get(name).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn container_exists(&self, container: &str) -> Result<bool> {
        Ok(self.container(container).await.is_some())
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool> {
        match self.container(container).await {
            Some(client) => client.exists(blob).await,
            None => Ok(false),
        }
    }

    async fn download(&self, container: &str, blob: &str) -> Result<GetOutput> {
        let client = self.container(container).await.ok_or_else(|| {
            Error::storage_transport().with_detail(format!("(container {container:?} is gone)"))
        })?;
        client.get(blob).await
    }
}

#[cfg(test)]
mod tests {
    use cumulo_core::error::ErrorKind;

    use super::*;

    #[tokio::test]
    async fn containers_must_be_created() {
        let store = MemoryBlobStore::new();
        assert!(!store.container_exists("invoices").await.unwrap());

        store.create_container("invoices").await;
        assert!(store.container_exists("invoices").await.unwrap());
    }

    #[tokio::test]
    async fn put_and_download_round_trip() {
        let store = MemoryBlobStore::new();
        store
            .put_blob(
                "invoices",
                "a.json",
                Bytes::from_static(b"{\"a\":1}"),
                Some("application/json"),
            )
            .await
            .unwrap();

        assert!(store.blob_exists("invoices", "a.json").await.unwrap());
        let output = store.download("invoices", "a.json").await.unwrap();
        assert_eq!(output.data, Bytes::from_static(b"{\"a\":1}"));
        assert_eq!(output.content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn blob_in_missing_container_does_not_exist() {
        let store = MemoryBlobStore::new();
        assert!(!store.blob_exists("invoices", "a.json").await.unwrap());
    }

    #[tokio::test]
    async fn download_from_missing_container_is_a_fault() {
        let store = MemoryBlobStore::new();
        let err = store.download("invoices", "a.json").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageTransport);
    }
}
