//! Azure Blob Storage provider using [`object_store::azure::MicrosoftAzureBuilder`].

use async_trait::async_trait;
use object_store::azure::MicrosoftAzureBuilder;

use cumulo_core::error::{Error, Result};

use crate::client::ObjectStoreClient;
use crate::credentials::StorageCredentials;
use crate::store::{BlobStore, GetOutput};

/// Azure Blob Storage-backed [`BlobStore`].
///
/// Builds one short-lived per-container client for each call; nothing is
/// pooled or cached across invocations.
pub struct AzureBlobStore {
    credentials: StorageCredentials,
}

impl AzureBlobStore {
    /// Creates a store over the given account credentials.
    pub fn new(credentials: StorageCredentials) -> Self {
        Self { credentials }
    }

    fn container_client(&self, container: &str) -> Result<ObjectStoreClient> {
        let mut builder = MicrosoftAzureBuilder::new()
            .with_container_name(container)
            .with_account(&self.credentials.account_name);

        if let Some(key) = &self.credentials.account_key {
            builder = builder.with_access_key(key);
        }

        if let Some(sas) = &self.credentials.sas_token {
            let pairs: Vec<(String, String)> = sas
                .trim_start_matches('?')
                .split('&')
                .filter_map(|pair| {
                    let mut parts = pair.splitn(2, '=');
                    Some((
                        parts.next()?.to_string(),
                        parts.next().unwrap_or("").to_string(),
                    ))
                })
                .collect();
            builder = builder.with_sas_authorization(pairs);
        }

        if let Some(endpoint) = &self.credentials.endpoint {
            builder = builder.with_endpoint(endpoint.clone());
            if endpoint.starts_with("http://") {
                builder = builder.with_allow_http(true);
            }
        }

        let store = builder
            .build()
            .map_err(|err| Error::invalid_connection_string().with_source(err))?;

        Ok(ObjectStoreClient::new(store))
    }
}

#[async_trait]
impl BlobStore for AzureBlobStore {
    async fn container_exists(&self, container: &str) -> Result<bool> {
        self.container_client(container)?.probe().await
    }

    async fn blob_exists(&self, container: &str, blob: &str) -> Result<bool> {
        self.container_client(container)?.exists(blob).await
    }

    async fn download(&self, container: &str, blob: &str) -> Result<GetOutput> {
        self.container_client(container)?.get(blob).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_credentials() -> StorageCredentials {
        StorageCredentials::parse(
            "DefaultEndpointsProtocol=https;AccountName=devaccount;AccountKey=ZGV2a2V5",
        )
        .unwrap()
    }

    #[test]
    fn builds_container_client_from_credentials() {
        let store = AzureBlobStore::new(dev_credentials());
        assert!(store.container_client("invoices").is_ok());
    }

    #[test]
    fn builds_client_for_emulator_endpoint() {
        let creds = StorageCredentials::parse(
            "AccountName=devaccount;AccountKey=ZGV2a2V5;\
             BlobEndpoint=http://127.0.0.1:10000/devaccount",
        )
        .unwrap();
        let store = AzureBlobStore::new(creds);
        assert!(store.container_client("invoices").is_ok());
    }
}
