//! Connection-string resolution and store construction seams.
//!
//! Both collaborators are injected into [`BlobDownload`](crate::download::BlobDownload):
//! a [`ConnectionProvider`] resolves the connection string for one
//! invocation, and a [`StoreFactory`] turns parsed credentials into a
//! connected [`BlobStore`].

use std::sync::Arc;

use async_trait::async_trait;

use cumulo_core::error::{Error, Result};
use cumulo_core::pipeline::MessageContext;
use cumulo_object::credentials::StorageCredentials;
use cumulo_object::providers::AzureBlobStore;
use cumulo_object::store::BlobStore;

use crate::consts;

/// Resolves the storage connection string for one invocation.
pub trait ConnectionProvider: Send + Sync {
    /// Produce the connection string to use for this message.
    fn connection_string(&self, ctx: &MessageContext) -> Result<String>;
}

/// Fixed connection string from configuration.
pub struct StaticConnectionProvider(String);

impl StaticConnectionProvider {
    /// Creates a provider that always hands out `connection_string`.
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self(connection_string.into())
    }
}

impl ConnectionProvider for StaticConnectionProvider {
    fn connection_string(&self, _ctx: &MessageContext) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Assembles the connection string from the `accountName` / `accountKey`
/// context properties, the convention used across this connector family.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextConnectionProvider;

impl ConnectionProvider for ContextConnectionProvider {
    fn connection_string(&self, ctx: &MessageContext) -> Result<String> {
        let account_name = account_property(ctx, consts::ACCOUNT_NAME)?;
        let account_key = account_property(ctx, consts::ACCOUNT_KEY)?;
        Ok(format!(
            "DefaultEndpointsProtocol={};AccountName={};AccountKey={}",
            consts::DEFAULT_PROTOCOL,
            account_name,
            account_key,
        ))
    }
}

fn account_property<'a>(ctx: &'a MessageContext, name: &str) -> Result<&'a str> {
    ctx.property(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            Error::invalid_connection_string().with_detail(format!("({name} property is missing)"))
        })
}

/// Builds a connected [`BlobStore`] from parsed credentials.
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Create a store handle owned by the current invocation.
    async fn connect(&self, credentials: &StorageCredentials) -> Result<Arc<dyn BlobStore>>;
}

/// Azure Blob Storage-backed factory.
#[derive(Debug, Default, Clone, Copy)]
pub struct AzureStoreFactory;

#[async_trait]
impl StoreFactory for AzureStoreFactory {
    async fn connect(&self, credentials: &StorageCredentials) -> Result<Arc<dyn BlobStore>> {
        Ok(Arc::new(AzureBlobStore::new(credentials.clone())))
    }
}

/// Hands out a pre-built store, bypassing credential resolution.
///
/// Used with [`MemoryBlobStore`](cumulo_object::memory::MemoryBlobStore) in
/// tests and local development.
pub struct FixedStoreFactory(Arc<dyn BlobStore>);

impl FixedStoreFactory {
    /// Creates a factory that always hands out `store`.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self(store)
    }
}

#[async_trait]
impl StoreFactory for FixedStoreFactory {
    async fn connect(&self, _credentials: &StorageCredentials) -> Result<Arc<dyn BlobStore>> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use cumulo_core::error::ErrorKind;

    use super::*;

    #[test]
    fn static_provider_ignores_the_context() {
        let provider = StaticConnectionProvider::new("AccountName=devaccount");
        let ctx = MessageContext::new();
        assert_eq!(
            provider.connection_string(&ctx).unwrap(),
            "AccountName=devaccount"
        );
    }

    #[test]
    fn context_provider_assembles_connection_string() {
        let ctx = MessageContext::new()
            .with_property(consts::ACCOUNT_NAME, "devaccount")
            .with_property(consts::ACCOUNT_KEY, "ZGV2a2V5");

        let provider = ContextConnectionProvider;
        assert_eq!(
            provider.connection_string(&ctx).unwrap(),
            "DefaultEndpointsProtocol=https;AccountName=devaccount;AccountKey=ZGV2a2V5"
        );
    }

    #[test]
    fn context_provider_rejects_missing_account() {
        let ctx = MessageContext::new().with_property(consts::ACCOUNT_KEY, "ZGV2a2V5");

        let err = ContextConnectionProvider.connection_string(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConnectionString);
    }
}
