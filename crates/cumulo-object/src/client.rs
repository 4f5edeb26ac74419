//! Thin wrapper over [`object_store::ObjectStore`] with taxonomy mapping.
//!
//! [`ObjectStoreClient`] exposes only the calls a retrieval needs and maps
//! every `object_store` failure into the crate error taxonomy. Each public
//! method is instrumented with [`tracing`].

use std::sync::Arc;

use futures::StreamExt;
use object_store::path::Path;
use object_store::{Attribute, ObjectStore};

use cumulo_core::error::{Error, Result};

use crate::store::GetOutput;

/// Cloneable handle to any [`ObjectStore`] backend scoped to one container.
#[derive(Clone, Debug)]
pub struct ObjectStoreClient(pub Arc<dyn ObjectStore>);

impl ObjectStoreClient {
    /// Wrap a concrete [`ObjectStore`] implementation.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// Whether an object exists at `key`.
    ///
    /// Issues a HEAD; a not-found response answers `false`, any other
    /// failure is a transport fault.
    #[tracing::instrument(name = "object.exists", skip(self), fields(key))]
    pub async fn exists(&self, key: &str) -> Result<bool> {
        match self.0.head(&Path::from(key)).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(err) => Err(transport(err)),
        }
    }

    /// Whether the backing container is reachable.
    ///
    /// Pulls the first entry of an unprefixed listing: an empty listing
    /// still answers `true`, a not-found response answers `false`.
    /// Credential rejections surface here on some backends rather than at
    /// connect time and are reported as listing failures.
    #[tracing::instrument(name = "object.probe", skip(self))]
    pub async fn probe(&self) -> Result<bool> {
        let mut listing = self.0.list(None);
        match listing.next().await {
            None | Some(Ok(_)) => Ok(true),
            Some(Err(object_store::Error::NotFound { .. })) => Ok(false),
            Some(Err(err)) => Err(listing_failure(err)),
        }
    }

    /// Downloads the full object at `key` along with its declared
    /// content-type.
    #[tracing::instrument(name = "object.get", skip(self), fields(key))]
    pub async fn get(&self, key: &str) -> Result<GetOutput> {
        let result = self.0.get(&Path::from(key)).await.map_err(transport)?;
        let content_type = result
            .attributes
            .get(&Attribute::ContentType)
            .map(|v| v.to_string());
        let data = result.bytes().await.map_err(transport)?;
        Ok(GetOutput { data, content_type })
    }
}

/// Map a storage call failure to the transport kind.
fn transport(err: object_store::Error) -> Error {
    Error::storage_transport().with_source(err)
}

/// Map a listing probe failure; auth rejections get the listing kind.
fn listing_failure(err: object_store::Error) -> Error {
    match err {
        object_store::Error::Unauthenticated { .. }
        | object_store::Error::PermissionDenied { .. } => {
            Error::container_listing().with_source(err)
        }
        other => transport(other),
    }
}
