//! Convenience re-exports.

pub use crate::client::ObjectStoreClient;
pub use crate::credentials::StorageCredentials;
pub use crate::memory::MemoryBlobStore;
pub use crate::providers::AzureBlobStore;
pub use crate::store::{BlobStore, GetOutput};
