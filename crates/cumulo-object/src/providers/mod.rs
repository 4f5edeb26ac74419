//! Storage provider implementations.

mod azure;

pub use azure::AzureBlobStore;
