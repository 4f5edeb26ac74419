//! Convenience re-exports.

pub use cumulo_core::error::{Error, ErrorKind, Result};
pub use cumulo_core::pipeline::{
    MessageContext, Payload, ResponseBody, ResponseEnvelope, StatusCode, StatusPayload,
};

pub use crate::assembler::ResponseAssembler;
pub use crate::config::ConnectorConfig;
pub use crate::connection::{
    AzureStoreFactory, ConnectionProvider, ContextConnectionProvider, FixedStoreFactory,
    StaticConnectionProvider, StoreFactory,
};
pub use crate::download::{BlobDownload, Retrieval, RetrievalRequest};
pub use crate::resolver::{ContentTypeResolver, MediaFamily, Resolved};
