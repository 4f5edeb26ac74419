//! Property names and metadata keys shared by the connector family.

/// Inbound property carrying the container name.
pub const CONTAINER_NAME: &str = "containerName";

/// Inbound property carrying the blob file name.
pub const FILE_NAME: &str = "fileName";

/// Inbound property carrying the storage account name.
pub const ACCOUNT_NAME: &str = "accountName";

/// Inbound property carrying the storage account key.
pub const ACCOUNT_KEY: &str = "accountKey";

/// Outgoing transport metadata key for the response content-type.
pub const CONTENT_TYPE: &str = "ContentType";

/// Endpoint protocol used when assembling a connection string from
/// context properties.
pub const DEFAULT_PROTOCOL: &str = "https";
