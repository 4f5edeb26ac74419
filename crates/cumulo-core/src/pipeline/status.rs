//! Status document reported for expected not-found outcomes.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

/// Wire status codes shared by every operation in this connector family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[derive(Serialize, Deserialize)]
pub enum StatusCode {
    /// The requested container does not exist on the remote store.
    #[strum(serialize = "ERR_CONTAINER_DOES_NOT_EXIST")]
    #[serde(rename = "ERR_CONTAINER_DOES_NOT_EXIST")]
    ContainerDoesNotExist,
    /// The requested blob does not exist inside the container.
    #[strum(serialize = "ERR_BLOB_DOES_NOT_EXIST")]
    #[serde(rename = "ERR_BLOB_DOES_NOT_EXIST")]
    BlobDoesNotExist,
}

/// Minimal status document `{ success, statusCode }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    /// Whether the operation reached its intended outcome.
    pub success: bool,
    /// Machine-readable status code.
    pub status_code: StatusCode,
}
