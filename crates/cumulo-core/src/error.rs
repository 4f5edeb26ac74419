//! Failure taxonomy for connector operations.

use strum::{AsRefStr, IntoStaticStr};
use thiserror::Error;

use crate::pipeline::StatusCode;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of failure a retrieval operation can surface.
///
/// The two not-found kinds are expected business outcomes reported as data
/// (a status payload); every other kind aborts the invocation and travels
/// to the caller's fault path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A mandatory request property is missing or empty.
    InvalidInput,
    /// The storage connection string or an embedded URL is malformed.
    InvalidConnectionString,
    /// The storage account key is not valid base64.
    InvalidAccountKey,
    /// The remote service failed during a storage call.
    StorageTransport,
    /// The container listing probe was rejected, typically bad credentials
    /// surfacing at list time rather than at connect time.
    ContainerListing,
    /// The container existence check answered no.
    ContainerNotFound,
    /// The blob existence check answered no.
    BlobNotFound,
    /// Local spooling or document construction failed after download.
    ResponseBuild,
    /// Anything the other kinds do not cover.
    Unexpected,
}

impl ErrorKind {
    /// Fixed human-readable prefix reported for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::InvalidInput => "Mandatory parameters cannot be empty.",
            Self::InvalidConnectionString => "Invalid input URL found.",
            Self::InvalidAccountKey => "Invalid account key found.",
            Self::StorageTransport => "Error occurred while connecting to the storage.",
            Self::ContainerListing => "Error occurred while listing the container",
            Self::ContainerNotFound => "Container does not exist.",
            Self::BlobNotFound => "Blob does not exist.",
            Self::ResponseBuild => "Error while building the response.",
            Self::Unexpected => "Unexpected error occurred.",
        }
    }

    /// Whether this kind is an expected outcome reported as a status
    /// payload rather than as a fault.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::ContainerNotFound | Self::BlobNotFound)
    }

    /// Wire status code for the soft kinds.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::ContainerNotFound => Some(StatusCode::ContainerDoesNotExist),
            Self::BlobNotFound => Some(StatusCode::BlobDoesNotExist),
            _ => None,
        }
    }
}

/// A structured operation error: a kind, an optional detail, and an
/// optional underlying cause.
///
/// Display output always starts with the kind's fixed prefix so callers
/// and operators see a stable message regardless of the detail attached.
#[derive(Debug, Error)]
#[error("{}{}", kind.prefix(), detail.as_ref().map(|d| format!(" {d}")).unwrap_or_default())]
pub struct Error {
    kind: ErrorKind,
    detail: Option<String>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            detail: None,
            source: None,
        }
    }

    /// Adds a detail suffix to this error.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Adds a source error to this error.
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new invalid connection string error.
    pub fn invalid_connection_string() -> Self {
        Self::new(ErrorKind::InvalidConnectionString)
    }

    /// Creates a new invalid account key error.
    pub fn invalid_account_key() -> Self {
        Self::new(ErrorKind::InvalidAccountKey)
    }

    /// Creates a new storage transport error.
    pub fn storage_transport() -> Self {
        Self::new(ErrorKind::StorageTransport)
    }

    /// Creates a new container listing error.
    pub fn container_listing() -> Self {
        Self::new(ErrorKind::ContainerListing)
    }

    /// Creates a new response build error.
    pub fn response_build() -> Self {
        Self::new(ErrorKind::ResponseBuild)
    }

    /// Creates a new unexpected error.
    pub fn unexpected() -> Self {
        Self::new(ErrorKind::Unexpected)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_starts_with_fixed_prefix() {
        let err = Error::storage_transport();
        assert_eq!(
            err.to_string(),
            "Error occurred while connecting to the storage."
        );

        let err = Error::invalid_input().with_detail("(containerName)");
        assert_eq!(
            err.to_string(),
            "Mandatory parameters cannot be empty. (containerName)"
        );
    }

    #[test]
    fn source_is_preserved() {
        let io = std::io::Error::other("connection reset");
        let err = Error::storage_transport().with_source(io);
        assert!(err.source().is_some());
        assert_eq!(err.kind(), ErrorKind::StorageTransport);
    }

    #[test]
    fn soft_kinds_map_to_status_codes() {
        assert!(ErrorKind::ContainerNotFound.is_soft());
        assert!(ErrorKind::BlobNotFound.is_soft());
        assert_eq!(
            ErrorKind::ContainerNotFound.status_code(),
            Some(StatusCode::ContainerDoesNotExist)
        );
        assert_eq!(
            ErrorKind::BlobNotFound.status_code(),
            Some(StatusCode::BlobDoesNotExist)
        );
    }

    #[test]
    fn hard_kinds_have_no_status_code() {
        for kind in [
            ErrorKind::InvalidInput,
            ErrorKind::InvalidConnectionString,
            ErrorKind::InvalidAccountKey,
            ErrorKind::StorageTransport,
            ErrorKind::ContainerListing,
            ErrorKind::ResponseBuild,
            ErrorKind::Unexpected,
        ] {
            assert!(!kind.is_soft());
            assert_eq!(kind.status_code(), None);
        }
    }

    #[test]
    fn kind_str_is_snake_case() {
        assert_eq!(Error::invalid_account_key().kind_str(), "invalid_account_key");
        assert_eq!(Error::unexpected().kind_str(), "unexpected");
    }
}
