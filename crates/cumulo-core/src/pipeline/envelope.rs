//! Standard result envelope shared by the connector family.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::StatusPayload;

/// Default envelope namespace.
pub const DEFAULT_NAMESPACE: &str = "http://connector.cumulo.dev/storage";

/// Default root element name.
pub const DEFAULT_ROOT: &str = "result";

/// The envelope convention: a namespace and a root element under which
/// every response of this connector family is installed.
///
/// The convention is injected into the assembler as a plain value; nothing
/// in this crate holds it as global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseEnvelope {
    /// Namespace the root element is declared under.
    pub namespace: String,
    /// Name of the root element.
    pub root: String,
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            root: DEFAULT_ROOT.to_string(),
        }
    }
}

impl ResponseEnvelope {
    /// Wrap a payload under this envelope convention.
    pub fn wrap(&self, payload: Payload) -> ResponseBody {
        ResponseBody {
            namespace: self.namespace.clone(),
            root: self.root.clone(),
            payload,
        }
    }
}

/// The outgoing body installed into a [`MessageContext`](super::MessageContext).
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseBody {
    /// Namespace of the envelope root.
    pub namespace: String,
    /// Envelope root element name.
    pub root: String,
    /// Content under the root.
    pub payload: Payload,
}

/// Content carried under the envelope root.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A structured document built from downloaded bytes.
    Document(Value),
    /// Raw bytes attached untouched.
    Attachment(Bytes),
    /// A success flag plus status code.
    Status(StatusPayload),
}

impl Payload {
    /// Returns the structured document, if this is one.
    pub fn as_document(&self) -> Option<&Value> {
        match self {
            Self::Document(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the raw attachment bytes, if this is one.
    pub fn as_attachment(&self) -> Option<&Bytes> {
        match self {
            Self::Attachment(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the status document, if this is one.
    pub fn as_status(&self) -> Option<&StatusPayload> {
        match self {
            Self::Status(status) => Some(status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::StatusCode;
    use super::*;

    #[test]
    fn wrap_carries_the_convention() {
        let envelope = ResponseEnvelope::default();
        let body = envelope.wrap(Payload::Document(serde_json::json!({"a": 1})));

        assert_eq!(body.namespace, DEFAULT_NAMESPACE);
        assert_eq!(body.root, "result");
        assert_eq!(
            body.payload.as_document(),
            Some(&serde_json::json!({"a": 1}))
        );
    }

    #[test]
    fn custom_convention_is_respected() {
        let envelope = ResponseEnvelope {
            namespace: "urn:example".to_string(),
            root: "outcome".to_string(),
        };
        let body = envelope.wrap(Payload::Status(StatusPayload {
            success: false,
            status_code: StatusCode::ContainerDoesNotExist,
        }));

        assert_eq!(body.namespace, "urn:example");
        assert_eq!(body.root, "outcome");
        assert!(body.payload.as_status().is_some());
        assert!(body.payload.as_document().is_none());
    }

    #[test]
    fn payload_accessors_are_exclusive() {
        let attachment = Payload::Attachment(Bytes::from_static(b"\x00\x01"));
        assert!(attachment.as_attachment().is_some());
        assert!(attachment.as_document().is_none());
        assert!(attachment.as_status().is_none());
    }
}
