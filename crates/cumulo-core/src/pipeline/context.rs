//! Per-message context carried through the hosting pipeline.

use std::collections::HashMap;

use bytes::Bytes;
use jiff::Timestamp;
use uuid::Uuid;

use super::ResponseBody;

/// Context for one message travelling through the hosting pipeline.
///
/// Inbound string properties are read by operations; the outgoing body,
/// transport metadata, and the alternate-serialization marker are written
/// by them. One context belongs to exactly one invocation at a time.
#[derive(Debug, Clone)]
pub struct MessageContext {
    message_id: Uuid,
    received_at: Timestamp,
    properties: HashMap<String, String>,
    transport: HashMap<String, String>,
    body: Option<ResponseBody>,
    alternate: Option<Bytes>,
}

impl MessageContext {
    /// Creates an empty context with a fresh message id.
    pub fn new() -> Self {
        Self {
            message_id: Uuid::now_v7(),
            received_at: Timestamp::now(),
            properties: HashMap::new(),
            transport: HashMap::new(),
            body: None,
            alternate: None,
        }
    }

    /// Unique identifier of this message.
    pub fn message_id(&self) -> Uuid {
        self.message_id
    }

    /// Timestamp at which the message entered the pipeline.
    pub fn received_at(&self) -> Timestamp {
        self.received_at
    }

    /// Looks up an inbound property.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Sets an inbound property.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`set_property`](Self::set_property).
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Looks up outgoing transport metadata.
    pub fn transport_metadata(&self, name: &str) -> Option<&str> {
        self.transport.get(name).map(String::as_str)
    }

    /// Records outgoing transport metadata.
    pub fn set_transport_metadata(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.transport.insert(name.into(), value.into());
    }

    /// The outgoing body, if one has been installed.
    pub fn body(&self) -> Option<&ResponseBody> {
        self.body.as_ref()
    }

    /// Installs the outgoing body, replacing any prior one.
    pub fn set_body(&mut self, body: ResponseBody) {
        self.body = Some(body);
    }

    /// A pre-rendered alternate serialization of the outgoing body left by
    /// an earlier pipeline stage, if any.
    pub fn alternate_payload(&self) -> Option<&Bytes> {
        self.alternate.as_ref()
    }

    /// Attaches an alternate serialization of the outgoing body.
    pub fn set_alternate_payload(&mut self, data: Bytes) {
        self.alternate = Some(data);
    }

    /// Drops the alternate serialization so the body has exactly one
    /// representation.
    pub fn clear_alternate_payload(&mut self) {
        self.alternate = None;
    }
}

impl Default for MessageContext {
    fn default() -> Self {
        Self::new()
    }
}
