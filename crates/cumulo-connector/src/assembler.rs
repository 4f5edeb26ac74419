//! Assembles outgoing bodies under the family result envelope.

use cumulo_core::pipeline::{
    MessageContext, Payload, ResponseEnvelope, StatusCode, StatusPayload,
};

use crate::consts;
use crate::resolver::Resolved;

/// Builds the caller-visible response and installs it on the context.
///
/// The envelope convention is injected at construction; the assembler
/// holds no other state, so one instance can serve any number of
/// invocations.
pub struct ResponseAssembler {
    envelope: ResponseEnvelope,
}

impl ResponseAssembler {
    /// Creates an assembler over the given envelope convention.
    pub fn new(envelope: ResponseEnvelope) -> Self {
        Self { envelope }
    }

    /// Installs the resolved document as the outgoing body.
    ///
    /// Any alternate serialization left by an earlier pipeline stage is
    /// cleared first so the response keeps exactly one representation.
    /// The effective content type is recorded as transport metadata when
    /// non-empty; opaque attachments record none.
    pub fn attach_document(&self, ctx: &mut MessageContext, resolved: Resolved) {
        ctx.clear_alternate_payload();
        ctx.set_body(self.envelope.wrap(resolved.payload));
        if let Some(ct) = resolved.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            ctx.set_transport_metadata(consts::CONTENT_TYPE, ct);
        }
    }

    /// Installs a `{ success, statusCode }` status document.
    ///
    /// Calling this a second time on the same context replaces the prior
    /// body.
    pub fn attach_status(&self, ctx: &mut MessageContext, success: bool, status_code: StatusCode) {
        ctx.clear_alternate_payload();
        ctx.set_body(self.envelope.wrap(Payload::Status(StatusPayload {
            success,
            status_code,
        })));
    }
}
