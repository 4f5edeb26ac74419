//! Content-type driven construction of the response payload.

use bytes::Bytes;
use serde_json::Value;

use cumulo_core::error::{Error, Result};
use cumulo_core::pipeline::Payload;

/// MIME family used to key the handler registry.
///
/// Classification looks only at the declared content type; the file name
/// and the bytes themselves are never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFamily {
    /// `application/json` and `+json` structured types.
    Json,
    /// `text/*` plus the XML text types.
    Text,
    /// Everything else; passed through untouched.
    Unknown,
}

impl MediaFamily {
    /// Classify a declared content type, ignoring parameters and case.
    pub fn classify(declared: &str) -> Self {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        if essence == "application/json" || essence.ends_with("+json") {
            Self::Json
        } else if essence.starts_with("text/") || essence == "application/xml" {
            Self::Text
        } else {
            Self::Unknown
        }
    }
}

type BuildFn = fn(&Bytes) -> Result<Value>;

/// Resolved payload plus the content type that should travel with it.
#[derive(Debug)]
pub struct Resolved {
    /// The payload to install under the envelope.
    pub payload: Payload,
    /// Effective content type: the declared one when a handler matched,
    /// `None` for opaque attachments.
    pub content_type: Option<String>,
}

/// Registry of document builders keyed by [`MediaFamily`].
///
/// Selection happens strictly after a successful download, using the
/// content type the remote store declares. When no handler matches, the
/// bytes become an opaque attachment.
pub struct ContentTypeResolver {
    handlers: Vec<(MediaFamily, BuildFn)>,
}

impl ContentTypeResolver {
    /// Registry with the default JSON and text document builders.
    pub fn new() -> Self {
        Self {
            handlers: vec![
                (MediaFamily::Json, build_json),
                (MediaFamily::Text, build_text),
            ],
        }
    }

    /// Select a builder for the declared content type and construct the
    /// payload. Empty and unmatched types pass the bytes through.
    pub fn resolve(&self, data: Bytes, declared: Option<&str>) -> Result<Resolved> {
        let declared = declared.unwrap_or("").trim();
        if declared.is_empty() {
            return Ok(Resolved {
                payload: Payload::Attachment(data),
                content_type: None,
            });
        }

        let family = MediaFamily::classify(declared);
        match self.handlers.iter().find(|(f, _)| *f == family) {
            Some((_, build)) => Ok(Resolved {
                payload: Payload::Document(build(&data)?),
                content_type: Some(declared.to_string()),
            }),
            None => Ok(Resolved {
                payload: Payload::Attachment(data),
                content_type: None,
            }),
        }
    }
}

impl Default for ContentTypeResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn build_json(data: &Bytes) -> Result<Value> {
    serde_json::from_slice(data).map_err(|err| Error::response_build().with_source(err))
}

fn build_text(data: &Bytes) -> Result<Value> {
    let text =
        std::str::from_utf8(data).map_err(|err| Error::response_build().with_source(err))?;
    Ok(Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use cumulo_core::error::ErrorKind;

    use super::*;

    #[test]
    fn classifies_declared_types() {
        assert_eq!(MediaFamily::classify("application/json"), MediaFamily::Json);
        assert_eq!(
            MediaFamily::classify("application/json; charset=utf-8"),
            MediaFamily::Json
        );
        assert_eq!(
            MediaFamily::classify("application/problem+json"),
            MediaFamily::Json
        );
        assert_eq!(MediaFamily::classify("Text/Plain"), MediaFamily::Text);
        assert_eq!(MediaFamily::classify("text/csv"), MediaFamily::Text);
        assert_eq!(MediaFamily::classify("application/xml"), MediaFamily::Text);
        assert_eq!(
            MediaFamily::classify("application/octet-stream"),
            MediaFamily::Unknown
        );
        assert_eq!(MediaFamily::classify("image/png"), MediaFamily::Unknown);
    }

    #[test]
    fn json_builds_a_structured_document() {
        let resolver = ContentTypeResolver::new();
        let resolved = resolver
            .resolve(Bytes::from_static(b"{\"a\":1}"), Some("application/json"))
            .unwrap();

        assert_eq!(
            resolved.payload.as_document(),
            Some(&serde_json::json!({"a": 1}))
        );
        assert_eq!(resolved.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn text_builds_a_string_document() {
        let resolver = ContentTypeResolver::new();
        let resolved = resolver
            .resolve(Bytes::from_static(b"hello"), Some("text/plain"))
            .unwrap();

        assert_eq!(
            resolved.payload.as_document(),
            Some(&serde_json::json!("hello"))
        );
        assert_eq!(resolved.content_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn unknown_type_passes_bytes_through() {
        let resolver = ContentTypeResolver::new();
        let resolved = resolver
            .resolve(Bytes::from_static(b"\x00\x01"), Some("application/x-custom"))
            .unwrap();

        assert_eq!(
            resolved.payload.as_attachment(),
            Some(&Bytes::from_static(b"\x00\x01"))
        );
        assert_eq!(resolved.content_type, None);
    }

    #[test]
    fn empty_type_passes_bytes_through() {
        let resolver = ContentTypeResolver::new();
        for declared in [None, Some(""), Some("   ")] {
            let resolved = resolver
                .resolve(Bytes::from_static(b"data"), declared)
                .unwrap();
            assert!(resolved.payload.as_attachment().is_some());
            assert_eq!(resolved.content_type, None);
        }
    }

    #[test]
    fn malformed_json_is_a_build_failure() {
        let resolver = ContentTypeResolver::new();
        let err = resolver
            .resolve(Bytes::from_static(b"{not json"), Some("application/json"))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ResponseBuild);
        assert!(err.to_string().starts_with("Error while building the response."));
    }

    #[test]
    fn invalid_utf8_text_is_a_build_failure() {
        let resolver = ContentTypeResolver::new();
        let err = resolver
            .resolve(Bytes::from_static(b"\xff\xfe"), Some("text/plain"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResponseBuild);
    }
}
