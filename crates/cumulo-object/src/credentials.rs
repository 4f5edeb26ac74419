//! Storage-account credentials parsed from a connection string.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use url::Url;

use cumulo_core::error::{Error, Result};

/// Typed credentials for a storage account.
///
/// Parsed from the `Key=Value;...` connection-string format used across
/// this connector family. Only the segments listed here are interpreted;
/// unknown segments are tolerated so vendor-specific strings keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageCredentials {
    /// Storage account name.
    pub account_name: String,
    /// Base64-encoded storage account access key.
    #[serde(default)]
    pub account_key: Option<String>,
    /// Shared Access Signature token.
    #[serde(default)]
    pub sas_token: Option<String>,
    /// Custom blob endpoint URL (emulators or sovereign clouds).
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl StorageCredentials {
    /// Parses a `DefaultEndpointsProtocol=..;AccountName=..;AccountKey=..`
    /// connection string.
    ///
    /// A malformed segment or endpoint URL is an invalid-connection-string
    /// failure; an account key that does not decode as base64 is an
    /// invalid-account-key failure. The account key keeps everything after
    /// the first `=` so base64 padding survives.
    pub fn parse(connection_string: &str) -> Result<Self> {
        let mut account_name = None;
        let mut account_key = None;
        let mut sas_token = None;
        let mut endpoint = None;

        for segment in connection_string
            .split(';')
            .filter(|s| !s.trim().is_empty())
        {
            let Some((key, value)) = segment.split_once('=') else {
                return Err(Error::invalid_connection_string()
                    .with_detail(format!("(malformed segment {segment:?})")));
            };
            match key.trim() {
                "AccountName" => account_name = Some(value.trim().to_string()),
                "AccountKey" => account_key = Some(value.to_string()),
                "SharedAccessSignature" => sas_token = Some(value.to_string()),
                "BlobEndpoint" => endpoint = Some(value.trim().to_string()),
                // Recognized but not stored.
                "DefaultEndpointsProtocol" | "EndpointSuffix" => {}
                _ => {}
            }
        }

        let account_name = account_name.filter(|name| !name.is_empty()).ok_or_else(|| {
            Error::invalid_connection_string().with_detail("(AccountName is missing)")
        })?;

        if let Some(key) = &account_key {
            BASE64
                .decode(key)
                .map_err(|err| Error::invalid_account_key().with_source(err))?;
        }

        if let Some(raw) = &endpoint {
            Url::parse(raw).map_err(|err| Error::invalid_connection_string().with_source(err))?;
        }

        Ok(Self {
            account_name,
            account_key,
            sas_token,
            endpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use cumulo_core::error::ErrorKind;

    use super::*;

    #[test]
    fn parses_full_connection_string() {
        let creds = StorageCredentials::parse(
            "DefaultEndpointsProtocol=https;AccountName=devaccount;\
             AccountKey=ZGV2a2V5;EndpointSuffix=core.windows.net",
        )
        .unwrap();

        assert_eq!(creds.account_name, "devaccount");
        assert_eq!(creds.account_key.as_deref(), Some("ZGV2a2V5"));
        assert_eq!(creds.sas_token, None);
        assert_eq!(creds.endpoint, None);
    }

    #[test]
    fn account_key_keeps_base64_padding() {
        let creds =
            StorageCredentials::parse("AccountName=devaccount;AccountKey=AAECAwQFBgc=").unwrap();
        assert_eq!(creds.account_key.as_deref(), Some("AAECAwQFBgc="));
    }

    #[test]
    fn parses_custom_endpoint() {
        let creds = StorageCredentials::parse(
            "AccountName=devaccount;AccountKey=ZGV2a2V5;\
             BlobEndpoint=http://127.0.0.1:10000/devaccount",
        )
        .unwrap();
        assert_eq!(
            creds.endpoint.as_deref(),
            Some("http://127.0.0.1:10000/devaccount")
        );
    }

    #[test]
    fn missing_account_name_is_rejected() {
        let err = StorageCredentials::parse("AccountKey=ZGV2a2V5").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConnectionString);
    }

    #[test]
    fn malformed_segment_is_rejected() {
        let err = StorageCredentials::parse("AccountName=devaccount;garbage").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConnectionString);
        assert!(err.to_string().starts_with("Invalid input URL found."));
    }

    #[test]
    fn invalid_base64_key_is_rejected() {
        let err =
            StorageCredentials::parse("AccountName=devaccount;AccountKey=!!notbase64!!")
                .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAccountKey);
        assert!(err.to_string().starts_with("Invalid account key found."));
    }

    #[test]
    fn invalid_endpoint_url_is_rejected() {
        let err = StorageCredentials::parse(
            "AccountName=devaccount;AccountKey=ZGV2a2V5;BlobEndpoint=not a url",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConnectionString);
    }

    #[test]
    fn parses_sas_token() {
        let creds = StorageCredentials::parse(
            "AccountName=devaccount;SharedAccessSignature=sv=2024-01-01&sig=abc",
        )
        .unwrap();
        assert_eq!(
            creds.sas_token.as_deref(),
            Some("sv=2024-01-01&sig=abc")
        );
    }
}
