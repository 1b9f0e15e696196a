//! S3 client
//!
//! One blocking GET per fetch. No retries: a failed fetch is reported to the
//! caller, which has its own fallbacks.

use crate::config::{Credentials, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::signing::{self, uri_encode};
use crate::ObjectStore;
use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use std::time::Instant;
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = concat!("aspect-store/", env!("CARGO_PKG_VERSION"));

/// S3 (or S3-compatible) object store client
#[derive(Debug, Clone)]
pub struct S3Client {
    inner: Client,
    config: StoreConfig,
    credentials: Option<Credentials>,
}

impl S3Client {
    /// Create a new client with specific configuration
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let inner = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let credentials = config.credentials();
        if credentials.is_none() {
            debug!("No credentials configured, requests will be anonymous");
        }

        Ok(Self {
            inner,
            config,
            credentials,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Build the URL an object is fetched from
    pub fn object_url(&self, bucket: &str, key: &str) -> StoreResult<Url> {
        if bucket.is_empty() {
            return Err(StoreError::InvalidKey("bucket name cannot be empty".into()));
        }
        if key.is_empty() {
            return Err(StoreError::InvalidKey("object key cannot be empty".into()));
        }

        let encoded_key = uri_encode(key, false);
        // Dotted bucket names break TLS hostname matching when used as a host prefix
        let path_style = self.config.path_style || bucket.contains('.');

        let url = match (&self.config.endpoint, path_style) {
            (Some(endpoint), _) => format!(
                "{}/{}/{encoded_key}",
                endpoint.trim_end_matches('/'),
                uri_encode(bucket, true)
            ),
            (None, true) => format!(
                "https://s3.{}.amazonaws.com/{}/{encoded_key}",
                self.config.region,
                uri_encode(bucket, true)
            ),
            (None, false) => format!(
                "https://{bucket}.s3.{}.amazonaws.com/{encoded_key}",
                self.config.region
            ),
        };

        Url::parse(&url).map_err(|e| StoreError::InvalidKey(format!("{url}: {e}")))
    }
}

impl ObjectStore for S3Client {
    #[instrument(skip(self))]
    fn fetch_object(&self, bucket: &str, key: &str) -> StoreResult<Vec<u8>> {
        let url = self.object_url(bucket, key)?;
        let mut request = self.inner.get(url.clone());

        if let Some(ref credentials) = self.credentials {
            let host = host_header(&url)?;
            let signed = signing::sign_get(&host, url.path(), credentials, &self.config.region, Utc::now());
            request = request
                .header(AUTHORIZATION, signed.authorization)
                .header("x-amz-date", signed.amz_date)
                .header("x-amz-content-sha256", signed.content_sha256);
            if let Some(token) = signed.security_token {
                request = request.header("x-amz-security-token", token);
            }
        }

        let start = Instant::now();
        let response = request.send()?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = s3_error_code(&body).unwrap_or_else(|| {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            });
            warn!(status = status.as_u16(), message = %message, "Object fetch rejected");
            return Err(StoreError::status(status.as_u16(), message));
        }

        let bytes = response.bytes()?.to_vec();
        debug!(
            size_bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Object fetched"
        );
        Ok(bytes)
    }
}

/// `Host` header value as reqwest will send it
fn host_header(url: &Url) -> StoreResult<String> {
    let host = url
        .host_str()
        .ok_or_else(|| StoreError::InvalidKey(format!("{url} has no host")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Pull `<Code>` out of an S3 XML error body
fn s3_error_code(body: &str) -> Option<String> {
    let start = body.find("<Code>")? + "<Code>".len();
    let end = body[start..].find("</Code>")? + start;
    let code = body[start..end].trim();
    (!code.is_empty()).then(|| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: StoreConfig) -> S3Client {
        S3Client::new(config).unwrap()
    }

    #[test]
    fn test_virtual_hosted_url() {
        let url = client(StoreConfig::default())
            .object_url("media", "images/summer 2024/banner.png")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://media.s3.ap-northeast-1.amazonaws.com/images/summer%202024/banner.png"
        );
    }

    #[test]
    fn test_dotted_bucket_uses_path_style() {
        let url = client(StoreConfig::default().with_region("us-east-1"))
            .object_url("media.example.com", "a.png")
            .unwrap();
        assert_eq!(url.as_str(), "https://s3.us-east-1.amazonaws.com/media.example.com/a.png");
    }

    #[test]
    fn test_custom_endpoint_url() {
        let url = client(StoreConfig::default().with_endpoint("http://localhost:9000/"))
            .object_url("media", "a.png")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/media/a.png");
        assert_eq!(host_header(&url).unwrap(), "localhost:9000");
    }

    #[test]
    fn test_empty_address_rejected() {
        let c = client(StoreConfig::default());
        assert!(matches!(c.object_url("", "a.png"), Err(StoreError::InvalidKey(_))));
        assert!(matches!(c.object_url("media", ""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = StoreConfig::default().with_region("");
        assert!(matches!(S3Client::new(config), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_s3_error_code() {
        let body = "<?xml version=\"1.0\"?><Error><Code>NoSuchKey</Code><Message>gone</Message></Error>";
        assert_eq!(s3_error_code(body).as_deref(), Some("NoSuchKey"));
        assert_eq!(s3_error_code("plain text"), None);
    }

    #[test]
    fn test_unreachable_endpoint_is_request_error() {
        // Port 9 (discard) on localhost is closed on test machines
        let c = client(
            StoreConfig::default()
                .with_endpoint("http://127.0.0.1:9")
                .with_timeout(std::time::Duration::from_secs(2)),
        );
        let err = c.fetch_object("media", "a.png").unwrap_err();
        assert!(matches!(err, StoreError::Request(_)));
    }
}
