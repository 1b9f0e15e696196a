//! Configuration for the S3 client
//!
//! Built from the `[store]` section of the configuration file, then overlaid
//! with the standard AWS environment variables. The environment is read once,
//! by the caller, never from inside the client.

use crate::error::{StoreError, StoreResult};
use aspect_core::config::StoreSettings;
use std::env;
use std::fmt;
use std::time::Duration;

/// Default region, matching the settings schema
const DEFAULT_REGION: &str = "ap-northeast-1";

/// Static credentials for request signing
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Access key id
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Session token for temporary credentials
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Client configuration
#[derive(Clone)]
pub struct StoreConfig {
    /// Region for the endpoint host and the signing scope
    pub region: String,
    /// Custom S3-compatible endpoint
    pub endpoint: Option<String>,
    /// Access key id
    pub access_key_id: Option<String>,
    /// Secret access key
    pub secret_access_key: Option<String>,
    /// Session token
    pub session_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Address buckets as a path segment
    pub path_style: bool,
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<redacted>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("path_style", &self.path_style)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            timeout: Duration::from_secs(30),
            path_style: false,
        }
    }
}

impl StoreConfig {
    /// Create configuration from file settings
    #[must_use]
    pub fn from_settings(settings: &StoreSettings) -> Self {
        Self {
            region: settings.region.clone(),
            endpoint: settings.endpoint.clone(),
            access_key_id: settings.access_key_id.clone(),
            secret_access_key: settings.secret_access_key.clone(),
            session_token: settings.session_token.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            path_style: settings.path_style,
        }
    }

    /// Overlay values from the process environment
    ///
    /// Reads the following environment variables:
    /// - `AWS_REGION` or `AWS_DEFAULT_REGION`
    /// - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` (taken as a pair)
    /// - `AWS_SESSION_TOKEN`
    /// - `AWS_ENDPOINT_URL_S3` or `AWS_ENDPOINT_URL`
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|name| env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable lookup
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(region) = non_empty("AWS_REGION").or_else(|| non_empty("AWS_DEFAULT_REGION")) {
            self.region = region;
        }

        if let (Some(id), Some(secret)) = (
            non_empty("AWS_ACCESS_KEY_ID"),
            non_empty("AWS_SECRET_ACCESS_KEY"),
        ) {
            self.access_key_id = Some(id);
            self.secret_access_key = Some(secret);
            self.session_token = non_empty("AWS_SESSION_TOKEN");
        }

        if let Some(endpoint) =
            non_empty("AWS_ENDPOINT_URL_S3").or_else(|| non_empty("AWS_ENDPOINT_URL"))
        {
            self.endpoint = Some(endpoint);
        }

        self
    }

    /// Builder-style method to set the region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Builder-style method to set a custom endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Builder-style method to set static credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Builder-style method to set a session token
    #[must_use]
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to force path-style addressing
    #[must_use]
    pub fn with_path_style(mut self, path_style: bool) -> Self {
        self.path_style = path_style;
        self
    }

    /// Credentials, if both halves of the key pair are set
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) => Some(Credentials {
                access_key_id: id.clone(),
                secret_access_key: secret.clone(),
                session_token: self.session_token.clone(),
            }),
            _ => None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> StoreResult<()> {
        if self.region.trim().is_empty() {
            return Err(StoreError::config("region cannot be empty"));
        }

        if self.access_key_id.is_some() != self.secret_access_key.is_some() {
            return Err(StoreError::config(
                "access key id and secret access key must be given together",
            ));
        }

        if let Some(ref endpoint) = self.endpoint {
            let url = reqwest::Url::parse(endpoint)
                .map_err(|e| StoreError::config(format!("invalid endpoint {endpoint}: {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(StoreError::config("endpoint must start with http:// or https://"));
            }
        }

        if self.timeout.is_zero() {
            return Err(StoreError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
