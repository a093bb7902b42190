//! Connection settings
//!
//! `ConnectionOptions` holds whatever the command line and environment
//! provided. `ConnectionDescriptor` is the validated form every action
//! works from: it cannot exist without a host, a non-zero port and both
//! halves of the V4 credential pair.

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Raw, unvalidated connection settings
#[derive(Clone, Default)]
pub struct ConnectionOptions {
    /// S3 host, without scheme or port
    pub endpoint: Option<String>,
    /// TCP port; zero means unset
    pub port: Option<u16>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub bucket: Option<String>,
    /// Disable TLS
    pub insecure: bool,
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("endpoint", &self.endpoint)
            .field("port", &self.port)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("bucket", &self.bucket)
            .field("insecure", &self.insecure)
            .finish()
    }
}

/// Validated connection to an S3-compatible endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
    host: String,
    port: u16,
    access_key: String,
    secret_key: String,
    bucket: Option<String>,
    secure: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl ConnectionDescriptor {
    /// Validate raw options into a descriptor
    ///
    /// Fields are checked in a fixed order (endpoint, port, access key,
    /// secret key) and the first missing one is reported.
    pub fn resolve(options: ConnectionOptions) -> Result<Self> {
        let host = non_empty(options.endpoint)
            .ok_or_else(|| Error::Config("Please specify an S3 endpoint".into()))?;
        let port = options
            .port
            .filter(|p| *p != 0)
            .ok_or_else(|| Error::Config("Please specify an S3 port".into()))?;
        let access_key = non_empty(options.access_key)
            .ok_or_else(|| Error::Config("Please specify an S3 access key".into()))?;
        let secret_key = non_empty(options.secret_key)
            .ok_or_else(|| Error::Config("Please specify an S3 secret key".into()))?;

        let descriptor = Self {
            host,
            port,
            access_key,
            secret_key,
            bucket: non_empty(options.bucket),
            secure: !options.insecure,
        };
        descriptor.endpoint_url()?;

        Ok(descriptor)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Bucket the actions operate on
    pub fn bucket(&self) -> Result<&str> {
        self.bucket
            .as_deref()
            .ok_or_else(|| Error::Config("Please specify an S3 bucket".into()))
    }

    /// `<host>:<port>`
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full endpoint URL, with the scheme chosen by the secure flag
    ///
    /// The host must be a bare host name or address: anything that makes
    /// the composed URL carry a different host, port or a path is rejected.
    pub fn endpoint_url(&self) -> Result<String> {
        let scheme = if self.secure { "https" } else { "http" };
        let raw = format!("{scheme}://{}", self.endpoint());
        let url = Url::parse(&raw)?;

        if url.port_or_known_default() != Some(self.port)
            || url.path() != "/"
            || url.query().is_some()
            || !url.username().is_empty()
        {
            return Err(Error::Config(format!(
                "Invalid S3 endpoint '{}': expected a host without scheme, port or path",
                self.host
            )));
        }

        Ok(raw)
    }
}

impl fmt::Debug for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDescriptor")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("secure", &self.secure)
            .finish()
    }
}
