//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3t-core.

use async_trait::async_trait;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Region, RequestChecksumCalculation};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};

use s3t_core::{ConnectionDescriptor, Error, FileUpload, ObjectName, ObjectStore, Result};

use crate::body::file_body;

/// Region used for signing; there is no region flag
pub const DEFAULT_REGION: &str = "us-east-1";

/// S3 client wrapper bound to one bucket
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

/// SDK configuration for a descriptor
///
/// Built from the descriptor alone: no AWS profile, environment or instance
/// metadata is consulted, and the SDK retry layer is disabled so that an
/// invocation sends exactly one request.
pub fn sdk_config(descriptor: &ConnectionDescriptor) -> Result<aws_sdk_s3::config::Builder> {
    let endpoint = descriptor.endpoint_url()?;

    // Build credentials provider
    let credentials = aws_credential_types::Credentials::new(
        descriptor.access_key(),
        descriptor.secret_key(),
        None, // session token
        None, // expiry
        "s3-tester-static-credentials",
    );

    Ok(aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .credentials_provider(credentials)
        .region(Region::new(DEFAULT_REGION))
        .endpoint_url(endpoint)
        // path-style addressing for compatibility with non-AWS backends
        .force_path_style(true)
        .retry_config(RetryConfig::disabled())
        .request_checksum_calculation(RequestChecksumCalculation::WhenRequired))
}

impl S3Client {
    /// Create a client for the descriptor's bucket
    ///
    /// Fails without touching the network when no bucket is configured.
    pub fn new(descriptor: &ConnectionDescriptor) -> Result<Self> {
        let config = sdk_config(descriptor)?.build();
        Self::from_conf(descriptor, config)
    }

    /// Create a client from a prepared SDK configuration
    pub fn from_conf(
        descriptor: &ConnectionDescriptor,
        config: aws_sdk_s3::Config,
    ) -> Result<Self> {
        let bucket = descriptor.bucket()?.to_string();

        tracing::info!(
            "Connecting to S3 host '{}' on port '{}'",
            descriptor.host(),
            descriptor.port()
        );
        tracing::debug!(
            endpoint = %descriptor.endpoint(),
            secure = descriptor.is_secure(),
            bucket = %bucket,
            access_key = %descriptor.access_key(),
            "S3 client configured"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(config),
            bucket,
        })
    }
}

/// Short description of an SDK failure
///
/// Service errors are reduced to their S3 error code and message; anything
/// else is the `Display` text of each error in the source chain.
fn describe<E>(err: &SdkError<E, HttpResponse>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    if let Some(service) = err.as_service_error() {
        let status = err.raw_response().map(|r| r.status().as_u16());
        return match (service.code(), service.message(), status) {
            (Some(code), Some(message), _) => format!("{code}: {message}"),
            (Some(code), None, _) => code.to_string(),
            (None, _, Some(status)) => format!("service error (HTTP {status})"),
            (None, _, None) => "service error".to_string(),
        };
    }

    let mut detail = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

/// Classify an SDK failure by the HTTP status of the response, if any
fn classify<E>(err: SdkError<E, HttpResponse>, subject: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    let detail = describe(&err);

    match status {
        Some(404) => Error::NotFound(format!("{subject}: {detail}")),
        Some(401) | Some(403) => Error::Auth(format!("{subject}: {detail}")),
        _ => Error::Network(detail),
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn put_object(&self, key: &ObjectName, upload: FileUpload) -> Result<()> {
        let size = i64::try_from(upload.size)
            .map_err(|_| Error::General(format!("File too large: {} bytes", upload.size)))?;

        tracing::trace!(bucket = %self.bucket, key = %key, size, "PUT object");

        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .content_length(size)
            .content_type(&upload.content_type)
            .body(file_body(upload.file, upload.progress))
            .send()
            .await
            .map_err(|e| classify(e, &format!("{}/{}", self.bucket, key)))?;

        Ok(())
    }

    async fn delete_object(&self, key: &ObjectName) -> Result<()> {
        tracing::trace!(bucket = %self.bucket, key = %key, "DELETE object");

        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .send()
            .await
            .map_err(|e| classify(e, &format!("{}/{}", self.bucket, key)))?;

        Ok(())
    }
}
