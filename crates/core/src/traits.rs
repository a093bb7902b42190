//! ObjectStore trait definition
//!
//! This trait defines the interface for the two S3 operations the tester
//! performs. It keeps the commands decoupled from the S3 SDK so they can be
//! exercised against an in-memory store in tests.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::object::ObjectName;

/// Content type used for every upload
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Receives the number of bytes handed to the transport, chunk by chunk
pub type ProgressSink = Arc<dyn Fn(u64) + Send + Sync>;

/// A local file ready to be streamed as a single PUT
pub struct FileUpload {
    /// Opened file, positioned at the start
    pub file: tokio::fs::File,

    /// Length in bytes, known up front
    pub size: u64,

    pub content_type: String,

    /// Advanced as the body stream is polled
    pub progress: ProgressSink,
}

impl FileUpload {
    pub fn new(file: tokio::fs::File, size: u64, progress: ProgressSink) -> Self {
        Self {
            file,
            size,
            content_type: OCTET_STREAM.to_string(),
            progress,
        }
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("size", &self.size)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Trait for S3-compatible storage operations
///
/// Implementations are bound to a single bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket every operation targets
    fn bucket(&self) -> &str;

    /// Upload a file as `key` in one request
    async fn put_object(&self, key: &ObjectName, upload: FileUpload) -> Result<()>;

    /// Delete `key`
    async fn delete_object(&self, key: &ObjectName) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_upload_defaults_to_octet_stream() {
        let file = tokio::fs::File::from_std(tempfile::tempfile().unwrap());
        let upload = FileUpload::new(file, 7, Arc::new(|_| {}));
        assert_eq!(upload.content_type, "application/octet-stream");
        assert_eq!(upload.size, 7);

        let rendered = format!("{upload:?}");
        assert!(rendered.contains("application/octet-stream"));
    }
}
