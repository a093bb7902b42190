//! s3t-core: Core library for the s3-tester probe
//!
//! This crate provides the pieces shared by the CLI and the S3 adapter:
//! - Connection settings and their validation
//! - Object names
//! - Size formatting and transfer statistics
//! - ObjectStore trait for the upload and delete operations
//!
//! It does not depend on any S3 SDK.

pub mod descriptor;
pub mod error;
pub mod object;
pub mod size;
pub mod stats;
pub mod traits;

pub use descriptor::{ConnectionDescriptor, ConnectionOptions};
pub use error::{Error, Result};
pub use object::ObjectName;
pub use size::format_size;
pub use stats::TransferStats;
pub use traits::{FileUpload, OCTET_STREAM, ObjectStore, ProgressSink};
