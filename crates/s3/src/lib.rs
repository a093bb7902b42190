//! s3t-s3: S3 SDK adapter for the s3-tester probe
//!
//! This crate provides the implementation of the ObjectStore trait
//! using the aws-sdk-s3 crate. It is the only crate that directly
//! depends on the AWS SDK.

pub mod body;
pub mod client;

pub use client::S3Client;
