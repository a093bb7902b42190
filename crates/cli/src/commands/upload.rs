//! upload command - Upload a file under a fresh name
//!
//! Streams one local file as a single PUT, keyed by a newly minted UUID,
//! and reports how long it took and the average throughput.
//!
//! A failed PUT is logged but does not fail the command: the timing report
//! is still printed and the exit code stays 0.

use std::path::Path;
use std::time::Instant;

use clap::Args;
use s3t_core::{
    Error, FileUpload, ObjectName, ObjectStore, Result, TransferStats, format_size,
};

use crate::exit_code::ExitCode;
use crate::logging;
use crate::output::ProgressBar;

/// Upload a file
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// File to upload
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,
}

/// Outcome of one upload
#[derive(Debug)]
pub struct UploadReport {
    pub object_name: ObjectName,
    pub stats: TransferStats,
    /// Set when the PUT itself failed
    pub put_error: Option<Error>,
}

/// Execute the upload command
pub async fn execute<S, F>(args: UploadArgs, connect: F) -> ExitCode
where
    S: ObjectStore,
    F: FnOnce() -> Result<S>,
{
    match run(&args.paths, connect).await {
        Ok(_) => ExitCode::Success,
        Err(e) => {
            logging::fatal(&e);
            ExitCode::from(&e)
        }
    }
}

/// Upload the single file in `paths`
///
/// `connect` is only called once the file has been opened, so argument and
/// local file problems are reported before any connection setting is
/// looked at.
pub async fn run<S, F>(paths: &[String], connect: F) -> Result<UploadReport>
where
    S: ObjectStore,
    F: FnOnce() -> Result<S>,
{
    let [path] = paths else {
        return Err(Error::Usage("Please specify a file to upload".into()));
    };
    let path = Path::new(path);

    let metadata = tokio::fs::metadata(path).await.map_err(|source| Error::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.is_dir() {
        return Err(Error::Open {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "is a directory"),
        });
    }
    let size = metadata.len();

    tracing::info!(
        "File '{}' exists with size '{}'",
        path.display(),
        format_size(size)
    );

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let object_name = ObjectName::mint();
    let store = connect()?;

    tracing::info!("Uploading file '{}' as ID '{}'", path.display(), object_name);
    tracing::debug!(bucket = store.bucket(), key = %object_name, size, "Starting PUT");

    let progress = ProgressBar::new(size);
    let upload = FileUpload::new(file, size, progress.sink());

    let start = Instant::now();
    let result = store.put_object(&object_name, upload).await;
    let stats = TransferStats::since(size, start);
    progress.finish();

    if let Err(e) = &result {
        tracing::error!("Failed to upload: {e}");
    }
    tracing::info!(
        "Uploaded file with '{}' in {:?}",
        format_size(size),
        stats.elapsed
    );
    tracing::info!("Average upload speed: {}", stats.throughput_human());

    Ok(UploadReport {
        object_name,
        stats,
        put_error: result.err(),
    })
}
