//! Progress-reporting request body
//!
//! Streams a file through a buffered reader and reports every chunk to the
//! progress sink in the same poll that hands it to the transport.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use http_body::Frame;
use http_body_util::StreamBody;
use s3t_core::ProgressSink;
use tokio::io::{AsyncRead, BufReader};
use tokio_util::io::ReaderStream;

/// Read buffer and chunk size: 64 KiB
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Chunks of `reader`, each reported to `progress` as it is produced
pub fn progress_stream<R>(
    reader: R,
    progress: ProgressSink,
) -> impl Stream<Item = std::io::Result<Bytes>> + Send + Sync + 'static
where
    R: AsyncRead + Send + Sync + 'static,
{
    let reader = BufReader::with_capacity(CHUNK_SIZE, reader);
    ReaderStream::with_capacity(reader, CHUNK_SIZE).inspect_ok(move |chunk| {
        progress(chunk.len() as u64);
    })
}

/// Wrap a file into a non-retryable streaming body for a PUT
pub fn file_body(file: tokio::fs::File, progress: ProgressSink) -> ByteStream {
    let frames = progress_stream(file, progress).map_ok(Frame::data);
    ByteStream::from_body_1_x(StreamBody::new(frames))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicU64>, ProgressSink) {
        let seen = Arc::new(AtomicU64::new(0));
        let sink_seen = Arc::clone(&seen);
        let sink: ProgressSink = Arc::new(move |n| {
            sink_seen.fetch_add(n, Ordering::SeqCst);
        });
        (seen, sink)
    }

    #[tokio::test]
    async fn test_progress_tracks_every_byte() {
        let data = vec![7u8; CHUNK_SIZE * 3 + 11];
        let (seen, sink) = counter();

        let chunks: Vec<Bytes> = progress_stream(std::io::Cursor::new(data.clone()), sink)
            .try_collect()
            .await
            .unwrap();

        let total: usize = chunks.iter().map(Bytes::len).sum();
        assert_eq!(total, data.len());
        assert_eq!(seen.load(Ordering::SeqCst), data.len() as u64);
        assert!(chunks.iter().all(|c| c.len() <= CHUNK_SIZE));
    }

    #[tokio::test]
    async fn test_progress_advances_with_the_stream() {
        use futures::StreamExt;

        let data = vec![1u8; CHUNK_SIZE * 2];
        let (seen, sink) = counter();
        let mut stream = Box::pin(progress_stream(std::io::Cursor::new(data), sink));

        assert_eq!(seen.load(Ordering::SeqCst), 0);
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), first.len() as u64);
    }

    #[tokio::test]
    async fn test_file_body_collects_file_contents() {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"hello probe").unwrap();
        let file = tokio::fs::File::open(tmp.path()).await.unwrap();
        let (seen, sink) = counter();

        let collected = file_body(file, sink).collect().await.unwrap().into_bytes();
        assert_eq!(&collected[..], b"hello probe");
        assert_eq!(seen.load(Ordering::SeqCst), 11);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let file = tokio::fs::File::open(tmp.path()).await.unwrap();
        let (seen, sink) = counter();

        let collected = file_body(file, sink).collect().await.unwrap().into_bytes();
        assert!(collected.is_empty());
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }
}
