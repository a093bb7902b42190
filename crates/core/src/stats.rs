//! Transfer timing

use std::time::{Duration, Instant};

use crate::size::format_size;

/// Timing of a single transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferStats {
    pub bytes: u64,
    pub elapsed: Duration,
}

impl TransferStats {
    /// Stats for `bytes` moved since `start`
    pub fn since(bytes: u64, start: Instant) -> Self {
        Self {
            bytes,
            elapsed: start.elapsed(),
        }
    }

    /// Average throughput in bytes per second
    ///
    /// A zero elapsed time counts as one nanosecond.
    pub fn throughput(&self) -> u64 {
        let secs = self.elapsed.max(Duration::from_nanos(1)).as_secs_f64();
        (self.bytes as f64 / secs) as u64
    }

    /// e.g. `5.00 MiB/s`
    pub fn throughput_human(&self) -> String {
        format!("{}/s", format_size(self.throughput()))
    }
}
