//! Terminal output beyond log records
//!
//! The only non-log output is the upload progress bar.

mod progress;

pub use progress::ProgressBar;
