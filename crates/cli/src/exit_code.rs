//! Exit code definitions for s3-tester
//!
//! Scripts driving the probe branch on these values, so existing codes keep
//! their meaning.

use s3t_core::Error;

/// Exit codes for the s3-tester application.
///
/// An upload whose PUT failed still exits with `Success`: the timing report
/// is the product of that command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error, including local I/O failures
    GeneralError = 1,

    /// Missing arguments or connection settings
    UsageError = 2,

    /// Remote request failed
    NetworkError = 3,

    /// Authentication or permission failure
    AuthError = 4,

    /// Local file or remote object does not exist
    NotFound = 5,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            _ => None,
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        Self::from_i32(err.exit_code()).unwrap_or(Self::GeneralError)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
