//! Console logging
//!
//! One process-wide `tracing` subscriber writing human-readable lines to
//! stdout, prefixed with a millisecond UTC timestamp
//! (`2024-01-31T12:00:00.000Z`). It is installed once per process, at the
//! start of a subcommand.

use std::fmt;
use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt as sub_fmt, prelude::*};

/// Crates whose records follow the verbosity switch; everything else is
/// kept at `warn`.
const OWN_TARGETS: [&str; 3] = ["s3_tester", "s3t_core", "s3t_s3"];

/// Selected log verbosity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    #[default]
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// `very_verbose` wins over `verbose`
    pub fn from_flags(verbose: bool, very_verbose: bool) -> Self {
        if very_verbose {
            Self::Trace
        } else if verbose {
            Self::Debug
        } else {
            Self::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    pub fn level(self) -> LevelFilter {
        parse_level(self.as_str())
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a level name to a filter; unknown names mean `info`
pub fn parse_level(name: &str) -> LevelFilter {
    match name {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "err" | "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Timestamp prefix, rendered with millisecond precision
pub fn console_timestamp(ts: jiff::Timestamp) -> String {
    format!("{ts:.3}")
}

struct ConsoleTime;

impl FormatTime for ConsoleTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        w.write_str(&console_timestamp(jiff::Timestamp::now()))
    }
}

fn filter_for(verbosity: Verbosity) -> EnvFilter {
    let level = verbosity.level();
    let directives = OWN_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(format!("warn,{directives}"))
}

/// Install the console subscriber and announce the active level
///
/// Only the first call in a process installs anything.
pub fn init(verbosity: Verbosity) {
    let console = sub_fmt::layer()
        .with_writer(std::io::stdout)
        .with_timer(ConsoleTime)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal());

    let _ = tracing_subscriber::registry()
        .with(console)
        .with(filter_for(verbosity))
        .try_init();

    tracing::info!("Logger initialized on level '{verbosity}'");
}

/// Emit the last record of a failed command
pub fn fatal(message: impl fmt::Display) {
    tracing::error!(fatal = true, "{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), LevelFilter::TRACE);
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level("info"), LevelFilter::INFO);
        assert_eq!(parse_level("warn"), LevelFilter::WARN);
        assert_eq!(parse_level("warning"), LevelFilter::WARN);
        assert_eq!(parse_level("err"), LevelFilter::ERROR);
        assert_eq!(parse_level("error"), LevelFilter::ERROR);
    }

    #[test]
    fn test_parse_level_defaults_to_info() {
        assert_eq!(parse_level(""), LevelFilter::INFO);
        assert_eq!(parse_level("fatal"), LevelFilter::INFO);
        assert_eq!(parse_level("TRACE"), LevelFilter::INFO);
    }

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Info);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Trace);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Trace);
    }

    #[test]
    fn test_verbosity_level() {
        assert_eq!(Verbosity::default().level(), LevelFilter::INFO);
        assert_eq!(Verbosity::Debug.level(), LevelFilter::DEBUG);
        assert_eq!(Verbosity::Trace.to_string(), "trace");
    }

    #[test]
    fn test_console_timestamp() {
        let ts = jiff::Timestamp::new(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(console_timestamp(ts), "2023-11-14T22:13:20.123Z");

        let ts = jiff::Timestamp::from_second(0).unwrap();
        assert_eq!(console_timestamp(ts), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_filter_scopes_own_crates() {
        let rendered = filter_for(Verbosity::Debug).to_string().to_lowercase();
        assert!(rendered.contains("s3_tester=debug"), "{rendered}");
        assert!(rendered.contains("s3t_s3=debug"), "{rendered}");
        assert!(rendered.contains("warn"), "{rendered}");
    }

    #[test]
    fn test_init_is_idempotent() {
        init(Verbosity::Info);
        init(Verbosity::Debug);
    }
}
