//! CLI command definitions and execution
//!
//! Global flags carry the connection settings and verbosity; each one can
//! also come from an `S3_*` environment variable, with the command line
//! taking precedence.

use clap::{Args, Parser, Subcommand};
use s3t_core::{ConnectionDescriptor, ConnectionOptions, Result};
use s3t_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::logging::{self, Verbosity};

pub mod remove;
pub mod upload;

/// s3-tester - S3 Tester
///
/// Uploads a file under a fresh UUID and reports throughput, or removes an
/// object, against an S3-compatible endpoint.
#[derive(Parser, Debug)]
#[command(name = "s3-tester")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// debug output
    #[arg(short = 'v', long, env = "S3_VERBOSE", global = true)]
    pub verbose: bool,

    /// trace output
    #[arg(long, visible_alias = "vv", env = "S3_VERY_VERBOSE", global = true)]
    pub very_verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// s3 endpoint (host only, no scheme or port)
    #[arg(short = 'e', long, env = "S3_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// s3 port
    #[arg(short = 'p', long, env = "S3_PORT", global = true)]
    pub port: Option<u16>,

    /// s3 access key
    #[arg(short = 'a', long, env = "S3_ACCESS_KEY", global = true, hide_env_values = true)]
    pub access_key: Option<String>,

    /// s3 secret key
    #[arg(short = 's', long, env = "S3_SECRET_KEY", global = true, hide_env_values = true)]
    pub secret_key: Option<String>,

    /// s3 bucket
    #[arg(short = 'b', long, env = "S3_BUCKET", global = true)]
    pub bucket: Option<String>,

    /// s3 insecure connection (plain HTTP)
    #[arg(long, env = "S3_INSECURE", global = true)]
    pub insecure: bool,
}

impl ConnectionArgs {
    pub fn options(&self) -> ConnectionOptions {
        ConnectionOptions {
            endpoint: self.endpoint.clone(),
            port: self.port,
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            bucket: self.bucket.clone(),
            insecure: self.insecure,
        }
    }

    /// Validate the settings and build an S3 client for them
    pub fn connect(&self) -> Result<S3Client> {
        let descriptor = ConnectionDescriptor::resolve(self.options())?;
        S3Client::new(&descriptor)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file to the specified S3 bucket
    #[command(visible_alias = "u")]
    Upload(upload::UploadArgs),

    /// Remove a file from the specified S3 bucket
    #[command(visible_alias = "r")]
    Remove(remove::RemoveArgs),
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    logging::init(Verbosity::from_flags(cli.verbose, cli.very_verbose));

    let connection = cli.connection;
    match cli.command {
        Commands::Upload(args) => upload::execute(args, || connection.connect()).await,
        Commands::Remove(args) => remove::execute(args, || connection.connect()).await,
    }
}
