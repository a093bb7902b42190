//! s3-tester - S3 upload/remove probe
//!
//! Uploads a single file as a freshly named object and reports throughput,
//! or removes a named object, against an S3-compatible endpoint.

use clap::Parser;

use s3_tester::commands::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
