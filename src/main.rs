//! ocmdash - observe Open Cluster Management resources from the command line
//!
//! Talks to the OCM dashboard backend over HTTP and follows cluster changes
//! over its server-sent event stream.

use anyhow::Result;
use clap::Parser;
use ocmdash::cli::{self, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = cli::init_logging(args.debug)?;
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    cli::run(args).await
}
