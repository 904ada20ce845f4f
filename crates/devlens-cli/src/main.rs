//! devlens - UI/API cross-verification harness entry point.

use anyhow::Result;
use clap::Parser;

use devlens_cli::{logger, Cli, Harness};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(&cli.log_level);

    let command = cli.command;
    let harness = Harness::new(&cli).await?;
    harness.run(command).await
}
