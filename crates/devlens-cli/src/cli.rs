//! Command-line argument parsing.

use clap::{Parser, Subcommand};

/// UI/API cross-verification harness for the device-management application.
#[derive(Debug, Parser)]
#[command(name = "devlens", version, about)]
pub struct Cli {
    /// Log level for devlens crates (overridable via RUST_LOG).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Base URL of the client application.
    #[arg(long, env = "UI_URL")]
    pub ui_url: String,

    /// Base URL of the device API.
    #[arg(long, env = "API_URL")]
    pub api_url: String,

    /// Maximum seconds any point lookup may wait for an element to appear.
    #[arg(long, env = "IMP_WAIT", default_value_t = 10)]
    pub implicit_wait: u64,

    /// Run the browser visibly instead of headless (debugging).
    #[arg(long)]
    pub visible: bool,

    /// Scenario to run.
    #[command(subcommand)]
    pub command: Command,
}

/// The scenarios the harness can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Reconcile the API device list against the rendered UI.
    Verify,
    /// Create a device through the UI form and verify it on both sides.
    Create,
    /// Rename a device via the API and verify the UI caught up.
    Rename,
    /// Delete a device via the API and verify the UI no longer shows it.
    Delete,
    /// Run every scenario in sequence.
    All,
}
