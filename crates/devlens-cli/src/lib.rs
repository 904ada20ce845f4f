//! # devlens-cli
//!
//! Command-line surface and scenario driver for the devlens harness.
//!
//! Configuration (`--log-level`, `--ui-url`, `--api-url`, `--implicit-wait`)
//! is read once at process start and threaded through as explicit values;
//! no ambient globals reach the core components. Each invocation owns one
//! browser session and one API client; nothing is shared across runs.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod logger;
pub mod scenario;

pub use cli::{Cli, Command};
pub use scenario::Harness;
