//! # devlens-api
//!
//! The REST collaborator: a thin, typed client for the device-management
//! API. The harness treats it purely as a source (and mutator) of
//! [`DeviceRecord`](devlens_core::DeviceRecord) values; transport details
//! stay inside this crate.
//!
//! ## Example
//!
//! ```ignore
//! use devlens_api::DeviceApi;
//!
//! let api = DeviceApi::new("http://localhost:3000")?;
//! let devices = api.get_devices().await?;
//! assert!(!devices.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod wire;

pub use client::DeviceApi;
pub use error::{ApiError, Result};
pub use wire::ApiDevice;
