//! # devlens-browser
//!
//! The browser collaborator: headless Chrome sessions, element handles, and
//! UI-side record extraction for the device-management application.
//!
//! ## Architecture
//!
//! - **session**: [`UiSession`] browser lifecycle, navigation, implicit
//!   wait, page-generation tracking, and point lookups
//! - **element**: the object-safe [`UiElement`] capability trait and the
//!   [`PageGeneration`] staleness counter
//! - **handle**: the chromiumoxide-backed implementation
//! - **extract**: [`extract`] and [`read_all`], turning rows into records
//! - **form**: driving the create-device form
//! - **fake**: in-memory handles for Chrome-free unit tests
//!
//! ## Handle lifetimes
//!
//! A handle is valid only for the page generation it was acquired under.
//! `navigate` and `refresh` advance the generation; a held handle then fails
//! its next operation with [`UiError::StaleHandle`]. Re-acquire through the
//! session, never cache across a navigation boundary.
//!
//! ## Example
//!
//! ```ignore
//! use devlens_browser::{read_all, SessionConfig, UiSession};
//!
//! let session = UiSession::launch(SessionConfig::default()).await?;
//! session.navigate("http://localhost:3001").await?;
//!
//! let devices = read_all(&session).await?;
//! assert!(!devices.is_empty());
//!
//! session.close().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod element;
pub mod error;
pub mod extract;
pub mod fake;
pub mod form;
pub mod handle;
pub mod session;
pub mod wait;

// Re-export main types for convenience
pub use element::{PageGeneration, UiElement};
pub use error::{Result, UiError};
pub use extract::{extract, read_all};
pub use form::add_device;
pub use session::{SessionConfig, UiSession};
pub use wait::{WaitConfig, DEFAULT_IMPLICIT_WAIT, DEFAULT_POLL_INTERVAL};
