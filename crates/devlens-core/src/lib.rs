//! # devlens-core
//!
//! Pure data model and algorithms for UI/API cross-verification of a
//! device-management application.
//!
//! This crate has no I/O: it defines the normalized [`DeviceRecord`], the
//! field taxonomy used to select a comparison schema, the locator resolver
//! that maps logical lookups onto structural queries, and the reconciler
//! that computes the set difference between two record collections.
//!
//! ## Architecture
//!
//! - **record**: [`DeviceRecord`] and capacity normalization
//! - **field**: [`Field`] / [`FieldSet`] comparison-schema selection
//! - **locator**: [`LocatorQuery`] values and the static query tables
//! - **reconcile**: [`diff`] and [`Reconciliation`]
//!
//! The browser and REST collaborators live in sibling crates
//! (`devlens-browser`, `devlens-api`) and both produce `DeviceRecord`
//! values, which is what makes the two views comparable at all.
//!
//! ## Example
//!
//! ```
//! use devlens_core::{diff, DeviceRecord, FieldSet};
//!
//! let api = vec![DeviceRecord {
//!     id: Some("1".into()),
//!     system_name: Some("ALPHA".into()),
//!     device_type: Some("WINDOWS_SERVER".into()),
//!     hdd_capacity: Some("512".into()),
//!     ..DeviceRecord::default()
//! }];
//! let ui = api.clone();
//!
//! let result = diff(&api, &ui, &FieldSet::ui_only());
//! assert!(result.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod field;
pub mod locator;
pub mod reconcile;
pub mod record;

// Re-export main types for convenience
pub use field::{Field, FieldSet};
pub use locator::{queries, by_id, by_name, xpath_literal, LocatorQuery, LocatorStrategy};
pub use reconcile::{diff, Reconciliation};
pub use record::{normalize_capacity, DeviceRecord, NewDevice};
