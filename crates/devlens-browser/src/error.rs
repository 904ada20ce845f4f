//! Error types for browser-side operations.
//!
//! The taxonomy separates the three lookup failure modes the harness cares
//! about. A per-field miss inside a row is *not* represented here at all;
//! extraction records it as an unobserved field. A point lookup that never
//! resolves is [`UiError::LookupTimeout`], the variant callers match to
//! assert absence. A missing list container is
//! [`UiError::ContainerNotFound`], fatal for the read.

use std::time::Duration;
use thiserror::Error;

/// The main error type for browser collaborator operations.
#[derive(Debug, Error)]
pub enum UiError {
    /// Failed to launch the browser process.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure.
        reason: String,
        /// Optional underlying error that caused the failure.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or keep the DevTools connection.
    #[error("browser connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load.
        url: String,
        /// Reason for the navigation failure.
        reason: String,
    },

    /// The device list container never appeared. Fatal for a collection
    /// read; an *empty* list inside a present container is not an error.
    #[error("device list container not found: {query}")]
    ContainerNotFound {
        /// The container query that failed to resolve.
        query: String,
    },

    /// A point lookup did not resolve within the implicit-wait bound.
    ///
    /// Callers asserting absence (e.g. after a delete) must match exactly
    /// this variant; any other failure is a defect, not a confirmation.
    #[error("lookup '{target}' timed out after {timeout:?}")]
    LookupTimeout {
        /// Description of what was being looked up.
        target: String,
        /// How long the lookup polled before giving up.
        timeout: Duration,
    },

    /// A single, non-polled element lookup found no match.
    ///
    /// Inside record extraction this is recovered into an unobserved field;
    /// it only propagates from contexts where the element is required.
    #[error("no element matches {query}")]
    ElementNotFound {
        /// The query that found nothing.
        query: String,
    },

    /// The handle was acquired under an earlier page generation.
    ///
    /// Any navigation or reload invalidates all previously acquired handles;
    /// re-acquire instead of caching across the boundary.
    #[error("stale element handle: held generation {held}, page is at {current}")]
    StaleHandle {
        /// Generation the handle was acquired under.
        held: u64,
        /// The session's current page generation.
        current: u64,
    },

    /// The query strategy is not usable in this position (XPath lookups are
    /// page-scoped; element-scoped lookups are CSS only).
    #[error("unsupported query in this position: {query}")]
    UnsupportedQuery {
        /// The offending query.
        query: String,
    },

    /// JavaScript evaluation in the page context failed.
    #[error("script execution failed: {0}")]
    ScriptFailed(String),

    /// An operation was attempted on a closed session.
    #[error("browser session is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UiError {
    /// True for the one failure mode that confirms absence.
    #[must_use]
    pub fn is_lookup_timeout(&self) -> bool {
        matches!(self, UiError::LookupTimeout { .. })
    }
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, UiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_lookup_timeout_confirms_absence() {
        let timeout = UiError::LookupTimeout {
            target: "device id 9".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert!(timeout.is_lookup_timeout());

        let container = UiError::ContainerNotFound {
            query: ".list-devices".to_string(),
        };
        assert!(!container.is_lookup_timeout());

        let stale = UiError::StaleHandle { held: 1, current: 2 };
        assert!(!stale.is_lookup_timeout());
    }
}
