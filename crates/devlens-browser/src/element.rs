//! The element-handle seam between the harness and the live document.
//!
//! [`UiElement`] is the capability set record extraction needs: locate a
//! descendant, read text or an attribute, report visibility, and a few
//! mutating affordances for driving forms. The chromiumoxide implementation
//! lives in [`handle`](crate::handle); an in-memory fake for unit tests
//! lives in [`fake`](crate::fake).
//!
//! Handles are valid only for the page generation they were acquired under.
//! [`PageGeneration`] is the session-owned counter that enforces this: any
//! navigation or reload advances it, and every operation on a held handle
//! checks its acquisition generation first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use devlens_core::LocatorQuery;

use crate::error::{Result, UiError};

/// Capability reference to a rendered element.
///
/// Object-safe so sessions can hand out `Box<dyn UiElement>` regardless of
/// backing implementation. Locate failures surface as
/// [`UiError::ElementNotFound`]; callers that treat absence as acceptable
/// (the record extractor) recover from that variant locally.
#[async_trait]
pub trait UiElement: std::fmt::Debug + Send + Sync {
    /// Locates the first descendant matching `query`, in document order.
    async fn find(&self, query: &LocatorQuery) -> Result<Box<dyn UiElement>>;

    /// Locates every descendant matching `query`, in document order.
    ///
    /// An empty match set is a valid empty vec, not an error.
    async fn find_all(&self, query: &LocatorQuery) -> Result<Vec<Box<dyn UiElement>>>;

    /// The element's rendered text content.
    async fn text(&self) -> Result<String>;

    /// Reads an attribute value; `None` when the attribute is absent.
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Whether the element occupies layout space and is not hidden.
    async fn is_displayed(&self) -> Result<bool>;

    /// Clicks the element.
    async fn click(&self) -> Result<()>;

    /// Types text into the element (inputs and textareas).
    async fn type_text(&self, text: &str) -> Result<()>;

    /// Sets a `<select>` element's value and fires its change event.
    async fn select_value(&self, value: &str) -> Result<()>;
}

/// Monotonic page-generation counter owned by a session.
///
/// Cheaply cloneable; handles hold a clone plus the generation number they
/// were acquired under.
#[derive(Debug, Clone, Default)]
pub struct PageGeneration {
    current: Arc<AtomicU64>,
}

impl PageGeneration {
    /// Creates a counter starting at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current generation number.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Advances to the next generation, invalidating all held handles.
    ///
    /// Called on every navigation and reload; returns the new generation.
    pub fn advance(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fails with [`UiError::StaleHandle`] if `held` is no longer current.
    pub fn ensure_current(&self, held: u64) -> Result<()> {
        let current = self.current();
        if held == current {
            Ok(())
        } else {
            Err(UiError::StaleHandle { held, current })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_starts_at_zero_and_advances() {
        let generation = PageGeneration::new();
        assert_eq!(generation.current(), 0);
        assert_eq!(generation.advance(), 1);
        assert_eq!(generation.current(), 1);
    }

    #[test]
    fn held_generation_is_valid_until_advance() {
        let generation = PageGeneration::new();
        let held = generation.current();
        assert!(generation.ensure_current(held).is_ok());

        generation.advance();
        match generation.ensure_current(held) {
            Err(UiError::StaleHandle { held: h, current }) => {
                assert_eq!(h, 0);
                assert_eq!(current, 1);
            }
            other => panic!("expected StaleHandle, got {other:?}"),
        }
    }

    #[test]
    fn clones_share_the_counter() {
        let generation = PageGeneration::new();
        let clone = generation.clone();
        generation.advance();
        assert_eq!(clone.current(), 1);
    }
}
