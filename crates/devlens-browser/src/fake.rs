//! In-memory element handles for unit tests.
//!
//! A [`FakeElement`] is an owned node tree implementing [`UiElement`], so
//! extraction and reader logic can be exercised without Chrome. It supports
//! the selector subset the locator tables actually use: `.class` and `#id`
//! CSS queries, matched over descendants in document order. XPath queries
//! are page-scoped in the real backend and are rejected here the same way.

use std::collections::HashMap;

use async_trait::async_trait;

use devlens_core::{LocatorQuery, LocatorStrategy};

use crate::element::UiElement;
use crate::error::{Result, UiError};

/// An owned fake DOM node.
#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    classes: Vec<String>,
    attributes: HashMap<String, String>,
    text: String,
    hidden: bool,
    children: Vec<FakeElement>,
}

impl FakeElement {
    /// A visible, empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a CSS class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets the node's text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Marks the node as not displayed.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Appends a child node.
    #[must_use]
    pub fn with_child(mut self, child: FakeElement) -> Self {
        self.children.push(child);
        self
    }

    /// A complete device row as the application renders it.
    ///
    /// The shape every extractor test starts from; callers prune or hide
    /// parts to simulate partial renders.
    #[must_use]
    pub fn device_row(id: &str, name: &str, device_type: &str, capacity_text: &str) -> Self {
        FakeElement::new()
            .with_class("device-main-box")
            .with_child(FakeElement::new().with_class("device-name").with_text(name))
            .with_child(
                FakeElement::new()
                    .with_class("device-type")
                    .with_text(device_type),
            )
            .with_child(
                FakeElement::new()
                    .with_class("device-capacity")
                    .with_text(capacity_text),
            )
            .with_child(
                FakeElement::new()
                    .with_class("device-edit")
                    .with_attribute("href", format!("/devices/edit/{id}")),
            )
            .with_child(FakeElement::new().with_class("device-remove"))
    }

    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.attributes.get("id").is_some_and(|v| v == id)
        } else {
            false
        }
    }

    /// Descendants matching `selector`, depth-first (document order).
    fn descendants_matching<'a>(&'a self, selector: &str, found: &mut Vec<&'a FakeElement>) {
        for child in &self.children {
            if child.matches(selector) {
                found.push(child);
            }
            child.descendants_matching(selector, found);
        }
    }

    fn css_value<'q>(&self, query: &'q LocatorQuery) -> Result<&'q str> {
        match query.strategy {
            LocatorStrategy::Css => Ok(query.value.as_str()),
            LocatorStrategy::XPath => Err(UiError::UnsupportedQuery {
                query: query.to_string(),
            }),
        }
    }
}

#[async_trait]
impl UiElement for FakeElement {
    async fn find(&self, query: &LocatorQuery) -> Result<Box<dyn UiElement>> {
        let selector = self.css_value(query)?;
        let mut found = Vec::new();
        self.descendants_matching(selector, &mut found);
        found
            .first()
            .map(|element| Box::new((*element).clone()) as Box<dyn UiElement>)
            .ok_or_else(|| UiError::ElementNotFound {
                query: query.to_string(),
            })
    }

    async fn find_all(&self, query: &LocatorQuery) -> Result<Vec<Box<dyn UiElement>>> {
        let selector = self.css_value(query)?;
        let mut found = Vec::new();
        self.descendants_matching(selector, &mut found);
        Ok(found
            .into_iter()
            .map(|element| Box::new(element.clone()) as Box<dyn UiElement>)
            .collect())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attributes.get(name).cloned())
    }

    async fn is_displayed(&self) -> Result<bool> {
        Ok(!self.hidden)
    }

    async fn click(&self) -> Result<()> {
        Ok(())
    }

    async fn type_text(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn select_value(&self, _value: &str) -> Result<()> {
        Ok(())
    }
}
