//! chromiumoxide-backed element handles.
//!
//! A [`ChromeHandle`] wraps a CDP element reference together with the page
//! generation it was acquired under. Every operation checks the generation
//! first, so a handle held across a navigation fails fast with
//! `StaleHandle` instead of silently reading a detached node.

use async_trait::async_trait;
use chromiumoxide::element::Element;

use devlens_core::{LocatorQuery, LocatorStrategy};

use crate::element::{PageGeneration, UiElement};
use crate::error::{Result, UiError};

/// JS predicate mirroring the usual "displayed" notion: occupies layout
/// space and is not hidden by style.
const IS_DISPLAYED_FN: &str = "function() { \
    const rect = this.getBoundingClientRect(); \
    const style = window.getComputedStyle(this); \
    return rect.width > 0 && rect.height > 0 \
        && style.display !== 'none' && style.visibility !== 'hidden'; \
}";

/// A live element reference, valid for one page generation.
#[derive(Debug)]
pub struct ChromeHandle {
    element: Element,
    held: u64,
    generation: PageGeneration,
}

impl ChromeHandle {
    /// Wraps an element, snapshotting the current page generation.
    pub(crate) fn new(element: Element, generation: PageGeneration) -> Self {
        let held = generation.current();
        Self {
            element,
            held,
            generation,
        }
    }

    fn guard(&self) -> Result<()> {
        self.generation.ensure_current(self.held)
    }

    /// Calls a zero-argument JS function on the node and returns its value.
    async fn call_js(&self, function: &str) -> Result<Option<serde_json::Value>> {
        let returns = self
            .element
            .call_js_fn(function, false)
            .await
            .map_err(|e| UiError::ScriptFailed(e.to_string()))?;

        if let Some(details) = returns.exception_details {
            return Err(UiError::ScriptFailed(details.text));
        }

        Ok(returns.result.value)
    }
}

#[async_trait]
impl UiElement for ChromeHandle {
    async fn find(&self, query: &LocatorQuery) -> Result<Box<dyn UiElement>> {
        self.guard()?;
        let LocatorStrategy::Css = query.strategy else {
            // CDP offers no element-scoped XPath search; resolver queries
            // that need XPath are page-scoped by design
            return Err(UiError::UnsupportedQuery {
                query: query.to_string(),
            });
        };

        let element = self
            .element
            .find_element(query.value.clone())
            .await
            .map_err(|_| UiError::ElementNotFound {
                query: query.to_string(),
            })?;

        Ok(Box::new(ChromeHandle::new(element, self.generation.clone())))
    }

    async fn find_all(&self, query: &LocatorQuery) -> Result<Vec<Box<dyn UiElement>>> {
        self.guard()?;
        let LocatorStrategy::Css = query.strategy else {
            return Err(UiError::UnsupportedQuery {
                query: query.to_string(),
            });
        };

        // An empty match set already comes back as Ok; any Err here is a
        // real failure (dropped connection, bad selector) and must surface
        let elements = self.element.find_elements(query.value.clone()).await?;

        Ok(elements
            .into_iter()
            .map(|element| {
                Box::new(ChromeHandle::new(element, self.generation.clone())) as Box<dyn UiElement>
            })
            .collect())
    }

    async fn text(&self) -> Result<String> {
        self.guard()?;
        let text = self.element.inner_text().await?;
        Ok(text.unwrap_or_default())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.guard()?;
        Ok(self.element.attribute(name).await?)
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.guard()?;
        let value = self.call_js(IS_DISPLAYED_FN).await?;
        Ok(value.as_ref().and_then(serde_json::Value::as_bool).unwrap_or(false))
    }

    async fn click(&self) -> Result<()> {
        self.guard()?;
        self.element.click().await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.guard()?;
        self.element.type_str(text).await?;
        Ok(())
    }

    async fn select_value(&self, value: &str) -> Result<()> {
        self.guard()?;
        // JSON-encode the value so arbitrary strings cannot break out of
        // the generated function body
        let escaped = serde_json::to_string(value)
            .map_err(|e| UiError::ScriptFailed(e.to_string()))?;
        let function = format!(
            "function() {{ \
                this.value = {escaped}; \
                this.dispatchEvent(new Event('change', {{ bubbles: true }})); \
            }}"
        );
        self.call_js(&function).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_value_escaping_with_json() {
        // The same JSON-literal trick used for selector escaping: the value
        // lands inside the function body as a string literal, never as code
        let dangerous = r#"'); alert('x');//"#;
        let escaped = serde_json::to_string(&dangerous).unwrap();
        assert!(escaped.starts_with('"') && escaped.ends_with('"'));
        assert!(escaped.len() > dangerous.len());
    }
}
