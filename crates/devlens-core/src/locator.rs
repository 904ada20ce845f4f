//! Locator resolver: logical lookups mapped onto structural queries.
//!
//! The query tables here are pure immutable configuration: plain functions
//! returning [`LocatorQuery`] values, not a type hierarchy. Collaborators
//! (the collection reader, point lookups, the device-form driver) consume
//! these values; nothing in this module touches a live document.
//!
//! # Known ambiguity
//!
//! Device names are not unique server-side, so [`by_name`] is first-match by
//! contract: the query resolves to the first device row in document order
//! whose name span matches. Callers must not assume uniqueness; test suites
//! that create colliding names have to assert against first-match behavior
//! explicitly rather than rely on an exclusivity guarantee that does not
//! exist.

use std::fmt;

/// How a query value is to be interpreted by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocatorStrategy {
    /// CSS selector, usable both page-wide and element-scoped.
    Css,
    /// XPath expression; page-wide lookups only.
    XPath,
}

/// A structural query expression. Immutable value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatorQuery {
    /// Query language of `value`.
    pub strategy: LocatorStrategy,
    /// The selector or expression itself.
    pub value: String,
}

impl LocatorQuery {
    /// Builds a CSS selector query.
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            strategy: LocatorStrategy::Css,
            value: value.into(),
        }
    }

    /// Builds an XPath query.
    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            strategy: LocatorStrategy::XPath,
            value: value.into(),
        }
    }
}

impl fmt::Display for LocatorQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strategy {
            LocatorStrategy::Css => write!(f, "css `{}`", self.value),
            LocatorStrategy::XPath => write!(f, "xpath `{}`", self.value),
        }
    }
}

/// Fixed queries for the device-management pages.
pub mod queries {
    use super::LocatorQuery;

    /// The device list container. Its absence is fatal for a collection read.
    #[must_use]
    pub fn device_list() -> LocatorQuery {
        LocatorQuery::css(".list-devices")
    }

    /// One device row. Matched in document order under the container.
    #[must_use]
    pub fn device_row() -> LocatorQuery {
        LocatorQuery::css(".device-main-box")
    }

    /// The name span inside a row.
    #[must_use]
    pub fn device_name() -> LocatorQuery {
        LocatorQuery::css(".device-name")
    }

    /// The type span inside a row.
    #[must_use]
    pub fn device_type() -> LocatorQuery {
        LocatorQuery::css(".device-type")
    }

    /// The capacity span inside a row. Rendered with a unit suffix.
    #[must_use]
    pub fn device_capacity() -> LocatorQuery {
        LocatorQuery::css(".device-capacity")
    }

    /// The edit affordance inside a row. Its href carries the device id.
    #[must_use]
    pub fn device_edit() -> LocatorQuery {
        LocatorQuery::css(".device-edit")
    }

    /// The remove affordance inside a row.
    #[must_use]
    pub fn device_remove() -> LocatorQuery {
        LocatorQuery::css(".device-remove")
    }

    /// The add-device button on the list page.
    #[must_use]
    pub fn add_device_button() -> LocatorQuery {
        LocatorQuery::css(".submitButton")
    }

    /// The system-name input on the device form.
    #[must_use]
    pub fn form_system_name() -> LocatorQuery {
        LocatorQuery::css("#system_name")
    }

    /// The type dropdown on the device form.
    #[must_use]
    pub fn form_device_type() -> LocatorQuery {
        LocatorQuery::css("#type")
    }

    /// The capacity input on the device form.
    #[must_use]
    pub fn form_hdd_capacity() -> LocatorQuery {
        LocatorQuery::css("#hdd_capacity")
    }

    /// The save button on the device form.
    #[must_use]
    pub fn form_submit() -> LocatorQuery {
        LocatorQuery::css(".submitButton")
    }
}

/// Resolves a logical by-name lookup to the first matching device row.
///
/// The name is embedded as a proper XPath string literal (see
/// [`xpath_literal`]), so names containing quote characters cannot break out
/// of the expression. First-match contract; see the module docs.
#[must_use]
pub fn by_name(name: &str) -> LocatorQuery {
    LocatorQuery::xpath(format!(
        "//span[contains(@class, \"device-name\") and .//text()={}]\
         /ancestor::div[contains(@class, \"device-main-box\")]",
        xpath_literal(name)
    ))
}

/// Resolves a logical by-id lookup to the device row whose edit affordance
/// points at `/devices/edit/{id}`.
///
/// Matches the href's trailing path segment exactly (XPath 1.0 has no
/// ends-with, hence the substring arithmetic), so id `"1"` does not match a
/// row for id `"12"`.
#[must_use]
pub fn by_id(id: &str) -> LocatorQuery {
    let tail = xpath_literal(&format!("/{id}"));
    LocatorQuery::xpath(format!(
        "//a[contains(@class, \"device-edit\") and \
         substring(@href, string-length(@href) - string-length({tail}) + 1) = {tail}]\
         /ancestor::div[contains(@class, \"device-main-box\")]"
    ))
}

/// Quotes an arbitrary string as an XPath 1.0 string literal.
///
/// XPath literals have no escape syntax, so a value containing both quote
/// kinds has to be assembled with `concat()`. This is the single choke point
/// where lookup values enter the query language; building queries any other
/// way risks injection through a device name like `"] | //secret["`.
#[must_use]
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        let parts: Vec<String> = value.split('"').map(|p| format!("\"{p}\"")).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_plain_value_uses_double_quotes() {
        assert_eq!(xpath_literal("ALPHA"), "\"ALPHA\"");
    }

    #[test]
    fn literal_with_double_quote_falls_back_to_single() {
        assert_eq!(xpath_literal("A\"B"), "'A\"B'");
    }

    #[test]
    fn literal_with_both_quotes_uses_concat() {
        assert_eq!(
            xpath_literal("A\"B'C"),
            "concat(\"A\", '\"', \"B'C\")"
        );
    }

    #[test]
    fn by_name_embeds_the_literal_safely() {
        let query = by_name("O'HARA-\"PROD\"");
        assert_eq!(query.strategy, LocatorStrategy::XPath);
        // The raw name must never appear unquoted in the expression
        assert!(query.value.contains("concat("));
        assert!(!query.value.contains("=O'HARA"));
    }

    #[test]
    fn by_name_resolves_to_the_row() {
        let query = by_name("ALPHA");
        assert!(query.value.starts_with("//span[contains(@class, \"device-name\")"));
        assert!(query.value.ends_with("/ancestor::div[contains(@class, \"device-main-box\")]"));
    }

    #[test]
    fn by_id_matches_trailing_segment_exactly() {
        let query = by_id("1");
        assert!(query.value.contains("string-length(@href) - string-length(\"/1\") + 1"));
        assert!(query.value.contains("= \"/1\""));
    }

    #[test]
    fn field_queries_are_element_scoped_css() {
        for query in [
            queries::device_name(),
            queries::device_type(),
            queries::device_capacity(),
            queries::device_edit(),
            queries::device_remove(),
        ] {
            assert_eq!(query.strategy, LocatorStrategy::Css);
        }
    }
}
