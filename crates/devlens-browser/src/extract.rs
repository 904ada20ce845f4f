//! Record extraction and collection reading.
//!
//! [`extract`] turns one device-row handle into a normalized
//! [`DeviceRecord`]; [`read_all`] maps it over every row on the page. The
//! extraction policy is deliberate: a sub-element that fails to locate is an
//! expected transient UI state, recorded as an unobserved (`None`) field and
//! never an error. Extraction does no retries; wait policy belongs to the
//! caller.

use tracing::debug;

use devlens_core::{normalize_capacity, queries, DeviceRecord, LocatorQuery};

use crate::element::UiElement;
use crate::error::{Result, UiError};
use crate::session::UiSession;

/// Extracts a normalized device record from one row handle.
///
/// Each known sub-field is attempted exactly once; a locate miss yields
/// `None` for that field. The capacity text is normalized here (unit suffix
/// stripped) so downstream comparison sees raw values. The id is recovered
/// from the edit affordance's href trailing path segment, the only place
/// the UI exposes it.
///
/// Read-only: no DOM mutation, no retries, no waiting.
pub async fn extract(handle: &dyn UiElement) -> DeviceRecord {
    let system_name = field_text(handle, &queries::device_name()).await;
    let device_type = field_text(handle, &queries::device_type()).await;
    let hdd_capacity = field_text(handle, &queries::device_capacity())
        .await
        .map(|text| normalize_capacity(&text));

    let (edit, id) = match handle.find(&queries::device_edit()).await {
        Ok(affordance) => {
            let visible = affordance.is_displayed().await.ok();
            let id = match affordance.attribute("href").await {
                Ok(Some(href)) => trailing_segment(&href),
                _ => None,
            };
            (visible, id)
        }
        Err(_) => (None, None),
    };

    let remove = match handle.find(&queries::device_remove()).await {
        Ok(affordance) => affordance.is_displayed().await.ok(),
        Err(_) => None,
    };

    let displayed = handle.is_displayed().await.ok();

    let record = DeviceRecord {
        id,
        system_name,
        device_type,
        hdd_capacity,
        edit,
        remove,
        displayed,
    };
    debug!("extracted: {record:?}");
    record
}

/// Reads every device row under the list container, in document order.
///
/// Document order is insertion order, nothing more, and must not be used as
/// a comparison key. Partial records are included as-is; downstream decides
/// how to treat unobserved fields.
///
/// # Errors
///
/// Returns `ContainerNotFound` if the list container itself never appears
/// within the implicit-wait bound. An empty row set under a present
/// container is a valid empty result.
pub async fn read_all(session: &UiSession) -> Result<Vec<DeviceRecord>> {
    let container_query = queries::device_list();
    let container = session
        .find(&container_query, "device list container")
        .await
        .map_err(|e| promote_container_miss(e, &container_query))?;

    collect_rows(container.as_ref()).await
}

/// Maps the extractor over every row under `container`, in document order.
///
/// Enumeration failures propagate: an infrastructure fault must never read
/// as an empty device list.
async fn collect_rows(container: &dyn UiElement) -> Result<Vec<DeviceRecord>> {
    let rows = container.find_all(&queries::device_row()).await?;
    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        records.push(extract(row.as_ref()).await);
    }

    debug!("{} devices read from UI", records.len());
    Ok(records)
}

/// A container lookup that times out is the fatal kind, not the assertable
/// absence kind.
fn promote_container_miss(error: UiError, query: &LocatorQuery) -> UiError {
    match error {
        UiError::LookupTimeout { .. } => UiError::ContainerNotFound {
            query: query.to_string(),
        },
        other => other,
    }
}

async fn field_text(handle: &dyn UiElement, query: &LocatorQuery) -> Option<String> {
    match handle.find(query).await {
        Ok(element) => element.text().await.ok(),
        Err(_) => None,
    }
}

/// The trailing path segment of an href, e.g. `/devices/edit/7` → `7`.
fn trailing_segment(href: &str) -> Option<String> {
    href.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeElement;
    use devlens_core::FieldSet;

    #[tokio::test]
    async fn full_row_extracts_every_field() {
        let row = FakeElement::device_row("7", "ALPHA-PROD", "WINDOWS_SERVER", "512 GB");
        let record = extract(&row).await;

        assert_eq!(record.id.as_deref(), Some("7"));
        assert_eq!(record.system_name.as_deref(), Some("ALPHA-PROD"));
        assert_eq!(record.device_type.as_deref(), Some("WINDOWS_SERVER"));
        assert_eq!(record.hdd_capacity.as_deref(), Some("512"));
        assert_eq!(record.edit, Some(true));
        assert_eq!(record.remove, Some(true));
        assert_eq!(record.displayed, Some(true));
    }

    #[tokio::test]
    async fn missing_capacity_is_unobserved_not_an_error() {
        let row = FakeElement::new()
            .with_class("device-main-box")
            .with_child(FakeElement::new().with_class("device-name").with_text("X"))
            .with_child(FakeElement::new().with_class("device-type").with_text("T"));
        let record = extract(&row).await;

        assert!(record.hdd_capacity.is_none());
        assert_eq!(record.system_name.as_deref(), Some("X"));
        // No edit affordance: neither the flag nor the id is observable
        assert!(record.edit.is_none());
        assert!(record.id.is_none());
    }

    #[tokio::test]
    async fn id_comes_from_the_edit_href_tail() {
        let row = FakeElement::new().with_class("device-main-box").with_child(
            FakeElement::new()
                .with_class("device-edit")
                .with_attribute("href", "http://host/devices/edit/e8okoP2s"),
        );
        let record = extract(&row).await;
        assert_eq!(record.id.as_deref(), Some("e8okoP2s"));
    }

    #[tokio::test]
    async fn hidden_affordance_is_observed_as_not_displayed() {
        let row = FakeElement::new().with_class("device-main-box").with_child(
            FakeElement::new()
                .with_class("device-remove")
                .hidden(),
        );
        let record = extract(&row).await;
        // Present but invisible is a false observation, not an unknown
        assert_eq!(record.remove, Some(false));
    }

    #[tokio::test]
    async fn extracted_row_matches_api_record_under_ui_schema() {
        // End-to-end shape: API says {1, X, T, 512}; the UI renders
        // "512 GB" and both affordances. After normalization the diff on
        // {system_name, type, hdd_capacity, id} is empty.
        let api = DeviceRecord {
            id: Some("1".into()),
            system_name: Some("X".into()),
            device_type: Some("T".into()),
            hdd_capacity: Some("512".into()),
            ..DeviceRecord::default()
        };
        let ui = extract(&FakeElement::device_row("1", "X", "T", "512 GB")).await;

        let result = devlens_core::diff(&[api], &[ui], &FieldSet::ui_only());
        assert!(result.is_empty(), "{result}");
    }

    /// An element whose every operation fails, standing in for a dead
    /// browser connection.
    #[derive(Debug)]
    struct BrokenElement;

    #[async_trait::async_trait]
    impl UiElement for BrokenElement {
        async fn find(&self, _query: &LocatorQuery) -> crate::error::Result<Box<dyn UiElement>> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }

        async fn find_all(
            &self,
            _query: &LocatorQuery,
        ) -> crate::error::Result<Vec<Box<dyn UiElement>>> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }

        async fn text(&self) -> crate::error::Result<String> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }

        async fn attribute(&self, _name: &str) -> crate::error::Result<Option<String>> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }

        async fn is_displayed(&self) -> crate::error::Result<bool> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }

        async fn click(&self) -> crate::error::Result<()> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }

        async fn type_text(&self, _text: &str) -> crate::error::Result<()> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }

        async fn select_value(&self, _value: &str) -> crate::error::Result<()> {
            Err(UiError::ScriptFailed("connection lost".to_string()))
        }
    }

    #[tokio::test]
    async fn row_enumeration_failure_propagates_not_empty() {
        // A broken connection mid-read must surface, never read as an
        // empty (or partial) device list
        let err = collect_rows(&BrokenElement).await.unwrap_err();
        assert!(matches!(err, UiError::ScriptFailed(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn rows_are_collected_in_document_order() {
        let container = FakeElement::new()
            .with_class("list-devices")
            .with_child(FakeElement::device_row("1", "A", "T", "1 GB"))
            .with_child(FakeElement::device_row("2", "B", "T", "2 GB"));

        let records = collect_rows(&container).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].system_name.as_deref(), Some("A"));
        assert_eq!(records[1].system_name.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn empty_container_collects_an_empty_set() {
        let container = FakeElement::new().with_class("list-devices");
        let records = collect_rows(&container).await.unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn container_lookup_timeout_promotes_to_fatal() {
        let query = queries::device_list();
        let err = promote_container_miss(
            UiError::LookupTimeout {
                target: "device list container".to_string(),
                timeout: std::time::Duration::from_secs(2),
            },
            &query,
        );
        match err {
            UiError::ContainerNotFound { query } => assert!(query.contains(".list-devices")),
            other => panic!("expected ContainerNotFound, got {other:?}"),
        }
    }

    #[test]
    fn non_timeout_container_errors_pass_through() {
        let query = queries::device_list();
        let err = promote_container_miss(UiError::ScriptFailed("boom".to_string()), &query);
        assert!(matches!(err, UiError::ScriptFailed(_)), "got {err:?}");
    }

    #[test]
    fn trailing_segment_edges() {
        assert_eq!(trailing_segment("/devices/edit/7").as_deref(), Some("7"));
        assert_eq!(trailing_segment("7").as_deref(), Some("7"));
        assert_eq!(trailing_segment("/devices/edit/"), None);
        assert_eq!(trailing_segment(""), None);
    }
}
