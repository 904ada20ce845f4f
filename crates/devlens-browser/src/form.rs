//! Driving the application's create-device form.

use tracing::debug;

use devlens_core::{queries, NewDevice};

use crate::error::Result;
use crate::session::UiSession;

/// Adds a device through the UI form.
///
/// Clicks the add button, fills the three fields, and submits. Every element
/// is acquired fresh through the session's point lookups; nothing is cached.
/// The application does not reveal the created record's id here; callers
/// that need it have to recover it via the API (by-name lookup, first match,
/// with the documented ambiguity when names collide).
///
/// # Errors
///
/// Returns `LookupTimeout` if any form element fails to appear within the
/// implicit-wait bound, or the underlying interaction error otherwise.
pub async fn add_device(session: &UiSession, device: &NewDevice) -> Result<()> {
    debug!("adding device via UI: {device:?}");

    session
        .find(&queries::add_device_button(), "add device button")
        .await?
        .click()
        .await?;

    let name_input = session
        .find(&queries::form_system_name(), "system name input")
        .await?;
    name_input.click().await?;
    name_input.type_text(&device.system_name).await?;

    session
        .find(&queries::form_device_type(), "device type dropdown")
        .await?
        .select_value(&device.device_type)
        .await?;

    let capacity_input = session
        .find(&queries::form_hdd_capacity(), "hdd capacity input")
        .await?;
    capacity_input.click().await?;
    capacity_input.type_text(&device.hdd_capacity).await?;

    session
        .find(&queries::form_submit(), "form submit button")
        .await?
        .click()
        .await?;

    Ok(())
}
