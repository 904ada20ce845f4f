//! The normalized device record shared by the API and UI views.
//!
//! Every field a record carries is optional. A `None` means the field was
//! not observable at extraction time, typically because a DOM sub-element
//! was absent. That is distinct from an empty-but-present value. Records are
//! constructed fresh on every extraction or API read, never mutated, and
//! discarded after comparison.

use serde::{Deserialize, Serialize};

/// One device as known by either the REST API or the rendered UI.
///
/// The first four fields exist on both sides. `edit`, `remove`, and
/// `displayed` are UI-only observations (visibility of the action
/// affordances and of the row itself) with no API counterpart; reconciler
/// callers exclude them via [`FieldSet::ui_only`](crate::FieldSet::ui_only)
/// before comparing.
///
/// Neither `id` nor `system_name` is guaranteed unique within a single page
/// load. The id is the only reliable join key between the two views, but the
/// UI exposes it only indirectly (through the edit affordance's href).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Server-assigned identifier; on the UI side, derived from the edit
    /// link's href trailing path segment.
    pub id: Option<String>,

    /// Human-entered device name. Not unique system-wide.
    pub system_name: Option<String>,

    /// Device type discriminator (e.g. `WINDOWS_SERVER`).
    #[serde(rename = "type")]
    pub device_type: Option<String>,

    /// Disk capacity as a bare number string; unit suffixes are stripped at
    /// extraction time (see [`normalize_capacity`]).
    pub hdd_capacity: Option<String>,

    /// Whether the edit affordance was present and visible. UI-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<bool>,

    /// Whether the remove affordance was present and visible. UI-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove: Option<bool>,

    /// Whether the row itself was visible. UI-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub displayed: Option<bool>,
}

/// Payload for creating (or fully replacing) a device.
///
/// Mirrors the POST/PUT body of the REST collaborator: the server assigns
/// the id, so this type carries none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDevice {
    /// Device name to create the record under.
    pub system_name: String,
    /// Device type discriminator.
    #[serde(rename = "type")]
    pub device_type: String,
    /// Capacity as a bare number string (no unit suffix).
    pub hdd_capacity: String,
}

/// Normalizes a UI-rendered capacity value to the bare number the API uses.
///
/// The UI renders capacities with a unit suffix (`"512 GB"`); the API stores
/// the bare string (`"512"`). Stripping happens here, once, so the
/// reconciler always compares raw values and no caller needs to know about
/// rendering details.
///
/// Values without a recognized suffix pass through trimmed but otherwise
/// unchanged.
#[must_use]
pub fn normalize_capacity(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix("GB")
        .map_or(trimmed, str::trim_end)
        .to_string()
}
