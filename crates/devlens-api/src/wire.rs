//! Wire types mirroring the device API's JSON schema.

use devlens_core::{DeviceRecord, NewDevice};
use serde::{Deserialize, Serialize};

/// One device as the API serializes it.
///
/// The JSON field is `type`; it is renamed because of the Rust keyword.
/// Conversion into [`DeviceRecord`] leaves the UI-only observation flags
/// unset; the API has no notion of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDevice {
    /// Server-assigned identifier.
    pub id: String,
    /// Device name. Not unique system-wide.
    pub system_name: String,
    /// Device type discriminator.
    #[serde(rename = "type")]
    pub device_type: String,
    /// Capacity as a bare number string.
    pub hdd_capacity: String,
}

impl From<ApiDevice> for DeviceRecord {
    fn from(device: ApiDevice) -> Self {
        DeviceRecord {
            id: Some(device.id),
            system_name: Some(device.system_name),
            device_type: Some(device.device_type),
            hdd_capacity: Some(device.hdd_capacity),
            ..DeviceRecord::default()
        }
    }
}

impl ApiDevice {
    /// The create/replace payload carrying this device's mutable fields.
    #[must_use]
    pub fn to_payload(&self) -> NewDevice {
        NewDevice {
            system_name: self.system_name.clone(),
            device_type: self.device_type.clone(),
            hdd_capacity: self.hdd_capacity.clone(),
        }
    }
}
