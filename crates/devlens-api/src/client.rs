//! The device API client.
//!
//! Thin verb wrappers around `reqwest` plus the one piece of policy that
//! matters: by-name lookup returns every match, because names are not
//! unique server-side. Callers that take "the first" do so explicitly.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use devlens_core::{DeviceRecord, NewDevice};

use crate::error::{ApiError, Result};
use crate::wire::ApiDevice;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the device-management REST API.
///
/// Holds a connection pool and the base URL; construct once per scenario and
/// thread through explicitly. All calls are blocking-on-await, one request
/// at a time, as the harness has no concurrent API traffic.
#[derive(Debug, Clone)]
pub struct DeviceApi {
    client: Client,
    base_url: String,
}

impl DeviceApi {
    /// Creates a client for the API at `base_url` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Joins a path onto the base URL.
    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Checks that the server answers at all. Fails fast on a dead backend
    /// before a scenario burns its implicit-wait budget in the browser.
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure or a non-2xx status.
    pub async fn check_alive(&self) -> Result<()> {
        let url = self.url("");
        debug!("alive check: {url}");
        let response = self.client.get(&url).send().await?;
        expect_success(response.status(), &url)?;
        Ok(())
    }

    /// Fetches all devices.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that does not decode as a device list.
    pub async fn get_devices(&self) -> Result<Vec<DeviceRecord>> {
        let devices = self.get_devices_raw().await?;
        Ok(devices.into_iter().map(DeviceRecord::from).collect())
    }

    /// Fetches all devices in their wire shape (ids guaranteed present).
    ///
    /// # Errors
    ///
    /// Same failure modes as [`get_devices`](Self::get_devices).
    pub async fn get_devices_raw(&self) -> Result<Vec<ApiDevice>> {
        let url = self.url("devices");
        debug!("get all devices: {url}");
        let response = self.client.get(&url).send().await?;
        expect_success(response.status(), &url)?;
        decode(response, &url).await
    }

    /// Fetches one device by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status (including
    /// 404 for an unknown id), or a malformed body.
    pub async fn get_device(&self, id: &str) -> Result<DeviceRecord> {
        let url = self.url(&format!("devices/{id}"));
        debug!("get device by id: {url}");
        let response = self.client.get(&url).send().await?;
        expect_success(response.status(), &url)?;
        let device: ApiDevice = decode(response, &url).await?;
        Ok(device.into())
    }

    /// Fetches every device whose name matches exactly.
    ///
    /// Names are not unique, so this returns all matches in server order.
    /// Implemented as a client-side filter over the full list; the API has
    /// no by-name endpoint.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`get_devices`](Self::get_devices).
    pub async fn get_devices_by_name(&self, name: &str) -> Result<Vec<ApiDevice>> {
        let devices = self.get_devices_raw().await?;
        Ok(devices
            .into_iter()
            .filter(|d| d.system_name == name)
            .collect())
    }

    /// Creates a device; the response carries the server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a
    /// malformed body.
    pub async fn create_device(&self, device: &NewDevice) -> Result<ApiDevice> {
        let url = self.url("devices");
        debug!("create device: {url} {device:?}");
        let response = self.client.post(&url).json(device).send().await?;
        expect_success(response.status(), &url)?;
        decode(response, &url).await
    }

    /// Full-record replace of the device at `id`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a
    /// malformed body.
    pub async fn update_device(&self, id: &str, device: &NewDevice) -> Result<ApiDevice> {
        let url = self.url(&format!("devices/{id}"));
        debug!("update device: {url} {device:?}");
        let response = self.client.put(&url).json(device).send().await?;
        expect_success(response.status(), &url)?;
        decode(response, &url).await
    }

    /// Deletes the device at `id`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    pub async fn delete_device(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("devices/{id}"));
        debug!("delete device: {url}");
        let response = self.client.delete(&url).send().await?;
        expect_success(response.status(), &url)?;
        Ok(())
    }
}

fn expect_success(status: StatusCode, url: &str) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ApiError::UnexpectedStatus {
            status,
            url: url.to_string(),
        })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T> {
    response.json().await.map_err(|e| ApiError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining_normalizes_slashes() {
        let api = DeviceApi::new("http://localhost:3000").unwrap();
        assert_eq!(api.url("devices"), "http://localhost:3000/devices");
        assert_eq!(api.url("/devices/7"), "http://localhost:3000/devices/7");

        let api = DeviceApi::new("http://localhost:3000/").unwrap();
        assert_eq!(api.url("devices"), "http://localhost:3000/devices");
    }

    #[test]
    fn non_success_status_maps_to_typed_error() {
        let err = expect_success(StatusCode::NOT_FOUND, "http://x/devices/9").unwrap_err();
        match err {
            ApiError::UnexpectedStatus { status, url } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(url, "http://x/devices/9");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_statuses_pass() {
        assert!(expect_success(StatusCode::OK, "u").is_ok());
        assert!(expect_success(StatusCode::CREATED, "u").is_ok());
    }
}
