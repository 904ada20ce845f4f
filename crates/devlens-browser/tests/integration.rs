//! Integration tests for devlens-browser
//!
//! These tests require Chrome/Chromium to be installed and are marked
//! #[ignore] by default. Run with:
//! cargo test --package devlens-browser -- --ignored

use std::time::Duration;

use devlens_browser::{read_all, SessionConfig, UiError, UiSession};

/// A static rendering of the device list, two rows sharing a name.
fn device_list_page() -> String {
    r#"
    <!DOCTYPE html>
    <html>
    <head><title>Devices</title></head>
    <body>
        <div class="list-devices">
            <div class="device-main-box">
                <span class="device-name">ALPHA</span>
                <span class="device-type">WINDOWS_SERVER</span>
                <span class="device-capacity">512 GB</span>
                <div class="device-options">
                    <a class="device-edit" href="/devices/edit/1">EDIT</a>
                    <button class="device-remove">REMOVE</button>
                </div>
            </div>
            <div class="device-main-box">
                <span class="device-name">ALPHA</span>
                <span class="device-type">MAC</span>
                <span class="device-capacity">256 GB</span>
                <div class="device-options">
                    <a class="device-edit" href="/devices/edit/2">EDIT</a>
                    <button class="device-remove">REMOVE</button>
                </div>
            </div>
            <div class="device-main-box">
                <span class="device-name">BETA</span>
                <span class="device-type">WINDOWS_WORKSTATION</span>
                <span class="device-capacity">128 GB</span>
                <div class="device-options">
                    <a class="device-edit" href="/devices/edit/3">EDIT</a>
                    <button class="device-remove">REMOVE</button>
                </div>
            </div>
        </div>
    </body>
    </html>
    "#
    .to_string()
}

fn data_url(html: &str) -> String {
    format!("data:text/html,{}", urlencoding::encode(html))
}

fn quick_config() -> SessionConfig {
    SessionConfig::default().with_implicit_wait(Duration::from_secs(2))
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn read_all_extracts_every_row_in_document_order() {
    let session = UiSession::launch(quick_config())
        .await
        .expect("failed to launch browser");
    session
        .navigate(&data_url(&device_list_page()))
        .await
        .expect("failed to navigate");

    let devices = read_all(&session).await.expect("failed to read devices");

    assert_eq!(devices.len(), 3);
    assert_eq!(devices[0].id.as_deref(), Some("1"));
    assert_eq!(devices[0].system_name.as_deref(), Some("ALPHA"));
    assert_eq!(devices[0].hdd_capacity.as_deref(), Some("512"));
    assert_eq!(devices[0].edit, Some(true));
    assert_eq!(devices[0].remove, Some(true));
    assert_eq!(devices[0].displayed, Some(true));
    assert_eq!(devices[2].system_name.as_deref(), Some("BETA"));

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn by_name_returns_the_first_match_deterministically() {
    let session = UiSession::launch(quick_config())
        .await
        .expect("failed to launch");
    session
        .navigate(&data_url(&device_list_page()))
        .await
        .expect("failed to navigate");

    // Two rows are named ALPHA; both lookups must land on row 1
    for _ in 0..2 {
        let row = session
            .find_by_name("ALPHA")
            .await
            .expect("by-name lookup failed");
        let record = devlens_browser::extract(row.as_ref()).await;
        assert_eq!(record.id.as_deref(), Some("1"));
    }

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn by_id_matches_the_exact_trailing_segment() {
    let session = UiSession::launch(quick_config())
        .await
        .expect("failed to launch");
    session
        .navigate(&data_url(&device_list_page()))
        .await
        .expect("failed to navigate");

    // Id "1" must not match the row for id "2" or vice versa
    let row = session.find_by_id("2").await.expect("by-id lookup failed");
    let record = devlens_browser::extract(row.as_ref()).await;
    assert_eq!(record.device_type.as_deref(), Some("MAC"));

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn absent_id_fails_with_lookup_timeout() {
    let session = UiSession::launch(quick_config())
        .await
        .expect("failed to launch");
    session
        .navigate(&data_url(&device_list_page()))
        .await
        .expect("failed to navigate");

    let err = session.find_by_id("9").await.unwrap_err();
    assert!(
        err.is_lookup_timeout(),
        "expected LookupTimeout, got {err:?}"
    );

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn handles_go_stale_across_a_reload() {
    let session = UiSession::launch(quick_config())
        .await
        .expect("failed to launch");
    session
        .navigate(&data_url(&device_list_page()))
        .await
        .expect("failed to navigate");

    let row = session.find_by_id("1").await.expect("lookup failed");

    session.refresh().await.expect("failed to refresh");

    let err = row.text().await.unwrap_err();
    assert!(
        matches!(err, UiError::StaleHandle { held: 1, current: 2 }),
        "expected StaleHandle, got {err:?}"
    );

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn missing_container_is_fatal_for_the_read() {
    let session = UiSession::launch(quick_config())
        .await
        .expect("failed to launch");
    session
        .navigate(&data_url("<html><body><p>no devices here</p></body></html>"))
        .await
        .expect("failed to navigate");

    let err = read_all(&session).await.unwrap_err();
    assert!(
        matches!(err, UiError::ContainerNotFound { .. }),
        "expected ContainerNotFound, got {err:?}"
    );

    session.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn empty_container_yields_an_empty_read() {
    let session = UiSession::launch(quick_config())
        .await
        .expect("failed to launch");
    session
        .navigate(&data_url(
            "<html><body><div class=\"list-devices\"></div></body></html>",
        ))
        .await
        .expect("failed to navigate");

    let devices = read_all(&session).await.expect("read failed");
    assert!(devices.is_empty());

    session.close().await.expect("failed to close");
}
