//! The scenario driver: multi-step flows against the API and the UI.
//!
//! Every step follows the same shape: perform an external action, refresh
//! the page view, re-read through the collection reader or a point lookup,
//! and feed the result into the reconciler or a direct assertion. There are
//! no automatic retries; a flaky read fails the scenario.
//!
//! Absence is asserted by matching `UiError::LookupTimeout` exactly; any
//! other failure mode while confirming a deletion is a defect, not a
//! confirmation.

use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use tracing::{error, info};

use devlens_api::DeviceApi;
use devlens_browser::{add_device, extract, read_all, SessionConfig, UiSession};
use devlens_core::{diff, FieldSet, NewDevice};

use crate::cli::{Cli, Command};

/// Device types the application's form accepts.
const DEVICE_TYPES: [&str; 3] = ["WINDOWS_SERVER", "WINDOWS_WORKSTATION", "MAC"];

/// One harness run: an API client and a browser session, owned together.
pub struct Harness {
    api: DeviceApi,
    session: UiSession,
    ui_url: String,
}

impl Harness {
    /// Builds the collaborators from CLI configuration, checks the API is
    /// alive, and opens the UI.
    ///
    /// # Errors
    ///
    /// Fails if the API does not answer, the browser cannot launch, or the
    /// UI does not load.
    pub async fn new(cli: &Cli) -> Result<Self> {
        let api = DeviceApi::new(&cli.api_url).context("building API client")?;
        api.check_alive()
            .await
            .with_context(|| format!("API at {} is not answering", cli.api_url))?;

        let mut config =
            SessionConfig::default().with_implicit_wait(Duration::from_secs(cli.implicit_wait));
        if cli.visible {
            config = config.visible();
        }

        let session = UiSession::launch(config).await.context("launching browser")?;
        session
            .navigate(&cli.ui_url)
            .await
            .with_context(|| format!("opening UI at {}", cli.ui_url))?;

        Ok(Self {
            api,
            session,
            ui_url: cli.ui_url.clone(),
        })
    }

    /// Runs the selected scenario(s) and closes the session.
    ///
    /// # Errors
    ///
    /// Propagates the first scenario failure (`all` runs everything and
    /// fails if any scenario failed).
    pub async fn run(self, command: Command) -> Result<()> {
        let result = self.dispatch(command).await;
        if let Err(e) = self.session.close().await {
            error!("browser shutdown failed: {e}");
        }
        result
    }

    async fn dispatch(&self, command: Command) -> Result<()> {
        match command {
            Command::Verify => self.verify().await,
            Command::Create => self.create().await,
            Command::Rename => self.rename().await,
            Command::Delete => self.delete().await,
            Command::All => {
                let mut failures = 0u32;
                for (name, result) in [
                    ("verify", self.verify().await),
                    ("create", self.create().await),
                    ("rename", self.rename().await),
                    ("delete", self.delete().await),
                ] {
                    match result {
                        Ok(()) => info!("scenario {name}: passed"),
                        Err(e) => {
                            failures += 1;
                            error!("scenario {name}: failed: {e:#}");
                        }
                    }
                }
                ensure!(failures == 0, "{failures} scenario(s) failed");
                Ok(())
            }
        }
    }

    /// API list vs UI list, reconciled under the UI-only ignore schema,
    /// plus per-row visibility and affordance checks.
    async fn verify(&self) -> Result<()> {
        let expected = self.api.get_devices().await?;
        info!("{} devices from API", expected.len());

        self.session.refresh().await?;
        let actual = read_all(&self.session).await?;
        info!("{} devices from UI", actual.len());

        for record in &actual {
            let name = record.system_name.as_deref().unwrap_or("<unnamed>");
            ensure!(
                record.displayed == Some(true),
                "device '{name}' is not displayed"
            );
            ensure!(
                record.edit == Some(true),
                "device '{name}' is missing its edit affordance"
            );
            ensure!(
                record.remove == Some(true),
                "device '{name}' is missing its remove affordance"
            );
        }

        // Each API-known name must also resolve as a point lookup
        for record in &expected {
            if let Some(name) = record.system_name.as_deref() {
                let row = self
                    .session
                    .find_by_name(name)
                    .await
                    .with_context(|| format!("device '{name}' not found in UI"))?;
                ensure!(
                    row.is_displayed().await?,
                    "device '{name}' found but not displayed"
                );
            }
        }

        let result = diff(&expected, &actual, &FieldSet::ui_only());
        if !result.is_empty() {
            bail!("UI and API disagree:\n{result}");
        }
        Ok(())
    }

    /// Create through the UI form, verify on both sides, clean up via API.
    async fn create(&self) -> Result<()> {
        let device = generated_device();
        info!("creating device via UI: {device:?}");

        add_device(&self.session, &device).await?;

        // The UI does not reveal the new record's id; recover it via the
        // API by name. First match, a documented ambiguity when names
        // collide, which the generated name makes unlikely but not
        // impossible.
        let matches = self.api.get_devices_by_name(&device.system_name).await?;
        let created = matches
            .first()
            .context("created device not visible in API")?;
        ensure!(
            created.to_payload() == device,
            "API record {created:?} does not match submitted form {device:?}"
        );

        // Back to the list for the UI-side check; the form click navigated
        // away, so all prior handles are dead anyway
        self.session.navigate(&self.ui_url).await?;
        let row = self
            .session
            .find_by_name(&device.system_name)
            .await
            .context("created device not rendered in UI")?;
        let rendered = extract(row.as_ref()).await;
        ensure!(
            rendered.system_name.as_deref() == Some(device.system_name.as_str())
                && rendered.device_type.as_deref() == Some(device.device_type.as_str())
                && rendered.hdd_capacity.as_deref() == Some(device.hdd_capacity.as_str()),
            "UI renders {rendered:?}, expected the submitted {device:?}"
        );
        ensure!(
            rendered.displayed == Some(true),
            "created device row is not displayed"
        );

        self.api.delete_device(&created.id).await?;
        Ok(())
    }

    /// Rename via the API; the UI must drop the old name and show the new.
    async fn rename(&self) -> Result<()> {
        let created = self.api.create_device(&generated_device()).await?;
        let old_name = created.system_name.clone();
        let renamed = NewDevice {
            system_name: format!("{old_name}-RENAMED"),
            ..created.to_payload()
        };
        self.api.update_device(&created.id, &renamed).await?;
        info!("renamed '{old_name}' to '{}'", renamed.system_name);

        if let Err(e) = self.session.refresh().await {
            let _ = self.api.delete_device(&created.id).await;
            return Err(e).context("refreshing after rename");
        }

        match self.session.find_by_name(&old_name).await {
            Err(e) if e.is_lookup_timeout() => {}
            Ok(_) => {
                let _ = self.api.delete_device(&created.id).await;
                bail!("UI still shows the old name '{old_name}'");
            }
            Err(other) => {
                let _ = self.api.delete_device(&created.id).await;
                return Err(other).context("checking the old name is gone");
            }
        }
        if let Err(e) = self.session.find_by_name(&renamed.system_name).await {
            let _ = self.api.delete_device(&created.id).await;
            return Err(e).context("UI does not show the new name");
        }

        self.api.delete_device(&created.id).await?;
        Ok(())
    }

    /// Delete via the API; the UI lookup must fail with exactly
    /// `LookupTimeout` afterwards.
    async fn delete(&self) -> Result<()> {
        let created = self.api.create_device(&generated_device()).await?;
        if let Err(e) = self.session.refresh().await {
            let _ = self.api.delete_device(&created.id).await;
            return Err(e).context("refreshing after create");
        }
        if let Err(e) = self.session.find_by_id(&created.id).await {
            let _ = self.api.delete_device(&created.id).await;
            return Err(e).context("created device never appeared in UI");
        }

        self.api.delete_device(&created.id).await?;
        self.session.refresh().await?;

        match self.session.find_by_id(&created.id).await {
            Err(e) if e.is_lookup_timeout() => Ok(()),
            Ok(_) => bail!("deleted device '{}' is still rendered", created.id),
            // Anything but a clean timeout is a harness defect, not a
            // confirmation of absence
            Err(other) => Err(other).context("confirming deletion in UI"),
        }
    }
}

/// A fresh device payload with a collision-resistant name.
///
/// Type and capacity are derived from the same random id so repeated runs
/// spread across the form's accepted values.
fn generated_device() -> NewDevice {
    let id = uuid::Uuid::new_v4();
    let bytes = id.as_bytes();
    let tag = id.simple().to_string()[..8].to_uppercase();
    NewDevice {
        system_name: format!("DEVLENS-{tag}"),
        device_type: DEVICE_TYPES[bytes[0] as usize % DEVICE_TYPES.len()].to_string(),
        hdd_capacity: (1u32 << (7 + bytes[1] % 6)).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_devices_have_distinct_names() {
        let a = generated_device();
        let b = generated_device();
        assert_ne!(a.system_name, b.system_name);
        assert!(a.system_name.starts_with("DEVLENS-"));
    }

    #[test]
    fn generated_type_is_one_the_form_accepts() {
        for _ in 0..16 {
            let device = generated_device();
            assert!(DEVICE_TYPES.contains(&device.device_type.as_str()));
        }
    }

    #[test]
    fn generated_capacity_is_a_power_of_two_in_range() {
        for _ in 0..16 {
            let capacity: u32 = generated_device().hdd_capacity.parse().unwrap();
            assert!(capacity.is_power_of_two());
            assert!((128..=4096).contains(&capacity));
        }
    }
}
