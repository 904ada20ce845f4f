//! Browser session lifecycle and page-scoped lookups.
//!
//! [`UiSession`] owns the launched Chrome process, the current page, the
//! implicit-wait policy, and the page-generation counter. Handles are only
//! obtainable through the session, which is what lets the generation model
//! hold: `navigate` and `refresh` advance the counter, and every handle
//! acquired earlier fails its next operation with `StaleHandle`.

use std::sync::Arc;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use devlens_core::{by_id, by_name, LocatorQuery, LocatorStrategy};

use crate::element::{PageGeneration, UiElement};
use crate::error::{Result, UiError};
use crate::handle::ChromeHandle;
use crate::wait::{poll_until, WaitConfig, DEFAULT_IMPLICIT_WAIT};

/// Configuration for launching a browser session.
///
/// Defaults are tuned for headless runs in CI containers.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<String>,

    /// Session-wide bound on how long any point lookup may poll.
    pub implicit_wait: std::time::Duration,
}

impl SessionConfig {
    /// Creates a config with headless defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets the implicit-wait bound.
    #[must_use]
    pub fn with_implicit_wait(mut self, wait: std::time::Duration) -> Self {
        self.implicit_wait = wait;
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Converts to a chromiumoxide `BrowserConfig`.
    fn to_browser_config(&self) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if self.headless {
            config = config.arg("--headless");
        } else {
            config = config.with_head();
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));

        // Unique user data dir so parallel sessions don't fight over the
        // ProcessSingleton lock
        let user_data_dir = std::env::temp_dir().join(format!("devlens-{}", uuid::Uuid::new_v4()));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| UiError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Required when user namespaces are unavailable (containers)
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in containerized environments
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
            implicit_wait: DEFAULT_IMPLICIT_WAIT,
        }
    }
}

/// A managed browser session: one Chrome process, one current page.
///
/// Each scenario owns its own session; nothing is shared between scenarios.
/// All element access goes through the session so staleness can be enforced
/// (see the module docs).
pub struct UiSession {
    browser: Arc<Mutex<Option<Browser>>>,
    page: ChromePage,
    generation: PageGeneration,
    wait: WaitConfig,
}

impl UiSession {
    /// Launches Chrome and opens a blank page.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed or fails to start,
    /// `ConnectionFailed` if the DevTools connection cannot be established.
    pub async fn launch(config: SessionConfig) -> Result<Self> {
        debug!("launching browser: {config:?}");

        let wait = WaitConfig::with_timeout(config.implicit_wait);
        let browser_config = config.to_browser_config()?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| UiError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // Drive the CDP event loop for the lifetime of the process
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser handler error: {e}");
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| UiError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            browser: Arc::new(Mutex::new(Some(browser))),
            page,
            generation: PageGeneration::new(),
            wait,
        })
    }

    /// Navigates to an absolute URL and waits for the document to load.
    ///
    /// Advances the page generation first: every handle acquired before this
    /// call is invalid afterwards, whether or not the navigation succeeds.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load in time.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let generation = self.generation.advance();
        debug!("navigate to {url} (generation {generation})");

        self.page
            .goto(url)
            .await
            .map_err(|e| UiError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_ready().await.map_err(|e| UiError::NavigationFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Reloads the current page. Advances the generation like [`navigate`].
    ///
    /// [`navigate`]: Self::navigate
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the reload does not complete in time.
    pub async fn refresh(&self) -> Result<()> {
        let generation = self.generation.advance();
        debug!("refresh (generation {generation})");

        self.page
            .reload()
            .await
            .map_err(|e| UiError::NavigationFailed {
                url: "<reload>".to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_ready().await.map_err(|e| UiError::NavigationFailed {
            url: "<reload>".to_string(),
            reason: e.to_string(),
        })
    }

    /// Waits until `document.readyState` is `complete`.
    async fn wait_for_ready(&self) -> Result<()> {
        poll_until(
            || async {
                let result = self
                    .page
                    .evaluate("document.readyState")
                    .await
                    .map_err(|e| UiError::ScriptFailed(e.to_string()))?;

                let ready = result
                    .value()
                    .and_then(|v| v.as_str())
                    .is_some_and(|s| s == "complete");

                if ready {
                    Ok(())
                } else {
                    Err(UiError::ElementNotFound {
                        query: "document ready".to_string(),
                    })
                }
            },
            self.wait,
            "document ready",
        )
        .await
    }

    /// The implicit-wait policy this session applies to point lookups.
    #[must_use]
    pub fn wait_config(&self) -> WaitConfig {
        self.wait
    }

    /// The session's page-generation counter.
    #[must_use]
    pub fn generation(&self) -> &PageGeneration {
        &self.generation
    }

    /// One page-scoped lookup attempt, no polling.
    async fn try_find_now(&self, query: &LocatorQuery) -> Result<Box<dyn UiElement>> {
        let element = match query.strategy {
            LocatorStrategy::Css => self.page.find_element(query.value.clone()).await,
            LocatorStrategy::XPath => self.page.find_xpath(query.value.clone()).await,
        }
        .map_err(|_| UiError::ElementNotFound {
            query: query.to_string(),
        })?;

        Ok(Box::new(ChromeHandle::new(element, self.generation.clone())))
    }

    /// Point lookup: polls for the first element matching `query` until the
    /// implicit-wait bound elapses.
    ///
    /// First-match in document order. `target` is the human-readable name
    /// carried by the timeout error.
    ///
    /// # Errors
    ///
    /// Returns `LookupTimeout` if nothing matches within the bound.
    pub async fn find(&self, query: &LocatorQuery, target: &str) -> Result<Box<dyn UiElement>> {
        poll_until(|| self.try_find_now(query), self.wait, target).await
    }

    /// Looks up a device row by its rendered name.
    ///
    /// Names are not unique: this resolves deterministically to the *first*
    /// matching row in document order, both times you call it. Callers must
    /// not assume the match is exclusive.
    ///
    /// # Errors
    ///
    /// Returns `LookupTimeout` if no row with that name appears in time.
    pub async fn find_by_name(&self, name: &str) -> Result<Box<dyn UiElement>> {
        self.find(&by_name(name), &format!("device named '{name}'"))
            .await
    }

    /// Looks up a device row by the id its edit affordance points at.
    ///
    /// # Errors
    ///
    /// Returns `LookupTimeout` if no such row appears in time; this is the
    /// variant callers match to confirm a deletion took effect.
    pub async fn find_by_id(&self, id: &str) -> Result<Box<dyn UiElement>> {
        self.find(&by_id(id), &format!("device id '{id}'")).await
    }

    /// Closes the page and shuts the browser down.
    ///
    /// Prefer calling this explicitly; if skipped, chromiumoxide's Drop
    /// kills the Chrome process without a graceful shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close cleanly.
    pub async fn close(self) -> Result<()> {
        let mut guard = self.browser.lock().await;
        if let Some(mut browser) = guard.take() {
            debug!("closing browser");
            browser
                .close()
                .await
                .map_err(|e| UiError::ConnectionFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// True once [`close`](Self::close) has completed.
    pub async fn is_closed(&self) -> bool {
        self.browser.lock().await.is_none()
    }
}
