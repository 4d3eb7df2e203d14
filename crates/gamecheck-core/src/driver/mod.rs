//! Browser lifecycle management over the Chrome DevTools Protocol.
//!
//! [`GameBrowser`] owns the Chromium process and the CDP event handler
//! task; [`session::GameSession`] wraps a single page with the
//! navigation, input, and capture operations scenarios need.

pub mod constants;
pub mod keys;
pub mod session;

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::VerifyConfig;
use crate::error::{VerifyError, VerifyResult};

pub use keys::GameKey;
pub use session::GameSession;

/// A running headless Chromium instance
pub struct GameBrowser {
    inner: Browser,
    handler_task: JoinHandle<()>,
}

impl GameBrowser {
    /// Launches Chromium according to the run configuration.
    ///
    /// The CDP event handler is driven by a spawned task that lives as
    /// long as the browser process.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::BrowserLaunch`] if no usable Chromium
    /// executable is found or the CDP handshake fails.
    pub async fn launch(config: &VerifyConfig) -> VerifyResult<Self> {
        config.validate()?;

        let mut builder = BrowserConfig::builder()
            .window_size(config.viewport.width, config.viewport.height);

        if !config.headless {
            builder = builder.with_head();
        }
        if config.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| VerifyError::BrowserLaunch { message: e })?;

        let (browser, mut handler) =
            Browser::launch(cdp_config)
                .await
                .map_err(|e| VerifyError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler stream ended: {:?}", event);
                    break;
                }
            }
        });

        Ok(Self {
            inner: browser,
            handler_task,
        })
    }

    /// Opens a fresh page with the configured viewport applied.
    pub async fn new_session(&self, config: &VerifyConfig) -> VerifyResult<GameSession> {
        let page = self
            .inner
            .new_page("about:blank")
            .await
            .map_err(|e| VerifyError::BrowserLaunch {
                message: e.to_string(),
            })?;

        let session = GameSession::new(page, config.clone());
        session.set_viewport(config.viewport).await?;
        Ok(session)
    }

    /// Whether the CDP handler task is still running.
    pub fn is_handler_running(&self) -> bool {
        !self.handler_task.is_finished()
    }

    /// Closes the browser process and waits for the handler to drain.
    pub async fn close(mut self) -> VerifyResult<()> {
        self.inner
            .close()
            .await
            .map_err(|e| VerifyError::BrowserLaunch {
                message: e.to_string(),
            })?;
        let _ = self.handler_task.await;
        Ok(())
    }
}
