//! A single game page: navigation, waiting, input, and capture.

use std::path::Path;
use std::time::Duration;

use base64::Engine;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType,
};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::page::Page;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::VerifyConfig;
use crate::driver::constants;
use crate::driver::keys::GameKey;
use crate::error::{VerifyError, VerifyResult};
use crate::model::{CanvasStyle, Viewport};

/// Backing-store dimensions of the canvas element
///
/// These are the `width`/`height` attributes (render resolution), not
/// the CSS size the scale manager applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasBackingSize {
    /// `canvas.width`
    pub width: u32,
    /// `canvas.height`
    pub height: u32,
}

/// One open page against the game server
pub struct GameSession {
    page: Page,
    config: VerifyConfig,
}

impl GameSession {
    pub(crate) fn new(page: Page, config: VerifyConfig) -> Self {
        Self { page, config }
    }

    /// The configuration this session runs under.
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Applies a device metrics override so the layout viewport has
    /// exactly the requested dimensions.
    pub async fn set_viewport(&self, viewport: Viewport) -> VerifyResult<()> {
        viewport.validate()?;
        let params = SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(viewport.width))
            .height(i64::from(viewport.height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(|e| VerifyError::InvalidParameter {
                parameter: "viewport".to_string(),
                reason: e,
            })?;

        self.page
            .execute(params)
            .await
            .map_err(|e| VerifyError::Evaluation {
                message: e.to_string(),
            })?;
        debug!(%viewport, "viewport override applied");
        Ok(())
    }

    /// Navigates to the configured game URL, retrying with linear
    /// backoff while the dev server comes up.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Navigation`] once all attempts are
    /// exhausted. Failures are never deferred to a later selector wait.
    pub async fn goto_game(&self) -> VerifyResult<()> {
        let url = self.config.url.clone();
        let attempts = self.config.nav_attempts;
        let retry_delay = constants::nav_retry_delay_ms();

        let mut last_error = String::new();
        for attempt in 1..=attempts {
            match self.page.goto(url.as_str()).await {
                Ok(_) => {
                    info!(%url, attempt, "navigation succeeded");
                    return Ok(());
                }
                Err(e) => {
                    last_error = e.to_string();
                    if attempt < attempts {
                        let delay = retry_delay * u64::from(attempt);
                        warn!(%url, attempt, error = %last_error, delay_ms = delay, "navigation failed, retrying");
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    }
                }
            }
        }

        Err(VerifyError::Navigation {
            url,
            attempts,
            message: last_error,
        })
    }

    /// Waits for a CSS selector to match an element, polling the DOM.
    ///
    /// Evaluation errors during the wait are logged and treated as "not
    /// yet" since the page may still be mid-load; only the deadline
    /// produces a failure.
    pub async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> VerifyResult<()> {
        // Quote via JSON so arbitrary selectors embed safely
        let quoted = serde_json::to_string(selector).map_err(|e| VerifyError::Evaluation {
            message: e.to_string(),
        })?;
        let expr = format!("!!document.querySelector({quoted})");

        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            match self.evaluate::<bool>(&expr).await {
                Ok(true) => {
                    debug!(selector, "selector present");
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) => debug!(selector, error = %e, "poll evaluation failed, retrying"),
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(VerifyError::SelectorTimeout {
                    selector: selector.to_string(),
                    timeout_ms,
                });
            }
            tokio::time::sleep(Duration::from_millis(constants::SELECTOR_POLL_INTERVAL_MS)).await;
        }
    }

    /// Waits for the configured canvas selector with the default timeout.
    pub async fn wait_for_canvas(&self) -> VerifyResult<()> {
        let selector = self.config.canvas_selector.clone();
        self.wait_for_selector(&selector, constants::selector_timeout_ms())
            .await
    }

    /// Evaluates a JavaScript expression and deserializes its value.
    pub async fn evaluate<T: DeserializeOwned>(&self, expr: &str) -> VerifyResult<T> {
        let result = self
            .page
            .evaluate(expr)
            .await
            .map_err(|e| VerifyError::Evaluation {
                message: e.to_string(),
            })?;
        result.into_value().map_err(|e| VerifyError::Evaluation {
            message: e.to_string(),
        })
    }

    /// Presses and releases a game key.
    pub async fn press_key(&self, key: GameKey) -> VerifyResult<()> {
        self.key_down(key).await?;
        self.key_up(key).await
    }

    /// Holds a game key down for a duration, then releases it.
    pub async fn hold_key(&self, key: GameKey, duration: Duration) -> VerifyResult<()> {
        self.key_down(key).await?;
        tokio::time::sleep(duration).await;
        self.key_up(key).await
    }

    async fn key_down(&self, key: GameKey) -> VerifyResult<()> {
        let params = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyDown)
            .key(key.dom_key())
            .code(key.dom_code())
            .windows_virtual_key_code(key.virtual_key_code())
            .native_virtual_key_code(key.virtual_key_code())
            .text(key.text())
            .build()
            .map_err(|e| VerifyError::Input {
                key: key.to_string(),
                message: e,
            })?;
        self.dispatch_key(key, params).await
    }

    async fn key_up(&self, key: GameKey) -> VerifyResult<()> {
        let params = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyUp)
            .key(key.dom_key())
            .code(key.dom_code())
            .windows_virtual_key_code(key.virtual_key_code())
            .native_virtual_key_code(key.virtual_key_code())
            .build()
            .map_err(|e| VerifyError::Input {
                key: key.to_string(),
                message: e,
            })?;
        self.dispatch_key(key, params).await
    }

    async fn dispatch_key(&self, key: GameKey, params: DispatchKeyEventParams) -> VerifyResult<()> {
        self.page
            .execute(params)
            .await
            .map_err(|e| VerifyError::Input {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Captures a PNG screenshot and writes it to `path`.
    ///
    /// Returns the decoded PNG bytes so callers can validate them
    /// without re-reading the file.
    pub async fn screenshot_to(&self, path: &Path) -> VerifyResult<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        let response = self
            .page
            .execute(params)
            .await
            .map_err(|e| VerifyError::Screenshot {
                message: e.to_string(),
            })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&response.data)
            .map_err(|e| VerifyError::Screenshot {
                message: format!("base64 decode failed: {e}"),
            })?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, &bytes).await?;
        info!(path = %path.display(), bytes = bytes.len(), "screenshot written");
        Ok(bytes)
    }

    /// Reads the canvas element's inline style, as set by the engine's
    /// scale manager.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Evaluation`] if the canvas element is no
    /// longer in the document.
    pub async fn canvas_style(&self) -> VerifyResult<CanvasStyle> {
        let quoted = serde_json::to_string(&self.config.canvas_selector).map_err(|e| {
            VerifyError::Evaluation {
                message: e.to_string(),
            }
        })?;
        let expr = format!(
            "(() => {{ const el = document.querySelector({quoted}); \
             return el ? {{ width: el.style.width, height: el.style.height, \
             marginTop: el.style.marginTop, marginLeft: el.style.marginLeft }} : null; }})()"
        );

        let style: Option<CanvasStyle> = self.evaluate(&expr).await?;
        style.ok_or_else(|| VerifyError::Evaluation {
            message: format!(
                "element '{}' not found while reading style",
                self.config.canvas_selector
            ),
        })
    }

    /// Reads the canvas backing-store resolution (the engine's render
    /// size, independent of CSS scaling).
    pub async fn canvas_backing_size(&self) -> VerifyResult<CanvasBackingSize> {
        let quoted = serde_json::to_string(&self.config.canvas_selector).map_err(|e| {
            VerifyError::Evaluation {
                message: e.to_string(),
            }
        })?;
        let expr = format!(
            "(() => {{ const el = document.querySelector({quoted}); \
             return el ? {{ width: el.width, height: el.height }} : null; }})()"
        );

        let size: Option<CanvasBackingSize> = self.evaluate(&expr).await?;
        size.ok_or_else(|| VerifyError::Evaluation {
            message: format!(
                "element '{}' not found while reading backing size",
                self.config.canvas_selector
            ),
        })
    }
}
