//! Run configuration for verification scenarios

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};
use crate::model::{GameDimensions, Viewport};

/// Default URL the Vite dev server serves the game at
pub const DEFAULT_GAME_URL: &str = "http://localhost:5173/";

/// Default directory screenshots are written to
pub const DEFAULT_OUTPUT_DIR: &str = "verification";

/// Default selector for the engine's render surface
pub const DEFAULT_CANVAS_SELECTOR: &str = "canvas";

/// Configuration shared by all verification scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// URL the game server is expected at
    pub url: String,
    /// Directory screenshot artifacts are written to
    pub output_dir: PathBuf,
    /// CSS selector for the render surface
    pub canvas_selector: String,
    /// Browser viewport
    pub viewport: Viewport,
    /// Game base resolution used for scaling expectations
    pub base: GameDimensions,
    /// Run the browser without a visible window
    pub headless: bool,
    /// Disable the Chromium sandbox (needed in most containers)
    pub no_sandbox: bool,
    /// Explicit Chromium executable, `None` auto-detects
    pub chrome_executable: Option<PathBuf>,
    /// Navigation retry attempts before giving up
    pub nav_attempts: u32,
    /// Pixel tolerance for scaling comparisons
    pub tolerance_px: f64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GAME_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            canvas_selector: DEFAULT_CANVAS_SELECTOR.to_string(),
            viewport: Viewport::new(1000, 800),
            base: GameDimensions::default(),
            headless: true,
            no_sandbox: false,
            chrome_executable: None,
            nav_attempts: 3,
            tolerance_px: 1.0,
        }
    }
}

impl VerifyConfig {
    /// Set the game server URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the artifact output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the browser viewport
    #[must_use]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport::new(width, height);
        self
    }

    /// Set the scaling comparison tolerance
    #[must_use]
    pub fn with_tolerance(mut self, tolerance_px: f64) -> Self {
        self.tolerance_px = tolerance_px;
        self
    }

    /// Validates the configuration before any browser is launched
    pub fn validate(&self) -> VerifyResult<()> {
        self.viewport.validate()?;
        if self.nav_attempts == 0 {
            return Err(VerifyError::InvalidParameter {
                parameter: "nav_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.tolerance_px.is_finite() || self.tolerance_px < 0.0 {
            return Err(VerifyError::InvalidParameter {
                parameter: "tolerance".to_string(),
                reason: format!("{} is not a non-negative number", self.tolerance_px),
            });
        }
        if self.canvas_selector.trim().is_empty() {
            return Err(VerifyError::InvalidParameter {
                parameter: "selector".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
