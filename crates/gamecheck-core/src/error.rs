//! Error types for verification runs
//!
//! This module defines error types with user-facing messages and
//! actionable remediation hints. Each error provides context about what
//! went wrong and suggests next steps for resolution.

/// Result type alias for verification operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Error type for browser-driven verification operations
///
/// Each variant includes detailed context and provides remediation hints
/// through the `remediation_hint()` method.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// Chromium could not be launched or the CDP connection failed
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Underlying launch failure
        message: String,
    },

    /// Navigation to the game URL failed after all retry attempts
    #[error("Navigation to '{url}' failed after {attempts} attempt(s): {message}")]
    Navigation {
        /// URL that could not be reached
        url: String,
        /// Number of attempts made before giving up
        attempts: u32,
        /// Last underlying error
        message: String,
    },

    /// The awaited DOM selector never appeared
    #[error("Selector '{selector}' did not appear within {timeout_ms}ms")]
    SelectorTimeout {
        /// CSS selector that was awaited
        selector: String,
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// JavaScript evaluation in the page failed
    #[error("Script evaluation failed: {message}")]
    Evaluation {
        /// Underlying evaluation error
        message: String,
    },

    /// Synthetic key event dispatch failed
    #[error("Key input '{key}' failed: {message}")]
    Input {
        /// Key that was being dispatched
        key: String,
        /// Underlying input error
        message: String,
    },

    /// Screenshot capture failed
    #[error("Screenshot capture failed: {message}")]
    Screenshot {
        /// Underlying capture error
        message: String,
    },

    /// Captured image data could not be decoded or validated
    #[error("Image processing error: {0}")]
    ImageError(String),

    /// Invalid parameter provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: String,
        /// Reason why it's invalid
        reason: String,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl VerifyError {
    /// Returns an actionable remediation hint for this error
    ///
    /// Provides guidance and next steps for users to resolve the error
    /// condition.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamecheck_core::error::VerifyError;
    ///
    /// let error = VerifyError::SelectorTimeout {
    ///     selector: "canvas".to_string(),
    ///     timeout_ms: 10_000,
    /// };
    ///
    /// let hint = error.remediation_hint();
    /// assert!(hint.contains("selector"));
    /// ```
    pub fn remediation_hint(&self) -> &str {
        match self {
            VerifyError::BrowserLaunch { .. } => {
                "Ensure Chromium or Google Chrome is installed and on PATH, or pass an explicit \
                 executable with --chrome. In containers, --no-sandbox is usually required."
            }
            VerifyError::Navigation { .. } => {
                "Check that the game dev server is running and reachable at the given URL. The \
                 Vite default is http://localhost:5173 - check server.log if a different port was \
                 assigned."
            }
            VerifyError::SelectorTimeout { .. } => {
                "The page loaded but the expected element never rendered. Check the browser \
                 console for game boot errors, and verify the selector matches the element the \
                 engine creates (a canvas for WebGL/Canvas renderers)."
            }
            VerifyError::Evaluation { .. } => {
                "Script evaluation failed inside the page. This usually means the page navigated \
                 away mid-run or the game crashed. Re-run with RUST_LOG=gamecheck_core=debug for \
                 the failing expression."
            }
            VerifyError::Input { .. } => {
                "Key event dispatch failed. Verify the CDP session is still alive and the page \
                 has not been closed. Retrying the run usually succeeds."
            }
            VerifyError::Screenshot { .. } => {
                "Screenshot capture failed. The target page may have been closed or the renderer \
                 may have crashed. Check available memory and retry."
            }
            VerifyError::ImageError(_) => {
                "Captured image data could not be decoded. This indicates a truncated CDP payload; \
                 retry the capture."
            }
            VerifyError::InvalidParameter { parameter, .. } => match parameter.as_str() {
                "viewport" => "Viewport width and height must both be greater than zero.",
                "tolerance" => "Tolerance must be a non-negative number of pixels.",
                _ => "Check the parameter value against the CLI documentation.",
            },
            VerifyError::IoError(_) => {
                "An I/O error occurred. Check that the output directory is writable and the disk \
                 has free space."
            }
        }
    }

    /// Whether retrying the same operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            VerifyError::Navigation { .. }
                | VerifyError::Input { .. }
                | VerifyError::Screenshot { .. }
                | VerifyError::ImageError(_)
                | VerifyError::IoError(_)
        )
    }
}
