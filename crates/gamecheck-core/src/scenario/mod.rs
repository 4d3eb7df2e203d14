//! Verification scenarios
//!
//! A scenario is one self-contained verification procedure run against
//! an open [`GameSession`]: it drives the page, writes screenshot
//! artifacts, and produces a [`ScenarioReport`].

pub mod gameplay;
pub mod scaling;

use std::path::Path;

use async_trait::async_trait;

use crate::driver::GameSession;
use crate::error::{VerifyError, VerifyResult};
use crate::model::{ScenarioReport, ScreenshotArtifact};

pub use gameplay::GameplayScenario;
pub use scaling::ScalingScenario;

/// A verification procedure that can be run against a live session
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Short machine-friendly name, used in reports and log output
    fn name(&self) -> &'static str;

    /// Runs the scenario to completion.
    async fn run(&self, session: &GameSession) -> VerifyResult<ScenarioReport>;
}

/// All scenarios, in the order `check` runs them.
pub fn all_scenarios() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(GameplayScenario::default()),
        Box::new(ScalingScenario::default()),
    ]
}

/// Captures a screenshot into the output directory and records it as an
/// artifact, validating the PNG by decoding it.
pub(crate) async fn capture_artifact(
    session: &GameSession,
    output_dir: &Path,
    filename: &str,
    label: &str,
) -> VerifyResult<ScreenshotArtifact> {
    let path = output_dir.join(filename);
    let bytes = session.screenshot_to(&path).await?;
    artifact_from_bytes(label, path, &bytes)
}

/// Builds an artifact record from freshly captured PNG bytes.
pub(crate) fn artifact_from_bytes(
    label: &str,
    path: std::path::PathBuf,
    bytes: &[u8],
) -> VerifyResult<ScreenshotArtifact> {
    let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| VerifyError::ImageError(format!("{}: {e}", path.display())))?;
    Ok(ScreenshotArtifact {
        label: label.to_string(),
        path,
        width: decoded.width(),
        height: decoded.height(),
    })
}
