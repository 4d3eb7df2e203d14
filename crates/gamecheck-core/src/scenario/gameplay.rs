//! Gameplay smoke scenario: boot the game, start a level, move and
//! fire, screenshotting each state.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::driver::{constants, GameKey, GameSession};
use crate::error::VerifyResult;
use crate::model::ScenarioReport;
use crate::scenario::{capture_artifact, Scenario};

/// Artifact filename for the main menu screenshot
pub const MAIN_MENU_PNG: &str = "1_main_menu.png";
/// Artifact filename for the freshly loaded level
pub const LEVEL_PNG: &str = "2_level_1.png";
/// Artifact filename for the post-input action frame
pub const ACTION_PNG: &str = "3_level_1_action.png";

/// Drives the menu -> level -> action sequence and captures each state
#[derive(Debug, Default)]
pub struct GameplayScenario;

#[async_trait]
impl Scenario for GameplayScenario {
    fn name(&self) -> &'static str {
        "gameplay"
    }

    async fn run(&self, session: &GameSession) -> VerifyResult<ScenarioReport> {
        let started_at = Utc::now();
        let timer = Instant::now();
        let output_dir = session.config().output_dir.clone();

        session.goto_game().await?;
        session.wait_for_canvas().await?;

        let mut artifacts = Vec::with_capacity(3);
        artifacts.push(capture_artifact(session, &output_dir, MAIN_MENU_PNG, "main_menu").await?);
        info!("main menu screenshot taken");

        // Enter starts level 1; give the scene time to load
        session.press_key(GameKey::Start).await?;
        tokio::time::sleep(Duration::from_millis(constants::level_settle_ms())).await;

        artifacts.push(capture_artifact(session, &output_dir, LEVEL_PNG, "level_1").await?);
        info!("level 1 screenshot taken");

        // Move right, then fire twice
        session
            .hold_key(GameKey::MoveRight, Duration::from_millis(constants::MOVE_HOLD_MS))
            .await?;
        session.press_key(GameKey::Fire).await?;
        tokio::time::sleep(Duration::from_millis(constants::FIRE_INTERVAL_MS)).await;
        session.press_key(GameKey::Fire).await?;

        artifacts.push(capture_artifact(session, &output_dir, ACTION_PNG, "level_1_action").await?);
        info!("action screenshot taken");

        let passed = artifacts.iter().all(|a| a.width > 0 && a.height > 0);
        Ok(ScenarioReport {
            scenario: self.name().to_string(),
            started_at,
            duration_ms: timer.elapsed().as_millis() as u64,
            artifacts,
            scaling: None,
            passed,
        })
    }
}
