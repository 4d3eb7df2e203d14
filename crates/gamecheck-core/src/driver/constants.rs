//! Timing constants for browser-driven verification runs.
//!
//! Centralizes the timeouts and settle delays used by the driver and
//! scenarios so they stay consistent and tunable in one place.
//!
//! # Runtime Configuration
//!
//! Timing values can be overridden at runtime via environment variables:
//!
//! | Environment Variable | Default | Description |
//! |---------------------|---------|-------------|
//! | `GAMECHECK_SELECTOR_TIMEOUT_MS` | 10000 | Canvas wait timeout |
//! | `GAMECHECK_NAV_RETRY_DELAY_MS` | 500 | Delay between navigation retries |
//! | `GAMECHECK_LEVEL_SETTLE_MS` | 1000 | Wait after starting a level |
//!
//! # Timing Philosophy
//!
//! The game boots asynchronously: Vite serves the bundle, the engine
//! initializes WebGL, and only then does the canvas appear. The selector
//! timeout must cover a cold dev-server compile; the settle delays only
//! need to cover scene transitions, which are fast once the engine runs.

/// Timeout for waiting for the canvas (or any selector) to appear.
///
/// Covers engine boot plus a cold Vite compile of the bundle. 10 seconds
/// is generous; hitting it almost always means the game failed to boot.
pub const SELECTOR_TIMEOUT_MS: u64 = 10_000;

/// Interval between selector existence polls.
///
/// 100ms keeps the wait responsive without hammering the CDP session.
pub const SELECTOR_POLL_INTERVAL_MS: u64 = 100;

/// Base delay between navigation retry attempts.
///
/// Retries use linear backoff: attempt N waits N times this value,
/// giving a just-started dev server time to begin accepting connections.
pub const NAV_RETRY_DELAY_MS: u64 = 500;

/// Settle time after pressing Enter on the main menu.
///
/// The level scene loads its tilemap and spawns entities before the
/// first frame worth screenshotting.
pub const LEVEL_SETTLE_MS: u64 = 1000;

/// How long the movement key is held to produce visible displacement.
pub const MOVE_HOLD_MS: u64 = 500;

/// Delay between consecutive fire presses so both projectiles spawn.
pub const FIRE_INTERVAL_MS: u64 = 100;

/// Settle time after setting a viewport override before reading styles.
///
/// The scale manager reacts to resize events on the next frame.
pub const RESIZE_SETTLE_MS: u64 = 250;

/// Helper to get a timing value from environment variable or fall back
/// to the default.
fn get_timing_from_env(env_var: &str, default: u64) -> u64 {
    std::env::var(env_var)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Get the selector wait timeout, checking environment variable override.
///
/// Override with: `GAMECHECK_SELECTOR_TIMEOUT_MS`
pub fn selector_timeout_ms() -> u64 {
    get_timing_from_env("GAMECHECK_SELECTOR_TIMEOUT_MS", SELECTOR_TIMEOUT_MS)
}

/// Get the navigation retry delay, checking environment variable override.
///
/// Override with: `GAMECHECK_NAV_RETRY_DELAY_MS`
pub fn nav_retry_delay_ms() -> u64 {
    get_timing_from_env("GAMECHECK_NAV_RETRY_DELAY_MS", NAV_RETRY_DELAY_MS)
}

/// Get the level settle delay, checking environment variable override.
///
/// Override with: `GAMECHECK_LEVEL_SETTLE_MS`
pub fn level_settle_ms() -> u64 {
    get_timing_from_env("GAMECHECK_LEVEL_SETTLE_MS", LEVEL_SETTLE_MS)
}
