//! gamecheck-core: Headless browser verification for canvas web games
//!
//! This library drives a headless Chromium instance against a locally
//! running web game and verifies its observable output: screenshots of
//! gameplay states and the inline style the engine's scale manager
//! applies to the canvas element. It includes the browser driver,
//! scenario runners, report types, and error handling.

pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod scenario;

pub use config::VerifyConfig;
pub use error::{VerifyError, VerifyResult};
