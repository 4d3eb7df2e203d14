//! Shared helpers for browser integration tests
//!
//! Tests self-skip when no Chromium binary is installed or the game dev
//! server is not running, so the suite stays green in minimal CI
//! environments.

use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;

/// Candidate executable names, most specific first
const CHROME_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome-stable",
    "google-chrome",
    "chrome",
];

/// Locates a Chromium/Chrome executable on PATH, or via `GAMECHECK_CHROME`.
pub fn detect_chrome() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("GAMECHECK_CHROME") {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(path);
        }
    }

    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        for name in CHROME_CANDIDATES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Whether a TCP listener is accepting connections at `host:port` of the URL.
pub fn server_reachable(url: &str) -> bool {
    let Some(rest) = url.split("//").nth(1) else {
        return false;
    };
    let authority = rest.split('/').next().unwrap_or(rest);
    let addr = if authority.contains(':') {
        authority.to_string()
    } else {
        format!("{authority}:80")
    };

    addr.to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .and_then(|sock| TcpStream::connect_timeout(&sock, Duration::from_millis(500)).ok())
        .is_some()
}

/// URL the game dev server is expected at during integration runs.
pub fn game_url() -> String {
    std::env::var("GAMECHECK_URL").unwrap_or_else(|_| "http://127.0.0.1:5173/".to_string())
}
