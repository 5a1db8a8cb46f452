//! Server configuration derived from environment variables.

use std::env;
use std::path::PathBuf;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Optional TOML basket file; the compiled-in default basket otherwise.
    pub basket_path: Option<PathBuf>,
    /// Trailing fetch window length in calendar years.
    pub window_years: u32,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("CORRLAB_BIND", "0.0.0.0"),
            port: env_u16("CORRLAB_PORT", 8080),
            basket_path: env::var("CORRLAB_BASKET")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            window_years: env_u32("CORRLAB_WINDOW_YEARS", 5).max(1),
        }
    }
}
