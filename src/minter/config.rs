//! Minter configuration - built by the CLI from flags, env and `.env`

use std::time::Duration;

use crate::core::constants::app;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinterConfig {
    pub app: String,
    pub bind: String,
    pub port: u16,
    /// Latency added to every simulated broadcast.
    pub chain_delay: Duration,
    /// Seed the store with fixture collections and example artifacts.
    pub seed_fixtures: bool,
}

impl Default for MinterConfig {
    fn default() -> Self {
        Self {
            app: app::SERVICE.into(),
            bind: DEFAULT_BIND.into(),
            port: DEFAULT_PORT,
            chain_delay: Duration::ZERO,
            seed_fixtures: true,
        }
    }
}

impl MinterConfig {
    pub fn new(app: impl Into<String>) -> Self { Self { app: app.into(), ..Default::default() } }
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self { self.bind = bind.into(); self }
    pub fn with_port(mut self, port: u16) -> Self { self.port = port; self }
    pub fn with_chain_delay(mut self, delay: Duration) -> Self { self.chain_delay = delay; self }
    pub fn without_fixtures(mut self) -> Self { self.seed_fixtures = false; self }

    /// `MINTER_APP`, `MINTER_BIND`, `MINTER_PORT`, `MINTER_CHAIN_DELAY_MS`. Unparseable values are ignored.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|s| !s.trim().is_empty());
        let mut config = Self::default();
        if let Some(app) = var("MINTER_APP") { config.app = app; }
        if let Some(bind) = var("MINTER_BIND") { config.bind = bind; }
        if let Some(port) = var("MINTER_PORT").and_then(|s| s.trim().parse().ok()) { config.port = port; }
        if let Some(ms) = var("MINTER_CHAIN_DELAY_MS").and_then(|s| s.trim().parse::<u64>().ok()) {
            config.chain_delay = Duration::from_millis(ms);
        }
        config
    }

    pub fn addr(&self) -> String { format!("{}:{}", self.bind, self.port) }
}

/// Load `KEY=value` lines from `path` without overriding variables already set.
pub fn load_dotenv(path: &str) -> usize {
    let Ok(contents) = std::fs::read_to_string(path) else { return 0 };
    let mut loaded = 0;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"');
            if !value.is_empty() && std::env::var(key.trim()).is_err() {
                std::env::set_var(key.trim(), value);
                loaded += 1;
            }
        }
    }
    loaded
}
