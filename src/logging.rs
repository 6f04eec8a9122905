//! Logging configuration and subscriber installation.
//!
//! Library code logs through `tracing` only. Hosts (the CLI, the Python module
//! on import) call [`init_logging`] once; later calls are no-ops.
//!
//! Author: ALICE-BIND contributors

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`EnvFilter` syntax)
pub const LOG_ENV: &str = "ALICE_BIND_LOG";

/// Environment variable disabling ANSI colours when `0` or `false`
pub const LOG_ANSI_ENV: &str = "ALICE_BIND_LOG_ANSI";

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive, e.g. `warn` or `alice_bind=debug`
    pub filter: String,
    /// Coloured output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "warn".to_string(),
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Defaults overridden by `ALICE_BIND_LOG` / `ALICE_BIND_LOG_ANSI`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(filter) = lookup(LOG_ENV).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }
        if let Some(ansi) = lookup(LOG_ANSI_ENV) {
            config.ansi = !matches!(ansi.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no");
        }
        config
    }

    /// Replace the filter
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Install the global fmt subscriber
///
/// Returns `true` if this call (or an earlier one) installed our subscriber,
/// `false` if another subscriber already owned the global slot. An invalid
/// filter falls back to the default level.
pub fn init_logging(config: &LogConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_new(&config.filter)
            .unwrap_or_else(|_| EnvFilter::new(LogConfig::default().filter));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(config.ansi)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
}
