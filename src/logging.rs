//! Log subscriber for the CLI and server.
//!
//! `RUST_LOG` picks the filter. Without it the minter's own events and HTTP
//! request spans log at debug, everything else at info.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,ordinal_minter=debug,tower_http=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// `MINTER_LOG_JSON=1|true|yes` selects JSON lines.
    pub fn from_env() -> Self {
        match std::env::var("MINTER_LOG_JSON") {
            Ok(v) if matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Installs the global subscriber on stderr. A second call is a no-op.
pub fn init_logging() -> LogFormat {
    let format = LogFormat::from_env();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt::Subscriber::builder().with_env_filter(filter).with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.compact().with_target(false).try_init(),
    };
    format
}
