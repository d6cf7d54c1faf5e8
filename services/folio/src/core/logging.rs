//! Tracing subscriber setup shared by the binaries.
//!
//! `RUST_LOG` selects the filter, falling back to the binary's
//! default. `FOLIO_LOG_FORMAT=json` switches to one JSON object per
//! line for log shippers.

use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used by the HTTP server when `RUST_LOG` is unset
pub const SERVER_DEFAULT_FILTER: &str = "folio=info,tower_http=info";

/// Filter used by the CLI when `RUST_LOG` is unset
pub const CLI_DEFAULT_FILTER: &str = "folio=warn";

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Read `FOLIO_LOG_FORMAT`; anything but `json` is text
    pub fn from_env() -> Self {
        match env::var("FOLIO_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global subscriber.
///
/// CLI output owns stdout, so `to_stderr` keeps log lines out of
/// piped results. Calling this twice is harmless; the second call is
/// ignored.
pub fn init_tracing(default_filter: &str, to_stderr: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match (LogFormat::from_env(), to_stderr) {
        (LogFormat::Json, true) => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        (LogFormat::Json, false) => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        (LogFormat::Text, true) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .compact(),
            )
            .try_init(),
        (LogFormat::Text, false) => registry
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
