//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::io::IsTerminal;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter directives used when `RUST_LOG` is unset
    pub fn default_directives(&self) -> &'static str {
        match self {
            Profile::Development => "calltrace=debug",
            Profile::Production => "calltrace=info",
            Profile::Test => "trace",
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(profile.default_directives()))
}

/// Initialize the logging facility
///
/// This function should be called once at application startup.
/// It sets up the tracing subscriber based on the selected profile.
/// If another global subscriber is already installed, that one stays in
/// place.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Bare registry; see `test_capture` for assertions
///
/// # Example
///
/// ```
/// use calltrace_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_ansi(std::io::stdout().is_terminal())
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter(profile))
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        if installed.is_err() {
            tracing::debug!(?profile, "global subscriber already set; keeping it");
        }
    });
}
