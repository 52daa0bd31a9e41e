//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for local runs
    Development,
    /// JSON structured output for CI log collection
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Filter applied when `RUST_LOG` is not set
    pub fn default_filter(&self) -> &'static str {
        match self {
            Profile::Development => "docparity=debug",
            Profile::Production => "docparity=info",
            Profile::Test => "off",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility with the profile's default filter
///
/// # Example
///
/// ```
/// use docparity_core::logging_facility::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    init_with_filter(profile, profile.default_filter());
}

/// Initialize the logging facility with an explicit default filter
///
/// `RUST_LOG` still takes precedence when set. Only the first call in a
/// process has any effect.
pub fn init_with_filter(profile: Profile, default_filter: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));
        // A subscriber installed elsewhere (e.g. test capture) wins.
        let _installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .is_ok(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .is_ok(),
            // Test capture is initialized separately via init_test_capture()
            Profile::Test => tracing_subscriber::registry().try_init().is_ok(),
        };
    });
}
