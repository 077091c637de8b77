//! Logging initialization
//!
//! The engine itself only emits `tracing` events; installing a subscriber is
//! the binary's job. Logs always go to stderr so that JSON written to stdout
//! stays machine readable.

use std::sync::Once;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_DIRECTIVE: &str = "domdiff=info";
const VERBOSE_DIRECTIVE: &str = "domdiff=debug";

/// Output profile for the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug level for this crate
    Development,
    /// JSON lines, info level
    Production,
    /// Warnings and errors only
    Quiet,
}

static INIT_ONCE: Once = Once::new();

/// Installs the global subscriber; later calls are no-ops
///
/// `RUST_LOG` always wins over the profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let fallback = match profile {
            Profile::Development => VERBOSE_DIRECTIVE,
            Profile::Production => DEFAULT_DIRECTIVE,
            Profile::Quiet => "domdiff=warn",
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        match profile {
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .init(),
            Profile::Development | Profile::Quiet => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .finish()
                .init(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(Profile::Quiet);
        init(Profile::Development);
        init(Profile::Production);
    }
}
