//! Tracing subscriber setup
//!
//! Logs go to stderr so command output on stdout stays machine readable.
//! `PLINTH_LOG` takes any `EnvFilter` directive and wins over the flags.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "PLINTH_LOG";

/// Filter used when `PLINTH_LOG` is unset
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "plinth=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(true, false), "plinth=debug");
        assert_eq!(default_directive(false, true), "error");
    }
}
