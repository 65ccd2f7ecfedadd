//! Tracing setup for the chatbot binaries.
//!
//! Logs go to stderr so they never interleave with the conversation on
//! stdout.

use tracing_subscriber::EnvFilter;

/// Filter used when neither `--log` nor `RUST_LOG` is given
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: the flag wins, then `RUST_LOG`, then the default.
pub fn filter_directive(flag: Option<&str>, rust_log: Option<&str>) -> String {
    flag.or(rust_log)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(flag: Option<&str>) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(flag, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
