//! Subscriber setup for the binary. Library crates only emit events.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter for a `-v` count. `RUST_LOG` wins when no `-v` is given.
pub fn env_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber, writing to stderr so stdout carries only
/// command output.
pub fn init_tracing(verbose: u8) {
    fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
