//! Tracing/logging initialization.
//!
//! JSON lines on stderr, filtered by `RUST_LOG` (default `info`). Stdout is
//! left to command output.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_is_a_no_op() {
        super::init();
        super::init();
        ::tracing::info!("still logging");
    }
}
