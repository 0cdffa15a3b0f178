//! Logging init for the command line tool: structured events on stderr.
//!
//! The library only emits `tracing` events; embedding engines install their own subscriber.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,mirror_postprocess=debug";

/// Filter used when the caller asked for quiet output.
pub const QUIET_FILTER: &str = "warn";

/// Install a stderr subscriber honouring `RUST_LOG`.
pub fn init_logging(quiet: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let fallback = if quiet { QUIET_FILTER } else { DEFAULT_FILTER };
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .try_init()
}
