//! Logging initialisation via tracing-subscriber.
//!
//! The library only emits `tracing` events; the binary calls [`init`] once
//! at startup to print them.

use crate::error::{GearError, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a level: 0 is `warn`, then `info`, `debug`, `trace`.
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
	match verbose {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	}
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` directives take precedence; `level` applies to everything
/// they do not cover. Invalid directives are ignored.
pub fn init(level: LevelFilter) -> Result<()> {
	let filter = EnvFilter::builder()
		.with_default_directive(level.into())
		.from_env_lossy();

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.map_err(|e| GearError::Logger(format!("failed to set subscriber: {e}")))?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_level_for_verbosity() {
		assert_eq!(level_for_verbosity(0), LevelFilter::WARN);
		assert_eq!(level_for_verbosity(1), LevelFilter::INFO);
		assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
		assert_eq!(level_for_verbosity(3), LevelFilter::TRACE);
		assert_eq!(level_for_verbosity(200), LevelFilter::TRACE);
	}

	#[test]
	fn test_second_init_fails() {
		// Whichever call wins, the global subscriber can only be set once.
		let _ = init(LevelFilter::WARN);
		let second = init(LevelFilter::WARN);
		assert!(matches!(second, Err(GearError::Logger(_))));
	}
}
