//! Accessor configuration.
//!
//! Options can be built in code or loaded from a TOML file:
//!
//! ```toml
//! delimiter = "/"
//! memoize = false
//! ```

use crate::error::{GearError, Result};
use crate::tree::DEFAULT_DELIMITER;
use serde::Deserialize;
use std::path::Path;

/// Settings that shape how a `ConfigReader` resolves key paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AccessorOptions {
	/// Separator between mapping keys in a key path.
	pub delimiter: String,

	/// If false, typed lookups always walk the tree instead of
	/// remembering resolved scalars.
	pub memoize: bool,
}

impl Default for AccessorOptions {
	fn default() -> Self {
		AccessorOptions {
			delimiter: DEFAULT_DELIMITER.to_string(),
			memoize: true,
		}
	}
}

impl AccessorOptions {
	/// Validate option values that serde cannot check on its own.
	pub fn validate(&self) -> Result<()> {
		if self.delimiter.is_empty() {
			return Err(GearError::InvalidOptions {
				option: "delimiter".to_string(),
				reason: "must not be empty".to_string(),
			});
		}
		Ok(())
	}
}

/// Parse an options file from the given path.
pub fn parse_options_file(path: &Path) -> Result<AccessorOptions> {
	let content = std::fs::read_to_string(path).map_err(|source| GearError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_options_str(&content, path)
}

/// Parse options from a string (useful for testing).
pub fn parse_options_str(content: &str, path: &Path) -> Result<AccessorOptions> {
	let options: AccessorOptions =
		toml::from_str(content).map_err(|source| GearError::OptionsParseError {
			path: path.to_path_buf(),
			source,
		})?;

	options.validate()?;

	Ok(options)
}
