use crate::tree::NodeKind;
use std::path::PathBuf;

/// Library-level structured errors for confgear.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum GearError {
	#[error("Failed to read document: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to decode JSON document")]
	JsonDecodeError {
		#[source]
		source: serde_json::Error,
	},

	#[error("Failed to decode TOML document")]
	TomlDecodeError {
		#[source]
		source: toml::de::Error,
	},

	#[error("Config value does not exist: {key}")]
	DoesNotExist { key: String },

	#[error("Incompatible type for stored value: {key} (expected {expected}, found {found})")]
	IncompatibleType {
		key: String,
		expected: NodeKind,
		found: NodeKind,
	},

	#[error("Failed to parse options file: {path}")]
	OptionsParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid option {option}: {reason}")]
	InvalidOptions { option: String, reason: String },

	#[error("Logger setup failed: {0}")]
	Logger(String),
}

impl GearError {
	/// True for a lookup whose key path resolved to nothing.
	pub fn is_does_not_exist(&self) -> bool {
		matches!(self, GearError::DoesNotExist { .. })
	}

	/// True for a lookup that found a node of the wrong kind.
	pub fn is_incompatible_type(&self) -> bool {
		matches!(self, GearError::IncompatibleType { .. })
	}

	/// True for failures raised while turning input into a tree.
	pub fn is_decode_failure(&self) -> bool {
		matches!(
			self,
			GearError::ReadError { .. }
				| GearError::JsonDecodeError { .. }
				| GearError::TomlDecodeError { .. }
		)
	}
}

/// Result type alias using GearError.
pub type Result<T> = std::result::Result<T, GearError>;
