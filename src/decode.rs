//! Decoding input documents into a `Node` tree.
//!
//! Decoding happens once, before any `ConfigReader` exists. A document that
//! fails to decode is always reported as an error; there is no "empty but
//! usable" fallback.

use crate::error::{GearError, Result};
use crate::tree::Node;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Input syntax of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
	Json,
	Toml,
}

impl Format {
	/// Pick a format from a file extension. Anything but `.toml` is JSON.
	pub fn from_path(path: &Path) -> Format {
		match path.extension().and_then(|ext| ext.to_str()) {
			Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
			_ => Format::Json,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Format::Json => "json",
			Format::Toml => "toml",
		}
	}
}

/// Decode a JSON document from a byte stream.
pub fn decode_json_reader<R: Read>(reader: R) -> Result<Node> {
	let value: serde_json::Value =
		serde_json::from_reader(reader).map_err(|source| GearError::JsonDecodeError { source })?;
	Ok(Node::from(value))
}

/// Decode a JSON document from raw bytes. Invalid UTF-8 is a decode error.
pub fn decode_json_slice(bytes: &[u8]) -> Result<Node> {
	let value: serde_json::Value =
		serde_json::from_slice(bytes).map_err(|source| GearError::JsonDecodeError { source })?;
	Ok(Node::from(value))
}

/// Decode a JSON document from a string.
pub fn decode_json_str(content: &str) -> Result<Node> {
	let value: serde_json::Value =
		serde_json::from_str(content).map_err(|source| GearError::JsonDecodeError { source })?;
	Ok(Node::from(value))
}

/// Decode a TOML document from a string.
pub fn decode_toml_str(content: &str) -> Result<Node> {
	let table: toml::Table =
		toml::from_str(content).map_err(|source| GearError::TomlDecodeError { source })?;
	Ok(Node::from(toml::Value::Table(table)))
}

/// Decode a string in the given format.
pub fn decode_str(content: &str, format: Format) -> Result<Node> {
	match format {
		Format::Json => decode_json_str(content),
		Format::Toml => decode_toml_str(content),
	}
}

/// Read and decode a document file, choosing the format from its extension.
///
/// JSON is decoded from the raw bytes, so bad encoding surfaces as a decode
/// error. TOML must be valid UTF-8 before it is parsed.
pub fn decode_file(path: &Path) -> Result<Node> {
	let bytes = std::fs::read(path).map_err(|source| GearError::ReadError {
		path: path.to_path_buf(),
		source,
	})?;

	let format = Format::from_path(path);
	let tree = match format {
		Format::Json => decode_json_slice(&bytes)?,
		Format::Toml => {
			let content = std::str::from_utf8(&bytes).map_err(|e| GearError::ReadError {
				path: path.to_path_buf(),
				source: io::Error::new(io::ErrorKind::InvalidData, e),
			})?;
			decode_toml_str(content)?
		}
	};
	debug!(
		path = %path.display(),
		format = format.as_str(),
		root = %tree.kind(),
		"decoded document"
	);
	Ok(tree)
}
