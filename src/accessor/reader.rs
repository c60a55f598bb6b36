use crate::accessor::cache::{ScalarCache, ScalarCaches};
use crate::decode::{self, Format};
use crate::error::{GearError, Result};
use crate::options::AccessorOptions;
use crate::tree::{Node, NodeKind, locate};
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// A scalar type that typed lookups can return.
///
/// Matching is exact: a node converts only if it already holds this type.
pub trait Scalar: Clone + Sized {
	/// Kind reported when a node of another kind is found.
	const KIND: NodeKind;

	fn from_node(node: &Node) -> Option<Self>;

	/// The memoization cache that holds values of this type.
	fn cache(caches: &ScalarCaches) -> &ScalarCache<Self>;
}

impl Scalar for f64 {
	const KIND: NodeKind = NodeKind::Float;

	fn from_node(node: &Node) -> Option<Self> {
		node.as_f64()
	}

	fn cache(caches: &ScalarCaches) -> &ScalarCache<Self> {
		&caches.floats
	}
}

impl Scalar for bool {
	const KIND: NodeKind = NodeKind::Bool;

	fn from_node(node: &Node) -> Option<Self> {
		node.as_bool()
	}

	fn cache(caches: &ScalarCaches) -> &ScalarCache<Self> {
		&caches.bools
	}
}

impl Scalar for String {
	const KIND: NodeKind = NodeKind::String;

	fn from_node(node: &Node) -> Option<Self> {
		node.as_str().map(str::to_string)
	}

	fn cache(caches: &ScalarCaches) -> &ScalarCache<Self> {
		&caches.strings
	}
}

/// Typed, key-path access over a decoded document.
///
/// The tree is never modified after construction, so a reader can be
/// shared across threads; only the memoization caches take locks.
#[derive(Debug)]
pub struct ConfigReader {
	tree: Node,
	options: AccessorOptions,
	caches: Option<ScalarCaches>,
}

impl ConfigReader {
	/// Wrap an already decoded tree.
	pub fn from_node(tree: Node, options: AccessorOptions) -> Result<Self> {
		options.validate()?;
		let caches = options.memoize.then(ScalarCaches::default);
		Ok(ConfigReader {
			tree,
			options,
			caches,
		})
	}

	/// Decode a JSON stream with default options.
	pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
		Self::from_node(decode::decode_json_reader(reader)?, AccessorOptions::default())
	}

	/// Decode a JSON string with default options.
	pub fn from_json_str(content: &str) -> Result<Self> {
		Self::from_node(decode::decode_json_str(content)?, AccessorOptions::default())
	}

	/// Decode a TOML string with default options.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Self::from_node(decode::decode_toml_str(content)?, AccessorOptions::default())
	}

	/// Decode a string in the given format.
	pub fn from_str_with(content: &str, format: Format, options: AccessorOptions) -> Result<Self> {
		Self::from_node(decode::decode_str(content, format)?, options)
	}

	/// Read and decode a document file.
	pub fn open(path: &Path, options: AccessorOptions) -> Result<Self> {
		Self::from_node(decode::decode_file(path)?, options)
	}

	pub fn options(&self) -> &AccessorOptions {
		&self.options
	}

	/// The whole decoded tree.
	pub fn root(&self) -> &Node {
		&self.tree
	}

	/// Find the raw node at `key`, without any type check or caching.
	///
	/// A null value reads the same as a missing key.
	pub fn get(&self, key: &str) -> Option<&Node> {
		locate(&self.tree, key, &self.options.delimiter).filter(|node| !node.is_null())
	}

	/// Look up a float. Integers in the document are floats.
	pub fn get_float(&self, key: &str) -> Result<f64> {
		self.get_scalar(key)
	}

	pub fn get_bool(&self, key: &str) -> Result<bool> {
		self.get_scalar(key)
	}

	pub fn get_string(&self, key: &str) -> Result<String> {
		self.get_scalar(key)
	}

	/// Look up a scalar of type `T`.
	///
	/// A cached value short-circuits navigation. Only successful lookups
	/// are cached; missing keys and type mismatches are re-checked against
	/// the tree on every call.
	pub fn get_scalar<T: Scalar>(&self, key: &str) -> Result<T> {
		let cache = self.caches.as_ref().map(T::cache);

		if let Some(value) = cache.and_then(|cache| cache.lookup(key)) {
			trace!(key, kind = T::KIND.as_str(), "cache hit");
			return Ok(value);
		}

		let node = self.get(key).ok_or_else(|| GearError::DoesNotExist {
			key: key.to_string(),
		})?;

		let value = T::from_node(node).ok_or_else(|| GearError::IncompatibleType {
			key: key.to_string(),
			expected: T::KIND,
			found: node.kind(),
		})?;

		if let Some(cache) = cache {
			cache.store(key, value.clone());
			trace!(key, kind = T::KIND.as_str(), "cached resolved value");
		}

		Ok(value)
	}

	/// Number of memoized values per type, as (floats, bools, strings).
	pub fn cached_counts(&self) -> (usize, usize, usize) {
		match &self.caches {
			Some(caches) => (
				caches.floats.len(),
				caches.bools.len(),
				caches.strings.len(),
			),
			None => (0, 0, 0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MAP_JSON: &str = r#"{
		"Id": "d836a5e40aa8974d7076e791ba3c14726bf2dd2cd079652477d6827973969130",
		"Created": "2016-08-31T16:49:33.119587574Z",
		"Path": "/bin/bash",
		"Args": [{"bool": true}],
		"Level": 34.7,
		"Running": true,
		"Nothing": null,
		"State": {
			"Status": "running",
			"Running": true,
			"Paused": false
		}
	}"#;

	fn reader() -> ConfigReader {
		ConfigReader::from_json_str(MAP_JSON).unwrap()
	}

	#[test]
	fn test_get() {
		let config = reader();
		assert_eq!(
			config.get("Id").and_then(Node::as_str),
			Some("d836a5e40aa8974d7076e791ba3c14726bf2dd2cd079652477d6827973969130")
		);
		assert_eq!(config.get("NoThere"), None);
	}

	#[test]
	fn test_get_does_not_populate_caches() {
		let config = reader();
		let _ = config.get("Level");
		let _ = config.get("State.Status");
		assert_eq!(config.cached_counts(), (0, 0, 0));
	}

	#[test]
	fn test_get_float() {
		let config = reader();
		assert_eq!(config.get_float("Level").unwrap(), 34.7);
		assert!(config.get_float("FloatNone").unwrap_err().is_does_not_exist());
		assert!(config.get_float("Id").unwrap_err().is_incompatible_type());
	}

	#[test]
	fn test_get_bool() {
		let config = reader();
		assert!(config.get_bool("Running").unwrap());
		assert!(!config.get_bool("State.Paused").unwrap());
		assert!(config.get_bool("Nowhere").unwrap_err().is_does_not_exist());
		assert!(config.get_bool("Id").unwrap_err().is_incompatible_type());
	}

	#[test]
	fn test_get_string() {
		let config = reader();
		assert_eq!(config.get_string("Path").unwrap(), "/bin/bash");
		assert_eq!(config.get_string("State.Status").unwrap(), "running");
		assert!(config.get_string("Nowhere").unwrap_err().is_does_not_exist());
		assert!(config.get_string("Running").unwrap_err().is_incompatible_type());
	}

	#[test]
	fn test_incompatible_type_reports_kinds() {
		let config = reader();
		match config.get_float("State").unwrap_err() {
			GearError::IncompatibleType {
				key,
				expected,
				found,
			} => {
				assert_eq!(key, "State");
				assert_eq!(expected, NodeKind::Float);
				assert_eq!(found, NodeKind::Mapping);
			}
			other => panic!("Expected IncompatibleType error, got {other:?}"),
		}
	}

	#[test]
	fn test_null_reads_as_missing() {
		let config = reader();
		assert_eq!(config.get("Nothing"), None);
		assert!(config.get_string("Nothing").unwrap_err().is_does_not_exist());
		assert!(config.get_bool("Nothing").unwrap_err().is_does_not_exist());
		assert!(config.get_float("Nothing").unwrap_err().is_does_not_exist());
		assert_eq!(config.cached_counts(), (0, 0, 0));
	}

	#[test]
	fn test_null_root_reads_as_missing() {
		let config = ConfigReader::from_json_str("null").unwrap();
		assert_eq!(config.get(""), None);
		assert!(config.root().is_null());
		assert!(config.get_string("").unwrap_err().is_does_not_exist());
	}

	#[test]
	fn test_sequence_is_not_addressable() {
		let config = reader();
		assert!(config.get_bool("Args.0.bool").unwrap_err().is_does_not_exist());
		assert!(config.get_string("Args").unwrap_err().is_incompatible_type());
	}

	#[test]
	fn test_success_populates_only_its_cache() {
		let config = reader();
		config.get_float("Level").unwrap();
		assert_eq!(config.cached_counts(), (1, 0, 0));

		config.get_bool("Running").unwrap();
		config.get_string("State.Status").unwrap();
		assert_eq!(config.cached_counts(), (1, 1, 1));
	}

	#[test]
	fn test_failures_are_not_cached() {
		let config = reader();
		assert!(config.get_float("Id").is_err());
		assert!(config.get_float("Missing").is_err());
		assert_eq!(config.cached_counts(), (0, 0, 0));

		// A later lookup of another key is unaffected.
		assert_eq!(config.get_float("Level").unwrap(), 34.7);
		assert!(config.get_float("Id").unwrap_err().is_incompatible_type());
	}

	#[test]
	fn test_repeated_lookups_are_stable() {
		let config = reader();
		for _ in 0..3 {
			assert_eq!(config.get_float("Level").unwrap(), 34.7);
			assert!(config.get_bool("Id").unwrap_err().is_incompatible_type());
			assert!(config.get_string("Missing").unwrap_err().is_does_not_exist());
		}
		assert_eq!(config.cached_counts(), (1, 0, 0));
	}

	#[test]
	fn test_same_key_different_types() {
		let config = reader();
		assert!(config.get_bool("Running").unwrap());
		assert!(config.get_string("Running").unwrap_err().is_incompatible_type());
		assert!(config.get_float("Running").unwrap_err().is_incompatible_type());
		assert_eq!(config.cached_counts(), (0, 1, 0));
	}

	#[test]
	fn test_memoize_disabled() {
		let options = AccessorOptions {
			memoize: false,
			..Default::default()
		};
		let config = ConfigReader::from_str_with(MAP_JSON, Format::Json, options).unwrap();

		assert_eq!(config.get_float("Level").unwrap(), 34.7);
		assert_eq!(config.get_float("Level").unwrap(), 34.7);
		assert!(config.get_float("Id").unwrap_err().is_incompatible_type());
		assert_eq!(config.cached_counts(), (0, 0, 0));
	}

	#[test]
	fn test_custom_delimiter() {
		let options = AccessorOptions {
			delimiter: "/".to_string(),
			..Default::default()
		};
		let config = ConfigReader::from_str_with(MAP_JSON, Format::Json, options).unwrap();

		assert_eq!(config.get_string("State/Status").unwrap(), "running");
		assert!(config.get_string("State.Status").unwrap_err().is_does_not_exist());
	}

	#[test]
	fn test_invalid_options_rejected() {
		let options = AccessorOptions {
			delimiter: String::new(),
			..Default::default()
		};
		let result = ConfigReader::from_node(Node::Null, options);
		assert!(matches!(result, Err(GearError::InvalidOptions { .. })));
	}

	#[test]
	fn test_empty_key_addresses_root() {
		let config = reader();
		assert_eq!(config.get(""), Some(config.root()));
		assert!(config.get_string("").unwrap_err().is_incompatible_type());

		let scalar = ConfigReader::from_json_str(r#""just a string""#).unwrap();
		assert_eq!(scalar.get_string("").unwrap(), "just a string");
	}

	#[test]
	fn test_from_toml_str() {
		let config = ConfigReader::from_toml_str(
			r#"
name = "svc"
port = 8080

[limits]
enabled = true
"#,
		)
		.unwrap();

		assert_eq!(config.get_string("name").unwrap(), "svc");
		assert_eq!(config.get_float("port").unwrap(), 8080.0);
		assert!(config.get_bool("limits.enabled").unwrap());
	}

	#[test]
	fn test_decode_failure_yields_no_reader() {
		let err = ConfigReader::from_json_str("{not json").unwrap_err();
		assert!(err.is_decode_failure());
	}
}
