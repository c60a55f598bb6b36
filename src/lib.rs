//! Confgear - typed key-path access over decoded configuration documents.
//!
//! This library provides the core functionality for confgear, including:
//! - Decoding JSON (and TOML) documents into a generic tree
//! - Key-path navigation through nested mappings
//! - Typed lookups with per-type memoization safe for concurrent use
//!
//! # Example
//!
//! ```
//! use confgear::ConfigReader;
//!
//! let config = ConfigReader::from_json_str(
//! 	r#"{"Id": "abc", "Level": 34.7, "State": {"Status": "running"}}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.get_float("Level").unwrap(), 34.7);
//! assert_eq!(config.get_string("State.Status").unwrap(), "running");
//! assert!(config.get_float("Id").unwrap_err().is_incompatible_type());
//! assert!(config.get_bool("Missing").unwrap_err().is_does_not_exist());
//! ```

pub mod accessor;
pub mod decode;
pub mod error;
pub mod logging;
pub mod options;
pub mod tree;

pub use accessor::{ConfigReader, Scalar};
pub use error::{GearError, Result};
pub use options::AccessorOptions;
pub use tree::{Node, NodeKind};
