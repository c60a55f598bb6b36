use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A node of a decoded document.
///
/// Every decoder produces this shape, so lookups never depend on the
/// input syntax. Numbers are always `f64`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
	Null,
	Bool(bool),
	Float(f64),
	String(String),
	Sequence(Vec<Node>),
	Mapping(BTreeMap<String, Node>),
}

/// The runtime kind of a node, used in type mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
	Null,
	Bool,
	Float,
	String,
	Sequence,
	Mapping,
}

impl NodeKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			NodeKind::Null => "null",
			NodeKind::Bool => "bool",
			NodeKind::Float => "float",
			NodeKind::String => "string",
			NodeKind::Sequence => "sequence",
			NodeKind::Mapping => "mapping",
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl Node {
	pub fn kind(&self) -> NodeKind {
		match self {
			Node::Null => NodeKind::Null,
			Node::Bool(_) => NodeKind::Bool,
			Node::Float(_) => NodeKind::Float,
			Node::String(_) => NodeKind::String,
			Node::Sequence(_) => NodeKind::Sequence,
			Node::Mapping(_) => NodeKind::Mapping,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Node::Float(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Node::Bool(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Node::String(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_mapping(&self) -> Option<&BTreeMap<String, Node>> {
		match self {
			Node::Mapping(map) => Some(map),
			_ => None,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Node::Null)
	}
}

impl From<serde_json::Value> for Node {
	fn from(value: serde_json::Value) -> Self {
		use serde_json::Value;

		match value {
			Value::Null => Node::Null,
			Value::Bool(b) => Node::Bool(b),
			// Without arbitrary precision every JSON number has an f64 form.
			Value::Number(n) => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
			Value::String(s) => Node::String(s),
			Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
			Value::Object(map) => {
				Node::Mapping(map.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
			}
		}
	}
}

impl From<toml::Value> for Node {
	fn from(value: toml::Value) -> Self {
		use toml::Value;

		match value {
			Value::String(s) => Node::String(s),
			// Integers beyond 2^53 round to the nearest representable f64.
			Value::Integer(i) => Node::Float(i as f64),
			Value::Float(f) => Node::Float(f),
			Value::Boolean(b) => Node::Bool(b),
			Value::Datetime(dt) => Node::String(dt.to_string()),
			Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
			Value::Table(table) => {
				Node::Mapping(table.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
			}
		}
	}
}

impl fmt::Display for Node {
	/// Scalars print bare; containers and null print as compact JSON.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Node::Bool(b) => write!(f, "{b}"),
			Node::Float(v) => write!(f, "{v}"),
			Node::String(s) => f.write_str(s),
			other => {
				let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
				f.write_str(&json)
			}
		}
	}
}
