use crate::tree::node::Node;

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: &str = ".";

/// Split a key path into the mapping keys it descends through.
///
/// An empty key path yields no segments and so addresses the root.
/// Empty segments inside a non-empty path are kept as literal empty keys.
pub fn segments<'a>(key_path: &'a str, delimiter: &'a str) -> Vec<&'a str> {
	if key_path.is_empty() {
		return Vec::new();
	}
	key_path.split(delimiter).collect()
}

/// Locate the node addressed by `key_path`.
///
/// Each segment must name a key of the current mapping; descending into
/// anything that is not a mapping, or a missing key, makes the whole
/// lookup absent.
pub fn locate<'a>(tree: &'a Node, key_path: &str, delimiter: &str) -> Option<&'a Node> {
	segments(key_path, delimiter)
		.into_iter()
		.try_fold(tree, |current, segment| match current {
			Node::Mapping(map) => map.get(segment),
			_ => None,
		})
}

/// List the key paths of every node reachable by mapping descent that is
/// not itself a mapping, in key order.
///
/// Sequences and scalars are leaves. Nulls and empty mappings contribute
/// nothing. A root that is not a mapping yields the empty key path.
pub fn leaf_paths(tree: &Node, delimiter: &str) -> Vec<String> {
	let mut paths = Vec::new();
	collect_leaf_paths(tree, None, delimiter, &mut paths);
	paths
}

fn collect_leaf_paths(node: &Node, prefix: Option<&str>, delimiter: &str, out: &mut Vec<String>) {
	let map = match node {
		Node::Mapping(map) => map,
		Node::Null => return,
		_ => {
			out.push(prefix.unwrap_or_default().to_string());
			return;
		}
	};

	for (key, child) in map {
		let path = match prefix {
			Some(prefix) => format!("{prefix}{delimiter}{key}"),
			None => key.clone(),
		};
		collect_leaf_paths(child, Some(&path), delimiter, out);
	}
}
