use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Memoized scalars of one type, keyed by full key path.
///
/// Entries are only ever inserted. Each entry is a whole value, so a
/// poisoned lock still guards consistent data and is recovered from.
#[derive(Debug)]
pub struct ScalarCache<T> {
	entries: RwLock<HashMap<String, T>>,
}

impl<T: Clone> ScalarCache<T> {
	pub fn new() -> Self {
		ScalarCache {
			entries: RwLock::new(HashMap::new()),
		}
	}

	/// Return the cached value for `key`, holding only the read lock.
	pub fn lookup(&self, key: &str) -> Option<T> {
		let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
		entries.get(key).cloned()
	}

	/// Remember `value` for `key`. The write lock covers only the insert.
	pub fn store(&self, key: &str, value: T) {
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		entries.insert(key.to_string(), value);
	}

	pub fn len(&self) -> usize {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T: Clone> Default for ScalarCache<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// One independent cache per scalar type, so lookups of different types
/// never contend on the same lock.
#[derive(Debug, Default)]
pub struct ScalarCaches {
	pub floats: ScalarCache<f64>,
	pub bools: ScalarCache<bool>,
	pub strings: ScalarCache<String>,
}
