//! Typed access to decoded documents.
//!
//! This module handles:
//! - Raw and typed key-path lookups
//! - Per-type memoization of resolved scalars behind independent locks

pub mod cache;
pub mod reader;

pub use cache::{ScalarCache, ScalarCaches};
pub use reader::{ConfigReader, Scalar};
