//! The decoded document tree and key-path navigation.
//!
//! This module handles:
//! - The generic `Node` representation every decoder produces
//! - Splitting key paths into segments
//! - Locating a node by key path and enumerating leaf paths

pub mod navigator;
pub mod node;

pub use navigator::{DEFAULT_DELIMITER, leaf_paths, locate, segments};
pub use node::{Node, NodeKind};
