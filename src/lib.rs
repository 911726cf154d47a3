//! s72 hierarchy generator
//!
//! Generates s72 scenes containing a deep parent/child chain of cube nodes,
//! used as load tests for s72 viewers.

pub mod config;
pub mod hierarchy;

pub use hierarchy::{generate_hierarchy_scene, generate_with_config, GenerateError, HierarchyBuilder};
