//! Hierarchy scene generation
//!
//! This module builds the linear node-chain stress-test scenes.

mod hierarchy_builder;

pub use hierarchy_builder::{
    generate_hierarchy_scene, generate_with_config, GenerateError, HierarchyBuilder,
};
