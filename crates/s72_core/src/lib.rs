//! Core types for s72 scene documents
//!
//! This crate provides the building blocks for writing and checking s72 files:
//!
//! - [`SceneObject`] - A typed record (camera, node, material, mesh, scene)
//! - [`S72Document`] - The ordered record list with its format tag
//! - [`DocumentValidator`] - Reference and load-order checks
//! - [`DocumentLoadError`] / [`DocumentSaveError`] - File errors

mod error;
mod object;
mod document;
mod validator;

pub use error::{DocumentLoadError, DocumentSaveError};
pub use object::{
    Attribute, AttributeFormat, Camera, Lambertian, Material, Mesh, MeshAttributes, Node,
    ObjectKind, Perspective, Scene, SceneObject, Topology, IDENTITY_ROTATION, UNIT_SCALE,
};
pub use document::{S72Document, FORMAT_TAG};
pub use validator::{DocumentValidator, ValidationError};
