//! Document validation
//!
//! Validates documents for errors a viewer would reject or silently
//! mis-handle. The [`DocumentValidator`] checks the scene record, name
//! uniqueness, reference resolution and ordering, and node rotations.

use std::collections::{HashMap, HashSet};

use crate::document::S72Document;
use crate::object::{ObjectKind, SceneObject};

/// Allowed deviation of a rotation quaternion's length from 1
const ROTATION_TOLERANCE: f64 = 1e-4;

/// Validation error found in a document
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Document has no SCENE record
    MissingScene,
    /// A second SCENE record was found
    MultipleScenes(String),
    /// Two records of the same kind share a name
    DuplicateName { kind: ObjectKind, name: String },
    /// A record refers to another record defined later in the document
    ForwardReference { from: String, kind: ObjectKind, name: String },
    /// A record refers to a record that does not exist
    UnresolvedReference { from: String, kind: ObjectKind, name: String },
    /// Node rotation is not a unit quaternion
    NonUnitRotation { node: String, length: f64 },
    /// Mesh has a vertex count of zero
    EmptyMesh(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingScene => write!(f, "Document has no SCENE object"),
            ValidationError::MultipleScenes(name) => {
                write!(f, "Multiple SCENE objects (extra scene '{}')", name)
            }
            ValidationError::DuplicateName { kind, name } => {
                write!(f, "Duplicate {} name: '{}'", kind, name)
            }
            ValidationError::ForwardReference { from, kind, name } => {
                write!(f, "'{}' references {} '{}' before it is defined", from, kind, name)
            }
            ValidationError::UnresolvedReference { from, kind, name } => {
                write!(f, "'{}' references missing {} '{}'", from, kind, name)
            }
            ValidationError::NonUnitRotation { node, length } => {
                write!(f, "Node '{}' rotation has length {} (expected 1)", node, length)
            }
            ValidationError::EmptyMesh(name) => write!(f, "Mesh '{}' has no vertices", name),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Document validator that checks for common errors
///
/// Loaders read s72 records in order, so every reference must name a record
/// of the right kind that appears earlier in the document.
///
/// # Example
/// ```ignore
/// let errors = DocumentValidator::validate(&document);
/// for error in &errors {
///     eprintln!("Validation error: {}", error);
/// }
/// ```
pub struct DocumentValidator;

impl DocumentValidator {
    /// Validate a document, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(document: &S72Document) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // Index of the first definition of every (kind, name)
        let mut defined: HashMap<(ObjectKind, &str), usize> = HashMap::new();
        for (index, object) in document.objects().iter().enumerate() {
            defined.entry((object.kind(), object.name())).or_insert(index);
        }

        let mut seen = HashSet::new();
        let mut scene_seen = false;

        for (index, object) in document.objects().iter().enumerate() {
            if !seen.insert((object.kind(), object.name())) {
                errors.push(ValidationError::DuplicateName {
                    kind: object.kind(),
                    name: object.name().to_string(),
                });
            }

            for (kind, name) in object.references() {
                match defined.get(&(kind, name)) {
                    Some(&target) if target < index => {}
                    Some(_) => errors.push(ValidationError::ForwardReference {
                        from: object.name().to_string(),
                        kind,
                        name: name.to_string(),
                    }),
                    None => errors.push(ValidationError::UnresolvedReference {
                        from: object.name().to_string(),
                        kind,
                        name: name.to_string(),
                    }),
                }
            }

            match object {
                SceneObject::Scene(scene) => {
                    if scene_seen {
                        errors.push(ValidationError::MultipleScenes(scene.name.clone()));
                    }
                    scene_seen = true;
                }
                SceneObject::Node(node) => {
                    let length = node.rotation_length();
                    if (length - 1.0).abs() > ROTATION_TOLERANCE {
                        errors.push(ValidationError::NonUnitRotation {
                            node: node.name.clone(),
                            length,
                        });
                    }
                }
                SceneObject::Mesh(mesh) if mesh.count == 0 => {
                    errors.push(ValidationError::EmptyMesh(mesh.name.clone()));
                }
                _ => {}
            }
        }

        if !scene_seen {
            errors.push(ValidationError::MissingScene);
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(document: &S72Document) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(document);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Camera, Material, Mesh, MeshAttributes, Node, Perspective, Scene, Topology};

    fn make_valid_document() -> S72Document {
        let mut doc = S72Document::new();
        doc.push(Camera::perspective(
            "Camera",
            Perspective { aspect: 1.0, vfov: 1.0, near: 0.1, far: 100.0 },
        ));
        doc.push(Node::new("Camera").with_camera("Camera"));
        doc.push(Material::lambertian("mat", [1.0, 1.0, 1.0]));
        doc.push(
            Mesh::new("Cube", Topology::TriangleList, 36, MeshAttributes::interleaved_pntt("cube.b72"))
                .with_material("mat"),
        );
        doc.push(Node::new("child").with_mesh("Cube"));
        doc.push(Node::new("parent").with_mesh("Cube").with_child("child"));
        doc.push(Scene::new("scene", ["Camera", "parent"]));
        doc
    }

    #[test]
    fn test_valid_document_returns_no_errors() {
        let errors = DocumentValidator::validate(&make_valid_document());
        assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_validate_or_error_ok_for_valid_document() {
        assert!(DocumentValidator::validate_or_error(&make_valid_document()).is_ok());
    }

    #[test]
    fn test_camera_and_node_may_share_a_name() {
        let doc = make_valid_document();
        assert!(doc.find(ObjectKind::Camera, "Camera").is_some());
        assert!(doc.find(ObjectKind::Node, "Camera").is_some());
        assert!(!DocumentValidator::validate(&doc)
            .iter()
            .any(|e| matches!(e, ValidationError::DuplicateName { .. })));
    }

    #[test]
    fn test_missing_scene() {
        let mut doc = S72Document::new();
        doc.push(Node::new("a"));
        let errors = DocumentValidator::validate(&doc);
        assert_eq!(errors, vec![ValidationError::MissingScene]);
    }

    #[test]
    fn test_multiple_scenes() {
        let mut doc = make_valid_document();
        doc.push(Scene::new("second", ["parent"]));
        let errors = DocumentValidator::validate(&doc);
        assert_eq!(errors, vec![ValidationError::MultipleScenes("second".to_string())]);
    }

    #[test]
    fn test_duplicate_node_name() {
        let mut doc = S72Document::new();
        doc.push(Node::new("a"));
        doc.push(Node::new("a"));
        doc.push(Scene::new("s", ["a"]));
        let errors = DocumentValidator::validate(&doc);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateName { kind: ObjectKind::Node, name: "a".to_string() }]
        );
    }

    #[test]
    fn test_child_defined_after_parent() {
        let mut doc = S72Document::new();
        doc.push(Node::new("parent").with_child("child"));
        doc.push(Node::new("child"));
        doc.push(Scene::new("s", ["parent"]));
        let errors = DocumentValidator::validate(&doc);
        assert_eq!(
            errors,
            vec![ValidationError::ForwardReference {
                from: "parent".to_string(),
                kind: ObjectKind::Node,
                name: "child".to_string(),
            }]
        );
    }

    #[test]
    fn test_root_not_defined() {
        let mut doc = S72Document::new();
        doc.push(Scene::new("s", ["Node_0"]));
        let errors = DocumentValidator::validate(&doc);
        assert_eq!(
            errors,
            vec![ValidationError::UnresolvedReference {
                from: "s".to_string(),
                kind: ObjectKind::Node,
                name: "Node_0".to_string(),
            }]
        );
    }

    #[test]
    fn test_reference_to_wrong_kind_is_unresolved() {
        let mut doc = S72Document::new();
        doc.push(Material::lambertian("Cube", [1.0, 1.0, 1.0]));
        doc.push(Node::new("n").with_mesh("Cube"));
        doc.push(Scene::new("s", ["n"]));
        let errors = DocumentValidator::validate(&doc);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::UnresolvedReference { kind: ObjectKind::Mesh, .. }]
        ));
    }

    #[test]
    fn test_non_unit_rotation() {
        let mut doc = S72Document::new();
        let mut node = Node::new("n");
        node.rotation = [0.0, 0.0, 0.0, 2.0];
        doc.push(node);
        doc.push(Scene::new("s", ["n"]));
        let errors = DocumentValidator::validate(&doc);
        assert_eq!(
            errors,
            vec![ValidationError::NonUnitRotation { node: "n".to_string(), length: 2.0 }]
        );
    }

    #[test]
    fn test_empty_mesh() {
        let mut doc = S72Document::new();
        doc.push(Mesh::new("m", Topology::TriangleList, 0, MeshAttributes::interleaved_pntt("b")));
        doc.push(Scene::new("s", Vec::<String>::new()));
        let errors = DocumentValidator::validate(&doc);
        assert_eq!(errors, vec![ValidationError::EmptyMesh("m".to_string())]);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let mut doc = S72Document::new();
        doc.push(Node::new("a").with_child("b"));
        doc.push(Node::new("a"));
        let errors = DocumentValidator::validate(&doc);
        // unresolved child, duplicate name, missing scene
        assert_eq!(errors.len(), 3);
        assert!(DocumentValidator::validate_or_error(&doc).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::ForwardReference {
            from: "Node_0".to_string(),
            kind: ObjectKind::Node,
            name: "Node_1".to_string(),
        };
        assert_eq!(err.to_string(), "'Node_0' references NODE 'Node_1' before it is defined");
        assert_eq!(ValidationError::MissingScene.to_string(), "Document has no SCENE object");
    }
}
