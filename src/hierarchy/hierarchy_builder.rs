//! HierarchyBuilder - Linear node-chain scene construction
//!
//! Builds an s72 document holding a camera, one material, one shared cube
//! mesh and a chain of mesh nodes `Node_0 -> Node_1 -> ... -> Node_{N-1}`.

use std::path::Path;

use s72_core::{
    Camera, DocumentSaveError, DocumentValidator, Material, Mesh, MeshAttributes, Node,
    Perspective, S72Document, Scene, Topology, ValidationError,
};

use crate::config::GeneratorConfig;

/// Records emitted besides the hierarchy nodes: camera, camera node, material, mesh, scene
const FIXED_RECORDS: usize = 5;

/// Error generating a hierarchy scene
#[derive(Debug)]
pub enum GenerateError {
    /// Node count must be at least 1
    InvalidNodeCount(u32),
    /// The built document failed validation
    Validation(Vec<ValidationError>),
    /// Writing the output file failed
    Save(DocumentSaveError),
}

impl From<DocumentSaveError> for GenerateError {
    fn from(e: DocumentSaveError) -> Self {
        GenerateError::Save(e)
    }
}

impl From<Vec<ValidationError>> for GenerateError {
    fn from(errors: Vec<ValidationError>) -> Self {
        GenerateError::Validation(errors)
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::InvalidNodeCount(n) => {
                write!(f, "Invalid node count: {} (must be at least 1)", n)
            }
            GenerateError::Validation(errors) => {
                write!(f, "Generated document is invalid: ")?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", error)?;
                }
                Ok(())
            }
            GenerateError::Save(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Save(e) => Some(e),
            _ => None,
        }
    }
}

/// Builder for hierarchy stress-test scenes
///
/// # Example
/// ```ignore
/// let document = HierarchyBuilder::new(1000)
///     .with_config(&GeneratorConfig::default())
///     .build()?;
/// document.save("hierarchy-1000.s72")?;
/// ```
pub struct HierarchyBuilder {
    node_count: u32,
    config: GeneratorConfig,
}

impl HierarchyBuilder {
    /// Create a builder for a chain of `node_count` nodes using default settings
    pub fn new(node_count: u32) -> Self {
        Self {
            node_count,
            config: GeneratorConfig::default(),
        }
    }

    /// Use the given configuration for names, camera, material and mesh
    pub fn with_config(mut self, config: &GeneratorConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Name of hierarchy node `index`
    pub fn node_name(&self, index: u32) -> String {
        format!("{}{}", self.config.hierarchy.node_prefix, index)
    }

    /// Name of the scene record
    pub fn scene_name(&self) -> String {
        format!("{}-{}", self.config.hierarchy.scene_prefix, self.node_count)
    }

    /// Build the document
    ///
    /// Hierarchy nodes are emitted leaf first so that every child is defined
    /// before the parent that lists it.
    pub fn build(&self) -> Result<S72Document, GenerateError> {
        if self.node_count == 0 {
            return Err(GenerateError::InvalidNodeCount(self.node_count));
        }

        let config = &self.config;
        let mut document = S72Document::with_capacity(self.node_count as usize + FIXED_RECORDS);

        // Camera
        let camera_distance = config.camera.distance_for(self.node_count);
        document.push(Camera::perspective(
            config.camera.name.as_str(),
            Perspective {
                aspect: config.camera.aspect,
                vfov: config.camera.vfov,
                near: config.camera.near,
                far: config.camera.far,
            },
        ));
        document.push(
            Node::new(config.camera.name.as_str())
                .with_translation([0.0, 0.0, camera_distance])
                .with_camera(config.camera.name.as_str()),
        );
        log::debug!("Camera placed at z = {}", camera_distance);

        // Material and the shared mesh
        document.push(Material::lambertian(config.material.name.as_str(), config.material.albedo));
        document.push(
            Mesh::new(
                config.mesh.name.as_str(),
                Topology::TriangleList,
                config.mesh.vertex_count,
                MeshAttributes::interleaved_pntt(config.mesh.src.as_str()),
            )
            .with_material(config.material.name.as_str()),
        );

        // Leaf to root
        for index in (0..self.node_count).rev() {
            let translation = if index == 0 {
                [0.0; 3]
            } else {
                config.hierarchy.child_offset
            };
            let mut node = Node::new(self.node_name(index))
                .with_translation(translation)
                .with_mesh(config.mesh.name.as_str());
            if index + 1 < self.node_count {
                node = node.with_child(self.node_name(index + 1));
            }
            document.push(node);
        }
        log::debug!("Emitted {} hierarchy nodes", self.node_count);

        document.push(Scene::new(
            self.scene_name(),
            [config.camera.name.clone(), self.node_name(0)],
        ));

        if config.output.validate {
            DocumentValidator::validate_or_error(&document)?;
        }

        Ok(document)
    }

    /// Build the document and write it to `output_path`
    pub fn write_to<P: AsRef<Path>>(&self, output_path: P) -> Result<S72Document, GenerateError> {
        let document = self.build()?;
        document.save(output_path.as_ref())?;
        log::info!(
            "Wrote '{}' ({} records) to {}",
            self.scene_name(),
            document.len(),
            output_path.as_ref().display()
        );
        Ok(document)
    }
}

/// Generate a hierarchy scene of `node_count` nodes with default settings
pub fn generate_hierarchy_scene<P: AsRef<Path>>(node_count: u32, output_path: P) -> Result<(), GenerateError> {
    generate_with_config(&GeneratorConfig::default(), node_count, output_path)
}

/// Generate a hierarchy scene of `node_count` nodes with the given settings
pub fn generate_with_config<P: AsRef<Path>>(
    config: &GeneratorConfig,
    node_count: u32,
    output_path: P,
) -> Result<(), GenerateError> {
    HierarchyBuilder::new(node_count)
        .with_config(config)
        .write_to(output_path)
        .map(|_| ())
}
