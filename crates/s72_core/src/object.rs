//! s72 object records
//!
//! Every element of an s72 document after the format tag is an object
//! carrying a `"type"` discriminator. [`SceneObject`] is the tagged union of
//! the record kinds this crate understands.

use serde::{Serialize, Deserialize};

/// Identity quaternion in `[x, y, z, w]` order
pub const IDENTITY_ROTATION: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// Unit scale
pub const UNIT_SCALE: [f64; 3] = [1.0, 1.0, 1.0];

/// Kind of an s72 object, as written in its `"type"` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectKind {
    Camera,
    Node,
    Material,
    Mesh,
    Scene,
}

impl ObjectKind {
    /// The `"type"` string used in s72 files
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Camera => "CAMERA",
            ObjectKind::Node => "NODE",
            ObjectKind::Material => "MATERIAL",
            ObjectKind::Mesh => "MESH",
            ObjectKind::Scene => "SCENE",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record of an s72 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum SceneObject {
    Camera(Camera),
    Node(Node),
    Material(Material),
    Mesh(Mesh),
    Scene(Scene),
}

impl SceneObject {
    /// Name of the record
    pub fn name(&self) -> &str {
        match self {
            SceneObject::Camera(c) => &c.name,
            SceneObject::Node(n) => &n.name,
            SceneObject::Material(m) => &m.name,
            SceneObject::Mesh(m) => &m.name,
            SceneObject::Scene(s) => &s.name,
        }
    }

    /// Kind of the record
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Camera(_) => ObjectKind::Camera,
            SceneObject::Node(_) => ObjectKind::Node,
            SceneObject::Material(_) => ObjectKind::Material,
            SceneObject::Mesh(_) => ObjectKind::Mesh,
            SceneObject::Scene(_) => ObjectKind::Scene,
        }
    }

    /// Records this object refers to by name, in field order
    ///
    /// Buffer sources of mesh attributes are external files, not records,
    /// and are not included.
    pub fn references(&self) -> Vec<(ObjectKind, &str)> {
        match self {
            SceneObject::Camera(_) | SceneObject::Material(_) => Vec::new(),
            SceneObject::Node(node) => {
                let mut refs = Vec::with_capacity(node.children.len() + 2);
                if let Some(ref camera) = node.camera {
                    refs.push((ObjectKind::Camera, camera.as_str()));
                }
                if let Some(ref mesh) = node.mesh {
                    refs.push((ObjectKind::Mesh, mesh.as_str()));
                }
                refs.extend(node.children.iter().map(|c| (ObjectKind::Node, c.as_str())));
                refs
            }
            SceneObject::Mesh(mesh) => mesh
                .material
                .iter()
                .map(|m| (ObjectKind::Material, m.as_str()))
                .collect(),
            SceneObject::Scene(scene) => scene
                .roots
                .iter()
                .map(|r| (ObjectKind::Node, r.as_str()))
                .collect(),
        }
    }
}

impl From<Camera> for SceneObject {
    fn from(camera: Camera) -> Self {
        SceneObject::Camera(camera)
    }
}

impl From<Node> for SceneObject {
    fn from(node: Node) -> Self {
        SceneObject::Node(node)
    }
}

impl From<Material> for SceneObject {
    fn from(material: Material) -> Self {
        SceneObject::Material(material)
    }
}

impl From<Mesh> for SceneObject {
    fn from(mesh: Mesh) -> Self {
        SceneObject::Mesh(mesh)
    }
}

impl From<Scene> for SceneObject {
    fn from(scene: Scene) -> Self {
        SceneObject::Scene(scene)
    }
}

/// A camera with a perspective projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    pub perspective: Perspective,
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perspective {
    /// Width / height
    pub aspect: f64,
    /// Vertical field of view in radians
    pub vfov: f64,
    /// Near clipping distance
    pub near: f64,
    /// Far clipping distance
    pub far: f64,
}

impl Camera {
    /// Create a perspective camera
    pub fn perspective(name: impl Into<String>, perspective: Perspective) -> Self {
        Self {
            name: name.into(),
            perspective,
        }
    }
}

/// A transform in the scene graph
///
/// A node may carry a camera, a mesh, and any number of children. Children
/// are referenced by name and must be defined earlier in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub translation: [f64; 3],
    /// Unit quaternion `[x, y, z, w]`
    pub rotation: [f64; 4],
    pub scale: [f64; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl Node {
    /// Create a node with an identity transform and no attachments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            translation: [0.0; 3],
            rotation: IDENTITY_ROTATION,
            scale: UNIT_SCALE,
            camera: None,
            mesh: None,
            children: Vec::new(),
        }
    }

    /// Set the translation relative to the parent
    pub fn with_translation(mut self, translation: [f64; 3]) -> Self {
        self.translation = translation;
        self
    }

    /// Attach a camera by name
    pub fn with_camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(camera.into());
        self
    }

    /// Attach a mesh by name
    pub fn with_mesh(mut self, mesh: impl Into<String>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    /// Append a child node by name
    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Length of the rotation quaternion
    pub fn rotation_length(&self) -> f64 {
        self.rotation.iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

/// A surface material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub lambertian: Lambertian,
}

/// Diffuse-only shading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lambertian {
    /// Linear RGB reflectance
    pub albedo: [f64; 3],
}

impl Material {
    /// Create a lambertian material
    pub fn lambertian(name: impl Into<String>, albedo: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            lambertian: Lambertian { albedo },
        }
    }
}

/// Primitive assembly mode of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Topology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
    TriangleFan,
}

/// Numeric format of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeFormat {
    #[serde(rename = "R32G32_SFLOAT")]
    R32G32Sfloat,
    #[serde(rename = "R32G32B32_SFLOAT")]
    R32G32B32Sfloat,
    #[serde(rename = "R32G32B32A32_SFLOAT")]
    R32G32B32A32Sfloat,
}

impl AttributeFormat {
    /// Size of one element in bytes
    pub fn size(self) -> u32 {
        match self {
            AttributeFormat::R32G32Sfloat => 8,
            AttributeFormat::R32G32B32Sfloat => 12,
            AttributeFormat::R32G32B32A32Sfloat => 16,
        }
    }
}

/// Binding of a vertex attribute to bytes in an external buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Buffer file, relative to the scene file
    pub src: String,
    pub offset: u32,
    pub stride: u32,
    pub format: AttributeFormat,
}

/// Vertex attributes of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAttributes {
    #[serde(rename = "POSITION")]
    pub position: Attribute,
    #[serde(rename = "NORMAL")]
    pub normal: Attribute,
    #[serde(rename = "TANGENT")]
    pub tangent: Attribute,
    #[serde(rename = "TEXCOORD")]
    pub texcoord: Attribute,
}

impl MeshAttributes {
    /// Interleaved position/normal/tangent/texcoord layout in one buffer
    ///
    /// Each vertex is 48 bytes: vec3 position, vec3 normal, vec4 tangent,
    /// vec2 texcoord.
    pub fn interleaved_pntt(src: impl Into<String>) -> Self {
        let src = src.into();
        let formats = [
            AttributeFormat::R32G32B32Sfloat,
            AttributeFormat::R32G32B32Sfloat,
            AttributeFormat::R32G32B32A32Sfloat,
            AttributeFormat::R32G32Sfloat,
        ];
        let stride: u32 = formats.iter().map(|f| f.size()).sum();

        let mut offset = 0;
        let [position, normal, tangent, texcoord] = formats.map(|format| {
            let attribute = Attribute {
                src: src.clone(),
                offset,
                stride,
                format,
            };
            offset += format.size();
            attribute
        });

        Self {
            position,
            normal,
            tangent,
            texcoord,
        }
    }
}

/// Vertex data plus the material it is drawn with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub topology: Topology,
    /// Number of vertices
    pub count: u32,
    pub attributes: MeshAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

impl Mesh {
    /// Create a mesh without a material
    pub fn new(name: impl Into<String>, topology: Topology, count: u32, attributes: MeshAttributes) -> Self {
        Self {
            name: name.into(),
            topology,
            count,
            attributes,
            material: None,
        }
    }

    /// Draw this mesh with the named material
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }
}

/// The scene record naming the root nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub roots: Vec<String>,
}

impl Scene {
    /// Create a scene with the given roots
    pub fn new<I, S>(name: impl Into<String>, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}
