//! Generator configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`S72_SECTION__KEY`)
//!
//! The defaults reproduce the reference hierarchy scene exactly.

use figment::{Figment, providers::{Format, Toml, Env, Serialized}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main generator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Material configuration
    #[serde(default)]
    pub material: MaterialConfig,
    /// Mesh configuration
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Hierarchy naming and layout
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl GeneratorConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Built-in defaults
    /// 2. `config/default.toml`
    /// 3. `config/user.toml`
    /// 4. Environment variables (`S72_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(GeneratorConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // S72_CAMERA__MIN_DISTANCE=80 -> camera.min_distance = 80
        figment = figment.merge(Env::prefixed("S72_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Name shared by the camera and the node carrying it
    pub name: String,
    /// Aspect ratio (width / height)
    pub aspect: f64,
    /// Vertical field of view in radians
    pub vfov: f64,
    /// Near clipping plane
    pub near: f64,
    /// Far clipping plane
    pub far: f64,
    /// Closest the camera is placed to the hierarchy root along +Z
    pub min_distance: f64,
    /// Extra camera distance per hierarchy node
    pub distance_per_node: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            name: "Camera".to_string(),
            aspect: 1.77778,
            vfov: 1.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 50.0,
            distance_per_node: 0.15,
        }
    }
}

impl CameraConfig {
    /// Camera distance from the origin for a hierarchy of `node_count` nodes
    pub fn distance_for(&self, node_count: u32) -> f64 {
        self.min_distance.max(f64::from(node_count) * self.distance_per_node)
    }
}

/// Material configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// Material name
    pub name: String,
    /// Lambertian albedo [r, g, b]
    pub albedo: [f64; 3],
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            name: "lambertian:Red".to_string(),
            albedo: [0.8, 0.2, 0.1],
        }
    }
}

/// Mesh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Mesh name
    pub name: String,
    /// External vertex buffer (interleaved position/normal/tangent/texcoord)
    pub src: String,
    /// Number of vertices in the buffer
    pub vertex_count: u32,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            name: "Cube".to_string(),
            src: "materials.Cube.pnTt.b72".to_string(),
            vertex_count: 36,
        }
    }
}

/// Hierarchy naming and layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Node names are this prefix followed by the node index
    pub node_prefix: String,
    /// Scene name is this prefix, a dash, and the node count
    pub scene_prefix: String,
    /// Translation of every non-root node relative to its parent
    pub child_offset: [f64; 3],
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            node_prefix: "Node_".to_string(),
            scene_prefix: "hierarchy".to_string(),
            child_offset: [0.1, 0.1, 0.1],
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Validate the document before writing it
    pub validate: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.camera.name, "Camera");
        assert_eq!(config.camera.min_distance, 50.0);
        assert_eq!(config.mesh.vertex_count, 36);
        assert_eq!(config.hierarchy.node_prefix, "Node_");
        assert!(config.output.validate);
    }

    #[test]
    fn test_camera_distance() {
        let camera = CameraConfig::default();
        assert_eq!(camera.distance_for(1), 50.0);
        assert_eq!(camera.distance_for(3), 50.0);
        assert_eq!(camera.distance_for(1000), 1000.0 * 0.15);
        assert_eq!(camera.distance_for(10_000), 10_000.0 * 0.15);
    }

    #[test]
    fn test_config_serialization() {
        let config = GeneratorConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("min_distance"));
        assert!(toml.contains("materials.Cube.pnTt.b72"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: GeneratorConfig = Figment::from(Serialized::defaults(GeneratorConfig::default()))
            .merge(Toml::string("[camera]\nmin_distance = 80.0\n"))
            .extract()
            .unwrap();
        assert_eq!(config.camera.min_distance, 80.0);
        assert_eq!(config.camera.far, 1000.0);
        assert_eq!(config.material.name, "lambertian:Red");
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::load_from(dir.path().join("nope")).unwrap();
        assert_eq!(config.mesh.name, "Cube");
    }

    #[test]
    fn test_load_from_user_override() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[mesh]\nname = \"Box\"\n").unwrap();
        std::fs::write(dir.path().join("user.toml"), "[mesh]\nvertex_count = 24\n").unwrap();
        let config = GeneratorConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.mesh.name, "Box");
        assert_eq!(config.mesh.vertex_count, 24);
    }

    #[test]
    fn test_bad_type_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("default.toml"), "[camera]\nfar = \"far away\"\n").unwrap();
        let err = GeneratorConfig::load_from(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
