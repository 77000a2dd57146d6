//! Declarative JSON scene descriptions.
//!
//! Vectors are three-element arrays. Objects name their material; an object
//! without one gets the default white Phong material.
//!
//! ```text
//! {
//!   "camera": { "width": 320, "height": 240, "fov": 45,
//!               "eye": [0, -10, 10], "look_at": [0, 0, 0], "up": [0, 0, 1] },
//!   "background": [0, 0, 0],
//!   "materials": { "red": { "color": [1, 0, 0], "reflectivity": 0.5 } },
//!   "lights": [ { "position": [-15, -40, 30] } ],
//!   "objects": [
//!     { "type": "sphere", "center": [0, 0, 1], "radius": 1, "material": "red" },
//!     { "type": "triangle", "vertices": [[-5, -5, 0], [5, -5, 0], [5, 5, 0]] },
//!     { "type": "cone", "apex": [0, 0, 2], "axis": [0, 0, 1], "theta": 0.1 }
//!   ],
//!   "render": { "shadow": true, "iterations": 3 }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use whitted_math::Vec3;
use whitted_tracer::{
    Cone, ConeNormal, Material, PerspectiveCamera, PhongMaterial, PointLight, RenderConfig, Scene,
    Sphere, Triangle, Vertex,
};

use crate::error::{SceneError, SceneResult};

/// Top-level scene file.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDescription {
    pub camera: Option<CameraDescription>,
    #[serde(default)]
    pub background: [f32; 3],
    #[serde(default)]
    pub materials: HashMap<String, MaterialDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
    /// Render settings stored with the scene
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraDescription {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default)]
    pub eye: [f32; 3],
    #[serde(default = "default_look_at")]
    pub look_at: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
}

fn default_fov() -> f32 {
    45.0
}

fn default_look_at() -> [f32; 3] {
    [0.0, 0.0, -1.0]
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

impl CameraDescription {
    pub fn build(&self) -> PerspectiveCamera {
        PerspectiveCamera::new(self.width, self.height, self.fov).with_view(
            Vec3::from(self.eye),
            Vec3::from(self.look_at),
            Vec3::from(self.up),
        )
    }
}

/// Phong material parameters; omitted fields take the material defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaterialDescription {
    pub color: [f32; 3],
    pub reflectivity: f32,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
}

impl Default for MaterialDescription {
    fn default() -> Self {
        let phong = PhongMaterial::default();
        Self {
            color: phong.color.to_array(),
            reflectivity: phong.reflectivity,
            ambient: phong.ambient,
            diffuse: phong.diffuse,
            specular: phong.specular,
            shininess: phong.shininess,
        }
    }
}

impl MaterialDescription {
    pub fn build(&self) -> Arc<dyn Material> {
        Arc::new(
            PhongMaterial::new(Vec3::from(self.color))
                .with_reflectivity(self.reflectivity)
                .with_weights(self.ambient, self.diffuse, self.specular)
                .with_shininess(self.shininess),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightDescription {
    pub position: [f32; 3],
}

/// A triangle corner: either a bare position or a position with attributes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VertexDescription {
    Position([f32; 3]),
    Full {
        position: [f32; 3],
        normal: Option<[f32; 3]>,
        color: Option<[f32; 3]>,
    },
}

impl VertexDescription {
    pub fn to_vertex(&self) -> Vertex {
        match self {
            VertexDescription::Position(position) => Vertex::new(Vec3::from(*position)),
            VertexDescription::Full { position, normal, color } => {
                let mut vertex = Vertex::new(Vec3::from(*position));
                if let Some(normal) = normal {
                    vertex = vertex.with_normal(Vec3::from(*normal));
                }
                if let Some(color) = color {
                    vertex = vertex.with_color(Vec3::from(*color));
                }
                vertex
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: Option<String>,
    },
    Triangle {
        vertices: Vec<VertexDescription>,
        material: Option<String>,
    },
    Cone {
        apex: [f32; 3],
        axis: [f32; 3],
        /// Half-angle in radians
        theta: f32,
        #[serde(default)]
        normal: ConeNormal,
        material: Option<String>,
    },
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the scene. Objects are added in file order.
    pub fn build(&self) -> SceneResult<Scene> {
        let camera = self.camera.as_ref().ok_or(SceneError::MissingCamera)?;

        let materials: HashMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();
        let default_material: Arc<dyn Material> = Arc::new(PhongMaterial::default());

        let lookup = |name: &Option<String>| -> SceneResult<Arc<dyn Material>> {
            match name {
                Some(name) => materials
                    .get(name.as_str())
                    .cloned()
                    .ok_or_else(|| SceneError::UnknownMaterial(name.clone())),
                None => Ok(default_material.clone()),
            }
        };

        let mut scene = Scene::new();
        scene.set_camera(camera.build());
        scene.set_background(Vec3::from(self.background));

        for light in &self.lights {
            scene.add_light(PointLight::new(Vec3::from(light.position)));
        }

        for (index, object) in self.objects.iter().enumerate() {
            match object {
                ObjectDescription::Sphere { center, radius, material } => {
                    scene.add(Sphere::new(Vec3::from(*center), *radius, lookup(material)?));
                }
                ObjectDescription::Triangle { vertices, material } => {
                    let [a, b, c] = vertices.as_slice() else {
                        return Err(SceneError::InvalidTriangle {
                            index,
                            count: vertices.len(),
                        });
                    };
                    scene.add(Triangle::new(
                        a.to_vertex(),
                        b.to_vertex(),
                        c.to_vertex(),
                        lookup(material)?,
                    ));
                }
                ObjectDescription::Cone { apex, axis, theta, normal, material } => {
                    let cone = Cone::new(Vec3::from(*apex), Vec3::from(*axis), *theta, lookup(material)?)
                        .with_normal_mode(*normal);
                    scene.add(cone);
                }
            }
        }

        log::debug!(
            "Built scene: {} objects, {} lights, {} materials",
            scene.len(),
            scene.lights().len(),
            materials.len()
        );

        Ok(scene)
    }
}

/// Load a JSON scene file.
///
/// Returns the scene together with the render settings stored in the file
/// (defaults when the file has no `render` block).
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<(Scene, RenderConfig)> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let (scene, config) = load_scene_from_str(&json)?;

    log::info!(
        "Loaded {} ({} objects, {} lights)",
        path.display(),
        scene.len(),
        scene.lights().len()
    );

    Ok((scene, config))
}

/// Load a scene from JSON text.
pub fn load_scene_from_str(json: &str) -> SceneResult<(Scene, RenderConfig)> {
    let description = SceneDescription::from_json(json)?;
    let scene = description.build()?;
    Ok((scene, description.render))
}
