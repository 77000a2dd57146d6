//! Whitted Scene - scene files and canned scenes for the whitted renderer.
//!
//! Scenes are written as JSON and turned into a [`whitted_tracer::Scene`]
//! plus the [`whitted_tracer::RenderConfig`] stored alongside it.
//!
//! # Example
//!
//! ```ignore
//! use whitted_scene::load_scene;
//! use whitted_tracer::Renderer;
//!
//! let (scene, config) = load_scene("spheres.json")?;
//! let image = Renderer::new(config).render(&scene)?;
//! ```

pub mod demo;
pub mod description;
pub mod error;

pub use demo::demo_scene;
pub use description::{
    load_scene, load_scene_from_str, CameraDescription, LightDescription, MaterialDescription,
    ObjectDescription, SceneDescription, VertexDescription,
};
pub use error::{SceneError, SceneResult};
