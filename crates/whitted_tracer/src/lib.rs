//! Whitted - a recursive CPU ray tracer.
//!
//! Casts one primary ray per pixel (or a few jittered ones), resolves the
//! closest intersection among the scene's primitives, shades it with a
//! Phong model against point lights, optionally tests shadow rays, and
//! follows mirror reflections up to a fixed depth.
//!
//! ```ignore
//! let red = Arc::new(PhongMaterial::new(Color::new(1.0, 0.0, 0.0)));
//!
//! let mut scene = Scene::new();
//! scene.add(Sphere::new(Vec3::ZERO, 1.0, red));
//! scene.add_light(PointLight::new(Vec3::new(-5.0, 5.0, 5.0)));
//! scene.set_camera(
//!     PerspectiveCamera::new(320, 240, 45.0)
//!         .with_view(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y),
//! );
//!
//! let image = Renderer::new(RenderConfig { shadow: true, ..Default::default() })
//!     .render(&scene)?;
//! ```

mod bucket;
mod bvh;
mod camera;
mod cone;
mod error;
mod hit;
mod image;
mod light;
mod material;
mod primitive;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::BvhNode;
pub use camera::PerspectiveCamera;
pub use cone::{Cone, ConeNormal};
pub use error::{RenderError, Result};
pub use hit::{HitRecord, Hittable};
pub use image::{color_to_rgba, linear_to_gamma, ImageBuffer};
pub use light::PointLight;
pub use material::{Color, Material, PhongMaterial, Unshadowed, Visibility};
pub use primitive::Primitive;
pub use renderer::{RenderConfig, Renderer, Tracer, DEFAULT_EPSILON};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::{Triangle, Vertex};

/// Re-export Vec3 and common math types from whitted_math
pub use whitted_math::{Aabb, Interval, Ray, Vec3};
