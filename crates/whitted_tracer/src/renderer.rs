//! Recursive ray tracing renderer.
//!
//! Per pixel: camera ray -> closest hit -> Phong shading with optional
//! shadow rays -> mirror reflection, recursing until the configured depth.

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{
    BvhNode, Color, HitRecord, ImageBuffer, PerspectiveCamera, PointLight, RenderError, Result,
    Scene, Unshadowed, Visibility,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use whitted_math::{reflect, Interval, Ray};

/// Default tolerance for self-intersection offsets and degenerate geometry.
pub const DEFAULT_EPSILON: f32 = 1e-4;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Cast shadow rays toward each light
    pub shadow: bool,
    /// Maximum reflection depth; primary rays are depth 0
    pub iterations: u32,
    /// Jittered primary rays per pixel; 1 shoots through the pixel center
    pub samples_per_pixel: u32,
    /// Tolerance passed to every intersection routine
    pub epsilon: f32,
    /// Tile edge length in pixels
    pub bucket_size: u32,
    /// Use a BVH instead of scanning every primitive
    pub accelerate: bool,
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shadow: false,
            iterations: 3,
            samples_per_pixel: 1,
            epsilon: DEFAULT_EPSILON,
            bucket_size: DEFAULT_BUCKET_SIZE,
            accelerate: false,
            parallel: true,
        }
    }
}

/// Read-only view of a scene prepared for tracing.
///
/// Holds the optional BVH so it is built once per render and shared by all
/// workers.
pub struct Tracer<'s> {
    scene: &'s Scene,
    config: &'s RenderConfig,
    bvh: Option<BvhNode>,
}

impl<'s> Tracer<'s> {
    pub fn new(scene: &'s Scene, config: &'s RenderConfig) -> Self {
        let bvh = config.accelerate.then(|| {
            let start = Instant::now();
            let bvh = BvhNode::new(scene.primitives());
            log::debug!("Built BVH over {} primitives in {:?}", scene.len(), start.elapsed());
            bvh
        });

        Self { scene, config, bvh }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    /// Closest hit strictly in front of the ray origin.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord<'s>> {
        let ray_t = Interval::positive();
        match &self.bvh {
            Some(bvh) => bvh.closest_hit(self.scene.primitives(), ray, ray_t, self.config.epsilon),
            None => self.scene.closest_hit(ray, ray_t, self.config.epsilon),
        }
    }

    /// True when anything blocks `ray` inside `ray_t`.
    pub fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        match &self.bvh {
            Some(bvh) => bvh.any_hit(self.scene.primitives(), ray, ray_t, self.config.epsilon),
            None => self.scene.any_hit(ray, ray_t, self.config.epsilon),
        }
    }

    /// Shadow test from a surface point to a light.
    ///
    /// The ray starts `epsilon` off the surface on the light's side and
    /// stops at the light, so geometry beyond the light never occludes.
    pub fn in_shadow(&self, rec: &HitRecord, light: &PointLight) -> bool {
        let distance = light.distance_from(rec.point);
        if distance <= self.config.epsilon {
            return false;
        }
        let direction = light.direction_from(rec.point);

        let offset = if rec.normal_g.dot(direction) >= 0.0 {
            rec.normal_g
        } else {
            -rec.normal_g
        };
        let shadow_ray = Ray::new(rec.point + offset * self.config.epsilon, direction);

        self.occluded(&shadow_ray, Interval::new(0.0, distance))
    }

    /// Color seen along `ray`, which is `depth` reflections away from the camera.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        let Some(rec) = self.closest_hit(ray) else {
            return self.scene.background();
        };

        let visibility: &dyn Visibility = if self.config.shadow { self } else { &Unshadowed };
        let local = rec.material.shade(ray, &rec, self.scene.lights(), visibility);

        let reflectivity = rec.material.reflectivity();
        if reflectivity <= 0.0 {
            return local;
        }

        // Past the depth limit the mirror term is black.
        let reflected = if depth < self.config.iterations {
            self.trace(&self.reflected_ray(ray, &rec), depth + 1)
        } else {
            Color::ZERO
        };

        (1.0 - reflectivity) * local + reflectivity * reflected
    }

    fn reflected_ray(&self, ray: &Ray, rec: &HitRecord) -> Ray {
        let direction = reflect(ray.direction().normalize_or_zero(), rec.facing_normal());
        let origin = rec.point + rec.facing_normal_g() * self.config.epsilon;
        Ray::new(origin, direction.normalize_or_zero())
    }

    /// Final color of pixel (x, y).
    pub fn render_pixel(&self, camera: &PerspectiveCamera, x: u32, y: u32) -> Color {
        let samples = self.config.samples_per_pixel.max(1);
        if samples == 1 {
            return self.trace(&camera.primary_ray(x, y), 0);
        }

        // Seeded per pixel so output does not depend on scheduling.
        let mut rng = StdRng::seed_from_u64(((y as u64) << 32) | x as u64);
        let mut sum = Color::ZERO;
        for _ in 0..samples {
            let dx = rng.gen::<f32>() - 0.5;
            let dy = rng.gen::<f32>() - 0.5;
            sum += self.trace(&camera.primary_ray_offset(x, y, dx, dy), 0);
        }
        sum / samples as f32
    }
}

impl Visibility for Tracer<'_> {
    fn is_lit(&self, rec: &HitRecord, light: &PointLight) -> bool {
        !self.in_shadow(rec, light)
    }
}

/// Renders whole scenes with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `scene` into a `width` x `height` buffer from its camera.
    pub fn render(&self, scene: &Scene) -> Result<ImageBuffer> {
        let camera = scene.camera().ok_or(RenderError::MissingCamera)?;
        if scene.is_empty() {
            return Err(RenderError::EmptyScene);
        }
        let (width, height) = (camera.width(), camera.height());
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        if !camera.has_view_direction() {
            return Err(RenderError::DegenerateView);
        }

        log::info!(
            "Rendering {}x{} ({} primitives, {} lights, shadow={}, iterations={}, spp={})",
            width,
            height,
            scene.len(),
            scene.lights().len(),
            self.config.shadow,
            self.config.iterations,
            self.config.samples_per_pixel,
        );
        let start = Instant::now();

        let tracer = Tracer::new(scene, &self.config);
        let buckets = generate_buckets(width, height, self.config.bucket_size);
        log::debug!("{} buckets of {} px", buckets.len(), self.config.bucket_size);

        let results: Vec<BucketResult> = if self.config.parallel {
            buckets
                .par_iter()
                .map(|bucket| render_bucket(bucket, camera, &tracer))
                .collect()
        } else {
            buckets
                .iter()
                .map(|bucket| render_bucket(bucket, camera, &tracer))
                .collect()
        };

        let mut image = ImageBuffer::new(width, height);
        for result in &results {
            let b = &result.bucket;
            image.blit(b.x, b.y, b.width, &result.pixels);
        }

        log::info!("Rendered in {:?}", start.elapsed());
        Ok(image)
    }
}
