//! Sphere primitive for ray tracing.

use crate::{
    hit::{HitRecord, Hittable},
    Color, Material,
};
use std::f32::consts::PI;
use std::sync::Arc;
use whitted_math::{Aabb, Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Smallest root of |O + tD - C|^2 = r^2 inside `ray_t`.
    fn nearest_root(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first, far root when the origin is inside the sphere
        let near = (h - sqrtd) / a;
        if ray_t.surrounds(near) {
            return Some(near);
        }
        let far = (h + sqrtd) / a;
        ray_t.surrounds(far).then_some(far)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, _epsilon: f32) -> Option<HitRecord<'a>> {
        let t = self.nearest_root(ray, ray_t)?;
        let point = ray.at(t);
        let outward_normal = if self.radius > 0.0 {
            (point - self.center) / self.radius
        } else {
            -ray.direction().normalize_or_zero()
        };

        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            outward_normal,
            Color::ONE,
            self.material.as_ref(),
        ))
    }

    fn hit_shadow(&self, ray: &Ray, ray_t: Interval, _epsilon: f32) -> bool {
        self.nearest_root(ray, ray_t).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn centroid(&self) -> Vec3 {
        self.center
    }

    fn surface_area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }
}
