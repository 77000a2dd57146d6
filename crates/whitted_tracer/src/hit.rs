//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Color, Material};
use whitted_math::{Aabb, Interval, Ray, Vec3};

/// The closest known intersection for one ray query.
///
/// Primitives hand these out from [`Hittable::hit`]; the caller keeps the
/// one with the smallest `t`. The material is borrowed from the primitive
/// that produced the record.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// World-space point of intersection
    pub point: Vec3,
    /// Flat geometric normal (unit length, as computed by the primitive)
    pub normal_g: Vec3,
    /// Shading normal, possibly interpolated (unit length)
    pub normal: Vec3,
    /// Surface color before lighting
    pub color: Color,
    /// Material of the primitive that was hit
    pub material: &'a dyn Material,
    /// Whether the ray arrived on the side `normal_g` points to
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record, deriving `front_face` from the ray.
    pub fn new(
        ray: &Ray,
        t: f32,
        normal_g: Vec3,
        normal: Vec3,
        color: Color,
        material: &'a dyn Material,
    ) -> Self {
        Self {
            t,
            point: ray.at(t),
            normal_g,
            normal,
            color,
            material,
            front_face: ray.direction().dot(normal_g) < 0.0,
        }
    }

    /// Shading normal turned toward the incoming ray.
    pub fn facing_normal(&self) -> Vec3 {
        if self.front_face {
            self.normal
        } else {
            -self.normal
        }
    }

    /// Geometric normal turned toward the incoming ray.
    pub fn facing_normal_g(&self) -> Vec3 {
        if self.front_face {
            self.normal_g
        } else {
            -self.normal_g
        }
    }
}

/// Trait for objects that can be hit by rays.
///
/// `ray_t` bounds the admissible parameters: an implementation only reports
/// a hit whose `t` lies strictly inside it. Passing `(0, best_t)` therefore
/// yields only hits in front of the origin that beat the current best.
/// `epsilon` is the tolerance used for near-degenerate configurations
/// (parallel planes, tangent quadrics).
pub trait Hittable: Send + Sync {
    /// Closest intersection inside `ray_t`, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, epsilon: f32) -> Option<HitRecord<'a>>;

    /// Existence-only test used for shadow rays.
    fn hit_shadow(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Representative point used when partitioning primitives.
    fn centroid(&self) -> Vec3;

    fn surface_area(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhongMaterial;

    #[test]
    fn test_front_face_from_ray_direction() {
        let material = PhongMaterial::default();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);

        let outside = HitRecord::new(&ray, 4.0, Vec3::Z, Vec3::Z, Color::ONE, &material);
        assert!(outside.front_face);
        assert_eq!(outside.point, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(outside.facing_normal(), Vec3::Z);

        let inside = HitRecord::new(&ray, 4.0, Vec3::NEG_Z, Vec3::NEG_Z, Color::ONE, &material);
        assert!(!inside.front_face);
        assert_eq!(inside.facing_normal(), Vec3::Z);
        assert_eq!(inside.facing_normal_g(), Vec3::Z);
    }
}
