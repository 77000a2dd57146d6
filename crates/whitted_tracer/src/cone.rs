//! Infinite cone primitive.
//!
//! The cone is the set of points P with `((P - C)·V)^2 = |P - C|^2 cos^2θ`
//! for apex C, unit axis V and half-angle θ. Substituting the ray gives a
//! quadratic `a t^2 + b t + c = 0` with
//!
//! ```text
//! a = (D·V)^2 - (D·D) cos^2θ
//! b = 2 [(D·V)(CO·V) - (D·CO) cos^2θ]
//! c = (CO·V)^2 - (CO·CO) cos^2θ        where CO = O - C
//! ```
//!
//! Only the root `-(b + √Δ) / 2a` is considered. When `a` vanishes (the ray
//! runs parallel to a generating line) the equation is solved as the linear
//! `b t + c = 0` instead.

use crate::{
    hit::{HitRecord, Hittable},
    Color, Material,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use whitted_math::{Aabb, Interval, Ray, Vec3};

/// How the cone reports its surface normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConeNormal {
    /// Direction from the apex to the hit point. Cheap, and what older
    /// scenes were lit with, but not perpendicular to the surface.
    #[default]
    Approximate,
    /// Gradient of the implicit surface: `cos^2θ (P - C) - ((P - C)·V) V`.
    Exact,
}

/// An infinite cone.
#[derive(Clone)]
pub struct Cone {
    apex: Vec3,
    axis: Vec3,
    theta: f32,
    cos2: f32,
    normal_mode: ConeNormal,
    material: Arc<dyn Material>,
}

impl Cone {
    /// Create a cone from its apex, axis direction and half-angle in radians.
    ///
    /// The axis is normalized here.
    pub fn new(apex: Vec3, axis: Vec3, theta: f32, material: Arc<dyn Material>) -> Self {
        let unit_axis = axis.normalize_or_zero();
        if unit_axis == Vec3::ZERO {
            log::warn!("cone at {apex} has a zero-length axis; it will never be hit");
        }
        let cos = theta.cos();

        Self {
            apex,
            axis: unit_axis,
            theta,
            cos2: cos * cos,
            normal_mode: ConeNormal::default(),
            material,
        }
    }

    pub fn with_normal_mode(mut self, mode: ConeNormal) -> Self {
        self.normal_mode = mode;
        self
    }

    pub fn apex(&self) -> Vec3 {
        self.apex
    }

    pub fn axis(&self) -> Vec3 {
        self.axis
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn normal_mode(&self) -> ConeNormal {
        self.normal_mode
    }

    fn intersect(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> Option<f32> {
        if self.axis == Vec3::ZERO {
            return None;
        }

        let d = ray.direction();
        let co = ray.origin() - self.apex;
        let d_v = d.dot(self.axis);
        let co_v = co.dot(self.axis);

        let a = d_v * d_v - d.dot(d) * self.cos2;
        let b = 2.0 * (d_v * co_v - d.dot(co) * self.cos2);
        let c = co_v * co_v - co.dot(co) * self.cos2;

        let t = if a.abs() < epsilon {
            if b.abs() < epsilon {
                return None;
            }
            -c / b
        } else {
            let discriminant = b * b - 4.0 * a * c;
            // Tangent rays count as misses.
            if discriminant < epsilon {
                return None;
            }
            -(b + discriminant.sqrt()) / (2.0 * a)
        };

        ray_t.surrounds(t).then_some(t)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        let v = point - self.apex;
        let n = match self.normal_mode {
            ConeNormal::Approximate => v,
            ConeNormal::Exact => self.cos2 * v - v.dot(self.axis) * self.axis,
        };
        n.normalize_or_zero()
    }
}

impl Hittable for Cone {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, epsilon: f32) -> Option<HitRecord<'a>> {
        let t = self.intersect(ray, ray_t, epsilon)?;
        let normal = self.normal_at(ray.at(t));

        Some(HitRecord::new(
            ray,
            t,
            normal,
            normal,
            Color::ONE,
            self.material.as_ref(),
        ))
    }

    fn hit_shadow(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> bool {
        self.intersect(ray, ray_t, epsilon).is_some()
    }

    /// The surface is unbounded.
    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }

    fn centroid(&self) -> Vec3 {
        self.apex
    }

    fn surface_area(&self) -> f32 {
        f32::INFINITY
    }
}
