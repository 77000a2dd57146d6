//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection, which
//! yields the barycentric coordinates needed to interpolate vertex colors
//! and normals.

use crate::{
    hit::{HitRecord, Hittable},
    Color, Material,
};
use std::sync::Arc;
use whitted_math::{Aabb, Interval, Ray, Vec3};

/// A triangle corner with optional per-vertex shading attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Shading normal; when all three corners have one, normals are interpolated
    pub normal: Option<Vec3>,
    pub color: Color,
}

impl Vertex {
    /// A white vertex without a normal.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: None,
            color: Color::ONE,
        }
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = Some(normal.normalize_or_zero());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl From<Vec3> for Vertex {
    fn from(position: Vec3) -> Self {
        Self::new(position)
    }
}

/// A triangle primitive.
#[derive(Clone)]
pub struct Triangle {
    vertices: [Vertex; 3],
    /// Pre-computed face normal (unit length, counter-clockwise winding)
    normal: Vec3,
    /// Pre-computed edges from vertex 0
    edge1: Vec3,
    edge2: Vec3,
    /// |edge1 x edge2|
    double_area: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(
        a: impl Into<Vertex>,
        b: impl Into<Vertex>,
        c: impl Into<Vertex>,
        material: Arc<dyn Material>,
    ) -> Self {
        let vertices = [a.into(), b.into(), c.into()];
        let [p0, p1, p2] = vertices.map(|v| v.position);

        let edge1 = p1 - p0;
        let edge2 = p2 - p0;
        let cross = edge1.cross(edge2);
        let double_area = cross.length();
        let normal = cross.normalize_or_zero();
        if normal == Vec3::ZERO {
            log::warn!("degenerate triangle {p0} {p1} {p2}; it will never be hit");
        }

        let bbox = Aabb::from_points(p0.min(p1).min(p2), p0.max(p1).max(p2));

        Self {
            vertices,
            normal,
            edge1,
            edge2,
            double_area,
            material,
            bbox,
        }
    }

    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.vertices
    }

    /// Flat face normal.
    pub fn face_normal(&self) -> Vec3 {
        self.normal
    }

    /// Returns (t, u, v) where u and v weight vertices 1 and 2.
    fn intersect(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> Option<(f32, f32, f32)> {
        let h = ray.direction().cross(self.edge2);
        let a = self.edge1.dot(h);

        // |a| = |D| |e1 x e2| cos(angle to the normal); compare the cosine so
        // the parallel test does not depend on triangle size.
        if a.abs() <= epsilon * self.double_area * ray.direction().length() {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.vertices[0].position;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(self.edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.edge2.dot(q);
        ray_t.surrounds(t).then_some((t, u, v))
    }

    fn shading_normal(&self, w: f32, u: f32, v: f32) -> Vec3 {
        match self.vertices.map(|vert| vert.normal) {
            [Some(n0), Some(n1), Some(n2)] => {
                let n = (w * n0 + u * n1 + v * n2).normalize_or_zero();
                if n == Vec3::ZERO {
                    self.normal
                } else {
                    n
                }
            }
            _ => self.normal,
        }
    }
}

impl Hittable for Triangle {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, epsilon: f32) -> Option<HitRecord<'a>> {
        let (t, u, v) = self.intersect(ray, ray_t, epsilon)?;
        let w = 1.0 - u - v;

        let [c0, c1, c2] = self.vertices.map(|vert| vert.color);
        let color = w * c0 + u * c1 + v * c2;

        Some(HitRecord::new(
            ray,
            t,
            self.normal,
            self.shading_normal(w, u, v),
            color,
            self.material.as_ref(),
        ))
    }

    fn hit_shadow(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> bool {
        self.intersect(ray, ray_t, epsilon).is_some()
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn centroid(&self) -> Vec3 {
        let [p0, p1, p2] = self.vertices.map(|v| v.position);
        (p0 + p1 + p2) / 3.0
    }

    fn surface_area(&self) -> f32 {
        0.5 * self.double_area
    }
}
