//! Closed set of renderable shapes.

use crate::{Cone, HitRecord, Hittable, Sphere, Triangle};
use whitted_math::{Aabb, Interval, Ray, Vec3};

/// Any shape the scene can hold.
///
/// The shape set is small and fixed, so an enum keeps dispatch static and
/// lets the scene store primitives inline instead of behind `Box<dyn _>`.
#[derive(Clone)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Cone(Cone),
}

impl Primitive {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Sphere(_) => "sphere",
            Primitive::Triangle(_) => "triangle",
            Primitive::Cone(_) => "cone",
        }
    }

    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            Primitive::Sphere(s) => s,
            Primitive::Triangle(t) => t,
            Primitive::Cone(c) => c,
        }
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, epsilon: f32) -> Option<HitRecord<'a>> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t, epsilon),
            Primitive::Triangle(t) => t.hit(ray, ray_t, epsilon),
            Primitive::Cone(c) => c.hit(ray, ray_t, epsilon),
        }
    }

    #[inline]
    fn hit_shadow(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> bool {
        match self {
            Primitive::Sphere(s) => s.hit_shadow(ray, ray_t, epsilon),
            Primitive::Triangle(t) => t.hit_shadow(ray, ray_t, epsilon),
            Primitive::Cone(c) => c.hit_shadow(ray, ray_t, epsilon),
        }
    }

    fn bounding_box(&self) -> Aabb {
        self.as_hittable().bounding_box()
    }

    fn centroid(&self) -> Vec3 {
        self.as_hittable().centroid()
    }

    fn surface_area(&self) -> f32 {
        self.as_hittable().surface_area()
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<Cone> for Primitive {
    fn from(cone: Cone) -> Self {
        Primitive::Cone(cone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhongMaterial;
    use std::sync::Arc;

    #[test]
    fn test_dispatch_matches_inner_shape() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Arc::new(PhongMaterial::default()));
        let prim = Primitive::from(sphere.clone());
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let direct = sphere.hit(&ray, Interval::positive(), 1e-4).map(|h| h.t);
        let dispatched = prim.hit(&ray, Interval::positive(), 1e-4).map(|h| h.t);
        assert_eq!(direct, dispatched);
        assert_eq!(prim.centroid(), sphere.centroid());
        assert_eq!(prim.bounding_box(), sphere.bounding_box());
        assert_eq!(prim.surface_area(), sphere.surface_area());
        assert_eq!(prim.kind(), "sphere");
    }
}
