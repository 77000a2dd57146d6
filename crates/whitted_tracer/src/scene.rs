//! Scene container: primitives, lights and the camera.

use crate::{Color, HitRecord, Hittable, PerspectiveCamera, PointLight, Primitive};
use whitted_math::{Interval, Ray};

/// Everything a render needs, assembled up front and read-only afterwards.
#[derive(Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
    lights: Vec<PointLight>,
    camera: Option<PerspectiveCamera>,
    background: Color,
}

impl Scene {
    /// Create an empty scene with a black background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive. Insertion order breaks exact-`t` ties: the earlier
    /// primitive wins.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Set the camera. A scene has exactly one; setting it again replaces it.
    pub fn set_camera(&mut self, camera: PerspectiveCamera) {
        if self.camera.is_some() {
            log::warn!("replacing the scene camera");
        }
        self.camera = Some(camera);
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut PerspectiveCamera> {
        self.camera.as_mut()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Closest hit over all primitives by linear scan.
    ///
    /// Each primitive only reports hits strictly closer than the best so
    /// far, so the first primitive to reach a given `t` keeps it.
    pub fn closest_hit(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> Option<HitRecord<'_>> {
        self.primitives.iter().fold(None::<HitRecord<'_>>, |best, primitive| {
            let window = best.as_ref().map_or(ray_t, |b| ray_t.with_max(b.t));
            primitive.hit(ray, window, epsilon).or(best)
        })
    }

    /// True when any primitive intersects `ray` inside `ray_t`.
    pub fn any_hit(&self, ray: &Ray, ray_t: Interval, epsilon: f32) -> bool {
        self.primitives
            .iter()
            .any(|primitive| primitive.hit_shadow(ray, ray_t, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PhongMaterial, Sphere, Triangle, Unshadowed, Vec3};
    use std::sync::Arc;

    const EPS: f32 = 1e-4;

    fn sphere(z: f32, color: Color) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), 1.0, Arc::new(PhongMaterial::new(color)))
    }

    fn material_color(rec: &HitRecord) -> Color {
        // Shading with no lights returns ambient * color.
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        rec.material.shade(&ray, rec, &[], &Unshadowed) / 0.1
    }

    #[test]
    fn test_closest_hit_independent_of_order() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.0, 1.0);

        let mut near_first = Scene::new();
        near_first.add(sphere(-3.0, red));
        near_first.add(sphere(3.0, blue));

        let mut far_first = Scene::new();
        far_first.add(sphere(3.0, blue));
        far_first.add(sphere(-3.0, red));

        for scene in [&near_first, &far_first] {
            let rec = scene.closest_hit(&ray, Interval::positive(), EPS).expect("should hit");
            assert!((rec.t - 6.0).abs() < 1e-5);
            assert!((material_color(&rec) - red).length() < 1e-4);
        }
    }

    #[test]
    fn test_first_inserted_wins_ties() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let green = Color::new(0.0, 1.0, 0.0);

        let mut scene = Scene::new();
        scene.add(sphere(0.0, green));
        scene.add(sphere(0.0, Color::ONE));

        let rec = scene.closest_hit(&ray, Interval::positive(), EPS).expect("should hit");
        assert!((material_color(&rec) - green).length() < 1e-4);
    }

    #[test]
    fn test_no_hit_on_empty_scene() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(scene.closest_hit(&ray, Interval::positive(), EPS).is_none());
        assert!(!scene.any_hit(&ray, Interval::positive(), EPS));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_any_hit_respects_window() {
        let mut scene = Scene::new();
        scene.add(sphere(5.0, Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(scene.any_hit(&ray, Interval::positive(), EPS));
        assert!(!scene.any_hit(&ray, Interval::new(0.0, 3.0), EPS));
    }

    #[test]
    fn test_primitives_keep_insertion_order() {
        let mut scene = Scene::new();
        scene.add(sphere(0.0, Color::ONE));
        scene.add(Triangle::new(
            Vec3::new(5.0, 0.0, 0.0),
            Vec3::new(6.0, 0.0, 0.0),
            Vec3::new(5.0, 1.0, 0.0),
            Arc::new(PhongMaterial::default()),
        ));

        let kinds: Vec<_> = scene.primitives().iter().map(|p| p.kind()).collect();
        assert_eq!(kinds, ["sphere", "triangle"]);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_camera_is_optional_until_set() {
        let mut scene = Scene::new();
        assert!(scene.camera().is_none());

        scene.set_camera(PerspectiveCamera::new(4, 3, 60.0));
        assert_eq!(scene.camera().map(|c| c.width()), Some(4));
    }
}
