//! Built-in demo scene.

use std::sync::Arc;

use whitted_math::Vec3;
use whitted_tracer::{
    Color, Cone, PerspectiveCamera, PhongMaterial, PointLight, RenderConfig, Scene, Sphere,
    Triangle,
};

/// Three mirrored spheres and a thin mirrored cone on a dark floor, lit by
/// one point light, seen from above at 320x240.
pub fn demo_scene() -> (Scene, RenderConfig) {
    let mut scene = Scene::new();

    scene.set_camera(PerspectiveCamera::new(320, 240, 45.0).with_view(
        Vec3::new(0.0, -10.0, 10.0),
        Vec3::ZERO,
        Vec3::Z,
    ));
    scene.add_light(PointLight::new(Vec3::new(-15.0, -40.0, 30.0)));

    let floor = Arc::new(PhongMaterial::new(Color::splat(0.1)));
    let mirror = |color: Color| Arc::new(PhongMaterial::new(color).with_reflectivity(0.5));

    let a = Vec3::new(-5.0, -5.0, 0.0);
    let b = Vec3::new(5.0, -5.0, 0.0);
    let c = Vec3::new(5.0, 5.0, 0.0);
    let d = Vec3::new(-5.0, 5.0, 0.0);
    scene.add(Triangle::new(a, b, c, floor.clone()));
    scene.add(Triangle::new(a, c, d, floor));

    scene.add(Sphere::new(Vec3::new(-2.5, -2.5, 1.75), 1.75, mirror(Color::X)));
    scene.add(Sphere::new(Vec3::new(2.5, -2.5, 1.75), 1.75, mirror(Color::Y)));
    scene.add(Sphere::new(Vec3::new(2.5, 2.5, 1.75), 1.75, mirror(Color::Z)));
    scene.add(Cone::new(
        Vec3::new(-2.5, 2.5, 1.75),
        Vec3::ONE,
        0.03,
        mirror(Color::new(1.0, 1.0, 0.0)),
    ));

    let config = RenderConfig {
        shadow: true,
        iterations: 3,
        ..Default::default()
    };

    (scene, config)
}
