//! Surface shading.

use crate::{hit::HitRecord, PointLight};
use whitted_math::{reflect, Ray, Vec3};

/// Color type alias (linear RGB, nominally 0-1 but never clamped here)
pub type Color = Vec3;

/// Answers "does this light reach this surface point?".
///
/// The renderer implements it with shadow rays; [`Unshadowed`] says yes
/// to everything and is used when shadows are disabled.
pub trait Visibility {
    fn is_lit(&self, rec: &HitRecord, light: &PointLight) -> bool;
}

/// Visibility oracle that ignores occluders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unshadowed;

impl Visibility for Unshadowed {
    fn is_lit(&self, _rec: &HitRecord, _light: &PointLight) -> bool {
        true
    }
}

/// Trait for materials that turn a resolved hit into a color.
///
/// Implementations are pure: the same hit, lights and visibility always
/// give the same color. Reflection is not part of `shade`; the renderer
/// traces the mirror ray and blends it by [`Material::reflectivity`].
pub trait Material: Send + Sync {
    /// Local illumination at `rec` as seen along `ray`.
    fn shade(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        lights: &[PointLight],
        visibility: &dyn Visibility,
    ) -> Color;

    /// Fraction of the mirror-reflected color mixed into the result.
    fn reflectivity(&self) -> f32 {
        0.0
    }
}

/// Classic Phong material: ambient + diffuse + specular, plus an optional
/// mirror component.
#[derive(Debug, Clone, PartialEq)]
pub struct PhongMaterial {
    /// Base color, multiplied with the surface color of the hit
    pub color: Color,
    /// Mirror blend factor, expected in [0, 1]
    pub reflectivity: f32,
    /// Ambient weight
    pub ambient: f32,
    /// Diffuse weight
    pub diffuse: f32,
    /// Specular weight (highlights are white)
    pub specular: f32,
    /// Phong exponent
    pub shininess: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            reflectivity: 0.0,
            ambient: 0.1,
            diffuse: 1.0,
            specular: 0.5,
            shininess: 32.0,
        }
    }
}

impl PhongMaterial {
    /// Create a non-reflective material with default weights.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Set the mirror blend factor.
    ///
    /// Values outside [0, 1] are kept as given.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        if !(0.0..=1.0).contains(&reflectivity) {
            log::warn!("reflectivity {reflectivity} is outside [0, 1]");
        }
        self.reflectivity = reflectivity;
        self
    }

    /// Set the ambient, diffuse and specular weights.
    pub fn with_weights(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Material for PhongMaterial {
    fn shade(
        &self,
        ray: &Ray,
        rec: &HitRecord,
        lights: &[PointLight],
        visibility: &dyn Visibility,
    ) -> Color {
        let base = self.color * rec.color;
        let n = rec.facing_normal();
        let view = -ray.direction().normalize_or_zero();

        let mut color = self.ambient * base;

        for light in lights {
            let l = light.direction_from(rec.point);
            let n_dot_l = n.dot(l);
            // Lights behind the surface contribute nothing; skip the shadow ray too.
            if n_dot_l <= 0.0 || !visibility.is_lit(rec, light) {
                continue;
            }

            color += self.diffuse * n_dot_l * base;

            let r = reflect(-l, n);
            let r_dot_v = r.dot(view).max(0.0);
            color += Color::splat(self.specular * r_dot_v.powf(self.shininess));
        }

        color
    }

    fn reflectivity(&self) -> f32 {
        self.reflectivity
    }
}
