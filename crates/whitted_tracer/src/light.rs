//! Point light source.

use whitted_math::Vec3;

/// An omnidirectional light of unit intensity at a fixed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Unit vector from `point` toward the light.
    #[inline]
    pub fn direction_from(&self, point: Vec3) -> Vec3 {
        (self.position - point).normalize_or_zero()
    }

    /// Distance from `point` to the light.
    #[inline]
    pub fn distance_from(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_and_distance() {
        let light = PointLight::new(Vec3::new(0.0, 3.0, 4.0));

        assert_eq!(light.distance_from(Vec3::ZERO), 5.0);
        let dir = light.direction_from(Vec3::ZERO);
        assert!((dir - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_direction_at_light_position_is_zero() {
        let light = PointLight::new(Vec3::ONE);
        assert_eq!(light.direction_from(Vec3::ONE), Vec3::ZERO);
    }
}
