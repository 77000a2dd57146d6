//! Perspective camera for primary ray generation.

use whitted_math::{Ray, Vec3};

/// Pinhole camera with a vertical field of view.
///
/// Construct with the image intrinsics, then place it with
/// [`PerspectiveCamera::set_view`]. Until then it sits at the origin
/// looking down -Z with +Y up.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    // Image settings
    width: u32,
    height: u32,
    /// Vertical field of view in degrees
    vfov: f32,

    // Camera positioning
    eye: Vec3,
    look_at: Vec3,
    up: Vec3,

    // Cached computed values (set by update())
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl PerspectiveCamera {
    /// Create a camera producing `width` x `height` pixels.
    pub fn new(width: u32, height: u32, vfov_degrees: f32) -> Self {
        let mut camera = Self {
            width,
            height,
            vfov: vfov_degrees,
            eye: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            up: Vec3::Y,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
        };
        camera.update();
        camera
    }

    /// Place the camera at `eye`, looking at `look_at`, with `up` roughly up.
    pub fn set_view(&mut self, eye: Vec3, look_at: Vec3, up: Vec3) {
        self.eye = eye;
        self.look_at = look_at;
        self.up = up;
        self.update();
    }

    /// Builder form of [`PerspectiveCamera::set_view`].
    pub fn with_view(mut self, eye: Vec3, look_at: Vec3, up: Vec3) -> Self {
        self.set_view(eye, look_at, up);
        self
    }

    /// Change the output resolution, keeping the field of view and view.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.update();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// True when the eye and look-at point give a usable view direction.
    pub fn has_view_direction(&self) -> bool {
        (self.eye - self.look_at).normalize_or_zero() != Vec3::ZERO
    }

    /// Ray through the center of pixel (x, y); (0, 0) is the top-left pixel.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        self.primary_ray_offset(x, y, 0.0, 0.0)
    }

    /// Ray through pixel (x, y) displaced by (dx, dy) pixels from its center.
    pub fn primary_ray_offset(&self, x: u32, y: u32, dx: f32, dy: f32) -> Ray {
        let pixel_sample = self.pixel00_loc
            + (x as f32 + dx) * self.pixel_delta_u
            + (y as f32 + dy) * self.pixel_delta_v;

        Ray::new(self.eye, (pixel_sample - self.eye).normalize())
    }

    /// Recompute the viewport from the current intrinsics and view.
    fn update(&mut self) {
        // Viewport on the plane one unit in front of the eye
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (self.width as f32 / self.height.max(1) as f32);

        // Camera basis vectors
        let w = (self.eye - self.look_at).normalize_or_zero();
        if w == Vec3::ZERO {
            log::warn!("camera eye {} coincides with its look-at point", self.eye);
        }
        let mut u = self.up.cross(w).normalize_or_zero();
        if u == Vec3::ZERO && w != Vec3::ZERO {
            log::warn!("camera up vector {} is parallel to the view direction", self.up);
            u = w.any_orthonormal_vector();
        }
        let v = w.cross(u);

        // Viewport edge vectors; v runs down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / self.width.max(1) as f32;
        self.pixel_delta_v = viewport_v / self.height.max(1) as f32;

        let viewport_upper_left = self.eye - w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_ray_points_at_target() {
        // Odd resolution so a pixel center lies on the optical axis.
        let camera = PerspectiveCamera::new(101, 101, 45.0).with_view(
            Vec3::new(0.0, -10.0, 10.0),
            Vec3::ZERO,
            Vec3::Z,
        );

        let ray = camera.primary_ray(50, 50);
        let expected = (Vec3::ZERO - Vec3::new(0.0, -10.0, 10.0)).normalize();
        assert_eq!(ray.origin, Vec3::new(0.0, -10.0, 10.0));
        assert!((ray.direction - expected).length() < 1e-5);
    }

    #[test]
    fn test_image_orientation() {
        let camera = PerspectiveCamera::new(100, 100, 90.0).with_view(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);

        let top_left = camera.primary_ray(0, 0).direction;
        let bottom_right = camera.primary_ray(99, 99).direction;
        assert!(top_left.x < 0.0 && top_left.y > 0.0);
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
        assert!(top_left.z < 0.0 && bottom_right.z < 0.0);
    }

    #[test]
    fn test_vertical_fov() {
        let camera = PerspectiveCamera::new(2, 2, 90.0);

        // Pixel edge at the top of the image is 45 degrees off axis.
        let top_edge = camera.primary_ray_offset(0, 0, 0.5, -0.5).direction;
        let angle = top_edge.angle_between(Vec3::NEG_Z).to_degrees();
        assert!((angle - 45.0).abs() < 1e-3, "angle = {angle}");
    }

    #[test]
    fn test_rays_are_normalized() {
        let camera = PerspectiveCamera::new(320, 240, 45.0)
            .with_view(Vec3::new(3.0, 2.0, 1.0), Vec3::ZERO, Vec3::Y);

        for (x, y) in [(0, 0), (319, 0), (160, 120), (0, 239)] {
            assert!((camera.primary_ray(x, y).direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_up_vector_still_produces_rays() {
        let camera = PerspectiveCamera::new(10, 10, 45.0).with_view(Vec3::ZERO, Vec3::Y, Vec3::Y);

        let dir = camera.primary_ray(5, 5).direction;
        assert!(dir.is_finite());
        assert!(dir.y > 0.9);
    }

    #[test]
    fn test_set_resolution_keeps_view() {
        let eye = Vec3::new(0.0, -10.0, 10.0);
        let mut camera = PerspectiveCamera::new(101, 101, 45.0).with_view(eye, Vec3::ZERO, Vec3::Z);
        let before = camera.primary_ray(50, 50).direction;

        camera.set_resolution(11, 11);
        assert_eq!((camera.width(), camera.height()), (11, 11));
        assert!((camera.primary_ray(5, 5).direction - before).length() < 1e-5);
    }

    #[test]
    fn test_coincident_eye_and_target_has_no_view_direction() {
        let camera = PerspectiveCamera::new(4, 4, 45.0).with_view(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(!camera.has_view_direction());
        assert!(PerspectiveCamera::new(4, 4, 45.0).has_view_direction());
    }
}
