//! Viewport Camera
//!
//! Free camera owned by one viewport. The camera looks along local +Z with
//! +Y up and +X right. Orientation is kept both as a quaternion and as Euler
//! angles in degrees (x = pitch, y = yaw, z = roll) so mouse look can
//! accumulate and clamp pitch without quaternion drift.

use glam::{EulerRot, Quat, Vec2, Vec3};

/// Zoom range accepted by [`ViewportCamera::set_zoom`].
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 30.0;

/// A ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with the horizontal plane `y = height`, if in front.
    pub fn hit_horizontal_plane(&self, height: f32) -> Option<Vec3> {
        if self.direction.y.abs() < 0.0001 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        (t >= 0.0).then(|| self.point_at(t))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Euler angles in degrees: pitch, yaw, roll.
    pub angles: Vec3,
    pub zoom: f32,
    pub orthographic: bool,
    /// Vertical field of view in degrees (perspective).
    pub fov: f32,
    /// Vertical extent in world units (orthographic).
    pub ortho_size: f32,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            angles: Vec3::ZERO,
            zoom: 1.0,
            orthographic: false,
            fov: 45.0,
            ortho_size: 20.0,
        }
    }
}

/// Quaternion from Euler angles in degrees (x = pitch, y = yaw, z = roll).
pub fn rotation_from_angles(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Inverse of [`rotation_from_angles`].
pub fn angles_from_rotation(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

impl ViewportCamera {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        let mut camera = Self::default();
        camera.set_transform(position, rotation);
        camera
    }

    /// Place the camera and resync the Euler angles from `rotation`.
    pub fn set_transform(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation.normalize();
        self.angles = angles_from_rotation(self.rotation);
    }

    /// Set orientation from Euler angles in degrees.
    pub fn set_angles(&mut self, angles: Vec3) {
        self.angles = angles;
        self.rotation = rotation_from_angles(angles);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Move in the camera's own frame.
    pub fn translate_local(&mut self, delta: Vec3) {
        self.position += self.rotation * delta;
    }

    /// Move along world axes.
    pub fn translate_world(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Ray through a normalized screen point (0,0 top-left, 1,1 bottom-right).
    pub fn screen_ray(&self, screen: Vec2, aspect_ratio: f32) -> Ray {
        let ndc = Vec2::new(screen.x * 2.0 - 1.0, 1.0 - screen.y * 2.0);
        let zoom = self.zoom.max(MIN_ZOOM);

        if self.orthographic {
            let half_h = self.ortho_size * 0.5 / zoom;
            let half_w = half_h * aspect_ratio;
            let origin =
                self.position + self.right() * ndc.x * half_w + self.up() * ndc.y * half_h;
            return Ray::new(origin, self.forward());
        }

        let half_h = (self.fov.to_radians() * 0.5).tan() / zoom;
        let half_w = half_h * aspect_ratio;
        let direction = self.forward() + self.right() * ndc.x * half_w + self.up() * ndc.y * half_h;
        Ray::new(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_default_looks_along_z() {
        let camera = ViewportCamera::default();
        assert_eq!(camera.forward(), Vec3::Z);
        assert_eq!(camera.zoom, 1.0);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let mut camera = ViewportCamera::default();
        camera.set_angles(Vec3::new(45.0, 0.0, 0.0));
        let f = camera.forward();
        assert!(f.y < -0.7 && f.z > 0.7);
    }

    #[test]
    fn test_positive_yaw_turns_right() {
        let mut camera = ViewportCamera::default();
        camera.set_angles(Vec3::new(0.0, 90.0, 0.0));
        assert!(approx(camera.forward(), Vec3::X));
    }

    #[test]
    fn test_set_transform_recovers_angles() {
        let rotation = rotation_from_angles(Vec3::new(30.0, -60.0, 0.0));
        let camera = ViewportCamera::new(Vec3::ONE, rotation);
        assert!(approx(camera.angles, Vec3::new(30.0, -60.0, 0.0)));
    }

    #[test]
    fn test_translate_local_follows_yaw() {
        let mut camera = ViewportCamera::default();
        camera.set_angles(Vec3::new(0.0, 90.0, 0.0));
        camera.translate_local(Vec3::new(0.0, 0.0, 2.0));
        assert!(approx(camera.position, Vec3::new(2.0, 0.0, 0.0)));
        camera.translate_world(Vec3::Y);
        assert!(approx(camera.position, Vec3::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = ViewportCamera::default();
        camera.set_zoom(100.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
        camera.set_zoom(-1.0);
        assert_eq!(camera.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_center_ray_is_forward() {
        let camera = ViewportCamera::new(
            Vec3::new(0.0, 10.0, -10.0),
            Quat::from_rotation_x(45f32.to_radians()),
        );
        let ray = camera.screen_ray(Vec2::splat(0.5), 4.0 / 3.0);
        assert!(approx(ray.direction, camera.forward()));
        // Looking down at the origin from (0, 10, -10)
        let hit = ray.hit_horizontal_plane(0.0).unwrap();
        assert!(approx(hit, Vec3::ZERO));
    }

    #[test]
    fn test_top_left_ray_points_up_and_left() {
        let camera = ViewportCamera::default();
        let ray = camera.screen_ray(Vec2::ZERO, 1.0);
        assert!(ray.direction.x < 0.0);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn test_orthographic_rays_are_parallel() {
        let camera = ViewportCamera {
            orthographic: true,
            ..Default::default()
        };
        let a = camera.screen_ray(Vec2::ZERO, 1.0);
        let b = camera.screen_ray(Vec2::ONE, 1.0);
        assert_eq!(a.direction, b.direction);
        assert!(approx(a.origin, Vec3::new(-10.0, 10.0, 0.0)));
    }
}
