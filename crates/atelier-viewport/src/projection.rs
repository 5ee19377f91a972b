//! Shared 3D projection math for the viewport: world-to-screen projection,
//! screen-to-world ray unprojection, and geometric intersection utilities.
//!
//! Used by both the picking resolver and the transform gizmo.

use crate::camera::OrbitCamera;
use glam::{Vec3, Vec4Swizzles};

/// A ray in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Compute a world-space ray through a screen pixel.
/// `viewport` is `[width, height]` in the same pixel units as `sx`, `sy`.
pub fn screen_to_world_ray(camera: &OrbitCamera, viewport: [f32; 2], sx: f32, sy: f32) -> Ray {
    let inv_vp = camera.view_projection_matrix().inverse();

    let ndc_x = (sx / viewport[0]) * 2.0 - 1.0;
    let ndc_y = 1.0 - (sy / viewport[1]) * 2.0;

    let near = inv_vp.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
    let far = inv_vp.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

    Ray::new(near, far - near)
}

/// Project a world-space point to screen coordinates.
/// Returns None if the point is behind the camera.
pub fn world_to_screen(camera: &OrbitCamera, viewport: [f32; 2], pos: Vec3) -> Option<[f32; 2]> {
    let clip = camera.view_projection_matrix() * pos.extend(1.0);
    if clip.w <= 0.001 {
        return None;
    }
    let ndc = clip.xy() / clip.w;
    Some([
        (ndc.x + 1.0) * 0.5 * viewport[0],
        (1.0 - ndc.y) * 0.5 * viewport[1],
    ])
}

/// Distance from a ray to a point. Points behind the origin measure to the origin.
pub fn ray_point_distance(ray: &Ray, point: Vec3) -> f32 {
    let t = (point - ray.origin).dot(ray.direction).max(0.0);
    ray.at(t).distance(point)
}

/// Distance from a ray to a line segment (for axis picking).
pub fn ray_segment_distance(ray: &Ray, seg_a: Vec3, seg_b: Vec3) -> f32 {
    let u = seg_b - seg_a;
    let w0 = seg_a - ray.origin;
    let a = u.dot(u);
    let b = u.dot(ray.direction);
    let d = u.dot(w0);
    let e = ray.direction.dot(w0);
    let denom = a - b * b;

    // Parallel lines: any segment point works, take the start
    let s = if denom.abs() < 1e-8 || a < 1e-12 {
        0.0
    } else {
        ((b * e - d) / denom).clamp(0.0, 1.0)
    };
    ray_point_distance(ray, seg_a + u * s)
}

/// Intersect a ray with the plane `dot(normal, p) = d`.
/// Returns None if the ray is parallel to the plane or the plane is behind it.
pub fn ray_plane_intersect(ray: &Ray, normal: Vec3, d: f32) -> Option<Vec3> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < 1e-6 {
        return None;
    }
    let t = (d - normal.dot(ray.origin)) / denom;
    if t < 0.0 {
        return None;
    }
    Some(ray.at(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn camera() -> OrbitCamera {
        OrbitCamera::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }

    #[test]
    fn test_project_then_unproject_passes_through_point() {
        let cam = camera();
        let viewport = [1280.0, 720.0];
        let p = Vec3::new(0.4, 0.8, -0.3);

        let [sx, sy] = world_to_screen(&cam, viewport, p).unwrap();
        let ray = screen_to_world_ray(&cam, viewport, sx, sy);

        assert!(ray_point_distance(&ray, p) < 1e-3);
    }

    #[test]
    fn test_target_projects_to_center() {
        let cam = camera();
        let [sx, sy] = world_to_screen(&cam, [800.0, 600.0], cam.target()).unwrap();
        assert!((sx - 400.0).abs() < 0.5);
        assert!((sy - 300.0).abs() < 0.5);
    }

    #[test]
    fn test_point_behind_camera_is_not_projected() {
        let cam = camera();
        let behind = cam.position() + (cam.position() - cam.target());
        assert!(world_to_screen(&cam, [800.0, 600.0], behind).is_none());
    }

    #[test]
    fn test_ray_plane_intersect() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let hit = ray_plane_intersect(&ray, Vec3::Y, 1.0).unwrap();
        assert!((hit - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);

        // Parallel
        assert!(ray_plane_intersect(&ray, Vec3::X, 1.0).is_none());
        // Behind
        let up = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ray_plane_intersect(&up, Vec3::Y, 1.0).is_none());
    }

    #[test]
    fn test_ray_segment_distance() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        // Segment crossing the ray
        let d = ray_segment_distance(&ray, Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert!(d < 1e-6);
        // Segment offset by 0.5 in y
        let d = ray_segment_distance(&ray, Vec3::new(-1.0, 0.5, 0.0), Vec3::new(1.0, 0.5, 0.0));
        assert!((d - 0.5).abs() < 1e-6);
        // Segment that stops short of the ray
        let d = ray_segment_distance(&ray, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));
        assert!((d - 1.0).abs() < 1e-6);
    }
}
