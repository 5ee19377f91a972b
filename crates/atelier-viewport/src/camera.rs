//! Orbit camera with damped rotation and dolly

use crate::config::CameraConfig;
use glam::{Mat4, Vec3};

/// Frame rate the damping factor is expressed at
const REFERENCE_FPS: f32 = 60.0;

/// Closest the camera may dolly to its target
const MIN_ORBIT_DISTANCE: f32 = 1e-3;

/// An ordered limit pair; non-finite bounds fall back to `fallback`
fn ordered_limits(a: f32, b: f32, fallback: (f32, f32)) -> (f32, f32) {
    if a.is_finite() && b.is_finite() {
        (a.min(b), a.max(b))
    } else {
        fallback
    }
}

/// A perspective camera orbiting a fixed target
///
/// Pointer drags and wheel steps accumulate into a pending delta that
/// `update` applies a fraction of each frame, so motion eases out after the
/// pointer stops. The fraction is `damping` per 60 Hz frame and is rescaled
/// for other frame times. Pan is not supported.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    target: Vec3,
    position: Vec3,
    /// Field of view in degrees
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,

    distance: f32,
    /// Horizontal angle in radians, measured from +Z towards +X
    yaw: f32,
    /// Elevation above the target's horizontal plane in radians
    pitch: f32,

    pending_yaw: f32,
    pending_pitch: f32,
    pending_dolly: f32,

    damping: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
    min_pitch: f32,
    max_pitch: f32,

    /// Last pointer position of an orbit drag in progress
    orbit_anchor: Option<[f32; 2]>,
    pointer_input_enabled: bool,
}

impl OrbitCamera {
    /// Build from config. Limits are ordered and bounded here too, since
    /// configs built in code never pass through `CameraConfig::validate`.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let defaults = CameraConfig::default();
        let (min_distance, max_distance) = ordered_limits(
            config.min_distance,
            config.max_distance,
            (defaults.min_distance, defaults.max_distance),
        );
        let min_distance = min_distance.max(MIN_ORBIT_DISTANCE);
        let max_distance = max_distance.max(min_distance);
        let (min_polar, max_polar) = ordered_limits(
            config.min_polar_angle,
            config.max_polar_angle,
            (defaults.min_polar_angle, defaults.max_polar_angle),
        );
        let min_polar = min_polar.clamp(0.0, std::f32::consts::PI);
        let max_polar = max_polar.clamp(min_polar, std::f32::consts::PI);

        let target = Vec3::from_array(config.target);
        let offset = Vec3::from_array(config.position) - target;
        let distance = if offset.length().is_finite() {
            offset.length().clamp(min_distance, max_distance)
        } else {
            max_distance
        };
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.length().max(f32::EPSILON)).clamp(-1.0, 1.0).asin();

        // Polar angles are measured from +Y, pitch from the horizon
        let min_pitch = std::f32::consts::FRAC_PI_2 - max_polar;
        let max_pitch = std::f32::consts::FRAC_PI_2 - min_polar;

        let mut camera = Self {
            target,
            position: target + offset,
            fov: config.fov,
            near: config.near,
            far: config.far,
            aspect,
            distance,
            yaw,
            pitch: pitch.clamp(min_pitch, max_pitch),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_dolly: 1.0,
            damping: config.damping.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_distance,
            max_distance,
            min_pitch,
            max_pitch,
            orbit_anchor: None,
            pointer_input_enabled: true,
        };
        camera.update_orbit();
        camera
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Whether orbit and zoom currently respond to pointer input
    pub fn pointer_input_enabled(&self) -> bool {
        self.pointer_input_enabled
    }

    /// Only the transform gizmo flips this gate, around a drag session.
    pub(crate) fn set_pointer_input_enabled(&mut self, enabled: bool) {
        if !enabled {
            // A press that started an orbit must not resume it after the drag
            self.orbit_anchor = None;
        }
        self.pointer_input_enabled = enabled;
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbit_anchor.is_some()
    }

    /// Start an orbit drag at a pointer position
    pub fn begin_orbit(&mut self, x: f32, y: f32) {
        if self.pointer_input_enabled {
            self.orbit_anchor = Some([x, y]);
        }
    }

    /// Continue an orbit drag. Returns whether the pointer moved the camera.
    pub fn orbit_to(&mut self, x: f32, y: f32, viewport_height: f32) -> bool {
        if !self.pointer_input_enabled {
            return false;
        }
        let Some([last_x, last_y]) = self.orbit_anchor else {
            return false;
        };
        self.orbit_anchor = Some([x, y]);

        let height = viewport_height.max(1.0);
        let full_turn = std::f32::consts::TAU * self.rotate_speed;
        // Dragging right swings the camera left around the target, dragging
        // down raises it
        self.pending_yaw -= full_turn * (x - last_x) / height;
        self.pending_pitch += full_turn * (y - last_y) / height;
        true
    }

    pub fn end_orbit(&mut self) {
        self.orbit_anchor = None;
    }

    /// Dolly by wheel steps. Positive steps move towards the target.
    ///
    /// The pending dolly never asks for more than the distance limits allow,
    /// so huge step counts saturate instead of overflowing.
    pub fn zoom(&mut self, steps: f32) {
        let scaled = steps * self.zoom_speed;
        if !self.pointer_input_enabled || !scaled.is_finite() {
            return;
        }
        let reach_in = self.min_distance / self.distance;
        let reach_out = self.max_distance / self.distance;
        self.pending_dolly = (self.pending_dolly * 0.95_f32.powf(scaled)).clamp(reach_in, reach_out);
    }

    /// Advance damped motion by `dt` seconds. Returns whether the camera moved.
    pub fn update(&mut self, dt: f32) -> bool {
        let frames = if dt.is_finite() { dt.max(0.0) * REFERENCE_FPS } else { 0.0 };
        let factor = if self.damping > 0.0 {
            1.0 - (1.0 - self.damping).powf(frames)
        } else {
            1.0
        };

        let yaw_step = self.pending_yaw * factor;
        let pitch_step = self.pending_pitch * factor;
        // Dolly eases geometrically: apply the same fraction in log space
        let dolly_step = self.pending_dolly.powf(factor);

        let before = (self.yaw, self.pitch, self.distance);
        self.yaw += yaw_step;
        self.pitch = (self.pitch + pitch_step).clamp(self.min_pitch, self.max_pitch);
        self.distance = (self.distance * dolly_step).clamp(self.min_distance, self.max_distance);

        self.pending_yaw -= yaw_step;
        self.pending_pitch -= pitch_step;
        self.pending_dolly /= dolly_step;
        if self.pending_yaw.abs() < 1e-6 {
            self.pending_yaw = 0.0;
        }
        if self.pending_pitch.abs() < 1e-6 {
            self.pending_pitch = 0.0;
        }
        if (self.pending_dolly - 1.0).abs() < 1e-6 {
            self.pending_dolly = 1.0;
        }

        self.update_orbit();
        before != (self.yaw, self.pitch, self.distance)
    }

    /// Recompute position from the orbit parameters
    fn update_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Unit vector from the camera towards its target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
