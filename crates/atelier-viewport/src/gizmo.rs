//! Interactive transform gizmo for the selected object.
//!
//! Translate mode offers axis arrows and plane handles, rotate mode offers one
//! ring per axis. While a handle is dragged the gizmo owns the node: it writes
//! the live pose straight onto the scene graph, keeps the camera's pointer
//! input disabled, and only touches the entity store once, on release.

use crate::camera::OrbitCamera;
use crate::config::GizmoConfig;
use crate::projection::*;
use crate::session::{DragCommit, DragConstraint, DragMode, DragSession};
use atelier_core::{AtelierError, EntityId, Result, Transform, Vec3};
use atelier_scene::SceneGraph;
use atelier_store::ToolMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TRANSLATE_HANDLES: [GizmoAxis; 6] = [
    GizmoAxis::X,
    GizmoAxis::Y,
    GizmoAxis::Z,
    GizmoAxis::XY,
    GizmoAxis::XZ,
    GizmoAxis::YZ,
];
const AXIS_HANDLES: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

/// Fraction of the arrow length where a grab lands
const ARROW_GRAB: f32 = 0.85;

/// Which axis, plane, or ring a handle operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GizmoAxis {
    X,
    Y,
    Z,
    XY,
    XZ,
    YZ,
}

impl GizmoAxis {
    /// Component index for single axes
    pub fn index(&self) -> Option<usize> {
        match self {
            GizmoAxis::X => Some(0),
            GizmoAxis::Y => Some(1),
            GizmoAxis::Z => Some(2),
            _ => None,
        }
    }

    /// Unit direction for single axes, plane normal for plane handles
    pub fn direction(&self) -> glam::Vec3 {
        match self {
            GizmoAxis::X | GizmoAxis::YZ => glam::Vec3::X,
            GizmoAxis::Y | GizmoAxis::XZ => glam::Vec3::Y,
            GizmoAxis::Z | GizmoAxis::XY => glam::Vec3::Z,
        }
    }

    /// Components a translate drag on this handle may change
    pub fn mask(&self) -> glam::Vec3 {
        match self {
            GizmoAxis::X => glam::Vec3::new(1.0, 0.0, 0.0),
            GizmoAxis::Y => glam::Vec3::new(0.0, 1.0, 0.0),
            GizmoAxis::Z => glam::Vec3::new(0.0, 0.0, 1.0),
            GizmoAxis::XY => glam::Vec3::new(1.0, 1.0, 0.0),
            GizmoAxis::XZ => glam::Vec3::new(1.0, 0.0, 1.0),
            GizmoAxis::YZ => glam::Vec3::new(0.0, 1.0, 1.0),
        }
    }

    /// In-plane basis `(u, v)` of a ring with `u x v` along the axis, so a
    /// positive angle from `u` towards `v` is a positive rotation.
    fn ring_basis(&self) -> Option<(glam::Vec3, glam::Vec3)> {
        match self {
            GizmoAxis::X => Some((glam::Vec3::Y, glam::Vec3::Z)),
            GizmoAxis::Y => Some((glam::Vec3::Z, glam::Vec3::X)),
            GizmoAxis::Z => Some((glam::Vec3::X, glam::Vec3::Y)),
            _ => None,
        }
    }

    /// Angle of `point` around this ring's axis through `center`
    pub(crate) fn ring_angle(&self, center: glam::Vec3, point: glam::Vec3) -> Option<f32> {
        let (u, v) = self.ring_basis()?;
        let r = point - center;
        let (x, y) = (r.dot(u), r.dot(v));
        if x.abs() < 1e-9 && y.abs() < 1e-9 {
            return None;
        }
        Some(y.atan2(x))
    }

    fn ring_point(&self, center: glam::Vec3, radius: f32, angle: f32) -> Option<glam::Vec3> {
        let (u, v) = self.ring_basis()?;
        Some(center + (u * angle.cos() + v * angle.sin()) * radius)
    }

    /// Edges of a plane handle
    fn plane_dirs(&self) -> Option<(glam::Vec3, glam::Vec3)> {
        match self {
            GizmoAxis::XY => Some((glam::Vec3::X, glam::Vec3::Y)),
            GizmoAxis::XZ => Some((glam::Vec3::X, glam::Vec3::Z)),
            GizmoAxis::YZ => Some((glam::Vec3::Y, glam::Vec3::Z)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GizmoAxis::X => "x",
            GizmoAxis::Y => "y",
            GizmoAxis::Z => "z",
            GizmoAxis::XY => "xy",
            GizmoAxis::XZ => "xz",
            GizmoAxis::YZ => "yz",
        }
    }
}

impl fmt::Display for GizmoAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GizmoAxis {
    type Err = AtelierError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TRANSLATE_HANDLES
            .iter()
            .copied()
            .find(|axis| axis.as_str() == s)
            .ok_or_else(|| AtelierError::InvalidEnumValue {
                value: s.to_string(),
                allowed: TRANSLATE_HANDLES.iter().map(|a| a.as_str().to_string()).collect(),
            })
    }
}

/// Lifecycle of the gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GizmoState {
    /// No selection, or the select tool is active
    Detached,
    /// Drawn on the selection and ready to be grabbed
    AttachedIdle,
    /// A handle is held; the node is owned by the drag session
    Dragging,
}

/// What a renderer needs to draw the gizmo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GizmoView {
    pub entity_id: EntityId,
    pub mode: DragMode,
    pub state: GizmoState,
    /// Where the gizmo sits: the node's displayed position
    pub origin: Vec3,
    /// Arrow length and ring radius in world units
    pub size: f32,
    pub handles: Vec<GizmoAxis>,
    pub hovered: Option<GizmoAxis>,
    pub active: Option<GizmoAxis>,
}

/// Transform gizmo state.
pub struct TransformGizmo {
    config: GizmoConfig,
    /// Selected entity and the manipulation its tool mode offers
    target: Option<(EntityId, DragMode)>,
    hovered_axis: Option<GizmoAxis>,
    session: Option<DragSession>,
}

impl TransformGizmo {
    pub fn new(config: GizmoConfig) -> Self {
        Self {
            config,
            target: None,
            hovered_axis: None,
            session: None,
        }
    }

    pub fn state(&self) -> GizmoState {
        if self.session.is_some() {
            GizmoState::Dragging
        } else if self.target.is_some() {
            GizmoState::AttachedIdle
        } else {
            GizmoState::Detached
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target.map(|(id, _)| id)
    }

    pub fn mode(&self) -> Option<DragMode> {
        self.target.map(|(_, mode)| mode)
    }

    pub fn hovered_axis(&self) -> Option<GizmoAxis> {
        self.hovered_axis
    }

    /// Follow the store's selection and tool mode.
    ///
    /// Ignored while dragging: the session keeps its target until it ends.
    pub fn attach(&mut self, selection: Option<EntityId>, tool_mode: ToolMode) {
        let target = selection.zip(DragMode::from_tool(tool_mode));
        if self.session.is_some() {
            if target != self.target {
                log::warn!("Gizmo retarget ignored while a drag is open");
            }
            return;
        }
        if target != self.target {
            self.target = target;
            self.hovered_axis = None;
        }
    }

    /// Handles offered by a mode
    pub fn handles(mode: DragMode) -> &'static [GizmoAxis] {
        match mode {
            DragMode::Translate => &TRANSLATE_HANDLES,
            DragMode::Rotate => &AXIS_HANDLES,
        }
    }

    /// World-space gizmo size at `origin`. Scales with camera distance so the
    /// gizmo keeps a constant size on screen.
    pub fn size(&self, camera: &OrbitCamera, origin: glam::Vec3) -> f32 {
        camera.position().distance(origin) * self.config.size_factor
    }

    /// Pick test: determine which handle (if any) is under the cursor.
    pub fn pick(
        &self,
        camera: &OrbitCamera,
        viewport: [f32; 2],
        sx: f32,
        sy: f32,
        origin: glam::Vec3,
    ) -> Option<GizmoAxis> {
        let (_, mode) = self.target?;
        let ray = screen_to_world_ray(camera, viewport, sx, sy);
        let distance = camera.position().distance(origin);
        let size = self.size(camera, origin);
        let axis_threshold = distance * self.config.axis_pick_factor;
        let plane_threshold = distance * self.config.plane_pick_factor;

        match mode {
            DragMode::Translate => {
                // Plane handles first (smaller targets, higher priority)
                for axis in [GizmoAxis::XY, GizmoAxis::XZ, GizmoAxis::YZ] {
                    let center = plane_handle_center(origin, size, axis);
                    if ray_point_distance(&ray, center) < plane_threshold {
                        return Some(axis);
                    }
                }

                AXIS_HANDLES
                    .iter()
                    .map(|axis| {
                        let tip = origin + axis.direction() * size;
                        (*axis, ray_segment_distance(&ray, origin, tip))
                    })
                    .filter(|(_, dist)| *dist < axis_threshold)
                    .min_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(axis, _)| axis)
            }
            DragMode::Rotate => AXIS_HANDLES
                .iter()
                .filter_map(|axis| {
                    let normal = axis.direction();
                    let hit = ray_plane_intersect(&ray, normal, normal.dot(origin))?;
                    Some((*axis, (hit.distance(origin) - size).abs()))
                })
                .filter(|(_, err)| *err < axis_threshold)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(axis, _)| axis),
        }
    }

    /// World point where a handle is grabbed: along an arrow, the middle of a
    /// plane handle, or the point of a ring facing the camera.
    pub fn handle_anchor(
        &self,
        camera: &OrbitCamera,
        axis: GizmoAxis,
        origin: glam::Vec3,
    ) -> Option<glam::Vec3> {
        let (_, mode) = self.target?;
        let size = self.size(camera, origin);
        match mode {
            DragMode::Translate if axis.index().is_some() => {
                Some(origin + axis.direction() * size * ARROW_GRAB)
            }
            DragMode::Translate => Some(plane_handle_center(origin, size, axis)),
            DragMode::Rotate => self.ring_point(camera, axis, origin, 0.0),
        }
    }

    /// Point on a ring, `offset` radians past the point facing the camera
    pub fn ring_point(
        &self,
        camera: &OrbitCamera,
        axis: GizmoAxis,
        origin: glam::Vec3,
        offset: f32,
    ) -> Option<glam::Vec3> {
        let facing = axis.ring_angle(origin, camera.position()).unwrap_or(0.0);
        axis.ring_point(origin, self.size(camera, origin), facing + offset)
    }

    /// Update hovered handle from pointer position.
    pub fn update_hover(
        &mut self,
        camera: &OrbitCamera,
        viewport: [f32; 2],
        sx: f32,
        sy: f32,
        origin: glam::Vec3,
    ) -> Option<GizmoAxis> {
        if self.session.is_none() {
            self.hovered_axis = self.pick(camera, viewport, sx, sy, origin);
        }
        self.hovered_axis
    }

    /// Open a drag session on a handle.
    ///
    /// Claims the node from the store and disables the camera's pointer input
    /// until the session ends.
    pub fn begin_drag(
        &mut self,
        axis: GizmoAxis,
        camera: &mut OrbitCamera,
        graph: &mut SceneGraph,
        viewport: [f32; 2],
        sx: f32,
        sy: f32,
    ) -> Result<()> {
        if let Some(session) = &self.session {
            return Err(AtelierError::DragInProgress(session.entity_id()));
        }
        let (entity_id, mode) = self.target.ok_or(AtelierError::GizmoDetached)?;
        let handles = Self::handles(mode);
        if !handles.contains(&axis) {
            return Err(AtelierError::InvalidEnumValue {
                value: axis.to_string(),
                allowed: handles.iter().map(|a| a.to_string()).collect(),
            });
        }

        let start = graph
            .transform(entity_id)
            .ok_or(AtelierError::NodeNotReady(entity_id))?;
        let origin = glam::Vec3::from(start.position);
        let ray = screen_to_world_ray(camera, viewport, sx, sy);

        // A press whose ray misses the plane has no grab point to drag from
        let missed = AtelierError::DragPlaneMissed(entity_id);
        let constraint = match mode {
            DragMode::Translate => {
                let (normal, d) = drag_plane(axis, origin, camera);
                DragConstraint::Plane {
                    normal,
                    d,
                    start_hit: ray_plane_intersect(&ray, normal, d).ok_or(missed)?,
                }
            }
            DragMode::Rotate => {
                let normal = axis.direction();
                let last_angle = ray_plane_intersect(&ray, normal, normal.dot(origin))
                    .and_then(|hit| axis.ring_angle(origin, hit))
                    .ok_or(missed)?;
                DragConstraint::Ring {
                    center: origin,
                    last_angle,
                    swept: 0.0,
                }
            }
        };

        let node = graph.claim_for_drag(entity_id)?;
        camera.set_pointer_input_enabled(false);
        self.session = Some(DragSession::new(entity_id, node, axis, mode, start, constraint));
        self.hovered_axis = Some(axis);
        log::debug!("Drag {:?} on {} along {} began", mode, entity_id, axis);
        Ok(())
    }

    /// Track the pointer during a drag. Writes the live pose onto the node and
    /// returns it, or None when the pointer ray misses the constraint plane.
    pub fn handle_drag(
        &mut self,
        camera: &OrbitCamera,
        graph: &mut SceneGraph,
        viewport: [f32; 2],
        sx: f32,
        sy: f32,
    ) -> Result<Option<Transform>> {
        let session = self.session.as_mut().ok_or(AtelierError::NoDragSession)?;
        let ray = screen_to_world_ray(camera, viewport, sx, sy);
        let Some(step) = session.track(&ray) else {
            return Ok(None);
        };
        graph.write_live_transform(session.node(), step.transform)?;
        session.advance(step);
        Ok(Some(session.live_transform()))
    }

    /// Finish the drag. The node goes back to store ownership and the camera
    /// is re-enabled; the caller writes the returned commit to the store.
    pub fn end_drag(&mut self, camera: &mut OrbitCamera, graph: &mut SceneGraph) -> Result<DragCommit> {
        let session = self.session.take().ok_or(AtelierError::NoDragSession)?;
        let entity_id = session.entity_id();
        // The node holds exactly what the user saw at release
        let transform = graph
            .transform(entity_id)
            .unwrap_or_else(|| session.live_transform());
        graph.release_to_store(entity_id);
        camera.set_pointer_input_enabled(true);
        log::debug!("Drag {:?} on {} released", session.mode(), entity_id);

        Ok(DragCommit {
            entity_id,
            mode: session.mode(),
            start: session.start_transform(),
            transform,
        })
    }

    /// Abort the drag, putting the node back where it started.
    pub fn cancel_drag(&mut self, camera: &mut OrbitCamera, graph: &mut SceneGraph) -> Result<EntityId> {
        let session = self.session.take().ok_or(AtelierError::NoDragSession)?;
        let entity_id = session.entity_id();
        let restored = graph.write_live_transform(session.node(), session.start_transform());
        // Release and re-enable even when the node is already gone
        graph.release_to_store(entity_id);
        camera.set_pointer_input_enabled(true);
        log::debug!("Drag {:?} on {} cancelled", session.mode(), entity_id);
        restored.map(|_| entity_id)
    }

    /// Snapshot for rendering. None while detached or before the node exists.
    pub fn view(&self, camera: &OrbitCamera, graph: &SceneGraph) -> Option<GizmoView> {
        let (entity_id, mode) = self.target?;
        let origin = graph.transform(entity_id)?.position;
        Some(GizmoView {
            entity_id,
            mode,
            state: self.state(),
            origin,
            size: self.size(camera, origin.into()),
            handles: Self::handles(mode).to_vec(),
            hovered: self.hovered_axis,
            active: self.session.as_ref().map(|s| s.axis()),
        })
    }
}

fn plane_handle_center(origin: glam::Vec3, size: f32, axis: GizmoAxis) -> glam::Vec3 {
    let Some((dir_a, dir_b)) = axis.plane_dirs() else {
        return origin;
    };
    // Center of the small square near the gizmo origin
    let offset = size * 0.3 * 0.7;
    origin + (dir_a + dir_b) * offset
}

/// Choose the constraint plane for dragging on the given handle.
/// Returns (plane_normal, plane_d) where plane_d = dot(normal, point_on_plane).
fn drag_plane(axis: GizmoAxis, origin: glam::Vec3, camera: &OrbitCamera) -> (glam::Vec3, f32) {
    let normal = match axis {
        GizmoAxis::XY | GizmoAxis::XZ | GizmoAxis::YZ => axis.direction(),
        GizmoAxis::X | GizmoAxis::Y | GizmoAxis::Z => {
            // The plane must contain the axis; among such planes take the one
            // facing the camera most directly
            let forward = camera.forward();
            let candidates = match axis {
                GizmoAxis::X => [glam::Vec3::Y, glam::Vec3::Z],
                GizmoAxis::Y => [glam::Vec3::X, glam::Vec3::Z],
                _ => [glam::Vec3::X, glam::Vec3::Y],
            };
            if candidates[0].dot(forward).abs() >= candidates[1].dot(forward).abs() {
                candidates[0]
            } else {
                candidates[1]
            }
        }
    };
    (normal, normal.dot(origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use atelier_core::ObjectKind;
    use atelier_scene::{BuiltinAssets, TransformOwner};
    use atelier_store::EntityStore;

    const VIEWPORT: [f32; 2] = [1280.0, 720.0];

    struct Rig {
        store: EntityStore,
        graph: SceneGraph,
        camera: OrbitCamera,
        gizmo: TransformGizmo,
        id: EntityId,
    }

    impl Rig {
        fn new(kind: ObjectKind, tool: ToolMode) -> Self {
            let mut store = EntityStore::new();
            let id = store.add_entity(kind);
            store.set_tool_mode(tool);
            let mut graph = SceneGraph::new();
            graph.reconcile(&store, &BuiltinAssets::new());
            let mut gizmo = TransformGizmo::new(GizmoConfig::default());
            gizmo.attach(store.selected_id(), store.tool_mode());
            Self {
                store,
                graph,
                camera: OrbitCamera::from_config(&CameraConfig::default(), VIEWPORT[0] / VIEWPORT[1]),
                gizmo,
                id,
            }
        }

        fn origin(&self) -> glam::Vec3 {
            self.graph.transform(self.id).unwrap().position.into()
        }

        fn screen(&self, p: glam::Vec3) -> [f32; 2] {
            world_to_screen(&self.camera, VIEWPORT, p).unwrap()
        }

        fn grab(&mut self, axis: GizmoAxis) -> [f32; 2] {
            let anchor = self.gizmo.handle_anchor(&self.camera, axis, self.origin()).unwrap();
            let [x, y] = self.screen(anchor);
            assert_eq!(self.gizmo.pick(&self.camera, VIEWPORT, x, y, self.origin()), Some(axis));
            self.gizmo
                .begin_drag(axis, &mut self.camera, &mut self.graph, VIEWPORT, x, y)
                .unwrap();
            [x, y]
        }
    }

    #[test]
    fn test_attach_follows_selection_and_tool() {
        let mut gizmo = TransformGizmo::new(GizmoConfig::default());
        let id = EntityId::from_raw(7);
        assert_eq!(gizmo.state(), GizmoState::Detached);

        gizmo.attach(Some(id), ToolMode::Select);
        assert_eq!(gizmo.state(), GizmoState::Detached);

        gizmo.attach(Some(id), ToolMode::Rotate);
        assert_eq!(gizmo.state(), GizmoState::AttachedIdle);
        assert_eq!(gizmo.mode(), Some(DragMode::Rotate));

        gizmo.attach(None, ToolMode::Rotate);
        assert_eq!(gizmo.state(), GizmoState::Detached);
    }

    #[test]
    fn test_pick_each_translate_handle() {
        let rig = Rig::new(ObjectKind::Lamp, ToolMode::Move);
        for axis in TRANSLATE_HANDLES {
            let anchor = rig.gizmo.handle_anchor(&rig.camera, axis, rig.origin()).unwrap();
            let [x, y] = rig.screen(anchor);
            assert_eq!(rig.gizmo.pick(&rig.camera, VIEWPORT, x, y, rig.origin()), Some(axis));
        }
    }

    #[test]
    fn test_pick_each_ring() {
        let rig = Rig::new(ObjectKind::Lamp, ToolMode::Rotate);
        for axis in AXIS_HANDLES {
            let anchor = rig.gizmo.handle_anchor(&rig.camera, axis, rig.origin()).unwrap();
            let [x, y] = rig.screen(anchor);
            assert_eq!(rig.gizmo.pick(&rig.camera, VIEWPORT, x, y, rig.origin()), Some(axis));
        }
    }

    #[test]
    fn test_pick_misses_far_from_gizmo() {
        let rig = Rig::new(ObjectKind::Lamp, ToolMode::Move);
        assert_eq!(rig.gizmo.pick(&rig.camera, VIEWPORT, 5.0, 5.0, rig.origin()), None);
    }

    #[test]
    fn test_translate_drag_writes_node_not_store() {
        let mut rig = Rig::new(ObjectKind::GenericBox, ToolMode::Move);
        let start = rig.store.get(rig.id).unwrap().transform();
        let anchor = rig.gizmo.handle_anchor(&rig.camera, GizmoAxis::X, rig.origin()).unwrap();
        rig.grab(GizmoAxis::X);

        assert_eq!(rig.gizmo.state(), GizmoState::Dragging);
        assert!(!rig.camera.pointer_input_enabled());
        assert_eq!(rig.graph.owner(rig.id), Some(TransformOwner::OwnedByDragSession));

        let [x, y] = rig.screen(anchor + glam::Vec3::X);
        let live = rig
            .gizmo
            .handle_drag(&rig.camera, &mut rig.graph, VIEWPORT, x, y)
            .unwrap()
            .unwrap();

        assert!((live.position.x - 1.0).abs() < 1e-3);
        assert_eq!(live.position.y, start.position.y);
        assert_eq!(live.position.z, start.position.z);
        assert_eq!(rig.graph.transform(rig.id), Some(live));
        assert_eq!(rig.store.get(rig.id).unwrap().transform(), start);

        let commit = rig.gizmo.end_drag(&mut rig.camera, &mut rig.graph).unwrap();
        assert_eq!(commit.transform, live);
        assert_eq!(commit.start, start);
        assert!(rig.camera.pointer_input_enabled());
        assert_eq!(rig.gizmo.state(), GizmoState::AttachedIdle);
        assert_eq!(rig.graph.owner(rig.id), Some(TransformOwner::OwnedByStore));
    }

    #[test]
    fn test_rotate_drag_sweeps_ring_angle() {
        let mut rig = Rig::new(ObjectKind::Chair, ToolMode::Rotate);
        rig.grab(GizmoAxis::Y);

        let target = rig
            .gizmo
            .ring_point(&rig.camera, GizmoAxis::Y, rig.origin(), 0.5)
            .unwrap();
        let [x, y] = rig.screen(target);
        let live = rig
            .gizmo
            .handle_drag(&rig.camera, &mut rig.graph, VIEWPORT, x, y)
            .unwrap()
            .unwrap();

        assert!((live.rotation.y - 0.5).abs() < 1e-3);
        assert_eq!(live.rotation.x, 0.0);
        assert_eq!(live.rotation.z, 0.0);
        assert_eq!(live.position, rig.store.get(rig.id).unwrap().position);
    }

    #[test]
    fn test_second_drag_is_rejected() {
        let mut rig = Rig::new(ObjectKind::Lamp, ToolMode::Move);
        let [x, y] = rig.grab(GizmoAxis::Y);

        let err = rig
            .gizmo
            .begin_drag(GizmoAxis::X, &mut rig.camera, &mut rig.graph, VIEWPORT, x, y)
            .unwrap_err();
        assert!(matches!(err, AtelierError::DragInProgress(id) if id == rig.id));
        assert_eq!(rig.gizmo.session().unwrap().axis(), GizmoAxis::Y);
    }

    #[test]
    fn test_rotate_mode_rejects_plane_handles() {
        let mut rig = Rig::new(ObjectKind::Lamp, ToolMode::Rotate);
        let err = rig
            .gizmo
            .begin_drag(GizmoAxis::XY, &mut rig.camera, &mut rig.graph, VIEWPORT, 0.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, AtelierError::InvalidEnumValue { .. }));
        assert!(rig.camera.pointer_input_enabled());
    }

    #[test]
    fn test_press_above_horizon_does_not_engage() {
        // The top edge of the view looks above the horizon, so its ray never
        // reaches a horizontal plane through the object
        for (tool, axis) in [(ToolMode::Move, GizmoAxis::XZ), (ToolMode::Rotate, GizmoAxis::Y)] {
            let mut rig = Rig::new(ObjectKind::Chair, tool);
            let err = rig
                .gizmo
                .begin_drag(axis, &mut rig.camera, &mut rig.graph, VIEWPORT, VIEWPORT[0] / 2.0, 0.0)
                .unwrap_err();

            assert!(matches!(err, AtelierError::DragPlaneMissed(id) if id == rig.id));
            assert!(rig.gizmo.session().is_none());
            assert_eq!(rig.gizmo.state(), GizmoState::AttachedIdle);
            assert_eq!(rig.graph.owner(rig.id), Some(TransformOwner::OwnedByStore));
            assert!(rig.camera.pointer_input_enabled());
        }
    }

    #[test]
    fn test_detached_gizmo_cannot_drag() {
        let mut rig = Rig::new(ObjectKind::Lamp, ToolMode::Select);
        let err = rig
            .gizmo
            .begin_drag(GizmoAxis::X, &mut rig.camera, &mut rig.graph, VIEWPORT, 0.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, AtelierError::GizmoDetached));
    }

    #[test]
    fn test_cancel_restores_start_pose() {
        let mut rig = Rig::new(ObjectKind::Table, ToolMode::Move);
        let start = rig.graph.transform(rig.id).unwrap();
        let anchor = rig.gizmo.handle_anchor(&rig.camera, GizmoAxis::XZ, rig.origin()).unwrap();
        rig.grab(GizmoAxis::XZ);

        let [x, y] = rig.screen(anchor + glam::Vec3::new(0.5, 0.0, -0.5));
        rig.gizmo
            .handle_drag(&rig.camera, &mut rig.graph, VIEWPORT, x, y)
            .unwrap();
        assert_ne!(rig.graph.transform(rig.id), Some(start));

        assert_eq!(rig.gizmo.cancel_drag(&mut rig.camera, &mut rig.graph).unwrap(), rig.id);
        assert_eq!(rig.graph.transform(rig.id), Some(start));
        assert!(rig.camera.pointer_input_enabled());
        assert!(matches!(
            rig.gizmo.end_drag(&mut rig.camera, &mut rig.graph),
            Err(AtelierError::NoDragSession)
        ));
    }

    #[test]
    fn test_retarget_ignored_while_dragging() {
        let mut rig = Rig::new(ObjectKind::Lamp, ToolMode::Move);
        rig.grab(GizmoAxis::X);
        rig.gizmo.attach(None, ToolMode::Select);
        assert_eq!(rig.gizmo.state(), GizmoState::Dragging);
        assert_eq!(rig.gizmo.target(), Some(rig.id));
    }

    #[test]
    fn test_axis_from_str() {
        assert_eq!("xz".parse::<GizmoAxis>().unwrap(), GizmoAxis::XZ);
        assert!("w".parse::<GizmoAxis>().is_err());
    }
}
