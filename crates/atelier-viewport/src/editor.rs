//! Editor - the single-threaded coordinator
//!
//! Owns every state container and routes commands and pointer events between
//! them in arrival order. Each mutating call leaves the scene graph reconciled
//! with the store before it returns, so reads between calls never observe a
//! half-applied change.

use crate::camera::OrbitCamera;
use crate::config::EditorConfig;
use crate::frame::{CameraView, Frame, FrameNode, RoomView};
use crate::gizmo::{GizmoAxis, TransformGizmo};
use crate::picking::{self, PickResult};
use crate::projection::{screen_to_world_ray, world_to_screen};
use crate::session::DragCommit;
use atelier_core::{AtelierError, EntityId, ObjectKind, PresentationSettings, Result, Transform};
use atelier_scene::{AssetSource, SceneGraph};
use atelier_store::{Entity, EntityStore, ToolMode, TransformPatch};
use serde::Serialize;

/// What a pointer event did
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PointerOutcome {
    /// A gizmo handle was grabbed and a drag session opened
    DragStarted { entity_id: EntityId, axis: GizmoAxis },
    /// A node was hit and selected
    Selected { entity_id: EntityId },
    /// Empty space was hit; the selection was cleared
    Deselected,
    /// The drag session wrote a new live pose
    Dragged { transform: Transform },
    /// The camera orbit consumed the move
    Orbiting,
    /// Pointer hovering; the handle under it, if any
    Hover { axis: Option<GizmoAxis> },
    /// The drag was released and written to the store
    Committed { commit: DragCommit },
    /// The drag was aborted and the node restored
    Cancelled { entity_id: EntityId },
    /// Nothing to do
    Idle,
}

/// The editor session
pub struct Editor {
    store: EntityStore,
    graph: SceneGraph,
    gizmo: TransformGizmo,
    camera: OrbitCamera,
    presentation: PresentationSettings,
    assets: Box<dyn AssetSource>,
    viewport: [f32; 2],
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        let viewport = [
            config.viewport.width.max(1.0),
            config.viewport.height.max(1.0),
        ];
        Self {
            store: EntityStore::new(),
            graph: SceneGraph::new(),
            gizmo: TransformGizmo::new(config.gizmo.clone()),
            camera: OrbitCamera::from_config(&config.camera, viewport[0] / viewport[1]),
            presentation: config.presentation.clone(),
            assets: Box::new(config.assets()),
            viewport,
        }
    }

    /// Replace the asset source. Existing nodes keep their renderables.
    pub fn with_assets(mut self, assets: impl AssetSource + 'static) -> Self {
        self.assets = Box::new(assets);
        self
    }

    // --- Commands ---

    /// Place an object with its kind defaults; it becomes selected under the
    /// move tool. Refused while dragging, since it moves the selection.
    pub fn add_object(&mut self, kind: ObjectKind) -> Result<EntityId> {
        self.refuse_while_dragging()?;
        let id = self.store.add_entity(kind);
        self.sync();
        Ok(id)
    }

    /// Remove an object. An open drag on it is cancelled first.
    pub fn remove_object(&mut self, id: EntityId) -> Option<Entity> {
        if self.gizmo.session().map(|s| s.entity_id()) == Some(id) {
            if let Err(e) = self.gizmo.cancel_drag(&mut self.camera, &mut self.graph) {
                log::warn!("Cancelling drag on removed {}: {}", id, e);
            }
        }
        let removed = self.store.remove_entity(id);
        self.sync();
        removed
    }

    /// Set or clear the selection, e.g. from a scene list. Refused while dragging.
    pub fn select(&mut self, id: Option<EntityId>) -> Result<()> {
        self.refuse_while_dragging()?;
        self.store.select(id);
        self.sync();
        Ok(())
    }

    /// Switch tools. Refused while dragging.
    pub fn set_tool_mode(&mut self, mode: ToolMode) -> Result<()> {
        self.refuse_while_dragging()?;
        self.store.set_tool_mode(mode);
        self.sync();
        Ok(())
    }

    /// Put the selection back at its default spot. Refused while dragging.
    pub fn reset_selected(&mut self) -> Result<()> {
        self.refuse_while_dragging()?;
        self.store.reset_selected();
        self.sync();
        Ok(())
    }

    /// Numeric edit from the object panel. Unknown ids are a no-op.
    ///
    /// Allowed during a drag: the store takes the patch at once, while the
    /// dragged node keeps its live pose until release.
    pub fn update_object(&mut self, id: EntityId, patch: &TransformPatch) {
        self.store.update_transform(id, patch);
        self.sync();
    }

    pub fn presentation(&self) -> &PresentationSettings {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut PresentationSettings {
        &mut self.presentation
    }

    // --- Pointer input ---

    /// Primary button pressed at a viewport pixel.
    ///
    /// Gizmo handles take precedence, then nodes, then empty space. A press
    /// that does not grab a handle also starts a camera orbit.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<PointerOutcome> {
        self.refuse_while_dragging()?;

        if let Some(origin) = self.gizmo_origin() {
            if let Some(axis) = self.gizmo.pick(&self.camera, self.viewport, x, y, origin) {
                self.gizmo
                    .begin_drag(axis, &mut self.camera, &mut self.graph, self.viewport, x, y)?;
                let entity_id = self.gizmo.session().map(|s| s.entity_id());
                return Ok(match entity_id {
                    Some(entity_id) => PointerOutcome::DragStarted { entity_id, axis },
                    None => PointerOutcome::Idle,
                });
            }
        }

        let ray = screen_to_world_ray(&self.camera, self.viewport, x, y);
        let pick = picking::resolve(&ray, &self.graph);
        self.store.select(pick.selection());
        self.sync();
        self.camera.begin_orbit(x, y);

        Ok(match pick {
            PickResult::Node { id, .. } => PointerOutcome::Selected { entity_id: id },
            PickResult::Empty => PointerOutcome::Deselected,
        })
    }

    /// Pointer moved to a viewport pixel
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<PointerOutcome> {
        if self.gizmo.is_dragging() {
            let live = self
                .gizmo
                .handle_drag(&self.camera, &mut self.graph, self.viewport, x, y)?;
            return Ok(match live {
                Some(transform) => PointerOutcome::Dragged { transform },
                None => PointerOutcome::Idle,
            });
        }

        if self.camera.orbit_to(x, y, self.viewport[1]) {
            return Ok(PointerOutcome::Orbiting);
        }

        let axis = match self.gizmo_origin() {
            Some(origin) => self
                .gizmo
                .update_hover(&self.camera, self.viewport, x, y, origin),
            None => None,
        };
        Ok(PointerOutcome::Hover { axis })
    }

    /// Primary button released. Commits an open drag.
    pub fn pointer_up(&mut self) -> Result<PointerOutcome> {
        self.camera.end_orbit();
        if !self.gizmo.is_dragging() {
            return Ok(PointerOutcome::Idle);
        }
        let commit = self.gizmo.end_drag(&mut self.camera, &mut self.graph)?;
        // Store write and reconciliation complete before anyone reads again
        self.store.update_transform(commit.entity_id, &commit.patch());
        self.sync();
        log::debug!("Committed {:?} on {}", commit.mode, commit.entity_id);
        Ok(PointerOutcome::Committed { commit })
    }

    /// Escape: abort an open drag, leaving the store untouched
    pub fn cancel(&mut self) -> Result<PointerOutcome> {
        if !self.gizmo.is_dragging() {
            return Ok(PointerOutcome::Idle);
        }
        let entity_id = self.gizmo.cancel_drag(&mut self.camera, &mut self.graph)?;
        self.sync();
        Ok(PointerOutcome::Cancelled { entity_id })
    }

    /// Wheel steps; positive zooms in
    pub fn wheel(&mut self, steps: f32) {
        self.camera.zoom(steps);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if width >= 1.0 && height >= 1.0 {
            self.viewport = [width, height];
            self.camera.set_aspect(width / height);
        }
    }

    /// Advance camera inertia by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> bool {
        self.camera.update(dt)
    }

    // --- Reads ---

    /// Sample the current state for rendering
    pub fn frame(&self) -> Frame {
        let selected = self.store.selected_id();
        let nodes = self
            .store
            .entities()
            .iter()
            .filter_map(|entity| self.graph.view(entity.id))
            .map(|node| FrameNode {
                selected: Some(node.id) == selected,
                node,
            })
            .collect();

        Frame {
            revision: self.store.revision(),
            tool_mode: self.store.effective_tool_mode(),
            selected,
            camera: CameraView::from_camera(&self.camera),
            nodes,
            gizmo: self.gizmo.view(&self.camera, &self.graph),
            lighting: self.presentation.lighting(),
            room: RoomView::default(),
        }
    }

    /// The transform currently displayed for an object: the live session pose
    /// while it is dragged, its stored transform otherwise
    pub fn rendered_transform(&self, id: EntityId) -> Option<Transform> {
        self.graph.transform(id)
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn gizmo(&self) -> &TransformGizmo {
        &self.gizmo
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    /// Project a world point to viewport pixels
    pub fn world_to_screen(&self, point: glam::Vec3) -> Option<[f32; 2]> {
        world_to_screen(&self.camera, self.viewport, point)
    }

    /// Where the gizmo sits, if it is attached and its node exists
    pub fn gizmo_origin(&self) -> Option<glam::Vec3> {
        let id = self.gizmo.target()?;
        Some(self.graph.transform(id)?.position.into())
    }

    /// World point where a handle of the attached gizmo is grabbed
    pub fn handle_anchor(&self, axis: GizmoAxis) -> Option<glam::Vec3> {
        self.gizmo
            .handle_anchor(&self.camera, axis, self.gizmo_origin()?)
    }

    /// World point on a rotate ring, `offset` radians past its grab point
    pub fn ring_point(&self, axis: GizmoAxis, offset: f32) -> Option<glam::Vec3> {
        self.gizmo
            .ring_point(&self.camera, axis, self.gizmo_origin()?, offset)
    }

    fn refuse_while_dragging(&self) -> Result<()> {
        match self.gizmo.session() {
            Some(session) => {
                log::warn!("Refused: drag in progress on {}", session.entity_id());
                Err(AtelierError::DragInProgress(session.entity_id()))
            }
            None => Ok(()),
        }
    }

    /// Bring the graph and gizmo in line with the store
    fn sync(&mut self) {
        if self.graph.needs_reconcile(&self.store) {
            let stats = self.graph.reconcile(&self.store, self.assets.as_ref());
            log::debug!(
                "Reconciled revision {}: {} spawned, {} updated, {} removed, {} held by drag",
                self.store.revision(),
                stats.spawned,
                stats.updated,
                stats.removed,
                stats.skipped
            );
        }
        self.gizmo
            .attach(self.store.selected_id(), self.store.effective_tool_mode());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gizmo::GizmoState;
    use atelier_core::{Color, Vec3};
    use atelier_scene::TransformOwner;

    fn editor() -> Editor {
        Editor::new(&EditorConfig::default())
    }

    fn screen(editor: &Editor, p: glam::Vec3) -> [f32; 2] {
        editor.world_to_screen(p).unwrap()
    }

    /// Press on a handle's anchor and return the anchor
    fn grab(editor: &mut Editor, axis: GizmoAxis) -> glam::Vec3 {
        let anchor = editor.handle_anchor(axis).unwrap();
        let [x, y] = screen(editor, anchor);
        let outcome = editor.pointer_down(x, y).unwrap();
        assert!(matches!(outcome, PointerOutcome::DragStarted { axis: a, .. } if a == axis));
        anchor
    }

    fn move_to(editor: &mut Editor, p: glam::Vec3) -> PointerOutcome {
        let [x, y] = screen(editor, p);
        editor.pointer_move(x, y).unwrap()
    }

    #[test]
    fn test_add_lamp() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::Lamp).unwrap();

        let lamp = editor.store().get(id).unwrap();
        assert_eq!(lamp.footprint, Vec3::new(0.3, 1.6, 0.3));
        assert_eq!(lamp.position.y, 0.8);
        assert_eq!(lamp.color, Color::from_hex(0xf4e7c5));
        assert_eq!(lamp.rotation, Vec3::ZERO);
        assert_eq!(lamp.scale, Vec3::ONE);
        assert_eq!(editor.store().selected_id(), Some(id));
        assert_eq!(editor.store().tool_mode(), ToolMode::Move);

        // Pickable and gizmo-attached as soon as the call returns
        assert!(editor.graph().node(id).is_some());
        assert_eq!(editor.gizmo().state(), GizmoState::AttachedIdle);
    }

    #[test]
    fn test_reset_lamp_scenario() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::Lamp).unwrap();
        editor.update_object(
            id,
            &TransformPatch::new()
                .with_position(Vec3::new(2.0, 2.0, 2.0))
                .with_rotation(Vec3::new(1.0, 1.0, 1.0))
                .with_scale(Vec3::new(3.0, 3.0, 3.0)),
        );

        editor.reset_selected().unwrap();

        let lamp = editor.store().get(id).unwrap();
        assert_eq!(lamp.position, Vec3::new(0.0, 0.8, 0.0));
        assert_eq!(lamp.rotation, Vec3::ZERO);
        assert_eq!(lamp.scale, Vec3::ONE);
        assert_eq!(lamp.footprint, Vec3::new(0.3, 1.6, 0.3));
        assert_eq!(editor.rendered_transform(id), Some(lamp.transform()));
    }

    #[test]
    fn test_update_unknown_id_changes_nothing() {
        let mut editor = editor();
        editor.add_object(ObjectKind::Chair).unwrap();
        editor.add_object(ObjectKind::Rug).unwrap();
        let before = editor.store().entities().to_vec();

        editor.update_object(
            EntityId::from_raw(u64::MAX),
            &TransformPatch::new().with_position(Vec3::new(5.0, 5.0, 5.0)),
        );

        assert_eq!(editor.store().entities(), before.as_slice());
    }

    #[test]
    fn test_click_on_node_selects_it_over_background() {
        let mut editor = editor();
        let rug = editor.add_object(ObjectKind::Rug).unwrap();
        let chair = editor.add_object(ObjectKind::Chair).unwrap();
        editor.update_object(chair, &TransformPatch::new().with_position(Vec3::new(-2.0, 0.45, 1.0)));
        // No gizmo in the way
        editor.set_tool_mode(ToolMode::Select).unwrap();

        let [x, y] = screen(&editor, glam::Vec3::new(0.6, 0.04, 0.4));
        let outcome = editor.pointer_down(x, y).unwrap();
        assert_eq!(outcome, PointerOutcome::Selected { entity_id: rug });
        assert_eq!(editor.store().selected_id(), Some(rug));
        editor.pointer_up().unwrap();

        // Empty floor clears the selection
        let [x, y] = screen(&editor, glam::Vec3::new(3.0, 0.0, -3.0));
        assert_eq!(editor.pointer_down(x, y).unwrap(), PointerOutcome::Deselected);
        assert_eq!(editor.store().selected_id(), None);
        assert_eq!(editor.frame().tool_mode, ToolMode::Select);
    }

    #[test]
    fn test_translate_drag_commits_live_value() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::GenericBox).unwrap();
        let stored = editor.store().get(id).unwrap().transform();

        let anchor = grab(&mut editor, GizmoAxis::X);
        assert_eq!(editor.graph().owner(id), Some(TransformOwner::OwnedByDragSession));

        move_to(&mut editor, anchor + glam::Vec3::new(0.4, 0.0, 0.0));
        let outcome = move_to(&mut editor, anchor + glam::Vec3::new(1.0, 0.0, 0.0));
        let PointerOutcome::Dragged { transform: live } = outcome else {
            panic!("expected a drag step, got {:?}", outcome);
        };

        // Rendered follows the live pose; the store has not moved
        assert_eq!(editor.rendered_transform(id), Some(live));
        assert_eq!(editor.store().get(id).unwrap().transform(), stored);
        assert!((live.position.x - 1.0).abs() < 1e-3);

        let outcome = editor.pointer_up().unwrap();
        assert!(matches!(outcome, PointerOutcome::Committed { .. }));

        let committed = editor.store().get(id).unwrap();
        assert_eq!(committed.position, live.position);
        assert_eq!(editor.rendered_transform(id), Some(committed.transform()));
        assert_eq!(editor.graph().owner(id), Some(TransformOwner::OwnedByStore));
    }

    #[test]
    fn test_rotate_drag_commits_rotation_only() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::Table).unwrap();
        editor.set_tool_mode(ToolMode::Rotate).unwrap();
        let position = editor.store().get(id).unwrap().position;

        grab(&mut editor, GizmoAxis::Y);
        let target = editor.ring_point(GizmoAxis::Y, 0.5).unwrap();
        move_to(&mut editor, target);
        editor.pointer_up().unwrap();

        let table = editor.store().get(id).unwrap();
        assert!((table.rotation.y - 0.5).abs() < 1e-3);
        assert_eq!(table.position, position);
    }

    #[test]
    fn test_camera_gate_spans_drag_exactly() {
        let mut editor = editor();
        editor.add_object(ObjectKind::Lamp).unwrap();
        assert!(editor.camera().pointer_input_enabled());

        let anchor = grab(&mut editor, GizmoAxis::Y);
        assert!(!editor.camera().pointer_input_enabled());
        assert!(!editor.frame().camera.pointer_input_enabled);

        move_to(&mut editor, anchor + glam::Vec3::new(0.0, 0.3, 0.0));
        assert!(!editor.camera().pointer_input_enabled());

        editor.pointer_up().unwrap();
        assert!(editor.camera().pointer_input_enabled());

        grab(&mut editor, GizmoAxis::Y);
        assert!(!editor.camera().pointer_input_enabled());
        editor.cancel().unwrap();
        assert!(editor.camera().pointer_input_enabled());
    }

    #[test]
    fn test_camera_does_not_orbit_during_drag() {
        let mut editor = editor();
        editor.add_object(ObjectKind::Lamp).unwrap();
        let before = editor.camera().position();

        let anchor = grab(&mut editor, GizmoAxis::X);
        move_to(&mut editor, anchor + glam::Vec3::new(1.5, 0.0, 0.0));
        editor.wheel(5.0);
        for _ in 0..30 {
            editor.tick(1.0 / 60.0);
        }
        assert_eq!(editor.camera().position(), before);
        editor.pointer_up().unwrap();
    }

    #[test]
    fn test_only_one_drag_session() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::Lamp).unwrap();
        let anchor = grab(&mut editor, GizmoAxis::X);

        let [x, y] = screen(&editor, anchor);
        let err = editor.pointer_down(x, y).unwrap_err();
        assert!(matches!(err, AtelierError::DragInProgress(e) if e == id));
        assert_eq!(editor.gizmo().session().unwrap().axis(), GizmoAxis::X);
    }

    #[test]
    fn test_commands_refused_during_drag() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::Chair).unwrap();
        grab(&mut editor, GizmoAxis::Z);

        assert!(matches!(
            editor.set_tool_mode(ToolMode::Rotate),
            Err(AtelierError::DragInProgress(_))
        ));
        assert!(matches!(editor.reset_selected(), Err(AtelierError::DragInProgress(_))));
        assert!(matches!(editor.select(None), Err(AtelierError::DragInProgress(_))));
        assert_eq!(editor.store().tool_mode(), ToolMode::Move);
        assert_eq!(editor.store().selected_id(), Some(id));
    }

    #[test]
    fn test_add_object_refused_during_drag() {
        let mut editor = editor();
        let table = editor.add_object(ObjectKind::Table).unwrap();
        editor.set_tool_mode(ToolMode::Rotate).unwrap();
        grab(&mut editor, GizmoAxis::Y);

        assert!(matches!(
            editor.add_object(ObjectKind::Lamp),
            Err(AtelierError::DragInProgress(id)) if id == table
        ));
        assert_eq!(editor.store().entities().len(), 1);
        assert_eq!(editor.store().selected_id(), Some(table));
        assert_eq!(editor.store().effective_tool_mode(), ToolMode::Rotate);

        let frame = editor.frame();
        let gizmo = frame.gizmo.unwrap();
        assert_eq!(gizmo.entity_id, table);
        assert_eq!(frame.selected, Some(table));

        editor.pointer_up().unwrap();
        assert!(editor.add_object(ObjectKind::Lamp).is_ok());
    }

    #[test]
    fn test_cancel_restores_node_and_leaves_store() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::Lamp).unwrap();
        let stored = editor.store().get(id).unwrap().transform();
        let revision = editor.store().revision();

        let anchor = grab(&mut editor, GizmoAxis::XZ);
        move_to(&mut editor, anchor + glam::Vec3::new(1.0, 0.0, 1.0));
        assert_ne!(editor.rendered_transform(id), Some(stored));

        let outcome = editor.cancel().unwrap();
        assert_eq!(outcome, PointerOutcome::Cancelled { entity_id: id });
        assert_eq!(editor.rendered_transform(id), Some(stored));
        assert_eq!(editor.store().get(id).unwrap().transform(), stored);
        assert_eq!(editor.store().revision(), revision);

        // Release after cancel commits nothing
        assert_eq!(editor.pointer_up().unwrap(), PointerOutcome::Idle);
    }

    #[test]
    fn test_panel_edit_during_drag_does_not_fight_live_pose() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::GenericBox).unwrap();
        let anchor = grab(&mut editor, GizmoAxis::X);
        let PointerOutcome::Dragged { transform: live } =
            move_to(&mut editor, anchor + glam::Vec3::new(0.5, 0.0, 0.0))
        else {
            panic!("expected a drag step");
        };

        editor.update_object(
            id,
            &TransformPatch::new()
                .with_position(Vec3::new(-3.0, 0.5, 0.0))
                .with_color(Color::WHITE),
        );

        // The node keeps the live pose but picks up the new color
        assert_eq!(editor.rendered_transform(id), Some(live));
        assert_eq!(editor.graph().view(id).unwrap().color, Color::WHITE);

        editor.pointer_up().unwrap();
        assert_eq!(editor.store().get(id).unwrap().position, live.position);
    }

    #[test]
    fn test_removing_dragged_object_ends_drag() {
        let mut editor = editor();
        let id = editor.add_object(ObjectKind::Rug).unwrap();
        grab(&mut editor, GizmoAxis::X);

        assert!(editor.remove_object(id).is_some());
        assert!(!editor.gizmo().is_dragging());
        assert!(editor.camera().pointer_input_enabled());
        assert!(editor.graph().node(id).is_none());
        assert_eq!(editor.gizmo().state(), GizmoState::Detached);
    }

    #[test]
    fn test_frame_lists_nodes_in_store_order() {
        let mut editor = editor();
        let a = editor.add_object(ObjectKind::Table).unwrap();
        let b = editor.add_object(ObjectKind::Lamp).unwrap();

        let frame = editor.frame();
        let ids: Vec<_> = frame.nodes.iter().map(|n| n.node.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(frame.node(b).unwrap().selected);
        assert!(!frame.node(a).unwrap().selected);
        assert_eq!(frame.gizmo.as_ref().unwrap().entity_id, b);
        assert_eq!(frame.lighting.light_color, atelier_core::kelvin_to_color(4500.0));
    }

    #[test]
    fn test_orbit_drag_moves_camera_after_ticks() {
        let mut editor = editor();
        let before = editor.camera().position();

        assert_eq!(editor.pointer_down(100.0, 600.0).unwrap(), PointerOutcome::Deselected);
        assert_eq!(editor.pointer_move(220.0, 600.0).unwrap(), PointerOutcome::Orbiting);
        editor.pointer_up().unwrap();
        assert_eq!(editor.camera().position(), before);

        assert!(editor.tick(1.0 / 60.0));
        assert_ne!(editor.camera().position(), before);
    }
}
