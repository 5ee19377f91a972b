//! Per-frame snapshot handed to a renderer

use crate::camera::OrbitCamera;
use crate::gizmo::GizmoView;
use atelier_core::lighting::{LightingParams, ROOM_DEPTH, ROOM_HEIGHT, ROOM_WIDTH};
use atelier_core::{EntityId, Vec3};
use atelier_scene::NodeView;
use atelier_store::ToolMode;
use serde::Serialize;

/// Everything needed to draw one frame. Built by reading editor state only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Store revision the nodes reflect
    pub revision: u64,
    pub tool_mode: ToolMode,
    pub selected: Option<EntityId>,
    pub camera: CameraView,
    /// Nodes in store order
    pub nodes: Vec<FrameNode>,
    pub gizmo: Option<GizmoView>,
    pub lighting: LightingParams,
    pub room: RoomView,
}

impl Frame {
    pub fn node(&self, id: EntityId) -> Option<&FrameNode> {
        self.nodes.iter().find(|n| n.node.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Column-major view-projection matrix
    pub view_projection: [f32; 16],
    pub pointer_input_enabled: bool,
}

impl CameraView {
    pub fn from_camera(camera: &OrbitCamera) -> Self {
        Self {
            position: camera.position().into(),
            target: camera.target().into(),
            fov: camera.fov(),
            view_projection: camera.view_projection_matrix().to_cols_array(),
            pointer_input_enabled: camera.pointer_input_enabled(),
        }
    }
}

/// A node as displayed, with its selection highlight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameNode {
    #[serde(flatten)]
    pub node: NodeView,
    pub selected: bool,
}

/// Room shell extents. The room is scenery: never pickable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomView {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

impl Default for RoomView {
    fn default() -> Self {
        Self {
            width: ROOM_WIDTH,
            depth: ROOM_DEPTH,
            height: ROOM_HEIGHT,
        }
    }
}
