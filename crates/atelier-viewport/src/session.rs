//! Drag session: the transient record of one gizmo manipulation

use crate::gizmo::GizmoAxis;
use crate::projection::{ray_plane_intersect, Ray};
use atelier_core::{EntityId, Transform};
use atelier_scene::NodeHandle;
use atelier_store::{ToolMode, TransformPatch};
use serde::Serialize;
use std::f32::consts::{PI, TAU};

/// What a drag changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    Translate,
    Rotate,
}

impl DragMode {
    /// The manipulation a tool mode offers, if any
    pub fn from_tool(mode: ToolMode) -> Option<Self> {
        match mode {
            ToolMode::Select => None,
            ToolMode::Move => Some(DragMode::Translate),
            ToolMode::Rotate => Some(DragMode::Rotate),
        }
    }
}

/// How pointer rays map to the live pose
#[derive(Debug, Clone, Copy)]
pub(crate) enum DragConstraint {
    /// Pointer rays hit a fixed plane; the hit offset is masked to the handle's axes
    Plane {
        normal: glam::Vec3,
        d: f32,
        start_hit: glam::Vec3,
    },
    /// Pointer rays hit the ring's plane; the swept angle accumulates per event
    Ring {
        center: glam::Vec3,
        last_angle: f32,
        swept: f32,
    },
}

/// One step of tracking, applied only once the node accepted the pose
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragStep {
    pub transform: Transform,
    pub constraint: DragConstraint,
}

/// A single open manipulation
///
/// Holds the pose the node had when the drag began, so cancel can restore it,
/// and the live pose most recently written to the node.
#[derive(Debug, Clone)]
pub struct DragSession {
    entity_id: EntityId,
    node: NodeHandle,
    axis: GizmoAxis,
    mode: DragMode,
    start: Transform,
    live: Transform,
    constraint: DragConstraint,
}

impl DragSession {
    pub(crate) fn new(
        entity_id: EntityId,
        node: NodeHandle,
        axis: GizmoAxis,
        mode: DragMode,
        start: Transform,
        constraint: DragConstraint,
    ) -> Self {
        Self {
            entity_id,
            node,
            axis,
            mode,
            start,
            live: start,
            constraint,
        }
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn node(&self) -> NodeHandle {
        self.node
    }

    pub fn axis(&self) -> GizmoAxis {
        self.axis
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn start_transform(&self) -> Transform {
        self.start
    }

    pub fn live_transform(&self) -> Transform {
        self.live
    }

    /// Pose for a new pointer ray. None when the ray misses the constraint plane.
    pub(crate) fn track(&self, ray: &Ray) -> Option<DragStep> {
        match self.constraint {
            DragConstraint::Plane {
                normal,
                d,
                start_hit,
            } => {
                let hit = ray_plane_intersect(ray, normal, d)?;
                let offset = (hit - start_hit) * self.axis.mask();
                let position = glam::Vec3::from(self.start.position) + offset;
                Some(DragStep {
                    transform: Transform {
                        position: position.into(),
                        ..self.live
                    },
                    constraint: self.constraint,
                })
            }
            DragConstraint::Ring {
                center,
                last_angle,
                swept,
            } => {
                let index = self.axis.index()?;
                let normal = self.axis.direction();
                let hit = ray_plane_intersect(ray, normal, normal.dot(center))?;
                let angle = self.axis.ring_angle(center, hit)?;
                let swept = swept + wrap_angle(angle - last_angle);
                let rotation = self
                    .start
                    .rotation
                    .with_axis(index, self.start.rotation.axis(index) + swept);
                Some(DragStep {
                    transform: Transform {
                        rotation,
                        ..self.live
                    },
                    constraint: DragConstraint::Ring {
                        center,
                        last_angle: angle,
                        swept,
                    },
                })
            }
        }
    }

    pub(crate) fn advance(&mut self, step: DragStep) {
        self.live = step.transform;
        self.constraint = step.constraint;
    }
}

/// The outcome of a finished drag, ready to write to the store
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragCommit {
    pub entity_id: EntityId,
    pub mode: DragMode,
    pub start: Transform,
    /// The node's pose at release
    pub transform: Transform,
}

impl DragCommit {
    /// Only the field the drag manipulated
    pub fn patch(&self) -> TransformPatch {
        match self.mode {
            DragMode::Translate => TransformPatch::new().with_position(self.transform.position),
            DragMode::Rotate => TransformPatch::new().with_rotation(self.transform.rotation),
        }
    }

    pub fn moved(&self) -> bool {
        self.start != self.transform
    }
}

/// Wrap an angle difference into (-PI, PI]
pub(crate) fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::Vec3;

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-5);
        assert!((wrap_angle(PI + 0.5) - (0.5 - PI)).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
    }

    #[test]
    fn test_commit_patch_touches_one_field() {
        let start = Transform::from_position(Vec3::new(0.0, 0.5, 0.0));
        let moved = Transform::from_position(Vec3::new(1.0, 0.5, 0.0))
            .with_rotation(Vec3::new(0.0, 9.0, 0.0));

        let commit = DragCommit {
            entity_id: EntityId::from_raw(1),
            mode: DragMode::Translate,
            start,
            transform: moved,
        };
        let patch = commit.patch();
        assert_eq!(patch.position, Some(Vec3::new(1.0, 0.5, 0.0)));
        assert_eq!(patch.rotation, None);
        assert_eq!(patch.scale, None);
        assert!(commit.moved());

        let commit = DragCommit {
            mode: DragMode::Rotate,
            ..commit
        };
        let patch = commit.patch();
        assert_eq!(patch.position, None);
        assert_eq!(patch.rotation, Some(Vec3::new(0.0, 9.0, 0.0)));
    }

    #[test]
    fn test_drag_mode_from_tool() {
        assert_eq!(DragMode::from_tool(ToolMode::Select), None);
        assert_eq!(DragMode::from_tool(ToolMode::Move), Some(DragMode::Translate));
        assert_eq!(DragMode::from_tool(ToolMode::Rotate), Some(DragMode::Rotate));
    }
}
