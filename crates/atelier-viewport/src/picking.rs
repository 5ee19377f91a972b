//! Pointer picking via ray-AABB intersection
//!
//! Tests a screen ray against every node's footprint box (transformed by the
//! node's current pose) and turns the result into a selection command.

use crate::projection::Ray;
use atelier_core::{EntityId, Transform, Vec3};
use atelier_scene::SceneGraph;
use glam::Mat4;

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: glam::Vec3,
    pub max: glam::Vec3,
}

impl Aabb {
    /// Box centered on the origin with the given full extents
    pub fn from_footprint(footprint: Vec3) -> Self {
        let half = glam::Vec3::from(footprint) * 0.5;
        Self {
            min: -half,
            max: half,
        }
    }

    /// Bounds of this box after transforming it by `mat`.
    /// Uses the standard AABB-from-transformed-AABB technique.
    pub fn transformed(&self, mat: &Mat4) -> Self {
        let translation = mat.w_axis.truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for (i, column) in [mat.x_axis, mat.y_axis, mat.z_axis].iter().enumerate() {
            let a = column.truncate() * self.min[i];
            let b = column.truncate() * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }
}

/// Node with its world-space bounds
#[derive(Debug, Clone)]
pub struct PickTarget {
    pub entity_id: EntityId,
    pub aabb: Aabb,
}

impl PickTarget {
    pub fn new(entity_id: EntityId, transform: &Transform, footprint: Vec3) -> Self {
        Self {
            entity_id,
            aabb: Aabb::from_footprint(footprint).transformed(&transform.to_matrix()),
        }
    }
}

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickResult {
    /// The nearest node under the pointer
    Node { id: EntityId, distance: f32 },
    /// Nothing but room and background
    Empty,
}

impl PickResult {
    /// The selection this pick asks for. A node hit is consumed by the node, so
    /// it never also reaches the background's deselect.
    pub fn selection(&self) -> Option<EntityId> {
        match self {
            PickResult::Node { id, .. } => Some(*id),
            PickResult::Empty => None,
        }
    }
}

/// Ray-AABB intersection using the slab method (Kay/Kajiya).
/// Returns the distance along the ray to the nearest hit, or None if no intersection.
pub fn ray_intersect(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for i in 0..3 {
        let origin = ray.origin[i];
        let direction = ray.direction[i];
        if direction.abs() < 1e-8 {
            // Ray is parallel to this slab
            if origin < aabb.min[i] || origin > aabb.max[i] {
                return None;
            }
        } else {
            let inv_d = 1.0 / direction;
            let mut t1 = (aabb.min[i] - origin) * inv_d;
            let mut t2 = (aabb.max[i] - origin) * inv_d;

            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            tmin = tmin.max(t1);
            tmax = tmax.min(t2);

            if tmin > tmax {
                return None;
            }
        }
    }

    // Box entirely behind the ray
    if tmax < 0.0 {
        return None;
    }

    // Origin inside the box reports distance zero
    Some(tmin.max(0.0))
}

/// Bounds for every node in the graph, at its currently displayed pose
pub fn build_pick_targets(graph: &SceneGraph) -> Vec<PickTarget> {
    graph
        .nodes()
        .iter()
        .map(|node| PickTarget::new(node.id, &node.transform, node.footprint))
        .collect()
}

/// Find the nearest target hit by the ray
pub fn pick_nearest(ray: &Ray, targets: &[PickTarget]) -> Option<(EntityId, f32)> {
    targets
        .iter()
        .filter_map(|target| ray_intersect(ray, &target.aabb).map(|t| (target.entity_id, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Resolve a pointer-down ray against the scene graph
pub fn resolve(ray: &Ray, graph: &SceneGraph) -> PickResult {
    match pick_nearest(ray, &build_pick_targets(graph)) {
        Some((id, distance)) => PickResult::Node { id, distance },
        None => PickResult::Empty,
    }
}
