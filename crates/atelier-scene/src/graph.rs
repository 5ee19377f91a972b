//! SceneGraph - renderable nodes keyed by stable entity ids

use crate::assets::{AssetSource, Renderable};
use atelier_core::{AtelierError, Color, EntityId, ObjectKind, Result, Transform, Vec3};
use atelier_store::EntityStore;
use bimap::BiMap;
use serde::Serialize;

/// Handle to a node in the scene graph arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(hecs::Entity);

/// Which side currently writes a node's transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformOwner {
    /// Reconciliation copies the stored transform onto the node
    #[default]
    OwnedByStore,
    /// A live drag session writes the node; reconciliation leaves it alone
    OwnedByDragSession,
}

/// Node pose
#[derive(Debug, Clone, Copy)]
struct NodeTransform(Transform);

/// Node appearance
#[derive(Debug, Clone)]
struct NodeVisual {
    kind: ObjectKind,
    footprint: Vec3,
    color: Color,
    renderable: Renderable,
}

/// Read-only snapshot of a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: EntityId,
    pub kind: ObjectKind,
    pub transform: Transform,
    pub footprint: Vec3,
    pub color: Color,
    pub renderable: Renderable,
    pub owner: TransformOwner,
}

/// Counts from one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub removed: usize,
    pub spawned: usize,
    pub updated: usize,
    /// Nodes left untouched because a drag session owns them
    pub skipped: usize,
}

/// The renderer-facing projection of the entity store
///
/// Wraps hecs::World with:
/// - Stable EntityId <-> node handle mapping
/// - A per-node ownership tag deciding who writes the transform
pub struct SceneGraph {
    /// The underlying hecs world
    world: hecs::World,
    /// Bidirectional mapping: EntityId <-> hecs::Entity
    id_map: BiMap<EntityId, hecs::Entity>,
    /// Store revision the nodes were last derived from
    synced_revision: Option<u64>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
            id_map: BiMap::new(),
            synced_revision: None,
        }
    }

    /// Whether the store changed since the last reconciliation
    pub fn needs_reconcile(&self, store: &EntityStore) -> bool {
        self.synced_revision != Some(store.revision())
    }

    /// Make the node set match the store.
    ///
    /// 1. Remove nodes whose id is no longer stored.
    /// 2. Spawn nodes for new ids.
    /// 3. Copy transform and appearance onto surviving nodes, except the
    ///    transform of a node a drag session owns.
    pub fn reconcile(&mut self, store: &EntityStore, assets: &dyn AssetSource) -> ReconcileStats {
        let mut stats = ReconcileStats::default();

        let stale: Vec<EntityId> = self
            .id_map
            .left_values()
            .filter(|id| !store.contains(**id))
            .copied()
            .collect();
        for id in stale {
            if self.despawn(id) {
                stats.removed += 1;
            }
        }

        for entity in store.entities() {
            let Some(node) = self.id_map.get_by_left(&entity.id).copied() else {
                let renderable = assets.renderable(entity.kind, entity.footprint);
                let node = self.world.spawn((
                    NodeTransform(entity.transform()),
                    NodeVisual {
                        kind: entity.kind,
                        footprint: entity.footprint,
                        color: entity.color,
                        renderable,
                    },
                    TransformOwner::OwnedByStore,
                ));
                self.id_map.insert(entity.id, node);
                stats.spawned += 1;
                continue;
            };

            if let Ok(mut visual) = self.world.get::<&mut NodeVisual>(node) {
                visual.color = entity.color;
                visual.footprint = entity.footprint;
            }

            if self.owner_of(node) == TransformOwner::OwnedByDragSession {
                stats.skipped += 1;
                continue;
            }

            if let Ok(mut transform) = self.world.get::<&mut NodeTransform>(node) {
                transform.0 = entity.transform();
                stats.updated += 1;
            }
        }

        self.synced_revision = Some(store.revision());
        log::trace!("Reconciled scene graph: {:?}", stats);
        stats
    }

    /// Look up the node for an id. `None` means "not yet pickable".
    pub fn node(&self, id: EntityId) -> Option<NodeHandle> {
        self.id_map.get_by_left(&id).copied().map(NodeHandle)
    }

    /// Reverse lookup from a node handle
    pub fn entity_of(&self, handle: NodeHandle) -> Option<EntityId> {
        self.id_map.get_by_right(&handle.0).copied()
    }

    /// The transform currently on the node
    pub fn transform(&self, id: EntityId) -> Option<Transform> {
        let node = self.id_map.get_by_left(&id)?;
        self.world.get::<&NodeTransform>(*node).ok().map(|t| t.0)
    }

    pub fn owner(&self, id: EntityId) -> Option<TransformOwner> {
        let node = self.id_map.get_by_left(&id)?;
        Some(self.owner_of(*node))
    }

    /// Hand a node's transform to a drag session
    pub fn claim_for_drag(&mut self, id: EntityId) -> Result<NodeHandle> {
        let node = self
            .id_map
            .get_by_left(&id)
            .copied()
            .ok_or(AtelierError::NodeNotReady(id))?;
        let mut owner = self
            .world
            .get::<&mut TransformOwner>(node)
            .map_err(|_| AtelierError::NodeNotReady(id))?;
        if *owner == TransformOwner::OwnedByDragSession {
            return Err(AtelierError::DragInProgress(id));
        }
        *owner = TransformOwner::OwnedByDragSession;
        Ok(NodeHandle(node))
    }

    /// Write a live pose onto a node owned by a drag session
    pub fn write_live_transform(&mut self, handle: NodeHandle, transform: Transform) -> Result<()> {
        let id = self
            .entity_of(handle)
            .ok_or(AtelierError::NoDragSession)?;
        if self.owner_of(handle.0) != TransformOwner::OwnedByDragSession {
            return Err(AtelierError::NotDragOwned(id));
        }
        let mut node = self
            .world
            .get::<&mut NodeTransform>(handle.0)
            .map_err(|_| AtelierError::NodeNotReady(id))?;
        node.0 = transform.sanitized();
        Ok(())
    }

    /// Return a node to store ownership. The next reconciliation re-derives
    /// its transform from the store.
    pub fn release_to_store(&mut self, id: EntityId) {
        let Some(node) = self.id_map.get_by_left(&id).copied() else {
            return;
        };
        if let Ok(mut owner) = self.world.get::<&mut TransformOwner>(node) {
            *owner = TransformOwner::OwnedByStore;
        }
        self.synced_revision = None;
    }

    /// Destroy a node and release its handle
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some((_, node)) = self.id_map.remove_by_left(&id) else {
            return false;
        };
        if self.world.despawn(node).is_err() {
            log::warn!("Node for {} was already gone", id);
        }
        true
    }

    /// Snapshot of a single node
    pub fn view(&self, id: EntityId) -> Option<NodeView> {
        let node = *self.id_map.get_by_left(&id)?;
        let transform = self.world.get::<&NodeTransform>(node).ok()?.0;
        let visual = self.world.get::<&NodeVisual>(node).ok()?;
        Some(NodeView {
            id,
            kind: visual.kind,
            transform,
            footprint: visual.footprint,
            color: visual.color,
            renderable: visual.renderable.clone(),
            owner: self.owner_of(node),
        })
    }

    /// Snapshot of every node, in arena order
    pub fn nodes(&self) -> Vec<NodeView> {
        let mut query = self
            .world
            .query::<(&NodeTransform, &NodeVisual, &TransformOwner)>();
        query
            .iter()
            .filter_map(|(node, (transform, visual, owner))| {
                let id = *self.id_map.get_by_right(&node)?;
                Some(NodeView {
                    id,
                    kind: visual.kind,
                    transform: transform.0,
                    footprint: visual.footprint,
                    color: visual.color,
                    renderable: visual.renderable.clone(),
                    owner: *owner,
                })
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.id_map.len()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.id_map.contains_left(&id)
    }

    fn owner_of(&self, node: hecs::Entity) -> TransformOwner {
        self.world
            .get::<&TransformOwner>(node)
            .map(|o| *o)
            .unwrap_or_default()
    }
}
