//! EntityStore - ordered objects, selection and tool mode

use crate::entity::{Entity, TransformPatch};
use crate::tool::ToolMode;
use atelier_core::{EntityId, ObjectKind};

/// The authoritative scene state
///
/// Objects keep insertion order. Every effective mutation bumps `revision`,
/// which is how readers observe changes without a callback registry: a reader
/// that remembers the revision it last synced against knows whether to resync.
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    selected: Option<EntityId>,
    tool_mode: ToolMode,
    revision: u64,
}

impl EntityStore {
    /// Create an empty store: no objects, nothing selected, select tool
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object with its kind defaults, select it, and switch to the move tool
    pub fn add_entity(&mut self, kind: ObjectKind) -> EntityId {
        let id = EntityId::new();
        self.entities.push(Entity::new(id, kind));
        self.selected = Some(id);
        // Newly placed objects are immediately manipulable
        self.tool_mode = ToolMode::Move;
        self.bump();
        log::debug!("Added {} as {}", kind, id);
        id
    }

    /// Remove an object, clearing the selection if it pointed there
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        let removed = self.entities.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.bump();
        log::debug!("Removed {}", id);
        Some(removed)
    }

    /// Set or clear the selection.
    ///
    /// Ids that are not in the store are ignored; callers only pass ids taken
    /// from the current entity list.
    pub fn select(&mut self, id: Option<EntityId>) {
        if let Some(id) = id {
            if !self.contains(id) {
                log::warn!("Ignoring selection of unknown entity {}", id);
                return;
            }
        }
        if self.selected != id {
            self.selected = id;
            self.bump();
        }
    }

    /// Merge a partial update into an object. Unknown ids are a silent no-op.
    pub fn update_transform(&mut self, id: EntityId, patch: &TransformPatch) {
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if entity.apply(patch) {
            self.bump();
        }
    }

    pub fn set_tool_mode(&mut self, mode: ToolMode) {
        if self.tool_mode != mode {
            self.tool_mode = mode;
            self.bump();
        }
    }

    /// Put the selected object back on the floor at its canonical spot with
    /// no rotation and unit scale. Footprint and color are kept.
    pub fn reset_selected(&mut self) {
        let Some(id) = self.selected else {
            return;
        };
        let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
            return;
        };
        let patch = TransformPatch::new()
            .with_position(entity.kind.defaults().position())
            .with_rotation(atelier_core::Vec3::ZERO)
            .with_scale(atelier_core::Vec3::ONE);
        if entity.apply(&patch) {
            self.bump();
        }
    }

    /// Get an object by id
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// All objects in insertion order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn selected_id(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Entity> {
        self.selected.and_then(|id| self.get(id))
    }

    /// The tool mode as last set
    pub fn tool_mode(&self) -> ToolMode {
        self.tool_mode
    }

    /// The tool mode as the user observes it: with nothing selected there is
    /// nothing to move or rotate, so it reads as `Select`.
    pub fn effective_tool_mode(&self) -> ToolMode {
        if self.selected.is_some() {
            self.tool_mode
        } else {
            ToolMode::Select
        }
    }

    /// Monotonic counter bumped by every effective mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
