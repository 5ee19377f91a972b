//! Renderables per object kind

use atelier_core::{ObjectKind, Vec3};
use serde::Serialize;
use std::collections::HashMap;

/// Opaque render payload attached to a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Renderable {
    /// Box primitive of the given size, centered on the node origin
    Primitive { size: Vec3 },
    /// Model asset resolved by the renderer
    Model { path: String },
}

/// Supplies the renderable for an object kind
pub trait AssetSource {
    fn renderable(&self, kind: ObjectKind, footprint: Vec3) -> Renderable;
}

/// Generic boxes draw as primitives; furniture kinds load `/models/<kind>.glb`
/// unless a path was configured.
#[derive(Debug, Clone, Default)]
pub struct BuiltinAssets {
    model_paths: HashMap<ObjectKind, String>,
}

impl BuiltinAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model_path(mut self, kind: ObjectKind, path: impl Into<String>) -> Self {
        self.model_paths.insert(kind, path.into());
        self
    }
}

impl AssetSource for BuiltinAssets {
    fn renderable(&self, kind: ObjectKind, footprint: Vec3) -> Renderable {
        match kind {
            ObjectKind::GenericBox => Renderable::Primitive { size: footprint },
            _ => Renderable::Model {
                path: self
                    .model_paths
                    .get(&kind)
                    .cloned()
                    .unwrap_or_else(|| format!("/models/{}.glb", kind)),
            },
        }
    }
}
