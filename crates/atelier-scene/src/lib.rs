//! Atelier Scene - scene graph with stable ids
//!
//! This crate wraps hecs with a stable `EntityId` <-> node handle mapping and
//! keeps one renderable node per object in the entity store.

mod assets;
mod graph;

pub use assets::{AssetSource, BuiltinAssets, Renderable};
pub use graph::{NodeHandle, NodeView, ReconcileStats, SceneGraph, TransformOwner};
