//! Atelier Core - Foundational types for the Atelier layout editor
//!
//! This crate provides the core types that all other Atelier crates depend on:
//! - `EntityId` - Stable object identifiers
//! - `Transform`, `Vec3`, `Color` - Spatial and appearance types
//! - `ObjectKind` - Furniture kinds and their placement defaults
//! - Presentation settings and the Kelvin light tint
//! - Error types and Result alias

mod error;
mod id;
mod kind;
pub mod lighting;
mod types;

pub use error::{AtelierError, Result};
pub use id::EntityId;
pub use kind::{KindDefaults, ObjectKind};
pub use lighting::{kelvin_to_color, LightingParams, PresentationSettings};
pub use types::{Color, Transform, Vec3, MIN_SCALE};
