//! Error types for Atelier

use crate::EntityId;
use thiserror::Error;

/// The main error type for Atelier operations
///
/// Nothing here is fatal: interaction variants describe a refused command and
/// leave every state container untouched.
#[derive(Debug, Error)]
pub enum AtelierError {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Scene node for {0} is not yet pickable")]
    NodeNotReady(EntityId),

    #[error("A drag session is already open on {0}")]
    DragInProgress(EntityId),

    #[error("No drag session is open")]
    NoDragSession,

    #[error("Pointer ray misses the drag plane of {0}")]
    DragPlaneMissed(EntityId),

    #[error("Gizmo is not attached to a selection")]
    GizmoDetached,

    #[error("Node {0} is owned by the entity store, not a drag session")]
    NotDragOwned(EntityId),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Script error: {0}")]
    ScriptError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Atelier operations
pub type Result<T> = std::result::Result<T, AtelierError>;

impl From<toml::de::Error> for AtelierError {
    fn from(err: toml::de::Error) -> Self {
        AtelierError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for AtelierError {
    fn from(err: toml::ser::Error) -> Self {
        AtelierError::TomlSerError(err.to_string())
    }
}
