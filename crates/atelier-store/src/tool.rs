//! Active tool mode

use atelier_core::AtelierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which toolbar tool is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Pointer picks objects; no gizmo
    #[default]
    Select,
    /// Translate gizmo on the selection
    Move,
    /// Rotate gizmo on the selection
    Rotate,
}

impl ToolMode {
    /// Whether this mode shows a manipulation gizmo
    pub fn manipulates(&self) -> bool {
        matches!(self, ToolMode::Move | ToolMode::Rotate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolMode::Select => "select",
            ToolMode::Move => "move",
            ToolMode::Rotate => "rotate",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(ToolMode::Select),
            "move" => Ok(ToolMode::Move),
            "rotate" => Ok(ToolMode::Rotate),
            other => Err(AtelierError::InvalidEnumValue {
                value: other.to_string(),
                allowed: vec!["select".into(), "move".into(), "rotate".into()],
            }),
        }
    }
}
