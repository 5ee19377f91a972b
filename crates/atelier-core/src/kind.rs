//! Furniture kinds and their placement defaults

use crate::{AtelierError, Color, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of object a user can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    #[default]
    #[serde(alias = "box")]
    GenericBox,
    Chair,
    Table,
    Lamp,
    Rug,
}

/// Values applied to a freshly added object of a given kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDefaults {
    /// Nominal size; the rendered size of a generic box
    pub footprint: Vec3,
    /// Height of the object's origin when it rests on the floor
    pub placement_height: f32,
    pub color: Color,
}

impl KindDefaults {
    /// Canonical resting position: centered in the room, sitting on the floor
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, self.placement_height, 0.0)
    }
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::GenericBox,
        ObjectKind::Chair,
        ObjectKind::Table,
        ObjectKind::Lamp,
        ObjectKind::Rug,
    ];

    pub fn defaults(&self) -> KindDefaults {
        match self {
            ObjectKind::GenericBox => KindDefaults {
                footprint: Vec3::new(1.0, 1.0, 1.0),
                placement_height: 0.5,
                color: Color::from_hex(0xc2a676),
            },
            ObjectKind::Chair => KindDefaults {
                footprint: Vec3::new(0.6, 0.9, 0.6),
                placement_height: 0.45,
                color: Color::from_hex(0xc2a676),
            },
            ObjectKind::Table => KindDefaults {
                footprint: Vec3::new(1.4, 0.75, 0.8),
                placement_height: 0.375,
                color: Color::from_hex(0xb28b5c),
            },
            ObjectKind::Lamp => KindDefaults {
                footprint: Vec3::new(0.3, 1.6, 0.3),
                placement_height: 0.8,
                color: Color::from_hex(0xf4e7c5),
            },
            ObjectKind::Rug => KindDefaults {
                footprint: Vec3::new(2.5, 0.05, 1.5),
                placement_height: 0.025,
                color: Color::from_hex(0xcbb7f7),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::GenericBox => "generic-box",
            ObjectKind::Chair => "chair",
            ObjectKind::Table => "table",
            ObjectKind::Lamp => "lamp",
            ObjectKind::Rug => "rug",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic-box" | "box" => Ok(ObjectKind::GenericBox),
            "chair" => Ok(ObjectKind::Chair),
            "table" => Ok(ObjectKind::Table),
            "lamp" => Ok(ObjectKind::Lamp),
            "rug" => Ok(ObjectKind::Rug),
            other => Err(AtelierError::InvalidEnumValue {
                value: other.to_string(),
                allowed: Self::ALL.iter().map(|k| k.as_str().to_string()).collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamp_defaults() {
        let d = ObjectKind::Lamp.defaults();
        assert_eq!(d.footprint, Vec3::new(0.3, 1.6, 0.3));
        assert_eq!(d.position(), Vec3::new(0.0, 0.8, 0.0));
        assert_eq!(d.color.to_hex_string(), "#f4e7c5");
    }

    #[test]
    fn test_placement_height_rests_on_floor() {
        for kind in ObjectKind::ALL {
            let d = kind.defaults();
            assert!((d.placement_height - d.footprint.y / 2.0).abs() < 1e-6, "{kind}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("rug".parse::<ObjectKind>().unwrap(), ObjectKind::Rug);
        assert_eq!("box".parse::<ObjectKind>().unwrap(), ObjectKind::GenericBox);
        assert!(matches!(
            "sofa".parse::<ObjectKind>(),
            Err(AtelierError::InvalidEnumValue { .. })
        ));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ObjectKind::GenericBox).unwrap();
        assert_eq!(json, "\"generic-box\"");
        let kind: ObjectKind = serde_json::from_str("\"box\"").unwrap();
        assert_eq!(kind, ObjectKind::GenericBox);
    }
}
