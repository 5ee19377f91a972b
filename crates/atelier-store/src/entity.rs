//! Placed objects and partial updates to them

use atelier_core::{Color, EntityId, ObjectKind, Transform, Vec3, MIN_SCALE};
use serde::{Deserialize, Serialize};

/// A placed object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: ObjectKind,
    pub position: Vec3,
    /// Euler angles in radians
    pub rotation: Vec3,
    pub scale: Vec3,
    pub footprint: Vec3,
    pub color: Color,
}

impl Entity {
    /// Create an object of `kind` with its table defaults
    pub fn new(id: EntityId, kind: ObjectKind) -> Self {
        let defaults = kind.defaults();
        Self {
            id,
            kind,
            position: defaults.position(),
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            footprint: defaults.footprint,
            color: defaults.color,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Merge the supplied fields. Returns true if anything changed.
    pub(crate) fn apply(&mut self, patch: &TransformPatch) -> bool {
        let before = self.clone();

        if let Some(position) = patch.position.filter(finite) {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation.filter(finite) {
            self.rotation = rotation;
        }
        if let Some(scale) = patch.scale.filter(finite) {
            self.scale = scale.max_each(MIN_SCALE);
        }
        if let Some(color) = patch.color {
            self.color = color;
        }

        *self != before
    }
}

fn finite(v: &Vec3) -> bool {
    if !v.is_finite() {
        log::warn!("Rejecting non-finite vector {:?}", v);
        return false;
    }
    true
}

/// A partial update: only the fields that are `Some` are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scale: Option<Vec3>,
    pub color: Option<Color>,
}

impl TransformPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch that writes every transform field of `t`
    pub fn from_transform(t: &Transform) -> Self {
        Self {
            position: Some(t.position),
            rotation: Some(t.rotation),
            scale: Some(t.scale),
            color: None,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Same factor on every axis, as the object panel's scale slider does
    pub fn with_uniform_scale(self, factor: f32) -> Self {
        self.with_scale(Vec3::splat(factor))
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
            && self.color.is_none()
    }
}
