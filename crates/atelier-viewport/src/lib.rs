//! Atelier Viewport - interaction layer over the entity store
//!
//! Provides the orbit camera, pointer picking, the transform gizmo with its
//! drag sessions, and the `Editor` coordinator that routes commands and
//! pointer events between them. Rendering stays outside: a renderer samples
//! `Editor::frame` each frame.

pub mod camera;
pub mod config;
pub mod editor;
pub mod frame;
pub mod gizmo;
pub mod picking;
pub mod projection;
pub mod session;

pub use camera::OrbitCamera;
pub use config::EditorConfig;
pub use editor::{Editor, PointerOutcome};
pub use frame::Frame;
pub use gizmo::{GizmoAxis, GizmoState, TransformGizmo};
pub use session::{DragCommit, DragMode, DragSession};
