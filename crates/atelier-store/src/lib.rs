//! Atelier Store - authoritative state for placed objects
//!
//! Holds the ordered entity list, the current selection and the active tool
//! mode. It is the system of record for every transform except the one a live
//! drag session currently owns.

mod entity;
mod store;
mod tool;

pub use entity::{Entity, TransformPatch};
pub use store::EntityStore;
pub use tool::ToolMode;
