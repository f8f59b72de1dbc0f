pub mod emitter;
pub mod groups;
pub mod id;
pub mod model;

pub use emitter::{emit_classes, emit_markup};
pub use groups::{PropertyGroup, PropertyGroups};
pub use id::ElementId;
pub use model::*;
