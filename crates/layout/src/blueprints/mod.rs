//! Blueprints and the blueprint editor.
//!
//! A `Blueprint` is a typed grid plus the metadata records that should end up
//! on its building groups. The `BlueprintEditor` resource holds the working
//! copy while the user drafts it, and validates it before it is applied to
//! the world.

pub mod blueprint;
pub mod editor;


pub use blueprint::*;
pub use editor::*;
