//! Prism History - command-based undo/redo
//!
//! All undoable mutation flows through here: user actions construct
//! [`Command`] values, [`CommandHistory::execute`] applies them, and the
//! bounded applied/undone stacks give linear undo/redo. Commands mutate
//! state only through the [`EditorContext`] handed to them.

pub mod command;
pub mod context;
pub mod history;
pub mod object_commands;
pub mod physics_commands;
pub mod timeline_commands;

pub use command::{Command, MultiCommand};
pub use context::EditorContext;
pub use history::CommandHistory;
pub use object_commands::{
    AddObjectCommand, RemoveObjectCommand, SetMaterialCommand, SetMaterialValueCommand,
    SetPositionCommand, SetRotationCommand, SetScaleCommand,
};
pub use physics_commands::{AddPhysicsCommand, RemovePhysicsCommand};
pub use timeline_commands::{AddKeyframeCommand, RemoveKeyframeCommand, UpdateKeyframeCommand};
