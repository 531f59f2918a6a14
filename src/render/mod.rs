//! Boundary between the board state machine and whatever draws it.
//!
//! The core never looks inside a handle. Renderers issue them when drawing
//! and receive them back when the core asks for a node to change.

use crate::domain::{
    board::MoveButton,
    entry::{Entry, EntryId},
    group::{Group, GroupId},
};
use std::fmt;

pub mod headless;

macro_rules! opaque_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a renderer-issued raw value
            pub fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw value this handle was issued with
            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

opaque_handle!(
    /// The container a board is drawn into
    MountHandle
);
opaque_handle!(
    /// A group's visible list of entry nodes
    ListHandle
);
opaque_handle!(
    /// A single drawn entry node
    VisualHandle
);

/// How a board names the place it should be drawn into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountTarget {
    /// Looked up by identifier
    Id(String),
    /// Already resolved by the caller
    Handle(MountHandle),
}

impl From<&str> for MountTarget {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<MountHandle> for MountTarget {
    fn from(handle: MountHandle) -> Self {
        Self::Handle(handle)
    }
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{}", id),
            Self::Handle(handle) => write!(f, "{}", handle),
        }
    }
}

/// Draws boards and applies the targeted updates the core asks for.
///
/// Gestures travel the other way as [`crate::domain::gesture::Gesture`]
/// values handed to [`crate::domain::board::Board::dispatch`].
pub trait Renderer {
    /// Resolves a mount target, `None` when it does not exist
    fn resolve_mount(&mut self, target: &MountTarget) -> Option<MountHandle>;

    /// Discards everything previously drawn into the mount
    fn clear(&mut self, mount: MountHandle);

    /// Draws the board headline
    fn draw_title(&mut self, mount: MountHandle, title: &str);

    /// Draws a group's wrapper and returns the container for its entries
    fn draw_group(&mut self, mount: MountHandle, group: &Group) -> ListHandle;

    /// Draws an entry into a list and binds its click listener to `owner`
    fn draw_entry(&mut self, list: ListHandle, owner: GroupId, entry: &Entry) -> VisualHandle;

    /// Draws a move button next to the source group's list
    fn draw_move_button(&mut self, list: ListHandle, button: MoveButton, enabled: bool);

    /// Removes an entry node from a list
    fn detach_entry_node(&mut self, list: ListHandle, node: VisualHandle);

    /// Moves a node into another list, keeping its rendered children, and
    /// rebinds its click listener to the new owner. Returns the handle of
    /// the relocated node, which replaces `node`.
    fn relocate_entry_node(
        &mut self,
        node: VisualHandle,
        from: ListHandle,
        to: ListHandle,
        owner: GroupId,
        entry: EntryId,
    ) -> VisualHandle;

    /// Sets or clears the "selected" marker on an entry node
    fn set_entry_selected_visual(&mut self, node: VisualHandle, selected: bool);

    /// Sets the disabled attribute of a move button
    fn set_button_enabled(&mut self, list: ListHandle, button: MoveButton, enabled: bool);
}
