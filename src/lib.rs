//! # Transfer Board
//!
//! Selection and transfer state machine for multi-column transfer lists.
//!
//! A [`Board`] owns ordered groups of entries. Entries are selected in one
//! group at a time while a modifier key is held, then moved to an adjacent
//! group with the move buttons. Drawing is delegated to a [`Renderer`]; the
//! board only tells it which nodes to change.

pub mod config;
pub mod domain;
pub mod error;
pub mod render;

// Re-export commonly used types
pub use config::ConfigSource;
pub use domain::{
    board::{Board, BoardConfig, ColumnPolicy, MoveButton, Outcome, SelectionState},
    entry::{Entry, EntryConfig, EntryId},
    gesture::{Gesture, Key, Selectability},
    group::{Group, GroupConfig, GroupId},
};
pub use error::{BoardError, Result};
pub use render::{headless::HeadlessRenderer, MountTarget, Renderer};
