pub mod board;
pub mod entry;
pub mod gesture;
pub mod group;

#[cfg(test)]
mod proptests;

pub use board::{
    Board, BoardConfig, ColumnPolicy, Direction, IgnoreReason, MoveButton, Outcome, SelectionState,
};
pub use entry::{Entry, EntryConfig, EntryId};
pub use gesture::{Gesture, Key, Selectability};
pub use group::{Group, GroupConfig, GroupId};
