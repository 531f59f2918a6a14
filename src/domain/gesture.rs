use crate::domain::{board::MoveButton, entry::EntryId, group::GroupId};

/// A keyboard key as reported by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Control,
    Shift,
    Alt,
    Meta,
    Other(String),
}

/// User input reported by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    /// An entry node was clicked; `group` is the owner its listener is bound to
    EntryClicked { group: GroupId, entry: EntryId },
    MoveClicked(MoveButton),
    KeyDown(Key),
    KeyUp(Key),
}

/// Whether clicks currently toggle selection.
///
/// Open only while the designated modifier is held. The host owns one value
/// for its input source and passes it to every board it dispatches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectability {
    modifier: Key,
    open: bool,
}

impl Selectability {
    /// A closed gate opened by `modifier`
    pub fn new(modifier: Key) -> Self {
        Self {
            modifier,
            open: false,
        }
    }

    /// A gate that is already open, for hosts without a modifier key
    pub fn always_open() -> Self {
        Self {
            modifier: Key::Control,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn modifier(&self) -> &Key {
        &self.modifier
    }

    /// Opens the gate if `key` is the designated modifier. Returns the new state.
    pub fn key_down(&mut self, key: &Key) -> bool {
        if *key == self.modifier {
            self.open = true;
        }
        self.open
    }

    /// Any key release closes the gate
    pub fn key_up(&mut self, _key: &Key) -> bool {
        self.open = false;
        self.open
    }
}

impl Default for Selectability {
    fn default() -> Self {
        Self::new(Key::Control)
    }
}
