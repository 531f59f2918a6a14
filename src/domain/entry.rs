use crate::render::{Renderer, VisualHandle};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of an entry, stable across moves between groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Creates a new random EntryId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a single entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl EntryConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

impl From<&str> for EntryConfig {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// A selectable, movable list item
#[derive(Debug)]
pub struct Entry {
    id: EntryId,
    name: String,
    alias: Option<String>,
    pub(crate) selected: bool,
    pub(crate) handle: Option<VisualHandle>,
}

impl Entry {
    /// Name used when the configuration does not provide one
    pub const DEFAULT_NAME: &'static str = "Item";

    /// Creates an unrendered entry from its configuration
    pub fn new(config: EntryConfig) -> Self {
        Self {
            id: EntryId::new(),
            name: non_empty(config.name).unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            alias: non_empty(config.alias),
            selected: config.selected,
            handle: None,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// The node currently drawn for this entry, if any
    pub fn visual_handle(&self) -> Option<VisualHandle> {
        self.handle
    }

    /// Pushes the selected marker to the drawn node. Idempotent; a no-op
    /// while the entry is not drawn.
    pub fn sync_visual_state<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        if let Some(node) = self.handle {
            renderer.set_entry_selected_visual(node, self.selected);
        }
    }

    /// Snapshot of this entry as configuration
    pub fn to_config(&self) -> EntryConfig {
        EntryConfig {
            name: Some(self.name.clone()),
            alias: self.alias.clone(),
            selected: self.selected,
        }
    }
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
