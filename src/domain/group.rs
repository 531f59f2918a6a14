use crate::domain::entry::{non_empty, Entry, EntryConfig, EntryId};
use crate::render::{ListHandle, Renderer};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a group within a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration for a board column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<EntryConfig>,
}

impl GroupConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: impl Into<EntryConfig>) -> Self {
        self.items.push(item.into());
        self
    }
}

/// A column owning an ordered set of entries
#[derive(Debug)]
pub struct Group {
    id: GroupId,
    title: Option<String>,
    items: Vec<Entry>,
    pub(crate) list: Option<ListHandle>,
}

impl Group {
    /// Creates a group with fresh entries built from the configuration
    pub fn new(config: GroupConfig) -> Self {
        Self {
            id: GroupId::new(),
            title: non_empty(config.title),
            items: config.items.into_iter().map(Entry::new).collect(),
            list: None,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Entries in display order
    pub fn items(&self) -> &[Entry] {
        &self.items
    }

    /// The container this group's entries are drawn into
    pub fn list_handle(&self) -> Option<ListHandle> {
        self.list
    }

    pub(crate) fn items_mut(&mut self) -> &mut [Entry] {
        &mut self.items
    }

    /// Appends an entry. The caller guarantees it is not owned elsewhere.
    pub fn add_item(&mut self, entry: Entry) {
        self.items.push(entry);
    }

    /// Removes an entry by identity and detaches its node from this group's
    /// list. Returns `None` when the entry is not a member.
    pub fn remove_item<R: Renderer + ?Sized>(
        &mut self,
        id: EntryId,
        renderer: &mut R,
    ) -> Option<Entry> {
        let mut entry = self.take_item(id)?;
        if let (Some(list), Some(node)) = (self.list, entry.handle.take()) {
            renderer.detach_entry_node(list, node);
        }
        Some(entry)
    }

    /// Removes an entry by identity without touching its node
    pub(crate) fn take_item(&mut self, id: EntryId) -> Option<Entry> {
        let index = self.position_of(id)?;
        Some(self.items.remove(index))
    }

    pub(crate) fn position_of(&self, id: EntryId) -> Option<usize> {
        self.items.iter().position(|entry| entry.id() == id)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.items.iter().find(|entry| entry.id() == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.position_of(id).is_some()
    }

    /// Finds an entry by alias, falling back to name.
    ///
    /// Aliases are scanned first and an alias match wins over another
    /// entry's name. Within each pass the last match in display order wins.
    pub fn find_by_name_or_alias(&self, key: &str) -> Option<&Entry> {
        self.items
            .iter()
            .rev()
            .find(|entry| entry.alias() == Some(key))
            .or_else(|| self.items.iter().rev().find(|entry| entry.name() == key))
    }

    /// True iff any entry in this group is selected
    pub fn has_selected_items(&self) -> bool {
        self.items.iter().any(Entry::is_selected)
    }

    /// Ids of the selected entries, in display order
    pub fn selected_ids(&self) -> Vec<EntryId> {
        self.items
            .iter()
            .filter(|entry| entry.is_selected())
            .map(Entry::id)
            .collect()
    }

    /// Snapshot of this group as configuration
    pub fn to_config(&self) -> GroupConfig {
        GroupConfig {
            title: self.title.clone(),
            items: self.items.iter().map(Entry::to_config).collect(),
        }
    }
}
