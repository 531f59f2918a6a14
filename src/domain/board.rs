use crate::domain::{
    entry::{non_empty, Entry, EntryConfig, EntryId},
    gesture::{Gesture, Selectability},
    group::{Group, GroupConfig, GroupId},
};
use crate::error::{BoardError, Result};
use crate::render::{MountHandle, MountTarget, Renderer};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Smallest number of groups a board is drawn with
pub const MIN_COLUMNS: usize = 2;

/// What to do with configurations that have fewer than two columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPolicy {
    /// Append empty columns until there are two
    #[default]
    Pad,
    /// Reject an empty column list, then pad
    Strict,
}

/// Board configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub columns: Vec<GroupConfig>,
    #[serde(default)]
    pub column_policy: ColumnPolicy,
}

impl BoardConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_column(mut self, column: GroupConfig) -> Self {
        self.columns.push(column);
        self
    }

    pub fn strict(mut self) -> Self {
        self.column_policy = ColumnPolicy::Strict;
        self
    }
}

/// Which way a move button sends entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Left => "<<",
            Self::Right => ">>",
        }
    }
}

/// A move button, identified by the group it takes entries from and the
/// adjacent group it sends them to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveButton {
    pub source: usize,
    pub target: usize,
}

impl MoveButton {
    /// Button moving entries from `source` to the previous group
    pub fn left(source: usize) -> Option<Self> {
        Some(Self {
            source,
            target: source.checked_sub(1)?,
        })
    }

    /// Button moving entries from `source` to the next group
    pub fn right(source: usize) -> Self {
        Self {
            source,
            target: source + 1,
        }
    }

    pub fn direction(&self) -> Direction {
        if self.target < self.source {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    pub fn label(&self) -> &'static str {
        self.direction().label()
    }
}

impl fmt::Display for MoveButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, self.label(), self.target)
    }
}

/// Which group, if any, currently holds the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Selecting(GroupId),
}

/// Why a gesture left the board untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    GateClosed,
    UnknownEntry,
    UnknownButton,
    ButtonDisabled,
}

/// Result of handling a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored(IgnoreReason),
    SelectionChanged {
        entry: EntryId,
        selected: bool,
        state: SelectionState,
    },
    Moved {
        button: MoveButton,
        entries: Vec<EntryId>,
    },
    GateChanged {
        open: bool,
    },
}

/// Transfer list state: ordered groups plus the selection and move rules.
///
/// At most one group holds selected entries at any time.
#[derive(Debug)]
pub struct Board {
    mount: MountHandle,
    title: Option<String>,
    groups: Vec<Group>,
    policy: ColumnPolicy,
    buttons: Vec<(MoveButton, bool)>,
}

impl Board {
    /// Builds a board inside `target` and draws it.
    ///
    /// Fails before anything is drawn if the target cannot be resolved or
    /// the column list is rejected by the configured policy.
    pub fn new<R: Renderer + ?Sized>(
        target: impl Into<MountTarget>,
        config: BoardConfig,
        renderer: &mut R,
    ) -> Result<Self> {
        let target = target.into();
        let mount = renderer
            .resolve_mount(&target)
            .ok_or_else(|| BoardError::WrapperNotFound(target.to_string()))?;
        let groups = build_groups(config.columns, config.column_policy)?;

        let mut board = Self {
            mount,
            title: non_empty(config.title),
            groups,
            policy: config.column_policy,
            buttons: Vec::new(),
        };
        board.render(renderer);
        info!(mount = %target, columns = board.groups.len(), "Board built");
        Ok(board)
    }

    pub fn mount(&self) -> MountHandle {
        self.mount
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn column_policy(&self) -> ColumnPolicy {
        self.policy
    }

    /// Replaces the title and redraws the whole board
    pub fn set_title<R: Renderer + ?Sized>(&mut self, title: Option<String>, renderer: &mut R) {
        self.title = non_empty(title);
        self.render(renderer);
    }

    /// Replaces every group with fresh ones built from `columns` and redraws
    /// the whole board. On error the board is left as it was.
    pub fn set_columns<R: Renderer + ?Sized>(
        &mut self,
        columns: Vec<GroupConfig>,
        renderer: &mut R,
    ) -> Result<()> {
        self.groups = build_groups(columns, self.policy)?;
        self.render(renderer);
        Ok(())
    }

    /// Destroys and rebuilds every drawn node
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        renderer.clear(self.mount);
        if let Some(title) = &self.title {
            renderer.draw_title(self.mount, title);
        }

        self.buttons = button_layout(self.groups.len())
            .into_iter()
            .map(|button| (button, self.groups[button.source].has_selected_items()))
            .collect();

        for index in 0..self.groups.len() {
            let group = &mut self.groups[index];
            let list = renderer.draw_group(self.mount, group);
            group.list = Some(list);

            let owner = group.id();
            for entry in group.items_mut() {
                let node = renderer.draw_entry(list, owner, entry);
                entry.handle = Some(node);
                entry.sync_visual_state(renderer);
            }

            for (button, enabled) in self.buttons.iter().filter(|(b, _)| b.source == index) {
                renderer.draw_move_button(list, *button, *enabled);
            }
        }
        debug!(groups = self.groups.len(), "Board rendered");
    }

    /// Which group currently holds the selection
    pub fn selection_state(&self) -> SelectionState {
        self.groups
            .iter()
            .find(|group| group.has_selected_items())
            .map(|group| SelectionState::Selecting(group.id()))
            .unwrap_or(SelectionState::Idle)
    }

    /// Every move button with its enabled flag, in drawing order
    pub fn button_states(&self) -> &[(MoveButton, bool)] {
        &self.buttons
    }

    pub fn is_button_enabled(&self, button: MoveButton) -> bool {
        self.buttons
            .iter()
            .any(|(candidate, enabled)| *candidate == button && *enabled)
    }

    /// Handles one gesture reported by the renderer
    pub fn dispatch<R: Renderer + ?Sized>(
        &mut self,
        gesture: Gesture,
        gate: &mut Selectability,
        renderer: &mut R,
    ) -> Outcome {
        let outcome = match gesture {
            Gesture::EntryClicked { group, entry } => {
                self.on_entry_clicked(group, entry, gate, renderer)
            }
            Gesture::MoveClicked(button) => self.on_move_button_clicked(button, renderer),
            Gesture::KeyDown(key) => Outcome::GateChanged {
                open: gate.key_down(&key),
            },
            Gesture::KeyUp(key) => Outcome::GateChanged {
                open: gate.key_up(&key),
            },
        };
        debug!(?outcome, "Gesture handled");
        outcome
    }

    /// Toggles selection of an entry if the gate is open.
    ///
    /// `group` is the owner the clicked node was bound to; a click whose
    /// binding no longer matches the entry's owner is ignored.
    pub fn on_entry_clicked<R: Renderer + ?Sized>(
        &mut self,
        group: GroupId,
        entry: EntryId,
        gate: &Selectability,
        renderer: &mut R,
    ) -> Outcome {
        if !gate.is_open() {
            return Outcome::Ignored(IgnoreReason::GateClosed);
        }

        let Some(owner) = self.groups.iter().position(|g| g.id() == group) else {
            return Outcome::Ignored(IgnoreReason::UnknownEntry);
        };
        let Some(position) = self.groups[owner].position_of(entry) else {
            return Outcome::Ignored(IgnoreReason::UnknownEntry);
        };

        let selected = self.toggle_entry(owner, position, renderer);
        Outcome::SelectionChanged {
            entry,
            selected,
            state: self.selection_state(),
        }
    }

    /// Moves every selected entry of the button's source group to its target
    /// group, in display order, and disables all move buttons.
    pub fn on_move_button_clicked<R: Renderer + ?Sized>(
        &mut self,
        button: MoveButton,
        renderer: &mut R,
    ) -> Outcome {
        let Some(&(_, enabled)) = self.buttons.iter().find(|(b, _)| *b == button) else {
            return Outcome::Ignored(IgnoreReason::UnknownButton);
        };
        if !enabled {
            return Outcome::Ignored(IgnoreReason::ButtonDisabled);
        }

        let (source, target) = pair_mut(&mut self.groups, button.source, button.target);
        let moved = source.selected_ids();
        for id in &moved {
            let Some(mut entry) = source.take_item(*id) else {
                continue;
            };
            if let (Some(node), Some(from), Some(to)) = (entry.handle, source.list, target.list) {
                entry.handle = Some(renderer.relocate_entry_node(node, from, to, target.id(), *id));
            }
            entry.selected = false;
            entry.sync_visual_state(renderer);
            target.add_item(entry);
        }

        self.disable_all_buttons(renderer);
        info!(button = %button, moved = moved.len(), "Entries moved");
        Outcome::Moved {
            button,
            entries: moved,
        }
    }

    /// Appends a new entry to the group at `group_index` and draws it.
    ///
    /// A pre-selected entry is selected the same way a click would, clearing
    /// the selection in every other group.
    pub fn add_entry<R: Renderer + ?Sized>(
        &mut self,
        group_index: usize,
        config: EntryConfig,
        renderer: &mut R,
    ) -> Option<EntryId> {
        let group = self.groups.get_mut(group_index)?;
        let mut entry = Entry::new(config);
        let wants_selection = entry.selected;
        entry.selected = false;

        if let Some(list) = group.list {
            let node = renderer.draw_entry(list, group.id(), &entry);
            entry.handle = Some(node);
            entry.sync_visual_state(renderer);
        }

        let id = entry.id();
        group.add_item(entry);
        if wants_selection {
            let position = group.items().len() - 1;
            self.toggle_entry(group_index, position, renderer);
        }
        Some(id)
    }

    /// Removes an entry from whichever group owns it, detaching its node.
    /// Returns `None` when no group owns it.
    pub fn remove_entry<R: Renderer + ?Sized>(
        &mut self,
        id: EntryId,
        renderer: &mut R,
    ) -> Option<Entry> {
        let group = self.groups.iter_mut().find(|group| group.contains(id))?;
        let removed = group.remove_item(id, renderer)?;
        self.refresh_buttons(renderer);
        Some(removed)
    }

    /// Finds an entry by alias or name across all groups.
    ///
    /// Each group resolves the key alias-first; when several groups match,
    /// the match from the last of them is returned.
    pub fn find_entry(&self, key: &str) -> Option<&Entry> {
        self.groups
            .iter()
            .filter_map(|group| group.find_by_name_or_alias(key))
            .last()
    }

    /// The group owning the entry [`Board::find_entry`] returns
    pub fn find_entry_group(&self, key: &str) -> Option<&Group> {
        self.groups
            .iter()
            .filter(|group| group.find_by_name_or_alias(key).is_some())
            .last()
    }

    /// Title of the group the entry resolves in
    pub fn entry_position(&self, key: &str) -> Option<&str> {
        self.find_entry_group(key).and_then(Group::title)
    }

    /// The last group with the given title
    pub fn find_group(&self, title: &str) -> Option<&Group> {
        self.groups
            .iter()
            .filter(|group| group.title() == Some(title))
            .last()
    }

    /// Looks an entry up by identity
    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.groups.iter().find_map(|group| group.get(id))
    }

    /// Snapshot of the current layout and selection
    pub fn to_config(&self) -> BoardConfig {
        BoardConfig {
            title: self.title.clone(),
            columns: self.groups.iter().map(Group::to_config).collect(),
            column_policy: self.policy,
        }
    }

    /// Flips one entry, clears every other group and recomputes buttons.
    /// Returns the entry's new selected flag.
    fn toggle_entry<R: Renderer + ?Sized>(
        &mut self,
        owner: usize,
        position: usize,
        renderer: &mut R,
    ) -> bool {
        let entry = &mut self.groups[owner].items_mut()[position];
        entry.selected = !entry.selected;
        let selected = entry.selected;

        for (index, group) in self.groups.iter_mut().enumerate() {
            if index == owner {
                continue;
            }
            for stale in group.items_mut().iter_mut().filter(|e| e.selected) {
                stale.selected = false;
                stale.sync_visual_state(renderer);
            }
        }

        self.refresh_buttons(renderer);
        self.groups[owner].items()[position].sync_visual_state(renderer);
        selected
    }

    /// Enables exactly the buttons whose source group holds a selection
    fn refresh_buttons<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for (button, enabled) in self.buttons.iter_mut() {
            let source = &self.groups[button.source];
            let wanted = source.has_selected_items();
            if wanted == *enabled {
                continue;
            }
            *enabled = wanted;
            if let Some(list) = source.list {
                renderer.set_button_enabled(list, *button, wanted);
            }
        }
    }

    fn disable_all_buttons<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        for (button, enabled) in self.buttons.iter_mut() {
            *enabled = false;
            if let Some(list) = self.groups[button.source].list {
                renderer.set_button_enabled(list, *button, false);
            }
        }
    }
}

/// Builds fresh groups, applying the column policy and keeping only the
/// first group's selection when several are preselected.
fn build_groups(columns: Vec<GroupConfig>, policy: ColumnPolicy) -> Result<Vec<Group>> {
    if policy == ColumnPolicy::Strict && columns.is_empty() {
        return Err(BoardError::InvalidColumnCount { found: 0 });
    }

    let mut groups: Vec<Group> = columns.into_iter().map(Group::new).collect();
    while groups.len() < MIN_COLUMNS {
        groups.push(Group::new(GroupConfig::default()));
    }

    let mut owner_found = false;
    for group in groups.iter_mut() {
        if !group.has_selected_items() {
            continue;
        }
        if !owner_found {
            owner_found = true;
            continue;
        }
        warn!(group = ?group.title(), "Clearing selection outside the first selecting group");
        for entry in group.items_mut() {
            entry.selected = false;
        }
    }

    Ok(groups)
}

/// Move buttons for `count` groups: per group, left before right
fn button_layout(count: usize) -> Vec<MoveButton> {
    let mut buttons = Vec::new();
    for index in 0..count {
        if let Some(left) = MoveButton::left(index) {
            buttons.push(left);
        }
        if index + 1 < count {
            buttons.push(MoveButton::right(index));
        }
    }
    buttons
}

fn pair_mut(groups: &mut [Group], a: usize, b: usize) -> (&mut Group, &mut Group) {
    if a < b {
        let (head, tail) = groups.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = groups.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}
