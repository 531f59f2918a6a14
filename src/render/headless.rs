//! In-memory renderer that keeps a small node tree instead of drawing.
//!
//! Used by hosts without a display and by the test suite. Click helpers
//! produce the gestures a real listener would report.

use crate::domain::{
    board::MoveButton,
    entry::{Entry, EntryId},
    gesture::Gesture,
    group::{Group, GroupId},
};
use crate::render::{ListHandle, MountHandle, MountTarget, Renderer, VisualHandle};
use std::collections::HashMap;
use std::fmt::Write;

#[derive(Debug, Default)]
struct MountNode {
    title: Option<String>,
    lists: Vec<ListHandle>,
}

#[derive(Debug)]
struct ListNode {
    title: Option<String>,
    entries: Vec<VisualHandle>,
    buttons: Vec<(MoveButton, bool)>,
}

#[derive(Debug)]
struct EntryNode {
    label: String,
    alias: Option<String>,
    selected: bool,
    owner: GroupId,
    entry: EntryId,
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    mount_ids: HashMap<String, MountHandle>,
    mounts: HashMap<MountHandle, MountNode>,
    lists: HashMap<ListHandle, ListNode>,
    nodes: HashMap<VisualHandle, EntryNode>,
    next_raw: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mount point that boards can be built against
    pub fn add_mount(&mut self, id: impl Into<String>) -> MountHandle {
        let handle = MountHandle::from_raw(self.issue());
        self.mount_ids.insert(id.into(), handle);
        self.mounts.insert(handle, MountNode::default());
        handle
    }

    fn issue(&mut self) -> u64 {
        self.next_raw += 1;
        self.next_raw
    }

    /// Selected marker of a drawn node
    pub fn is_selected(&self, node: VisualHandle) -> Option<bool> {
        self.nodes.get(&node).map(|n| n.selected)
    }

    /// The group and entry a node's click listener reports
    pub fn binding(&self, node: VisualHandle) -> Option<(GroupId, EntryId)> {
        self.nodes.get(&node).map(|n| (n.owner, n.entry))
    }

    /// Entry labels of a list, in display order
    pub fn entry_labels(&self, list: ListHandle) -> Vec<String> {
        self.lists
            .get(&list)
            .map(|l| {
                l.entries
                    .iter()
                    .filter_map(|node| self.nodes.get(node))
                    .map(|n| n.label.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn button_enabled(&self, list: ListHandle, button: MoveButton) -> Option<bool> {
        self.lists
            .get(&list)?
            .buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, enabled)| *enabled)
    }

    /// Number of entry nodes currently alive
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of lists drawn into a mount
    pub fn list_count(&self, mount: MountHandle) -> usize {
        self.mounts.get(&mount).map_or(0, |m| m.lists.len())
    }

    /// The gesture a click on this node reports
    pub fn click_entry(&self, node: VisualHandle) -> Option<Gesture> {
        let (group, entry) = self.binding(node)?;
        Some(Gesture::EntryClicked { group, entry })
    }

    /// The gesture a click on this button reports; disabled buttons report nothing
    pub fn click_button(&self, list: ListHandle, button: MoveButton) -> Option<Gesture> {
        self.button_enabled(list, button)?
            .then_some(Gesture::MoveClicked(button))
    }

    /// HTML-like dump of everything drawn into a mount
    pub fn markup(&self, mount: MountHandle) -> String {
        let mut out = String::new();
        let Some(node) = self.mounts.get(&mount) else {
            return out;
        };

        if let Some(title) = &node.title {
            let _ = writeln!(out, "<h1>{}</h1>", title);
        }
        for list in node.lists.iter().filter_map(|l| self.lists.get(l)) {
            out.push_str("<div>\n");
            if let Some(title) = &list.title {
                let _ = writeln!(out, "  <h2>{}</h2>", title);
            }
            out.push_str("  <ol>\n");
            for entry in list.entries.iter().filter_map(|n| self.nodes.get(n)) {
                let class = if entry.selected { " class=\"selected\"" } else { "" };
                let alias = entry
                    .alias
                    .as_ref()
                    .map(|a| format!("<span class=\"alias\">{}</span>", a))
                    .unwrap_or_default();
                let _ = writeln!(out, "    <li{}>{}{}</li>", class, entry.label, alias);
            }
            out.push_str("  </ol>\n");
            for (button, enabled) in &list.buttons {
                let disabled = if *enabled { "" } else { " disabled" };
                let _ = writeln!(
                    out,
                    "  <button class=\"action\"{}>{}</button>",
                    disabled,
                    button.label()
                );
            }
            out.push_str("</div>\n");
        }
        out
    }
}

impl Renderer for HeadlessRenderer {
    fn resolve_mount(&mut self, target: &MountTarget) -> Option<MountHandle> {
        match target {
            MountTarget::Id(id) => self.mount_ids.get(id).copied(),
            MountTarget::Handle(handle) => self.mounts.contains_key(handle).then_some(*handle),
        }
    }

    fn clear(&mut self, mount: MountHandle) {
        let Some(node) = self.mounts.get_mut(&mount) else {
            return;
        };
        node.title = None;
        for list in std::mem::take(&mut node.lists) {
            if let Some(list) = self.lists.remove(&list) {
                for entry in list.entries {
                    self.nodes.remove(&entry);
                }
            }
        }
    }

    fn draw_title(&mut self, mount: MountHandle, title: &str) {
        if let Some(node) = self.mounts.get_mut(&mount) {
            node.title = Some(title.to_string());
        }
    }

    fn draw_group(&mut self, mount: MountHandle, group: &Group) -> ListHandle {
        let handle = ListHandle::from_raw(self.issue());
        self.lists.insert(
            handle,
            ListNode {
                title: group.title().map(str::to_string),
                entries: Vec::new(),
                buttons: Vec::new(),
            },
        );
        self.mounts.entry(mount).or_default().lists.push(handle);
        handle
    }

    fn draw_entry(&mut self, list: ListHandle, owner: GroupId, entry: &Entry) -> VisualHandle {
        let handle = VisualHandle::from_raw(self.issue());
        self.nodes.insert(
            handle,
            EntryNode {
                label: entry.name().to_string(),
                alias: entry.alias().map(str::to_string),
                selected: false,
                owner,
                entry: entry.id(),
            },
        );
        if let Some(list) = self.lists.get_mut(&list) {
            list.entries.push(handle);
        }
        handle
    }

    fn draw_move_button(&mut self, list: ListHandle, button: MoveButton, enabled: bool) {
        if let Some(list) = self.lists.get_mut(&list) {
            list.buttons.push((button, enabled));
        }
    }

    fn detach_entry_node(&mut self, list: ListHandle, node: VisualHandle) {
        if let Some(list) = self.lists.get_mut(&list) {
            list.entries.retain(|n| *n != node);
        }
        self.nodes.remove(&node);
    }

    fn relocate_entry_node(
        &mut self,
        node: VisualHandle,
        from: ListHandle,
        to: ListHandle,
        owner: GroupId,
        entry: EntryId,
    ) -> VisualHandle {
        if let Some(list) = self.lists.get_mut(&from) {
            list.entries.retain(|n| *n != node);
        }
        let (label, alias, selected) = self
            .nodes
            .remove(&node)
            .map(|n| (n.label, n.alias, n.selected))
            .unwrap_or_default();

        let handle = VisualHandle::from_raw(self.issue());
        self.nodes.insert(
            handle,
            EntryNode {
                label,
                alias,
                selected,
                owner,
                entry,
            },
        );
        if let Some(list) = self.lists.get_mut(&to) {
            list.entries.push(handle);
        }
        handle
    }

    fn set_entry_selected_visual(&mut self, node: VisualHandle, selected: bool) {
        if let Some(node) = self.nodes.get_mut(&node) {
            node.selected = selected;
        }
    }

    fn set_button_enabled(&mut self, list: ListHandle, button: MoveButton, enabled: bool) {
        if let Some(list) = self.lists.get_mut(&list) {
            for (candidate, state) in list.buttons.iter_mut() {
                if *candidate == button {
                    *state = enabled;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        board::{Board, BoardConfig},
        entry::EntryConfig,
        gesture::{Key, Selectability},
        group::GroupConfig,
    };

    fn sample_config() -> BoardConfig {
        BoardConfig::titled("Widget")
            .with_column(
                GroupConfig::titled("A")
                    .with_item("Item A")
                    .with_item(EntryConfig::named("Item B").with_alias("superItem")),
            )
            .with_column(GroupConfig::titled("B").with_item("Item C"))
    }

    #[test]
    fn test_resolve_mount() {
        let mut renderer = HeadlessRenderer::new();
        let mount = renderer.add_mount("widget");

        assert_eq!(renderer.resolve_mount(&"widget".into()), Some(mount));
        assert_eq!(renderer.resolve_mount(&mount.into()), Some(mount));
        assert_eq!(renderer.resolve_mount(&"something".into()), None);
        assert_eq!(
            renderer.resolve_mount(&MountHandle::from_raw(999).into()),
            None
        );
    }

    #[test]
    fn test_initial_markup() {
        let mut renderer = HeadlessRenderer::new();
        let mount = renderer.add_mount("widget");
        Board::new("widget", sample_config(), &mut renderer).unwrap();

        let expected = "\
<h1>Widget</h1>
<div>
  <h2>A</h2>
  <ol>
    <li>Item A</li>
    <li>Item B<span class=\"alias\">superItem</span></li>
  </ol>
  <button class=\"action\" disabled>>></button>
</div>
<div>
  <h2>B</h2>
  <ol>
    <li>Item C</li>
  </ol>
  <button class=\"action\" disabled><<</button>
</div>
";
        assert_eq!(renderer.markup(mount), expected);
    }

    #[test]
    fn test_click_and_move_through_nodes() {
        let mut renderer = HeadlessRenderer::new();
        let mount = renderer.add_mount("widget");
        let mut board = Board::new("widget", sample_config(), &mut renderer).unwrap();
        let mut gate = Selectability::default();

        let node = board.find_entry("superItem").unwrap().visual_handle().unwrap();
        board.dispatch(Gesture::KeyDown(Key::Control), &mut gate, &mut renderer);
        let click = renderer.click_entry(node).unwrap();
        board.dispatch(click, &mut gate, &mut renderer);
        assert_eq!(renderer.is_selected(node), Some(true));

        let source = board.groups()[0].list_handle().unwrap();
        let target = board.groups()[1].list_handle().unwrap();
        let button = MoveButton::right(0);
        assert_eq!(renderer.button_enabled(source, button), Some(true));

        let click = renderer.click_button(source, button).unwrap();
        board.dispatch(click, &mut gate, &mut renderer);

        assert_eq!(renderer.entry_labels(source), vec!["Item A"]);
        assert_eq!(renderer.entry_labels(target), vec!["Item C", "Item B"]);
        assert_eq!(renderer.is_selected(node), None);
        assert!(renderer.click_button(source, button).is_none());

        let moved = board.find_entry("Item B").unwrap();
        let relocated = moved.visual_handle().unwrap();
        assert_ne!(relocated, node);
        assert_eq!(renderer.is_selected(relocated), Some(false));
        assert_eq!(
            renderer.binding(relocated),
            Some((board.groups()[1].id(), moved.id()))
        );
        assert!(renderer.markup(mount).contains("<li>Item B<span class=\"alias\">superItem</span></li>"));
        assert_eq!(renderer.node_count(), 3);
    }

    #[test]
    fn test_rebuild_replaces_nodes() {
        let mut renderer = HeadlessRenderer::new();
        let mount = renderer.add_mount("widget");
        let mut board = Board::new("widget", sample_config(), &mut renderer).unwrap();
        assert_eq!(renderer.node_count(), 3);

        board
            .set_columns(vec![GroupConfig::titled("Only").with_item("x")], &mut renderer)
            .unwrap();

        assert_eq!(renderer.node_count(), 1);
        assert_eq!(renderer.list_count(mount), 2);
        assert!(renderer.markup(mount).starts_with("<h1>Widget</h1>\n"));
    }

    #[test]
    fn test_remove_entry_detaches_node() {
        let mut renderer = HeadlessRenderer::new();
        renderer.add_mount("widget");
        let mut board = Board::new("widget", sample_config(), &mut renderer).unwrap();
        let id = board.find_entry("Item A").unwrap().id();

        board.remove_entry(id, &mut renderer);

        let list = board.groups()[0].list_handle().unwrap();
        assert_eq!(renderer.entry_labels(list), vec!["Item B"]);
        assert_eq!(renderer.node_count(), 2);
    }
}
