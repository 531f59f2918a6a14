//! Property-based tests for the selection and move rules
//!
//! Random gesture runs against a three column board, checking the
//! invariants after every step.

use super::*;
use crate::render::headless::HeadlessRenderer;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Click { group: usize, entry: usize },
    Move { button: usize },
    ModifierDown,
    KeyUp,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..3usize, 0..6usize).prop_map(|(group, entry)| Step::Click { group, entry }),
        2 => (0..4usize).prop_map(|button| Step::Move { button }),
        1 => Just(Step::ModifierDown),
        1 => Just(Step::KeyUp),
    ]
}

fn build() -> (Board, HeadlessRenderer) {
    let mut renderer = HeadlessRenderer::new();
    renderer.add_mount("widget");
    let config = BoardConfig::default()
        .with_column(GroupConfig::titled("A").with_item("a1").with_item("a2").with_item("a3"))
        .with_column(GroupConfig::titled("B").with_item("b1"))
        .with_column(GroupConfig::titled("C").with_item("c1").with_item("c2"));
    let board = Board::new("widget", config, &mut renderer).unwrap();
    (board, renderer)
}

/// Turns a step into a gesture the renderer would report, if the target exists
fn to_gesture(board: &Board, renderer: &HeadlessRenderer, step: &Step) -> Option<Gesture> {
    match step {
        Step::Click { group, entry } => {
            let group = board.group(*group)?;
            let items = group.items();
            if items.is_empty() {
                return None;
            }
            let node = items[entry % items.len()].visual_handle()?;
            renderer.click_entry(node)
        }
        Step::Move { button } => {
            let (button, _) = board.button_states().get(*button)?;
            Some(Gesture::MoveClicked(*button))
        }
        Step::ModifierDown => Some(Gesture::KeyDown(Key::Control)),
        Step::KeyUp => Some(Gesture::KeyUp(Key::Other("a".to_string()))),
    }
}

fn run(board: &mut Board, renderer: &mut HeadlessRenderer, gate: &mut Selectability, steps: &[Step]) {
    for step in steps {
        if let Some(gesture) = to_gesture(board, renderer, step) {
            board.dispatch(gesture, gate, renderer);
        }
    }
}

fn check_invariants(board: &Board, renderer: &HeadlessRenderer) -> Result<(), TestCaseError> {
    let selecting = board
        .groups()
        .iter()
        .filter(|group| group.has_selected_items())
        .count();
    prop_assert!(selecting <= 1, "{} groups hold a selection", selecting);

    for (button, enabled) in board.button_states() {
        let source = &board.groups()[button.source];
        prop_assert_eq!(*enabled, source.has_selected_items());
        prop_assert_eq!(
            renderer.button_enabled(source.list_handle().unwrap(), *button),
            Some(*enabled)
        );
    }

    let total: usize = board.groups().iter().map(|g| g.items().len()).sum();
    prop_assert_eq!(total, 6);
    prop_assert_eq!(renderer.node_count(), total);

    for group in board.groups() {
        for entry in group.items() {
            let node = entry.visual_handle().unwrap();
            prop_assert_eq!(renderer.binding(node), Some((group.id(), entry.id())));
            prop_assert_eq!(renderer.is_selected(node), Some(entry.is_selected()));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_at_most_one_group_selects(steps in proptest::collection::vec(arb_step(), 0..60)) {
        let (mut board, mut renderer) = build();
        let mut gate = Selectability::default();

        for step in &steps {
            if let Some(gesture) = to_gesture(&board, &renderer, step) {
                board.dispatch(gesture, &mut gate, &mut renderer);
            }
            check_invariants(&board, &renderer)?;
        }
    }

    #[test]
    fn prop_toggle_twice_restores_state(
        steps in proptest::collection::vec(arb_step(), 0..30),
        pick in 0..6usize,
    ) {
        let (mut board, mut renderer) = build();
        let mut gate = Selectability::default();
        run(&mut board, &mut renderer, &mut gate, &steps);

        // Clicking outside the selecting group would clear it, so stay inside.
        let group = match board.selection_state() {
            SelectionState::Selecting(id) => board.groups().iter().find(|g| g.id() == id).unwrap(),
            SelectionState::Idle => board.groups().iter().find(|g| !g.items().is_empty()).unwrap(),
        };
        let group_id = group.id();
        let entry = group.items()[pick % group.items().len()].id();
        let was_selected = group.get(entry).unwrap().is_selected();
        let buttons_before = board.button_states().to_vec();
        let state_before = board.selection_state();

        let open = Selectability::always_open();
        board.on_entry_clicked(group_id, entry, &open, &mut renderer);
        board.on_entry_clicked(group_id, entry, &open, &mut renderer);

        prop_assert_eq!(board.entry(entry).unwrap().is_selected(), was_selected);
        prop_assert_eq!(board.button_states(), buttons_before.as_slice());
        prop_assert_eq!(board.selection_state(), state_before);
        check_invariants(&board, &renderer)?;
    }

    #[test]
    fn prop_move_consumes_selection(steps in proptest::collection::vec(arb_step(), 0..40)) {
        let (mut board, mut renderer) = build();
        let mut gate = Selectability::default();
        run(&mut board, &mut renderer, &mut gate, &steps);

        let Some(&(button, _)) = board.button_states().iter().find(|(_, enabled)| *enabled) else {
            return Ok(());
        };
        let selected = board.groups()[button.source].selected_ids();
        let target_before: Vec<EntryId> =
            board.groups()[button.target].items().iter().map(Entry::id).collect();

        let outcome = board.on_move_button_clicked(button, &mut renderer);

        prop_assert_eq!(outcome, Outcome::Moved { button, entries: selected.clone() });
        let mut expected = target_before;
        expected.extend(selected.iter().copied());
        let target_after: Vec<EntryId> =
            board.groups()[button.target].items().iter().map(Entry::id).collect();
        prop_assert_eq!(target_after, expected);
        for id in &selected {
            prop_assert!(!board.groups()[button.source].contains(*id));
            prop_assert!(!board.entry(*id).unwrap().is_selected());
        }
        prop_assert!(board.button_states().iter().all(|(_, enabled)| !enabled));
        check_invariants(&board, &renderer)?;
    }
}
