use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use photogrid::{
    core::{grid::GridController, selection::SharePhase},
    layout::GridConfig,
    photo::{ImageHandle, PhotoDraft},
    types::GridCoord,
};

#[derive(Debug, Clone)]
enum Action {
    Search { entries: u8 },
    Tap { section: u8, row: u8 },
    Deselect { section: u8, row: u8 },
    Move { s1: u8, r1: u8, s2: u8, r2: u8 },
    ShareToggle,
    FinishShare,
    ApplyFullImage { section: u8, row: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..6).prop_map(|entries| Action::Search { entries }),
        (0u8..8, 0u8..8).prop_map(|(section, row)| Action::Tap { section, row }),
        (0u8..8, 0u8..8).prop_map(|(section, row)| Action::Deselect { section, row }),
        (0u8..8, 0u8..8, 0u8..8, 0u8..8)
            .prop_map(|(s1, r1, s2, r2)| Action::Move { s1, r1, s2, r2 }),
        Just(Action::ShareToggle),
        Just(Action::FinishShare),
        (0u8..8, 0u8..8).prop_map(|(section, row)| Action::ApplyFullImage { section, row }),
    ]
}

fn drafts(next_id: &mut u64, n: u8) -> Vec<PhotoDraft> {
    (0..n)
        .map(|_| {
            let id = *next_id;
            *next_id += 1;
            PhotoDraft {
                id: format!("p{id}"),
                title: format!("photo {id}"),
                width: 600,
                height: 400,
                thumbnail: Some(ImageHandle { bytes: vec![id as u8] }),
            }
        })
        .collect()
}

/// Resolves (section, row) picks against current bounds; empty grids
/// skip the action.
fn resolve(grid: &GridController, section: u8, row: u8) -> Option<GridCoord> {
    let sections = grid.section_count();
    if sections == 0 {
        return None;
    }
    let section = usize::from(section) % sections;
    let rows = grid.row_count(section).ok()?;
    if rows == 0 {
        return None;
    }
    Some(GridCoord::new(section, usize::from(row) % rows))
}

fn check_invariants(grid: &GridController) -> Result<(), TestCaseError> {
    // Sharing off implies nothing selected (selection survives only
    // through the export phase).
    if grid.share_phase() == SharePhase::Idle {
        prop_assert_eq!(grid.selected_count(), 0);
    }

    // The enlarged identity, when it resolves, resolves to itself.
    if let Some(coord) = grid.enlarged_coord() {
        let entry = grid.entry_at(coord).expect("enlarged coord in bounds");
        prop_assert_eq!(Some(entry.id.as_str()), grid.enlarged_id());
    }

    // The identity index agrees with a full scan of the grid. Ids are
    // globally unique here, so every entry must resolve to exactly its
    // own coordinate.
    for section in 0..grid.section_count() {
        for row in 0..grid.row_count(section).expect("section in bounds") {
            let coord = GridCoord::new(section, row);
            let entry = grid.entry_at(coord).expect("coord in bounds");
            prop_assert_eq!(grid.history().coord_of(&entry.id), Some(coord));
        }
    }

    Ok(())
}

proptest! {
    #[test]
    fn random_sequences_preserve_grid_invariants(
        actions in prop::collection::vec(action_strategy(), 1..150)
    ) {
        let mut grid = GridController::new(GridConfig::default());
        let mut next_id = 0u64;
        let mut searches = 0usize;

        for action in actions {
            match action {
                Action::Search { entries } => {
                    let term = format!("t{searches}");
                    searches += 1;
                    grid.insert_search(term, drafts(&mut next_id, entries));
                    prop_assert_eq!(grid.section_count(), searches);
                }
                Action::Tap { section, row } => {
                    if let Some(coord) = resolve(&grid, section, row) {
                        grid.select_cell(coord).expect("resolved coord");
                    }
                }
                Action::Deselect { section, row } => {
                    if let Some(coord) = resolve(&grid, section, row) {
                        grid.deselect_cell(coord).expect("resolved coord");
                    }
                }
                Action::Move { s1, r1, s2, r2 } => {
                    if let (Some(from), Some(to)) =
                        (resolve(&grid, s1, r1), resolve(&grid, s2, r2))
                    {
                        grid.move_entry(from, to).expect("resolved coords");
                    }
                }
                Action::ShareToggle => {
                    let _ = grid.share_pressed();
                }
                Action::FinishShare => {
                    grid.finish_share();
                }
                Action::ApplyFullImage { section, row } => {
                    if let Some(coord) = resolve(&grid, section, row) {
                        let id = grid.entry_at(coord).expect("resolved coord").id.clone();
                        grid.apply_full_image(&id, ImageHandle { bytes: vec![1, 2, 3] })
                            .expect("known id");
                    }
                }
            }

            check_invariants(&grid)?;
        }
    }

    #[test]
    fn double_tap_always_restores_no_enlargement(
        section in 0u8..8,
        row in 0u8..8,
        sizes in prop::collection::vec(1u8..5, 1..6)
    ) {
        let mut grid = GridController::new(GridConfig::default());
        let mut next_id = 0u64;
        for (i, n) in sizes.iter().enumerate() {
            grid.insert_search(format!("t{i}"), drafts(&mut next_id, *n));
        }

        let coord = resolve(&grid, section, row).expect("non-empty grid");
        grid.select_cell(coord).expect("in bounds");
        prop_assert_eq!(grid.enlarged_coord(), Some(coord));
        grid.select_cell(coord).expect("in bounds");
        prop_assert_eq!(grid.enlarged_coord(), None);
    }
}
