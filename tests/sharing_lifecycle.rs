use photogrid::{
    core::{
        grid::{CellEffect, GridController, ShareOutcome},
        selection::{SelectionState, SharePhase},
    },
    layout::GridConfig,
    photo::{ImageHandle, PhotoDraft},
    types::GridCoord,
};

fn draft(id: &str, with_thumbnail: bool) -> PhotoDraft {
    PhotoDraft {
        id: id.to_string(),
        title: format!("photo {id}"),
        width: 600,
        height: 400,
        thumbnail: with_thumbnail.then(|| ImageHandle {
            bytes: id.as_bytes().to_vec(),
        }),
    }
}

fn grid_with(terms: &[(&str, usize)]) -> GridController {
    let mut grid = GridController::new(GridConfig::default());
    for (term, n) in terms {
        let drafts = (0..*n).map(|i| draft(&format!("{term}{i}"), true)).collect();
        grid.insert_search(*term, drafts);
    }
    grid
}

#[test]
fn share_with_zero_searches_is_noop() {
    let mut grid = GridController::new(GridConfig::default());
    assert_eq!(grid.share_pressed(), ShareOutcome::Ignored);
    assert!(!grid.is_sharing());
}

#[test]
fn entering_sharing_collapses_enlargement() {
    let mut grid = grid_with(&[("cats", 2)]);
    let coord = GridCoord::new(0, 1);
    grid.select_cell(coord).unwrap();

    let outcome = grid.share_pressed();
    let ShareOutcome::SharingStarted { invalidate } = outcome else {
        panic!("expected SharingStarted, got {outcome:?}");
    };
    assert_eq!(invalidate.reload, vec![coord]);
    assert_eq!(invalidate.scroll_to, None);
    assert!(grid.is_sharing());
    assert_eq!(grid.enlarged_coord(), None);
}

#[test]
fn taps_toggle_selection_instead_of_enlargement_while_sharing() {
    let mut grid = grid_with(&[("cats", 3)]);
    grid.share_pressed();

    let effect = grid.select_cell(GridCoord::new(0, 0)).unwrap();
    assert_eq!(effect, CellEffect::SelectionChanged { selected: 1 });
    let effect = grid.select_cell(GridCoord::new(0, 2)).unwrap();
    assert_eq!(effect, CellEffect::SelectionChanged { selected: 2 });
    assert_eq!(grid.enlarged_coord(), None);

    // Selecting a selected cell again changes nothing.
    let effect = grid.select_cell(GridCoord::new(0, 0)).unwrap();
    assert_eq!(effect, CellEffect::Noop);
    assert_eq!(grid.selected_count(), 2);
}

#[test]
fn deselect_updates_counter_or_noops() {
    let mut grid = grid_with(&[("cats", 2)]);
    grid.share_pressed();
    grid.select_cell(GridCoord::new(0, 0)).unwrap();

    let effect = grid.deselect_cell(GridCoord::new(0, 0)).unwrap();
    assert_eq!(effect, CellEffect::SelectionChanged { selected: 0 });
    let effect = grid.deselect_cell(GridCoord::new(0, 1)).unwrap();
    assert_eq!(effect, CellEffect::Noop);
    // Outside sharing mode, deselect is always a no-op.
    grid.share_pressed();
    let effect = grid.deselect_cell(GridCoord::new(0, 0)).unwrap();
    assert_eq!(effect, CellEffect::Noop);
}

#[test]
fn toggle_off_with_empty_selection_returns_to_idle() {
    let mut grid = grid_with(&[("cats", 1)]);
    assert!(matches!(
        grid.share_pressed(),
        ShareOutcome::SharingStarted { .. }
    ));
    assert_eq!(grid.share_pressed(), ShareOutcome::SharingStopped);
    assert!(!grid.is_sharing());
    assert_eq!(grid.selected_count(), 0);
}

#[test]
fn leaving_sharing_clears_any_selection() {
    let mut state = SelectionState::new();
    assert!(state.start_sharing());
    assert!(state.select("a".to_string()));
    assert!(state.select("b".to_string()));
    assert_eq!(state.selected_count(), 2);

    state.stop_sharing();
    assert_eq!(state.phase(), SharePhase::Idle);
    assert_eq!(state.selected_count(), 0);
    assert!(!state.contains("a"));
}

#[test]
fn export_hands_off_thumbnails_in_selection_order() {
    let mut grid = grid_with(&[("cats", 3)]);
    grid.share_pressed();
    grid.select_cell(GridCoord::new(0, 2)).unwrap();
    grid.select_cell(GridCoord::new(0, 0)).unwrap();

    let outcome = grid.share_pressed();
    let ShareOutcome::Export { ids, images } = outcome else {
        panic!("expected Export, got {outcome:?}");
    };
    assert_eq!(ids, vec!["cats2".to_string(), "cats0".to_string()]);
    assert_eq!(images[0].bytes, b"cats2");
    assert_eq!(images[1].bytes, b"cats0");
    assert_eq!(grid.share_phase(), SharePhase::Exporting);

    // While exporting, further share presses are ignored.
    assert_eq!(grid.share_pressed(), ShareOutcome::Ignored);

    // Completion (or cancellation) resets to idle with nothing selected.
    grid.finish_share();
    assert_eq!(grid.share_phase(), SharePhase::Idle);
    assert_eq!(grid.selected_count(), 0);
}

#[test]
fn export_skips_entries_without_thumbnails() {
    let mut grid = GridController::new(GridConfig::default());
    grid.insert_search("cats", vec![draft("c0", true), draft("c1", false)]);
    grid.share_pressed();
    grid.select_cell(GridCoord::new(0, 0)).unwrap();
    grid.select_cell(GridCoord::new(0, 1)).unwrap();

    let ShareOutcome::Export { ids, images } = grid.share_pressed() else {
        panic!("expected Export");
    };
    assert_eq!(ids.len(), 2);
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].bytes, b"c0");
}

#[test]
fn export_with_no_usable_images_does_not_start() {
    let mut grid = GridController::new(GridConfig::default());
    grid.insert_search("cats", vec![draft("c0", false)]);
    grid.share_pressed();
    grid.select_cell(GridCoord::new(0, 0)).unwrap();

    assert_eq!(grid.share_pressed(), ShareOutcome::Ignored);
    // Sharing stays on so the user can adjust the selection.
    assert_eq!(grid.share_phase(), SharePhase::Sharing);
    assert_eq!(grid.selected_count(), 1);
}

#[test]
fn selection_invariant_holds_at_every_phase_change() {
    let mut grid = grid_with(&[("cats", 2)]);

    assert_eq!(grid.selected_count(), 0);
    grid.share_pressed();
    grid.select_cell(GridCoord::new(0, 0)).unwrap();
    grid.select_cell(GridCoord::new(0, 1)).unwrap();
    let ShareOutcome::Export { .. } = grid.share_pressed() else {
        panic!("expected Export");
    };
    grid.finish_share();

    assert!(!grid.is_sharing());
    assert_eq!(grid.selected_count(), 0);
}
