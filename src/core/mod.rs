//! Grid-state core: history, selection, and the controller.

/// Grid controller composing history, enlargement, and selection.
pub mod grid;
/// Ordered search history and coordinate lookup.
pub mod history;
/// Sharing-mode selection state machine.
pub mod selection;
