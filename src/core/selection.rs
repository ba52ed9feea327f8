use hashbrown::HashSet;

use crate::types::PhotoId;

/// Sharing-mode lifecycle phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SharePhase {
    /// Sharing off; selection empty.
    #[default]
    Idle,
    /// Multi-select active; taps toggle membership.
    Sharing,
    /// Selection handed to the exporter; awaiting completion.
    Exporting,
}

/// Multi-select state for sharing mode.
///
/// Membership is unique; selection order is preserved for export. The
/// selection is empty whenever the phase is [`SharePhase::Idle`].
#[derive(Debug, Default)]
pub struct SelectionState {
    phase: SharePhase,
    order: Vec<PhotoId>,
    members: HashSet<PhotoId>,
}

impl SelectionState {
    /// Idle state with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SharePhase {
        self.phase
    }

    /// True while taps toggle selection membership.
    pub fn is_sharing(&self) -> bool {
        self.phase == SharePhase::Sharing
    }

    /// Number of selected photos.
    pub fn selected_count(&self) -> usize {
        self.order.len()
    }

    /// Selected identities in selection order.
    pub fn selected_ids(&self) -> &[PhotoId] {
        &self.order
    }

    /// True when the identity is currently selected.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Enters sharing mode from `Idle`. Returns false when already past
    /// `Idle`; the zero-search guard lives in the controller.
    pub fn start_sharing(&mut self) -> bool {
        if self.phase != SharePhase::Idle {
            return false;
        }
        self.phase = SharePhase::Sharing;
        true
    }

    /// Leaves sharing mode and clears the selection.
    pub fn stop_sharing(&mut self) {
        self.phase = SharePhase::Idle;
        self.order.clear();
        self.members.clear();
    }

    /// Adds an identity while sharing. Returns true when newly added.
    pub fn select(&mut self, id: PhotoId) -> bool {
        if self.phase != SharePhase::Sharing || !self.members.insert(id.clone()) {
            return false;
        }
        self.order.push(id);
        true
    }

    /// Removes an identity while sharing. Returns true when it was
    /// present.
    pub fn deselect(&mut self, id: &str) -> bool {
        if self.phase != SharePhase::Sharing || !self.members.remove(id) {
            return false;
        }
        if let Some(pos) = self.order.iter().position(|x| x == id) {
            self.order.remove(pos);
        }
        true
    }

    /// Hands the selection off for export, moving to `Exporting`.
    ///
    /// Only legal from `Sharing` with a non-empty selection; the ids are
    /// returned in selection order and retained until the export settles.
    pub fn begin_export(&mut self) -> Option<Vec<PhotoId>> {
        if self.phase != SharePhase::Sharing || self.order.is_empty() {
            return None;
        }
        self.phase = SharePhase::Exporting;
        Some(self.order.clone())
    }

    /// Settles an export (completion or cancellation) back to `Idle`.
    pub fn finish_export(&mut self) {
        if self.phase == SharePhase::Exporting {
            self.stop_sharing();
        }
    }
}
