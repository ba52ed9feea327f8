use crate::{
    core::{
        history::{GridError, SearchHistory, SearchResultSet},
        selection::{SelectionState, SharePhase},
    },
    layout::{CellSize, GridConfig},
    photo::{ImageHandle, PhotoDraft, PhotoEntry},
    types::{GridCoord, PhotoId},
};

/// Minimal re-render instruction: the coordinates whose visual
/// representation went stale (at most two), plus the cell to scroll into
/// view when one was newly enlarged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invalidation {
    /// Coordinates to re-render, deduplicated, at most two.
    pub reload: Vec<GridCoord>,
    /// Cell to scroll into view after re-render, when newly enlarged.
    pub scroll_to: Option<GridCoord>,
}

/// Explicit command returned from a cell tap, replacing implicit
/// property-observer cascades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellEffect {
    /// Re-render exactly these coordinates.
    Invalidate(Invalidation),
    /// Refresh the "N photos selected" counter.
    SelectionChanged {
        /// Current number of selected photos.
        selected: usize,
    },
    /// Nothing visible changed.
    Noop,
}

/// Synchronous half of a full-image request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullImagePlan {
    /// Already cached; no load needed.
    Ready(ImageHandle),
    /// Caller must issue an asynchronous load for this identity.
    NeedsLoad(PhotoId),
}

/// Result of pressing the share control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Press ignored (no searches yet, or an export is in flight).
    Ignored,
    /// Sharing mode entered; any enlargement was collapsed.
    SharingStarted {
        /// Re-render instruction for the collapsed enlargement.
        invalidate: Invalidation,
    },
    /// Sharing mode left with nothing selected.
    SharingStopped,
    /// Export begun with the selected thumbnails, in selection order.
    Export {
        /// Selected identities, in selection order.
        ids: Vec<PhotoId>,
        /// Their thumbnail handles; entries without one are skipped.
        images: Vec<ImageHandle>,
    },
}

/// Owns the whole screen state: search history, enlargement, selection,
/// and layout. All mutation goes through this controller.
///
/// Enlargement and selection track photo *identity*, not coordinates, so
/// prepending a search or moving an entry never leaves them stale.
#[derive(Debug, Default)]
pub struct GridController {
    history: SearchHistory,
    selection: SelectionState,
    enlarged: Option<PhotoId>,
    config: GridConfig,
}

impl GridController {
    /// Empty grid with the given layout.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Layout configuration in effect.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Read access to the search history. All mutation goes through the
    /// controller.
    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Number of grid sections, one per completed search.
    pub fn section_count(&self) -> usize {
        self.history.section_count()
    }

    /// Number of cells in a section.
    pub fn row_count(&self, section: usize) -> Result<usize, GridError> {
        self.history.row_count(section)
    }

    /// Entry at a coordinate.
    pub fn entry_at(&self, coord: GridCoord) -> Result<&PhotoEntry, GridError> {
        self.history.entry(coord)
    }

    /// Search term heading a section.
    pub fn term(&self, section: usize) -> Result<&str, GridError> {
        Ok(self.history.section(section)?.term())
    }

    /// True while taps toggle selection membership.
    pub fn is_sharing(&self) -> bool {
        self.selection.is_sharing()
    }

    /// Sharing lifecycle phase.
    pub fn share_phase(&self) -> SharePhase {
        self.selection.phase()
    }

    /// Number of selected photos.
    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Identity of the enlarged photo, if any.
    pub fn enlarged_id(&self) -> Option<&str> {
        self.enlarged.as_deref()
    }

    /// Current coordinate of the enlarged photo, if any.
    pub fn enlarged_coord(&self) -> Option<GridCoord> {
        self.enlarged
            .as_ref()
            .and_then(|id| self.history.coord_of(id))
    }

    /// Display size for a cell: aspect-preserving fill for the enlarged
    /// coordinate, a fixed square otherwise.
    pub fn size_for(
        &self,
        coord: GridCoord,
        available_width: f32,
        available_height: f32,
    ) -> Result<CellSize, GridError> {
        let entry = self.history.entry(coord)?;
        if self.enlarged_coord() == Some(coord) {
            Ok(self
                .config
                .enlarged_size(entry, available_width, available_height))
        } else {
            Ok(self.config.thumbnail_size(available_width))
        }
    }

    /// Prepends a completed search at section 0 and returns its row
    /// count. Identity-based enlargement and selection are unaffected by
    /// the section shift.
    pub fn insert_search(&mut self, term: impl Into<String>, drafts: Vec<PhotoDraft>) -> usize {
        let set = SearchResultSet::new(term, drafts);
        let count = set.len();
        self.history.prepend(set);
        count
    }

    /// Handles a tap on a cell.
    ///
    /// Sharing off: toggles enlargement and reports the minimal
    /// invalidation set. Sharing on: adds the identity to the selection.
    pub fn select_cell(&mut self, coord: GridCoord) -> Result<CellEffect, GridError> {
        let id = self.history.entry(coord)?.id.clone();

        if self.selection.is_sharing() {
            if self.selection.select(id) {
                return Ok(CellEffect::SelectionChanged {
                    selected: self.selection.selected_count(),
                });
            }
            return Ok(CellEffect::Noop);
        }

        let previous = self.enlarged_coord();
        if self.enlarged.as_deref() == Some(id.as_str()) {
            // Tapping the enlarged photo collapses it. Compared by
            // identity, not coordinate: a duplicate id in one result set
            // resolves through the index to its last occurrence, and the
            // tap must still collapse.
            self.enlarged = None;
            let mut reload = vec![coord];
            if let Some(old) = previous.filter(|old| *old != coord) {
                reload.push(old);
            }
            return Ok(CellEffect::Invalidate(Invalidation {
                reload,
                scroll_to: None,
            }));
        }

        self.enlarged = Some(id);
        let mut reload = Vec::with_capacity(2);
        if let Some(old) = previous {
            reload.push(old);
        }
        reload.push(coord);
        Ok(CellEffect::Invalidate(Invalidation {
            reload,
            scroll_to: Some(coord),
        }))
    }

    /// Removes a cell's identity from the selection (sharing mode only).
    pub fn deselect_cell(&mut self, coord: GridCoord) -> Result<CellEffect, GridError> {
        let id = self.history.entry(coord)?.id.clone();
        if self.selection.deselect(&id) {
            return Ok(CellEffect::SelectionChanged {
                selected: self.selection.selected_count(),
            });
        }
        Ok(CellEffect::Noop)
    }

    /// Synchronous half of a full-image request: short-circuits when the
    /// full image is already cached.
    pub fn full_image_plan(&self, coord: GridCoord) -> Result<FullImagePlan, GridError> {
        let entry = self.history.entry(coord)?;
        match &entry.full_image {
            Some(handle) => Ok(FullImagePlan::Ready(handle.clone())),
            None => Ok(FullImagePlan::NeedsLoad(entry.id.clone())),
        }
    }

    /// Applies a completed full-image load.
    ///
    /// The handle is always cached into the entry so a later re-enlarge
    /// short-circuits. The returned coordinate is present only while the
    /// identity is still the enlarged one; `None` marks a stale load that
    /// must not be pushed into a visual cell.
    pub fn apply_full_image(
        &mut self,
        id: &str,
        handle: ImageHandle,
    ) -> Result<Option<GridCoord>, GridError> {
        let coord = self.history.set_full_image(id, handle)?;
        if self.enlarged.as_deref() == Some(id) {
            Ok(Some(coord))
        } else {
            Ok(None)
        }
    }

    /// Relocates one entry, possibly across sections.
    pub fn move_entry(&mut self, from: GridCoord, to: GridCoord) -> Result<(), GridError> {
        self.history.move_entry(from, to)
    }

    /// Handles the share control.
    ///
    /// No searches: ignored. Empty selection: toggles sharing mode
    /// (entering collapses any enlargement). Non-empty selection while
    /// sharing: begins an export with the selected thumbnails.
    pub fn share_pressed(&mut self) -> ShareOutcome {
        if self.history.is_empty() {
            return ShareOutcome::Ignored;
        }

        if self.selection.selected_count() == 0 {
            return match self.selection.phase() {
                SharePhase::Idle => {
                    self.selection.start_sharing();
                    ShareOutcome::SharingStarted {
                        invalidate: self.collapse_enlargement(),
                    }
                }
                SharePhase::Sharing => {
                    self.selection.stop_sharing();
                    ShareOutcome::SharingStopped
                }
                SharePhase::Exporting => ShareOutcome::Ignored,
            };
        }

        if self.selection.phase() != SharePhase::Sharing {
            return ShareOutcome::Ignored;
        }

        // Entries without a loaded thumbnail cannot be exported; with no
        // usable images the export is not started and sharing stays on.
        let images: Vec<ImageHandle> = self
            .selection
            .selected_ids()
            .iter()
            .filter_map(|id| self.history.coord_of(id))
            .filter_map(|coord| self.history.entry(coord).ok())
            .filter_map(|entry| entry.thumbnail.clone())
            .collect();
        if images.is_empty() {
            return ShareOutcome::Ignored;
        }

        match self.selection.begin_export() {
            Some(ids) => ShareOutcome::Export { ids, images },
            None => ShareOutcome::Ignored,
        }
    }

    /// Settles an export (completion or cancellation): selection cleared,
    /// sharing off.
    pub fn finish_share(&mut self) {
        self.selection.finish_export();
    }

    fn collapse_enlargement(&mut self) -> Invalidation {
        let previous = self.enlarged_coord();
        self.enlarged = None;
        Invalidation {
            reload: previous.into_iter().collect(),
            scroll_to: None,
        }
    }
}
