//! Runtime event stream payloads.

use crate::{
    core::grid::Invalidation,
    remote::ShareDisposition,
    types::{GridCoord, PhotoId},
};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridEvent {
    /// A completed search was prepended at section 0.
    SearchInserted {
        /// Search term.
        term: String,
        /// Number of results in the new section.
        count: usize,
    },
    /// A search failed; history was not mutated.
    SearchFailed {
        /// Search term.
        term: String,
        /// Human-readable failure reason.
        reason: String,
    },
    /// Enlargement changed; re-render exactly the listed coordinates.
    EnlargementChanged {
        /// Minimal re-render instruction.
        invalidate: Invalidation,
    },
    /// The selection counter changed.
    SelectionCountChanged {
        /// Current number of selected photos.
        selected: usize,
    },
    /// Sharing mode toggled.
    SharingChanged {
        /// True when sharing mode is now active.
        sharing: bool,
    },
    /// A full-image load completed and was cached.
    ///
    /// `coord` is present only while the photo is still the enlarged one;
    /// `None` marks a stale load that must not touch a visual cell.
    FullImageReady {
        /// Loaded photo identity.
        id: PhotoId,
        /// Cell to update, when the load is still relevant.
        coord: Option<GridCoord>,
    },
    /// A full-image load failed; the thumbnail stays displayed.
    FullImageFailed {
        /// Photo identity whose load failed.
        id: PhotoId,
        /// Human-readable failure reason.
        reason: String,
    },
    /// A share export settled; selection cleared, sharing off.
    ShareFinished {
        /// How the share surface was dismissed.
        disposition: ShareDisposition,
    },
    /// A share export failed; selection cleared, sharing off.
    ShareFailed {
        /// Human-readable failure reason.
        reason: String,
    },
}
