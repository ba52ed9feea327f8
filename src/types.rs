//! Shared identifier and grid coordinate types.

use serde::{Deserialize, Serialize};

/// Opaque photo identity assigned by the image service.
///
/// Stable and equality-comparable for the lifetime of an entry; the crate
/// never parses it.
pub type PhotoId = String;

/// Section/row address of one grid cell.
///
/// Section 0 is always the most recently completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    /// Section index, one per completed search, newest first.
    pub section: usize,
    /// Row index inside the section's result list.
    pub row: usize,
}

impl GridCoord {
    /// Constructs a coordinate.
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}
