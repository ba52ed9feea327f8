//! Cell sizing rules for thumbnail and enlarged grid cells.

use serde::{Deserialize, Serialize};

use crate::photo::PhotoEntry;

/// Fixed padding around each section of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionInsets {
    /// Padding above the section.
    pub top: f32,
    /// Padding left of the section, also the inter-cell gap width.
    pub left: f32,
    /// Padding below the section.
    pub bottom: f32,
    /// Padding right of the section.
    pub right: f32,
}

impl Default for SectionInsets {
    fn default() -> Self {
        Self {
            top: 50.0,
            left: 20.0,
            bottom: 50.0,
            right: 20.0,
        }
    }
}

/// Grid layout knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Thumbnail cells per row.
    pub items_per_row: usize,
    /// Section padding.
    pub insets: SectionInsets,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            items_per_row: 3,
            insets: SectionInsets::default(),
        }
    }
}

/// Computed width/height of one cell, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    /// Cell width.
    pub width: f32,
    /// Cell height.
    pub height: f32,
}

impl GridConfig {
    /// Square thumbnail cell for the given available width.
    ///
    /// A row holds `items_per_row` cells separated by `items_per_row + 1`
    /// equal gaps of `insets.left`; the remainder is split evenly and
    /// floored so a full row never overflows the available width.
    pub fn thumbnail_size(&self, available_width: f32) -> CellSize {
        let per_row = self.items_per_row.max(1) as f32;
        let padding = self.insets.left * (per_row + 1.0);
        let width = ((available_width - padding).max(0.0) / per_row).floor();
        CellSize {
            width,
            height: width,
        }
    }

    /// Largest aspect-preserving size for an enlarged entry within the
    /// available area minus section padding, floored.
    ///
    /// Entries with degenerate natural dimensions fall back to the
    /// thumbnail size.
    pub fn enlarged_size(
        &self,
        entry: &PhotoEntry,
        available_width: f32,
        available_height: f32,
    ) -> CellSize {
        let Some(ratio) = entry.aspect_ratio() else {
            return self.thumbnail_size(available_width);
        };

        let max_width = (available_width - self.insets.left - self.insets.right).max(0.0);
        let max_height = (available_height - self.insets.top - self.insets.bottom).max(0.0);

        let mut width = max_width;
        let mut height = width / ratio;
        if height > max_height {
            height = max_height;
            width = height * ratio;
        }

        CellSize {
            width: width.floor(),
            height: height.floor(),
        }
    }
}
