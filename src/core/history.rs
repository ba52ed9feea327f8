use hashbrown::HashMap;

use crate::{
    photo::{ImageHandle, PhotoDraft, PhotoEntry},
    types::{GridCoord, PhotoId},
};

/// Coordinate or identity outside current grid bounds.
///
/// These indicate a caller inconsistency, not a user-recoverable
/// condition: a correct view layer only asks about coordinates it was
/// told exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Section index past the current section count.
    SectionOutOfRange {
        /// Requested section.
        section: usize,
        /// Current section count.
        sections: usize,
    },
    /// Row index past the section's entry count.
    OutOfRange {
        /// Requested coordinate.
        coord: GridCoord,
        /// Current row count of the section.
        rows: usize,
    },
    /// Photo identity not present anywhere in the grid.
    UnknownPhoto(PhotoId),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SectionOutOfRange { section, sections } => {
                write!(f, "section {section} out of range (sections: {sections})")
            }
            Self::OutOfRange { coord, rows } => write!(
                f,
                "row {} out of range in section {} (rows: {rows})",
                coord.row, coord.section
            ),
            Self::UnknownPhoto(id) => write!(f, "unknown photo id {id:?}"),
        }
    }
}

impl std::error::Error for GridError {}

/// One completed search: an immutable term plus its ordered results.
///
/// Entries are mutated in place (image handles) and relocated only by an
/// explicit move; they are never deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResultSet {
    term: String,
    entries: Vec<PhotoEntry>,
}

impl SearchResultSet {
    /// Materializes a result set from parsed search-response drafts.
    pub fn new(term: impl Into<String>, drafts: Vec<PhotoDraft>) -> Self {
        Self {
            term: term.into(),
            entries: drafts.into_iter().map(PhotoDraft::into_entry).collect(),
        }
    }

    /// The search term that produced this set.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the search returned nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in result order.
    pub fn entries(&self) -> &[PhotoEntry] {
        &self.entries
    }
}

/// Ordered list of completed searches, newest first, with an identity
/// index resolving photo ids to their current grid coordinate.
///
/// The index is maintained eagerly: prepends shift every stored section
/// by one, moves reindex the affected sections. When the same photo id
/// appears in more than one result set the most recently indexed
/// occurrence wins.
#[derive(Debug, Default)]
pub struct SearchHistory {
    searches: Vec<SearchResultSet>,
    coords: HashMap<PhotoId, GridCoord>,
}

impl SearchHistory {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed searches.
    pub fn section_count(&self) -> usize {
        self.searches.len()
    }

    /// True before the first search completes.
    pub fn is_empty(&self) -> bool {
        self.searches.is_empty()
    }

    /// Result set at a section index.
    pub fn section(&self, section: usize) -> Result<&SearchResultSet, GridError> {
        self.searches
            .get(section)
            .ok_or(GridError::SectionOutOfRange {
                section,
                sections: self.searches.len(),
            })
    }

    /// Entry count of a section.
    pub fn row_count(&self, section: usize) -> Result<usize, GridError> {
        Ok(self.section(section)?.len())
    }

    /// Entry at a coordinate.
    pub fn entry(&self, coord: GridCoord) -> Result<&PhotoEntry, GridError> {
        let set = self.section(coord.section)?;
        set.entries.get(coord.row).ok_or(GridError::OutOfRange {
            coord,
            rows: set.len(),
        })
    }

    /// Mutable entry at a coordinate, for in-place image-handle updates.
    pub fn entry_mut(&mut self, coord: GridCoord) -> Result<&mut PhotoEntry, GridError> {
        let sections = self.searches.len();
        let set = self
            .searches
            .get_mut(coord.section)
            .ok_or(GridError::SectionOutOfRange {
                section: coord.section,
                sections,
            })?;
        let rows = set.entries.len();
        set.entries
            .get_mut(coord.row)
            .ok_or(GridError::OutOfRange { coord, rows })
    }

    /// Current coordinate of a photo identity, if it is in the grid.
    pub fn coord_of(&self, id: &str) -> Option<GridCoord> {
        self.coords.get(id).copied()
    }

    /// Prepends a completed search at section 0.
    ///
    /// Every previously indexed coordinate shifts down one section.
    pub fn prepend(&mut self, set: SearchResultSet) {
        for coord in self.coords.values_mut() {
            coord.section += 1;
        }
        self.searches.insert(0, set);
        self.index_section(0);
    }

    /// Splices the entry at `from` out of its list and into `to`.
    ///
    /// The destination row may equal the destination list's length (append
    /// position), evaluated after removal when both coordinates address
    /// the same list.
    pub fn move_entry(&mut self, from: GridCoord, to: GridCoord) -> Result<(), GridError> {
        // Validate the source before touching anything.
        self.entry(from)?;
        let dest_len = self.row_count(to.section)?;
        let dest_limit = if from.section == to.section {
            dest_len - 1
        } else {
            dest_len
        };
        if to.row > dest_limit {
            return Err(GridError::OutOfRange {
                coord: to,
                rows: dest_len,
            });
        }

        let entry = self.searches[from.section].entries.remove(from.row);
        self.searches[to.section].entries.insert(to.row, entry);

        self.index_section(from.section);
        if to.section != from.section {
            self.index_section(to.section);
        }
        Ok(())
    }

    /// Caches a loaded full image into the owning entry.
    ///
    /// Applied unconditionally so a later re-enlarge short-circuits, even
    /// when the load outlived the enlargement that requested it.
    pub fn set_full_image(&mut self, id: &str, handle: ImageHandle) -> Result<GridCoord, GridError> {
        let coord = self
            .coord_of(id)
            .ok_or_else(|| GridError::UnknownPhoto(id.to_string()))?;
        self.entry_mut(coord)?.full_image = Some(handle);
        Ok(coord)
    }

    /// Search terms in display order (newest first).
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.searches.iter().map(|s| s.term())
    }

    fn index_section(&mut self, section: usize) {
        for (row, entry) in self.searches[section].entries.iter().enumerate() {
            self.coords
                .insert(entry.id.clone(), GridCoord::new(section, row));
        }
    }
}
