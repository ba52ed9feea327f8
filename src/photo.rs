//! Photo domain records: image handles, entries, and search-response drafts.

use serde::{Deserialize, Serialize};

use crate::types::PhotoId;

/// Opaque decoded-image payload.
///
/// The crate never interprets the bytes; decoding and rendering belong to
/// the platform embedding the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImageHandle {
    /// Raw decoded-image bytes.
    pub bytes: Vec<u8>,
}

/// One photo in a search result set.
///
/// Identity is fixed at creation; image handles are populated in place as
/// loads complete. The full image stays absent until explicitly requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// Stable service-assigned photo identity.
    pub id: PhotoId,
    /// Photo title as reported by the service.
    pub title: String,
    /// Natural image width in pixels.
    pub width: u32,
    /// Natural image height in pixels.
    pub height: u32,
    /// Thumbnail image, present once loaded.
    pub thumbnail: Option<ImageHandle>,
    /// Full-size image, absent until requested and loaded.
    pub full_image: Option<ImageHandle>,
}

impl PhotoEntry {
    /// Width/height ratio of the original image.
    ///
    /// Degenerate dimensions report `None`; callers fall back to thumbnail
    /// sizing.
    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }

    /// Best image currently available for display: the full image when
    /// loaded, otherwise the thumbnail.
    pub fn display_image(&self) -> Option<&ImageHandle> {
        self.full_image.as_ref().or(self.thumbnail.as_ref())
    }
}

/// Insert payload parsed from one search-response photo.
///
/// Carries everything a [`PhotoEntry`] has except the full image, which
/// always starts absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoDraft {
    /// Stable service-assigned photo identity.
    pub id: PhotoId,
    /// Photo title as reported by the service.
    pub title: String,
    /// Natural image width in pixels.
    pub width: u32,
    /// Natural image height in pixels.
    pub height: u32,
    /// Thumbnail image, when the response included one.
    pub thumbnail: Option<ImageHandle>,
}

impl PhotoDraft {
    /// Materializes the draft into an entry with no full image.
    pub fn into_entry(self) -> PhotoEntry {
        PhotoEntry {
            id: self.id,
            title: self.title,
            width: self.width,
            height: self.height,
            thumbnail: self.thumbnail,
            full_image: None,
        }
    }
}
