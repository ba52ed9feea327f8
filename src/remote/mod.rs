//! Collaborator seams for search, image loading, and share export.
//!
//! Implementations talk to the image service and the platform share
//! surface; the runtime drives them off the writer loop via blocking
//! tasks, so the calls here may block.

use crate::photo::{ImageHandle, PhotoDraft};

/// Failure surfaced by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The search term yielded no result set.
    SearchFailed(String),
    /// A full-image fetch failed; the thumbnail remains the fallback.
    LoadFailed(String),
    /// The share surface reported a failure.
    ExportFailed(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SearchFailed(reason) => write!(f, "search failed: {reason}"),
            Self::LoadFailed(reason) => write!(f, "image load failed: {reason}"),
            Self::ExportFailed(reason) => write!(f, "share export failed: {reason}"),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Convenience alias for collaborator results.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// How a presented share surface was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDisposition {
    /// The user completed the share.
    Completed,
    /// The user cancelled the share.
    Cancelled,
}

/// Free-text photo search against the image service.
pub trait SearchProvider: Send {
    /// Returns one page of parsed results for `term`.
    fn search(&mut self, term: &str) -> RemoteResult<Vec<PhotoDraft>>;
}

/// Full-size image fetch by photo identity.
pub trait ImageLoader: Send {
    /// Returns the decoded full-size image for `id`.
    fn load_full_image(&mut self, id: &str) -> RemoteResult<ImageHandle>;
}

/// Platform share surface for an ordered list of images.
pub trait ShareExporter: Send {
    /// Presents the share surface and reports how it was dismissed.
    fn export(&mut self, images: &[ImageHandle]) -> RemoteResult<ShareDisposition>;
}
