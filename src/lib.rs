//! Grid-state core for a searchable photo browser.
//!
//! Searches against an image service produce ordered result sets shown as
//! a section/row grid, newest search first. The crate owns enlargement,
//! multi-select sharing, cell sizing, and reconciliation of asynchronous
//! image loads against a grid whose contents shift while loads are in
//! flight. Rendering and networking stay outside: operations return
//! explicit render instructions, and collaborators plug in behind traits.
//!
//! # Examples
//!
//! Synchronous usage with [`core::grid::GridController`]:
//! ```
//! use photogrid::{
//!     core::grid::{CellEffect, GridController},
//!     layout::GridConfig,
//!     photo::{ImageHandle, PhotoDraft},
//!     types::GridCoord,
//! };
//!
//! let mut grid = GridController::new(GridConfig::default());
//! grid.insert_search(
//!     "cats",
//!     vec![PhotoDraft {
//!         id: "p1".to_string(),
//!         title: "a cat".to_string(),
//!         width: 640,
//!         height: 480,
//!         thumbnail: Some(ImageHandle { bytes: vec![1] }),
//!     }],
//! );
//! assert_eq!(grid.section_count(), 1);
//!
//! let effect = grid.select_cell(GridCoord::new(0, 0)).expect("in bounds");
//! assert!(matches!(effect, CellEffect::Invalidate(_)));
//! assert_eq!(grid.enlarged_coord(), Some(GridCoord::new(0, 0)));
//! ```
//!
//! Runtime usage with plugged-in collaborators:
//! ```no_run
//! use photogrid::{
//!     core::grid::GridController,
//!     layout::GridConfig,
//!     photo::{ImageHandle, PhotoDraft},
//!     remote::{
//!         ImageLoader, RemoteResult, SearchProvider, ShareDisposition, ShareExporter,
//!     },
//!     runtime::handle::{Collaborators, RuntimeConfig, spawn_photo_grid},
//! };
//!
//! struct StubSearch;
//! impl SearchProvider for StubSearch {
//!     fn search(&mut self, term: &str) -> RemoteResult<Vec<PhotoDraft>> {
//!         Ok(vec![PhotoDraft {
//!             id: format!("{term}-1"),
//!             title: term.to_string(),
//!             width: 640,
//!             height: 480,
//!             thumbnail: None,
//!         }])
//!     }
//! }
//!
//! struct StubLoader;
//! impl ImageLoader for StubLoader {
//!     fn load_full_image(&mut self, _id: &str) -> RemoteResult<ImageHandle> {
//!         Ok(ImageHandle { bytes: vec![0] })
//!     }
//! }
//!
//! struct StubExporter;
//! impl ShareExporter for StubExporter {
//!     fn export(&mut self, _images: &[ImageHandle]) -> RemoteResult<ShareDisposition> {
//!         Ok(ShareDisposition::Completed)
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_photo_grid(
//!     GridController::new(GridConfig::default()),
//!     Collaborators {
//!         search: Box::new(StubSearch),
//!         loader: Box::new(StubLoader),
//!         exporter: Box::new(StubExporter),
//!     },
//!     RuntimeConfig::default(),
//! );
//! handle.search("cats").await.expect("search issued");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Grid-state core: history, selection, and the controller.
pub mod core;
/// Cell sizing rules and layout configuration.
pub mod layout;
/// Photo domain records.
pub mod photo;
/// Collaborator traits for search, image loading, and export.
pub mod remote;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared identifier and coordinate types.
pub mod types;
