use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};

use crate::{
    core::{
        grid::{CellEffect, FullImagePlan, GridController, ShareOutcome},
        history::GridError,
    },
    layout::CellSize,
    photo::{ImageHandle, PhotoDraft, PhotoEntry},
    remote::{ImageLoader, RemoteError, RemoteResult, SearchProvider, ShareDisposition, ShareExporter},
    types::GridCoord,
};

use super::events::GridEvent;

/// Handle-level failure.
#[derive(Debug)]
pub enum RuntimeError {
    /// Coordinate or identity outside current grid bounds.
    Grid(GridError),
    /// Collaborator failure, including a saturated request queue.
    Remote(RemoteError),
    /// The runtime task is gone.
    ChannelClosed,
}

impl From<GridError> for RuntimeError {
    fn from(value: GridError) -> Self {
        Self::Grid(value)
    }
}

impl From<RemoteError> for RuntimeError {
    fn from(value: RemoteError) -> Self {
        Self::Remote(value)
    }
}

/// The three external collaborators the runtime drives.
pub struct Collaborators {
    /// Free-text photo search.
    pub search: Box<dyn SearchProvider>,
    /// Full-size image fetch.
    pub loader: Box<dyn ImageLoader>,
    /// Platform share surface.
    pub exporter: Box<dyn ShareExporter>,
}

/// Runtime channel sizing.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Bound of the command channel into the writer loop.
    pub cmd_queue_bound: usize,
    /// Bound of the request queue into the remote worker.
    pub remote_queue_bound: usize,
    /// Capacity of the broadcast event stream.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cmd_queue_bound: 256,
            remote_queue_bound: 64,
            events_capacity: 1024,
        }
    }
}

/// Cloneable handle to the single-writer grid runtime.
pub struct PhotoGridHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<GridEvent>,
}

impl Clone for PhotoGridHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    Search {
        term: String,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    SectionCount {
        resp: oneshot::Sender<usize>,
    },
    RowCount {
        section: usize,
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    Entry {
        coord: GridCoord,
        resp: oneshot::Sender<Result<PhotoEntry, RuntimeError>>,
    },
    Term {
        section: usize,
        resp: oneshot::Sender<Result<String, RuntimeError>>,
    },
    SizeFor {
        coord: GridCoord,
        available_width: f32,
        available_height: f32,
        resp: oneshot::Sender<Result<CellSize, RuntimeError>>,
    },
    SelectCell {
        coord: GridCoord,
        resp: oneshot::Sender<Result<CellEffect, RuntimeError>>,
    },
    DeselectCell {
        coord: GridCoord,
        resp: oneshot::Sender<Result<CellEffect, RuntimeError>>,
    },
    MoveEntry {
        from: GridCoord,
        to: GridCoord,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    RequestFullImage {
        coord: GridCoord,
        resp: oneshot::Sender<Result<Option<ImageHandle>, RuntimeError>>,
    },
    SharePressed {
        resp: oneshot::Sender<Result<ShareOutcome, RuntimeError>>,
    },
    SelectedCount {
        resp: oneshot::Sender<usize>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

enum RemoteMsg {
    Search {
        term: String,
    },
    LoadFull {
        id: crate::types::PhotoId,
    },
    Export {
        images: Vec<ImageHandle>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

enum Completion {
    Search {
        term: String,
        result: RemoteResult<Vec<PhotoDraft>>,
    },
    FullImage {
        id: crate::types::PhotoId,
        result: RemoteResult<ImageHandle>,
    },
    Export {
        result: RemoteResult<ShareDisposition>,
    },
}

/// Spawns the writer loop plus the remote worker and returns a handle.
///
/// All grid mutation happens on the writer task; collaborator calls run
/// on the remote worker via blocking tasks, and their completions are
/// applied in completion order.
pub fn spawn_photo_grid(
    grid: GridController,
    collaborators: Collaborators,
    config: RuntimeConfig,
) -> PhotoGridHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<GridEvent>(config.events_capacity);
    let (remote_tx, remote_rx) = mpsc::channel::<RemoteMsg>(config.remote_queue_bound);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();

    spawn_remote_worker(collaborators, remote_rx, done_tx);

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut grid = grid;

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break; };
                    let done = handle_command(cmd, &mut grid, &events_tx_loop, &remote_tx).await;
                    if done {
                        break;
                    }
                }
                completion = done_rx.recv() => {
                    if let Some(completion) = completion {
                        apply_completion(completion, &mut grid, &events_tx_loop);
                    }
                }
            }
        }
    });

    PhotoGridHandle { cmd_tx, events_tx }
}

impl PhotoGridHandle {
    /// Subscribes to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<GridEvent> {
        self.events_tx.subscribe()
    }

    /// Issues a search; the result arrives as a
    /// [`GridEvent::SearchInserted`] or [`GridEvent::SearchFailed`].
    pub async fn search(&self, term: impl Into<String>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Search {
                term: term.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Number of grid sections.
    pub async fn section_count(&self) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SectionCount { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Number of cells in a section.
    pub async fn row_count(&self, section: usize) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::RowCount { section, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Entry at a coordinate.
    pub async fn entry_at(&self, coord: GridCoord) -> Result<PhotoEntry, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Entry { coord, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Search term heading a section.
    pub async fn term(&self, section: usize) -> Result<String, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Term { section, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Display size for a cell.
    pub async fn size_for(
        &self,
        coord: GridCoord,
        available_width: f32,
        available_height: f32,
    ) -> Result<CellSize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SizeFor {
                coord,
                available_width,
                available_height,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Taps a cell: enlargement toggle or selection, depending on mode.
    pub async fn select_cell(&self, coord: GridCoord) -> Result<CellEffect, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SelectCell { coord, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Removes a cell from the selection (sharing mode only).
    pub async fn deselect_cell(&self, coord: GridCoord) -> Result<CellEffect, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::DeselectCell { coord, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Relocates one entry, possibly across sections.
    pub async fn move_entry(&self, from: GridCoord, to: GridCoord) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::MoveEntry { from, to, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Requests the full-size image for a cell.
    ///
    /// Returns the handle immediately when cached; otherwise a load is
    /// issued and the outcome arrives as [`GridEvent::FullImageReady`] or
    /// [`GridEvent::FullImageFailed`].
    pub async fn request_full_image(
        &self,
        coord: GridCoord,
    ) -> Result<Option<ImageHandle>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::RequestFullImage { coord, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Presses the share control.
    pub async fn share_pressed(&self) -> Result<ShareOutcome, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SharePressed { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Current number of selected photos.
    pub async fn selected_count(&self) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SelectedCount { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Stops the runtime and its remote worker.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}

async fn handle_command(
    cmd: Command,
    grid: &mut GridController,
    events_tx: &broadcast::Sender<GridEvent>,
    remote_tx: &mpsc::Sender<RemoteMsg>,
) -> bool {
    match cmd {
        Command::Search { term, resp } => {
            let res = enqueue_remote(
                remote_tx,
                RemoteMsg::Search { term: term.clone() },
                |reason| RemoteError::SearchFailed(reason),
            );
            let _ = resp.send(res);
        }
        Command::SectionCount { resp } => {
            let _ = resp.send(grid.section_count());
        }
        Command::RowCount { section, resp } => {
            let _ = resp.send(grid.row_count(section).map_err(RuntimeError::from));
        }
        Command::Entry { coord, resp } => {
            let _ = resp.send(grid.entry_at(coord).cloned().map_err(RuntimeError::from));
        }
        Command::Term { section, resp } => {
            let _ = resp.send(
                grid.term(section)
                    .map(str::to_string)
                    .map_err(RuntimeError::from),
            );
        }
        Command::SizeFor {
            coord,
            available_width,
            available_height,
            resp,
        } => {
            let _ = resp.send(
                grid.size_for(coord, available_width, available_height)
                    .map_err(RuntimeError::from),
            );
        }
        Command::SelectCell { coord, resp } => {
            let res = grid.select_cell(coord).map_err(RuntimeError::from);
            if let Ok(effect) = &res {
                emit_cell_effect(events_tx, effect);
            }
            let _ = resp.send(res);
        }
        Command::DeselectCell { coord, resp } => {
            let res = grid.deselect_cell(coord).map_err(RuntimeError::from);
            if let Ok(effect) = &res {
                emit_cell_effect(events_tx, effect);
            }
            let _ = resp.send(res);
        }
        Command::MoveEntry { from, to, resp } => {
            let _ = resp.send(grid.move_entry(from, to).map_err(RuntimeError::from));
        }
        Command::RequestFullImage { coord, resp } => {
            let res = match grid.full_image_plan(coord) {
                Ok(FullImagePlan::Ready(handle)) => Ok(Some(handle)),
                Ok(FullImagePlan::NeedsLoad(id)) => enqueue_remote(
                    remote_tx,
                    RemoteMsg::LoadFull { id },
                    |reason| RemoteError::LoadFailed(reason),
                )
                .map(|()| None),
                Err(err) => Err(RuntimeError::from(err)),
            };
            let _ = resp.send(res);
        }
        Command::SharePressed { resp } => {
            let outcome = grid.share_pressed();
            let res = match &outcome {
                ShareOutcome::SharingStarted { invalidate } => {
                    let _ = events_tx.send(GridEvent::SharingChanged { sharing: true });
                    let _ = events_tx.send(GridEvent::SelectionCountChanged { selected: 0 });
                    if !invalidate.reload.is_empty() {
                        let _ = events_tx.send(GridEvent::EnlargementChanged {
                            invalidate: invalidate.clone(),
                        });
                    }
                    Ok(outcome.clone())
                }
                ShareOutcome::SharingStopped => {
                    let _ = events_tx.send(GridEvent::SharingChanged { sharing: false });
                    Ok(outcome.clone())
                }
                ShareOutcome::Export { images, .. } => enqueue_remote(
                    remote_tx,
                    RemoteMsg::Export {
                        images: images.clone(),
                    },
                    |reason| RemoteError::ExportFailed(reason),
                )
                .map(|()| outcome.clone()),
                ShareOutcome::Ignored => Ok(outcome.clone()),
            };
            let _ = resp.send(res);
        }
        Command::SelectedCount { resp } => {
            let _ = resp.send(grid.selected_count());
        }
        Command::Shutdown { resp } => {
            let (done_tx, done_rx) = oneshot::channel();
            let out = if remote_tx
                .send(RemoteMsg::Shutdown { resp: done_tx })
                .await
                .is_err()
            {
                Err(RuntimeError::ChannelClosed)
            } else {
                done_rx.await.map_err(|_| RuntimeError::ChannelClosed)
            };
            let _ = resp.send(out);
            return true;
        }
    }

    false
}

fn apply_completion(
    completion: Completion,
    grid: &mut GridController,
    events_tx: &broadcast::Sender<GridEvent>,
) {
    match completion {
        Completion::Search { term, result } => match result {
            Ok(drafts) => {
                let count = grid.insert_search(term.clone(), drafts);
                tracing::debug!(%term, count, "search inserted");
                let _ = events_tx.send(GridEvent::SearchInserted { term, count });
            }
            Err(err) => {
                tracing::warn!(%term, %err, "search failed");
                let _ = events_tx.send(GridEvent::SearchFailed {
                    term,
                    reason: err.to_string(),
                });
            }
        },
        Completion::FullImage { id, result } => match result {
            Ok(handle) => match grid.apply_full_image(&id, handle) {
                Ok(coord) => {
                    if coord.is_none() {
                        tracing::debug!(%id, "stale full-image load cached only");
                    }
                    let _ = events_tx.send(GridEvent::FullImageReady { id, coord });
                }
                Err(err) => {
                    tracing::warn!(%id, ?err, "full-image completion for unknown photo");
                }
            },
            Err(err) => {
                tracing::warn!(%id, %err, "full-image load failed");
                let _ = events_tx.send(GridEvent::FullImageFailed {
                    id,
                    reason: err.to_string(),
                });
            }
        },
        Completion::Export { result } => {
            grid.finish_share();
            match result {
                Ok(disposition) => {
                    let _ = events_tx.send(GridEvent::ShareFinished { disposition });
                }
                Err(err) => {
                    tracing::warn!(%err, "share export failed");
                    let _ = events_tx.send(GridEvent::ShareFailed {
                        reason: err.to_string(),
                    });
                }
            }
            let _ = events_tx.send(GridEvent::SelectionCountChanged { selected: 0 });
            let _ = events_tx.send(GridEvent::SharingChanged { sharing: false });
        }
    }
}

fn emit_cell_effect(events_tx: &broadcast::Sender<GridEvent>, effect: &CellEffect) {
    match effect {
        CellEffect::Invalidate(invalidate) => {
            let _ = events_tx.send(GridEvent::EnlargementChanged {
                invalidate: invalidate.clone(),
            });
        }
        CellEffect::SelectionChanged { selected } => {
            let _ = events_tx.send(GridEvent::SelectionCountChanged {
                selected: *selected,
            });
        }
        CellEffect::Noop => {}
    }
}

fn enqueue_remote(
    tx: &mpsc::Sender<RemoteMsg>,
    msg: RemoteMsg,
    err: impl FnOnce(String) -> RemoteError,
) -> Result<(), RuntimeError> {
    tx.try_send(msg)
        .map_err(|e| RuntimeError::Remote(err(format!("request queue: {e}"))))
}

fn spawn_remote_worker(
    collaborators: Collaborators,
    mut rx: mpsc::Receiver<RemoteMsg>,
    done_tx: mpsc::UnboundedSender<Completion>,
) {
    let remotes = Arc::new(Mutex::new(collaborators));
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg {
                RemoteMsg::Search { term } => {
                    let remotes = Arc::clone(&remotes);
                    let t = term.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        remotes.blocking_lock().search.search(&t)
                    })
                    .await
                    .unwrap_or_else(|e| Err(RemoteError::SearchFailed(format!("join error: {e}"))));
                    let _ = done_tx.send(Completion::Search { term, result });
                }
                RemoteMsg::LoadFull { id } => {
                    let remotes = Arc::clone(&remotes);
                    let photo_id = id.clone();
                    let result = tokio::task::spawn_blocking(move || {
                        remotes.blocking_lock().loader.load_full_image(&photo_id)
                    })
                    .await
                    .unwrap_or_else(|e| Err(RemoteError::LoadFailed(format!("join error: {e}"))));
                    let _ = done_tx.send(Completion::FullImage { id, result });
                }
                RemoteMsg::Export { images } => {
                    let remotes = Arc::clone(&remotes);
                    let result = tokio::task::spawn_blocking(move || {
                        remotes.blocking_lock().exporter.export(&images)
                    })
                    .await
                    .unwrap_or_else(|e| Err(RemoteError::ExportFailed(format!("join error: {e}"))));
                    let _ = done_tx.send(Completion::Export { result });
                }
                RemoteMsg::Shutdown { resp } => {
                    let _ = resp.send(());
                    break;
                }
            }
        }
    });
}
