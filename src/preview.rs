//! In-process compositor for `--preview` mode.
//!
//! Lets the bar run without Hyprland: dispatches move a simulated active
//! workspace and feed the change back as a [`CompositorEvent`], and
//! occupancy follows a fixed pattern.

use crate::command::{CompositorEvent, WorkspaceCommand, WorkspaceInfo};
use crate::traits::Compositor;
use log::debug;
use std::sync::{mpsc, Arc, Mutex};

/// Workspaces that report windows in preview mode.
const PREVIEW_OCCUPIED: [i32; 4] = [1, 2, 3, 6];

#[derive(Debug, thiserror::Error)]
#[error("preview compositor: {0}")]
pub struct PreviewError(&'static str);

/// A [`Compositor`] that keeps its own active workspace.
///
/// Clones share state, so one handle can go to the dispatch worker and
/// another to the UI thread.
#[derive(Debug, Clone)]
pub struct PreviewCompositor {
    count: usize,
    active: Arc<Mutex<i32>>,
    events: mpsc::Sender<CompositorEvent>,
}

impl PreviewCompositor {
    /// Create a preview compositor for a row of `count` slots that reports
    /// changes into `events`.
    pub fn new(count: usize, events: mpsc::Sender<CompositorEvent>) -> Self {
        Self {
            count,
            active: Arc::new(Mutex::new(1)),
            events,
        }
    }
}

impl Compositor for PreviewCompositor {
    type Error = PreviewError;

    /// Relative moves wrap around the row.
    fn dispatch(&self, command: &WorkspaceCommand) -> Result<(), PreviewError> {
        let count = self.count.max(1) as i32;
        let mut active = self.active.lock().map_err(|_| PreviewError("state poisoned"))?;
        *active = match command {
            WorkspaceCommand::Next => *active % count + 1,
            WorkspaceCommand::Previous => (*active + count - 2) % count + 1,
            WorkspaceCommand::SwitchTo(index) => index.get() as i32,
        };
        debug!("preview: {} → active {}", command, *active);
        self.events
            .send(CompositorEvent::ActiveWorkspaceChanged(*active))
            .map_err(|_| PreviewError("event sink closed"))
    }

    fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, PreviewError> {
        Ok(PREVIEW_OCCUPIED
            .iter()
            .map(|&id| WorkspaceInfo { id, windows: 1 })
            .collect())
    }

    fn active_workspace(&self) -> Result<i32, PreviewError> {
        self.active
            .lock()
            .map(|a| *a)
            .map_err(|_| PreviewError("state poisoned"))
    }
}
