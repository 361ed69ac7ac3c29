//! Core traits that decouple hyprwsbar from any specific compositor, host
//! shell or event transport.
//!
//! Every concrete backend (Hyprland, a preview stub, a test double, …)
//! implements one of these traits.  The [`WorkspaceBar`](crate::bar::WorkspaceBar)
//! only depends on these abstractions.

use crate::command::{CompositorEvent, Surface, WorkspaceCommand, WorkspaceInfo};
use std::sync::mpsc;

/// Abstraction over a compositor that owns workspaces.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// stub used in tests and preview mode.
pub trait Compositor {
    /// The error type produced by this compositor.
    type Error: std::error::Error + Send + 'static;

    /// Ask the compositor to change workspace.
    ///
    /// Called from the dispatch worker, never from the UI thread.
    fn dispatch(&self, command: &WorkspaceCommand) -> Result<(), Self::Error>;

    /// Window counts of every workspace the compositor currently knows.
    ///
    /// Workspaces that do not exist are simply absent.
    fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, Self::Error>;

    /// Raw id of the focused workspace.
    fn active_workspace(&self) -> Result<i32, Self::Error>;
}

/// The host shell that owns auxiliary windows such as the overview.
pub trait Shell {
    type Error: std::error::Error + Send + 'static;

    /// Show `surface` if hidden, hide it if shown.  Must not block.
    fn toggle_surface(&self, surface: Surface) -> Result<(), Self::Error>;
}

/// A source of [`CompositorEvent`]s.
///
/// # Contract
///
/// * [`run`](EventSource::run) **blocks** until the source is exhausted or
///   an unrecoverable error occurs.
/// * Implementations must be [`Send`] so they can run on a dedicated thread.
/// * A source should return `Ok(())` once `sink` is disconnected.
pub trait EventSource: Send {
    type Error: std::error::Error + Send + 'static;

    fn run(&mut self, sink: mpsc::Sender<CompositorEvent>) -> Result<(), Self::Error>;
}
