//! Front-ends that render a [`WorkspaceBar`](crate::bar::WorkspaceBar).
//!
//! When the `bar-gtk` feature is enabled, [`gtk::run_main_loop`] takes
//! over the main thread and drives event processing and rendering through
//! the GLib main loop.

#[cfg(feature = "bar-gtk")]
pub mod gtk;
