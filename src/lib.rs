//! **hyprwsbar**: a workspace indicator bar for Hyprland.
//!
//! The bar shows a fixed row of `N` workspace slots.  Slots holding
//! windows are styled as connected "pills", and a marker slides under the
//! active workspace.  Scrolling switches to the previous / next workspace,
//! a secondary click jumps to a slot, and primary / middle clicks toggle
//! host-shell surfaces.
//!
//! # Architecture
//!
//! The crate is organised around three traits:
//!
//! * [`traits::Compositor`]: dispatches workspace switches and answers
//!   occupancy queries, so the bar is not coupled to any compositor.
//! * [`traits::EventSource`]: delivers compositor state changes from a
//!   background thread.
//! * [`traits::Shell`]: toggles auxiliary surfaces such as the overview.
//!
//! The pure presentation logic lives in [`occupancy`] and [`indicator`];
//! [`bar::WorkspaceBar`] composes them.  Concrete implementations live in
//! [`hyprland`] (Hyprland IPC), [`shell`] (spawned commands) and
//! [`preview`] (no compositor needed).

pub mod bar;
pub mod command;
pub mod config;
pub mod hyprland;
pub mod indicator;
pub mod issuer;
pub mod occupancy;
pub mod preview;
pub mod shell;
pub mod traits;
pub mod view;
pub mod workspace;
