//! Commands, events and types used throughout hyprwsbar.
//!
//! This module defines the vocabulary that all components share:
//! [`WorkspaceCommand`] is what the bar asks the compositor to do,
//! [`Gesture`] is what the user did to the bar, [`CompositorEvent`] is
//! what the compositor tells the bar, and [`Surface`] names the host-shell
//! windows the bar can toggle.

use crate::workspace::WorkspaceIndex;
use std::fmt;

/// A workspace switch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceCommand {
    /// Relative `+1`.
    Next,
    /// Relative `-1`.
    Previous,
    /// Absolute, already validated against the row.
    SwitchTo(WorkspaceIndex),
}

impl WorkspaceCommand {
    /// The argument list passed to the compositor's `dispatch`, e.g.
    /// `workspace +1` or `workspace 4`.
    pub fn dispatch_args(&self) -> String {
        format!("workspace {}", self.target())
    }

    fn target(&self) -> String {
        match self {
            WorkspaceCommand::Next => "+1".into(),
            WorkspaceCommand::Previous => "-1".into(),
            WorkspaceCommand::SwitchTo(index) => index.to_string(),
        }
    }
}

impl fmt::Display for WorkspaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dispatch_args())
    }
}

/// A host-shell window that the bar can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Overview,
    OnScreenKeyboard,
}

impl Surface {
    pub fn name(self) -> &'static str {
        match self {
            Surface::Overview => "overview",
            Surface::OnScreenKeyboard => "on-screen-keyboard",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pointer gesture on the bar.
///
/// Slot numbers are raw 1-based positions as reported by the view; the bar
/// validates them before issuing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    ScrollUp,
    ScrollDown,
    /// Primary button released anywhere on the bar.
    PrimaryClick,
    /// Middle button released anywhere on the bar.
    MiddleClick,
    /// Secondary button on a specific slot.
    SecondaryClick { slot: i32 },
}

/// A state-change notification from the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorEvent {
    /// The focused workspace changed.  The id is the compositor's raw
    /// value and may lie outside the bar's row.
    ActiveWorkspaceChanged(i32),
    /// Something happened that may change which workspaces hold windows.
    /// Carries no data; the bar re-queries window counts.
    WindowsChanged,
}

/// Window count of one workspace, as reported by the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceInfo {
    pub id: i32,
    pub windows: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_args_format() {
        assert_eq!(WorkspaceCommand::Next.dispatch_args(), "workspace +1");
        assert_eq!(WorkspaceCommand::Previous.dispatch_args(), "workspace -1");
        let ws = WorkspaceIndex::new(7, 9).unwrap();
        assert_eq!(WorkspaceCommand::SwitchTo(ws).dispatch_args(), "workspace 7");
    }

    #[test]
    fn surface_names() {
        assert_eq!(Surface::Overview.to_string(), "overview");
        assert_eq!(Surface::OnScreenKeyboard.to_string(), "on-screen-keyboard");
    }
}
