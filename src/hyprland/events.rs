//! Translates Hyprland's event stream into [`CompositorEvent`]s.
//!
//! Hyprland broadcasts `EVENT>>DATA\n` lines on its event socket
//! (`socket2`) at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket2.sock`.
//!
//! | Event                                   | Payload               | Emits                    |
//! |-----------------------------------------|-----------------------|--------------------------|
//! | `workspace`                             | `<name>`              | `ActiveWorkspaceChanged` |
//! | `workspacev2`                           | `<id>,<name>`         | `ActiveWorkspaceChanged` |
//! | `focusedmon`                            | `<mon>,<name>`        | `ActiveWorkspaceChanged` |
//! | `focusedmonv2`                          | `<mon>,<id>`          | `ActiveWorkspaceChanged` |
//! | `openwindow`, `closewindow`             | window data           | `WindowsChanged`         |
//! | `movewindow`, `movewindowv2`            | window data           | `WindowsChanged`         |
//! | `createworkspace(v2)`, `destroyworkspace(v2)`, `moveworkspace(v2)` | | `WindowsChanged` |
//!
//! Named workspaces have no numeric id and are ignored.  Hyprland sends
//! both the v1 and v2 form of most events; both are forwarded and the bar
//! drops repeats.

use crate::command::CompositorEvent;
use crate::hyprland::wm::instance_socket;
use crate::traits::EventSource;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::sync::mpsc;

/// An [`EventSource`] reading Hyprland's event socket.
#[derive(Debug, Default)]
pub struct HyprlandEventSource;

impl HyprlandEventSource {
    pub fn new() -> Self {
        Self
    }
}

/// Error from the Hyprland event source.
#[derive(Debug, thiserror::Error)]
#[error("hyprland event error: {0}")]
pub struct HyprlandEventError(String);

/// Split a socket2 line into `(event, data)`.
fn parse_event_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(">>")
}

/// Map one event to the bar's vocabulary, if it is relevant.
fn translate(event: &str, data: &str) -> Option<CompositorEvent> {
    match event {
        "workspace" => parse_id(data).map(CompositorEvent::ActiveWorkspaceChanged),
        "workspacev2" => {
            let (id, _name) = data.split_once(',')?;
            parse_id(id).map(CompositorEvent::ActiveWorkspaceChanged)
        }
        "focusedmon" | "focusedmonv2" => {
            let (_monitor, ws) = data.split_once(',')?;
            parse_id(ws).map(CompositorEvent::ActiveWorkspaceChanged)
        }
        "openwindow" | "closewindow" | "movewindow" | "movewindowv2" | "createworkspace"
        | "createworkspacev2" | "destroyworkspace" | "destroyworkspacev2" | "moveworkspace"
        | "moveworkspacev2" => Some(CompositorEvent::WindowsChanged),
        _ => None,
    }
}

fn parse_id(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

impl EventSource for HyprlandEventSource {
    type Error = HyprlandEventError;

    /// Connect to Hyprland's event socket and forward relevant events.
    ///
    /// This method **blocks** until the socket closes.  Run it on a
    /// dedicated thread.
    fn run(&mut self, sink: mpsc::Sender<CompositorEvent>) -> Result<(), Self::Error> {
        let path = instance_socket(".socket2.sock").map_err(HyprlandEventError)?;
        let stream = UnixStream::connect(&path)
            .map_err(|e| HyprlandEventError(format!("connect to {}: {}", path.display(), e)))?;
        info!("event source connected to {}", path.display());

        for line in BufReader::new(stream).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("socket2 read error: {}", e);
                    return Err(HyprlandEventError(format!("read error: {}", e)));
                }
            };
            let Some(event) = parse_event_line(&line).and_then(|(ev, data)| translate(ev, data))
            else {
                continue;
            };
            debug!("{} → {:?}", line, event);
            if sink.send(event).is_err() {
                info!("sink closed, shutting down");
                return Ok(());
            }
        }

        warn!("socket2 stream ended");
        Ok(())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CompositorEvent::*;

    fn line(s: &str) -> Option<CompositorEvent> {
        parse_event_line(s).and_then(|(ev, data)| translate(ev, data))
    }

    #[test]
    fn parse_event_line_valid() {
        assert_eq!(parse_event_line("workspace>>3"), Some(("workspace", "3")));
        assert_eq!(
            parse_event_line("openwindow>>80a6f50,2,kitty,kitty"),
            Some(("openwindow", "80a6f50,2,kitty,kitty"))
        );
    }

    #[test]
    fn parse_event_line_no_separator() {
        assert_eq!(parse_event_line("garbage"), None);
    }

    #[test]
    fn active_workspace_events() {
        assert_eq!(line("workspace>>4"), Some(ActiveWorkspaceChanged(4)));
        assert_eq!(line("workspacev2>>7,7"), Some(ActiveWorkspaceChanged(7)));
        assert_eq!(line("focusedmon>>DP-1,2"), Some(ActiveWorkspaceChanged(2)));
        assert_eq!(line("focusedmonv2>>HDMI-A-1,5"), Some(ActiveWorkspaceChanged(5)));
    }

    #[test]
    fn named_workspaces_ignored() {
        assert_eq!(line("workspace>>music"), None);
        assert_eq!(line("focusedmon>>DP-1,music"), None);
        assert_eq!(line("workspacev2>>garbage"), None);
    }

    /// Range checks belong to the bar, so special ids pass through raw.
    #[test]
    fn special_workspace_id_passed_through() {
        assert_eq!(
            line("workspacev2>>-98,special:scratch"),
            Some(ActiveWorkspaceChanged(-98))
        );
    }

    #[test]
    fn window_events() {
        for ev in [
            "openwindow>>80a6f50,2,kitty,kitty",
            "closewindow>>80a6f50",
            "movewindow>>80a6f50,3",
            "movewindowv2>>80a6f50,3,3",
            "createworkspace>>6",
            "destroyworkspacev2>>6,6",
            "moveworkspace>>2,DP-1",
        ] {
            assert_eq!(line(ev), Some(WindowsChanged), "{}", ev);
        }
    }

    #[test]
    fn unrelated_events_ignored() {
        assert_eq!(line("activewindow>>kitty,~"), None);
        assert_eq!(line("submap>>resize"), None);
    }
}
