//! [`Compositor`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! without spawning `hyprctl`.

use crate::command::{WorkspaceCommand, WorkspaceInfo};
use crate::traits::Compositor;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed compositor.
///
/// No connection is held; each call opens a short-lived IPC request.
#[derive(Debug, Clone, Copy, Default)]
pub struct HyprlandCompositor;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl HyprlandCompositor {
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve a socket in Hyprland's instance directory.
///
/// Hyprland ≥ 0.40 keeps its sockets in
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/`.
pub(crate) fn instance_socket(file: &str) -> Result<PathBuf, String> {
    let runtime_dir =
        std::env::var("XDG_RUNTIME_DIR").map_err(|_| "XDG_RUNTIME_DIR not set".to_string())?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| "HYPRLAND_INSTANCE_SIGNATURE not set".to_string())?;
    Ok(PathBuf::from(format!("{}/hypr/{}/{}", runtime_dir, his, file)))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandError> {
    let path = instance_socket(".socket.sock").map_err(HyprlandError)?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Send a dispatch and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandError> {
    check_dispatch_reply(&ipc_request(&format!("/dispatch {}", args))?)
}

fn check_dispatch_reply(response: &str) -> Result<(), HyprlandError> {
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandError(format!("dispatch error: {}", response.trim())))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of an object returned by `j/workspaces` and `j/activeworkspace`.
#[derive(Deserialize)]
struct WorkspaceJson {
    id: i32,
    #[serde(default)]
    windows: u32,
}

fn parse_workspaces(json: &str) -> Result<Vec<WorkspaceInfo>, HyprlandError> {
    let workspaces: Vec<WorkspaceJson> =
        serde_json::from_str(json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
    Ok(workspaces
        .into_iter()
        .map(|w| WorkspaceInfo {
            id: w.id,
            windows: w.windows,
        })
        .collect())
}

fn parse_active_workspace(json: &str) -> Result<i32, HyprlandError> {
    let ws: WorkspaceJson =
        serde_json::from_str(json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
    Ok(ws.id)
}

//  Compositor implementation

impl Compositor for HyprlandCompositor {
    type Error = HyprlandError;

    fn dispatch(&self, command: &WorkspaceCommand) -> Result<(), Self::Error> {
        ipc_dispatch(&command.dispatch_args())
    }

    fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, Self::Error> {
        parse_workspaces(&ipc_request("j/workspaces")?)
    }

    fn active_workspace(&self) -> Result<i32, Self::Error> {
        parse_active_workspace(&ipc_request("j/activeworkspace")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_workspace_list() {
        let json = r#"[
            {"id": 1, "name": "1", "monitor": "DP-1", "windows": 2, "hasfullscreen": false},
            {"id": 4, "name": "4", "monitor": "DP-1", "windows": 0},
            {"id": -98, "name": "special:scratch", "monitor": "DP-1", "windows": 1}
        ]"#;
        let ws = parse_workspaces(json).unwrap();
        assert_eq!(
            ws,
            vec![
                WorkspaceInfo { id: 1, windows: 2 },
                WorkspaceInfo { id: 4, windows: 0 },
                WorkspaceInfo { id: -98, windows: 1 },
            ]
        );
    }

    #[test]
    fn parses_active_workspace() {
        let json = r#"{"id": 3, "name": "3", "monitor": "DP-1", "windows": 1}"#;
        assert_eq!(parse_active_workspace(json).unwrap(), 3);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_workspaces("unknown request").is_err());
        assert!(parse_active_workspace("").is_err());
    }

    #[test]
    fn dispatch_reply() {
        assert!(check_dispatch_reply("ok\n").is_ok());
        let err = check_dispatch_reply("Invalid dispatcher").unwrap_err();
        assert!(err.to_string().contains("Invalid dispatcher"));
    }
}
