//! [`Shell`] implementation that toggles surfaces by running a command.
//!
//! Each [`Surface`] maps to an argument vector from
//! [`SurfaceConfig`]; toggling spawns it and returns immediately.  The
//! child is reaped on a background thread so it never lingers as a
//! zombie, and a non-zero exit status is logged.

use crate::command::Surface;
use crate::config::SurfaceConfig;
use crate::traits::Shell;
use log::{debug, warn};
use std::process::{Command, Stdio};

/// Errors produced when a toggle command cannot be started.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("no command configured for {0}")]
    NotConfigured(Surface),
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A [`Shell`] that spawns one command per toggle.
#[derive(Debug, Clone)]
pub struct CommandShell {
    surfaces: SurfaceConfig,
}

impl CommandShell {
    pub fn new(surfaces: SurfaceConfig) -> Self {
        Self { surfaces }
    }
}

impl Shell for CommandShell {
    type Error = ShellError;

    fn toggle_surface(&self, surface: Surface) -> Result<(), ShellError> {
        let Some((program, args)) = self.surfaces.argv(surface).split_first() else {
            return Err(ShellError::NotConfigured(surface));
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: program.clone(),
                source,
            })?;
        debug!("spawned {} (pid {}) for {}", program, child.id(), surface);

        std::thread::spawn(move || match child.wait() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("{} toggle exited with {}", surface, status),
            Err(e) => warn!("{} toggle: wait failed: {}", surface, e),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(overview: &[&str]) -> CommandShell {
        CommandShell::new(SurfaceConfig {
            overview: overview.iter().map(|s| s.to_string()).collect(),
            on_screen_keyboard: Vec::new(),
        })
    }

    #[test]
    fn empty_argv_is_not_configured() {
        let err = shell(&[])
            .toggle_surface(Surface::OnScreenKeyboard)
            .unwrap_err();
        assert!(matches!(err, ShellError::NotConfigured(Surface::OnScreenKeyboard)));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let err = shell(&["/nonexistent/hyprwsbar-test-binary"])
            .toggle_surface(Surface::Overview)
            .unwrap_err();
        assert!(matches!(err, ShellError::Spawn { .. }));
    }

    #[test]
    fn spawn_returns_immediately() {
        assert!(shell(&["true"]).toggle_surface(Surface::Overview).is_ok());
    }
}
