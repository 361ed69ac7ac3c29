//! Fire-and-forget workspace commands.
//!
//! [`WorkspaceCommandIssuer`] is what the bar holds.  It validates
//! requests and queues them; a dispatch worker started with
//! [`spawn_dispatcher`] drains the queue on its own thread and forwards
//! each command to a [`Compositor`].  Nothing on the UI thread ever waits
//! for the compositor, and dispatch failures end in the log.

use crate::command::WorkspaceCommand;
use crate::traits::Compositor;
use crate::workspace::{WorkspaceIndex, WorkspaceIndexError};
use log::{debug, info, warn};
use std::sync::mpsc;
use std::thread;

/// Issues workspace-switch requests without waiting for the result.
#[derive(Debug, Clone)]
pub struct WorkspaceCommandIssuer {
    count: usize,
    tx: mpsc::Sender<WorkspaceCommand>,
}

impl WorkspaceCommandIssuer {
    /// Create an issuer for a row of `count` slots that queues into `tx`.
    pub fn new(count: usize, tx: mpsc::Sender<WorkspaceCommand>) -> Self {
        Self { count, tx }
    }

    /// Switch to the next workspace.
    pub fn next(&self) {
        self.issue(WorkspaceCommand::Next);
    }

    /// Switch to the previous workspace.
    pub fn previous(&self) {
        self.issue(WorkspaceCommand::Previous);
    }

    /// Switch to workspace `index`.
    ///
    /// Indices outside the row are rejected and nothing is dispatched.
    pub fn switch_to(&self, index: i32) -> Result<(), WorkspaceIndexError> {
        let index = WorkspaceIndex::new(index, self.count)?;
        self.issue(WorkspaceCommand::SwitchTo(index));
        Ok(())
    }

    fn issue(&self, command: WorkspaceCommand) {
        debug!("queue {}", command);
        if self.tx.send(command).is_err() {
            warn!("dispatcher is gone, dropping {}", command);
        }
    }
}

/// Start the dispatch worker.
///
/// The worker exits once every issuer holding the returned sender has been
/// dropped.
pub fn spawn_dispatcher<C>(compositor: C) -> mpsc::Sender<WorkspaceCommand>
where
    C: Compositor + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<WorkspaceCommand>();
    thread::spawn(move || {
        for command in rx {
            match compositor.dispatch(&command) {
                Ok(()) => debug!("dispatched {}", command),
                Err(e) => warn!("dispatch {} failed: {}", command, e),
            }
        }
        info!("dispatcher stopped");
    });
    tx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::WorkspaceInfo;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn issuer() -> (WorkspaceCommandIssuer, mpsc::Receiver<WorkspaceCommand>) {
        let (tx, rx) = mpsc::channel();
        (WorkspaceCommandIssuer::new(9, tx), rx)
    }

    #[test]
    fn relative_commands_are_queued() {
        let (iss, rx) = issuer();
        iss.next();
        iss.previous();
        let cmds: Vec<WorkspaceCommand> = rx.try_iter().collect();
        assert_eq!(cmds, vec![WorkspaceCommand::Next, WorkspaceCommand::Previous]);
    }

    #[test]
    fn switch_to_valid() {
        let (iss, rx) = issuer();
        iss.switch_to(5).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            WorkspaceCommand::SwitchTo(WorkspaceIndex::new(5, 9).unwrap())
        );
    }

    #[test]
    fn switch_to_out_of_range_dispatches_nothing() {
        let (iss, rx) = issuer();
        assert!(iss.switch_to(0).is_err());
        assert!(iss.switch_to(10).is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dead_dispatcher_is_not_an_error() {
        let (iss, rx) = issuer();
        drop(rx);
        iss.next();
        assert!(iss.switch_to(3).is_ok());
    }

    //  Dispatch worker

    #[derive(Debug, thiserror::Error)]
    #[error("unreachable compositor")]
    struct Unreachable;

    /// Records dispatches and fails every other one.
    #[derive(Clone, Default)]
    struct FlakyCompositor {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Compositor for FlakyCompositor {
        type Error = Unreachable;

        fn dispatch(&self, command: &WorkspaceCommand) -> Result<(), Unreachable> {
            let mut log = self.log.lock().unwrap();
            log.push(command.dispatch_args());
            if log.len() % 2 == 0 {
                Err(Unreachable)
            } else {
                Ok(())
            }
        }

        fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, Unreachable> {
            Ok(Vec::new())
        }

        fn active_workspace(&self) -> Result<i32, Unreachable> {
            Ok(1)
        }
    }

    #[test]
    fn worker_survives_failures() {
        let wm = FlakyCompositor::default();
        let log = wm.log.clone();
        let iss = WorkspaceCommandIssuer::new(9, spawn_dispatcher(wm));

        iss.next();
        iss.previous();
        iss.switch_to(2).unwrap();

        for _ in 0..50 {
            if log.lock().unwrap().len() == 3 {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(
            *log.lock().unwrap(),
            vec!["workspace +1", "workspace -1", "workspace 2"]
        );
    }
}
