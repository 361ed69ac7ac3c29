//! The bar model that ties occupancy, the indicator, and the command
//! issuer together.
//!
//! [`WorkspaceBar`] owns a fixed row of [`SlotView`]s and the
//! [`ActiveIndicator`].  It reacts to [`CompositorEvent`]s by recomputing
//! presentation state and to [`Gesture`]s by issuing commands.  It never
//! touches a widget; a view asks for the [`Redraw`] it needs to do.

use crate::command::{CompositorEvent, Gesture, Surface, WorkspaceCommand};
use crate::indicator::{ActiveIndicator, IndicatorLayout, IndicatorOffset};
use crate::issuer::WorkspaceCommandIssuer;
use crate::occupancy::{classify, OccupancySnapshot, VisualOccupancyClass};
use crate::traits::{Compositor, Shell};
use crate::workspace::WorkspaceIndex;
use log::{debug, info, warn};
use std::sync::mpsc;

/// Presentation state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView {
    pub index: WorkspaceIndex,
    pub class: VisualOccupancyClass,
}

/// What a view has to repaint after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Redraw {
    pub slots: bool,
    pub indicator: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        slots: false,
        indicator: false,
    };

    pub fn any(self) -> bool {
        self.slots || self.indicator
    }
}

/// Presentation model of the workspace row.
///
/// # Typical usage
///
/// ```ignore
/// let commands = spawn_dispatcher(HyprlandCompositor::new());
/// let mut bar = WorkspaceBar::new(9, IndicatorLayout::default(), commands, shell);
/// bar.refresh(&HyprlandCompositor::new());
/// bar.handle_gesture(Gesture::ScrollDown);
/// ```
pub struct WorkspaceBar<S: Shell> {
    slots: Vec<SlotView>,
    indicator: ActiveIndicator,
    issuer: WorkspaceCommandIssuer,
    shell: S,
}

impl<S: Shell> WorkspaceBar<S> {
    /// Create a bar of `count` empty slots that queues its workspace
    /// commands into `commands`.  The indicator has no position until the
    /// first active-workspace update.
    pub fn new(
        count: usize,
        layout: IndicatorLayout,
        commands: mpsc::Sender<WorkspaceCommand>,
        shell: S,
    ) -> Self {
        let slots = WorkspaceIndex::all(count)
            .map(|index| SlotView {
                index,
                class: VisualOccupancyClass::None,
            })
            .collect();

        Self {
            slots,
            indicator: ActiveIndicator::new(count, layout),
            issuer: WorkspaceCommandIssuer::new(count, commands),
            shell,
        }
    }

    /// Number of slots.  Fixed for the bar's lifetime.
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[SlotView] {
        &self.slots
    }

    pub fn indicator_offset(&self) -> IndicatorOffset {
        self.indicator.offset()
    }

    pub fn active(&self) -> Option<WorkspaceIndex> {
        self.indicator.active()
    }

    pub fn layout(&self) -> &IndicatorLayout {
        self.indicator.layout()
    }

    /// Pull the full state from `compositor`, e.g. at startup.
    pub fn refresh<C: Compositor>(&mut self, compositor: &C) -> Redraw {
        let mut redraw = self.refresh_occupancy(compositor);
        match compositor.active_workspace() {
            Ok(id) => redraw.indicator = self.indicator.update(id),
            Err(e) => warn!("active workspace query failed: {}", e),
        }
        redraw
    }

    /// Process a single [`CompositorEvent`].
    ///
    /// Active-workspace changes only move the indicator; window changes
    /// only restyle the slots.
    pub fn handle_event<C: Compositor>(&mut self, event: CompositorEvent, compositor: &C) -> Redraw {
        match event {
            CompositorEvent::ActiveWorkspaceChanged(id) => {
                let moved = self.indicator.update(id);
                if moved {
                    debug!("indicator → {:?} ({:.3}rem)", self.active(), self.indicator_offset().rem());
                }
                Redraw {
                    slots: false,
                    indicator: moved,
                }
            }
            CompositorEvent::WindowsChanged => self.refresh_occupancy(compositor),
        }
    }

    /// Restyle every slot from `snapshot`.
    ///
    /// Returns `true` if any slot changed class.
    pub fn apply_occupancy(&mut self, snapshot: &OccupancySnapshot) -> bool {
        let classes = classify(snapshot);
        let mut changed = false;
        for (slot, class) in self.slots.iter_mut().zip(classes) {
            if slot.class != class {
                slot.class = class;
                changed = true;
            }
        }
        changed
    }

    /// Route a user gesture.
    pub fn handle_gesture(&self, gesture: Gesture) {
        match gesture {
            Gesture::ScrollUp => self.issuer.previous(),
            Gesture::ScrollDown => self.issuer.next(),
            Gesture::SecondaryClick { slot } => {
                if let Err(e) = self.issuer.switch_to(slot) {
                    warn!("ignoring click: {}", e);
                }
            }
            Gesture::PrimaryClick => self.toggle(Surface::Overview),
            Gesture::MiddleClick => self.toggle(Surface::OnScreenKeyboard),
        }
    }

    fn toggle(&self, surface: Surface) {
        info!("toggle {}", surface);
        if let Err(e) = self.shell.toggle_surface(surface) {
            warn!("toggle {} failed: {}", surface, e);
        }
    }

    fn refresh_occupancy<C: Compositor>(&mut self, compositor: &C) -> Redraw {
        match compositor.workspaces() {
            Ok(workspaces) => {
                let snapshot = OccupancySnapshot::from_workspaces(self.count(), &workspaces);
                Redraw {
                    slots: self.apply_occupancy(&snapshot),
                    indicator: false,
                }
            }
            Err(e) => {
                warn!("workspace query failed, keeping previous styling: {}", e);
                Redraw::NONE
            }
        }
    }
}

//  Tests
