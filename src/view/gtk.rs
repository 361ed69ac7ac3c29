//! GTK4 + layer-shell bar that runs on the **main thread**.
//!
//! # Widget tree
//!
//! ```text
//! window                           (layer-shell, transparent)
//! └ .bar-group-center
//!     └ gtk4::Overlay
//!         ├ .bar-ws-row            (main child, padded by side_pad)
//!         │   ├ .bar-ws-slot > .bar-ws.txt "1"
//!         │   ├ .bar-ws-slot > .bar-ws.txt.bar-ws-occupied-left "2"
//!         │   └ …
//!         └ .bar-ws-active "•"     (overlay child, animated position)
//! ```
//!
//! # CSS selectors
//!
//! | Selector                      | Targets                              |
//! |-------------------------------|--------------------------------------|
//! | `.bar-group-center`           | Container around the row             |
//! | `.bar-ws-row`                 | The row of slots                     |
//! | `.bar-ws`                     | Every slot label                     |
//! | `.bar-ws-occupied`            | Occupied, inside a run               |
//! | `.bar-ws-occupied-left`       | Occupied, first of a run             |
//! | `.bar-ws-occupied-right`      | Occupied, last of a run              |
//! | `.bar-ws-occupied-left-right` | Occupied, alone                      |
//! | `.bar-ws-active`              | The active-workspace marker          |
//!
//! Slot width and row padding come from [`LayoutConfig`] and are emitted
//! ahead of the theme, so a user stylesheet can still override them.

use crate::bar::{Redraw, WorkspaceBar};
use crate::command::{CompositorEvent, Gesture};
use crate::config::{Anchor, LayoutConfig, ViewConfig};
use crate::occupancy::VisualOccupancyClass;
use crate::traits::{Compositor, Shell};
use gtk4::prelude::*;
use gtk4::{gdk, glib};
use gtk4_layer_shell::{Edge, LayerShell};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

//  Default CSS

const DEFAULT_CSS: &str = r#"
window,
window.background {
    background-color: transparent;
    background: none;
}

.bar-group-center {
    background-color: rgba(0, 0, 0, 0.6);
    border-radius: 1rem;
    padding: 0.2rem 0;
}

.bar-ws {
    min-height: 1.772rem;
    color: rgba(255, 255, 255, 0.5);
}

.bar-ws-occupied,
.bar-ws-occupied-left,
.bar-ws-occupied-right,
.bar-ws-occupied-left-right {
    background-color: rgba(255, 255, 255, 0.15);
    color: rgba(255, 255, 255, 0.95);
}

.bar-ws-occupied-left {
    border-radius: 999px 0 0 999px;
}

.bar-ws-occupied-right {
    border-radius: 0 999px 999px 0;
}

.bar-ws-occupied-left-right {
    border-radius: 999px;
}

.bar-ws-active {
    color: rgba(255, 255, 255, 0.95);
}
"#;

fn layout_css(layout: &LayoutConfig) -> String {
    format!(
        ".bar-ws-row {{ padding: 0 {}rem; }}\n.bar-ws {{ min-width: {}rem; }}\n",
        layout.side_pad, layout.slot_width
    )
}

//  Easing

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

//  Indicator animation

struct IndicatorAnim {
    from: f64,
    to: f64,
    start: Instant,
}

/// The marker widget and its horizontal glide.
struct Marker {
    label: gtk4::Label,
    cur: f64,
    anim: Option<IndicatorAnim>,
    duration: Duration,
    placed: bool,
}

impl Marker {
    fn new(overlay: &gtk4::Overlay, config: &ViewConfig) -> Self {
        let label = gtk4::Label::new(Some("•"));
        label.add_css_class("bar-ws-active");
        label.set_halign(gtk4::Align::Start);
        label.set_valign(gtk4::Align::Center);
        label.set_can_target(false);
        overlay.add_overlay(&label);
        overlay.set_measure_overlay(&label, false);

        Self {
            label,
            cur: 0.0,
            anim: None,
            duration: Duration::from_millis(config.indicator_animation_ms),
            placed: false,
        }
    }

    /// Move to `target` px.  The first placement snaps.
    fn move_to(&mut self, target: f64) {
        if !self.placed || self.duration.is_zero() {
            self.placed = true;
            self.cur = target;
            self.anim = None;
            self.apply();
        } else {
            self.anim = Some(IndicatorAnim {
                from: self.cur,
                to: target,
                start: Instant::now(),
            });
        }
    }

    fn tick(&mut self) {
        if let Some(ref anim) = self.anim {
            let t = (anim.start.elapsed().as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
            self.cur = anim.from + (anim.to - anim.from) * ease_out_cubic(t);
            self.apply();
            if t >= 1.0 {
                self.anim = None;
            }
        }
    }

    fn apply(&self) {
        self.label.set_margin_start(self.cur.max(0.0).round() as i32);
    }
}

//  Slot row

struct SlotRow {
    labels: Vec<gtk4::Label>,
}

impl SlotRow {
    fn apply_classes<S: Shell>(&self, bar: &WorkspaceBar<S>) {
        for (label, slot) in self.labels.iter().zip(bar.slots()) {
            for class in VisualOccupancyClass::ALL_CSS_CLASSES {
                label.remove_css_class(class);
            }
            if let Some(class) = slot.class.css_class() {
                label.add_css_class(class);
            }
        }
    }
}

/// Vertical only, one event per wheel notch.
fn scroll_flags() -> gtk4::EventControllerScrollFlags {
    gtk4::EventControllerScrollFlags::VERTICAL | gtk4::EventControllerScrollFlags::DISCRETE
}

fn scroll_gesture(dy: f64) -> Option<Gesture> {
    if dy < 0.0 {
        Some(Gesture::ScrollUp)
    } else if dy > 0.0 {
        Some(Gesture::ScrollDown)
    } else {
        None
    }
}

fn marker_px<S: Shell>(bar: &WorkspaceBar<S>, rem_px: f64) -> f64 {
    bar.indicator_offset().from_row_start(bar.count(), bar.layout()) * rem_px
}

//  Public API

/// Run the GTK4 main loop on the **current** (main) thread.
///
/// `events` is drained every 16 ms; `compositor` answers the window-count
/// queries those events trigger.  Returns once `events` disconnects.
pub fn run_main_loop<C, S>(
    bar: WorkspaceBar<S>,
    compositor: C,
    events: mpsc::Receiver<CompositorEvent>,
    css_path: Option<PathBuf>,
    layout: &LayoutConfig,
    view: ViewConfig,
) -> Result<(), glib::BoolError>
where
    C: Compositor + 'static,
    S: Shell + 'static,
{
    gtk4::init()?;
    info!("GTK4 initialised on main thread");

    load_css(&css_path, layout);

    //  Layer-shell window
    let window = gtk4::Window::new();
    window.init_layer_shell();
    window.set_layer(gtk4_layer_shell::Layer::Top);
    window.set_namespace("hyprwsbar");
    window.set_keyboard_mode(gtk4_layer_shell::KeyboardMode::None);
    match view.anchor {
        Anchor::Top => window.set_anchor(Edge::Top, true),
        Anchor::Bottom => window.set_anchor(Edge::Bottom, true),
    }
    window.auto_exclusive_zone_enable();
    window.set_decorated(false);
    window.remove_css_class("background");

    let container = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
    container.add_css_class("bar-group-center");
    window.set_child(Some(&container));

    let overlay = gtk4::Overlay::new();
    container.append(&overlay);

    let row = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
    row.add_css_class("bar-ws-row");
    row.set_homogeneous(true);
    overlay.set_child(Some(&row));

    let bar = Rc::new(RefCell::new(bar));

    //  Slots
    let mut labels = Vec::with_capacity(bar.borrow().count());
    for slot in bar.borrow().slots() {
        let index = slot.index.get() as i32;
        let cell = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);
        cell.add_css_class("bar-ws-slot");
        let label = gtk4::Label::new(Some(&index.to_string()));
        label.add_css_class("bar-ws");
        label.add_css_class("txt");
        label.set_valign(gtk4::Align::Center);
        label.set_hexpand(true);
        cell.append(&label);

        let click = gtk4::GestureClick::new();
        click.set_button(gdk::BUTTON_SECONDARY);
        let b = bar.clone();
        click.connect_pressed(move |_, _, _, _| {
            b.borrow().handle_gesture(Gesture::SecondaryClick { slot: index });
        });
        cell.add_controller(click);

        row.append(&cell);
        labels.push(label);
    }
    let slots = SlotRow { labels };

    //  Bar-wide gestures
    let click = gtk4::GestureClick::new();
    click.set_button(0);
    let b = bar.clone();
    click.connect_released(move |gesture, _, _, _| {
        let gesture_kind = match gesture.current_button() {
            gdk::BUTTON_PRIMARY => Gesture::PrimaryClick,
            gdk::BUTTON_MIDDLE => Gesture::MiddleClick,
            _ => return,
        };
        b.borrow().handle_gesture(gesture_kind);
    });
    container.add_controller(click);

    let scroll = gtk4::EventControllerScroll::new(scroll_flags());
    let b = bar.clone();
    scroll.connect_scroll(move |_, _, dy| {
        if let Some(gesture) = scroll_gesture(dy) {
            b.borrow().handle_gesture(gesture);
        }
        glib::Propagation::Stop
    });
    container.add_controller(scroll);

    //  Initial render
    let mut marker = Marker::new(&overlay, &view);
    {
        let mut bar = bar.borrow_mut();
        let redraw = bar.refresh(&compositor);
        slots.apply_classes(&bar);
        marker.move_to(marker_px(&bar, view.rem_px));
        marker.label.set_visible(bar.active().is_some());
        debug!("initial render: {:?}", redraw);
    }
    window.present();
    info!(
        "bar ready ({} slots, marker {}ms)",
        bar.borrow().count(),
        view.indicator_animation_ms
    );

    let main_loop = glib::MainLoop::new(None, false);

    //  Event loop (~60 fps)
    let ml = main_loop.clone();
    glib::timeout_add_local(Duration::from_millis(16), move || {
        // 1. Drain compositor events.
        let mut redraw = Redraw::NONE;
        let mut disconnected = false;
        {
            let mut bar = bar.borrow_mut();
            loop {
                match events.try_recv() {
                    Ok(event) => {
                        let r = bar.handle_event(event, &compositor);
                        redraw.slots |= r.slots;
                        redraw.indicator |= r.indicator;
                    }
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }

            // 2. Repaint what changed.
            if redraw.slots {
                slots.apply_classes(&bar);
            }
            if redraw.indicator {
                marker.label.set_visible(true);
                marker.move_to(marker_px(&bar, view.rem_px));
            }
        }

        // 3. Advance the marker glide.
        marker.tick();

        if disconnected {
            info!("event source closed, exiting");
            ml.quit();
            return glib::ControlFlow::Break;
        }
        glib::ControlFlow::Continue
    });

    info!("entering GLib main loop");
    main_loop.run();
    info!("GLib main loop exited");
    Ok(())
}

//  CSS loading

fn load_css(css_path: &Option<PathBuf>, layout: &LayoutConfig) {
    let provider = gtk4::CssProvider::new();

    let theme = match css_path.as_ref().filter(|p| p.exists()) {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(content) => {
                info!("user CSS: {} ({} bytes)", p.display(), content.len());
                content
            }
            Err(e) => {
                warn!("CSS read failed ({}): {}, using built-in", p.display(), e);
                DEFAULT_CSS.to_string()
            }
        },
        None => {
            info!("no user CSS, using built-in default");
            DEFAULT_CSS.to_string()
        }
    };
    let css = layout_css(layout) + &theme;

    #[allow(deprecated)]
    provider.load_from_data(&css);

    if let Some(display) = gdk::Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        info!("CSS registered on display");
    } else {
        warn!("no GDK display, CSS will not be applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn layout_css_uses_config() {
        let css = layout_css(&LayoutConfig::default());
        assert!(css.contains(".bar-ws-row { padding: 0 0.546rem; }"));
        assert!(css.contains(".bar-ws { min-width: 1.772rem; }"));
    }

    #[test]
    fn scroll_is_one_switch_per_notch() {
        let flags = scroll_flags();
        assert!(flags.contains(gtk4::EventControllerScrollFlags::DISCRETE));
        assert!(flags.contains(gtk4::EventControllerScrollFlags::VERTICAL));
        assert!(!flags.contains(gtk4::EventControllerScrollFlags::HORIZONTAL));
    }

    #[test]
    fn scroll_direction() {
        assert_eq!(scroll_gesture(-1.0), Some(Gesture::ScrollUp));
        assert_eq!(scroll_gesture(1.0), Some(Gesture::ScrollDown));
        assert_eq!(scroll_gesture(0.0), None);
    }
}
