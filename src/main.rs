//! Entry point for the **hyprwsbar** daemon.
//!
//! Starts the compositor event source and the dispatch worker on
//! background threads and drives the bar on the main thread.
//!
//! When the `bar-gtk` feature is enabled the main thread runs the GLib main
//! loop (GTK4 requires it).  Without the feature, a headless loop applies
//! events to the bar model and logs what would be redrawn.

use hyprwsbar::bar::WorkspaceBar;
use hyprwsbar::command::{CompositorEvent, WorkspaceCommand};
use hyprwsbar::config::Config;
use hyprwsbar::hyprland::events::HyprlandEventSource;
use hyprwsbar::hyprland::wm::HyprlandCompositor;
use hyprwsbar::issuer::spawn_dispatcher;
use hyprwsbar::preview::PreviewCompositor;
use hyprwsbar::shell::CommandShell;
use hyprwsbar::traits::{Compositor, EventSource};
use log::{error, info};
use std::sync::mpsc;

/// Resolve the config directory (`$XDG_CONFIG_HOME/hyprwsbar`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("hyprwsbar")
}

/// Load `$XDG_CONFIG_HOME/hyprwsbar/config.json`.
///
/// A file that parses but does not validate is fatal.
fn load_config() -> Config {
    match Config::load_or_default(&config_dir().join("config.json")) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Resolve the CSS stylesheet path.
#[cfg(feature = "bar-gtk")]
fn css_path() -> std::path::PathBuf {
    config_dir().join("style.css")
}

//  Main

fn main() {
    env_logger::init();

    let preview = std::env::args().any(|a| a == "--preview");
    let config = load_config();

    if preview {
        run_preview(config);
    } else {
        run_daemon(config);
    }
}

/// Normal mode: Hyprland IPC.
fn run_daemon(config: Config) {
    let (event_tx, event_rx) = mpsc::channel::<CompositorEvent>();
    std::thread::spawn(move || {
        let mut source = HyprlandEventSource::new();
        if let Err(e) = source.run(event_tx) {
            error!("event source error: {}", e);
        }
    });

    let commands = spawn_dispatcher(HyprlandCompositor::new());
    start_event_loop(HyprlandCompositor::new(), commands, event_rx, config);
}

/// Preview mode: no compositor, workspace switches are simulated.
fn run_preview(config: Config) {
    info!("running in preview mode (no compositor)");

    let (event_tx, event_rx) = mpsc::channel::<CompositorEvent>();
    let compositor = PreviewCompositor::new(config.layout.workspace_count, event_tx);
    let commands = spawn_dispatcher(compositor.clone());
    start_event_loop(compositor, commands, event_rx, config);
}

fn make_bar(
    config: &Config,
    commands: mpsc::Sender<WorkspaceCommand>,
) -> WorkspaceBar<CommandShell> {
    WorkspaceBar::new(
        config.layout.workspace_count,
        config.layout.indicator(),
        commands,
        CommandShell::new(config.surfaces.clone()),
    )
}

//  Event loops

#[cfg(feature = "bar-gtk")]
fn start_event_loop<C: Compositor + 'static>(
    compositor: C,
    commands: mpsc::Sender<WorkspaceCommand>,
    events: mpsc::Receiver<CompositorEvent>,
    config: Config,
) {
    let bar = make_bar(&config, commands);
    if let Err(e) = hyprwsbar::view::gtk::run_main_loop(
        bar,
        compositor,
        events,
        Some(css_path()),
        &config.layout,
        config.view.clone(),
    ) {
        error!("failed to initialise GTK4: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "bar-gtk"))]
fn start_event_loop<C: Compositor>(
    compositor: C,
    commands: mpsc::Sender<WorkspaceCommand>,
    events: mpsc::Receiver<CompositorEvent>,
    config: Config,
) {
    let mut bar = make_bar(&config, commands);
    bar.refresh(&compositor);
    info!("hyprwsbar running headless");
    for event in events {
        let redraw = bar.handle_event(event, &compositor);
        if redraw.slots {
            let classes: Vec<_> = bar.slots().iter().map(|s| s.class).collect();
            info!("slots: {:?}", classes);
        }
        if redraw.indicator {
            info!(
                "active {:?}, offset {:.3}rem",
                bar.active(),
                bar.indicator_offset().rem()
            );
        }
    }
    info!("event source closed, exiting");
}
