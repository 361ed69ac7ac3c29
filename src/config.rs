//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/hyprwsbar/config.json`.
//! Every section is optional, and unknown keys are ignored so the file can
//! be extended later without breaking older versions.
//!
//! # Example
//!
//! ```json
//! {
//!   "layout": {
//!     "workspace_count": 9,
//!     "slot_width": 1.772,
//!     "side_pad": 0.546,
//!     "indicator_nudge": 0.2
//!   },
//!   "surfaces": {
//!     "overview": ["ags", "-t", "overview"],
//!     "on_screen_keyboard": ["ags", "-t", "osk"]
//!   },
//!   "view": {
//!     "rem_px": 16.0,
//!     "indicator_animation_ms": 120,
//!     "anchor": "top"
//!   }
//! }
//! ```

use crate::command::Surface;
use crate::indicator::IndicatorLayout;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on `layout.workspace_count`.
pub const MAX_WORKSPACES: usize = 32;

/// Top-level configuration.
///
/// A minimal `{}` file is valid and all sections fall back to their
/// compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Row geometry and workspace count.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Commands that toggle host-shell surfaces.
    #[serde(default)]
    pub surfaces: SurfaceConfig,

    /// GTK front-end settings.
    #[serde(default)]
    pub view: ViewConfig,
}

/// Row geometry.  Lengths are in `rem`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Number of slots, `N`.  Fixed for the life of the process.
    pub workspace_count: usize,
    pub slot_width: f64,
    pub side_pad: f64,
    /// Visual correction for the marker glyph.
    pub indicator_nudge: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let indicator = IndicatorLayout::default();
        Self {
            workspace_count: 9,
            slot_width: indicator.slot_width,
            side_pad: indicator.side_pad,
            indicator_nudge: indicator.nudge,
        }
    }
}

impl LayoutConfig {
    pub fn indicator(&self) -> IndicatorLayout {
        IndicatorLayout {
            slot_width: self.slot_width,
            side_pad: self.side_pad,
            nudge: self.indicator_nudge,
        }
    }
}

/// Argument vectors used to toggle each [`Surface`].
///
/// An empty vector disables that surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub overview: Vec<String>,
    pub on_screen_keyboard: Vec<String>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            overview: vec!["ags".into(), "-t".into(), "overview".into()],
            on_screen_keyboard: vec!["ags".into(), "-t".into(), "osk".into()],
        }
    }
}

impl SurfaceConfig {
    pub fn argv(&self, surface: Surface) -> &[String] {
        match surface {
            Surface::Overview => &self.overview,
            Surface::OnScreenKeyboard => &self.on_screen_keyboard,
        }
    }
}

/// Screen edge the bar is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[default]
    Top,
    Bottom,
}

/// GTK front-end settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Pixels per `rem`, used to place the marker.
    pub rem_px: f64,
    /// How long the marker takes to glide between slots (ms).  `0`
    /// disables the animation.
    pub indicator_animation_ms: u64,
    pub anchor: Anchor,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            rem_px: 16.0,
            indicator_animation_ms: 120,
            anchor: Anchor::Top,
        }
    }
}

impl Config {
    /// Load and validate configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults when the file is missing,
    /// unreadable or not valid JSON.
    ///
    /// Only [`ConfigError::Invalid`] is returned: the file parsed but holds
    /// values the bar cannot lay out.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!("no config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e @ ConfigError::Read { .. }) => {
                info!("{}, using defaults", e);
                Ok(Self::default())
            }
            Err(e @ ConfigError::Parse { .. }) => {
                warn!("{}, using defaults", e);
                Ok(Self::default())
            }
            Err(e @ ConfigError::Invalid(_)) => Err(e),
        }
    }

    /// Reject values the bar cannot lay out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let l = &self.layout;
        if l.workspace_count == 0 || l.workspace_count > MAX_WORKSPACES {
            return Err(ConfigError::Invalid(format!(
                "layout.workspace_count must be between 1 and {}, got {}",
                MAX_WORKSPACES, l.workspace_count
            )));
        }
        for (name, value) in [
            ("layout.slot_width", l.slot_width),
            ("layout.side_pad", l.side_pad),
            ("layout.indicator_nudge", l.indicator_nudge),
            ("view.rem_px", self.view.rem_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Error from loading, parsing or validating a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
