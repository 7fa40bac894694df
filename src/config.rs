//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SPACESCAPE_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use spacescape_core::{MotionTunables, SceneRng};
use spacescape_input::OrbitController;
use spacescape_math::Vec3;
use spacescape_render::{Lighting, OrbitCamera};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit control configuration
    #[serde(default)]
    pub controls: ControlsConfig,
    /// Scene layout and seed
    #[serde(default)]
    pub scene: SceneConfig,
    /// Per-tick motion constants
    #[serde(default)]
    pub motion: MotionTunables,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SPACESCAPE_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SPACESCAPE_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SPACESCAPE_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spacescape".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting eye position [x, y, z]
    pub start_position: [f32; 3],
    /// Point the camera orbits [x, y, z]
    pub target: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Closest zoom distance
    pub min_distance: f32,
    /// Farthest zoom distance
    pub max_distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0, 15.0],
            target: [0.0, 0.0, 0.0],
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            min_distance: 1.0,
            max_distance: 500.0,
        }
    }
}

impl CameraConfig {
    /// Build the orbit camera described by this section
    pub fn to_camera(&self) -> OrbitCamera {
        let [x, y, z] = self.start_position;
        let [tx, ty, tz] = self.target;
        OrbitCamera::new(Vec3::new(x, y, z), Vec3::new(tx, ty, tz))
            .with_projection(self.fov, self.near, self.far)
            .with_distance_limits(self.min_distance, self.max_distance)
    }
}

/// Orbit control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Radians of orbit per pixel of mouse drag
    pub rotate_sensitivity: f32,
    /// Distance multiplier per wheel notch
    pub zoom_step: f32,
    /// Keep orbiting after the drag ends, slowing down
    pub damping_enabled: bool,
    /// Fraction of orbit velocity lost per reference frame
    pub damping_factor: f32,
    /// Slowly orbit when not dragging
    pub auto_rotate: bool,
    /// Auto-rotation speed in turns per minute
    pub auto_rotate_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.005,
            zoom_step: 0.95,
            damping_enabled: true,
            damping_factor: 0.05,
            auto_rotate: true,
            auto_rotate_speed: 0.2,
        }
    }
}

impl ControlsConfig {
    /// Build the orbit controller described by this section
    pub fn to_controller(&self) -> OrbitController {
        OrbitController::new()
            .with_rotate_sensitivity(self.rotate_sensitivity)
            .with_zoom_step(self.zoom_step)
            .with_damping(self.damping_enabled.then_some(self.damping_factor))
            .with_auto_rotate(self.auto_rotate.then_some(self.auto_rotate_speed))
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Path to the RON scene layout
    pub path: String,
    /// Directory texture and model paths are resolved against
    pub asset_root: String,
    /// Fixed random seed; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/solar_system.ron".to_string(),
            asset_root: "assets".to_string(),
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Random source for the scene
    pub fn rng(&self) -> SceneRng {
        match self.seed {
            Some(seed) => SceneRng::new(seed),
            None => SceneRng::from_entropy(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Ambient light color [r, g, b]
    pub ambient: [f32; 3],
    /// Sun light color [r, g, b]
    pub light_color: [f32; 3],
    /// Sun light intensity
    pub light_intensity: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        let lighting = Lighting::default();
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            ambient: lighting.ambient,
            light_color: lighting.light_color,
            light_intensity: lighting.light_intensity,
        }
    }
}

impl RenderingConfig {
    /// Lighting with the sun at the origin
    pub fn lighting(&self) -> Lighting {
        Lighting {
            ambient: self.ambient,
            light_color: self.light_color,
            light_intensity: self.light_intensity,
            ..Lighting::default()
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when `RUST_LOG` is unset (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show frame rate in the window title
    pub show_fps: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_fps: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
