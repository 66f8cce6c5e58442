//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PICKUP_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};

use pickup_core::{
    CameraMode, DriveConfig, GroundSettings, MAX_GROUND_RESOLUTION, PickupColors, SteeringPolicy, Vec2, WaveParams,
    WheelSpinPolicy,
};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Vehicle configuration
    #[serde(default)]
    pub vehicle: VehicleConfig,
    /// Ground configuration
    #[serde(default)]
    pub ground: GroundConfig,
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
    /// 3. Environment variables (`PICKUP_*`)
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

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PICKUP_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("PICKUP_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the frame loop cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let steer = self.vehicle.max_steering_angle_deg;
        if !(0.0..90.0).contains(&steer) {
            return Err(ConfigError::invalid(format!(
                "vehicle.max_steering_angle_deg must be in [0, 90), got {}",
                steer
            )));
        }

        let max_dt = self.rendering.max_dt;
        if !max_dt.is_finite() || max_dt <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "rendering.max_dt must be positive, got {}",
                max_dt
            )));
        }

        let resolution = self.ground.resolution;
        if !(1..=MAX_GROUND_RESOLUTION).contains(&resolution) {
            return Err(ConfigError::invalid(format!(
                "ground.resolution must be in [1, {}], got {}",
                MAX_GROUND_RESOLUTION, resolution
            )));
        }

        let half_life = self.camera.smoothing_half_life;
        if !half_life.is_finite() || half_life <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "camera.smoothing_half_life must be positive, got {}",
                half_life
            )));
        }

        Ok(())
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
            title: "Pickup".to_string(),
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
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Orbit speed in radians per pixel of drag
    pub orbit_sensitivity: f32,
    /// Relative zoom per scroll line
    pub zoom_speed: f32,
    /// Closest orbit distance
    pub min_radius: f32,
    /// Farthest orbit distance
    pub max_radius: f32,
    /// Initial look-at mode
    pub mode: CameraMode,
    /// Input smoothing half-life in seconds (lower = more responsive)
    pub smoothing_half_life: f32,
    /// Enable orbit smoothing
    pub smoothing_enabled: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [12.0, 4.0, -12.0],
            fov: 45.0,
            near: 0.01,
            far: 500.0,
            orbit_sensitivity: 0.005,
            zoom_speed: 0.05,
            min_radius: 2.0,
            max_radius: 200.0,
            mode: CameraMode::Origin,
            smoothing_half_life: 0.05,
            smoothing_enabled: false,
        }
    }
}

/// How the front wheels follow the steering keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringMode {
    /// Jump straight to full lock
    Snap,
    /// Turn at `steering_rate_deg` and return to centre after release
    RateLimited,
}

/// Vehicle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Travel speed while a drive key is held (units per second)
    pub move_speed: f32,
    /// Maximum front-wheel angle in degrees
    pub max_steering_angle_deg: f32,
    /// Steering behaviour
    pub steering_policy: SteeringMode,
    /// Steering speed in degrees per second (rate-limited only)
    pub steering_rate_deg: f32,
    /// Seconds for the wheels to get halfway back to centre (rate-limited only)
    pub steering_return_half_life: f32,
    /// Keep accumulating wheel spin or wrap it each frame
    pub wheel_spin_policy: WheelSpinPolicy,
    /// Fit the pickup to the ground under its wheels
    pub follow_terrain: bool,
    /// Spawn position [x, y, z]
    pub spawn_position: [f32; 3],
    /// Spawn heading in degrees
    pub spawn_heading_deg: f32,
    /// Chassis colour [r, g, b, a]
    pub base_color: [f32; 4],
    /// Cockpit colour [r, g, b, a]
    pub cockpit_color: [f32; 4],
    /// Wheel colour [r, g, b, a]
    pub wheel_color: [f32; 4],
}

impl Default for VehicleConfig {
    fn default() -> Self {
        let colors = PickupColors::default();
        Self {
            move_speed: 5.0,
            max_steering_angle_deg: 30.0,
            steering_policy: SteeringMode::RateLimited,
            steering_rate_deg: 90.0,
            steering_return_half_life: 0.15,
            wheel_spin_policy: WheelSpinPolicy::Accumulate,
            follow_terrain: true,
            spawn_position: [0.0, 0.0, 0.0],
            spawn_heading_deg: 0.0,
            base_color: colors.base,
            cockpit_color: colors.cockpit,
            wheel_color: colors.wheel,
        }
    }
}

impl VehicleConfig {
    /// Drive parameters for the kinematics
    pub fn drive_config(&self) -> DriveConfig {
        let steering = match self.steering_policy {
            SteeringMode::Snap => SteeringPolicy::Snap,
            SteeringMode::RateLimited => SteeringPolicy::RateLimited {
                rate: self.steering_rate_deg.to_radians(),
                return_half_life: self.steering_return_half_life,
            },
        };

        DriveConfig {
            move_speed: self.move_speed,
            max_steering_angle: self.max_steering_angle_deg.to_radians(),
            steering,
            wheel_spin: self.wheel_spin_policy,
        }
    }

    pub fn colors(&self) -> PickupColors {
        PickupColors {
            base: self.base_color,
            cockpit: self.cockpit_color,
            wheel: self.wheel_color,
        }
    }
}

/// A single ground wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    pub amplitude: f32,
    /// Angular frequency (radians per unit)
    pub omega: f32,
    /// Direction in the ground plane [x, z]; normalized on load
    pub direction: [f32; 2],
}

/// Ground configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Base colour [r, g, b]
    pub color: [f32; 3],
    /// The ground spans [-half_size, half_size] on x and z
    pub half_size: f32,
    /// Grid cells per side
    pub resolution: u32,
    /// Sine waves summed into the height field
    pub waves: Vec<WaveConfig>,
}

impl Default for GroundConfig {
    fn default() -> Self {
        let settings = GroundSettings::default();
        Self {
            color: settings.color,
            half_size: settings.half_size,
            resolution: settings.resolution,
            waves: vec![
                WaveConfig { amplitude: 0.9, omega: 0.35, direction: [0.0, 1.0] },
                WaveConfig { amplitude: 0.7, omega: 0.4, direction: [1.0, 0.0] },
                WaveConfig { amplitude: 1.1, omega: 0.1, direction: [-2.0, 1.0] },
                WaveConfig { amplitude: 0.3, omega: 0.8, direction: [-1.0, -2.5] },
            ],
        }
    }
}

impl GroundConfig {
    pub fn settings(&self) -> GroundSettings {
        GroundSettings {
            half_size: self.half_size,
            resolution: self.resolution,
            color: self.color,
        }
    }

    pub fn wave_params(&self) -> Vec<WaveParams> {
        self.waves
            .iter()
            .map(|w| WaveParams::new(w.amplitude, w.omega, Vec2::new(w.direction[0], w.direction[1])))
            .collect()
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Light direction [x, y, z]
    pub light_dir: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Where P saves the screenshot
    pub screenshot_path: PathBuf,
    /// Longest frame time fed to the simulation (seconds)
    pub max_dt: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0, 1.0],
            light_dir: [0.5, 1.0, 0.3],
            ambient_strength: 0.35,
            diffuse_strength: 0.65,
            screenshot_path: PathBuf::from("screenshot.png"),
            max_dt: 0.1,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the vehicle state every frame at debug level
    pub log_vehicle_state: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_vehicle_state: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// A value that parsed but is out of range
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
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
