//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the pickup scene.

use pickup_core::{
    CameraMode, DriveConfig, Ground, GroundSettings, HeightField, Pickup, PickupColors,
    PickupDimensions, Scene, Vec3, VehicleState, WaveParams,
};

use crate::config::AppConfig;

/// Builder for the pickup scene
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new()
///     .with_drive(DriveConfig::default())
///     .with_spawn(Vec3::new(0.0, 0.0, 5.0), 0.0)
///     .with_follow_terrain(true)
///     .build();
/// ```
pub struct SceneBuilder {
    waves: Vec<WaveParams>,
    ground: GroundSettings,
    dimensions: PickupDimensions,
    colors: PickupColors,
    drive: DriveConfig,
    spawn: VehicleState,
    follow_terrain: bool,
    camera_mode: CameraMode,
}

impl SceneBuilder {
    /// Create a builder with the default rolling hills and pickup
    pub fn new() -> Self {
        Self {
            waves: HeightField::default_waves(),
            ground: GroundSettings::default(),
            dimensions: PickupDimensions::default(),
            colors: PickupColors::default(),
            drive: DriveConfig::default(),
            spawn: VehicleState::default(),
            follow_terrain: true,
            camera_mode: CameraMode::default(),
        }
    }

    /// Create a builder from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let spawn = config.vehicle.spawn_position;
        Self::new()
            .with_waves(config.ground.wave_params())
            .with_ground(config.ground.settings())
            .with_colors(config.vehicle.colors())
            .with_drive(config.vehicle.drive_config())
            .with_spawn(
                Vec3::new(spawn[0], spawn[1], spawn[2]),
                config.vehicle.spawn_heading_deg.to_radians(),
            )
            .with_follow_terrain(config.vehicle.follow_terrain)
            .with_camera_mode(config.camera.mode)
    }

    /// Replace the ground waves
    pub fn with_waves(mut self, waves: Vec<WaveParams>) -> Self {
        self.waves = waves;
        self
    }

    pub fn with_ground(mut self, ground: GroundSettings) -> Self {
        self.ground = ground;
        self
    }

    pub fn with_dimensions(mut self, dimensions: PickupDimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_colors(mut self, colors: PickupColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_drive(mut self, drive: DriveConfig) -> Self {
        self.drive = drive;
        self
    }

    /// Set where the pickup starts and which way it faces (rad)
    pub fn with_spawn(mut self, position: Vec3, heading: f32) -> Self {
        self.spawn = VehicleState::at(position, heading);
        self
    }

    pub fn with_follow_terrain(mut self, follow: bool) -> Self {
        self.follow_terrain = follow;
        self
    }

    pub fn with_camera_mode(mut self, mode: CameraMode) -> Self {
        self.camera_mode = mode;
        self
    }

    /// Build the ground mesh and the scene
    pub fn build(self) -> Scene {
        let ground = Ground::new(HeightField::new(self.waves), self.ground);
        let pickup = Pickup::new(self.dimensions, self.colors);

        log::info!(
            "Building scene: {} waves, pickup at {:?}, follow terrain {}",
            ground.field().waves().len(),
            self.spawn.position,
            self.follow_terrain
        );

        Scene::new(ground, pickup, self.drive, self.spawn)
            .with_follow_terrain(self.follow_terrain)
            .with_camera_mode(self.camera_mode)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
