//! Scene: the ground, the pickup, its kinematics and the camera mode

use pickup_math::Vec3;
use pickup_physics::{
    fit_terrain, DriveConfig, DriveIntent, FrameMotion, VehicleKinematics, VehicleState,
};
use serde::{Deserialize, Serialize};

use crate::ground::Ground;
use crate::pickup::{PartTransforms, Pickup};

/// What the orbit camera looks at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Look at the world origin
    #[default]
    Origin,
    /// Keep the pickup centred
    FollowPickup,
}

/// Everything the simulation updates and the renderer draws
pub struct Scene {
    ground: Ground,
    pickup: Pickup,
    vehicle: VehicleKinematics,
    camera_mode: CameraMode,
    follow_terrain: bool,
}

impl Scene {
    /// Create a scene with the pickup spawned at `spawn`
    ///
    /// Terrain following is on by default, so the pickup is immediately
    /// placed on the ground under the spawn point.
    pub fn new(ground: Ground, pickup: Pickup, drive: DriveConfig, spawn: VehicleState) -> Self {
        let vehicle = VehicleKinematics::with_spawn(pickup.chassis(), drive, spawn);
        let mut scene = Self {
            ground,
            pickup,
            vehicle,
            camera_mode: CameraMode::default(),
            follow_terrain: true,
        };
        scene.settle();
        scene
    }

    /// Enable or disable fitting the pickup to the ground
    pub fn with_follow_terrain(mut self, follow: bool) -> Self {
        self.follow_terrain = follow;
        if !follow {
            // Undo the fit applied by `new`
            self.vehicle.reset();
        }
        self.settle();
        self
    }

    pub fn with_camera_mode(mut self, mode: CameraMode) -> Self {
        self.camera_mode = mode;
        self
    }

    /// Advance the pickup by one frame
    pub fn update(&mut self, dt: f32, intent: DriveIntent) -> FrameMotion {
        let motion = self.vehicle.update(dt, intent);
        self.settle();
        motion
    }

    /// Return the pickup to its spawn point
    pub fn reset(&mut self) {
        self.vehicle.reset();
        self.settle();
    }

    fn settle(&mut self) {
        if !self.follow_terrain {
            return;
        }
        let pose = fit_terrain(&self.vehicle.state, self.vehicle.chassis(), self.ground.field());
        pose.apply(&mut self.vehicle.state);
    }

    /// Point the orbit camera should look at
    pub fn camera_target(&self) -> Vec3 {
        match self.camera_mode {
            CameraMode::Origin => Vec3::ZERO,
            CameraMode::FollowPickup => self.vehicle.state.position,
        }
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        if self.camera_mode != mode {
            log::info!("Camera mode: {:?}", mode);
        }
        self.camera_mode = mode;
    }

    pub fn follow_terrain(&self) -> bool {
        self.follow_terrain
    }

    /// World transforms of the seven pickup parts for the current state
    pub fn part_transforms(&self) -> PartTransforms {
        self.pickup.part_transforms(&self.vehicle.state)
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn pickup(&self) -> &Pickup {
        &self.pickup
    }

    pub fn vehicle(&self) -> &VehicleKinematics {
        &self.vehicle
    }

    pub fn vehicle_state(&self) -> &VehicleState {
        &self.vehicle.state
    }
}
