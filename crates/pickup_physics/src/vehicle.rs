//! Vehicle kinematics
//!
//! Per-frame arithmetic that moves the pickup: steering integration, heading
//! update from a small-angle bicycle approximation, translation along the
//! heading, and wheel spin from travelled distance. There is no mass, no
//! velocity state and no collision; the vehicle moves exactly as far as the
//! keys say.

use pickup_math::{wrap_angle, Vec3};
use serde::{Deserialize, Serialize};

use crate::intent::DriveIntent;
use crate::steering::{turning_angle_per_meter, SteeringPolicy};

/// What happens to the accumulated wheel spin angle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelSpinPolicy {
    /// Keep adding; the angle grows without bound
    #[default]
    Accumulate,
    /// Wrap into `(-2π, 2π)` every frame
    Wrap,
}

/// Fixed geometry the kinematics need
///
/// The vehicle frame has +X forward, +Y up and +Z to the right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chassis {
    /// Distance between front and rear axle
    pub wheel_base: f32,
    /// Vehicle width used by the turning-radius approximation
    pub width: f32,
    /// Front axle position along the vehicle's X axis
    pub front_axle_x: f32,
    /// Rear axle position along the vehicle's X axis
    pub rear_axle_x: f32,
    /// Distance between left and right wheel centres
    pub track: f32,
    pub front_wheel_radius: f32,
    pub rear_wheel_radius: f32,
}

/// Tunable drive parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveConfig {
    /// Travel speed while a drive key is held (units/s)
    pub move_speed: f32,
    /// Maximum front-wheel angle (rad)
    pub max_steering_angle: f32,
    /// How the wheel angle follows the steering keys
    pub steering: SteeringPolicy,
    /// What happens to accumulated wheel spin
    pub wheel_spin: WheelSpinPolicy,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            max_steering_angle: 30f32.to_radians(),
            steering: SteeringPolicy::default(),
            wheel_spin: WheelSpinPolicy::default(),
        }
    }
}

/// Mutable per-frame vehicle state
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleState {
    /// World-space origin of the vehicle frame (at ground contact level)
    pub position: Vec3,
    /// Yaw about +Y; the vehicle faces `(cos h, 0, sin h)`
    pub heading: f32,
    /// Front-wheel angle, positive = left
    pub steering_angle: f32,
    /// Accumulated front wheel rotation (rad)
    pub wheel_spin_front: f32,
    /// Accumulated rear wheel rotation (rad)
    pub wheel_spin_rear: f32,
    /// Nose-up tilt from terrain fitting (rad)
    pub pitch: f32,
    /// Right-side-up tilt from terrain fitting (rad)
    pub roll: f32,
}

impl VehicleState {
    /// Create a state at the given position and heading
    pub fn at(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            heading,
            ..Default::default()
        }
    }

    /// Horizontal forward direction `(cos h, 0, sin h)`
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.heading.cos(), 0.0, self.heading.sin())
    }

    /// Horizontal right direction, `forward × up`
    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::new(-self.heading.sin(), 0.0, self.heading.cos())
    }
}

/// What a single update did
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameMotion {
    /// Signed distance travelled along the heading
    pub distance: f32,
    /// Change of heading (rad)
    pub heading_delta: f32,
}

/// Vehicle kinematics: state plus the parameters that drive it
#[derive(Clone, Debug)]
pub struct VehicleKinematics {
    /// Current state
    pub state: VehicleState,
    /// Drive parameters
    pub config: DriveConfig,
    chassis: Chassis,
    spawn: VehicleState,
    /// Heading change per meter at full lock (rad/m)
    turn_rate: f32,
}

impl VehicleKinematics {
    /// Create kinematics for a chassis, spawned at the origin facing +X
    pub fn new(chassis: Chassis, config: DriveConfig) -> Self {
        Self::with_spawn(chassis, config, VehicleState::default())
    }

    /// Create kinematics with an explicit spawn state
    pub fn with_spawn(chassis: Chassis, config: DriveConfig, spawn: VehicleState) -> Self {
        let turn_rate = turning_angle_per_meter(
            chassis.wheel_base,
            config.max_steering_angle,
            chassis.width,
        )
        .to_radians();

        Self {
            state: spawn,
            config,
            chassis,
            spawn,
            turn_rate,
        }
    }

    /// The chassis geometry
    pub fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    /// Heading change per meter travelled at full steering lock (rad/m)
    pub fn turn_rate(&self) -> f32 {
        self.turn_rate
    }

    /// Advance the vehicle by one frame
    ///
    /// 1. distance = direction × speed × dt
    /// 2. steering angle follows the steering policy
    /// 3. while a steer key is held, heading changes by the full turn rate
    ///    times the distance; the steering angle itself only animates the
    ///    front wheels
    /// 4. position moves along the new heading
    /// 5. wheels spin by distance / radius
    pub fn update(&mut self, dt: f32, intent: DriveIntent) -> FrameMotion {
        let distance = intent.direction() * self.config.move_speed * dt;
        let steer = intent.steer();

        let state = &mut self.state;
        state.steering_angle = self.config.steering.step(
            state.steering_angle,
            steer,
            self.config.max_steering_angle,
            dt,
        );

        // Steering left turns toward the vehicle's -Z side, which
        // decreases the heading.
        let mut heading_delta = 0.0;
        if intent.is_steering() && distance != 0.0 {
            heading_delta = -steer * self.turn_rate * distance;
            state.heading += heading_delta;
        }

        let forward = state.forward();
        state.position += forward * distance;

        state.wheel_spin_front += distance / self.chassis.front_wheel_radius;
        state.wheel_spin_rear += distance / self.chassis.rear_wheel_radius;

        if self.config.wheel_spin == WheelSpinPolicy::Wrap {
            state.wheel_spin_front = wrap_angle(state.wheel_spin_front);
            state.wheel_spin_rear = wrap_angle(state.wheel_spin_rear);
        }

        FrameMotion { distance, heading_delta }
    }

    /// Return to the spawn state
    pub fn reset(&mut self) {
        self.state = self.spawn;
        log::debug!("Vehicle reset to {:?}", self.spawn.position);
    }
}
