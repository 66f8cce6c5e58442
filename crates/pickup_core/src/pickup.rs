//! The pickup model: dimensions, colours and per-part transforms
//!
//! The truck is seven boxes and cylinders placed in the vehicle frame
//! (+X forward, +Y up, +Z right). Every frame the local transforms are
//! rebuilt from the vehicle state and combined with the vehicle's world
//! transform.

use pickup_math::mat4::{self, Mat4};
use pickup_math::Vec3;
use pickup_physics::{Chassis, VehicleState};
use std::f32::consts::FRAC_PI_2;

use crate::shapes::Color;

/// Size and layout of the truck
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupDimensions {
    pub base_length: f32,
    pub base_height: f32,
    pub base_width: f32,
    /// Height of the base box centre above the ground contact level
    pub base_y: f32,
    pub cockpit_length: f32,
    pub cockpit_height: f32,
    pub front_wheel_radius: f32,
    pub rear_wheel_radius: f32,
    pub wheel_thickness: f32,
    /// Extra track width beyond the base width
    pub track_margin: f32,
    /// Gap between the tailgate and the spare wheel
    pub spare_offset: f32,
}

impl Default for PickupDimensions {
    fn default() -> Self {
        Self {
            base_length: 4.0,
            base_height: 1.0,
            base_width: 1.5,
            base_y: 2.0,
            cockpit_length: 1.0,
            cockpit_height: 1.0,
            front_wheel_radius: 0.7,
            rear_wheel_radius: 1.0,
            wheel_thickness: 0.2,
            track_margin: 0.4,
            spare_offset: 0.2,
        }
    }
}

impl PickupDimensions {
    /// Front axle position along X
    pub fn front_axle_x(&self) -> f32 {
        self.base_length / 2.0 * 0.625
    }

    /// Rear axle position along X
    pub fn rear_axle_x(&self) -> f32 {
        -self.base_length / 2.0 * 0.5
    }

    /// Distance between left and right wheel centres
    pub fn track(&self) -> f32 {
        self.base_width + self.track_margin
    }

    /// Geometry the kinematics need
    pub fn chassis(&self) -> Chassis {
        Chassis {
            wheel_base: self.front_axle_x() - self.rear_axle_x(),
            width: self.base_width,
            front_axle_x: self.front_axle_x(),
            rear_axle_x: self.rear_axle_x(),
            track: self.track(),
            front_wheel_radius: self.front_wheel_radius,
            rear_wheel_radius: self.rear_wheel_radius,
        }
    }
}

/// Colours per part group
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupColors {
    pub base: Color,
    pub cockpit: Color,
    pub wheel: Color,
}

impl Default for PickupColors {
    fn default() -> Self {
        Self {
            base: [0.75, 0.1, 0.1, 1.0],
            cockpit: [0.85, 0.85, 0.9, 1.0],
            wheel: [0.1, 0.1, 0.1, 1.0],
        }
    }
}

/// Which mesh and colour a part uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartGroup {
    Base,
    Cockpit,
    Wheel,
}

/// The seven parts of the pickup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    Chassis,
    Cockpit,
    WheelFrontLeft,
    WheelFrontRight,
    WheelRearLeft,
    WheelRearRight,
    Spare,
}

impl Part {
    pub const ALL: [Part; 7] = [
        Part::Chassis,
        Part::Cockpit,
        Part::WheelFrontLeft,
        Part::WheelFrontRight,
        Part::WheelRearLeft,
        Part::WheelRearRight,
        Part::Spare,
    ];

    pub fn group(self) -> PartGroup {
        match self {
            Part::Chassis => PartGroup::Base,
            Part::Cockpit => PartGroup::Cockpit,
            _ => PartGroup::Wheel,
        }
    }

    /// True for meshes drawn with the unit cube (the rest use the cylinder)
    pub fn is_box(self) -> bool {
        matches!(self, Part::Chassis | Part::Cockpit)
    }
}

/// One transform per part, indexed by [`Part`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartTransforms([Mat4; 7]);

impl PartTransforms {
    pub fn get(&self, part: Part) -> Mat4 {
        self.0[part as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Part, Mat4)> + '_ {
        Part::ALL.iter().map(move |&p| (p, self.get(p)))
    }
}

/// The pickup truck model
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pickup {
    pub dimensions: PickupDimensions,
    pub colors: PickupColors,
}

impl Pickup {
    pub fn new(dimensions: PickupDimensions, colors: PickupColors) -> Self {
        Self { dimensions, colors }
    }

    pub fn chassis(&self) -> Chassis {
        self.dimensions.chassis()
    }

    pub fn color(&self, group: PartGroup) -> Color {
        match group {
            PartGroup::Base => self.colors.base,
            PartGroup::Cockpit => self.colors.cockpit,
            PartGroup::Wheel => self.colors.wheel,
        }
    }

    /// Vehicle frame to world: `T(position) · Ry(-heading) · Rz(pitch) · Rx(-roll)`
    pub fn world_transform(&self, state: &VehicleState) -> Mat4 {
        mat4::chain(&[
            mat4::translation(state.position),
            mat4::rotation_y(-state.heading),
            mat4::rotation_z(state.pitch),
            mat4::rotation_x(-state.roll),
        ])
    }

    /// Part transforms in the vehicle frame
    pub fn local_transforms(&self, state: &VehicleState) -> PartTransforms {
        let d = &self.dimensions;
        let half_track = d.track() / 2.0;

        let chassis = mat4::mul(
            mat4::translation(Vec3::new(0.0, d.base_y, 0.0)),
            mat4::scale(d.base_length, d.base_height, d.base_width),
        );

        let cockpit_y = d.base_y + d.base_height / 2.0 + d.cockpit_height / 2.0;
        let cockpit = mat4::mul(
            mat4::translation(Vec3::new(d.base_length / 4.0, cockpit_y, 0.0)),
            mat4::scale(d.cockpit_length, d.cockpit_height, d.base_width),
        );

        let front = |side: f32| {
            self.wheel(
                Vec3::new(d.front_axle_x(), d.front_wheel_radius, side * half_track),
                d.front_wheel_radius,
                state.steering_angle,
                state.wheel_spin_front,
            )
        };
        let rear = |side: f32| {
            self.wheel(
                Vec3::new(d.rear_axle_x(), d.rear_wheel_radius, side * half_track),
                d.rear_wheel_radius,
                0.0,
                state.wheel_spin_rear,
            )
        };

        let spare = mat4::chain(&[
            mat4::translation(Vec3::new(
                -d.base_length / 2.0 - d.spare_offset,
                d.base_y + 0.6 * d.base_height,
                0.0,
            )),
            mat4::rotation_z(FRAC_PI_2),
            mat4::scale(d.front_wheel_radius, d.wheel_thickness, d.front_wheel_radius),
        ]);

        // Left is -Z in the vehicle frame
        PartTransforms([chassis, cockpit, front(-1.0), front(1.0), rear(-1.0), rear(1.0), spare])
    }

    /// Part transforms in world space
    pub fn part_transforms(&self, state: &VehicleState) -> PartTransforms {
        let world = self.world_transform(state);
        let local = self.local_transforms(state);
        PartTransforms(local.0.map(|m| mat4::mul(world, m)))
    }

    /// Unit cylinder (axis Y) to a wheel rolling about the vehicle's Z axis
    fn wheel(&self, center: Vec3, radius: f32, steer: f32, spin: f32) -> Mat4 {
        mat4::chain(&[
            mat4::translation(center),
            mat4::rotation_y(steer),
            mat4::rotation_z(-spin),
            mat4::rotation_x(FRAC_PI_2),
            mat4::scale(radius, self.dimensions.wheel_thickness, radius),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickup_math::mat4::{get_column, transform_direction, transform_point};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    /// Lowest point of an unspun, unsteered wheel in unit-cylinder space
    const WHEEL_BOTTOM: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[test]
    fn test_default_chassis() {
        let chassis = PickupDimensions::default().chassis();
        assert_eq!(chassis.front_axle_x, 1.25);
        assert_eq!(chassis.rear_axle_x, -1.0);
        assert_eq!(chassis.wheel_base, 2.25);
        assert!((chassis.track - 1.9).abs() < 1e-6);
        assert_eq!(chassis.width, 1.5);
    }

    #[test]
    fn test_wheels_touch_flat_ground() {
        let pickup = Pickup::default();
        let state = VehicleState::at(Vec3::new(3.0, 0.0, -2.0), 1.1);
        let parts = pickup.part_transforms(&state);
        for part in [
            Part::WheelFrontLeft,
            Part::WheelFrontRight,
            Part::WheelRearLeft,
            Part::WheelRearRight,
        ] {
            let bottom = transform_point(parts.get(part), WHEEL_BOTTOM);
            assert!(bottom.y.abs() < 1e-5, "{:?} bottom at {}", part, bottom.y);
        }
    }

    #[test]
    fn test_left_wheels_on_left() {
        let pickup = Pickup::default();
        let parts = pickup.local_transforms(&VehicleState::default());
        let left = get_column(parts.get(Part::WheelFrontLeft), 3);
        let right = get_column(parts.get(Part::WheelFrontRight), 3);
        assert!(left.z < 0.0);
        assert!(right.z > 0.0);
    }

    #[test]
    fn test_wheel_axle_along_z() {
        let pickup = Pickup::default();
        let parts = pickup.local_transforms(&VehicleState::default());
        let axle = transform_direction(parts.get(Part::WheelRearRight), Vec3::Y).normalized();
        assert!(approx(axle, Vec3::Z));
    }

    #[test]
    fn test_steering_turns_front_wheels_only() {
        let pickup = Pickup::default();
        let state = VehicleState { steering_angle: 0.4, ..Default::default() };
        let parts = pickup.local_transforms(&state);

        let front_axle = transform_direction(parts.get(Part::WheelFrontLeft), Vec3::Y).normalized();
        let rear_axle = transform_direction(parts.get(Part::WheelRearLeft), Vec3::Y).normalized();
        assert!(approx(rear_axle, Vec3::Z));
        // Rotated about +Y: Z swings toward +X
        assert!(approx(front_axle, Vec3::new(0.4f32.sin(), 0.0, 0.4f32.cos())));
    }

    #[test]
    fn test_spin_keeps_wheel_centre() {
        let pickup = Pickup::default();
        let still = pickup.local_transforms(&VehicleState::default());
        let spun = pickup.local_transforms(&VehicleState {
            wheel_spin_front: 2.0,
            wheel_spin_rear: 1.0,
            ..Default::default()
        });
        for part in Part::ALL {
            assert!(approx(get_column(still.get(part), 3), get_column(spun.get(part), 3)));
        }
        assert_ne!(still.get(Part::WheelFrontLeft), spun.get(Part::WheelFrontLeft));
    }

    #[test]
    fn test_parts_follow_world_transform() {
        let pickup = Pickup::default();
        let state = VehicleState {
            position: Vec3::new(5.0, 1.0, 2.0),
            heading: 0.7,
            pitch: 0.1,
            roll: -0.05,
            ..Default::default()
        };
        let world = pickup.world_transform(&state);
        let local = pickup.local_transforms(&state);
        let parts = pickup.part_transforms(&state);

        for (part, m) in parts.iter() {
            let expected = transform_point(world, transform_point(local.get(part), Vec3::ZERO));
            assert!(approx(transform_point(m, Vec3::ZERO), expected), "{:?}", part);
        }
    }

    #[test]
    fn test_world_transform_faces_heading() {
        let pickup = Pickup::default();
        let state = VehicleState::at(Vec3::ZERO, 0.9);
        let world = pickup.world_transform(&state);
        assert!(approx(transform_direction(world, Vec3::X), state.forward()));
        assert!(approx(transform_direction(world, Vec3::Z), state.right()));
    }

    #[test]
    fn test_pitch_raises_nose_and_roll_raises_right() {
        let pickup = Pickup::default();
        let state = VehicleState { pitch: 0.2, roll: 0.3, ..Default::default() };
        let world = pickup.world_transform(&state);
        assert!(transform_direction(world, Vec3::X).y > 0.0);
        assert!(transform_direction(world, Vec3::Z).y > 0.0);
    }

    #[test]
    fn test_cockpit_sits_on_base() {
        let pickup = Pickup::default();
        let parts = pickup.local_transforms(&VehicleState::default());
        let base_top = transform_point(parts.get(Part::Chassis), Vec3::new(0.0, 0.5, 0.0));
        let cockpit_bottom = transform_point(parts.get(Part::Cockpit), Vec3::new(0.0, -0.5, 0.0));
        assert!((base_top.y - cockpit_bottom.y).abs() < 1e-5);
    }

    #[test]
    fn test_spare_behind_tailgate() {
        let pickup = Pickup::default();
        let parts = pickup.local_transforms(&VehicleState::default());
        let centre = get_column(parts.get(Part::Spare), 3);
        assert!((centre.x + 2.2).abs() < 1e-5);
        // Axle along X after the quarter turn about Z
        let axle = transform_direction(parts.get(Part::Spare), Vec3::Y).normalized();
        assert!(approx(axle, -Vec3::X));
    }

    #[test]
    fn test_part_groups() {
        assert_eq!(Part::Chassis.group(), PartGroup::Base);
        assert_eq!(Part::Spare.group(), PartGroup::Wheel);
        assert!(Part::Cockpit.is_box());
        assert!(!Part::WheelRearLeft.is_box());
    }
}
