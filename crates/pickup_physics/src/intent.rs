//! Drive intents sampled from the keyboard once per frame

use bitflags::bitflags;

bitflags! {
    /// Which drive keys are held this frame
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DriveIntent: u8 {
        /// Nothing held
        const NONE = 0;
        /// Drive forward (W)
        const FORWARD = 1 << 0;
        /// Drive backward (S)
        const BACKWARD = 1 << 1;
        /// Steer left (A)
        const LEFT = 1 << 2;
        /// Steer right (D)
        const RIGHT = 1 << 3;
    }
}

impl DriveIntent {
    /// Longitudinal direction: +1 forward, -1 backward, 0 otherwise.
    ///
    /// Forward wins when both are held.
    pub fn direction(self) -> f32 {
        if self.contains(Self::FORWARD) {
            1.0
        } else if self.contains(Self::BACKWARD) {
            -1.0
        } else {
            0.0
        }
    }

    /// Steering sign: +1 left, -1 right, 0 otherwise.
    ///
    /// Left wins when both are held.
    pub fn steer(self) -> f32 {
        if self.contains(Self::LEFT) {
            1.0
        } else if self.contains(Self::RIGHT) {
            -1.0
        } else {
            0.0
        }
    }

    /// True if a steering key is held
    pub fn is_steering(self) -> bool {
        self.intersects(Self::LEFT | Self::RIGHT)
    }
}
