//! Holonomic robot: motion state plus its static footprint.

use thiserror::Error;

use super::{Angle, BodyVelocity, DriveMode, KinematicLimits, MotionState, Pose, Position};

#[derive(Clone, Debug, PartialEq, PartialOrd)]
pub struct Robot {
    motion: MotionState,
    footprint: Footprint,
}

impl Robot {
    pub fn new(pose: Pose, limits: KinematicLimits, footprint: Footprint) -> Self {
        Self {
            motion: MotionState::new(pose, limits),
            footprint,
        }
    }

    pub fn pose(&self) -> Pose {
        self.motion.pose()
    }

    pub fn velocity(&self) -> BodyVelocity {
        self.motion.velocity()
    }

    pub fn limits(&self) -> &KinematicLimits {
        self.motion.limits()
    }

    #[cfg(test)]
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionState {
        &mut self.motion
    }

    pub fn snapshot(&self, drive_mode: DriveMode, tick: u64) -> RobotSnapshot {
        RobotSnapshot {
            pose: self.pose(),
            footprint: self.footprint,
            velocity: self.velocity(),
            drive_mode,
            tick,
        }
    }
}

/// Outer dimensions of the robot body in inches. `length` runs along the heading.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Footprint {
    width: f64,
    length: f64,
}

impl Footprint {
    pub fn new(width: f64, length: f64) -> Result<Self, FootprintError> {
        for (name, value) in [("width", width), ("length", length)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FootprintError::NotPositive { name, value });
            }
        }
        Ok(Self { width, length })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Body corners in the robot frame: front left, rear left, rear right, front right.
    pub fn corners(&self) -> [Position; 4] {
        let (x, y) = (self.length / 2.0, self.width / 2.0);
        [
            Position::new(x, y),
            Position::new(-x, y),
            Position::new(-x, -y),
            Position::new(x, -y),
        ]
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: 17.25,
            length: 17.25,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FootprintError {
    #[error("footprint {name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Read-only state published to the renderer once per tick.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct RobotSnapshot {
    pub pose: Pose,
    pub footprint: Footprint,
    pub velocity: BodyVelocity,
    pub drive_mode: DriveMode,
    pub tick: u64,
}

impl RobotSnapshot {
    /// Body corners in field coordinates, in the same order as [`Footprint::corners`].
    pub fn corners(&self) -> [Position; 4] {
        self.footprint
            .corners()
            .map(|c| self.pose.advanced(c, Angle::default()).position())
    }
}
