//! Mapping of normalized control axes to robot-frame target velocities.

use nalgebra::{Rotation2, Vector2};

use super::{Angle, BodyVelocity, KinematicLimits};

/// How translation inputs are interpreted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub enum DriveMode {
    /// Inputs move the robot relative to its own heading.
    #[default]
    RobotCentric,
    /// Inputs move the robot along the fixed field axes: axial input along field +X, lateral
    /// input along field +Y, whatever the heading.
    FieldCentric,
}

impl DriveMode {
    pub fn toggled(self) -> Self {
        match self {
            DriveMode::RobotCentric => DriveMode::FieldCentric,
            DriveMode::FieldCentric => DriveMode::RobotCentric,
        }
    }
}

/// Drive train of the robot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub enum DriveType {
    /// Holonomic mecanum drive.
    #[default]
    Mecanum,
    /// Differential drive. Cannot strafe.
    Tank,
}

impl DriveType {
    pub fn constrain(self, target: BodyVelocity) -> BodyVelocity {
        match self {
            DriveType::Mecanum => target,
            DriveType::Tank => BodyVelocity {
                lateral: 0.0,
                ..target
            },
        }
    }
}

/// Converts normalized axes in `[-1, 1]` into robot-frame target velocities.
///
/// Inputs are scaled by the speed caps but not clamped; clamping happens when the targets are
/// handed to the motion state. In field-centric mode the scaled field-frame vector is rotated
/// by the inverse heading:
///
/// ```text
/// axial   = fwd * cos(h) + right * sin(h)
/// lateral = right * cos(h) - fwd * sin(h)
/// ```
pub fn map(
    axial: f64,
    lateral: f64,
    yaw: f64,
    heading: Angle,
    mode: DriveMode,
    limits: &KinematicLimits,
) -> BodyVelocity {
    let max_speed = limits.max_linear_speed();
    let translation = Vector2::new(axial * max_speed, lateral * max_speed);

    let translation = match mode {
        DriveMode::RobotCentric => translation,
        DriveMode::FieldCentric => Rotation2::new(heading.radians()).inverse() * translation,
    };

    BodyVelocity::new(translation.x, translation.y, yaw * limits.max_yaw_speed())
}
