//! Per-axis speed, acceleration and braking caps.

use std::f64::consts::PI;

use thiserror::Error;

/// Caps for a single ramped axis. Linear axes share one set, yaw has its own.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct AxisLimits {
    max_speed: f64,
    max_accel: f64,
    max_brake_accel: f64,
}

impl AxisLimits {
    pub fn new(max_speed: f64, max_accel: f64, max_brake_accel: f64) -> Result<Self, LimitsError> {
        for (name, value) in [
            ("max_speed", max_speed),
            ("max_accel", max_accel),
            ("max_brake_accel", max_brake_accel),
        ] {
            if !value.is_finite() {
                return Err(LimitsError::NotFinite { name, value });
            }
            if value < 0.0 {
                return Err(LimitsError::Negative { name, value });
            }
        }

        Ok(Self {
            max_speed,
            max_accel,
            max_brake_accel,
        })
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_accel(&self) -> f64 {
        self.max_accel
    }

    pub fn max_brake_accel(&self) -> f64 {
        self.max_brake_accel
    }

    pub fn has_snappy_braking(&self) -> bool {
        self.max_brake_accel >= self.max_accel
    }
}

/// Kinematic caps of the robot. Immutable once built.
///
/// Units are inches and radians per second (squared). Brake caps below the accel caps are
/// permitted; the robot then merely stops slower than it starts.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct KinematicLimits {
    linear: AxisLimits,
    yaw: AxisLimits,
}

impl KinematicLimits {
    pub fn new(
        max_linear_speed: f64,
        max_linear_accel: f64,
        max_linear_brake_accel: f64,
        max_yaw_speed: f64,
        max_yaw_accel: f64,
        max_yaw_brake_accel: f64,
    ) -> Result<Self, LimitsError> {
        Ok(Self {
            linear: AxisLimits::new(max_linear_speed, max_linear_accel, max_linear_brake_accel)
                .map_err(|e| e.on_axis("linear"))?,
            yaw: AxisLimits::new(max_yaw_speed, max_yaw_accel, max_yaw_brake_accel)
                .map_err(|e| e.on_axis("yaw"))?,
        })
    }

    pub fn linear(&self) -> AxisLimits {
        self.linear
    }

    pub fn yaw(&self) -> AxisLimits {
        self.yaw
    }

    pub fn max_linear_speed(&self) -> f64 {
        self.linear.max_speed()
    }

    pub fn max_linear_accel(&self) -> f64 {
        self.linear.max_accel()
    }

    pub fn max_linear_brake_accel(&self) -> f64 {
        self.linear.max_brake_accel()
    }

    pub fn max_yaw_speed(&self) -> f64 {
        self.yaw.max_speed()
    }

    pub fn max_yaw_accel(&self) -> f64 {
        self.yaw.max_accel()
    }

    pub fn max_yaw_brake_accel(&self) -> f64 {
        self.yaw.max_brake_accel()
    }

    pub fn has_snappy_braking(&self) -> bool {
        self.linear.has_snappy_braking() && self.yaw.has_snappy_braking()
    }
}

impl Default for KinematicLimits {
    /// 60 in/s and 60 in/s² with 300 in/s² braking; π rad/s and π rad/s² on yaw.
    fn default() -> Self {
        Self {
            linear: AxisLimits {
                max_speed: 60.0,
                max_accel: 60.0,
                max_brake_accel: 300.0,
            },
            yaw: AxisLimits {
                max_speed: PI,
                max_accel: PI,
                max_brake_accel: PI,
            },
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimitsError {
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("{axis} {source}")]
    Axis {
        axis: &'static str,
        #[source]
        source: Box<LimitsError>,
    },
}

impl LimitsError {
    fn on_axis(self, axis: &'static str) -> Self {
        LimitsError::Axis {
            axis,
            source: Box::new(self),
        }
    }
}
