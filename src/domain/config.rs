//! Construction-time configuration of the simulation.

use std::{f64::consts::PI, time::Duration};

use thiserror::Error;

use super::{DriveMode, DriveType, Footprint, FootprintError, KinematicLimits, LimitsError, Pose};

/// Everything needed to build the simulation core. Produced once before the core exists.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub start_pose: Pose,
    pub limits: KinematicLimits,
    pub footprint: Footprint,
    pub drive_mode: DriveMode,
    pub drive_type: DriveType,
    pub tick_period: Duration,
}

impl SimulationConfig {
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(16);
    const MIN_TICK_PERIOD: Duration = Duration::from_micros(1);

    pub fn with_start_pose(&self, start_pose: Pose) -> Self {
        Self {
            start_pose,
            ..self.clone()
        }
    }

    pub fn with_limits(&self, limits: KinematicLimits) -> Self {
        Self {
            limits,
            ..self.clone()
        }
    }

    pub fn with_footprint(&self, footprint: Footprint) -> Self {
        Self {
            footprint,
            ..self.clone()
        }
    }

    pub fn with_drive_mode(&self, drive_mode: DriveMode) -> Self {
        Self {
            drive_mode,
            ..self.clone()
        }
    }

    pub fn with_drive_type(&self, drive_type: DriveType) -> Self {
        Self {
            drive_type,
            ..self.clone()
        }
    }

    pub fn with_tick_period(&self, tick_period: Duration) -> Self {
        Self {
            tick_period,
            ..self.clone()
        }
    }

    /// Limits and footprint are validated when they are built; this checks the remaining fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period < Self::MIN_TICK_PERIOD {
            return Err(ConfigError::TickPeriod(self.tick_period));
        }
        if !self.start_pose.is_finite() {
            return Err(ConfigError::StartPose(self.start_pose));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_pose: Pose::new(0.0, 0.0, 0.5 * PI),
            limits: KinematicLimits::default(),
            footprint: Footprint::default(),
            drive_mode: DriveMode::default(),
            drive_type: DriveType::default(),
            tick_period: Self::DEFAULT_TICK_PERIOD,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid kinematic limits: {0}")]
    Limits(#[from] LimitsError),
    #[error("invalid footprint: {0}")]
    Footprint(#[from] FootprintError),
    #[error("tick period {0:?} is too short")]
    TickPeriod(Duration),
    #[error("start pose {0:?} is not finite")]
    StartPose(Pose),
}
