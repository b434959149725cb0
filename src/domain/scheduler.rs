//! Fixed-timestep driver of the simulation core.
//!
//! Each tick polls the input source, maps the axes to target velocities, ramps and integrates
//! the motion state, and publishes a snapshot. The time step is always the configured tick
//! period, never measured wall-clock time, so a run is reproducible tick for tick.

use thiserror::Error;

use super::{
    drive, ConfigError, DriveMode, DriveType, InputSource, Pose, Robot, RobotSnapshot,
    SimulationConfig,
};

/// Receiver of the per-tick snapshot, typically the renderer.
pub trait PoseSink {
    fn publish(&mut self, snapshot: &RobotSnapshot);
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SchedulerState {
    #[default]
    Idle,
    Running,
    Stopped,
}

#[derive(Clone, Debug)]
pub struct TickScheduler {
    state: SchedulerState,
    robot: Robot,
    start_pose: Pose,
    drive_mode: DriveMode,
    drive_type: DriveType,
    dt: f64,
    ticks: u64,
}

impl TickScheduler {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: SchedulerState::Idle,
            robot: Robot::new(config.start_pose, config.limits, config.footprint),
            start_pose: config.start_pose,
            drive_mode: config.drive_mode,
            drive_type: config.drive_type,
            dt: config.tick_period.as_secs_f64(),
            ticks: 0,
        })
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn drive_mode(&self) -> DriveMode {
        self.drive_mode
    }

    pub fn drive_type(&self) -> DriveType {
        self.drive_type
    }

    /// Fixed time step in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> RobotSnapshot {
        self.robot.snapshot(self.drive_mode, self.ticks)
    }

    pub fn start(&mut self) -> Result<(), SchedulerError> {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::Running;
                Ok(())
            }
            state => Err(SchedulerError::InvalidTransition {
                from: state,
                to: SchedulerState::Running,
            }),
        }
    }

    /// Stops ticking for good. A stopped scheduler cannot be restarted.
    pub fn stop(&mut self) -> Result<(), SchedulerError> {
        match self.state {
            SchedulerState::Running => {
                self.state = SchedulerState::Stopped;
                Ok(())
            }
            state => Err(SchedulerError::InvalidTransition {
                from: state,
                to: SchedulerState::Stopped,
            }),
        }
    }

    pub fn tick(
        &mut self,
        input: &mut impl InputSource,
        sink: &mut impl PoseSink,
    ) -> Result<RobotSnapshot, SchedulerError> {
        if self.state != SchedulerState::Running {
            return Err(SchedulerError::NotRunning(self.state));
        }

        input.poll();
        let target = self.drive_type.constrain(drive::map(
            input.axial(),
            input.lateral(),
            input.yaw(),
            self.robot.pose().heading(),
            self.drive_mode,
            self.robot.limits(),
        ));

        let motion = self.robot.motion_mut();
        motion.set_target_linear(target.axial, target.lateral);
        motion.set_target_yaw(target.yaw);
        motion.update(self.dt);
        self.ticks += 1;

        let snapshot = self.snapshot();
        sink.publish(&snapshot);
        Ok(snapshot)
    }

    pub fn set_drive_mode(&mut self, drive_mode: DriveMode) {
        self.drive_mode = drive_mode;
    }

    pub fn toggle_drive_mode(&mut self) -> DriveMode {
        self.set_drive_mode(self.drive_mode.toggled());
        self.drive_mode
    }

    pub fn teleport(&mut self, pose: Pose) {
        self.robot.motion_mut().set_pose(pose);
    }

    /// Emergency halt. Velocities drop to zero at once instead of ramping down.
    pub fn halt(&mut self) {
        self.robot.motion_mut().stop();
    }

    /// Halts and returns to the configured start pose.
    pub fn reset(&mut self) {
        self.halt();
        self.teleport(self.start_pose);
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("scheduler is {0:?}, not running")]
    NotRunning(SchedulerState),
    #[error("invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: SchedulerState,
        to: SchedulerState,
    },
}
