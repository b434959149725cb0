//! The domain module holds the kinematic core of the simulator: limits, motion state, input
//! mapping and the fixed-timestep scheduler that ties them together.
//!
//! Nothing in here depends on Bevy, so the core can be driven tick by tick from plain tests.

mod basis;
mod config;
mod drive;
mod input;
mod limits;
mod motion;
mod robot;
mod scheduler;

pub use basis::{Angle, Pose, Position};
pub use config::{ConfigError, SimulationConfig};
pub use drive::{DriveMode, DriveType};
pub use input::{Axes, DriveKey, GamepadInput, InputSource, KeyboardInput, MergedInput};
pub use limits::{AxisLimits, KinematicLimits, LimitsError};
pub use motion::{BodyVelocity, MotionState};
pub use robot::{Footprint, FootprintError, Robot, RobotSnapshot};
pub use scheduler::{PoseSink, SchedulerError, SchedulerState, TickScheduler};
