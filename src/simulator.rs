//! Simulation of the robot on the field.
//!
//! The scheduler is ticked from the fixed-timestep schedule, so the motion state advances by the
//! configured period regardless of the frame rate. Each tick publishes a snapshot for rendering.

use bevy::prelude::*;

use crate::{
    domain::TickScheduler,
    resource::{InputRes, SchedulerRes, SnapshotRes},
};

pub struct Simulator {
    scheduler: TickScheduler,
}

impl Simulator {
    pub fn new(scheduler: TickScheduler) -> Self {
        Self { scheduler }
    }
}

impl Plugin for Simulator {
    fn build(&self, app: &mut App) {
        let snapshot = self.scheduler.snapshot();
        app.insert_resource(Time::<Fixed>::from_seconds(self.scheduler.dt()))
            .insert_resource(SchedulerRes::from(self.scheduler.clone()))
            .insert_resource(SnapshotRes::from(snapshot))
            .init_resource::<InputRes>()
            .add_systems(Startup, start)
            .add_systems(FixedUpdate, simulate);
    }
}

fn start(mut scheduler: ResMut<SchedulerRes>) {
    let limits = *scheduler.robot().limits();
    if !limits.has_snappy_braking() {
        warn!(
            "braking is not faster than acceleration: linear {}/{} in/s², yaw {:.2}/{:.2} rad/s²",
            limits.max_linear_brake_accel(),
            limits.max_linear_accel(),
            limits.max_yaw_brake_accel(),
            limits.max_yaw_accel(),
        );
    }

    match scheduler.start() {
        Ok(()) => info!(
            "simulation started: {:?} {:?} at {:.1} Hz, {:?}",
            scheduler.drive_mode(),
            scheduler.drive_type(),
            1.0 / scheduler.dt(),
            scheduler.robot().pose(),
        ),
        Err(error) => warn!("{error}"),
    }
}

fn simulate(
    mut scheduler: ResMut<SchedulerRes>,
    mut input: ResMut<InputRes>,
    mut snapshot: ResMut<SnapshotRes>,
) {
    if let Err(error) = scheduler.tick(&mut **input, &mut *snapshot) {
        warn!("tick skipped: {error}");
    }
}
