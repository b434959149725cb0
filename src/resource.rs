//! The resource module encapsulates domain entities for use with Bevy.

use std::ops::{Deref, DerefMut};

use bevy::ecs::system::Resource;

use crate::domain::{self, PoseSink, RobotSnapshot};

#[derive(Resource)]
pub struct SchedulerRes(domain::TickScheduler);

impl Deref for SchedulerRes {
    type Target = domain::TickScheduler;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SchedulerRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<domain::TickScheduler> for SchedulerRes {
    fn from(value: domain::TickScheduler) -> Self {
        Self(value)
    }
}

#[derive(Resource, Default)]
pub struct InputRes(domain::MergedInput);

impl Deref for InputRes {
    type Target = domain::MergedInput;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for InputRes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Latest snapshot published by the scheduler. Empty until the first tick.
#[derive(Resource, Default)]
pub struct SnapshotRes(Option<RobotSnapshot>);

impl SnapshotRes {
    pub fn latest(&self) -> Option<&RobotSnapshot> {
        self.0.as_ref()
    }
}

impl From<RobotSnapshot> for SnapshotRes {
    fn from(value: RobotSnapshot) -> Self {
        Self(Some(value))
    }
}

impl PoseSink for SnapshotRes {
    fn publish(&mut self, snapshot: &RobotSnapshot) {
        self.0 = Some(*snapshot);
    }
}
