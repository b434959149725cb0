//! Controller steering the robot.
//!
//! The robot is driven with the keyboard (W/S forward and reverse, A/D strafe, Q/E turn) or the
//! left and right sticks of a gamepad. The keyboard takes over while any drive key is held.
//! R resets the robot to its start pose, Space halts it and F toggles the drive mode. Escape
//! stops the simulation and closes the app.

use bevy::{app::AppExit, prelude::*};

use crate::{
    domain::{Axes, DriveKey},
    resource::{InputRes, SchedulerRes},
};

const DRIVE_KEYS: [(KeyCode, DriveKey); 6] = [
    (KeyCode::KeyW, DriveKey::Forward),
    (KeyCode::KeyS, DriveKey::Backward),
    (KeyCode::KeyA, DriveKey::Left),
    (KeyCode::KeyD, DriveKey::Right),
    (KeyCode::KeyQ, DriveKey::CounterClockwise),
    (KeyCode::KeyE, DriveKey::Clockwise),
];

pub struct Controller;

impl Plugin for Controller {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (read_keyboard, read_gamepad, handle_commands));
    }
}

fn read_keyboard(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputRes>) {
    for (code, key) in DRIVE_KEYS {
        input.keyboard.set(key, keys.pressed(code));
    }
}

fn read_gamepad(
    gamepads: Res<Gamepads>,
    axes: Res<Axis<GamepadAxis>>,
    mut input: ResMut<InputRes>,
) {
    let Some(gamepad) = gamepads.iter().next() else {
        input.gamepad.stage(Axes::default());
        return;
    };

    let value = |axis_type: GamepadAxisType| {
        axes.get(GamepadAxis::new(gamepad, axis_type))
            .unwrap_or_default() as f64
    };

    input.gamepad.stage(Axes::new(
        value(GamepadAxisType::LeftStickY),
        value(GamepadAxisType::LeftStickX),
        -value(GamepadAxisType::RightStickX),
    ));
}

fn handle_commands(
    keys: Res<ButtonInput<KeyCode>>,
    mut scheduler: ResMut<SchedulerRes>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        scheduler.reset();
        info!("robot reset to {:?}", scheduler.robot().pose());
    }

    if keys.just_pressed(KeyCode::Space) {
        scheduler.halt();
        info!("robot halted at {:?}", scheduler.robot().pose());
    }

    if keys.just_pressed(KeyCode::KeyF) {
        let drive_mode = scheduler.toggle_drive_mode();
        info!("drive mode switched to {drive_mode:?}");
    }

    if keys.just_pressed(KeyCode::Escape) {
        match scheduler.stop() {
            Ok(()) => info!("simulation stopped after {} ticks", scheduler.ticks()),
            Err(error) => warn!("{error}"),
        }
        exit.send(AppExit);
    }
}
