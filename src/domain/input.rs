//! Drive input sources.
//!
//! All sources report normalized axes: axial is +forward, lateral is +right and yaw is
//! +counter-clockwise. Each source is polled once per tick before its axes are read.

use std::collections::BTreeSet;

pub trait InputSource {
    /// Latches the current input state. Called once per tick before the axes are read.
    fn poll(&mut self);

    fn axial(&self) -> f64;

    fn lateral(&self) -> f64;

    fn yaw(&self) -> f64;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Axes {
    pub axial: f64,
    pub lateral: f64,
    pub yaw: f64,
}

impl Axes {
    pub const fn new(axial: f64, lateral: f64, yaw: f64) -> Self {
        Self {
            axial,
            lateral,
            yaw,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum DriveKey {
    Forward,
    Backward,
    Left,
    Right,
    Clockwise,
    CounterClockwise,
}

/// Digital input. Each axis is either -1, 0 or 1; opposite keys cancel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyboardInput {
    pressed: BTreeSet<DriveKey>,
    axes: Axes,
}

impl KeyboardInput {
    pub fn set(&mut self, key: DriveKey, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn press(&mut self, key: DriveKey) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: DriveKey) {
        self.pressed.remove(&key);
    }

    pub fn is_active(&self) -> bool {
        !self.pressed.is_empty()
    }

    fn axis(&self, positive: DriveKey, negative: DriveKey) -> f64 {
        let value = |key: DriveKey| if self.pressed.contains(&key) { 1.0 } else { 0.0 };
        value(positive) - value(negative)
    }
}

impl InputSource for KeyboardInput {
    fn poll(&mut self) {
        self.axes = Axes::new(
            self.axis(DriveKey::Forward, DriveKey::Backward),
            self.axis(DriveKey::Right, DriveKey::Left),
            self.axis(DriveKey::CounterClockwise, DriveKey::Clockwise),
        );
    }

    fn axial(&self) -> f64 {
        self.axes.axial
    }

    fn lateral(&self) -> f64 {
        self.axes.lateral
    }

    fn yaw(&self) -> f64 {
        self.axes.yaw
    }
}

/// Analog input. Raw stick values are staged as they arrive and latched on poll.
#[derive(Clone, Debug, PartialEq)]
pub struct GamepadInput {
    staged: Axes,
    axes: Axes,
    dead_zone: f64,
}

impl GamepadInput {
    pub const DEFAULT_DEAD_ZONE: f64 = 0.1;

    pub fn new(dead_zone: f64) -> Self {
        Self {
            staged: Axes::default(),
            axes: Axes::default(),
            dead_zone: dead_zone.abs(),
        }
    }

    pub fn stage(&mut self, axes: Axes) {
        self.staged = axes;
    }

    fn shape(&self, value: f64) -> f64 {
        if value.abs() < self.dead_zone {
            0.0
        } else {
            value.clamp(-1.0, 1.0)
        }
    }
}

impl Default for GamepadInput {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEAD_ZONE)
    }
}

impl InputSource for GamepadInput {
    fn poll(&mut self) {
        self.axes = Axes::new(
            self.shape(self.staged.axial),
            self.shape(self.staged.lateral),
            self.shape(self.staged.yaw),
        );
    }

    fn axial(&self) -> f64 {
        self.axes.axial
    }

    fn lateral(&self) -> f64 {
        self.axes.lateral
    }

    fn yaw(&self) -> f64 {
        self.axes.yaw
    }
}

/// Keyboard and gamepad together. The keyboard takes over while any key is held.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergedInput {
    pub keyboard: KeyboardInput,
    pub gamepad: GamepadInput,
}

impl MergedInput {
    fn active(&self) -> &dyn InputSource {
        if self.keyboard.is_active() {
            &self.keyboard
        } else {
            &self.gamepad
        }
    }
}

impl InputSource for MergedInput {
    fn poll(&mut self) {
        self.keyboard.poll();
        self.gamepad.poll();
    }

    fn axial(&self) -> f64 {
        self.active().axial()
    }

    fn lateral(&self) -> f64 {
        self.active().lateral()
    }

    fn yaw(&self) -> f64 {
        self.active().yaw()
    }
}
