//! Basic building blocks.

use std::{f64::consts::PI, ops::Add};

use nalgebra::{Rotation2, Vector2};

/// Field position in inches. The field origin is its center.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Rotates the vector counter-clockwise by `angle`.
    pub fn rotate_vector(&self, angle: Angle) -> Position {
        (Rotation2::new(angle.0) * Vector2::new(self.x, self.y)).into()
    }
}

impl From<Vector2<f64>> for Position {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Position> for (f32, f32) {
    fn from(value: Position) -> Self {
        (value.x as f32, value.y as f32)
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Angle in radians. Values are never wrapped; use [`Angle::to_deg`] for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    pub const fn new(radians: f64) -> Self {
        Self(radians)
    }

    pub fn radians(self) -> f64 {
        self.0
    }

    /// Degrees normalized to `[0, 360)`.
    pub fn to_deg(self) -> f64 {
        ((self.0 * (180.0 / PI)).rem_euclid(360.0) + 360.0) % 360.0
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl From<Angle> for f64 {
    fn from(value: Angle) -> Self {
        value.0
    }
}

impl From<Angle> for f32 {
    fn from(value: Angle) -> Self {
        value.0 as f32
    }
}

/// Robot location and orientation on the field.
///
/// Heading 0 points along field +X, increasing counter-clockwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Pose {
    position: Position,
    heading: Angle,
}

impl Pose {
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            position: Position::new(x, y),
            heading: Angle::new(heading),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Angle {
        self.heading
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite() && self.heading.0.is_finite()
    }

    /// Moves by a robot-frame displacement, rotated into the field frame by the current heading,
    /// then turns by `turn`.
    pub fn advanced(&self, local: Position, turn: Angle) -> Pose {
        Pose {
            position: self.position + local.rotate_vector(self.heading),
            heading: self.heading + turn,
        }
    }
}
