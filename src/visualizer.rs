//! 2D top-down visualization of the field and the robot.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::{
    domain::{Angle, Position, RobotSnapshot},
    resource::SnapshotRes,
    settings::Alliance,
};

const FIELD_SIZE: f64 = 144.0;
const TILE_SIZE: f64 = 24.0;
const WHEEL_LENGTH: f64 = 4.0;
const WHEEL_WIDTH: f64 = 2.0;
const WHEEL_INSET: f64 = 1.0;

pub struct Visualizer {
    alliance: Alliance,
}

impl Visualizer {
    pub fn new(alliance: Alliance) -> Self {
        Self { alliance }
    }
}

impl Plugin for Visualizer {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, set_up)
            .add_systems(
                Update,
                (
                    update_text,
                    handle_keyboard_input,
                    (draw_field, draw_robot).chain(),
                ),
            )
            .insert_resource(ClearColor(Color::GRAY))
            .insert_resource(Scene {
                alliance: self.alliance,
                show_text: false,
            });
    }
}

#[derive(Resource)]
pub struct Scene {
    alliance: Alliance,
    show_text: bool,
}

/// Maps field inches onto the window. The field is centered and fills the shorter window side.
#[derive(Clone, Copy, Debug, PartialEq)]
struct View {
    scale: f32,
    rotation: f32,
}

impl View {
    fn new(window: &Window, alliance: Alliance) -> Self {
        Self {
            scale: window.width().min(window.height()) / FIELD_SIZE as f32,
            rotation: match alliance {
                Alliance::Red => 0.0,
                Alliance::Blue => PI,
            },
        }
    }

    fn to_screen(self, position: Position) -> Vec2 {
        Vec2::from_angle(self.rotation).rotate(Vec2::from(<(f32, f32)>::from(position)))
            * self.scale
    }

    fn size(self, width: f64, height: f64) -> Vec2 {
        Vec2::new(width as f32, height as f32) * self.scale
    }
}

struct Palette {
    body: Color,
    wheel: Color,
}

impl From<Alliance> for Palette {
    fn from(alliance: Alliance) -> Self {
        match alliance {
            Alliance::Red => Palette {
                body: Color::rgba_u8(237, 28, 36, 200),
                wheel: Color::rgba_u8(119, 13, 18, 200),
            },
            Alliance::Blue => Palette {
                body: Color::rgba_u8(46, 49, 146, 200),
                wheel: Color::rgba_u8(23, 25, 73, 200),
            },
        }
    }
}

fn set_up(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    let text_style = TextStyle {
        font_size: 18.0,
        ..default()
    };
    commands.spawn(
        TextBundle::from_sections(vec![TextSection::new("", text_style)]).with_style(Style {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
    );
}

fn draw_field(mut gizmos: Gizmos, windows: Query<&Window>, scene: Res<Scene>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let view = View::new(window, scene.alliance);
    let half = FIELD_SIZE / 2.0;

    let tiles = (FIELD_SIZE / TILE_SIZE) as usize;
    for i in 1..tiles {
        let c = -half + i as f64 * TILE_SIZE;
        gizmos.line_2d(
            view.to_screen(Position::new(c, -half)),
            view.to_screen(Position::new(c, half)),
            Color::rgba(1.0, 1.0, 1.0, 0.3),
        );
        gizmos.line_2d(
            view.to_screen(Position::new(-half, c)),
            view.to_screen(Position::new(half, c)),
            Color::rgba(1.0, 1.0, 1.0, 0.3),
        );
    }

    gizmos.rect_2d(
        Vec2::ZERO,
        view.rotation,
        view.size(FIELD_SIZE, FIELD_SIZE),
        Color::WHITE,
    );
}

fn draw_robot(
    mut gizmos: Gizmos,
    windows: Query<&Window>,
    scene: Res<Scene>,
    snapshot: Res<SnapshotRes>,
) {
    let (Ok(window), Some(snapshot)) = (windows.get_single(), snapshot.latest()) else {
        return;
    };
    let view = View::new(window, scene.alliance);
    let palette = Palette::from(scene.alliance);
    let angle = f32::from(snapshot.pose.heading()) + view.rotation;

    let corners = snapshot.corners().map(|c| view.to_screen(c));
    gizmos.linestrip_2d(
        corners.iter().chain(corners.first()).copied(),
        palette.body,
    );

    for position in wheel_positions(snapshot) {
        gizmos.rect_2d(
            view.to_screen(position),
            angle,
            view.size(WHEEL_LENGTH, WHEEL_WIDTH),
            palette.wheel,
        );
    }

    let (start, end) = direction_marker(snapshot);
    gizmos.line_2d(view.to_screen(start), view.to_screen(end), palette.wheel);
}

/// Wheel centers in field coordinates, each wheel tucked into a body corner.
fn wheel_positions(snapshot: &RobotSnapshot) -> [Position; 4] {
    let x = snapshot.footprint.length() / 2.0 - WHEEL_INSET - WHEEL_LENGTH / 2.0;
    let y = snapshot.footprint.width() / 2.0 - WHEEL_INSET - WHEEL_WIDTH / 2.0;
    [(x, y), (-x, y), (-x, -y), (x, -y)].map(|(x, y)| to_field(snapshot, Position::new(x, y)))
}

/// Heading marker running from a sixth to half of the body length ahead of the center.
fn direction_marker(snapshot: &RobotSnapshot) -> (Position, Position) {
    let length = snapshot.footprint.length() / 3.0;
    (
        to_field(snapshot, Position::new(length / 2.0, 0.0)),
        to_field(snapshot, Position::new(1.5 * length, 0.0)),
    )
}

fn to_field(snapshot: &RobotSnapshot, local: Position) -> Position {
    snapshot.pose.advanced(local, Angle::default()).position()
}

fn update_text(mut text: Query<&mut Text>, scene: Res<Scene>, snapshot: Res<SnapshotRes>) {
    let mut text = text.single_mut();
    match snapshot.latest() {
        Some(s) if scene.show_text => {
            let v = s.velocity;
            text.sections[0].value = format!(
                "POS: {:6.1} {:6.1} in {:5.1} deg   VEL: {:5.1} {:5.1} in/s {:5.2} rad/s   {:?}",
                s.pose.x(),
                s.pose.y(),
                s.pose.heading().to_deg(),
                v.axial,
                v.lateral,
                v.yaw,
                s.drive_mode,
            );
        }
        _ => text.sections[0].value = String::new(),
    }
}

fn handle_keyboard_input(keys: Res<ButtonInput<KeyCode>>, mut scene: ResMut<Scene>) {
    if keys.just_pressed(KeyCode::KeyT) {
        scene.show_text = !scene.show_text;
    }
}
