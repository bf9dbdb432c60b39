//! Procedural level generation and the static platform entities that draw it.
//!
//! A level is eight platforms climbing the screen plus one exit zone sitting on the last of them.
//! Everything is produced from the session RNG in a fixed draw order, so the same seed always
//! rebuilds the same level. Coordinates are screen space: origin top-left, y grows downward.

use bevy::math::Rect;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionRng};
use crate::state::GameState;

pub const PLAYFIELD_WIDTH: f32 = 768.0;
pub const PLAYFIELD_HEIGHT: f32 = 432.0;

pub const PLATFORM_COUNT: usize = 8;
pub const PLATFORM_HEIGHT: f32 = 18.0;
const PLATFORM_WIDTH_RANGE: (i32, i32) = (100, 180);
/// Horizontal breathing room kept on both sides of every platform.
const PLAYFIELD_MARGIN: i32 = 60;
const RISE_RANGE: (i32, i32) = (32, 48);
/// Platforms climb from the bottom edge of the screen. The lowest top sits at least one rise
/// above it, below the actor's starting feet.
const FLOOR_ANCHOR: f32 = PLAYFIELD_HEIGHT;

pub const EXIT_SIZE: Vec2 = Vec2::new(48.0, 18.0);
/// Exit offset from the last platform's top-right corner (left, up).
const EXIT_INSET: Vec2 = Vec2::new(60.0, 22.0);

const PLATFORM_COLOR: Color = Color::srgb(90.0 / 255.0, 60.0 / 255.0, 120.0 / 255.0);
const EXIT_COLOR: Color = Color::srgb(1.0, 240.0 / 255.0, 70.0 / 255.0);
const EXIT_LABEL_COLOR: Color = Color::srgb(30.0 / 255.0, 30.0 / 255.0, 30.0 / 255.0);

/// Axis-aligned rectangle in screen space. Never mutated once generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// The exit shares the platform shape; overlapping it wins the session.
pub type ExitZone = Platform;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub exit: ExitZone,
}

impl Level {
    /// Convenience for callers that only need the level: seeds a fresh stream exactly the way a
    /// session does before its first draw.
    pub fn from_seed(seed: i64) -> Self {
        let mut rng = SessionRng::seed_from_u64(seed as u64);
        Self::generate(&mut rng)
    }

    /// Draws width, offset and rise for each platform, bottom to top. The offset range already
    /// accounts for the drawn width, so no platform can leave the playfield.
    pub fn generate(rng: &mut SessionRng) -> Self {
        let mut platforms = Vec::with_capacity(PLATFORM_COUNT);
        let mut top = FLOOR_ANCHOR;

        for _ in 0..PLATFORM_COUNT {
            let width = rng.random_range(PLATFORM_WIDTH_RANGE.0..=PLATFORM_WIDTH_RANGE.1);
            let max_x = PLAYFIELD_WIDTH as i32 - PLAYFIELD_MARGIN - width;
            let x = rng.random_range(PLAYFIELD_MARGIN..=max_x);
            let rise = rng.random_range(RISE_RANGE.0..=RISE_RANGE.1);
            top -= rise as f32;

            platforms.push(Platform::new(
                x as f32,
                top,
                width as f32,
                PLATFORM_HEIGHT,
            ));
        }

        let exit = exit_for(&platforms[PLATFORM_COUNT - 1]);
        Self { platforms, exit }
    }
}

fn exit_for(last: &Platform) -> ExitZone {
    Platform::new(
        last.x + last.width - EXIT_INSET.x,
        last.top() - EXIT_INSET.y,
        EXIT_SIZE.x,
        EXIT_SIZE.y,
    )
}

/// Maps a screen-space point (top-left origin, y down) onto Bevy's centered, y-up world.
pub fn screen_to_world(point: Vec2) -> Vec2 {
    Vec2::new(
        point.x - PLAYFIELD_WIDTH * 0.5,
        PLAYFIELD_HEIGHT * 0.5 - point.y,
    )
}

/// Marker for everything spawned for the running session; the teardown pass despawns by it.
#[derive(Component)]
pub struct SessionEntity;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Running), spawn_level);
    }
}

fn spawn_level(mut commands: Commands, session: Res<Session>) {
    let level = session.level();

    for (index, platform) in level.platforms.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Platform{index}")),
            SessionEntity,
            rect_sprite(platform, PLATFORM_COLOR, 0.0),
        ));
    }

    commands
        .spawn((
            Name::new("Exit"),
            SessionEntity,
            rect_sprite(&level.exit, EXIT_COLOR, 0.1),
        ))
        .with_children(|parent| {
            parent.spawn(Text2dBundle {
                text: Text::from_section(
                    "EXIT",
                    TextStyle {
                        font_size: 16.0,
                        color: EXIT_LABEL_COLOR,
                        ..default()
                    },
                ),
                transform: Transform::from_xyz(0.0, 0.0, 0.1),
                ..default()
            });
        });

    debug!(
        "Spawned {} platforms, exit at ({}, {})",
        level.platforms.len(),
        level.exit.x,
        level.exit.y
    );
}

fn rect_sprite(platform: &Platform, color: Color, z: f32) -> SpriteBundle {
    let rect = platform.rect();
    let center = screen_to_world(rect.center());

    SpriteBundle {
        sprite: Sprite {
            color,
            custom_size: Some(rect.size()),
            ..default()
        },
        transform: Transform::from_translation(center.extend(z)),
        ..default()
    }
}
