//! Color-cycling background. The cycle wraps channels modulo 256 instead of clamping, so the
//! color jumps abruptly at the wrap points.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionRng};
use crate::state::{GameSet, GameState};

/// Ticks per full cycle.
pub const CYCLE_LENGTH: u32 = 360;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::srgb_u8(rgb.r, rgb.g, rgb.b)
    }
}

/// Base colors: deep purple, dark blue, gold, vaporwave cyan, sickly green, pink.
pub const DREAM_PALETTE: [Rgb; 6] = [
    Rgb::new(42, 6, 69),
    Rgb::new(60, 80, 160),
    Rgb::new(212, 155, 47),
    Rgb::new(160, 220, 224),
    Rgb::new(140, 255, 166),
    Rgb::new(222, 92, 125),
];

/// Shuffles the palette and picks the session's base color, in that order.
pub fn pick_base_color(rng: &mut SessionRng) -> Rgb {
    let mut palette = DREAM_PALETTE;
    palette.shuffle(rng);
    palette[rng.random_range(0..palette.len())]
}

/// Background color for a tick. Pure: the counter is reduced modulo [`CYCLE_LENGTH`] first.
pub fn advance(tick: u32, base: Rgb) -> Rgb {
    let t = (tick % CYCLE_LENGTH) as f32;
    let hue = (120.0 + 120.0 * (t / 57.0).sin()) as u32;

    let channel = |base: u8, scale: u32| ((base as u32 + hue * scale) % 256) as u8;
    Rgb::new(channel(base.r, 1), channel(base.g, 2), channel(base.b, 3))
}

pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            paint_background
                .in_set(GameSet::Presentation)
                .run_if(in_state(GameState::Running)),
        );
    }
}

fn paint_background(session: Res<Session>, mut clear_color: ResMut<ClearColor>) {
    clear_color.0 = session.background().into();
}
