//! The "Daisy is missing..." flicker: a one-tick message at a random spot, rolled every tick.

use bevy::prelude::*;
use rand::Rng;

use crate::level::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::session::SessionRng;

pub const MESSAGE: &str = "Daisy is missing...";

/// One chance in this many per tick.
const ODDS: u32 = 121;
/// Room left for the text so it never starts off screen.
const TEXT_EXTENT: Vec2 = Vec2::new(180.0, 30.0);

/// Rolls the per-tick chance; on a hit, returns the top-left corner of the message.
pub fn roll(rng: &mut SessionRng) -> Option<Vec2> {
    if rng.random_range(0..ODDS) != 0 {
        return None;
    }

    let x = rng.random_range(0..=(PLAYFIELD_WIDTH - TEXT_EXTENT.x) as u32);
    let y = rng.random_range(0..=(PLAYFIELD_HEIGHT - TEXT_EXTENT.y) as u32);
    Some(Vec2::new(x as f32, y as f32))
}
