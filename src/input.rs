//! Keyboard sampling. The mapping from held keys to intent is a pure function; the Bevy systems
//! here only copy device state into a snapshot the simulation reads once per tick.

use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;
use bevy::window::WindowCloseRequested;

use crate::state::{GameSet, GameState};

/// Pixels per tick while left or right is held.
pub const MOVE_SPEED: f32 = 4.0;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingInput>()
            .add_systems(PreUpdate, latch_close_request)
            .add_systems(
                FixedUpdate,
                read_player_input
                    .in_set(GameSet::Input)
                    .run_if(in_state(GameState::Running)),
            );
    }
}

/// The four logical keys, as held during the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub escape: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub horizontal_intent: f32,
    pub jump_requested: bool,
    pub quit_requested: bool,
}

/// Left and right held together cancel out.
pub fn sample(keys: &KeySnapshot) -> TickInput {
    let mut axis = 0.0;
    if keys.left {
        axis -= 1.0;
    }
    if keys.right {
        axis += 1.0;
    }

    TickInput {
        horizontal_intent: axis * MOVE_SPEED,
        jump_requested: keys.up,
        quit_requested: keys.escape,
    }
}

/// Input handed from the device layer to the next simulation tick.
#[derive(Resource, Debug, Default)]
pub struct PendingInput {
    pub keys: KeySnapshot,
    /// Latched until a tick consumes it, so a close request between ticks is never lost.
    pub close_requested: bool,
}

fn read_player_input(keyboard: Res<ButtonInput<KeyCode>>, mut pending: ResMut<PendingInput>) {
    pending.keys = KeySnapshot {
        left: keyboard.pressed(KeyCode::ArrowLeft) || keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::ArrowRight) || keyboard.pressed(KeyCode::KeyD),
        up: keyboard.pressed(KeyCode::ArrowUp) || keyboard.pressed(KeyCode::Space),
        escape: keyboard.pressed(KeyCode::Escape),
    };
}

fn latch_close_request(
    mut events: EventReader<WindowCloseRequested>,
    mut pending: ResMut<PendingInput>,
) {
    if events.read().count() > 0 {
        info!("Window close requested");
        pending.close_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_held_is_idle() {
        assert_eq!(sample(&KeySnapshot::default()), TickInput::default());
    }

    #[test]
    fn direction_keys_scale_by_speed() {
        let left = sample(&KeySnapshot {
            left: true,
            ..default()
        });
        let right = sample(&KeySnapshot {
            right: true,
            ..default()
        });

        assert_eq!(left.horizontal_intent, -MOVE_SPEED);
        assert_eq!(right.horizontal_intent, MOVE_SPEED);
    }

    #[test]
    fn opposite_keys_cancel() {
        let input = sample(&KeySnapshot {
            left: true,
            right: true,
            up: true,
            escape: false,
        });

        assert_eq!(input.horizontal_intent, 0.0);
        assert!(input.jump_requested);
        assert!(!input.quit_requested);
    }

    #[test]
    fn escape_requests_quit() {
        let input = sample(&KeySnapshot {
            escape: true,
            ..default()
        });
        assert!(input.quit_requested);
    }
}
