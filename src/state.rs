//! Session state machine. `Running` is the only live state; `Won` and `Quit` are terminal and
//! entering either tears the session down and asks Bevy to exit.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::level::SessionEntity;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    #[default]
    Running,
    Won,
    Quit,
}

/// Stages of one fixed tick, chained in this order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Simulation,
    Presentation,
}

/// Despawns every session entity before requesting exit, so the window and GPU resources are
/// the only things left for Bevy to release on shutdown.
pub fn end_session(
    mut commands: Commands,
    state: Res<State<GameState>>,
    entities: Query<Entity, With<SessionEntity>>,
    mut exit: EventWriter<AppExit>,
) {
    for entity in &entities {
        commands.entity(entity).despawn_recursive();
    }

    match state.get() {
        GameState::Won => info!("Reached the exit; dream complete"),
        GameState::Quit => info!("Left the dream"),
        GameState::Running => {}
    }

    exit.send(AppExit::Success);
}
