//! High-level plugin composition.
//!
//! `DreamPlatformerPlugin` registers every session plugin, chains the per-tick system sets in
//! `FixedUpdate`, and owns the one system that actually advances the simulation.

use bevy::prelude::*;

use crate::background::BackgroundPlugin;
use crate::config::SeedSource;
use crate::input::{ControlsPlugin, PendingInput};
use crate::level::LevelPlugin;
use crate::player::PlayerPlugin;
use crate::session::Session;
use crate::state::{end_session, GameSet, GameState};
use crate::ui::UiPlugin;

/// Target simulation rate.
pub const TICK_HZ: f64 = 60.0;

/// Everything a session needs besides Bevy's own plugins. Expects a `Session` resource to be
/// inserted before the app runs.
pub struct DreamPlatformerPlugin;

impl Plugin for DreamPlatformerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .add_plugins((
                ControlsPlugin,   // Key snapshot + close request latch.
                LevelPlugin,      // Platform and exit sprites.
                PlayerPlugin,     // Actor ellipse.
                BackgroundPlugin, // Clear color cycling.
                UiPlugin,         // HUD text.
            ))
            // One tick is Input → Simulation → Presentation, never interleaved. Rendering
            // happens after the fixed schedule, so a frame never sees a half-advanced actor.
            .configure_sets(
                FixedUpdate,
                (GameSet::Input, GameSet::Simulation, GameSet::Presentation)
                    .chain()
                    .run_if(in_state(GameState::Running)),
            )
            .add_systems(Startup, (setup_camera, log_session_start))
            .add_systems(FixedUpdate, advance_session.in_set(GameSet::Simulation))
            .add_systems(OnEnter(GameState::Won), end_session)
            .add_systems(OnEnter(GameState::Quit), end_session);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Name::new("MainCamera"), Camera2dBundle::default()));
}

fn log_session_start(session: Res<Session>) {
    let params = session.params();

    if params.seed_source == SeedSource::Clock {
        warn!("Seed missing or not an integer; using clock seed {}", params.seed);
    }

    info!(
        "Entering '{}' with seed {} and {} MB of dream RAM",
        params.level_name, params.seed, params.memory_mb
    );
    debug!("Base background color {:?}", session.base_color());
}

fn advance_session(
    mut session: ResMut<Session>,
    mut pending: ResMut<PendingInput>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let close_requested = std::mem::take(&mut pending.close_requested);
    let phase = session.step(&pending.keys, close_requested);

    if phase != GameState::Running {
        next_state.set(phase);
    }
}
