//! Draws the actor: a red ellipse with an "M" on it, following the simulated position.
//!
//! The entity only mirrors `Session::actor`; physics never reads it back.

use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::level::{screen_to_world, SessionEntity};
use crate::physics::ACTOR_SIZE;
use crate::session::Session;
use crate::state::{GameSet, GameState};

const ACTOR_COLOR: Color = Color::srgb(220.0 / 255.0, 60.0 / 255.0, 40.0 / 255.0);
const ACTOR_Z: f32 = 2.0;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Running), spawn_player)
            .add_systems(
                FixedUpdate,
                sync_player_transform
                    .in_set(GameSet::Presentation)
                    .run_if(in_state(GameState::Running)),
            );
    }
}

#[derive(Component)]
pub struct Player;

fn spawn_player(
    mut commands: Commands,
    session: Res<Session>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    let half = ACTOR_SIZE * 0.5;
    let position = screen_to_world(session.actor().position);

    commands
        .spawn((
            Name::new("Player"),
            Player,
            SessionEntity,
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Ellipse::new(half.x, half.y))),
                material: materials.add(ACTOR_COLOR),
                transform: Transform::from_translation(position.extend(ACTOR_Z)),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent.spawn(Text2dBundle {
                text: Text::from_section(
                    "M",
                    TextStyle {
                        font_size: 26.0,
                        color: Color::WHITE,
                        ..default()
                    },
                ),
                transform: Transform::from_xyz(0.0, 0.0, 0.1),
                ..default()
            });
        });
}

fn sync_player_transform(
    session: Res<Session>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let position = screen_to_world(session.actor().position);

    for mut transform in &mut query {
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}
