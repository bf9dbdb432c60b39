//! HUD text: level name, cosmetic RAM readout, the exit hint and the apparition flicker.
//!
//! UI nodes are positioned in screen space, which matches the simulation's coordinates, so the
//! apparition corner can be used as-is.

use bevy::prelude::*;

use crate::apparition::MESSAGE;
use crate::level::SessionEntity;
use crate::session::Session;
use crate::state::{GameSet, GameState};

const TITLE_COLOR: Color = Color::srgb(245.0 / 255.0, 245.0 / 255.0, 1.0);
const HINT_COLOR: Color = Color::srgb(130.0 / 255.0, 180.0 / 255.0, 1.0);
const MEMORY_COLOR: Color = Color::srgb(1.0, 1.0, 187.0 / 255.0);
const APPARITION_COLOR: Color = Color::srgb(1.0, 215.0 / 255.0, 1.0);
const FONT_SIZE: f32 = 26.0;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Running), spawn_hud)
            .add_systems(
                FixedUpdate,
                update_apparition
                    .in_set(GameSet::Presentation)
                    .run_if(in_state(GameState::Running)),
            );
    }
}

#[derive(Component)]
struct Apparition;

fn spawn_hud(mut commands: Commands, session: Res<Session>) {
    let params = session.params();

    commands.spawn((
        Name::new("LevelTitle"),
        SessionEntity,
        hud_text(&params.level_name, TITLE_COLOR)
            .with_style(anchored(Val::Px(16.0), Val::Px(16.0))),
    ));

    commands.spawn((
        Name::new("MemoryReadout"),
        SessionEntity,
        hud_text(
            &format!("Allocated Dream RAM: {} MB", params.memory_mb),
            MEMORY_COLOR,
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            top: Val::Px(16.0),
            ..default()
        }),
    ));

    commands.spawn((
        Name::new("ExitHint"),
        SessionEntity,
        hud_text("Press [ESC] to exit dream", HINT_COLOR).with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            ..default()
        }),
    ));

    commands.spawn((
        Name::new("Apparition"),
        Apparition,
        SessionEntity,
        TextBundle {
            visibility: Visibility::Hidden,
            ..hud_text(MESSAGE, APPARITION_COLOR).with_style(anchored(Val::Px(0.0), Val::Px(0.0)))
        },
    ));
}

fn hud_text(text: &str, color: Color) -> TextBundle {
    TextBundle::from_section(
        text,
        TextStyle {
            font_size: FONT_SIZE,
            color,
            ..default()
        },
    )
}

fn anchored(left: Val, top: Val) -> Style {
    Style {
        position_type: PositionType::Absolute,
        left,
        top,
        ..default()
    }
}

/// Shows the message only on ticks where the session rolled an apparition.
fn update_apparition(
    session: Res<Session>,
    mut query: Query<(&mut Style, &mut Visibility), With<Apparition>>,
) {
    let Ok((mut style, mut visibility)) = query.get_single_mut() else {
        return;
    };

    match session.apparition() {
        Some(corner) => {
            style.left = Val::Px(corner.x);
            style.top = Val::Px(corner.y);
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}
