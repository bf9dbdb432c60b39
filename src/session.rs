//! One play session: the level, the actor, the background cycle and the terminal-state check.
//!
//! `Session::step` is the whole simulation half of a tick. It never touches the ECS, so the
//! Bevy systems wrapped around it stay trivial and the tick can be driven directly in tests.
//! All randomness flows from one `SessionRng` seeded from the session seed before any draw.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::apparition;
use crate::background::{self, Rgb, CYCLE_LENGTH};
use crate::collision::overlaps;
use crate::config::SessionParams;
use crate::input::{self, KeySnapshot};
use crate::level::Level;
use crate::physics::{self, Actor};
use crate::state::GameState;

pub type SessionRng = Pcg32;

#[derive(Resource, Debug, Clone)]
pub struct Session {
    params: SessionParams,
    rng: SessionRng,
    level: Level,
    actor: Actor,
    base_color: Rgb,
    tick: u32,
    background: Rgb,
    apparition: Option<Vec2>,
    phase: GameState,
}

impl Session {
    /// Draw order from the session stream: level, then palette, then per-tick apparition rolls.
    pub fn new(params: SessionParams) -> Self {
        let mut rng = SessionRng::seed_from_u64(params.seed as u64);
        let level = Level::generate(&mut rng);
        let base_color = background::pick_base_color(&mut rng);

        Self {
            params,
            rng,
            level,
            actor: Actor::default(),
            base_color,
            tick: 0,
            background: background::advance(0, base_color),
            apparition: None,
            phase: GameState::Running,
        }
    }

    /// Runs one tick: sample input, integrate the actor, advance the background, then decide
    /// whether the session is over. A terminal session ignores further ticks.
    pub fn step(&mut self, keys: &KeySnapshot, close_requested: bool) -> GameState {
        if self.phase != GameState::Running {
            return self.phase;
        }

        let input = input::sample(keys);

        physics::integrate(
            &mut self.actor,
            &self.level.platforms,
            input.horizontal_intent,
            input.jump_requested,
        );

        self.tick = (self.tick + 1) % CYCLE_LENGTH;
        self.background = background::advance(self.tick, self.base_color);
        self.apparition = apparition::roll(&mut self.rng);

        // Quit wins over a simultaneous win: the player asked to leave.
        if input.quit_requested || close_requested {
            self.phase = GameState::Quit;
        } else if overlaps(self.actor.bounds(), self.level.exit.rect()) {
            self.phase = GameState::Won;
        }

        self.phase
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    #[cfg(test)]
    pub fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    pub fn base_color(&self) -> Rgb {
        self.base_color
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn apparition(&self) -> Option<Vec2> {
        self.apparition
    }

    #[cfg(test)]
    pub fn phase(&self) -> GameState {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedSource;
    use crate::physics::ACTOR_START;

    fn session(seed: i64) -> Session {
        Session::new(SessionParams {
            level_name: "Lost Daisy World".to_owned(),
            seed,
            seed_source: SeedSource::Parsed,
            memory_mb: 64,
        })
    }

    fn idle() -> KeySnapshot {
        KeySnapshot::default()
    }

    #[test]
    fn same_seed_same_session() {
        let a = session(1234);
        let b = session(1234);

        assert_eq!(a.level(), b.level());
        assert_eq!(a.base_color(), b.base_color());
        assert_eq!(a.actor().position, ACTOR_START);
        assert_eq!(a.phase(), GameState::Running);
    }

    #[test]
    fn seed_42_actor_never_falls_through_a_platform() {
        let mut session = session(42);
        let held = KeySnapshot {
            right: true,
            up: true,
            ..idle()
        };

        let mut touched = false;
        for _ in 0..600 {
            let feet_before = session.actor().bounds().max.y;
            session.step(&held, false);

            let actor = *session.actor();
            let bounds = actor.bounds();
            for platform in &session.level().platforms {
                let rect = platform.rect();
                touched |= overlaps(bounds, rect);

                let beside = bounds.max.x <= rect.min.x || bounds.min.x >= rect.max.x;
                let crossed = feet_before <= platform.top() && platform.top() < bounds.max.y;
                if actor.velocity_y >= 0.0 && !beside && crossed {
                    assert!(actor.grounded, "fell through {platform:?}");
                }
            }
        }

        assert!(touched, "actor never reached a platform");
    }

    #[test]
    fn standing_in_exit_wins() {
        let mut session = session(42);
        let exit = session.level().exit.rect();
        session.actor_mut().position = exit.center();

        assert_eq!(session.step(&idle(), false), GameState::Won);
        assert_eq!(session.phase(), GameState::Won);
    }

    #[test]
    fn escape_quits_immediately() {
        let mut session = session(5);
        let escape = KeySnapshot {
            escape: true,
            right: true,
            ..idle()
        };

        assert_eq!(session.step(&idle(), false), GameState::Running);
        assert_eq!(session.step(&escape, false), GameState::Quit);
    }

    #[test]
    fn quit_beats_win_on_the_same_tick() {
        let mut session = session(42);
        let exit = session.level().exit.rect();
        session.actor_mut().position = exit.center();

        let escape = KeySnapshot {
            escape: true,
            ..idle()
        };
        assert_eq!(session.step(&escape, false), GameState::Quit);
    }

    #[test]
    fn close_signal_quits() {
        let mut session = session(5);
        assert_eq!(session.step(&idle(), true), GameState::Quit);
    }

    #[test]
    fn terminal_session_stops_simulating() {
        let mut session = session(5);
        session.step(&idle(), true);
        let frozen = *session.actor();

        assert_eq!(session.step(&idle(), false), GameState::Quit);
        assert_eq!(*session.actor(), frozen);
    }

    #[test]
    fn background_follows_the_cycle() {
        let mut session = session(77);
        let base = session.base_color();

        for tick in 1..=CYCLE_LENGTH {
            session.step(&idle(), false);
            assert_eq!(session.background(), background::advance(tick, base));
        }
        assert_eq!(session.background(), background::advance(0, base));
    }
}
