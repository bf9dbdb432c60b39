//! Kinematics for the single actor: instant horizontal intent, gravity, a grounded-only jump and
//! one-way platforms that catch the actor only while it falls onto them from above.

use bevy::math::Rect;
use bevy::prelude::*;

use crate::collision::{foot_sensor, overlaps};
use crate::level::Platform;

/// Added to vertical velocity every tick, grounded or not.
pub const GRAVITY: f32 = 0.55;
/// Upward launch speed; negative because screen y grows downward.
pub const JUMP_IMPULSE: f32 = -11.0;

pub const ACTOR_SIZE: Vec2 = Vec2::new(36.0, 44.0);
pub const ACTOR_START: Vec2 = Vec2::new(256.0, 352.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub half_extents: Vec2,
}

impl Collider {
    pub fn from_size(size: Vec2) -> Self {
        Self {
            half_extents: size * 0.5,
        }
    }
}

/// The single player body. `position` is the center of its box in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub position: Vec2,
    pub velocity_y: f32,
    pub grounded: bool,
    pub collider: Collider,
}

impl Default for Actor {
    fn default() -> Self {
        Self::at(ACTOR_START)
    }
}

impl Actor {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            grounded: false,
            collider: Collider::from_size(ACTOR_SIZE),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_half_size(self.position, self.collider.half_extents)
    }

    fn rest_on(&mut self, platform: &Platform) {
        self.position.y = platform.top() - self.collider.half_extents.y;
        self.velocity_y = 0.0;
        self.grounded = true;
    }
}

/// Advances the actor by one tick. Horizontal intent moves it directly; there is no horizontal
/// collision and nothing stops it from rising through a platform from below.
///
/// Ground contact is tested against the box computed after integration, but only platforms whose
/// top was at or below the actor's feet before this tick can catch it. Of those, the highest top
/// wins, so a platform the actor's box already reaches into from below never lifts it.
pub fn integrate(
    actor: &mut Actor,
    platforms: &[Platform],
    horizontal_intent: f32,
    jump_requested: bool,
) {
    let feet_before = actor.bounds().max.y;
    actor.position.x += horizontal_intent;

    if jump_requested && actor.grounded {
        actor.velocity_y = JUMP_IMPULSE;
        actor.grounded = false;
    }

    actor.velocity_y += GRAVITY;
    actor.position.y += actor.velocity_y;

    actor.grounded = false;
    if actor.velocity_y < 0.0 {
        return;
    }

    let sensor = foot_sensor(actor.bounds());
    let landing = platforms
        .iter()
        .filter(|platform| feet_before <= platform.top() && overlaps(sensor, platform.rect()))
        .min_by(|a, b| a.top().total_cmp(&b.top()));

    if let Some(platform) = landing {
        actor.rest_on(platform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use proptest::prelude::*;

    fn ledge() -> Platform {
        Platform::new(200.0, 300.0, 150.0, 18.0)
    }

    fn standing_on(platform: &Platform) -> Actor {
        let mut actor = Actor::at(Vec2::new(platform.x + 40.0, platform.top() - 22.0));
        actor.grounded = true;
        actor
    }

    #[test]
    fn resting_actor_stays_put() {
        let platforms = [ledge()];
        let mut actor = standing_on(&platforms[0]);
        let before = actor.position;

        for _ in 0..10 {
            integrate(&mut actor, &platforms, 0.0, false);
            assert_eq!(actor.position, before);
            assert!(actor.grounded);
            assert_eq!(actor.velocity_y, 0.0);
        }
    }

    #[test]
    fn settles_from_one_unit_above() {
        let platforms = [ledge()];
        let mut actor = Actor::at(Vec2::new(240.0, 300.0 - 1.0 - 22.0));

        integrate(&mut actor, &platforms, 0.0, false);

        assert!(actor.grounded);
        assert_eq!(actor.velocity_y, 0.0);
        assert_eq!(actor.bounds().max.y, 300.0);
    }

    #[test]
    fn jump_comes_back_down() {
        let platforms = [ledge()];
        let mut actor = standing_on(&platforms[0]);

        integrate(&mut actor, &platforms, 0.0, true);
        assert!(!actor.grounded);
        assert!(actor.velocity_y < 0.0);

        let mut ticks = 0;
        while !actor.grounded {
            integrate(&mut actor, &platforms, 0.0, false);
            ticks += 1;
            assert!(ticks < 200, "actor never landed");
        }
        assert_eq!(actor.bounds().max.y, platforms[0].top());
    }

    #[test]
    fn jump_requires_ground() {
        let mut actor = Actor::at(Vec2::new(0.0, 0.0));
        integrate(&mut actor, &[], 0.0, true);
        assert_eq!(actor.velocity_y, GRAVITY);
    }

    #[test]
    fn rising_actor_passes_through_platforms() {
        let platforms = [ledge()];
        let mut actor = Actor::at(Vec2::new(240.0, 310.0));
        actor.velocity_y = -6.0;

        integrate(&mut actor, &platforms, 0.0, false);

        assert!(!actor.grounded);
        assert!(actor.velocity_y < 0.0);
    }

    #[test]
    fn horizontal_intent_is_instant() {
        let mut actor = Actor::default();
        integrate(&mut actor, &[], 4.0, false);
        assert_eq!(actor.position.x, ACTOR_START.x + 4.0);
    }

    #[test]
    fn highest_surface_below_the_feet_wins() {
        let lower = Platform::new(200.0, 320.0, 150.0, 18.0);
        let upper = Platform::new(200.0, 310.0, 150.0, 18.0);

        for platforms in [[upper, lower], [lower, upper]] {
            // Feet at 300, falling far enough to reach into both platforms this tick.
            let mut actor = Actor::at(Vec2::new(240.0, 278.0));
            actor.velocity_y = 20.0;

            integrate(&mut actor, &platforms, 0.0, false);
            assert!(actor.grounded);
            assert_eq!(actor.bounds().max.y, upper.top());
        }
    }

    #[test]
    fn platform_overhead_does_not_lift_a_resting_actor() {
        let floor = ledge();
        let overhead = Platform::new(220.0, floor.top() - 32.0, 150.0, 18.0);
        let platforms = [floor, overhead];
        let mut actor = standing_on(&floor);
        let before = actor.position;

        assert!(overlaps(actor.bounds(), overhead.rect()));
        integrate(&mut actor, &platforms, 0.0, false);

        assert_eq!(actor.position, before);
        assert!(actor.grounded);
    }

    fn on_generated_platforms(seed: i64) -> Vec<(Platform, Actor)> {
        Level::from_seed(seed)
            .platforms
            .into_iter()
            .flat_map(|platform| {
                [1.0, platform.width * 0.5, platform.width - 1.0].map(|offset| {
                    let feet = Vec2::new(platform.x + offset, platform.top());
                    (platform, Actor::at(feet - Vec2::new(0.0, ACTOR_SIZE.y * 0.5)))
                })
            })
            .collect()
    }

    proptest! {
        #[test]
        fn generated_platforms_hold_an_idle_actor(seed in any::<i64>()) {
            let platforms = Level::from_seed(seed).platforms;

            for (platform, mut actor) in on_generated_platforms(seed) {
                let before = actor.position;
                integrate(&mut actor, &platforms, 0.0, false);

                prop_assert_eq!(actor.position, before, "slipped off {:?}", platform);
                prop_assert!(actor.grounded);
            }
        }

        #[test]
        fn jumps_from_generated_platforms_land(seed in any::<i64>()) {
            let platforms = Level::from_seed(seed).platforms;

            for (platform, mut actor) in on_generated_platforms(seed) {
                actor.grounded = true;
                integrate(&mut actor, &platforms, 0.0, true);
                prop_assert!(!actor.grounded);

                let mut ticks = 0;
                while !actor.grounded {
                    integrate(&mut actor, &platforms, 0.0, false);
                    ticks += 1;
                    prop_assert!(ticks < 200, "jump from {:?} never landed", platform);
                }

                let feet = actor.bounds().max.y;
                prop_assert!(platforms.iter().any(|p| p.top() == feet));
            }
        }
    }
}
