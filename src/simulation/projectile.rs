//! Projectiles fired by the player.
//!
//! Sprays and flames travel in a straight line one sprite width per tick and
//! expire after travelling their maximum range or after their first hit.

use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::locatable::Locatable;
use super::params::GameConfig;
use super::world::WorldView;

/// Which weapon produced the projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Single forward shot.
    Spray,
    /// Part of a radial burst.
    Flame,
}

impl ProjectileKind {
    /// Short label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Spray => "spray",
            Self::Flame => "flame",
        }
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Weapon that fired it.
    pub kind: ProjectileKind,
    /// Damage dealt on impact.
    pub damage: i32,
    /// Maximum distance before expiring.
    pub max_range: f32,
    /// Total distance traveled so far.
    pub distance_traveled: f32,
}

impl Projectile {
    /// Creates a projectile that has not moved yet.
    ///
    /// # Arguments
    ///
    /// * `kind` - Weapon that fired it
    /// * `max_range` - Maximum travel distance before expiring
    /// * `damage` - Damage dealt on impact
    pub fn new(kind: ProjectileKind, max_range: f32, damage: i32) -> Self {
        Self {
            kind,
            damage,
            max_range,
            distance_traveled: 0.0,
        }
    }

    /// A spray with the configured range and damage.
    pub fn spray(config: &GameConfig) -> Self {
        Self::new(ProjectileKind::Spray, config.spray_range, config.spray_damage)
    }

    /// A flame with the configured range and damage.
    pub fn flame(config: &GameConfig) -> Self {
        Self::new(ProjectileKind::Flame, config.flame_range, config.flame_damage)
    }

    /// Checks if the projectile has exceeded its maximum range.
    pub fn is_expired(&self) -> bool {
        self.distance_traveled >= self.max_range
    }

    /// Hits the first damageable entity under the projectile, or advances it.
    pub fn update(&mut self, body: &mut Body, view: &mut WorldView<'_>) {
        let (x, y) = (body.pos[0], body.pos[1]);
        if view.apply_damage_at(x, y, self.damage) {
            body.kill();
            return;
        }

        let step = view.config().sprite_width;
        body.move_along(body.heading(), step);
        self.distance_traveled += step;
        if self.is_expired() {
            body.kill();
        }
    }
}
