//! Timed pickups on the rim of the dish.

use log::debug;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::events::SoundCue;
use super::params::GameConfig;
use super::world::WorldView;

/// The effect a goodie grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoodieKind {
    /// Restores the player's health.
    Health,
    /// Adds flame charges.
    FlameThrower,
    /// Adds a life.
    ExtraLife,
    /// Hurts the player and costs points.
    Fungus,
}

impl GoodieKind {
    /// Short label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Health => "health goodie",
            Self::FlameThrower => "flamethrower goodie",
            Self::ExtraLife => "extra life goodie",
            Self::Fungus => "fungus",
        }
    }

    /// Maps a `0..=9` roll onto a beneficial goodie: 60% health, 30% flames,
    /// 10% extra life.
    pub fn from_roll(roll: i32) -> Self {
        match roll {
            i32::MIN..=5 => Self::Health,
            6..=8 => Self::FlameThrower,
            _ => Self::ExtraLife,
        }
    }

    /// Score change applied on pickup.
    pub fn score(self, config: &GameConfig) -> i32 {
        match self {
            Self::Health => config.health_goodie_score,
            Self::FlameThrower => config.flame_goodie_score,
            Self::ExtraLife => config.extra_life_goodie_score,
            Self::Fungus => config.fungus_score,
        }
    }
}

/// A pickup that disappears after its lifetime elapses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goodie {
    /// Effect applied on pickup.
    pub kind: GoodieKind,
    /// Ticks the goodie may exist.
    pub lifetime: i32,
    /// Ticks lived so far.
    pub elapsed: i32,
}

impl Goodie {
    /// Creates a goodie with a fixed lifetime.
    pub fn new(kind: GoodieKind, lifetime: i32) -> Self {
        Self {
            kind,
            lifetime,
            elapsed: 0,
        }
    }

    /// Whether the goodie has outlived its lifetime.
    pub fn is_expired(&self) -> bool {
        self.elapsed > self.lifetime
    }

    /// Pickup takes priority over expiry; otherwise the goodie ages one tick.
    pub fn update(&mut self, body: &mut Body, view: &mut WorldView<'_>) {
        let reach = view.config().sprite_width;
        if view.player_overlaps(&body.pos, reach) {
            self.apply(view);
            body.kill();
            return;
        }
        if self.is_expired() {
            body.kill();
            return;
        }
        self.elapsed += 1;
    }

    fn apply(&self, view: &mut WorldView<'_>) {
        debug!("player picked up {}", self.kind.label());
        let score = self.kind.score(view.config());
        view.increase_score(score);
        match self.kind {
            GoodieKind::Health => {
                let full = view.config().player_health;
                if let Some(player) = view.player_mut() {
                    player.restore_health(full);
                }
                view.play_sound(SoundCue::GotGoodie);
            }
            GoodieKind::FlameThrower => {
                let charges = view.config().flame_charges_per_pickup;
                if let Some(player) = view.player_mut() {
                    player.add_flame_charges(charges);
                }
                view.play_sound(SoundCue::GotGoodie);
            }
            GoodieKind::ExtraLife => {
                view.inc_lives();
                view.play_sound(SoundCue::GotGoodie);
            }
            GoodieKind::Fungus => {
                let damage = view.config().fungus_damage;
                view.damage_player(damage);
            }
        }
    }
}
