//! The player organism that circles the rim of the dish.
//!
//! The player is not part of the world's entity collection. It is updated
//! last each tick and can only travel along a fixed ring, always facing the
//! centre of the arena.

use log::{debug, info};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::entity::{ACTOR_DEPTH, Entity};
use super::events::{EventQueue, Key, SoundCue};
use super::geometric_utils;
use super::health::Health;
use super::locatable::Locatable;
use super::params::GameConfig;
use super::world::WorldView;

/// The player-controlled organism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pos: Array1<f32>,
    heading: f32,
    /// Draw depth.
    pub depth: i32,
    alive: bool,
    /// Hit points.
    pub health: Health,
    spray_charges: u32,
    flame_charges: u32,
}

impl Player {
    /// Creates a player on the left edge of the ring, facing the centre.
    pub fn new(config: &GameConfig) -> Self {
        let (cx, cy) = config.center();
        Self {
            pos: geometric_utils::point(cx - config.view_radius, cy),
            heading: 0.0,
            depth: ACTOR_DEPTH,
            alive: true,
            health: Health::new(config.player_health),
            spray_charges: config.max_spray_charges,
            flame_charges: config.starting_flame_charges,
        }
    }

    /// Whether the player is alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Current hit points.
    pub fn health(&self) -> i32 {
        self.health.points()
    }

    /// Spray charges available.
    pub fn spray_charges(&self) -> u32 {
        self.spray_charges
    }

    /// Flame charges available.
    pub fn flame_charges(&self) -> u32 {
        self.flame_charges
    }

    /// Sets the spray charge count.
    pub fn set_spray_charges(&mut self, charges: u32) {
        self.spray_charges = charges;
    }

    /// Sets the flame charge count.
    pub fn set_flame_charges(&mut self, charges: u32) {
        self.flame_charges = charges;
    }

    /// Adds flame charges from a pickup.
    pub fn add_flame_charges(&mut self, charges: u32) {
        self.flame_charges += charges;
    }

    /// Restores health to `points`.
    pub fn restore_health(&mut self, points: i32) {
        self.health.restore(points);
    }

    /// Loses health, playing the hurt cue only if the player survives.
    ///
    /// Death itself is noticed at the start of the player's next update.
    pub fn take_damage(&mut self, amount: i32, cues: &mut EventQueue) {
        if self.health.take_damage(amount) {
            cues.push(SoundCue::PlayerHurt);
        }
    }

    /// Travels `delta` degrees along the ring (positive is counter-clockwise).
    ///
    /// The angular position is recomputed from the current coordinates, so
    /// the player snaps back onto the ring regardless of prior drift.
    pub fn rotate(&mut self, delta: f32, config: &GameConfig) {
        let (cx, cy) = config.center();
        let theta = (self.pos[1] - cy).atan2(self.pos[0] - cx) + delta.to_radians();
        self.pos = geometric_utils::point(
            cx + config.view_radius * theta.cos(),
            cy + config.view_radius * theta.sin(),
        );
        self.set_heading(theta.to_degrees() + 180.0);
    }

    /// Handles death, then at most one pending key, then spray regeneration.
    pub fn update(&mut self, view: &mut WorldView<'_>) {
        if !self.alive {
            return;
        }
        if self.health.is_depleted() {
            info!("player died");
            view.play_sound(SoundCue::PlayerDie);
            self.alive = false;
            return;
        }

        if let Some(key) = view.pop_key() {
            self.handle_key(key, view);
            return;
        }

        if self.spray_charges < view.config().max_spray_charges {
            self.spray_charges += 1;
        }
    }

    fn handle_key(&mut self, key: Key, view: &mut WorldView<'_>) {
        let config = view.config();
        match key {
            Key::Left => self.rotate(config.player_rotation_step, config),
            Key::Right => self.rotate(-config.player_rotation_step, config),
            Key::Space => {
                if self.spray_charges == 0 {
                    return;
                }
                view.play_sound(SoundCue::PlayerSpray);
                let pos = self.position_ahead(config.sprite_width);
                view.spawn(Entity::spray(config, pos, self.heading));
                self.spray_charges -= 1;
            }
            Key::Enter => {
                if self.flame_charges == 0 {
                    return;
                }
                view.play_sound(SoundCue::PlayerFire);
                for heading in flame_burst_headings(self.heading, config.flames_per_burst) {
                    let pos =
                        geometric_utils::position_ahead(&self.pos, heading, config.sprite_width);
                    view.spawn(Entity::flame(config, pos, heading));
                }
                self.flame_charges -= 1;
                debug!("flame burst, {} charges left", self.flame_charges);
            }
        }
    }
}

/// Headings of a radial burst of `count` flames starting at `heading`,
/// evenly spaced and normalised to `[0, 360)`.
pub fn flame_burst_headings(heading: f32, count: u32) -> Vec<f32> {
    let spacing = 360.0 / count as f32;
    (0..count)
        .map(|i| geometric_utils::normalize_degrees(heading + i as f32 * spacing))
        .collect()
}

impl Locatable for Player {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn set_heading(&mut self, degrees: f32) {
        self.heading = geometric_utils::normalize_degrees(degrees);
    }
}
