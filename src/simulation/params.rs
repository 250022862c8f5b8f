//! Game configuration.
//!
//! Every tunable of the arena lives here so tests and the frontend can build
//! worlds with different geometry, spawn rates or weapon stats. The defaults
//! reproduce the classic petri-dish layout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for a [`GameConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its meaningful range.
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Simulation parameters that control arena geometry and entity behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Arena width in world units.
    pub view_width: f32,
    /// Arena height in world units.
    pub view_height: f32,
    /// Radius of the circular dish; also the player's ring radius.
    pub view_radius: f32,
    /// Sprite width, used as the overlap radius for most interactions.
    pub sprite_width: f32,
    /// Maximum radius from the centre used for initial placement.
    pub placement_radius: i32,
    /// Upper bound on placement samples before falling back.
    pub placement_attempts: usize,
    /// Seed for the world's random source (`None` seeds from entropy).
    pub rng_seed: Option<u64>,
    /// Lives at the start of a game.
    pub starting_lives: u32,

    /// Player starting and maximum health.
    pub player_health: i32,
    /// Degrees the player travels around the ring per key press.
    pub player_rotation_step: f32,
    /// Spray charges at spawn and regeneration cap.
    pub max_spray_charges: u32,
    /// Flame charges at spawn.
    pub starting_flame_charges: u32,
    /// Flame charges granted by a flamethrower goodie.
    pub flame_charges_per_pickup: u32,
    /// Number of flames in one radial burst.
    pub flames_per_burst: u32,

    /// Maximum travel distance of a spray.
    pub spray_range: f32,
    /// Damage dealt by a spray.
    pub spray_damage: i32,
    /// Maximum travel distance of a flame.
    pub flame_range: f32,
    /// Damage dealt by a flame.
    pub flame_damage: i32,

    /// Initial regular salmonella pool of a pit.
    pub pit_regular_salmonella: u32,
    /// Initial aggressive salmonella pool of a pit.
    pub pit_aggressive_salmonella: u32,
    /// Initial E. coli pool of a pit.
    pub pit_ecoli: u32,
    /// A pit spawns with probability `1 / pit_spawn_chance` per tick.
    pub pit_spawn_chance: i32,

    /// Score awarded when a bacterium dies.
    pub bacterium_kill_score: i32,
    /// Food eaten before a bacterium divides.
    pub food_to_multiply: u32,
    /// Steps in a freshly picked move plan.
    pub move_plan_steps: u32,
    /// Distance covered by one salmonella step.
    pub salmonella_step: f32,
    /// Radius within which salmonella look for food.
    pub food_search_radius: f32,
    /// Radius within which aggressive salmonella chase the player.
    pub aggressive_detection_radius: f32,
    /// Radius within which E. coli chase the player.
    pub ecoli_detection_radius: f32,
    /// Distance covered by one E. coli step.
    pub ecoli_step: f32,
    /// Heading retries an E. coli makes when blocked.
    pub ecoli_retry_attempts: u32,
    /// Degrees added to the heading on each E. coli retry.
    pub ecoli_retry_rotation: f32,

    /// Lower bound of a goodie lifetime in ticks.
    pub goodie_min_lifetime: i32,
    /// Base of the goodie lifetime ceiling before level scaling.
    pub goodie_lifetime_base: i32,
    /// Score for a health goodie.
    pub health_goodie_score: i32,
    /// Score for a flamethrower goodie.
    pub flame_goodie_score: i32,
    /// Score for an extra life goodie.
    pub extra_life_goodie_score: i32,
    /// Score for touching fungus (negative).
    pub fungus_score: i32,
    /// Damage fungus deals to the player.
    pub fungus_damage: i32,
    /// Base of the per-tick fungus and goodie roll denominators.
    pub goodie_roll_base: i32,
    /// Floor of the per-tick fungus roll denominator.
    pub fungus_roll_floor: i32,
    /// Floor of the per-tick goodie roll denominator.
    pub goodie_roll_floor: i32,

    /// Cap on food placed at level start.
    pub max_initial_food: u32,
    /// Floor on dirt piles placed at level start.
    pub min_dirt_piles: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            view_width: 256.0,
            view_height: 256.0,
            view_radius: 128.0,
            sprite_width: 8.0,
            placement_radius: 120,
            placement_attempts: 10_000,
            rng_seed: None,
            starting_lives: 3,

            player_health: 100,
            player_rotation_step: 5.0,
            max_spray_charges: 20,
            starting_flame_charges: 5,
            flame_charges_per_pickup: 5,
            flames_per_burst: 16,

            spray_range: 112.0,
            spray_damage: 2,
            flame_range: 32.0,
            flame_damage: 5,

            pit_regular_salmonella: 5,
            pit_aggressive_salmonella: 3,
            pit_ecoli: 2,
            pit_spawn_chance: 50,

            bacterium_kill_score: 100,
            food_to_multiply: 3,
            move_plan_steps: 10,
            salmonella_step: 3.0,
            food_search_radius: 128.0,
            aggressive_detection_radius: 72.0,
            ecoli_detection_radius: 256.0,
            ecoli_step: 2.0,
            ecoli_retry_attempts: 10,
            ecoli_retry_rotation: 10.0,

            goodie_min_lifetime: 50,
            goodie_lifetime_base: 300,
            health_goodie_score: 250,
            flame_goodie_score: 300,
            extra_life_goodie_score: 500,
            fungus_score: -50,
            fungus_damage: 20,
            goodie_roll_base: 510,
            fungus_roll_floor: 200,
            goodie_roll_floor: 250,

            max_initial_food: 25,
            min_dirt_piles: 20,
        }
    }
}

impl GameConfig {
    /// Centre of the arena as `(x, y)`.
    pub fn center(&self) -> (f32, f32) {
        (self.view_width / 2.0, self.view_height / 2.0)
    }

    /// Number of pits placed at the start of `level`.
    pub fn pits_for_level(&self, level: u32) -> u32 {
        level
    }

    /// Number of food items placed at the start of `level`.
    pub fn food_for_level(&self, level: u32) -> u32 {
        (5 * level).min(self.max_initial_food)
    }

    /// Number of dirt piles placed at the start of `level`.
    pub fn dirt_for_level(&self, level: u32) -> u32 {
        (180_i64 - 20 * i64::from(level)).max(i64::from(self.min_dirt_piles)) as u32
    }

    /// Upper bound of the goodie lifetime roll for `level`.
    pub fn goodie_lifetime_ceiling(&self, level: u32) -> i32 {
        self.goodie_lifetime_base - 10 * level as i32 - 1
    }

    /// Denominator of the per-tick fungus roll for `level`.
    pub fn fungus_chance(&self, level: u32) -> i32 {
        (self.goodie_roll_base - level as i32 * 10).max(self.fungus_roll_floor)
    }

    /// Denominator of the per-tick goodie roll for `level`.
    pub fn goodie_chance(&self, level: u32) -> i32 {
        (self.goodie_roll_base - level as i32 * 10).max(self.goodie_roll_floor)
    }

    /// Checks that the configuration describes a playable arena.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sprite_width <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "sprite_width",
                reason: "must be positive",
            });
        }
        if self.view_radius <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "view_radius",
                reason: "must be positive",
            });
        }
        if self.pit_spawn_chance < 1 {
            return Err(ConfigError::Invalid {
                field: "pit_spawn_chance",
                reason: "must be at least 1",
            });
        }
        if self.flames_per_burst == 0 {
            return Err(ConfigError::Invalid {
                field: "flames_per_burst",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
