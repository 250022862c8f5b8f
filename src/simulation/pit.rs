//! Stationary bacteria spawner.

use log::debug;
use serde::{Deserialize, Serialize};

use super::bacterium::Strain;
use super::entity::Body;
use super::params::GameConfig;
use super::world::WorldView;

/// A pit holding three independent spawn pools.
///
/// The pit dies once every pool is empty and blocks level completion until
/// then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pit {
    /// Regular salmonella left to spawn.
    pub regular_salmonella: u32,
    /// Aggressive salmonella left to spawn.
    pub aggressive_salmonella: u32,
    /// E. coli left to spawn.
    pub ecoli: u32,
}

impl Pit {
    /// Creates a pit with the configured pool sizes.
    pub fn new(config: &GameConfig) -> Self {
        Self::with_pools(
            config.pit_regular_salmonella,
            config.pit_aggressive_salmonella,
            config.pit_ecoli,
        )
    }

    /// Creates a pit with explicit pool sizes.
    pub fn with_pools(regular_salmonella: u32, aggressive_salmonella: u32, ecoli: u32) -> Self {
        Self {
            regular_salmonella,
            aggressive_salmonella,
            ecoli,
        }
    }

    /// Whether every pool is empty.
    pub fn is_exhausted(&self) -> bool {
        self.regular_salmonella == 0 && self.aggressive_salmonella == 0 && self.ecoli == 0
    }

    /// Bacteria still to be spawned across all pools.
    pub fn remaining(&self) -> u32 {
        self.regular_salmonella + self.aggressive_salmonella + self.ecoli
    }

    fn pool_mut(&mut self, strain: Strain) -> &mut u32 {
        match strain {
            Strain::RegularSalmonella => &mut self.regular_salmonella,
            Strain::AggressiveSalmonella => &mut self.aggressive_salmonella,
            Strain::Ecoli => &mut self.ecoli,
        }
    }

    /// Dies when exhausted; otherwise occasionally releases one bacterium.
    pub fn update(&mut self, body: &mut Body, view: &mut WorldView<'_>) {
        if self.is_exhausted() {
            debug!("pit at ({:.1}, {:.1}) exhausted", body.pos[0], body.pos[1]);
            body.kill();
            return;
        }

        if !view.one_in(view.config().pit_spawn_chance) {
            return;
        }

        // At least one pool is non-empty, so re-rolling terminates.
        loop {
            let strain = Strain::from_index(view.rand_int(0, 2));
            let pool = self.pool_mut(strain);
            if *pool > 0 {
                *pool -= 1;
                view.spawn_bacterium(strain, body.pos.clone());
                return;
            }
        }
    }
}
