//! # Kontagion - Petri-Dish Arena Simulation Core
//!
//! The per-tick simulation of a top-down arena survival game. A player
//! organism circles the rim of a petri dish and defends it against bacteria
//! released by pits, using sprays and flame bursts, while timed goodies
//! appear on the rim.
//!
//! ## Features
//!
//! - Single entity record with a tagged species variant and capability flags
//! - Deterministic, seedable world tick with staged spawns and reaping
//! - Bacteria with move plans, feeding, division and player hunting
//! - Projectiles, pits and timed goodies
//! - Sound cues and status line exposed to an external frontend
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - Tick loop, spatial queries, level bookkeeping
//! - [`simulation::entity`] - Entity record and capability dispatch
//! - [`simulation::bacterium`] - Bacterial behaviour
//! - [`simulation::player`] - Player movement and weapons
//! - [`simulation::params`] - Game configuration

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bacteria: feeding, division and movement strategies.
    pub mod bacterium;
    /// Entity record, species variants and capability flags.
    pub mod entity;
    /// Sound cues and input keys exchanged with the frontend.
    pub mod events;
    /// Geometric utility functions for distances and headings.
    pub mod geometric_utils;
    /// Timed pickups.
    pub mod goodie;
    /// Health shared by the player and bacteria.
    pub mod health;
    /// Trait for positioned, oriented entities.
    ///
    /// The [`locatable::Locatable`] trait is implemented by everything that has
    /// a position and a heading (entity bodies, entities, the player).
    pub mod locatable;
    /// Game configuration.
    pub mod params;
    /// Bacteria spawners.
    pub mod pit;
    /// The player organism.
    pub mod player;
    /// Sprays and flames.
    pub mod projectile;
    /// Spatial index over edible entities.
    pub mod spatial;
    /// The world and its tick loop.
    pub mod world;
}
