//! The entity record shared by everything stored in the world's collection.
//!
//! Every non-player object in the arena is an [`Entity`]: a [`Body`] (position,
//! heading, draw depth, alive flag) plus an [`EntityKind`] tag carrying the
//! species state. Behavioural differences are expressed through the kind's
//! [`Capabilities`] table and a single `match` in [`Entity::update`].

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::bacterium::{Bacterium, Strain};
use super::events::EventQueue;
use super::geometric_utils;
use super::goodie::{Goodie, GoodieKind};
use super::locatable::Locatable;
use super::params::GameConfig;
use super::pit::Pit;
use super::projectile::Projectile;
use super::world::WorldView;

/// Draw layer for actors that move on their own (player, bacteria).
pub const ACTOR_DEPTH: i32 = 0;
/// Draw layer for everything else.
pub const PROP_DEPTH: i32 = 1;

/// Spatial state every entity carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Position in the arena.
    pub pos: Array1<f32>,
    heading: f32,
    /// Draw depth; lower values are drawn on top.
    pub depth: i32,
    alive: bool,
}

impl Body {
    /// Creates a living body.
    pub fn new(pos: Array1<f32>, heading: f32, depth: i32) -> Self {
        Self {
            pos,
            heading: geometric_utils::normalize_degrees(heading),
            depth,
            alive: true,
        }
    }

    /// Whether the body is still alive.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Marks the body dead; it is reaped at the end of the tick.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

impl Locatable for Body {
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

/// Capability flags queried by the world when mediating interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Other entities may be placed on top of this one.
    pub can_overlap_others: bool,
    /// Projectiles can hit it.
    pub damageable: bool,
    /// Moving entities cannot step onto it.
    pub blocks_movement: bool,
    /// Bacteria can eat it.
    pub edible: bool,
    /// The level cannot finish while it is alive.
    pub blocks_level_completion: bool,
}

impl Default for Capabilities {
    /// A passive, damageable, non-blocking, non-edible entity.
    fn default() -> Self {
        Self {
            can_overlap_others: false,
            damageable: true,
            blocks_movement: false,
            edible: false,
            blocks_level_completion: false,
        }
    }
}

/// Species-specific state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Obstacle that blocks movement; dirt may pile on dirt.
    DirtPile,
    /// Edible by bacteria.
    Food,
    /// Bacteria spawner.
    Pit(Pit),
    /// Spray or flame travelling in a straight line.
    Projectile(Projectile),
    /// Timed pickup.
    Goodie(Goodie),
    /// Autonomous bacterium.
    Bacterium(Bacterium),
}

impl EntityKind {
    /// Capability table for this kind.
    pub fn capabilities(&self) -> Capabilities {
        let base = Capabilities::default();
        match self {
            Self::DirtPile => Capabilities {
                can_overlap_others: true,
                blocks_movement: true,
                ..base
            },
            Self::Food => Capabilities {
                damageable: false,
                edible: true,
                ..base
            },
            Self::Pit(_) => Capabilities {
                damageable: false,
                blocks_level_completion: true,
                ..base
            },
            Self::Projectile(_) => Capabilities {
                damageable: false,
                ..base
            },
            Self::Goodie(_) => base,
            Self::Bacterium(_) => Capabilities {
                blocks_level_completion: true,
                ..base
            },
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DirtPile => "dirt pile",
            Self::Food => "food",
            Self::Pit(_) => "pit",
            Self::Projectile(p) => p.kind.label(),
            Self::Goodie(g) => g.kind.label(),
            Self::Bacterium(b) => b.strain.label(),
        }
    }
}

/// A simulated object owned by the world's collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Identifier assigned by the world on spawn (0 before that).
    pub id: u64,
    /// Position, heading, depth and alive flag.
    pub body: Body,
    /// Species state.
    pub kind: EntityKind,
}

impl Entity {
    /// Creates an entity of `kind` at `pos`.
    pub fn new(kind: EntityKind, pos: Array1<f32>, heading: f32) -> Self {
        let depth = match kind {
            EntityKind::Bacterium(_) => ACTOR_DEPTH,
            _ => PROP_DEPTH,
        };
        Self {
            id: 0,
            body: Body::new(pos, heading, depth),
            kind,
        }
    }

    /// A dirt pile obstacle.
    pub fn dirt_pile(pos: Array1<f32>) -> Self {
        Self::new(EntityKind::DirtPile, pos, 0.0)
    }

    /// A food item.
    pub fn food(pos: Array1<f32>) -> Self {
        Self::new(EntityKind::Food, pos, 90.0)
    }

    /// A pit with full spawn pools.
    pub fn pit(config: &GameConfig, pos: Array1<f32>) -> Self {
        Self::new(EntityKind::Pit(Pit::new(config)), pos, 0.0)
    }

    /// A spray travelling along `heading`.
    pub fn spray(config: &GameConfig, pos: Array1<f32>, heading: f32) -> Self {
        Self::new(
            EntityKind::Projectile(Projectile::spray(config)),
            pos,
            heading,
        )
    }

    /// A flame travelling along `heading`.
    pub fn flame(config: &GameConfig, pos: Array1<f32>, heading: f32) -> Self {
        Self::new(
            EntityKind::Projectile(Projectile::flame(config)),
            pos,
            heading,
        )
    }

    /// A goodie that expires after `lifetime` ticks.
    pub fn goodie(kind: GoodieKind, lifetime: i32, pos: Array1<f32>) -> Self {
        Self::new(EntityKind::Goodie(Goodie::new(kind, lifetime)), pos, 0.0)
    }

    /// A freshly born bacterium of `strain`.
    pub fn bacterium(strain: Strain, pos: Array1<f32>) -> Self {
        Self::new(
            EntityKind::Bacterium(Bacterium::new(strain)),
            pos,
            90.0,
        )
    }

    /// Whether the entity is alive.
    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    /// Marks the entity dead.
    pub fn kill(&mut self) {
        self.body.kill();
    }

    /// Capability table of this entity.
    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    /// Other entities may be placed on top of this one.
    pub fn can_overlap_others(&self) -> bool {
        self.capabilities().can_overlap_others
    }

    /// Projectiles can hit it.
    pub fn is_damageable(&self) -> bool {
        self.capabilities().damageable
    }

    /// Moving entities cannot step onto it.
    pub fn blocks_movement(&self) -> bool {
        self.capabilities().blocks_movement
    }

    /// Bacteria can eat it.
    pub fn is_edible(&self) -> bool {
        self.capabilities().edible
    }

    /// The level cannot finish while it is alive.
    pub fn blocks_level_completion(&self) -> bool {
        self.capabilities().blocks_level_completion
    }

    /// Bacterium state, if this entity is one.
    pub fn as_bacterium(&self) -> Option<&Bacterium> {
        match &self.kind {
            EntityKind::Bacterium(b) => Some(b),
            _ => None,
        }
    }

    /// Mutable bacterium state, if this entity is one.
    pub fn as_bacterium_mut(&mut self) -> Option<&mut Bacterium> {
        match &mut self.kind {
            EntityKind::Bacterium(b) => Some(b),
            _ => None,
        }
    }

    /// Applies `amount` damage.
    ///
    /// Entities without health die outright; bacteria lose health and play
    /// their hurt cue if they survive.
    pub fn take_damage(&mut self, amount: i32, cues: &mut EventQueue) {
        match &mut self.kind {
            EntityKind::Bacterium(bacterium) => bacterium.take_damage(amount, cues),
            _ => self.body.kill(),
        }
    }

    /// Runs one tick of behaviour. A dead entity does nothing.
    pub fn update(&mut self, view: &mut WorldView<'_>) {
        if !self.body.is_alive() {
            return;
        }
        let Self { body, kind, .. } = self;
        match kind {
            EntityKind::DirtPile | EntityKind::Food => {}
            EntityKind::Pit(pit) => pit.update(body, view),
            EntityKind::Projectile(projectile) => projectile.update(body, view),
            EntityKind::Goodie(goodie) => goodie.update(body, view),
            EntityKind::Bacterium(bacterium) => bacterium.update(body, view),
        }
    }
}

impl Locatable for Entity {
    fn pos(&self) -> &Array1<f32> {
        &self.body.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.body.pos
    }

    fn heading(&self) -> f32 {
        self.body.heading()
    }

    fn set_heading(&mut self, degrees: f32) {
        self.body.set_heading(degrees);
    }
}
