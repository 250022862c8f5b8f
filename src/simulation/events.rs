//! Sound cues and input keys exchanged with the frontend.
//!
//! The simulation never plays audio or polls the keyboard itself. Cues are
//! collected in an [`EventQueue`] during a tick and drained by whoever drives
//! the world; key presses are queued on the world and consumed by the player.

use serde::{Deserialize, Serialize};

/// A sound effect requested by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// The player was hurt but survived.
    PlayerHurt,
    /// The player died.
    PlayerDie,
    /// The player fired a spray.
    PlayerSpray,
    /// The player fired a flame burst.
    PlayerFire,
    /// A bacterium was created.
    BacteriumBorn,
    /// A salmonella was hurt but survived.
    SalmonellaHurt,
    /// A salmonella died.
    SalmonellaDie,
    /// An E. coli was hurt but survived.
    EcoliHurt,
    /// An E. coli died.
    EcoliDie,
    /// The player collected a goodie.
    GotGoodie,
    /// The level was completed.
    FinishedLevel,
}

/// Directional input the player reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Move counter-clockwise around the ring.
    Left,
    /// Move clockwise around the ring.
    Right,
    /// Fire one spray.
    Space,
    /// Fire a radial flame burst.
    Enter,
}

/// Queue for collecting sound cues emitted during a tick.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<SoundCue>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds a cue to the queue.
    pub fn push(&mut self, cue: SoundCue) {
        self.events.push(cue);
    }

    /// Cues queued so far, oldest first.
    pub fn pending(&self) -> &[SoundCue] {
        &self.events
    }

    /// Drains all cues from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SoundCue> {
        self.events.drain(..)
    }
}
