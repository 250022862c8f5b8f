//! Health shared by the player and bacteria.

use serde::{Deserialize, Serialize};

/// Integer hit points.
///
/// Damage only subtracts; death is not decided here. The owner notices
/// `is_depleted` at the start of its next update and runs its death path
/// then, so a lethal hit never plays a hurt cue and the die cue follows one
/// tick later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: i32,
}

impl Health {
    /// Creates a health pool with `points` hit points.
    pub fn new(points: i32) -> Self {
        Self { current: points }
    }

    /// Current hit points (may be negative after a lethal hit).
    pub fn points(self) -> i32 {
        self.current
    }

    /// Subtracts `amount` and reports whether the owner survived the hit.
    ///
    /// # Returns
    ///
    /// `true` if health is still above zero, in which case the owner plays
    /// its hurt cue.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.current -= amount;
        self.current > 0
    }

    /// Whether the owner should die on its next update.
    pub fn is_depleted(self) -> bool {
        self.current <= 0
    }

    /// Resets hit points to `points`.
    pub fn restore(&mut self, points: i32) {
        self.current = points;
    }
}
