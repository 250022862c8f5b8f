//! Trait for anything that occupies a spot in the arena.
//!
//! Both pooled entities and the player implement it, so overlap tests and
//! bearings work uniformly across the two storage slots of the world.

use ndarray::Array1;

use super::geometric_utils;

/// Trait for entities with a position and a facing direction.
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's position.
    fn pos_mut(&mut self) -> &mut Array1<f32>;

    /// Heading in degrees, `[0, 360)`.
    fn heading(&self) -> f32;

    /// Sets the heading, normalising it to `[0, 360)`.
    fn set_heading(&mut self, degrees: f32);

    /// Whether the point `(x, y)` lies within `radius` of this entity.
    ///
    /// Used for pickups, feeding, damage and placement alike.
    fn overlaps(&self, x: f32, y: f32, radius: f32) -> bool {
        geometric_utils::distance(self.pos(), &geometric_utils::point(x, y)) <= radius
    }

    /// Moves the entity `units` along `heading` without any collision checks.
    fn move_along(&mut self, heading: f32, units: f32) {
        let next = geometric_utils::position_ahead(self.pos(), heading, units);
        *self.pos_mut() = next;
    }

    /// Position `units` ahead along the current heading.
    fn position_ahead(&self, units: f32) -> Array1<f32> {
        geometric_utils::position_ahead(self.pos(), self.heading(), units)
    }
}
