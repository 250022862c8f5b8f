//! Bacteria: autonomous health entities that feed, divide and hunt the player.
//!
//! All strains share one update template:
//!
//! 1. die (with score, cue and a possible food drop) once health is depleted
//! 2. give the strain a pre-emptive action (aggressive salmonella chase the
//!    player when close)
//! 3. hurt the player when touching it, which ends the tick
//! 4. divide after eating enough, otherwise eat overlapping food
//! 5. run the strain's own movement unless step 2 already moved
//!
//! Salmonella wander using a move plan and drift towards food. E. coli home
//! in on the player, rotating around obstacles.

use log::debug;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::entity::Body;
use super::events::{EventQueue, SoundCue};
use super::geometric_utils;
use super::health::Health;
use super::locatable::Locatable;
use super::world::WorldView;

/// Bacterial species and variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strain {
    /// Wandering salmonella.
    RegularSalmonella,
    /// Salmonella that charges the player at close range.
    AggressiveSalmonella,
    /// Resistant strain that always seeks the player.
    Ecoli,
}

impl Strain {
    /// All strains in pit roll order.
    pub const ALL: [Self; 3] = [
        Self::RegularSalmonella,
        Self::AggressiveSalmonella,
        Self::Ecoli,
    ];

    /// Maps a `0..=2` roll onto a strain.
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Self::RegularSalmonella,
            1 => Self::AggressiveSalmonella,
            _ => Self::Ecoli,
        }
    }

    /// Hit points at birth.
    pub fn starting_health(self) -> i32 {
        match self {
            Self::RegularSalmonella => 4,
            Self::AggressiveSalmonella => 10,
            Self::Ecoli => 5,
        }
    }

    /// Damage dealt to the player per touching tick.
    pub fn damage(self) -> i32 {
        match self {
            Self::RegularSalmonella => 1,
            Self::AggressiveSalmonella => 2,
            Self::Ecoli => 4,
        }
    }

    /// Cue played when hurt but alive.
    pub fn hurt_cue(self) -> SoundCue {
        match self {
            Self::Ecoli => SoundCue::EcoliHurt,
            _ => SoundCue::SalmonellaHurt,
        }
    }

    /// Cue played on death.
    pub fn die_cue(self) -> SoundCue {
        match self {
            Self::Ecoli => SoundCue::EcoliDie,
            _ => SoundCue::SalmonellaDie,
        }
    }

    /// Short label used in logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::RegularSalmonella => "salmonella",
            Self::AggressiveSalmonella => "aggressive salmonella",
            Self::Ecoli => "e. coli",
        }
    }
}

/// Per-bacterium state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bacterium {
    /// Species and variant; offspring inherit it unchanged.
    pub strain: Strain,
    /// Hit points.
    pub health: Health,
    /// Steps left on the current heading.
    pub move_plan: u32,
    /// Food eaten since the last division.
    pub food_eaten: u32,
}

impl Bacterium {
    /// A newborn bacterium with no move plan and an empty stomach.
    pub fn new(strain: Strain) -> Self {
        Self {
            strain,
            health: Health::new(strain.starting_health()),
            move_plan: 0,
            food_eaten: 0,
        }
    }

    /// Loses health, playing the hurt cue only if the bacterium survives.
    pub fn take_damage(&mut self, amount: i32, cues: &mut EventQueue) {
        if self.health.take_damage(amount) {
            cues.push(self.strain.hurt_cue());
        }
    }

    /// Runs one tick of the shared bacterium template.
    pub fn update(&mut self, body: &mut Body, view: &mut WorldView<'_>) {
        if self.health.is_depleted() {
            self.die(body, view);
            return;
        }

        let preempted = self.preemptive_action(body, view);

        let reach = view.config().sprite_width;
        if view.player_overlaps(&body.pos, reach) {
            view.damage_player(self.strain.damage());
            return;
        }

        if self.food_eaten >= view.config().food_to_multiply {
            self.multiply(body, view);
            self.food_eaten = 0;
        } else if let Some(food) = view.first_edible_overlapping(&body.pos) {
            food.kill();
            self.food_eaten += 1;
        }

        if !preempted {
            match self.strain {
                Strain::RegularSalmonella | Strain::AggressiveSalmonella => {
                    self.wander(body, view);
                }
                Strain::Ecoli => self.seek_player(body, view),
            }
        }
    }

    fn die(&self, body: &mut Body, view: &mut WorldView<'_>) {
        debug!(
            "{} died at ({:.1}, {:.1})",
            self.strain.label(),
            body.pos[0],
            body.pos[1]
        );
        view.increase_score(view.config().bacterium_kill_score);
        view.play_sound(self.strain.die_cue());
        body.kill();
        if view.rand_int(0, 1) == 0 {
            view.spawn_food(body.pos.clone());
        }
    }

    /// Aggressive salmonella close to the player step towards it instead of
    /// following their plan.
    ///
    /// # Returns
    ///
    /// `true` if this tick's movement was consumed.
    fn preemptive_action(&self, body: &mut Body, view: &mut WorldView<'_>) -> bool {
        if self.strain != Strain::AggressiveSalmonella {
            return false;
        }
        let radius = view.config().aggressive_detection_radius;
        let Some(bearing) = view.find_player_bearing_within(&body.pos, radius) else {
            return false;
        };
        body.set_heading(bearing);
        let step = view.config().salmonella_step;
        try_step(body, view, step);
        true
    }

    fn multiply(&self, body: &Body, view: &mut WorldView<'_>) {
        let (cx, cy) = view.config().center();
        let nudge = view.config().sprite_width / 2.0;
        let pos = geometric_utils::point(
            geometric_utils::nudge_towards(body.pos[0], cx, nudge),
            geometric_utils::nudge_towards(body.pos[1], cy, nudge),
        );
        debug!("{} divided", self.strain.label());
        view.spawn_bacterium(self.strain, pos);
    }

    fn wander(&mut self, body: &mut Body, view: &mut WorldView<'_>) {
        let step = view.config().salmonella_step;

        if self.move_plan > 0 {
            self.move_plan -= 1;
            if !try_step(body, view, step) {
                self.new_move_plan(body, view);
            }
            return;
        }

        let radius = view.config().food_search_radius;
        match view.find_nearest_edible_within(&body.pos, radius) {
            Some(bearing) => {
                body.set_heading(bearing);
                if !try_step(body, view, step) {
                    self.new_move_plan(body, view);
                }
            }
            None => self.new_move_plan(body, view),
        }
    }

    fn new_move_plan(&mut self, body: &mut Body, view: &mut WorldView<'_>) {
        body.set_heading(view.rand_int(0, 359) as f32);
        self.move_plan = view.config().move_plan_steps;
    }

    fn seek_player(&self, body: &mut Body, view: &mut WorldView<'_>) {
        let radius = view.config().ecoli_detection_radius;
        let Some(bearing) = view.find_player_bearing_within(&body.pos, radius) else {
            return;
        };
        body.set_heading(bearing);

        let step = view.config().ecoli_step;
        let rotation = view.config().ecoli_retry_rotation;
        for _ in 0..view.config().ecoli_retry_attempts {
            if try_step(body, view, step) {
                return;
            }
            body.set_heading(body.heading() + rotation);
        }
    }
}

/// Moves `step` along the body's heading if the destination is free.
fn try_step(body: &mut Body, view: &WorldView<'_>, step: f32) -> bool {
    let next: Array1<f32> = body.position_ahead(step);
    if view.can_step_to(&next) {
        body.pos = next;
        true
    } else {
        false
    }
}
