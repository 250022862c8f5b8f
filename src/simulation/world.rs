//! The arena: owns every entity and the player and advances them one tick at a time.
//!
//! A tick runs in a fixed order:
//!
//! 1. every entity alive at tick start is updated in collection order
//! 2. dead entities are reaped and entities spawned during the pass are
//!    appended (they are first updated on the next tick)
//! 3. the level finishes if nothing blocking completion is left
//! 4. the player is updated; its death ends the attempt and costs a life
//! 5. goodies may appear on the rim, and the status line is refreshed
//!
//! Entities never reference each other. During its update an entity gets a
//! [`WorldView`]: mutable access to every *other* entity, the player and the
//! world's bookkeeping, through which all damage, feeding, spawning and
//! targeting is mediated.

use std::collections::VecDeque;
use std::fmt;

use log::{debug, info, warn};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::bacterium::Strain;
use super::entity::{Entity, EntityKind};
use super::events::{EventQueue, Key, SoundCue};
use super::geometric_utils;
use super::goodie::GoodieKind;
use super::locatable::Locatable;
use super::params::GameConfig;
use super::player::Player;
use super::spatial::SpatialIndex;

/// Score and lives, carried across levels and retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Accumulated score (may go negative).
    pub score: i32,
    /// Remaining lives.
    pub lives: u32,
}

impl Scoreboard {
    /// A fresh scoreboard with the configured number of lives.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            lives: config.starting_lives,
        }
    }
}

/// Result of advancing the world by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The level goes on.
    Continue,
    /// The player died this tick; a life was taken.
    PlayerDied,
    /// No pit or bacterium is left.
    LevelFinished,
}

/// Values shown on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    /// Current score.
    pub score: i32,
    /// Current level.
    pub level: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Player health.
    pub health: i32,
    /// Spray charges.
    pub sprays: u32,
    /// Flame charges.
    pub flames: u32,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score: {:06}  Level: {}  Lives: {}  Health: {}  Sprays: {}  Flames: {}",
            self.score, self.level, self.lives, self.health, self.sprays, self.flames
        )
    }
}

/// Mutable bookkeeping shared between the world and the view it lends out.
struct Ledger {
    rng: StdRng,
    staged: Vec<Entity>,
    cues: EventQueue,
    keys: VecDeque<Key>,
    scoreboard: Scoreboard,
    next_id: u64,
}

impl Ledger {
    fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn assign_id(&mut self, entity: &mut Entity) {
        self.next_id += 1;
        entity.id = self.next_id;
        if let EntityKind::Bacterium(bacterium) = &entity.kind {
            self.cues.push(SoundCue::BacteriumBorn);
            debug!(
                "{} born at ({:.1}, {:.1})",
                bacterium.strain.label(),
                entity.body.pos[0],
                entity.body.pos[1]
            );
        }
    }
}

/// The simulation arena.
pub struct World {
    config: GameConfig,
    level: u32,
    entities: Vec<Entity>,
    player: Option<Player>,
    ledger: Ledger,
    edibles: SpatialIndex,
    status_text: String,
    ticks: u64,
}

impl World {
    /// Creates an empty arena for `level` with a fresh scoreboard.
    ///
    /// No player or entities are placed; see [`World::init_level`].
    pub fn new(config: GameConfig, level: u32) -> Self {
        let scoreboard = Scoreboard::new(&config);
        Self::with_scoreboard(config, level, scoreboard)
    }

    /// Creates an empty arena for `level` continuing an existing scoreboard.
    pub fn with_scoreboard(config: GameConfig, level: u32, scoreboard: Scoreboard) -> Self {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        Self {
            config,
            level,
            entities: Vec::new(),
            player: None,
            ledger: Ledger {
                rng: StdRng::seed_from_u64(seed),
                staged: Vec::new(),
                cues: EventQueue::new(),
                keys: VecDeque::new(),
                scoreboard,
                next_id: 0,
            },
            edibles: SpatialIndex::empty(),
            status_text: String::new(),
            ticks: 0,
        }
    }

    /// Places the player, the level's pits, food and dirt piles.
    ///
    /// Pits and food go first because they may not overlap anything; dirt may
    /// pile on dirt.
    pub fn init_level(&mut self) {
        self.player = Some(Player::new(&self.config));

        for _ in 0..self.config.pits_for_level(self.level) {
            let pos = self.find_unoccupied_spawn_point();
            self.spawn(Entity::pit(&self.config, pos));
        }
        for _ in 0..self.config.food_for_level(self.level) {
            let pos = self.find_unoccupied_spawn_point();
            self.spawn(Entity::food(pos));
        }
        for _ in 0..self.config.dirt_for_level(self.level) {
            let pos = self.find_unoccupied_spawn_point();
            self.spawn(Entity::dirt_pile(pos));
        }
        self.refresh_index();
        self.refresh_status_text();
        info!(
            "level {} ready: {} entities",
            self.level,
            self.entities.len()
        );
    }

    /// Advances the world by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        self.ticks += 1;
        self.refresh_index();

        let count = self.entities.len();
        for idx in 0..count {
            let (before, rest) = self.entities.split_at_mut(idx);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            if !current.is_alive() {
                continue;
            }
            let mut view = WorldView {
                before,
                after,
                player: self.player.as_mut(),
                ledger: &mut self.ledger,
                edibles: &self.edibles,
                config: &self.config,
                level: self.level,
            };
            current.update(&mut view);
        }

        self.reap_and_merge();

        if self.is_level_complete() {
            info!("level {} finished after {} ticks", self.level, self.ticks);
            self.ledger.cues.push(SoundCue::FinishedLevel);
            return TickOutcome::LevelFinished;
        }

        if let Some(mut player) = self.player.take() {
            {
                let mut view = self.view_without_player();
                player.update(&mut view);
            }
            if !player.is_alive() {
                self.ledger.scoreboard.lives = self.ledger.scoreboard.lives.saturating_sub(1);
                info!("lives left: {}", self.ledger.scoreboard.lives);
                self.reap_and_merge();
                return TickOutcome::PlayerDied;
            }
            self.player = Some(player);
        }

        self.generate_goodies();
        self.reap_and_merge();
        self.refresh_status_text();
        TickOutcome::Continue
    }

    /// Adds an entity to the collection immediately.
    ///
    /// Entities created while a tick is running go through
    /// [`WorldView::spawn`] instead and join the collection at the end of the
    /// tick.
    pub fn spawn(&mut self, mut entity: Entity) {
        self.ledger.assign_id(&mut entity);
        self.entities.push(entity);
        self.refresh_index();
    }

    /// Replaces the player.
    pub fn set_player(&mut self, player: Player) {
        self.player = Some(player);
    }

    /// The player, if alive.
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Mutable access to the player, if alive.
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Every entity in collection order (the player is not included).
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access to the collection; the food index is rebuilt on the next query.
    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Game configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current level number.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current score and lives.
    pub fn scoreboard(&self) -> Scoreboard {
        self.ledger.scoreboard
    }

    /// Adds `delta` to the score.
    pub fn increase_score(&mut self, delta: i32) {
        self.ledger.scoreboard.score += delta;
    }

    /// Queues a key press for the player.
    pub fn push_key(&mut self, key: Key) {
        self.ledger.keys.push_back(key);
    }

    /// Key presses not yet consumed by the player.
    pub fn pending_keys(&self) -> usize {
        self.ledger.keys.len()
    }

    /// Queues a sound cue.
    pub fn play_sound(&mut self, cue: SoundCue) {
        self.ledger.cues.push(cue);
    }

    /// Cues emitted and not yet drained.
    pub fn pending_sounds(&self) -> &[SoundCue] {
        self.ledger.cues.pending()
    }

    /// Drains the emitted sound cues, oldest first.
    pub fn drain_sounds(&mut self) -> Vec<SoundCue> {
        self.ledger.cues.drain().collect()
    }

    /// Text of the status line as of the last completed tick.
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Sets the status line text.
    pub fn set_status_text(&mut self, text: String) {
        self.status_text = text;
    }

    /// Values for the status line.
    pub fn status_line(&self) -> StatusLine {
        let (health, sprays, flames) = self.player.as_ref().map_or((0, 0, 0), |p| {
            (p.health(), p.spray_charges(), p.flame_charges())
        });
        StatusLine {
            score: self.ledger.scoreboard.score,
            level: self.level,
            lives: self.ledger.scoreboard.lives,
            health,
            sprays,
            flames,
        }
    }

    /// Uniform random integer in `[min, max]` from the world's seeded source.
    pub fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        self.ledger.rand_int(min, max)
    }

    /// Whether any entity that forbids overlap lies within `radius` of `(x, y)`.
    pub fn overlap_check(&self, x: f32, y: f32, radius: f32) -> bool {
        blocks_placement(self.entities.iter(), x, y, radius)
    }

    /// Samples random points near the centre until one is free of
    /// non-overlappable entities.
    pub fn find_unoccupied_spawn_point(&mut self) -> Array1<f32> {
        self.view_without_player().find_unoccupied_spawn_point()
    }

    /// Damages the first damageable entity overlapping `(x, y)`.
    pub fn apply_damage_at(&mut self, x: f32, y: f32, amount: i32) -> bool {
        self.full_view().apply_damage_at(x, y, amount)
    }

    /// Bearing to the nearest edible entity within `max_distance` of `origin`.
    pub fn find_nearest_edible_within(
        &mut self,
        origin: &Array1<f32>,
        max_distance: f32,
    ) -> Option<f32> {
        self.refresh_index();
        self.full_view()
            .find_nearest_edible_within(origin, max_distance)
    }

    /// Bearing to the player if within `max_distance` of `origin`.
    pub fn find_player_bearing_within(
        &self,
        origin: &Array1<f32>,
        max_distance: f32,
    ) -> Option<f32> {
        player_bearing(self.player.as_ref(), origin, max_distance)
    }

    /// Whether a moving entity may step to `pos`.
    pub fn can_step_to(&self, pos: &Array1<f32>) -> bool {
        step_allowed(&self.config, self.entities.iter(), pos)
    }

    /// Index of the first alive edible entity overlapping `pos`.
    pub fn first_edible_overlapping(&self, pos: &Array1<f32>) -> Option<usize> {
        let reach = self.config.sprite_width;
        self.entities
            .iter()
            .position(|e| e.is_alive() && e.is_edible() && e.overlaps(pos[0], pos[1], reach))
    }

    /// Whether nothing blocking level completion is alive.
    pub fn is_level_complete(&self) -> bool {
        !self
            .entities
            .iter()
            .any(|e| e.is_alive() && e.blocks_level_completion())
    }

    fn full_view(&mut self) -> WorldView<'_> {
        WorldView {
            before: &mut self.entities,
            after: &mut [],
            player: self.player.as_mut(),
            ledger: &mut self.ledger,
            edibles: &self.edibles,
            config: &self.config,
            level: self.level,
        }
    }

    fn view_without_player(&mut self) -> WorldView<'_> {
        WorldView {
            before: &mut self.entities,
            after: &mut [],
            player: None,
            ledger: &mut self.ledger,
            edibles: &self.edibles,
            config: &self.config,
            level: self.level,
        }
    }

    fn refresh_index(&mut self) {
        self.edibles = SpatialIndex::build(&self.entities).unwrap_or_else(|err| {
            warn!("failed to index food: {err:?}");
            SpatialIndex::empty()
        });
    }

    /// Drops dead entities and appends everything spawned since the last merge.
    fn reap_and_merge(&mut self) {
        let before = self.entities.len();
        self.entities.retain(Entity::is_alive);
        let reaped = before - self.entities.len();
        let mut staged = std::mem::take(&mut self.ledger.staged);
        staged.retain(Entity::is_alive);
        if reaped > 0 || !staged.is_empty() {
            debug!("reaped {}, merged {}", reaped, staged.len());
        }
        self.entities.append(&mut staged);
        self.refresh_index();
    }

    /// Occasionally places fungus and beneficial goodies on the rim.
    fn generate_goodies(&mut self) {
        let level = self.level;
        let center = self.config.center();
        let rim = self.config.view_radius;

        if self.ledger.rand_int(0, self.config.fungus_chance(level)) == 0 {
            let angle = self.ledger.rand_int(0, 359) as f32;
            let lifetime = self.roll_goodie_lifetime();
            let pos = geometric_utils::point_on_circle(center, rim, angle);
            self.stage(Entity::goodie(GoodieKind::Fungus, lifetime, pos));
        }

        if self.ledger.rand_int(0, self.config.goodie_chance(level)) == 0 {
            let angle = self.ledger.rand_int(0, 359) as f32;
            let kind = GoodieKind::from_roll(self.ledger.rand_int(0, 9));
            let lifetime = self.roll_goodie_lifetime();
            let pos = geometric_utils::point_on_circle(center, rim, angle);
            self.stage(Entity::goodie(kind, lifetime, pos));
        }
    }

    fn roll_goodie_lifetime(&mut self) -> i32 {
        let ceiling = self.config.goodie_lifetime_ceiling(self.level);
        let roll = self.ledger.rand_int(0, ceiling);
        roll.max(self.config.goodie_min_lifetime)
    }

    fn stage(&mut self, mut entity: Entity) {
        self.ledger.assign_id(&mut entity);
        debug!("{} appeared", entity.kind.label());
        self.ledger.staged.push(entity);
    }

    fn refresh_status_text(&mut self) {
        let text = self.status_line().to_string();
        self.set_status_text(text);
    }
}

/// The query and command surface lent to an entity while it updates.
///
/// The updating entity itself is not reachable through the view; every other
/// entity, the player (unless the player is the one updating) and the world's
/// bookkeeping are.
pub struct WorldView<'a> {
    before: &'a mut [Entity],
    after: &'a mut [Entity],
    player: Option<&'a mut Player>,
    ledger: &'a mut Ledger,
    edibles: &'a SpatialIndex,
    config: &'a GameConfig,
    level: u32,
}

impl<'a> WorldView<'a> {
    /// Game configuration.
    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Current level number.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Uniform random integer in `[min, max]`.
    pub fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        self.ledger.rand_int(min, max)
    }

    /// `true` with probability `1 / n`.
    pub fn one_in(&mut self, n: i32) -> bool {
        self.ledger.rand_int(0, n - 1) == 0
    }

    /// Queues a sound cue.
    pub fn play_sound(&mut self, cue: SoundCue) {
        self.ledger.cues.push(cue);
    }

    /// Adds `delta` to the score.
    pub fn increase_score(&mut self, delta: i32) {
        self.ledger.scoreboard.score += delta;
    }

    /// Grants an extra life.
    pub fn inc_lives(&mut self) {
        self.ledger.scoreboard.lives += 1;
    }

    /// Takes the oldest pending key press.
    pub fn pop_key(&mut self) -> Option<Key> {
        self.ledger.keys.pop_front()
    }

    /// Stages a new entity; it joins the collection when the tick ends.
    pub fn spawn(&mut self, mut entity: Entity) {
        self.ledger.assign_id(&mut entity);
        self.ledger.staged.push(entity);
    }

    /// Stages a newborn bacterium of `strain` at `pos`.
    pub fn spawn_bacterium(&mut self, strain: Strain, pos: Array1<f32>) {
        self.spawn(Entity::bacterium(strain, pos));
    }

    /// Stages a food item at `pos`.
    pub fn spawn_food(&mut self, pos: Array1<f32>) {
        self.spawn(Entity::food(pos));
    }

    fn others(&self) -> impl Iterator<Item = &Entity> {
        self.before.iter().chain(self.after.iter())
    }

    fn other_at(&self, idx: usize) -> Option<&Entity> {
        let split = self.before.len();
        match idx.cmp(&split) {
            std::cmp::Ordering::Less => self.before.get(idx),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => self.after.get(idx - split - 1),
        }
    }

    /// Whether any entity that forbids overlap lies within `radius` of `(x, y)`.
    pub fn overlap_check(&self, x: f32, y: f32, radius: f32) -> bool {
        blocks_placement(self.others(), x, y, radius)
    }

    /// Samples random points near the centre until one is free of
    /// non-overlappable entities.
    ///
    /// Gives up after `placement_attempts` samples and returns the last one.
    pub fn find_unoccupied_spawn_point(&mut self) -> Array1<f32> {
        let center = self.config.center();
        let reach = self.config.sprite_width;
        let mut pos = geometric_utils::point(center.0, center.1);
        for _ in 0..self.config.placement_attempts {
            let angle = self.rand_int(0, 359) as f32;
            let radius = self.rand_int(0, self.config.placement_radius) as f32;
            pos = geometric_utils::point_on_circle(center, radius, angle);
            if !self.overlap_check(pos[0], pos[1], reach) {
                return pos;
            }
        }
        warn!(
            "no free spawn point after {} attempts",
            self.config.placement_attempts
        );
        pos
    }

    /// Damages the first damageable entity overlapping `(x, y)`.
    ///
    /// # Returns
    ///
    /// `true` if something was hit.
    pub fn apply_damage_at(&mut self, x: f32, y: f32, amount: i32) -> bool {
        let reach = self.config.sprite_width;
        let target = self
            .before
            .iter_mut()
            .chain(self.after.iter_mut())
            .find(|e| e.is_alive() && e.is_damageable() && e.overlaps(x, y, reach));
        match target {
            Some(entity) => {
                entity.take_damage(amount, &mut self.ledger.cues);
                true
            }
            None => false,
        }
    }

    /// Bearing to the nearest edible entity within `max_distance` of `origin`.
    pub fn find_nearest_edible_within(
        &self,
        origin: &Array1<f32>,
        max_distance: f32,
    ) -> Option<f32> {
        self.edibles
            .query_edibles(origin, max_distance)
            .into_iter()
            .filter_map(|(_, idx)| self.other_at(idx))
            .find(|e| e.is_alive() && e.is_edible())
            .map(|e| geometric_utils::bearing_degrees(origin, e.pos()))
    }

    /// Bearing to the player if within `max_distance` of `origin`.
    pub fn find_player_bearing_within(
        &self,
        origin: &Array1<f32>,
        max_distance: f32,
    ) -> Option<f32> {
        player_bearing(self.player.as_deref(), origin, max_distance)
    }

    /// Whether a moving entity may step to `pos`.
    pub fn can_step_to(&self, pos: &Array1<f32>) -> bool {
        step_allowed(self.config, self.others(), pos)
    }

    /// The first alive edible entity overlapping `pos`.
    pub fn first_edible_overlapping(&mut self, pos: &Array1<f32>) -> Option<&mut Entity> {
        let reach = self.config.sprite_width;
        self.before
            .iter_mut()
            .chain(self.after.iter_mut())
            .find(|e| e.is_alive() && e.is_edible() && e.overlaps(pos[0], pos[1], reach))
    }

    /// The player, unless it is the one updating or already gone.
    pub fn player(&self) -> Option<&Player> {
        self.player.as_deref()
    }

    /// Mutable access to the player.
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_deref_mut()
    }

    /// Whether the player is within `radius` of `pos`.
    pub fn player_overlaps(&self, pos: &Array1<f32>, radius: f32) -> bool {
        self.player
            .as_deref()
            .is_some_and(|p| p.is_alive() && p.overlaps(pos[0], pos[1], radius))
    }

    /// Deals `amount` damage to the player, if present.
    pub fn damage_player(&mut self, amount: i32) {
        if let Some(player) = self.player.as_deref_mut() {
            player.take_damage(amount, &mut self.ledger.cues);
        }
    }
}

fn blocks_placement<'e>(
    entities: impl Iterator<Item = &'e Entity>,
    x: f32,
    y: f32,
    radius: f32,
) -> bool {
    entities
        .filter(|e| e.is_alive() && !e.can_overlap_others())
        .any(|e| e.overlaps(x, y, radius))
}

fn step_allowed<'e>(
    config: &GameConfig,
    entities: impl Iterator<Item = &'e Entity>,
    pos: &Array1<f32>,
) -> bool {
    let (cx, cy) = config.center();
    if geometric_utils::distance(pos, &geometric_utils::point(cx, cy)) > config.view_radius {
        return false;
    }
    let reach = config.sprite_width / 2.0;
    !entities
        .filter(|e| e.is_alive() && e.blocks_movement())
        .any(|e| e.overlaps(pos[0], pos[1], reach))
}

fn player_bearing(player: Option<&Player>, origin: &Array1<f32>, max_distance: f32) -> Option<f32> {
    let player = player.filter(|p| p.is_alive())?;
    if geometric_utils::distance(origin, player.pos()) <= max_distance {
        Some(geometric_utils::bearing_degrees(origin, player.pos()))
    } else {
        None
    }
}
