//! Spatial indexing for nearest-food queries.
//!
//! Food never moves and the collection is only reshaped between ticks
//! (spawns are staged, removals are reaped), so a k-d tree built from the
//! collection at a tick boundary stays valid for the whole tick. Entries that
//! died mid-tick are filtered by the caller.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::entity::Entity;
use super::locatable::Locatable;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Result of a spatial radius query: `(distance_squared, collection index)`.
pub type SpatialQueryResult = Vec<(f32, usize)>;

/// KD-tree over the edible entities of a collection.
pub struct SpatialIndex {
    edibles: Tree2D,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::empty()
    }
}

impl SpatialIndex {
    /// An index with no entries.
    pub fn empty() -> Self {
        Self {
            edibles: KdTree::new(2),
        }
    }

    /// Builds an index of the edible, alive entities in `entities`.
    ///
    /// Stored values are indices into `entities`.
    pub fn build(entities: &[Entity]) -> Result<Self, KdTreeError> {
        let edibles = build_tree(entities, |e| e.is_alive() && e.is_edible())?;
        Ok(Self { edibles })
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.edibles.size()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Query edible entities within `radius` of `pos`, nearest first.
    ///
    /// # Arguments
    ///
    /// * `pos` - Center position for the query
    /// * `radius` - Search radius (will be squared internally)
    pub fn query_edibles(&self, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
        let mut found: SpatialQueryResult = self
            .edibles
            .within(&pos.to_vec(), radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist, &idx)| (dist, idx))
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        found
    }
}

/// Helper function to build a KD-tree from the entities matching `include`.
fn build_tree(
    entities: &[Entity],
    include: impl Fn(&Entity) -> bool,
) -> Result<Tree2D, KdTreeError> {
    let mut tree = KdTree::with_capacity(2, entities.len().max(1));
    for (i, entity) in entities.iter().enumerate() {
        if include(entity) && entity.pos().iter().all(|c| c.is_finite()) {
            tree.add(entity.pos().to_vec(), i)?;
        }
    }
    Ok(tree)
}
