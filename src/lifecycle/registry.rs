//! Active instance bookkeeping per category

use tracing::{debug, warn};

use crate::io::configuration::EnemyRemoval;
use crate::io::error::{LevelError, Result};
use crate::io::factory::InstanceFactory;
use crate::lifecycle::record::{Category, PlacementRecord};
use crate::pool::{PoolSet, ReleaseOutcome};

/// Result of releasing a whole category
#[derive(Debug, Default)]
pub struct ReleaseSummary {
    /// Records handed back to their pools
    pub released: usize,
    /// Released instances kept for reuse
    pub retained: usize,
    /// Released instances destroyed because their pool was full
    pub destroyed: usize,
    /// Releases the pools rejected; the records are dropped regardless
    pub errors: Vec<LevelError>,
}

/// Ordered records of every active tile, enemy and pooled wall
///
/// Records are appended during generation and only ever removed, so the
/// relative order of survivors always matches placement order.
#[derive(Debug)]
pub struct LifecycleRegistry<H> {
    tiles: Vec<PlacementRecord<H>>,
    enemies: Vec<PlacementRecord<H>>,
    walls: Vec<PlacementRecord<H>>,
}

impl<H> Default for LifecycleRegistry<H> {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            enemies: Vec::new(),
            walls: Vec::new(),
        }
    }
}

impl<H: Clone + PartialEq> LifecycleRegistry<H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the sequence of its category
    pub fn push(&mut self, record: PlacementRecord<H>) {
        self.sequence_mut(record.category()).push(record);
    }

    /// Records of a category in placement order
    pub fn records(&self, category: Category) -> &[PlacementRecord<H>] {
        match category {
            Category::Tile => &self.tiles,
            Category::Enemy => &self.enemies,
            Category::Wall => &self.walls,
        }
    }

    /// Number of active records in a category
    pub fn count(&self, category: Category) -> usize {
        self.records(category).len()
    }

    /// Release every record of a category to its pool and clear the sequence
    ///
    /// Rejected releases are collected in the summary instead of aborting.
    pub fn release_all<F>(
        &mut self,
        category: Category,
        pools: &mut PoolSet<H>,
        factory: &mut F,
    ) -> ReleaseSummary
    where
        F: InstanceFactory<Handle = H>,
    {
        let records = std::mem::take(self.sequence_mut(category));
        let mut summary = ReleaseSummary::default();

        for record in records {
            match pools.release(record.pool_index, record.handle, factory) {
                Ok(outcome) => {
                    summary.released += 1;
                    match outcome {
                        ReleaseOutcome::Retained => summary.retained += 1,
                        ReleaseOutcome::Destroyed => summary.destroyed += 1,
                    }
                }
                Err(error) => {
                    warn!(%category, id = record.id, %error, "release failed");
                    summary.errors.push(error);
                }
            }
        }

        debug!(
            %category,
            released = summary.released,
            destroyed = summary.destroyed,
            "released category"
        );
        summary
    }

    /// Release a single enemy and remove its record
    ///
    /// With [`EnemyRemoval::Positional`] the record is located at the position
    /// named by its identifier and must hold the same handle there. The slot is
    /// checked before the pool is touched, so a mismatch releases nothing.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::StaleRecord`] if the record cannot be located,
    /// or the pool error if the release is rejected. Nothing is removed on error.
    pub fn release_enemy<F>(
        &mut self,
        record: &PlacementRecord<H>,
        removal: EnemyRemoval,
        pools: &mut PoolSet<H>,
        factory: &mut F,
    ) -> Result<ReleaseOutcome>
    where
        F: InstanceFactory<Handle = H>,
    {
        let position = match removal {
            EnemyRemoval::ByHandle => self
                .enemies
                .iter()
                .position(|candidate| candidate.handle == record.handle),
            EnemyRemoval::Positional => usize::try_from(record.id).ok().filter(|&position| {
                self.enemies
                    .get(position)
                    .is_some_and(|candidate| candidate.handle == record.handle)
            }),
        };

        let Some(position) = position else {
            return Err(LevelError::StaleRecord {
                id: record.id,
                registered: self.enemies.len(),
            });
        };

        let outcome = pools.release(record.pool_index, record.handle.clone(), factory)?;
        self.enemies.remove(position);
        Ok(outcome)
    }

    fn sequence_mut(&mut self, category: Category) -> &mut Vec<PlacementRecord<H>> {
        match category {
            Category::Tile => &mut self.tiles,
            Category::Enemy => &mut self.enemies,
            Category::Wall => &mut self.walls,
        }
    }
}
