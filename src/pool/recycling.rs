use std::ops::Add;
use tracing::{debug, warn};

use crate::io::configuration::{Archetype, PoolSettings};
use crate::io::error::{LevelError, Result};
use crate::io::factory::InstanceFactory;
use crate::lifecycle::record::Category;

/// Counters describing how a pool has been used
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances built through the factory
    pub created: usize,
    /// Instances handed out again from the free list
    pub reused: usize,
    /// Instances destroyed because the free list was full or cleared
    pub destroyed: usize,
    /// Releases rejected as double releases
    pub rejected: usize,
}

impl Add for PoolStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            created: self.created + other.created,
            reused: self.reused + other.reused,
            destroyed: self.destroyed + other.destroyed,
            rejected: self.rejected + other.rejected,
        }
    }
}

/// What happened to a released instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Kept in the free list for reuse
    Retained,
    /// Destroyed because the free list was at capacity
    Destroyed,
}

/// Fixed-capacity recycling pool for the instances of one archetype
///
/// `get` always succeeds: the free list is drained first and the factory is
/// asked for a new instance otherwise. The capacity only bounds how many
/// released instances are kept; excess releases are destroyed.
#[derive(Debug)]
pub struct RecyclingPool<H> {
    archetype: Archetype,
    category: Category,
    index: usize,
    free: Vec<H>,
    active: usize,
    max_size: usize,
    collection_checks: bool,

    /// Usage statistics
    pub stats: PoolStats,
}

impl<H: Clone + PartialEq> RecyclingPool<H> {
    /// Create an empty pool for the archetype at `index` of a category
    pub fn new(
        archetype: Archetype,
        category: Category,
        index: usize,
        settings: &PoolSettings,
    ) -> Self {
        Self {
            archetype,
            category,
            index,
            free: Vec::with_capacity(settings.default_capacity),
            active: 0,
            max_size: settings.max_size,
            collection_checks: settings.collection_checks,
            stats: PoolStats::default(),
        }
    }

    /// Hand out an instance, reusing an inactive one when available
    pub fn get<F>(&mut self, factory: &mut F) -> H
    where
        F: InstanceFactory<Handle = H>,
    {
        let handle = if let Some(handle) = self.free.pop() {
            self.stats.reused += 1;
            handle
        } else {
            self.stats.created += 1;
            debug!(
                category = %self.category,
                archetype = %self.archetype,
                created = self.stats.created,
                "creating pooled instance"
            );
            factory.create(&self.archetype)
        };

        factory.activate(&handle);
        self.active += 1;
        handle
    }

    /// Return an instance to the pool
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::DoubleRelease`] when collection checks are on and
    /// the instance is already inactive. The pool is unchanged in that case.
    pub fn release<F>(&mut self, handle: H, factory: &mut F) -> Result<ReleaseOutcome>
    where
        F: InstanceFactory<Handle = H>,
    {
        if self.collection_checks && self.free.contains(&handle) {
            self.stats.rejected += 1;
            warn!(
                category = %self.category,
                pool = self.index,
                "rejected double release"
            );
            return Err(LevelError::DoubleRelease {
                category: self.category,
                pool_index: self.index,
            });
        }

        factory.deactivate(&handle);
        self.active = self.active.saturating_sub(1);

        if self.free.len() < self.max_size {
            self.free.push(handle);
            Ok(ReleaseOutcome::Retained)
        } else {
            self.stats.destroyed += 1;
            factory.destroy(handle);
            Ok(ReleaseOutcome::Destroyed)
        }
    }

    /// Destroy every inactive instance
    pub fn clear<F>(&mut self, factory: &mut F)
    where
        F: InstanceFactory<Handle = H>,
    {
        self.stats.destroyed += self.free.len();
        for handle in self.free.drain(..) {
            factory.destroy(handle);
        }
    }

    /// Archetype served by this pool
    pub const fn archetype(&self) -> &Archetype {
        &self.archetype
    }

    /// Instances currently handed out
    pub const fn count_active(&self) -> usize {
        self.active
    }

    /// Instances waiting in the free list
    pub const fn count_inactive(&self) -> usize {
        self.free.len()
    }

    /// Live instances owned by the pool, active or not
    pub const fn count_all(&self) -> usize {
        self.active + self.free.len()
    }

    /// Maximum number of inactive instances retained
    pub const fn max_size(&self) -> usize {
        self.max_size
    }
}
