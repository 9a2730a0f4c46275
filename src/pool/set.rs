use crate::io::configuration::{Catalog, LevelConfig, PoolSettings};
use crate::io::error::{LevelError, Result};
use crate::io::factory::InstanceFactory;
use crate::lifecycle::record::Category;
use crate::pool::recycling::{PoolStats, RecyclingPool, ReleaseOutcome};

/// One recycling pool per archetype of a category, addressed by archetype index
#[derive(Debug)]
pub struct PoolSet<H> {
    category: Category,
    pools: Vec<RecyclingPool<H>>,
}

impl<H: Clone + PartialEq> PoolSet<H> {
    /// Set with no pools
    pub const fn empty(category: Category) -> Self {
        Self {
            category,
            pools: Vec::new(),
        }
    }

    /// Build a pool for every archetype in the catalog
    pub fn from_catalog(category: Category, catalog: &Catalog, settings: &PoolSettings) -> Self {
        let pools = catalog
            .archetypes
            .iter()
            .enumerate()
            .map(|(index, archetype)| {
                RecyclingPool::new(archetype.clone(), category, index, settings)
            })
            .collect();

        Self { category, pools }
    }

    /// Hand out an instance from the pool at `index`
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::UnknownPool`] if `index` addresses no pool
    pub fn get<F>(&mut self, index: usize, factory: &mut F) -> Result<H>
    where
        F: InstanceFactory<Handle = H>,
    {
        Ok(self.pool_mut(index)?.get(factory))
    }

    /// Return an instance to the pool at `index`
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::UnknownPool`] if `index` addresses no pool, or
    /// [`LevelError::DoubleRelease`] if that pool rejects the release
    pub fn release<F>(&mut self, index: usize, handle: H, factory: &mut F) -> Result<ReleaseOutcome>
    where
        F: InstanceFactory<Handle = H>,
    {
        self.pool_mut(index)?.release(handle, factory)
    }

    /// Destroy every inactive instance in every pool
    pub fn clear<F>(&mut self, factory: &mut F)
    where
        F: InstanceFactory<Handle = H>,
    {
        for pool in &mut self.pools {
            pool.clear(factory);
        }
    }

    /// Pool at `index`
    pub fn pool(&self, index: usize) -> Option<&RecyclingPool<H>> {
        self.pools.get(index)
    }

    /// Number of pools
    pub const fn len(&self) -> usize {
        self.pools.len()
    }

    /// Whether the category has no archetypes
    pub const fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Category served by this set
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Instances currently handed out across all pools
    pub fn count_active(&self) -> usize {
        self.pools.iter().map(RecyclingPool::count_active).sum()
    }

    /// Statistics summed across all pools
    pub fn stats(&self) -> PoolStats {
        self.pools
            .iter()
            .fold(PoolStats::default(), |total, pool| total + pool.stats)
    }

    fn pool_mut(&mut self, index: usize) -> Result<&mut RecyclingPool<H>> {
        let category = self.category;
        let pool_count = self.pools.len();
        self.pools.get_mut(index).ok_or(LevelError::UnknownPool {
            category,
            index,
            pool_count,
        })
    }
}

/// Pool sets of all three categories
#[derive(Debug)]
pub struct CategoryPools<H> {
    /// Tile pools
    pub tiles: PoolSet<H>,
    /// Enemy pools
    pub enemies: PoolSet<H>,
    /// Wall pools
    pub walls: PoolSet<H>,
}

impl<H: Clone + PartialEq> CategoryPools<H> {
    /// Build pools for every catalog of a normalized configuration
    pub fn from_config(config: &LevelConfig) -> Self {
        Self {
            tiles: PoolSet::from_catalog(Category::Tile, &config.tiles, &config.pool),
            enemies: PoolSet::from_catalog(Category::Enemy, &config.enemies, &config.pool),
            walls: PoolSet::from_catalog(Category::Wall, &config.walls, &config.pool),
        }
    }

    /// Pool set of a category
    pub const fn set(&self, category: Category) -> &PoolSet<H> {
        match category {
            Category::Tile => &self.tiles,
            Category::Enemy => &self.enemies,
            Category::Wall => &self.walls,
        }
    }

    /// Mutable pool set of a category
    pub const fn set_mut(&mut self, category: Category) -> &mut PoolSet<H> {
        match category {
            Category::Tile => &mut self.tiles,
            Category::Enemy => &mut self.enemies,
            Category::Wall => &mut self.walls,
        }
    }

    /// Statistics summed across every category
    pub fn stats(&self) -> PoolStats {
        self.tiles.stats() + self.enemies.stats() + self.walls.stats()
    }

    /// Destroy every inactive instance in every category
    pub fn clear<F>(&mut self, factory: &mut F)
    where
        F: InstanceFactory<Handle = H>,
    {
        for category in Category::ALL {
            self.set_mut(category).clear(factory);
        }
    }
}
