use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{info, info_span};

use crate::algorithm::placement::{GenerationReport, GridPlacer};
use crate::algorithm::walls::{WallBuilder, WallSlab};
use crate::io::configuration::LevelConfig;
use crate::io::error::{LevelError, Result};
use crate::io::factory::InstanceFactory;
use crate::lifecycle::record::{Category, PlacementRecord};
use crate::lifecycle::registry::{LifecycleRegistry, ReleaseSummary};
use crate::pool::{CategoryPools, ReleaseOutcome};

/// Level generator owning the factory, pools, registry and random source
///
/// Hosts drive it through two lifecycle calls, [`setup_pools`] once and then
/// [`generate`]. Releases are explicit and route each instance back to the
/// pool that created it. Everything here is single-threaded and runs to
/// completion before returning.
///
/// [`setup_pools`]: LevelGenerator::setup_pools
/// [`generate`]: LevelGenerator::generate
pub struct LevelGenerator<F: InstanceFactory, R = StdRng> {
    config: LevelConfig,
    factory: F,
    rng: R,
    pools: Option<CategoryPools<F::Handle>>,
    registry: LifecycleRegistry<F::Handle>,
    slabs: Vec<WallSlab>,
}

impl<F: InstanceFactory> LevelGenerator<F, StdRng> {
    /// Create a generator seeded from the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: LevelConfig, factory: F) -> Result<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::with_rng(config, factory, rng)
    }
}

impl<F: InstanceFactory, R: Rng> LevelGenerator<F, R> {
    /// Create a generator drawing from an injected random source
    ///
    /// The configuration is normalized first, so weight vectors and obstacle
    /// flags always match their catalogs afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn with_rng(config: LevelConfig, factory: F, rng: R) -> Result<Self> {
        let config = config.normalized();
        config.validate()?;

        Ok(Self {
            config,
            factory,
            rng,
            pools: None,
            registry: LifecycleRegistry::new(),
            slabs: Vec::new(),
        })
    }

    /// Build one pool per archetype per category
    ///
    /// Calling this again keeps the existing pools.
    pub fn setup_pools(&mut self) {
        if self.pools.is_none() {
            info!(
                tiles = self.config.tiles.len(),
                enemies = self.config.enemies.len(),
                walls = self.config.walls.len(),
                "setting up pools"
            );
            self.pools = Some(CategoryPools::from_config(&self.config));
        }
    }

    /// Sweep the grid, seed enemies and build the perimeter
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::PoolsNotReady`] if [`setup_pools`] was not called
    ///
    /// [`setup_pools`]: LevelGenerator::setup_pools
    pub fn generate(&mut self) -> Result<GenerationReport> {
        let pools = self.pools.as_mut().ok_or(LevelError::PoolsNotReady)?;
        let _span = info_span!(
            "generate",
            x = self.config.x_length,
            z = self.config.z_length,
            floors = self.config.floors
        )
        .entered();

        let mut report = GenerationReport::default();
        GridPlacer::new(&self.config).sweep(
            pools,
            &mut self.registry,
            &mut self.factory,
            &mut self.rng,
            &mut report,
        )?;

        if self.config.spawn_walls {
            let builder = WallBuilder::new(&self.config);
            if builder.uses_archetypes() {
                builder.build_segments(
                    &mut pools.walls,
                    &mut self.registry,
                    &mut self.factory,
                    &mut self.rng,
                    &mut report,
                )?;
            } else if self.slabs.is_empty() {
                for slab in builder.slabs() {
                    self.factory.place_slab(&slab);
                    self.slabs.push(slab);
                }
                report.slabs = self.slabs.len();
            }
        }

        info!(
            tiles = report.tiles,
            enemies = report.enemies,
            walls = report.walls,
            slabs = report.slabs,
            skipped = report.skipped_tiles + report.skipped_enemies + report.skipped_walls,
            "generation complete"
        );
        Ok(report)
    }

    /// Return every tile to its pool
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::PoolsNotReady`] if the pools were never set up
    pub fn release_tiles(&mut self) -> Result<ReleaseSummary> {
        self.release_category(Category::Tile)
    }

    /// Return every enemy to its pool
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::PoolsNotReady`] if the pools were never set up
    pub fn release_enemies(&mut self) -> Result<ReleaseSummary> {
        self.release_category(Category::Enemy)
    }

    /// Return every pooled wall segment to its pool
    ///
    /// Primitive slabs are permanent and unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::PoolsNotReady`] if the pools were never set up
    pub fn release_walls(&mut self) -> Result<ReleaseSummary> {
        self.release_category(Category::Wall)
    }

    /// Return a single enemy to its pool
    ///
    /// The record is located according to the configured
    /// [`EnemyRemoval`](crate::io::configuration::EnemyRemoval) mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the pools were never set up, the record is stale,
    /// or the pool rejects the release
    pub fn release_enemy(&mut self, record: &PlacementRecord<F::Handle>) -> Result<ReleaseOutcome> {
        let pools = self.pools.as_mut().ok_or(LevelError::PoolsNotReady)?;
        self.registry.release_enemy(
            record,
            self.config.enemy_removal,
            &mut pools.enemies,
            &mut self.factory,
        )
    }

    /// Destroy every inactive pooled instance
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::PoolsNotReady`] if the pools were never set up
    pub fn clear_pools(&mut self) -> Result<()> {
        let pools = self.pools.as_mut().ok_or(LevelError::PoolsNotReady)?;
        pools.clear(&mut self.factory);
        Ok(())
    }

    /// Normalized configuration in use
    pub const fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Active placement records
    pub const fn registry(&self) -> &LifecycleRegistry<F::Handle> {
        &self.registry
    }

    /// Pools, once set up
    pub const fn pools(&self) -> Option<&CategoryPools<F::Handle>> {
        self.pools.as_ref()
    }

    /// Permanent primitive wall slabs
    pub fn slabs(&self) -> &[WallSlab] {
        &self.slabs
    }

    /// Injected factory
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// Consume the generator and hand back the factory
    pub fn into_factory(self) -> F {
        self.factory
    }

    fn release_category(&mut self, category: Category) -> Result<ReleaseSummary> {
        let pools = self.pools.as_mut().ok_or(LevelError::PoolsNotReady)?;
        Ok(self
            .registry
            .release_all(category, pools.set_mut(category), &mut self.factory))
    }
}
