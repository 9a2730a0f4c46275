//! Grid sweep placing tiles and seeding enemies

use glam::Vec3;
use rand::Rng;
use tracing::{debug, warn};

use crate::algorithm::selection::select_weighted_index;
use crate::io::configuration::{ENEMY_CELL_SCALE, LevelConfig};
use crate::io::error::Result;
use crate::io::factory::InstanceFactory;
use crate::lifecycle::record::{Category, Cell, PlacementId, PlacementRecord, Role};
use crate::lifecycle::registry::LifecycleRegistry;
use crate::pool::CategoryPools;
use crate::spatial::transform::Transform;

/// Yaw angles a tile may be placed with
pub const TILE_YAWS: [f32; 4] = [0.0, 90.0, 180.0, 270.0];

/// Counts of what a generation pass placed and skipped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Tiles placed
    pub tiles: usize,
    /// Cells left empty because no tile weight was usable
    pub skipped_tiles: usize,
    /// Enemies spawned
    pub enemies: usize,
    /// Spawn attempts dropped because no enemy weight was usable
    pub skipped_enemies: usize,
    /// Pooled wall segments placed
    pub walls: usize,
    /// Wall steps left empty because no wall weight was usable
    pub skipped_walls: usize,
    /// Primitive wall slabs built
    pub slabs: usize,
}

/// Sweeps every cell of every floor, placing a tile and maybe an enemy
///
/// Cells are visited floor by floor, `x` outer and `z` inner. Tile
/// identifiers count cells in that order across all floors. The enemy
/// heuristic keeps a starvation counter of eligible cells visited since the
/// last spawn; the chance to spawn grows with it and with the unmet budget.
pub struct GridPlacer<'a> {
    config: &'a LevelConfig,
    starvation: usize,
    next_id: PlacementId,
}

impl<'a> GridPlacer<'a> {
    /// Create a placer for a normalized, validated configuration
    pub const fn new(config: &'a LevelConfig) -> Self {
        Self {
            config,
            starvation: 0,
            next_id: 0,
        }
    }

    /// Run the full sweep
    ///
    /// # Errors
    ///
    /// Returns an error if a selected archetype index addresses no pool,
    /// which cannot happen for a normalized configuration
    pub fn sweep<F, R>(
        &mut self,
        pools: &mut CategoryPools<F::Handle>,
        registry: &mut LifecycleRegistry<F::Handle>,
        factory: &mut F,
        rng: &mut R,
        report: &mut GenerationReport,
    ) -> Result<()>
    where
        F: InstanceFactory,
        R: Rng + ?Sized,
    {
        for floor in 0..self.config.floors {
            for x in 0..self.config.x_length {
                for z in 0..self.config.z_length {
                    let cell = Cell { floor, x, z };
                    let id = self.next_id;
                    self.next_id += 1;

                    let Some(tile_index) =
                        self.place_tile(cell, id, pools, registry, factory, rng)?
                    else {
                        report.skipped_tiles += 1;
                        warn!(floor, x, z, "no usable tile weight; cell left empty");
                        continue;
                    };
                    report.tiles += 1;

                    self.attempt_enemy(cell, id, tile_index, pools, registry, factory, rng, report)?;
                }
            }
        }

        Ok(())
    }

    /// World position of a tile cell
    pub fn tile_position(&self, cell: Cell) -> Vec3 {
        let size = self.config.cell_size;
        Vec3::new(
            cell.x as f32 * size.x,
            (cell.floor as f32).mul_add(size.y, self.config.height_offset),
            cell.z as f32 * size.z,
        )
    }

    /// World position of an enemy standing on a cell
    pub const fn enemy_position(cell: Cell) -> Vec3 {
        Vec3::new(
            cell.x as f32 * ENEMY_CELL_SCALE,
            0.0,
            cell.z as f32 * ENEMY_CELL_SCALE,
        )
    }

    fn place_tile<F, R>(
        &self,
        cell: Cell,
        id: PlacementId,
        pools: &mut CategoryPools<F::Handle>,
        registry: &mut LifecycleRegistry<F::Handle>,
        factory: &mut F,
        rng: &mut R,
    ) -> Result<Option<usize>>
    where
        F: InstanceFactory,
        R: Rng + ?Sized,
    {
        let Some(tile_index) = select_weighted_index(&self.config.tiles.weights, rng) else {
            return Ok(None);
        };

        let handle = pools.tiles.get(tile_index, factory)?;
        let yaw = TILE_YAWS
            .get(rng.random_range(0..TILE_YAWS.len()))
            .copied()
            .unwrap_or_default();
        let transform = Transform::new(self.tile_position(cell), yaw);

        place(
            PlacementRecord {
                handle,
                pool_index: tile_index,
                id,
                role: Role::Tile(cell),
                transform,
            },
            registry,
            factory,
        );

        Ok(Some(tile_index))
    }

    fn attempt_enemy<F, R>(
        &mut self,
        cell: Cell,
        tile_id: PlacementId,
        tile_index: usize,
        pools: &mut CategoryPools<F::Handle>,
        registry: &mut LifecycleRegistry<F::Handle>,
        factory: &mut F,
        rng: &mut R,
        report: &mut GenerationReport,
    ) -> Result<()>
    where
        F: InstanceFactory,
        R: Rng + ?Sized,
    {
        let active = registry.count(Category::Enemy);
        if self.config.is_obstacle(tile_index)
            || active >= self.config.enemy_budget
            || self.config.enemies.is_empty()
        {
            return Ok(());
        }

        self.starvation += 1;

        let Some(enemy_index) = select_weighted_index(&self.config.enemies.weights, rng) else {
            report.skipped_enemies += 1;
            warn!(
                floor = cell.floor,
                x = cell.x,
                z = cell.z,
                "no usable enemy weight; spawn attempt dropped"
            );
            return Ok(());
        };

        let draw = rng.random_range(0..self.config.cells_per_floor());
        let threshold = self
            .starvation
            .saturating_add(self.config.enemy_budget - active);
        if draw > threshold {
            return Ok(());
        }

        let handle = pools.enemies.get(enemy_index, factory)?;
        debug!(
            floor = cell.floor,
            x = cell.x,
            z = cell.z,
            starvation = self.starvation,
            draw,
            "spawned enemy"
        );

        place(
            PlacementRecord {
                handle,
                pool_index: enemy_index,
                id: tile_id,
                role: Role::Enemy(cell),
                transform: Transform::at(Self::enemy_position(cell)),
            },
            registry,
            factory,
        );

        report.enemies += 1;
        self.starvation = 0;
        Ok(())
    }
}

/// Position, tag and register a freshly pooled instance
pub fn place<F>(
    record: PlacementRecord<F::Handle>,
    registry: &mut LifecycleRegistry<F::Handle>,
    factory: &mut F,
) where
    F: InstanceFactory,
{
    factory.set_transform(&record.handle, record.transform);
    factory.tag(&record.handle, &record.tag());
    registry.push(record);
}
