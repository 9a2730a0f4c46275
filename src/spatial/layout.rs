//! Dense snapshot of a generated level indexed by floor and cell

use ndarray::Array3;

use crate::io::configuration::LevelConfig;
use crate::lifecycle::record::{Category, Cell, Role};
use crate::lifecycle::registry::LifecycleRegistry;

/// Tile archetypes and enemy occupancy per cell
///
/// Arrays are indexed `[floor, x, z]`. Tile entries store the archetype index
/// plus one so that zero marks a cell left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLayout {
    tiles: Array3<u32>,
    enemies: Array3<bool>,
}

impl LevelLayout {
    /// Snapshot the active tile and enemy records of a registry
    pub fn capture<H: Clone + PartialEq>(
        config: &LevelConfig,
        registry: &LifecycleRegistry<H>,
    ) -> Self {
        let shape = (config.floors, config.x_length, config.z_length);
        let mut tiles = Array3::zeros(shape);
        let mut enemies = Array3::from_elem(shape, false);

        for record in registry.records(Category::Tile) {
            if let Role::Tile(cell) = record.role
                && let Some(slot) = tiles.get_mut(index(cell))
            {
                *slot = record.pool_index as u32 + 1;
            }
        }

        for record in registry.records(Category::Enemy) {
            if let Role::Enemy(cell) = record.role
                && let Some(slot) = enemies.get_mut(index(cell))
            {
                *slot = true;
            }
        }

        Self { tiles, enemies }
    }

    /// Tile archetype index at a cell, `None` if empty or out of range
    pub fn tile_at(&self, cell: Cell) -> Option<usize> {
        self.tiles
            .get(index(cell))
            .copied()
            .filter(|&value| value > 0)
            .map(|value| value as usize - 1)
    }

    /// Whether an enemy stands on a cell
    pub fn has_enemy(&self, cell: Cell) -> bool {
        self.enemies.get(index(cell)).copied().unwrap_or(false)
    }

    /// Number of cells holding an enemy
    pub fn enemy_count(&self) -> usize {
        self.enemies.iter().filter(|&&occupied| occupied).count()
    }

    /// Number of cells holding a tile
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|&&value| value > 0).count()
    }

    /// Dimensions as `(floors, x_length, z_length)`
    pub fn dim(&self) -> (usize, usize, usize) {
        self.tiles.dim()
    }
}

const fn index(cell: Cell) -> [usize; 3] {
    [cell.floor, cell.x, cell.z]
}
