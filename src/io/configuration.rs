//! Generation defaults and the level configuration surface

use bitvec::prelude::*;
use glam::Vec3;
use std::fmt;

use crate::io::error::{Result, invalid_parameter};

// Grid defaults
/// Default number of cells along `x`
pub const DEFAULT_X_LENGTH: usize = 15;
/// Default number of cells along `z`
pub const DEFAULT_Z_LENGTH: usize = 15;
/// Default number of stacked floors
pub const DEFAULT_FLOORS: usize = 1;
/// Default edge length of a cell on every axis
pub const DEFAULT_CELL_SIZE: f32 = 10.0;

// Safety limits to keep cell counts and layout snapshots bounded
/// Maximum number of cells along either grid axis
pub const MAX_GRID_DIMENSION: usize = 10_000;
/// Maximum number of stacked floors
pub const MAX_FLOORS: usize = 256;

// Enemies are placed on a fixed 10-unit lattice regardless of cell size
/// Spacing used for enemy positions
pub const ENEMY_CELL_SCALE: f32 = 10.0;
/// Default number of enemies to seed
pub const DEFAULT_ENEMY_BUDGET: usize = 5;

/// Default wall thickness for pooled wall segments
pub const DEFAULT_WALL_THICKNESS: f32 = 1.0;
/// Thickness of primitive wall slabs
pub const SLAB_THICKNESS: f32 = 1.0;

// Pool tuning
/// Whether pools reject double releases by default
pub const DEFAULT_COLLECTION_CHECKS: bool = true;
/// Initial free list allocation per pool
pub const DEFAULT_POOL_CAPACITY: usize = 50;
/// Maximum number of inactive instances a pool retains
pub const DEFAULT_MAX_POOL_SIZE: usize = 100;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Named kind of placeable object
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Archetype {
    /// Identifier handed to the factory
    pub name: String,
}

impl Archetype {
    /// Create an archetype from its name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Archetypes of one category with their spawn weights
///
/// Weights are kept in a parallel vector. A length mismatch is not an error;
/// [`Catalog::normalized`] pads missing weights with zero and drops extras.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    /// Archetypes addressed by pool index
    pub archetypes: Vec<Archetype>,
    /// Spawn weight per archetype
    pub weights: Vec<f32>,
}

impl Catalog {
    /// Build a catalog from `(name, weight)` pairs
    pub fn weighted<S: Into<String>>(entries: impl IntoIterator<Item = (S, f32)>) -> Self {
        let (archetypes, weights): (Vec<Archetype>, Vec<f32>) = entries
            .into_iter()
            .map(|(name, weight)| (Archetype::new(name), weight))
            .unzip();
        Self {
            archetypes,
            weights,
        }
    }

    /// Build a catalog where every archetype has weight one
    pub fn uniform<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::weighted(names.into_iter().map(|name| (name, 1.0)))
    }

    /// Append an archetype
    pub fn push(&mut self, name: impl Into<String>, weight: f32) {
        self.archetypes.push(Archetype::new(name));
        self.weights.push(weight);
    }

    /// Number of archetypes
    pub const fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Whether the catalog has no archetypes
    pub const fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// Archetype at a pool index
    pub fn archetype(&self, index: usize) -> Option<&Archetype> {
        self.archetypes.get(index)
    }

    /// Copy with the weight vector resized to the archetype count
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut weights = self.weights.clone();
        weights.resize(self.archetypes.len(), 0.0);
        Self {
            archetypes: self.archetypes.clone(),
            weights,
        }
    }
}

/// Sizing and safety settings shared by every pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSettings {
    /// Reject releases of instances that are already inactive
    pub collection_checks: bool,
    /// Initial free list allocation
    pub default_capacity: usize,
    /// Maximum number of inactive instances retained
    pub max_size: usize,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            collection_checks: DEFAULT_COLLECTION_CHECKS,
            default_capacity: DEFAULT_POOL_CAPACITY,
            max_size: DEFAULT_MAX_POOL_SIZE,
        }
    }
}

/// How a single enemy record is located when it is released
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnemyRemoval {
    /// Find the record whose handle matches
    #[default]
    ByHandle,
    /// Remove at the position given by the stored identifier
    ///
    /// The slot at that position must hold the same handle; otherwise the
    /// release is refused and nothing is returned to the pool. Only succeeds
    /// while identifiers match positions, which enemy records (carrying their
    /// tile identifier) rarely do.
    Positional,
}

/// Complete input for one level generator
#[derive(Clone, Debug, PartialEq)]
pub struct LevelConfig {
    /// Cells along `x`
    pub x_length: usize,
    /// Cells along `z`
    pub z_length: usize,
    /// Number of stacked floors
    pub floors: usize,
    /// Vertical offset added to every floor
    pub height_offset: f32,
    /// World size of one cell per axis
    pub cell_size: Vec3,
    /// Tile archetypes and weights
    pub tiles: Catalog,
    /// Per tile archetype flag marking tiles enemies cannot stand on
    pub obstacles: BitVec,
    /// Enemy archetypes and weights
    pub enemies: Catalog,
    /// Maximum number of active enemies
    pub enemy_budget: usize,
    /// Whether to enclose the grid with walls
    pub spawn_walls: bool,
    /// Thickness used to offset pooled wall segments
    pub wall_thickness: f32,
    /// Wall archetypes and weights; empty selects primitive slabs
    pub walls: Catalog,
    /// Pool tuning shared by all categories
    pub pool: PoolSettings,
    /// Lookup strategy for single enemy releases
    pub enemy_removal: EnemyRemoval,
    /// Seed for the default random source
    pub seed: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            x_length: DEFAULT_X_LENGTH,
            z_length: DEFAULT_Z_LENGTH,
            floors: DEFAULT_FLOORS,
            height_offset: 0.0,
            cell_size: Vec3::splat(DEFAULT_CELL_SIZE),
            tiles: Catalog::default(),
            obstacles: BitVec::new(),
            enemies: Catalog::default(),
            enemy_budget: DEFAULT_ENEMY_BUDGET,
            spawn_walls: false,
            wall_thickness: DEFAULT_WALL_THICKNESS,
            walls: Catalog::default(),
            pool: PoolSettings::default(),
            enemy_removal: EnemyRemoval::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl LevelConfig {
    /// Copy with weight vectors and obstacle flags resized to their catalogs
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut obstacles = self.obstacles.clone();
        obstacles.resize(self.tiles.len(), false);
        Self {
            tiles: self.tiles.normalized(),
            enemies: self.enemies.normalized(),
            walls: self.walls.normalized(),
            obstacles,
            ..self.clone()
        }
    }

    /// Check parameters that would make generation meaningless or panic
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either grid extent is zero or exceeds [`MAX_GRID_DIMENSION`]
    /// - The floor count exceeds [`MAX_FLOORS`]
    /// - The total cell count does not fit in `usize`
    /// - The cell size, height offset or wall thickness is not finite
    /// - The wall thickness is negative
    /// - The pool size cap is zero
    pub fn validate(&self) -> Result<()> {
        if self.x_length == 0 {
            return Err(invalid_parameter(
                "x_length",
                &self.x_length,
                &"grid must be at least one cell wide",
            ));
        }
        if self.z_length == 0 {
            return Err(invalid_parameter(
                "z_length",
                &self.z_length,
                &"grid must be at least one cell deep",
            ));
        }
        for (parameter, extent) in [("x_length", self.x_length), ("z_length", self.z_length)] {
            if extent > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &extent,
                    &format!("exceeds maximum grid dimension {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.floors > MAX_FLOORS {
            return Err(invalid_parameter(
                "floors",
                &self.floors,
                &format!("exceeds maximum floor count {MAX_FLOORS}"),
            ));
        }
        if self.total_cells().is_none() {
            return Err(invalid_parameter(
                "floors",
                &self.floors,
                &"total cell count overflows",
            ));
        }
        if !self.cell_size.is_finite() {
            return Err(invalid_parameter(
                "cell_size",
                &self.cell_size,
                &"every component must be finite",
            ));
        }
        if !self.height_offset.is_finite() {
            return Err(invalid_parameter(
                "height_offset",
                &self.height_offset,
                &"must be finite",
            ));
        }
        if !self.wall_thickness.is_finite() || self.wall_thickness < 0.0 {
            return Err(invalid_parameter(
                "wall_thickness",
                &self.wall_thickness,
                &"must be finite and non-negative",
            ));
        }
        if self.pool.max_size == 0 {
            return Err(invalid_parameter(
                "max_pool_size",
                &self.pool.max_size,
                &"pools must be able to retain at least one instance",
            ));
        }
        Ok(())
    }

    /// Whether the tile archetype at `index` blocks enemies
    pub fn is_obstacle(&self, index: usize) -> bool {
        self.obstacles.get(index).as_deref() == Some(&true)
    }

    /// Number of cells on a single floor, saturating at `usize::MAX`
    pub const fn cells_per_floor(&self) -> usize {
        self.x_length.saturating_mul(self.z_length)
    }

    /// Number of cells across every floor, `None` on overflow
    pub const fn total_cells(&self) -> Option<usize> {
        match self.x_length.checked_mul(self.z_length) {
            Some(per_floor) => per_floor.checked_mul(self.floors),
            None => None,
        }
    }
}
