//! Perimeter walls enclosing the generated grid
//!
//! Two modes exist. With wall archetypes configured, every side is lined with
//! pooled segments, one per cell step. Without them, four permanent slabs are
//! built that exactly span the grid footprint.
//!
//! Tiles are centered on their cell coordinates, so the footprint spans
//! `[-cell.x / 2, x_length * cell.x - cell.x / 2]` along `x` and the same
//! pattern along `z`.

use glam::Vec3;
use rand::Rng;
use std::ops::Range;
use tracing::{debug, warn};

use crate::algorithm::placement::{GenerationReport, place};
use crate::algorithm::selection::select_weighted_index;
use crate::io::configuration::{LevelConfig, SLAB_THICKNESS};
use crate::io::error::Result;
use crate::io::factory::InstanceFactory;
use crate::lifecycle::record::{PlacementId, PlacementRecord, Role, WallSide};
use crate::lifecycle::registry::LifecycleRegistry;
use crate::pool::PoolSet;
use crate::spatial::transform::Transform;

/// Yaw of segments running along `z`
pub const SIDE_WALL_YAW: f32 = -90.0;
/// Yaw of segments running along `x`
pub const END_WALL_YAW: f32 = 0.0;

/// Permanent axis-aligned wall volume, never pooled
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSlab {
    /// Side of the grid the slab closes
    pub side: WallSide,
    /// Center of the volume
    pub center: Vec3,
    /// Full extent along each axis
    pub size: Vec3,
}

impl WallSlab {
    /// Minimum corner of the volume
    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    /// Maximum corner of the volume
    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }
}

/// Builds the perimeter for one configuration
pub struct WallBuilder<'a> {
    config: &'a LevelConfig,
}

impl<'a> WallBuilder<'a> {
    /// Create a builder for a normalized, validated configuration
    pub const fn new(config: &'a LevelConfig) -> Self {
        Self { config }
    }

    /// Whether pooled segments are used instead of primitive slabs
    pub const fn uses_archetypes(&self) -> bool {
        !self.config.walls.is_empty()
    }

    /// Line every side with pooled wall segments
    ///
    /// Record identifiers are the step along the side, so they repeat across
    /// sides; the side itself is kept in the record role.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected archetype index addresses no pool,
    /// which cannot happen for a normalized configuration
    pub fn build_segments<F, R>(
        &self,
        pools: &mut PoolSet<F::Handle>,
        registry: &mut LifecycleRegistry<F::Handle>,
        factory: &mut F,
        rng: &mut R,
        report: &mut GenerationReport,
    ) -> Result<()>
    where
        F: InstanceFactory,
        R: Rng + ?Sized,
    {
        for side in WallSide::ALL {
            for step in self.steps(side) {
                let Some(wall_index) = select_weighted_index(&self.config.walls.weights, rng)
                else {
                    report.skipped_walls += 1;
                    warn!(%side, step, "no usable wall weight; segment left empty");
                    continue;
                };

                let handle = pools.get(wall_index, factory)?;
                place(
                    PlacementRecord {
                        handle,
                        pool_index: wall_index,
                        id: step,
                        role: Role::Wall(side),
                        transform: self.segment_transform(side, step),
                    },
                    registry,
                    factory,
                );
                report.walls += 1;
            }
        }

        debug!(segments = report.walls, "built pooled perimeter");
        Ok(())
    }

    /// Steps along a side
    ///
    /// Left and right overlap the corners by one cell on each end.
    pub const fn steps(&self, side: WallSide) -> Range<PlacementId> {
        if side.runs_along_z() {
            -1..self.config.z_length as PlacementId + 1
        } else {
            0..self.config.x_length as PlacementId
        }
    }

    /// Transform of the pooled segment at `step` on `side`
    pub fn segment_transform(&self, side: WallSide, step: PlacementId) -> Transform {
        let cell = self.config.cell_size;
        let half_thickness = self.config.wall_thickness * 0.5;
        let x_span = self.config.x_length as f32 * cell.x;
        let z_span = self.config.z_length as f32 * cell.z;
        let step = step as f32;
        let y = self.config.height_offset;

        match side {
            WallSide::Left | WallSide::Right => {
                let x = if side == WallSide::Left {
                    -cell.x * 0.5 - half_thickness
                } else {
                    -cell.x * 0.5 + x_span + half_thickness
                };
                let z = step.mul_add(cell.z, -cell.z * 0.5) + half_thickness;
                Transform::new(Vec3::new(x, y, z), SIDE_WALL_YAW)
            }
            WallSide::Back | WallSide::Front => {
                let x = step.mul_add(cell.x, -cell.x * 0.5) + half_thickness;
                let z = if side == WallSide::Back {
                    -cell.z * 0.5 - half_thickness
                } else {
                    -cell.z * 0.5 + z_span + half_thickness
                };
                Transform::new(Vec3::new(x, y, z), END_WALL_YAW)
            }
        }
    }

    /// Four slabs exactly enclosing the grid footprint
    pub fn slabs(&self) -> [WallSlab; 4] {
        let cell = self.config.cell_size;
        let x_span = self.config.x_length as f32 * cell.x;
        let z_span = self.config.z_length as f32 * cell.z;
        let half = SLAB_THICKNESS * 0.5;

        let min_x = -cell.x * 0.5;
        let max_x = min_x + x_span;
        let min_z = -cell.z * 0.5;
        let max_z = min_z + z_span;
        let center_x = min_x + x_span * 0.5;
        let center_z = min_z + z_span * 0.5;
        let y = cell.y.mul_add(0.5, self.config.height_offset);

        let along_z = Vec3::new(SLAB_THICKNESS, cell.y, z_span);
        let along_x = Vec3::new(x_span, cell.y, SLAB_THICKNESS);

        [
            WallSlab {
                side: WallSide::Left,
                center: Vec3::new(min_x - half, y, center_z),
                size: along_z,
            },
            WallSlab {
                side: WallSide::Right,
                center: Vec3::new(max_x + half, y, center_z),
                size: along_z,
            },
            WallSlab {
                side: WallSide::Back,
                center: Vec3::new(center_x, y, min_z - half),
                size: along_x,
            },
            WallSlab {
                side: WallSide::Front,
                center: Vec3::new(center_x, y, max_z + half),
                size: along_x,
            },
        ]
    }
}
