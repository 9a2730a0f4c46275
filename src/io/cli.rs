//! Command-line interface for generating levels against the recording factory

use bitvec::prelude::*;
use clap::Parser;
use glam::Vec3;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::algorithm::executor::LevelGenerator;
use crate::algorithm::placement::GenerationReport;
use crate::io::configuration::{
    Catalog, DEFAULT_CELL_SIZE, DEFAULT_ENEMY_BUDGET, DEFAULT_FLOORS, DEFAULT_MAX_POOL_SIZE,
    DEFAULT_POOL_CAPACITY, DEFAULT_SEED, DEFAULT_WALL_THICKNESS, DEFAULT_X_LENGTH,
    DEFAULT_Z_LENGTH, EnemyRemoval, LevelConfig, PoolSettings,
};
use crate::io::error::Result;
use crate::io::image::export_layout_as_png;
use crate::io::progress::ProgressManager;
use crate::io::recording::RecordingFactory;
use crate::pool::{CategoryPools, PoolStats};
use crate::spatial::layout::LevelLayout;

/// Archetype given on the command line as `name:weight[:obstacle]`
#[derive(Clone, Debug, PartialEq)]
pub struct ArchetypeSpec {
    /// Archetype name
    pub name: String,
    /// Spawn weight, `inf` forces selection
    pub weight: f32,
    /// Whether the archetype blocks enemies (tiles only)
    pub obstacle: bool,
}

impl FromStr for ArchetypeSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| format!("missing archetype name in '{s}'"))?
            .to_string();
        let weight = match parts.next() {
            Some(raw) => raw
                .parse::<f32>()
                .map_err(|e| format!("invalid weight '{raw}': {e}"))?,
            None => 1.0,
        };
        let obstacle = match parts.next() {
            Some("obstacle") => true,
            Some(flag) => return Err(format!("unknown flag '{flag}', expected 'obstacle'")),
            None => false,
        };
        if parts.next().is_some() {
            return Err(format!("too many fields in '{s}'"));
        }

        Ok(Self {
            name,
            weight,
            obstacle,
        })
    }
}

#[derive(Parser)]
#[command(name = "floorgen")]
#[command(
    author,
    version,
    about = "Generate pooled multi-floor grid levels"
)]
/// Command-line arguments for the level generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Cells along x
    #[arg(short = 'x', long, default_value_t = DEFAULT_X_LENGTH)]
    pub x_length: usize,

    /// Cells along z
    #[arg(short = 'z', long, default_value_t = DEFAULT_Z_LENGTH)]
    pub z_length: usize,

    /// Number of stacked floors
    #[arg(short, long, default_value_t = DEFAULT_FLOORS)]
    pub floors: usize,

    /// Edge length of a cell on every axis
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: f32,

    /// Vertical offset added to every floor
    #[arg(long, default_value_t = 0.0)]
    pub height_offset: f32,

    /// Tile archetype as name:weight[:obstacle], repeatable
    #[arg(short, long = "tile")]
    pub tiles: Vec<ArchetypeSpec>,

    /// Enemy archetype as name:weight, repeatable
    #[arg(short, long = "enemy")]
    pub enemies: Vec<ArchetypeSpec>,

    /// Maximum number of enemies per level
    #[arg(short, long, default_value_t = DEFAULT_ENEMY_BUDGET)]
    pub budget: usize,

    /// Enclose the grid with walls
    #[arg(short, long)]
    pub walls: bool,

    /// Wall archetype as name:weight, repeatable; primitive slabs when absent
    #[arg(long = "wall")]
    pub wall_archetypes: Vec<ArchetypeSpec>,

    /// Thickness used to offset pooled wall segments
    #[arg(long, default_value_t = DEFAULT_WALL_THICKNESS)]
    pub wall_thickness: f32,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of levels to generate with consecutive seeds
    #[arg(short, long, default_value_t = 1)]
    pub levels: usize,

    /// Release tiles and enemies after generating, then generate again
    #[arg(short, long)]
    pub recycle: bool,

    /// Maximum inactive instances retained per pool
    #[arg(long, default_value_t = DEFAULT_MAX_POOL_SIZE)]
    pub max_pool_size: usize,

    /// Initial free list allocation per pool
    #[arg(long, default_value_t = DEFAULT_POOL_CAPACITY)]
    pub pool_capacity: usize,

    /// Disable double release detection
    #[arg(long)]
    pub no_collection_checks: bool,

    /// Export a top-down PNG layout preview
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,

    /// Suppress progress output and informational logs
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Level configuration for one seed
    ///
    /// Built-in archetypes fill in for empty tile and enemy lists.
    pub fn level_config(&self, seed: u64) -> LevelConfig {
        let tiles = if self.tiles.is_empty() {
            default_tiles()
        } else {
            self.tiles.clone()
        };
        let enemies = if self.enemies.is_empty() {
            default_enemies()
        } else {
            self.enemies.clone()
        };

        let obstacles: BitVec = tiles.iter().map(|spec| spec.obstacle).collect();

        LevelConfig {
            x_length: self.x_length,
            z_length: self.z_length,
            floors: self.floors,
            height_offset: self.height_offset,
            cell_size: Vec3::splat(self.cell_size),
            tiles: catalog(&tiles),
            obstacles,
            enemies: catalog(&enemies),
            enemy_budget: self.budget,
            spawn_walls: self.walls,
            wall_thickness: self.wall_thickness,
            walls: catalog(&self.wall_archetypes),
            pool: PoolSettings {
                collection_checks: !self.no_collection_checks,
                default_capacity: self.pool_capacity,
                max_size: self.max_pool_size,
            },
            enemy_removal: EnemyRemoval::default(),
            seed,
        }
    }

    /// Output path for the level at `index` of the batch
    pub fn output_path(&self, index: usize) -> Option<PathBuf> {
        let output = self.output.as_ref()?;
        if self.levels <= 1 {
            return Some(output.clone());
        }

        let stem = output
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Some(output.with_file_name(format!("{stem}_{index}.png")))
    }
}

/// Tiles used when none are given
pub fn default_tiles() -> Vec<ArchetypeSpec> {
    vec![
        ArchetypeSpec {
            name: "floor".to_string(),
            weight: 1.0,
            obstacle: false,
        },
        ArchetypeSpec {
            name: "crate".to_string(),
            weight: 0.15,
            obstacle: true,
        },
    ]
}

/// Enemies used when none are given
pub fn default_enemies() -> Vec<ArchetypeSpec> {
    vec![ArchetypeSpec {
        name: "grunt".to_string(),
        weight: 1.0,
        obstacle: false,
    }]
}

fn catalog(specs: &[ArchetypeSpec]) -> Catalog {
    Catalog::weighted(specs.iter().map(|spec| (spec.name.clone(), spec.weight)))
}

/// Outcome of generating one level
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSummary {
    /// Seed the level was generated with
    pub seed: u64,
    /// Placement counts of the final generation pass
    pub report: GenerationReport,
    /// Pool statistics summed over all categories
    pub pool_stats: PoolStats,
    /// Instances alive in the factory
    pub live_instances: usize,
}

/// Runs a batch of level generations described by the CLI arguments
pub struct LevelRunner {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl LevelRunner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new(cli.levels)
        } else {
            ProgressManager::hidden(cli.levels)
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate every level of the batch
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a layout preview
    /// cannot be written
    pub fn run(&mut self) -> Result<Vec<LevelSummary>> {
        let mut summaries = Vec::with_capacity(self.cli.levels);

        for index in 0..self.cli.levels {
            let seed = self.cli.seed.wrapping_add(index as u64);
            let summary = self.run_level(index, seed)?;
            self.progress_manager.complete_level(&summary.report);
            summaries.push(summary);
        }

        self.progress_manager.finish();
        Ok(summaries)
    }

    fn run_level(&self, index: usize, seed: u64) -> Result<LevelSummary> {
        let config = self.cli.level_config(seed);
        let mut generator = LevelGenerator::new(config, RecordingFactory::new())?;
        generator.setup_pools();
        let mut report = generator.generate()?;

        if self.cli.recycle {
            generator.release_tiles()?;
            generator.release_enemies()?;
            generator.release_walls()?;
            report = generator.generate()?;
        }

        if let Some(path) = self.cli.output_path(index) {
            export_preview(&generator, &path)?;
        }

        let pool_stats = generator
            .pools()
            .map_or_else(PoolStats::default, CategoryPools::stats);

        Ok(LevelSummary {
            seed,
            report,
            pool_stats,
            live_instances: generator.factory().live_count(),
        })
    }
}

fn export_preview(generator: &LevelGenerator<RecordingFactory>, path: &Path) -> Result<()> {
    let config = generator.config();
    let layout = LevelLayout::capture(config, generator.registry());
    export_layout_as_png(
        &layout,
        config.spawn_walls,
        |archetype| config.is_obstacle(archetype),
        path,
    )
}

/// Render a one-line summary for a generated level
pub fn format_summary(summary: &LevelSummary) -> String {
    let report = &summary.report;
    format!(
        "seed {}: {} tiles, {} enemies, {} walls, {} slabs, {} skipped | pools: {} created, {} reused, {} destroyed | {} live instances",
        summary.seed,
        report.tiles,
        report.enemies,
        report.walls,
        report.slabs,
        report.skipped_tiles + report.skipped_enemies + report.skipped_walls,
        summary.pool_stats.created,
        summary.pool_stats.reused,
        summary.pool_stats.destroyed,
        summary.live_instances,
    )
}
