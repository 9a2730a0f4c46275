//! Pooled procedural layout of multi-floor grid levels
//!
//! Tiles are placed across every cell of a 3D grid, enemies are seeded on
//! walkable tiles under a spawn budget, and the grid can be enclosed with
//! perimeter walls. Every pooled instance is drawn from a fixed-capacity
//! recycling pool keyed by archetype and created through an injected
//! [`InstanceFactory`].

#![forbid(unsafe_code)]

/// Weighted selection, grid placement, walls and the generator lifecycle
pub mod algorithm;
/// Configuration, host interfaces and input/output
pub mod io;
/// Placement records and their release bookkeeping
pub mod lifecycle;
/// Recycling instance pools
pub mod pool;
/// Transforms and layout snapshots
pub mod spatial;

pub use algorithm::executor::LevelGenerator;
pub use io::configuration::{Catalog, LevelConfig};
pub use io::error::{LevelError, Result};
pub use io::factory::InstanceFactory;
