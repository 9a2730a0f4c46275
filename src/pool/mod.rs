//! Recycling instance pools
//!
//! Each archetype owns one pool; a category's pools are grouped in a
//! [`set::PoolSet`] and addressed by archetype index.

/// Fixed-capacity pool for a single archetype
pub mod recycling;
/// Per-category collection of pools
pub mod set;

pub use recycling::{PoolStats, RecyclingPool, ReleaseOutcome};
pub use set::{CategoryPools, PoolSet};
