//! Spatial data structures
//!
//! This module contains:
//! - Instance transforms built on `glam`
//! - Dense per-cell layout snapshots built on `ndarray`

/// Per-cell snapshot of a generated level
pub mod layout;
/// Position and yaw of a placed instance
pub mod transform;

pub use layout::LevelLayout;
pub use transform::Transform;
