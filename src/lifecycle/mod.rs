//! Placement records and the registry that releases them

/// Placement records, roles and categories
pub mod record;
/// Ordered per-category record storage with bulk and single release
pub mod registry;

pub use record::{Category, PlacementId, PlacementRecord, Role, RoleTag, WallSide};
pub use registry::{LifecycleRegistry, ReleaseSummary};
