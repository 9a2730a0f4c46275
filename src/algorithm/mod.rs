/// Level generator lifecycle: pool setup, generation and release
pub mod executor;
/// Grid sweep placing tiles and seeding enemies
pub mod placement;
/// Weighted archetype selection
pub mod selection;
/// Perimeter wall construction
pub mod walls;
