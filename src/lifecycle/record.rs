//! Placement records linking live instances to their pools

use std::fmt;

use crate::spatial::transform::Transform;

/// Identifier stored in a placement record
///
/// Signed because left and right wall runs start one step before the grid.
pub type PlacementId = i64;

/// Bookkeeping category of a placed instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Floor tiles covering the grid
    Tile,
    /// Enemies seeded on walkable tiles
    Enemy,
    /// Pooled perimeter wall segments
    Wall,
}

impl Category {
    /// All categories in generation order
    pub const ALL: [Self; 3] = [Self::Tile, Self::Enemy, Self::Wall];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Tile => "tile",
            Self::Enemy => "enemy",
            Self::Wall => "wall",
        };
        f.write_str(name)
    }
}

/// One of the four sides enclosing the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallSide {
    /// Negative `x` edge
    Left,
    /// Positive `x` edge
    Right,
    /// Negative `z` edge
    Back,
    /// Positive `z` edge
    Front,
}

impl WallSide {
    /// Sides in the order walls are built
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Back, Self::Front];

    /// Whether the side runs along the `z` axis
    pub const fn runs_along_z(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for WallSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Back => "back",
            Self::Front => "front",
        };
        f.write_str(name)
    }
}

/// Grid cell coordinates of a tile or enemy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Floor index
    pub floor: usize,
    /// Column along `x`
    pub x: usize,
    /// Row along `z`
    pub z: usize,
}

/// What a placed instance is and where it belongs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Tile covering a grid cell
    Tile(Cell),
    /// Enemy standing on a grid cell
    Enemy(Cell),
    /// Wall segment on one side of the perimeter
    Wall(WallSide),
}

impl Role {
    /// Registry category for this role
    pub const fn category(&self) -> Category {
        match self {
            Self::Tile(_) => Category::Tile,
            Self::Enemy(_) => Category::Enemy,
            Self::Wall(_) => Category::Wall,
        }
    }

    /// Grid cell for tiles and enemies
    pub const fn cell(&self) -> Option<Cell> {
        match self {
            Self::Tile(cell) | Self::Enemy(cell) => Some(*cell),
            Self::Wall(_) => None,
        }
    }
}

/// Metadata handed to the factory when an instance is placed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleTag {
    /// Role of the instance
    pub role: Role,
    /// Archetype index of the owning pool
    pub pool_index: usize,
    /// Identifier of the placement record
    pub id: PlacementId,
}

/// Active instance together with everything needed to release it
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRecord<H> {
    /// Handle of the active instance
    pub handle: H,
    /// Archetype index of the pool that owns the instance
    pub pool_index: usize,
    /// Record identifier (see [`PlacementId`])
    pub id: PlacementId,
    /// Role and placement metadata
    pub role: Role,
    /// Transform applied at placement
    pub transform: Transform,
}

impl<H> PlacementRecord<H> {
    /// Registry category of the record
    pub const fn category(&self) -> Category {
        self.role.category()
    }

    /// Tag describing this record
    pub const fn tag(&self) -> RoleTag {
        RoleTag {
            role: self.role,
            pool_index: self.pool_index,
            id: self.id,
        }
    }
}
