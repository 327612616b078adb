//! Tile-grid coordinate arithmetic on the (x, z) map plane.
//!
//! World positions use `I64Vec2` where `.x` is the world X axis and `.y`
//! carries Z. All math is integer-exact; `div_euclid` floors toward
//! negative infinity so tiles on the negative side of an axis snap the same
//! way as positive ones.

use glam::{I64Vec2, IVec2};

use crate::scale::Scale;

/// Snap a world position to the center of its enclosing tile at `scale`.
///
/// The tile origin is the coverage-aligned corner at or below the position;
/// the center sits half a coverage further along both axes.
pub fn snap_to_tile_center(world: I64Vec2, scale: Scale) -> I64Vec2 {
    let coverage = scale.coverage();
    let origin = I64Vec2::new(
        world.x.div_euclid(coverage) * coverage,
        world.y.div_euclid(coverage) * coverage,
    );
    origin + I64Vec2::splat(coverage / 2)
}

/// One cell of a browsing grid: its offset from the focal tile and the
/// tile center it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridNeighbor {
    /// Offset in whole tiles from the focal tile. `(0, 0)` is the focal
    /// tile itself.
    pub offset: IVec2,
    pub center: I64Vec2,
}

impl GridNeighbor {
    pub fn is_focus(&self) -> bool {
        self.offset == IVec2::ZERO
    }
}

/// Compute the `(2r+1)^2` tile centers around a focal position.
///
/// Neighbors are derived from the snapped focal center plus whole-coverage
/// offsets rather than re-snapping each neighbor, so the grid is contiguous
/// and gap-free no matter where inside the focal tile the position falls.
/// Rows are emitted in z-major order, matching the grid presentation.
pub fn neighbor_grid(focal: I64Vec2, scale: Scale, radius: i32) -> Vec<GridNeighbor> {
    let coverage = scale.coverage();
    let focal_center = snap_to_tile_center(focal, scale);

    let edge = (2 * radius + 1) as usize;
    let mut cells = Vec::with_capacity(edge * edge);
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            cells.push(GridNeighbor {
                offset: IVec2::new(dx, dz),
                center: focal_center + I64Vec2::new(dx as i64 * coverage, dz as i64 * coverage),
            });
        }
    }
    cells
}
