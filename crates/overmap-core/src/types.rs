use glam::I64Vec2;

use crate::grid::snap_to_tile_center;
use crate::scale::Scale;

/// Identifier of the world (dimension) a tile or marker belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldId(pub String);

impl WorldId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stable identity of a user driving a map session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// A snapped tile: its world, center point on the (x, z) plane, and scale.
///
/// Centers are only ever produced by snapping, so any two points inside one
/// tile footprint yield an identical `TileCoordinate`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileCoordinate {
    pub world: WorldId,
    pub center: I64Vec2,
    pub scale: Scale,
}

impl TileCoordinate {
    /// Snap an arbitrary world position to the enclosing tile at `scale`.
    pub fn snapped(world: WorldId, position: I64Vec2, scale: Scale) -> Self {
        Self {
            world,
            center: snap_to_tile_center(position, scale),
            scale,
        }
    }
}

/// Opaque handle to a materialized map artifact, issued by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileHandle(pub u32);

/// One tracked entity for one render frame. Supplied per tick by the
/// entity-enumeration collaborator; never persisted.
#[derive(Debug, Clone)]
pub struct Marker {
    pub world: WorldId,
    /// Block position: x/z on the map plane, y is elevation.
    pub x: i64,
    pub y: i64,
    pub z: i64,
    /// Facing in degrees; not required to be normalized.
    pub yaw: f32,
    /// Stable identity used for color assignment.
    pub identity: String,
    /// Display label, possibly carrying formatting codes.
    pub label: String,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapped_tiles_equal_within_footprint() {
        let world = WorldId::new("overworld");
        let a = TileCoordinate::snapped(world.clone(), I64Vec2::new(130, 5), Scale::Closest);
        let b = TileCoordinate::snapped(world.clone(), I64Vec2::new(191, 120), Scale::Closest);
        assert_eq!(a, b);
        assert_eq!(a.center, I64Vec2::new(192, 64));
    }

    #[test]
    fn test_snapped_tiles_differ_across_scales() {
        let world = WorldId::new("overworld");
        let close = TileCoordinate::snapped(world.clone(), I64Vec2::ZERO, Scale::Closest);
        let far = TileCoordinate::snapped(world, I64Vec2::ZERO, Scale::Farthest);
        assert_ne!(close, far);
    }
}
