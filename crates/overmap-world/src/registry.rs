use std::collections::HashSet;

use overmap_core::scale::Scale;
use overmap_core::types::{TileCoordinate, WorldId};

/// Deduplication identity of one recorded tile.
/// Scale is part of the key: the same center materialized at two zoom
/// levels produces two independent records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub world: WorldId,
    pub center_x: i64,
    pub center_z: i64,
    pub scale: Scale,
}

impl From<&TileCoordinate> for TileKey {
    fn from(tile: &TileCoordinate) -> Self {
        Self {
            world: tile.world.clone(),
            center_x: tile.center.x,
            center_z: tile.center.y,
            scale: tile.scale,
        }
    }
}

/// Set of tiles that already have a materialized map artifact.
/// Append-mostly and volatile: lives for the process run, emptied on
/// configuration reload. Callers serialize access (single-threaded event
/// delivery, or a mutex around the owning store when ported to threads).
#[derive(Debug, Default)]
pub struct TileRegistry {
    recorded: HashSet<TileKey>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tile as materialized. Idempotent.
    pub fn record(&mut self, tile: &TileCoordinate) {
        self.recorded.insert(TileKey::from(tile));
    }

    pub fn is_recorded(&self, tile: &TileCoordinate) -> bool {
        self.recorded.contains(&TileKey::from(tile))
    }

    /// Forget every record (configuration reload).
    pub fn clear(&mut self) {
        self.recorded.clear();
    }

    pub fn len(&self) -> usize {
        self.recorded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::I64Vec2;

    fn tile(world: &str, x: i64, z: i64, scale: Scale) -> TileCoordinate {
        TileCoordinate {
            world: WorldId::new(world),
            center: I64Vec2::new(x, z),
            scale,
        }
    }

    #[test]
    fn test_record_and_lookup() {
        let mut registry = TileRegistry::new();
        registry.record(&tile("overworld", 10, 20, Scale::Closest));

        assert!(registry.is_recorded(&tile("overworld", 10, 20, Scale::Closest)));
        assert!(!registry.is_recorded(&tile("overworld", 10, 21, Scale::Closest)));
        assert!(!registry.is_recorded(&tile("nether", 10, 20, Scale::Closest)));
    }

    #[test]
    fn test_record_idempotent() {
        let mut registry = TileRegistry::new();
        registry.record(&tile("overworld", 64, 64, Scale::Close));
        registry.record(&tile("overworld", 64, 64, Scale::Close));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_scales_record_independently() {
        let mut registry = TileRegistry::new();
        registry.record(&tile("overworld", 64, 64, Scale::Closest));

        assert!(!registry.is_recorded(&tile("overworld", 64, 64, Scale::Farthest)));
        registry.record(&tile("overworld", 64, 64, Scale::Farthest));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut registry = TileRegistry::new();
        registry.record(&tile("overworld", 10, 20, Scale::Closest));
        registry.clear();
        assert!(!registry.is_recorded(&tile("overworld", 10, 20, Scale::Closest)));
        assert!(registry.is_empty());
    }
}
