//! View models handed to the GUI collaborator and the tile-pick payload
//! codec. Presentation (widget layout, icons, lore text) is entirely the
//! host's concern; the core supplies the data each screen needs.

use glam::{I64Vec2, IVec2};

use overmap_core::grid::neighbor_grid;
use overmap_core::scale::{Scale, ALL_SCALES};
use overmap_core::types::{TileCoordinate, WorldId};

use crate::registry::TileRegistry;

/// One entry of the scale-selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleOption {
    pub ordinal: u8,
    pub factor: i64,
    pub coverage: i64,
}

/// The five scale options, in ordinal order.
pub fn scale_options() -> Vec<ScaleOption> {
    ALL_SCALES
        .iter()
        .map(|s| ScaleOption {
            ordinal: s.ordinal(),
            factor: s.factor(),
            coverage: s.coverage(),
        })
        .collect()
}

/// Materialization status of one grid cell. The focal cell reports `Focus`
/// regardless of whether its tile is already generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Focus,
    Generated,
    Ungenerated,
}

/// One cell of the tile browsing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub offset: IVec2,
    pub center: I64Vec2,
    pub status: CellStatus,
}

/// The grid screen: a block of cells centered on the viewer's tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub world: WorldId,
    pub scale: Scale,
    pub cells: Vec<GridCell>,
}

/// Build the grid view around a focal position, marking each cell with its
/// registry status.
pub fn build_grid_view(
    registry: &TileRegistry,
    world: &WorldId,
    focal: I64Vec2,
    scale: Scale,
    radius: i32,
) -> GridView {
    let cells = neighbor_grid(focal, scale, radius)
        .into_iter()
        .map(|n| {
            let status = if n.is_focus() {
                CellStatus::Focus
            } else if registry.is_recorded(&TileCoordinate {
                world: world.clone(),
                center: n.center,
                scale,
            }) {
                CellStatus::Generated
            } else {
                CellStatus::Ungenerated
            };
            GridCell {
                offset: n.offset,
                center: n.center,
                status,
            }
        })
        .collect();

    GridView {
        world: world.clone(),
        scale,
        cells,
    }
}

/// A tile selection sent back by the GUI collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilePick {
    pub world: WorldId,
    pub center: I64Vec2,
    pub scale: Scale,
}

impl TilePick {
    /// Wire form stored on grid widgets: `world,centerX,centerZ,ordinal`.
    pub fn encode(&self) -> String {
        format!(
            "{},{},{},{}",
            self.world.as_str(),
            self.center.x,
            self.center.y,
            self.scale.ordinal()
        )
    }

    /// Parse the wire form. Any malformed payload yields `None`, which
    /// session handling treats as a cancel.
    pub fn parse(payload: &str) -> Option<Self> {
        let parts: Vec<&str> = payload.split(',').collect();
        if parts.len() < 4 {
            return None;
        }
        let center_x: i64 = parts[1].parse().ok()?;
        let center_z: i64 = parts[2].parse().ok()?;
        let ordinal: i32 = parts[3].parse().ok()?;
        Some(Self {
            world: WorldId::new(parts[0]),
            center: I64Vec2::new(center_x, center_z),
            scale: Scale::from_ordinal(ordinal),
        })
    }

    pub fn tile(&self) -> TileCoordinate {
        TileCoordinate {
            world: self.world.clone(),
            center: self.center,
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_options_cover_all_ordinals() {
        let options = scale_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].factor, 1);
        assert_eq!(options[0].coverage, 128);
        assert_eq!(options[4].factor, 16);
        assert_eq!(options[4].coverage, 2048);
    }

    #[test]
    fn test_grid_view_statuses() {
        let mut registry = TileRegistry::new();
        let world = WorldId::new("overworld");
        let scale = Scale::Closest;

        // Record the tile one step east of the focal tile at (64, 64).
        registry.record(&TileCoordinate {
            world: world.clone(),
            center: I64Vec2::new(192, 64),
            scale,
        });

        let view = build_grid_view(&registry, &world, I64Vec2::new(10, 10), scale, 2);
        assert_eq!(view.cells.len(), 25);

        let focus = view
            .cells
            .iter()
            .find(|c| c.offset == IVec2::ZERO)
            .expect("focal cell");
        assert_eq!(focus.status, CellStatus::Focus);
        assert_eq!(focus.center, I64Vec2::new(64, 64));

        let east = view
            .cells
            .iter()
            .find(|c| c.offset == IVec2::new(1, 0))
            .expect("east cell");
        assert_eq!(east.status, CellStatus::Generated);

        let west = view
            .cells
            .iter()
            .find(|c| c.offset == IVec2::new(-1, 0))
            .expect("west cell");
        assert_eq!(west.status, CellStatus::Ungenerated);
    }

    #[test]
    fn test_pick_roundtrip() {
        let pick = TilePick {
            world: WorldId::new("overworld"),
            center: I64Vec2::new(-192, 576),
            scale: Scale::Normal,
        };
        assert_eq!(pick.encode(), "overworld,-192,576,2");
        assert_eq!(TilePick::parse(&pick.encode()), Some(pick));
    }

    #[test]
    fn test_pick_parse_rejects_malformed() {
        assert_eq!(TilePick::parse(""), None);
        assert_eq!(TilePick::parse("overworld,10,20"), None);
        assert_eq!(TilePick::parse("overworld,ten,20,0"), None);
        assert_eq!(TilePick::parse("overworld,10,20,zero"), None);
    }

    #[test]
    fn test_pick_parse_normalizes_scale() {
        let pick = TilePick::parse("overworld,64,64,9").expect("parses");
        assert_eq!(pick.scale, Scale::Closest);
    }
}
