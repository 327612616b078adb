//! The per-user map session state machine.
//!
//! Interactions arrive from the GUI collaborator (open/pick/confirm/close
//! events); each operation consults the store and returns the next screen
//! to present. Tile materialization is delegated to the host through
//! [`TileMaterializer`].

use glam::I64Vec2;
use thiserror::Error;

use overmap_core::constants::GRID_RADIUS;
use overmap_core::grid::snap_to_tile_center;
use overmap_core::scale::{Scale, CREATION_SCALE};
use overmap_core::types::{TileCoordinate, TileHandle, UserId, WorldId};

use crate::gui::{build_grid_view, scale_options, GridView, ScaleOption, TilePick};
use crate::store::SessionStore;

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("tile materialization failed: {0}")]
    Failed(String),
}

/// Host collaborator that creates the durable map artifact for a tile and
/// returns the handle used to hand it to the requesting user.
pub trait TileMaterializer {
    fn materialize(&mut self, tile: &TileCoordinate) -> Result<TileHandle, MaterializeError>;
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

/// A freshly materialized map: the host handle plus its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTile {
    pub handle: TileHandle,
    pub label: String,
}

/// What the host should present or perform after a session interaction.
#[derive(Debug)]
pub enum SessionResponse {
    /// Show the zoom selection screen.
    ShowScaleOptions(Vec<ScaleOption>),
    /// Show the tile browsing grid.
    ShowGrid(GridView),
    /// Re-present the render-confirmation prompt.
    ShowConfirmation,
    /// Move the user's view to the tile center at surface height.
    /// `created` is set when this pick materialized a new map.
    Relocate {
        tile: TileCoordinate,
        created: Option<CreatedTile>,
        awaiting_confirmation: bool,
    },
    /// The interaction was a no-op (malformed or stale payload).
    Cancelled,
    /// The session ended; a fresh interaction restarts at scale selection.
    Closed,
}

/// Entry point for a grid interaction.
///
/// A pending confirmation always takes priority over the grid; otherwise a
/// stored scale jumps straight to browsing and a missing one asks for the
/// zoom level first.
pub fn open_grid(
    store: &mut SessionStore,
    user: &UserId,
    world: &WorldId,
    position: I64Vec2,
) -> SessionResponse {
    if store.is_pending_confirmation(user) {
        return SessionResponse::ShowConfirmation;
    }

    match store.selected_scale(user) {
        Some(scale) => SessionResponse::ShowGrid(build_grid_view(
            store.registry(),
            world,
            position,
            scale,
            GRID_RADIUS,
        )),
        None => SessionResponse::ShowScaleOptions(scale_options()),
    }
}

/// A zoom pick from the selection screen. The ordinal is normalized, stored
/// for the rest of the session, and the grid opens at that scale.
pub fn select_scale(
    store: &mut SessionStore,
    user: &UserId,
    ordinal: i32,
    world: &WorldId,
    position: I64Vec2,
) -> SessionResponse {
    let scale = Scale::from_ordinal(ordinal);
    store.set_selected_scale(user, scale);
    SessionResponse::ShowGrid(build_grid_view(
        store.registry(),
        world,
        position,
        scale,
        GRID_RADIUS,
    ))
}

/// A tile pick from the grid.
///
/// `None` (a malformed payload) cancels. A recorded tile relocates the view
/// with no confirmation gate. An unrecorded tile is materialized first; on
/// failure nothing is recorded and the session stays in browsing, on
/// success the tile is recorded and the user must confirm after the area
/// has rendered.
pub fn select_tile(
    store: &mut SessionStore,
    user: &UserId,
    pick: Option<TilePick>,
    materializer: &mut dyn TileMaterializer,
) -> Result<SessionResponse, SessionError> {
    let Some(pick) = pick else {
        return Ok(SessionResponse::Cancelled);
    };
    let tile = pick.tile();

    if store.registry().is_recorded(&tile) {
        return Ok(SessionResponse::Relocate {
            tile,
            created: None,
            awaiting_confirmation: false,
        });
    }

    let handle = materializer.materialize(&tile)?;
    store.registry_mut().record(&tile);
    let label = store.next_map_label(tile.scale);
    store.set_pending_confirmation(user, true);
    log::info!(
        "materialized tile at ({}, {}) scale {} in {}: {}",
        tile.center.x,
        tile.center.y,
        tile.scale.ordinal(),
        tile.world.as_str(),
        label
    );

    Ok(SessionResponse::Relocate {
        tile,
        created: Some(CreatedTile { handle, label }),
        awaiting_confirmation: true,
    })
}

/// Explicit confirmation that the relocated tile has rendered. Clears the
/// gate and re-presents the grid recentered on the user's new position; if
/// the stored scale was lost in the meantime, the session closes instead.
pub fn confirm(
    store: &mut SessionStore,
    user: &UserId,
    world: &WorldId,
    position: I64Vec2,
) -> SessionResponse {
    store.set_pending_confirmation(user, false);

    match store.selected_scale(user) {
        Some(scale) => SessionResponse::ShowGrid(build_grid_view(
            store.registry(),
            world,
            position,
            scale,
            GRID_RADIUS,
        )),
        None => SessionResponse::Closed,
    }
}

/// Explicit session close from the grid. Clears the stored scale so the
/// next interaction restarts at scale selection.
pub fn close_grid(store: &mut SessionStore, user: &UserId) -> SessionResponse {
    store.clear_selected_scale(user);
    SessionResponse::Closed
}

/// Direct tile creation at the caller's position (no grid browsing).
///
/// The center always snaps on the max-zoom grid regardless of the
/// requested render scale, so directly created maps align with the scale-0
/// tile lattice.
pub fn create_tile_at(
    store: &mut SessionStore,
    world: &WorldId,
    position: I64Vec2,
    requested: Option<Scale>,
    materializer: &mut dyn TileMaterializer,
) -> Result<(TileCoordinate, CreatedTile), SessionError> {
    let scale = requested.unwrap_or(CREATION_SCALE);
    let tile = TileCoordinate {
        world: world.clone(),
        center: snap_to_tile_center(position, CREATION_SCALE),
        scale,
    };

    let handle = materializer.materialize(&tile)?;
    store.registry_mut().record(&tile);
    let label = store.next_map_label(scale);
    log::info!(
        "created map at ({}, {}) scale {}: {}",
        tile.center.x,
        tile.center.y,
        scale.ordinal(),
        label
    );

    Ok((tile, CreatedTile { handle, label }))
}
