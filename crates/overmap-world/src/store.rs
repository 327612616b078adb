use std::collections::HashMap;

use overmap_core::scale::Scale;
use overmap_core::types::UserId;

use crate::registry::TileRegistry;

/// Per-user browsing state. Created on first grid interaction, reset to
/// empty on reload/shutdown.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    /// Zoom level chosen for this session; cleared when the grid closes.
    pub selected_scale: Option<Scale>,
    /// Set after relocating into an ungenerated tile, cleared on confirm.
    pub pending_confirmation: bool,
}

/// Explicitly constructed container for all session-scoped mutable state:
/// per-user sessions, the tile registry, and the map-creation counter.
/// Owned by the host integration layer and passed by reference into every
/// session operation; there is no ambient global state.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<UserId, SessionState>,
    registry: TileRegistry,
    creation_counter: u32,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_scale(&self, user: &UserId) -> Option<Scale> {
        self.sessions.get(user).and_then(|s| s.selected_scale)
    }

    pub fn set_selected_scale(&mut self, user: &UserId, scale: Scale) {
        self.sessions.entry(user.clone()).or_default().selected_scale = Some(scale);
    }

    /// Ends the scale session; the next grid interaction re-selects.
    pub fn clear_selected_scale(&mut self, user: &UserId) {
        if let Some(state) = self.sessions.get_mut(user) {
            state.selected_scale = None;
        }
    }

    pub fn is_pending_confirmation(&self, user: &UserId) -> bool {
        self.sessions
            .get(user)
            .map(|s| s.pending_confirmation)
            .unwrap_or(false)
    }

    pub fn set_pending_confirmation(&mut self, user: &UserId, pending: bool) {
        self.sessions
            .entry(user.clone())
            .or_default()
            .pending_confirmation = pending;
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TileRegistry {
        &mut self.registry
    }

    /// Generate the display label for a newly materialized map, advancing
    /// the creation counter.
    pub fn next_map_label(&mut self, scale: Scale) -> String {
        self.creation_counter += 1;
        format!(
            "Live Map #{} (Scale {})",
            self.creation_counter,
            scale.ordinal()
        )
    }

    /// Drop all sessions, all tile records, and the creation counter.
    /// Invoked on configuration reload and shutdown.
    pub fn reset(&mut self) {
        self.sessions.clear();
        self.registry.clear();
        self.creation_counter = 0;
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}
