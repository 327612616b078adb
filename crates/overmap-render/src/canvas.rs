use overmap_core::config::MapConfig;
use overmap_core::constants::{CANVAS_PIXELS, CANVAS_SIZE};
use overmap_core::types::Marker;

/// Capability over the 128x128 indexed-color surface owned by the host.
/// `get`/`set` coordinates are pre-validated to `[0, 128)` by callers.
pub trait PixelCanvas {
    fn get(&self, x: u32, y: u32) -> u8;
    fn set(&mut self, x: u32, y: u32, color: u8);

    /// Remove transient cursor annotations unrelated to the pixel grid.
    /// Default no-op for hosts without a cursor layer.
    fn clear_cursor_overlays(&mut self) {}
}

/// Plain in-memory canvas. Hosts with their own surface implement
/// [`PixelCanvas`] directly; this one backs tests and the bench runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferCanvas {
    pixels: Vec<u8>,
}

impl Default for BufferCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferCanvas {
    pub fn new() -> Self {
        Self::filled(0)
    }

    pub fn filled(color: u8) -> Self {
        Self {
            pixels: vec![color; CANVAS_PIXELS as usize],
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl PixelCanvas for BufferCanvas {
    fn get(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y * CANVAS_SIZE + x) as usize]
    }

    fn set(&mut self, x: u32, y: u32, color: u8) {
        self.pixels[(y * CANVAS_SIZE + x) as usize] = color;
    }
}

/// Identifier the host assigns to an installed overlay handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerId(pub u32);

/// A per-tile overlay renderer registered with the canvas owner.
/// Handlers are identified by a stable capability tag, never by runtime
/// type inspection.
pub trait OverlayHandler {
    fn tag(&self) -> &'static str;

    /// Render one frame of overlays. `markers` is this tick's candidate
    /// set from the entity-enumeration collaborator.
    fn render(&mut self, canvas: &mut dyn PixelCanvas, markers: &[Marker], config: &MapConfig);
}

/// The canvas owner's handler registration surface.
pub trait OverlayHost {
    /// Installed handlers as (id, tag) pairs.
    fn list_handlers(&self) -> Vec<(HandlerId, String)>;
    fn remove_handler(&mut self, id: HandlerId);
    fn add_handler(&mut self, handler: Box<dyn OverlayHandler>);
}

/// Install a handler, first removing any already-installed handler that
/// carries the same tag. Reinstalling after a reload therefore never
/// stacks a second copy.
pub fn install_handler(host: &mut dyn OverlayHost, handler: Box<dyn OverlayHandler>) {
    let tag = handler.tag();
    let stale: Vec<HandlerId> = host
        .list_handlers()
        .into_iter()
        .filter(|(_, t)| t == tag)
        .map(|(id, _)| id)
        .collect();
    for id in stale {
        log::debug!("replacing overlay handler tagged '{tag}'");
        host.remove_handler(id);
    }
    host.add_handler(handler);
}
