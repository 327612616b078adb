pub mod canvas;
pub mod font;
pub mod overlay;
pub mod tracker;

pub use canvas::{install_handler, BufferCanvas, OverlayHandler, OverlayHost, PixelCanvas};
pub use tracker::{MarkerTracker, TileView};
