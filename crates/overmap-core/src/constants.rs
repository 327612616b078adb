//! Single source of truth for shared constants. These values are fixed by
//! the map canvas format and used across the world and render crates.

/// Edge length of the map canvas in pixels.
pub const CANVAS_SIZE: u32 = 128;

/// Total pixels per canvas.
pub const CANVAS_PIXELS: u32 = CANVAS_SIZE * CANVAS_SIZE;

/// Pixel coordinate of the canvas center (both axes).
pub const CANVAS_CENTER: i64 = (CANVAS_SIZE / 2) as i64;

/// Number of discrete zoom levels.
pub const SCALE_COUNT: u8 = 5;

/// Manhattan radius of the filled marker diamond.
pub const POINTER_RADIUS: i32 = 4;

/// Edge length of the square drawn at the pointer tip.
pub const POINTER_TIP_SIZE: i32 = 2;

/// Padding in pixels between label text and its backing rectangle.
pub const LABEL_PADDING: i32 = 1;

/// Vertical distance in pixels from a marker center to its labels.
pub const LABEL_OFFSET: i32 = 8;

/// Neighbor radius of the tile browsing grid (radius 2 = 5x5 cells).
pub const GRID_RADIUS: i32 = 2;
