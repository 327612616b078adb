//! Palette bytes for marker rendering and the deterministic color
//! assignment. Color values are indices into the host's base-map palette.

/// Palette bytes cycled through for marker fills.
pub const MARKER_PALETTE: [u8; 12] = [34, 58, 86, 98, 114, 126, 78, 90, 102, 110, 66, 74];

/// Color of the facing line and tip block.
pub const DIRECTION_LINE_COLOR: u8 = 119;

/// Backing rectangle behind elevation and name labels.
pub const LABEL_BACKING_COLOR: u8 = 119;

/// Text color for name labels.
pub const NAME_TEXT_COLOR: u8 = 34;

/// Deterministic palette color for an identity via CRC32 of its bytes.
/// The same identity always maps to the same color, across frames and
/// across restarts.
pub fn marker_color(identity: &str) -> u8 {
    let hash = crc32fast::hash(identity.as_bytes());
    MARKER_PALETTE[hash as usize % MARKER_PALETTE.len()]
}
