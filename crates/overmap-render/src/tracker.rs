//! Per-frame marker compositing for one tile canvas.
//!
//! Each tick the tracker restores the previous frame's overlay, then
//! redraws a directional pointer (plus optional elevation and name labels)
//! for every visible marker that projects inside the canvas.

use glam::I64Vec2;

use overmap_core::config::MapConfig;
use overmap_core::constants::{CANVAS_CENTER, CANVAS_SIZE, LABEL_OFFSET, LABEL_PADDING};
use overmap_core::palette::{self, LABEL_BACKING_COLOR, NAME_TEXT_COLOR};
use overmap_core::scale::Scale;
use overmap_core::types::{Marker, WorldId};

use crate::canvas::{OverlayHandler, PixelCanvas};
use crate::font::{strip_format_codes, BitmapFont, GlyphFont};
use crate::overlay::DirtyOverlay;

/// Stable capability tag for tracker handlers.
pub const TRACKER_TAG: &str = "overmap:marker-tracker";

/// The tile a tracker renders into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub world: WorldId,
    pub center: I64Vec2,
    pub scale: Scale,
}

/// Marker compositor for one tile canvas. Owns that canvas's overlay
/// state; never shared between tiles.
pub struct MarkerTracker {
    view: TileView,
    overlay: DirtyOverlay,
    font: BitmapFont,
}

impl MarkerTracker {
    pub fn new(view: TileView) -> Self {
        Self {
            view,
            overlay: DirtyOverlay::new(),
            font: BitmapFont::new(),
        }
    }

    pub fn view(&self) -> &TileView {
        &self.view
    }

    /// Render one frame: restore the base image, then composite every
    /// visible same-world marker.
    pub fn render_frame(
        &mut self,
        canvas: &mut dyn PixelCanvas,
        markers: &[Marker],
        config: &MapConfig,
    ) {
        self.overlay.restore_and_clear(canvas);
        canvas.clear_cursor_overlays();

        let factor = self.view.scale.factor();
        for marker in markers {
            if !marker.visible || marker.world != self.view.world {
                continue;
            }

            let map_x = (marker.x - self.view.center.x).div_euclid(factor) + CANVAS_CENTER;
            let map_z = (marker.z - self.view.center.y).div_euclid(factor) + CANVAS_CENTER;
            if !(0..CANVAS_SIZE as i64).contains(&map_x) || !(0..CANVAS_SIZE as i64).contains(&map_z)
            {
                continue;
            }
            let (map_x, map_z) = (map_x as i32, map_z as i32);

            let fill = palette::marker_color(&marker.identity);
            self.overlay.draw_pointer(
                canvas,
                map_x,
                map_z,
                marker.yaw,
                fill,
                palette::DIRECTION_LINE_COLOR,
            );

            if config.show_y_level {
                self.draw_elevation(canvas, map_x, map_z, marker.y, config);
            }
            if config.show_player_names {
                self.draw_name(canvas, map_x, map_z, &marker.label);
            }
        }
    }

    /// Elevation label above the pointer, tier-colored by height.
    fn draw_elevation(
        &mut self,
        canvas: &mut dyn PixelCanvas,
        map_x: i32,
        map_z: i32,
        y: i64,
        config: &MapConfig,
    ) {
        let text = y.to_string();
        let width = self.font.text_width(&text) as i32;
        let height = self.font.height() as i32;
        let text_x = map_x - width / 2;
        let text_y = map_z - LABEL_OFFSET - height;

        self.overlay.fill_rect(
            canvas,
            text_x - LABEL_PADDING,
            text_y - LABEL_PADDING,
            width + 2 * LABEL_PADDING,
            height + 2 * LABEL_PADDING,
            LABEL_BACKING_COLOR,
        );
        self.overlay.draw_text(
            canvas,
            text_x,
            text_y,
            &text,
            config.elevation_tiers.color_for(y),
            &self.font,
        );
    }

    /// Name label centered below the pointer. Formatting codes are
    /// stripped first; a label with no renderable glyphs is not drawn.
    fn draw_name(&mut self, canvas: &mut dyn PixelCanvas, map_x: i32, map_z: i32, label: &str) {
        let name = strip_format_codes(label);
        let width = self.font.text_width(&name);
        if width == 0 {
            return;
        }
        let width = width as i32;
        let height = self.font.height() as i32;
        let text_x = map_x - width / 2;
        let text_y = map_z + LABEL_OFFSET;

        self.overlay.fill_rect(
            canvas,
            text_x - LABEL_PADDING,
            text_y - LABEL_PADDING,
            width + 2 * LABEL_PADDING,
            height + 2 * LABEL_PADDING,
            LABEL_BACKING_COLOR,
        );
        self.overlay
            .draw_text(canvas, text_x, text_y, &name, NAME_TEXT_COLOR, &self.font);
    }
}

impl OverlayHandler for MarkerTracker {
    fn tag(&self) -> &'static str {
        TRACKER_TAG
    }

    fn render(&mut self, canvas: &mut dyn PixelCanvas, markers: &[Marker], config: &MapConfig) {
        self.render_frame(canvas, markers, config);
    }
}
