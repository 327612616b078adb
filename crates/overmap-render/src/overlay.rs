//! Reversible per-frame pixel compositing.
//!
//! Every draw goes through [`DirtyOverlay::set_overlay_pixel`], which
//! captures the original palette byte the first time a pixel is touched in
//! a frame. Replaying the captured bytes restores the base image exactly,
//! so overlays never permanently corrupt it. Each renderer instance owns
//! one overlay; the log is only meaningful between a restore and the next
//! restore.

use std::collections::HashMap;

use overmap_core::constants::{CANVAS_SIZE, POINTER_RADIUS, POINTER_TIP_SIZE};

use crate::canvas::PixelCanvas;
use crate::font::GlyphFont;

#[derive(Debug, Default)]
pub struct DirtyOverlay {
    /// Original palette byte per linear pixel index, captured on the
    /// frame's first overwrite of that pixel.
    dirty: HashMap<u32, u8>,
}

impl DirtyOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write every captured byte back to the canvas and empty the log.
    /// Must run exactly once per frame, before any drawing for that frame.
    pub fn restore_and_clear(&mut self, canvas: &mut dyn PixelCanvas) {
        for (&index, &original) in &self.dirty {
            canvas.set(index % CANVAS_SIZE, index / CANVAS_SIZE, original);
        }
        self.dirty.clear();
    }

    /// Overwrite one pixel, logging its original value on first touch.
    /// Out-of-bounds coordinates are a no-op, so callers never clip.
    pub fn set_overlay_pixel(&mut self, canvas: &mut dyn PixelCanvas, x: i32, y: i32, color: u8) {
        if x < 0 || x >= CANVAS_SIZE as i32 || y < 0 || y >= CANVAS_SIZE as i32 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        self.dirty
            .entry(y * CANVAS_SIZE + x)
            .or_insert_with(|| canvas.get(x, y));
        canvas.set(x, y, color);
    }

    /// Fill a rectangle. Partially off-canvas rectangles are clipped
    /// per-pixel, not rejected.
    pub fn fill_rect(
        &mut self,
        canvas: &mut dyn PixelCanvas,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: u8,
    ) {
        for py in y..y + height {
            for px in x..x + width {
                self.set_overlay_pixel(canvas, px, py, color);
            }
        }
    }

    /// Integer Bresenham line. Both endpoints are written, and swapping
    /// them yields the identical pixel set.
    pub fn draw_line(
        &mut self,
        canvas: &mut dyn PixelCanvas,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: u8,
    ) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_overlay_pixel(canvas, x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Blit text left to right. Characters without a glyph are skipped and
    /// the cursor does not advance for them; each drawn glyph advances the
    /// cursor by its width plus one.
    pub fn draw_text(
        &mut self,
        canvas: &mut dyn PixelCanvas,
        x: i32,
        y: i32,
        text: &str,
        color: u8,
        font: &dyn GlyphFont,
    ) {
        let mut cursor = x;
        for ch in text.chars() {
            let Some(glyph) = font.glyph(ch) else {
                continue;
            };
            for row in 0..glyph.rows.len() as u32 {
                for col in 0..glyph.width {
                    if glyph.bit(row, col) {
                        self.set_overlay_pixel(canvas, cursor + col as i32, y + row as i32, color);
                    }
                }
            }
            cursor += glyph.width as i32 + 1;
        }
    }

    /// Draw the directional marker: a filled diamond with a facing line.
    ///
    /// The diamond is every pixel within Manhattan distance
    /// `POINTER_RADIUS` of the center. The facing line runs from the
    /// center to the rotation of (0, -radius) by the screen angle
    /// (yaw normalized into [0, 360), then flipped 180 degrees), with a
    /// 2x2 block at the tip for visual weight.
    pub fn draw_pointer(
        &mut self,
        canvas: &mut dyn PixelCanvas,
        center_x: i32,
        center_y: i32,
        yaw: f32,
        fill_color: u8,
        tip_color: u8,
    ) {
        for dx in -POINTER_RADIUS..=POINTER_RADIUS {
            for dy in -POINTER_RADIUS..=POINTER_RADIUS {
                if dx.abs() + dy.abs() <= POINTER_RADIUS {
                    self.set_overlay_pixel(canvas, center_x + dx, center_y + dy, fill_color);
                }
            }
        }

        let normalized = ((yaw as f64 % 360.0) + 360.0) % 360.0;
        let angle = ((normalized + 180.0) % 360.0).to_radians();
        let (sin, cos) = angle.sin_cos();

        let px = 0.0;
        let py = -(POINTER_RADIUS as f64);
        let tip_x = center_x + (px * cos - py * sin).round() as i32;
        let tip_y = center_y + (px * sin + py * cos).round() as i32;

        self.draw_line(canvas, center_x, center_y, tip_x, tip_y, tip_color);
        self.fill_rect(
            canvas,
            tip_x - 1,
            tip_y - 1,
            POINTER_TIP_SIZE,
            POINTER_TIP_SIZE,
            tip_color,
        );
    }

    /// Number of pixels captured this frame.
    pub fn touched(&self) -> usize {
        self.dirty.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::BufferCanvas;
    use crate::font::BitmapFont;

    /// Canvas with a position-dependent base pattern, so restores that
    /// write the wrong byte anywhere are caught.
    fn patterned_canvas() -> BufferCanvas {
        let mut canvas = BufferCanvas::new();
        for y in 0..CANVAS_SIZE {
            for x in 0..CANVAS_SIZE {
                canvas.set(x, y, ((x * 7 + y * 13) % 251) as u8);
            }
        }
        canvas
    }

    #[test]
    fn test_restore_reproduces_base_exactly() {
        let mut canvas = patterned_canvas();
        let base = canvas.clone();
        let mut overlay = DirtyOverlay::new();
        let font = BitmapFont::new();

        overlay.fill_rect(&mut canvas, 10, 10, 20, 9, 42);
        overlay.draw_line(&mut canvas, 0, 0, 127, 99, 17);
        overlay.draw_text(&mut canvas, 40, 60, "Steve 64", 5, &font);
        overlay.draw_pointer(&mut canvas, 64, 64, 137.0, 34, 119);
        assert_ne!(canvas, base);

        overlay.restore_and_clear(&mut canvas);
        assert_eq!(canvas, base);
        assert_eq!(overlay.touched(), 0);
    }

    #[test]
    fn test_first_original_wins() {
        let mut canvas = BufferCanvas::filled(7);
        let mut overlay = DirtyOverlay::new();

        overlay.set_overlay_pixel(&mut canvas, 5, 5, 10);
        overlay.set_overlay_pixel(&mut canvas, 5, 5, 20);
        assert_eq!(canvas.get(5, 5), 20);
        assert_eq!(overlay.touched(), 1);

        overlay.restore_and_clear(&mut canvas);
        // The log held the pre-frame byte, not the intermediate overlay.
        assert_eq!(canvas.get(5, 5), 7);
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut canvas = BufferCanvas::new();
        let mut overlay = DirtyOverlay::new();

        overlay.set_overlay_pixel(&mut canvas, -1, 0, 9);
        overlay.set_overlay_pixel(&mut canvas, 0, 128, 9);
        overlay.set_overlay_pixel(&mut canvas, 128, 5, 9);
        assert_eq!(overlay.touched(), 0);
    }

    #[test]
    fn test_fill_rect_clips_per_pixel() {
        let mut canvas = BufferCanvas::new();
        let mut overlay = DirtyOverlay::new();

        // 4x4 rect hanging off the top-left corner: only the inside
        // quadrant lands.
        overlay.fill_rect(&mut canvas, -2, -2, 4, 4, 9);
        assert_eq!(overlay.touched(), 4);
        assert_eq!(canvas.get(0, 0), 9);
        assert_eq!(canvas.get(1, 1), 9);
        assert_eq!(canvas.get(2, 2), 0);
    }

    fn line_pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<u32> {
        let mut canvas = BufferCanvas::new();
        let mut overlay = DirtyOverlay::new();
        overlay.draw_line(&mut canvas, x0, y0, x1, y1, 1);
        let mut touched: Vec<u32> = canvas
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, &p)| p == 1)
            .map(|(i, _)| i as u32)
            .collect();
        touched.sort_unstable();
        touched
    }

    #[test]
    fn test_line_direction_symmetric() {
        assert_eq!(line_pixels(0, 0, 5, 3), line_pixels(5, 3, 0, 0));
        assert_eq!(line_pixels(10, 90, 80, 20), line_pixels(80, 20, 10, 90));
    }

    #[test]
    fn test_line_writes_both_endpoints() {
        let mut canvas = BufferCanvas::new();
        let mut overlay = DirtyOverlay::new();
        overlay.draw_line(&mut canvas, 3, 4, 9, 21, 1);
        assert_eq!(canvas.get(3, 4), 1);
        assert_eq!(canvas.get(9, 21), 1);
    }

    #[test]
    fn test_single_point_line() {
        let mut canvas = BufferCanvas::new();
        let mut overlay = DirtyOverlay::new();
        overlay.draw_line(&mut canvas, 50, 50, 50, 50, 1);
        assert_eq!(overlay.touched(), 1);
        assert_eq!(canvas.get(50, 50), 1);
    }

    #[test]
    fn test_text_skips_unknown_without_advancing() {
        let font = BitmapFont::new();

        let mut with_unknown = BufferCanvas::new();
        let mut overlay_a = DirtyOverlay::new();
        overlay_a.draw_text(&mut with_unknown, 10, 10, "A\u{1F600}B", 5, &font);

        let mut plain = BufferCanvas::new();
        let mut overlay_b = DirtyOverlay::new();
        overlay_b.draw_text(&mut plain, 10, 10, "AB", 5, &font);

        assert_eq!(with_unknown, plain);
    }

    #[test]
    fn test_pointer_shape_south_facing() {
        let mut canvas = BufferCanvas::new();
        let mut overlay = DirtyOverlay::new();

        // yaw 0 flips to screen angle 180: tip points down (+y).
        overlay.draw_pointer(&mut canvas, 64, 64, 0.0, 34, 119);

        // Diamond extremes carry the fill color.
        assert_eq!(canvas.get(60, 64), 34);
        assert_eq!(canvas.get(68, 64), 34);
        assert_eq!(canvas.get(64, 60), 34);
        // Outside Manhattan distance 4 nothing is drawn.
        assert_eq!(canvas.get(67, 67), 0);
        // Facing line and tip block overwrite the fill downward.
        assert_eq!(canvas.get(64, 66), 119);
        assert_eq!(canvas.get(64, 68), 119);
        assert_eq!(canvas.get(63, 67), 119);
    }

    #[test]
    fn test_pointer_yaw_normalization() {
        let mut canvas_a = BufferCanvas::new();
        let mut overlay_a = DirtyOverlay::new();
        overlay_a.draw_pointer(&mut canvas_a, 64, 64, 90.0, 34, 119);

        // -270 and 450 normalize to the same facing as 90.
        for yaw in [-270.0, 450.0] {
            let mut canvas_b = BufferCanvas::new();
            let mut overlay_b = DirtyOverlay::new();
            overlay_b.draw_pointer(&mut canvas_b, 64, 64, yaw, 34, 119);
            assert_eq!(canvas_b, canvas_a, "yaw {yaw} should match yaw 90");
        }
    }
}
