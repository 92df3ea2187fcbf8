//! Braille dot canvas: 2x4 dots per terminal cell

use crate::colors::{scheme_color, Hue};
use crate::terminal::Terminal;
use crossterm::style::Color;

/// Ink levels stored per dot. Higher values win when dots overlap.
pub const INK_FAINT: u8 = 1;
pub const INK_DIM: u8 = 2;
pub const INK_NORMAL: u8 = 3;
pub const INK_BRIGHT: u8 = 4;
pub const INK_VIOLET: u8 = 5;
pub const INK_CYAN: u8 = 6;

// Bit for dot (dx, dy) inside a cell, indexed [dy][dx]
const DOT_BITS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

pub fn hue_ink(hue: Hue) -> u8 {
    match hue {
        Hue::Cyan => INK_CYAN,
        Hue::Violet => INK_VIOLET,
    }
}

/// Map a 0.0-1.0 brightness to one of the plain ink levels
pub fn ink_for(level: f32) -> u8 {
    match level {
        l if l >= 0.75 => INK_BRIGHT,
        l if l >= 0.5 => INK_NORMAL,
        l if l >= 0.25 => INK_DIM,
        _ => INK_FAINT,
    }
}

fn ink_style(ink: u8, scheme: u8) -> (Color, bool) {
    match ink {
        INK_VIOLET => (Hue::Violet.color(scheme), true),
        INK_CYAN => (Hue::Cyan.color(scheme), true),
        n => scheme_color(scheme, n.saturating_sub(1).min(3), n >= INK_BRIGHT),
    }
}

pub struct BrailleCanvas {
    cols: usize,
    rows: usize,
    dots: Vec<u8>,
}

impl BrailleCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols as usize;
        let rows = rows as usize;
        Self {
            cols,
            rows,
            dots: vec![0; cols * 2 * rows * 4],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    pub fn clear(&mut self) {
        self.dots.fill(0);
    }

    /// Size in cells
    pub fn cells(&self) -> (u16, u16) {
        (self.cols as u16, self.rows as u16)
    }

    /// Width in dots
    pub fn width(&self) -> usize {
        self.cols * 2
    }

    /// Height in dots
    pub fn height(&self) -> usize {
        self.rows * 4
    }

    pub fn plot(&mut self, x: i32, y: i32, ink: u8) {
        if x < 0 || y < 0 || x as usize >= self.width() || y as usize >= self.height() {
            return;
        }
        let idx = y as usize * self.width() + x as usize;
        if self.dots[idx] < ink {
            self.dots[idx] = ink;
        }
    }

    pub fn dot(&self, x: usize, y: usize) -> u8 {
        if x >= self.width() || y >= self.height() {
            return 0;
        }
        self.dots[y * self.width() + x]
    }

    /// Bresenham line between two dot positions
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, ink: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        // Lines far off-canvas are clipped by plot; cap the walk anyway
        let max_steps = (dx - dy) as usize + 1;
        for _ in 0..=max_steps {
            self.plot(x, y, ink);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Filled disc (diamond for radius 1)
    pub fn disc(&mut self, cx: i32, cy: i32, radius: i32, ink: u8) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.plot(cx + dx, cy + dy, ink);
                }
            }
        }
    }

    /// Braille glyph and strongest ink of one cell, or `None` when empty
    pub fn cell(&self, cx: usize, cy: usize) -> Option<(char, u8)> {
        let mut bits: u8 = 0;
        let mut ink: u8 = 0;
        for (dy, row) in DOT_BITS.iter().enumerate() {
            for (dx, bit) in row.iter().enumerate() {
                let v = self.dot(cx * 2 + dx, cy * 4 + dy);
                if v > 0 {
                    bits |= bit;
                    ink = ink.max(v);
                }
            }
        }
        if bits == 0 {
            return None;
        }
        char::from_u32(0x2800 + bits as u32).map(|ch| (ch, ink))
    }

    /// Copy non-empty cells into the terminal back buffer at an offset
    pub fn blit(&self, term: &mut Terminal, origin_x: i32, origin_y: i32, scheme: u8) {
        let (cols, rows) = self.cells();
        for cy in 0..rows as i32 {
            for cx in 0..cols as i32 {
                if let Some((ch, ink)) = self.cell(cx as usize, cy as usize) {
                    let (color, bold) = ink_style(ink, scheme);
                    term.set(origin_x + cx, origin_y + cy, ch, Some(color), bold);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_dot_maps_to_braille_bit() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.plot(1, 3, INK_NORMAL);
        assert_eq!(canvas.cell(0, 0), Some(('\u{2880}', INK_NORMAL)));
        assert_eq!(canvas.cell(1, 0), None);
    }

    #[test]
    fn out_of_bounds_plot_is_ignored() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.plot(-1, 0, INK_BRIGHT);
        canvas.plot(2, 0, INK_BRIGHT);
        canvas.plot(0, 4, INK_BRIGHT);
        assert_eq!(canvas.cell(0, 0), None);
    }

    #[test]
    fn stronger_ink_wins() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.plot(0, 0, INK_CYAN);
        canvas.plot(0, 0, INK_FAINT);
        assert_eq!(canvas.dot(0, 0), INK_CYAN);
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = BrailleCanvas::new(10, 5);
        canvas.line(1, 2, 17, 15, INK_DIM);
        assert_eq!(canvas.dot(1, 2), INK_DIM);
        assert_eq!(canvas.dot(17, 15), INK_DIM);
    }

    #[test]
    fn dimensions_follow_cell_count() {
        let canvas = BrailleCanvas::new(40, 10);
        assert_eq!(canvas.width(), 80);
        assert_eq!(canvas.height(), 40);
        assert_eq!(canvas.cells(), (40, 10));
    }
}
