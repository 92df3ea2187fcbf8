//! Matrix rain: one drop per column over a slowly fading field

use crate::colors::{intensity_for, scheme_color};
use crate::config::VizConfig;
use crate::terminal::Terminal;
use super::VizState;
use rand::prelude::*;
use std::io;

// Half-width katakana keeps every glyph one cell wide
const GLYPHS: &[char] = &[
    '0', '1', 'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ',
    'ﾂ', 'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ', 'ﾉ',
];

/// Brightness kept per frame
const FADE: f32 = 0.95;
/// Chance a drop past the bottom restarts at the top
const RESET_PROBABILITY: f64 = 0.025;
/// Cells dimmer than this are blank
const VISIBLE: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Glyph {
    ch: char,
    brightness: f32,
}

const BLANK: Glyph = Glyph { ch: ' ', brightness: 0.0 };

pub struct MatrixRain {
    cols: usize,
    rows: usize,
    drops: Vec<usize>,
    field: Vec<Glyph>,
}

impl MatrixRain {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Self {
            cols,
            rows,
            drops: vec![1; cols],
            field: vec![BLANK; cols * rows],
        }
    }

    /// Keep drops of surviving columns, start new columns at the top
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let (cols, rows) = (cols as usize, rows as usize);
        self.drops.resize(cols, 1);
        self.cols = cols;
        self.rows = rows;
        self.field = vec![BLANK; cols * rows];
    }

    /// Glyph and brightness at a cell, `None` when faded out
    pub fn glyph(&self, x: usize, y: usize) -> Option<(char, f32)> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        let g = self.field[y * self.cols + x];
        (g.brightness >= VISIBLE).then_some((g.ch, g.brightness))
    }

    pub fn step(&mut self, rng: &mut StdRng) {
        for g in &mut self.field {
            g.brightness *= FADE;
        }

        for (x, drop) in self.drops.iter_mut().enumerate() {
            if *drop < self.rows {
                self.field[*drop * self.cols + x] = Glyph {
                    ch: GLYPHS[rng.gen_range(0..GLYPHS.len())],
                    brightness: 1.0,
                };
            }
            if *drop > self.rows && rng.gen_bool(RESET_PROBABILITY) {
                *drop = 0;
            }
            *drop += 1;
        }
    }

    pub fn draw(&self, term: &mut Terminal, scheme: u8) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                if let Some((ch, brightness)) = self.glyph(x, y) {
                    let (color, bold) = scheme_color(scheme, intensity_for(brightness), brightness > 0.9);
                    term.set(x as i32, y as i32, ch, Some(color), bold);
                }
            }
        }
    }
}

const HELP: &str = "\
MATRIX
─────────────────";

pub fn run(term: &mut Terminal, config: &VizConfig, rng: &mut StdRng) -> io::Result<()> {
    let mut state = VizState::new(config.time_step, HELP);
    state.color_scheme = config.color_scheme;

    let (w, h) = term.size();
    let mut rain = MatrixRain::new(w, h);

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            term.clear_screen()?;
            rain.resize(width, height);
        }

        if let Some((code, mods)) = term.check_key()? {
            if state.handle_key(code, mods) {
                break;
            }
        }

        if state.paused {
            term.sleep(0.1);
            continue;
        }

        rain.step(rng);

        term.clear();
        rain.draw(term, state.color_scheme);
        state.render_help(term, width, height);
        term.present()?;
        term.sleep(state.speed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_start_on_second_row() {
        let rain = MatrixRain::new(5, 10);
        assert_eq!(rain.drops, &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn head_is_bright_and_trail_fades() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut rain = MatrixRain::new(3, 20);
        rain.step(&mut rng);
        rain.step(&mut rng);

        let (ch, head) = rain.glyph(0, 2).unwrap();
        assert_eq!(head, 1.0);
        assert!(GLYPHS.contains(&ch));
        let (_, trail) = rain.glyph(0, 1).unwrap();
        assert!((trail - FADE).abs() < 1e-6);
        assert!(rain.glyph(0, 0).is_none());
    }

    #[test]
    fn trail_disappears_after_enough_frames() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut rain = MatrixRain::new(1, 200);
        for _ in 0..100 {
            rain.step(&mut rng);
        }
        // Row 1 has faded 99 times
        assert!(rain.glyph(0, 1).is_none());
        assert!(rain.glyph(0, 100).is_some());
    }

    #[test]
    fn drops_only_reset_past_bottom() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut rain = MatrixRain::new(40, 6);
        let mut reset_seen = false;
        for _ in 0..400 {
            rain.step(&mut rng);
            for &d in &rain.drops {
                if d == 1 {
                    reset_seen = true;
                }
            }
        }
        assert!(reset_seen);

        let mut fresh = MatrixRain::new(40, 6);
        for _ in 0..6 {
            fresh.step(&mut rng);
        }
        assert!(fresh.drops.iter().all(|&d| d == 7));
    }

    #[test]
    fn resize_keeps_existing_columns() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut rain = MatrixRain::new(2, 10);
        rain.step(&mut rng);
        rain.resize(4, 12);
        assert_eq!(rain.drops, &[2, 2, 1, 1]);
        assert!(rain.glyph(3, 11).is_none());
    }
}
