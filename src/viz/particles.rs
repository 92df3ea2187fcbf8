//! Decorative particles: rising footer embers and drifting hero motes

use crate::braille::{hue_ink, ink_for, BrailleCanvas};
use crate::colors::Hue;
use crate::config::VizConfig;
use crate::terminal::Terminal;
use super::VizState;
use rand::prelude::*;
use std::f32::consts::PI;
use std::io;
use std::time::Instant;

pub const EMBER_COUNT: usize = 60;
pub const DRIFTER_COUNT: usize = 50;
/// Largest drift away from a mote's base, in dots
const DRIFT_REACH: f32 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Ember {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
    pub hue: Hue,
}

/// Particles rising off the bottom edge and respawning there
pub struct Embers {
    embers: Vec<Ember>,
    width: f32,
    height: f32,
}

impl Embers {
    pub fn new(rng: &mut StdRng, count: usize, width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        let embers = (0..count)
            .map(|_| Ember {
                x: rng.gen::<f32>() * w,
                y: rng.gen::<f32>() * h,
                dx: rng.gen_range(-0.15..0.15),
                dy: rng.gen_range(-0.7..-0.2),
                radius: rng.gen_range(1.0..3.0),
                hue: Hue::pick(rng),
            })
            .collect();
        Self {
            embers,
            width: w,
            height: h,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn step(&mut self, rng: &mut StdRng) {
        for e in &mut self.embers {
            e.x += e.dx;
            e.y += e.dy;
            if e.y < 0.0 || e.x < 0.0 || e.x > self.width {
                e.y = self.height;
                e.x = rng.gen::<f32>() * self.width;
            }
        }
    }

    pub fn draw(&self, canvas: &mut BrailleCanvas) {
        for e in &self.embers {
            canvas.disc(e.x as i32, e.y as i32, (e.radius * 0.5).round() as i32, hue_ink(e.hue));
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Drifter {
    /// Home position as a fraction of the field
    pub base: (f32, f32),
    /// Far end of the drift, in dots
    pub offset: (f32, f32),
    /// Seconds for one leg of the yoyo
    pub period: f32,
    pub opacity: f32,
    pub hue: Hue,
}

/// Sine in-out easing on 0.0-1.0
fn sine_in_out(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

impl Drifter {
    /// Drift progress at `time`: out along the offset, then back, forever
    pub fn progress(&self, time: f32) -> f32 {
        let legs = (time / self.period).rem_euclid(2.0);
        let t = if legs < 1.0 { legs } else { 2.0 - legs };
        sine_in_out(t)
    }

    pub fn position(&self, time: f32, width: f32, height: f32) -> (f32, f32) {
        let p = self.progress(time);
        (
            self.base.0 * width + self.offset.0 * p,
            self.base.1 * height + self.offset.1 * p,
        )
    }
}

/// Motes easing back and forth around fixed homes
pub struct Drifters {
    drifters: Vec<Drifter>,
    time: f32,
}

impl Drifters {
    pub fn new(rng: &mut StdRng, count: usize) -> Self {
        let drifters = (0..count)
            .map(|_| Drifter {
                base: (rng.gen(), rng.gen()),
                offset: (
                    rng.gen_range(-DRIFT_REACH..DRIFT_REACH),
                    rng.gen_range(-DRIFT_REACH..DRIFT_REACH),
                ),
                period: rng.gen_range(5.0..15.0),
                opacity: rng.gen_range(0.3..0.8),
                hue: Hue::pick(rng),
            })
            .collect();
        Self { drifters, time: 0.0 }
    }

    pub fn advance(&mut self, seconds: f32) {
        self.time += seconds;
    }

    pub fn draw(&self, canvas: &mut BrailleCanvas) {
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        for d in &self.drifters {
            let (x, y) = d.position(self.time, w, h);
            let ink = if d.opacity > 0.6 { hue_ink(d.hue) } else { ink_for(d.opacity) };
            canvas.plot(x as i32, y as i32, ink);
        }
    }
}

const EMBERS_HELP: &str = "\
EMBERS
─────────────────";

const DRIFT_HELP: &str = "\
DRIFT
─────────────────";

pub fn run_embers(term: &mut Terminal, config: &VizConfig, rng: &mut StdRng) -> io::Result<()> {
    let mut state = VizState::new(config.time_step, EMBERS_HELP);
    state.color_scheme = config.color_scheme;

    let (w, h) = term.size();
    let mut canvas = BrailleCanvas::new(w, h);
    let mut embers = Embers::new(rng, EMBER_COUNT, canvas.width(), canvas.height());

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            term.clear_screen()?;
            canvas.resize(width, height);
            embers.resize(canvas.width(), canvas.height());
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

        term.clear();
        canvas.clear();
        embers.draw(&mut canvas);
        embers.step(rng);
        canvas.blit(term, 0, 0, state.color_scheme);
        state.render_help(term, width, height);
        term.present()?;
        term.sleep(state.speed);
    }

    Ok(())
}

pub fn run_drift(term: &mut Terminal, config: &VizConfig, rng: &mut StdRng) -> io::Result<()> {
    let mut state = VizState::new(config.time_step, DRIFT_HELP);
    state.color_scheme = config.color_scheme;

    let (w, h) = term.size();
    let mut canvas = BrailleCanvas::new(w, h);
    let mut drifters = Drifters::new(rng, DRIFTER_COUNT);
    let mut last = Instant::now();

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            term.clear_screen()?;
            canvas.resize(width, height);
        }

        if let Some((code, mods)) = term.check_key()? {
            if state.handle_key(code, mods) {
                break;
            }
        }

        let now = Instant::now();
        let elapsed = (now - last).as_secs_f32();
        last = now;

        if state.paused {
            term.sleep(0.1);
            continue;
        }

        drifters.advance(elapsed);

        term.clear();
        canvas.clear();
        drifters.draw(&mut canvas);
        canvas.blit(term, 0, 0, state.color_scheme);
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
    fn embers_rise_within_speed_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let embers = Embers::new(&mut rng, EMBER_COUNT, 100, 40);
        assert_eq!(embers.embers.len(), EMBER_COUNT);
        for e in embers.embers {
            assert!(e.dx.abs() <= 0.15);
            assert!((-0.7..-0.2).contains(&e.dy));
        }
    }

    #[test]
    fn ember_leaving_top_respawns_at_bottom() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut embers = Embers {
            embers: vec![Ember {
                x: 50.0,
                y: 0.1,
                dx: 0.0,
                dy: -0.5,
                radius: 1.0,
                hue: Hue::Cyan,
            }],
            width: 100.0,
            height: 40.0,
        };
        embers.step(&mut rng);
        let e = &embers.embers[0];
        assert_eq!(e.y, 40.0);
        assert!((0.0..100.0).contains(&e.x));
    }

    #[test]
    fn ember_leaving_side_respawns() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut embers = Embers {
            embers: vec![Ember {
                x: 99.95,
                y: 20.0,
                dx: 0.1,
                dy: -0.2,
                radius: 1.0,
                hue: Hue::Violet,
            }],
            width: 100.0,
            height: 40.0,
        };
        embers.step(&mut rng);
        assert_eq!(embers.embers[0].y, 40.0);
    }

    #[test]
    fn drift_yoyos_between_base_and_offset() {
        let d = Drifter {
            base: (0.5, 0.5),
            offset: (10.0, -6.0),
            period: 5.0,
            opacity: 0.5,
            hue: Hue::Cyan,
        };
        assert_eq!(d.position(0.0, 100.0, 40.0), (50.0, 20.0));
        let (x, y) = d.position(5.0, 100.0, 40.0);
        assert!((x - 60.0).abs() < 1e-4 && (y - 14.0).abs() < 1e-4);
        let (x, _) = d.position(10.0, 100.0, 40.0);
        assert!((x - 50.0).abs() < 1e-4);
        assert!((d.progress(2.5) - 0.5).abs() < 1e-5);
        assert!((d.progress(7.5) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn drifters_stay_within_reach() {
        let mut rng = StdRng::seed_from_u64(14);
        let drifters = Drifters::new(&mut rng, DRIFTER_COUNT);
        assert_eq!(drifters.drifters.len(), DRIFTER_COUNT);
        for d in drifters.drifters {
            assert!((5.0..15.0).contains(&d.period));
            assert!(d.offset.0.abs() <= DRIFT_REACH && d.offset.1.abs() <= DRIFT_REACH);
            for t in [0.0, 1.3, 7.7, 31.0] {
                let p = d.progress(t);
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn drifters_draw_onto_canvas() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut drifters = Drifters::new(&mut rng, DRIFTER_COUNT);
        drifters.advance(3.0);
        assert_eq!(drifters.time, 3.0);
        let mut canvas = BrailleCanvas::new(60, 20);
        drifters.draw(&mut canvas);
        let (cols, rows) = canvas.cells();
        let lit = (0..rows as usize)
            .flat_map(|y| (0..cols as usize).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.cell(x, y).is_some())
            .count();
        assert!(lit > 0);
    }
}
