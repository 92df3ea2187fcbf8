//! Boot loader: a progress bar that fills, holds, then fades out

use crate::colors::{dim, scheme_color};
use crate::config::VizConfig;
use crate::terminal::Terminal;
use super::VizState;
use crossterm::style::Color;
use std::io;
use std::time::{Duration, Instant};

const STEP: Duration = Duration::from_millis(80);
const HOLD: Duration = Duration::from_millis(500);
const FADE: Duration = Duration::from_millis(800);
const INCREMENT: u8 = 2;

/// Subsystem lines and the progress each one comes up at
const SUBSYSTEMS: [(&str, u8, &str); 3] = [
    ("Neural Networks", 20, "Active"),
    ("Machine Learning", 50, "Initializing"),
    ("AI Core", 80, "Online"),
];
const PENDING: &str = "Loading...";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderPhase {
    Loading,
    Holding,
    Fading,
    Done,
}

pub struct Loader {
    progress: u8,
    phase: LoaderPhase,
    pending: Duration,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    pub fn new() -> Self {
        Self {
            progress: 0,
            phase: LoaderPhase::Loading,
            pending: Duration::ZERO,
        }
    }

    /// Percent complete, 0-100
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_done(&self) -> bool {
        self.phase == LoaderPhase::Done
    }

    /// Label and state text of each subsystem line
    pub fn statuses(&self) -> [(&'static str, &'static str); 3] {
        SUBSYSTEMS.map(|(label, threshold, online)| {
            (label, if self.progress > threshold { online } else { PENDING })
        })
    }

    /// 1.0 while loading and holding, easing to 0.0 across the fade
    pub fn opacity(&self) -> f32 {
        match self.phase {
            LoaderPhase::Loading | LoaderPhase::Holding => 1.0,
            LoaderPhase::Fading => {
                let t = (self.pending.as_secs_f32() / FADE.as_secs_f32()).clamp(0.0, 1.0);
                // power2 in-out
                let eased = if t < 0.5 { 2.0 * t * t } else { 1.0 - (-2.0 * t + 2.0).powi(2) / 2.0 };
                1.0 - eased
            }
            LoaderPhase::Done => 0.0,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.pending += elapsed;
        loop {
            match self.phase {
                LoaderPhase::Loading if self.pending >= STEP => {
                    self.pending -= STEP;
                    self.progress = (self.progress + INCREMENT).min(100);
                    if self.progress >= 100 {
                        self.phase = LoaderPhase::Holding;
                    }
                }
                LoaderPhase::Holding if self.pending >= HOLD => {
                    self.pending -= HOLD;
                    self.phase = LoaderPhase::Fading;
                }
                LoaderPhase::Fading if self.pending >= FADE => {
                    self.pending = Duration::ZERO;
                    self.phase = LoaderPhase::Done;
                }
                _ => break,
            }
        }
    }
}

fn faded(color: Color, opacity: f32) -> Color {
    if opacity >= 1.0 {
        color
    } else {
        dim(color, opacity)
    }
}

/// Centred title, bar, glow row, percentage and subsystem lines
pub fn draw(term: &mut Terminal, loader: &Loader, scheme: u8) {
    let (w, h) = term.size();
    let opacity = loader.opacity();
    if opacity <= 0.0 {
        return;
    }

    let bar_width = (w as i32 - 8).clamp(4, 40);
    let left = (w as i32 - bar_width) / 2;
    let top = h as i32 / 2 - 4;
    let filled = bar_width * loader.progress() as i32 / 100;

    let (title, _) = scheme_color(scheme, 3, true);
    let (full, _) = scheme_color(scheme, 2, true);
    let (empty, _) = scheme_color(scheme, 0, false);
    let (glow, _) = scheme_color(scheme, 1, false);
    let (text, _) = scheme_color(scheme, 1, false);

    let name = "AIEC IITM";
    let name_x = (w as i32 - name.len() as i32) / 2;
    term.set_str(name_x, top, name, Some(faded(title, opacity)), true);

    for i in 0..bar_width {
        let (ch, color) = if i < filled { ('█', full) } else { ('░', empty) };
        term.set(left + i, top + 2, ch, Some(faded(color, opacity)), false);
        if i < filled {
            term.set(left + i, top + 3, '▀', Some(faded(glow, opacity)), false);
        }
    }

    let percent = format!("{}%", loader.progress());
    let percent_x = (w as i32 - percent.len() as i32) / 2;
    term.set_str(percent_x, top + 4, &percent, Some(faded(title, opacity)), true);

    for (i, (label, state)) in loader.statuses().iter().enumerate() {
        let line = format!("{label}: {state}");
        let x = (w as i32 - line.chars().count() as i32) / 2;
        term.set_str(x, top + 6 + i as i32, &line, Some(faded(text, opacity)), false);
    }
}

const HELP: &str = "\
LOADER
─────────────────";

pub fn run(term: &mut Terminal, config: &VizConfig) -> io::Result<()> {
    let mut state = VizState::new(config.time_step, HELP);
    state.color_scheme = config.color_scheme;
    let mut loader = Loader::new();
    let mut last = Instant::now();

    while !loader.is_done() {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            term.clear_screen()?;
        }

        if let Some((code, mods)) = term.check_key()? {
            if state.handle_key(code, mods) {
                break;
            }
        }

        let now = Instant::now();
        let elapsed = now - last;
        last = now;

        if state.paused {
            term.sleep(0.1);
            continue;
        }

        loader.advance(elapsed);

        term.clear();
        draw(term, &loader, state.color_scheme);
        state.render_help(term, width, height);
        term.present()?;
        term.sleep(state.speed);
    }

    Ok(())
}
