//! Landing page effects
//!
//! Each effect is its own module with a `run()` function and a state type
//! that can be stepped without a terminal.

pub mod loader;
pub mod matrix;
pub mod neural;
pub mod particles;
pub mod typing;

use crate::colors::SCHEME_COUNT;
use crate::config::{VizConfig, VizType};
use crate::error::{Error, Result};
use crate::help::render_help_overlay;
use crate::terminal::Terminal;
use crossterm::event::{KeyCode, KeyModifiers};

/// Keys shared by every effect, appended to each help box
const COMMON_HELP: &str = "\
space  Pause
1-9,0  Frame time
!..)   Color scheme
?      Help
q/Esc  Quit";

/// Runtime state for interactive controls (shared by all effects)
pub struct VizState {
    pub speed: f32,        // Current speed (time per frame)
    pub color_scheme: u8,  // Current color scheme (0-9)
    pub paused: bool,
    pub show_help: bool,
    help: String,
}

impl VizState {
    pub fn new(initial_speed: f32, help: &str) -> Self {
        let help = if help.is_empty() {
            COMMON_HELP.to_string()
        } else {
            format!("{help}\n{COMMON_HELP}")
        };
        Self {
            speed: initial_speed,
            color_scheme: 0,
            paused: false,
            show_help: false,
            help,
        }
    }

    /// Handle keypress, returns true if should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('?') => self.show_help = !self.show_help,
            // Number keys: change speed (1=fastest, 9=slowest, 0=very slow)
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.speed = match c {
                    '1' => 0.005,
                    '2' => 0.01,
                    '3' => 0.016,
                    '4' => 0.03,
                    '5' => 0.05,
                    '6' => 0.07,
                    '7' => 0.1,
                    '8' => 0.15,
                    '9' | '0' => 0.2,
                    _ => self.speed,
                };
            }
            // Shift+number produces symbols - use these for color schemes
            KeyCode::Char(c) => {
                if let Some(scheme) = ")!@#$%^&*(".find(c) {
                    self.color_scheme = (scheme as u8) % SCHEME_COUNT;
                }
            }
            _ => {}
        }
        false
    }

    pub fn help_text(&self) -> Option<&str> {
        self.show_help.then_some(self.help.as_str())
    }

    pub fn render_help(&self, term: &mut Terminal, width: u16, height: u16) {
        if let Some(text) = self.help_text() {
            render_help_overlay(term, width, height, text);
        }
    }
}

/// Run a single effect full screen
pub fn run(config: &VizConfig) -> Result<()> {
    let mut rng = config.rng();
    let mut term = Terminal::new().map_err(|err| Error::SurfaceUnavailable(err.to_string()))?;
    tracing::info!(effect = ?config.viz_type, "starting effect");

    match config.viz_type {
        VizType::Neural => neural::run(&mut term, config, &mut rng)?,
        VizType::Matrix => matrix::run(&mut term, config, &mut rng)?,
        VizType::Embers => particles::run_embers(&mut term, config, &mut rng)?,
        VizType::Drift => particles::run_drift(&mut term, config, &mut rng)?,
        VizType::Loader => loader::run(&mut term, config)?,
        VizType::Typing => typing::run(&mut term, config)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(state: &mut VizState, c: char) -> bool {
        state.handle_key(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        let mut state = VizState::new(0.03, "");
        assert!(press(&mut state, 'q'));
        assert!(state.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(state.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!press(&mut state, 'c'));
    }

    #[test]
    fn shifted_digits_pick_schemes() {
        let mut state = VizState::new(0.03, "");
        press(&mut state, '!');
        assert_eq!(state.color_scheme, 1);
        press(&mut state, '(');
        assert_eq!(state.color_scheme, 9);
        press(&mut state, ')');
        assert_eq!(state.color_scheme, 0);
    }

    #[test]
    fn digits_change_speed_and_space_pauses() {
        let mut state = VizState::new(0.03, "");
        press(&mut state, '1');
        assert_eq!(state.speed, 0.005);
        press(&mut state, ' ');
        assert!(state.paused);
        press(&mut state, ' ');
        assert!(!state.paused);
    }

    #[test]
    fn help_toggles_and_includes_common_keys() {
        let mut state = VizState::new(0.03, "NEURAL");
        assert!(state.help_text().is_none());
        press(&mut state, '?');
        let text = state.help_text().unwrap();
        assert!(text.starts_with("NEURAL"));
        assert!(text.contains("q/Esc  Quit"));
    }
}
