//! Typewriter headlines: type a word, hold, erase it, move to the next

use crate::colors::{scheme_color, CYAN};
use crate::config::VizConfig;
use crate::terminal::Terminal;
use super::VizState;
use std::io;
use std::time::{Duration, Instant};

/// Delays of one typewriter line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub start: Duration,
    pub type_char: Duration,
    pub hold: Duration,
    pub erase_char: Duration,
    pub next_word: Duration,
}

impl Timing {
    /// Hero headline
    pub const HERO: Timing = Timing {
        start: Duration::from_millis(1000),
        type_char: Duration::from_millis(80),
        hold: Duration::from_millis(2000),
        erase_char: Duration::from_millis(40),
        next_word: Duration::from_millis(300),
    };

    /// Footer tagline
    pub const FOOTER: Timing = Timing {
        start: Duration::from_millis(2000),
        type_char: Duration::from_millis(60),
        hold: Duration::from_millis(3000),
        erase_char: Duration::from_millis(30),
        next_word: Duration::from_millis(500),
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Typing,
    Holding,
    Erasing,
    Pausing,
}

/// Type/erase state machine over a word list
pub struct Typewriter {
    words: Vec<Vec<char>>,
    timing: Timing,
    phase: Phase,
    word: usize,
    shown: usize,
    pending: Duration,
}

impl Typewriter {
    pub fn new(words: &[String], timing: Timing) -> Self {
        Self {
            words: words.iter().map(|w| w.chars().collect()).collect(),
            timing,
            phase: Phase::Waiting,
            word: 0,
            shown: 0,
            pending: Duration::ZERO,
        }
    }

    /// Currently visible prefix of the current word
    pub fn text(&self) -> String {
        self.words
            .get(self.word)
            .map(|w| w[..self.shown].iter().collect())
            .unwrap_or_default()
    }

    fn delay(&self) -> Duration {
        match self.phase {
            Phase::Waiting => self.timing.start,
            Phase::Typing => self.timing.type_char,
            Phase::Holding => self.timing.hold,
            Phase::Erasing => self.timing.erase_char,
            Phase::Pausing => self.timing.next_word,
        }
    }

    /// Feed elapsed time, running every step whose delay has passed
    pub fn advance(&mut self, elapsed: Duration) {
        if self.words.is_empty() {
            return;
        }
        self.pending += elapsed;
        loop {
            let delay = self.delay();
            if self.pending < delay {
                break;
            }
            self.pending -= delay;
            self.step();
        }
    }

    fn step(&mut self) {
        let len = self.words[self.word].len();
        self.phase = match self.phase {
            Phase::Waiting | Phase::Pausing | Phase::Typing => {
                if self.shown < len {
                    self.shown += 1;
                    Phase::Typing
                } else {
                    Phase::Holding
                }
            }
            Phase::Holding | Phase::Erasing => {
                if self.shown > 0 {
                    self.shown -= 1;
                    Phase::Erasing
                } else {
                    self.next_word()
                }
            }
        };
    }

    fn next_word(&mut self) -> Phase {
        self.word = (self.word + 1) % self.words.len();
        Phase::Pausing
    }
}

/// Draw a typewriter line with a blinking block cursor, centred within the
/// columns `span.0 .. span.0 + span.1` of row `y`
pub fn draw_line(term: &mut Terminal, span: (i32, u16), y: i32, prefix: &str, text: &str, cursor_on: bool, scheme: u8) {
    let (left, width) = span;
    let total = prefix.chars().count() + text.chars().count() + 1;
    let x = left + (width as i32 - total as i32).max(0) / 2;

    let (dim, _) = scheme_color(scheme, 1, false);
    let highlight = if scheme == 0 { CYAN } else { scheme_color(scheme, 3, true).0 };

    term.set_str(x, y, prefix, Some(dim), false);
    let text_x = x + prefix.chars().count() as i32;
    term.set_str(text_x, y, text, Some(highlight), true);
    if cursor_on {
        term.set(text_x + text.chars().count() as i32, y, '▌', Some(highlight), false);
    }
}

const HELP: &str = "\
TYPING
─────────────────";

/// Run both typewriter lines full screen
pub fn run(term: &mut Terminal, config: &VizConfig) -> io::Result<()> {
    let mut state = VizState::new(config.time_step, HELP);
    state.color_scheme = config.color_scheme;

    let mut hero = Typewriter::new(&config.headlines.hero, Timing::HERO);
    let mut footer = Typewriter::new(&config.headlines.footer, Timing::FOOTER);
    let started = Instant::now();
    let mut last = Instant::now();

    loop {
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

        hero.advance(elapsed);
        footer.advance(elapsed);

        let blink = (now - started).as_millis() / 500 % 2 == 0;
        let mid = height as i32 / 2;

        term.clear();
        draw_line(term, (0, width), mid - 1, "Exploring ", &hero.text(), blink, state.color_scheme);
        draw_line(term, (0, width), mid + 2, "", &footer.text(), blink, state.color_scheme);
        state.render_help(term, width, height);
        term.present()?;
        term.sleep(state.speed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn nothing_before_start_delay() {
        let mut tw = Typewriter::new(&words(&["Hello"]), Timing::HERO);
        tw.advance(ms(999));
        assert_eq!(tw.text(), "");
        assert_eq!(tw.phase, Phase::Waiting);
        tw.advance(ms(1));
        assert_eq!(tw.text(), "H");
    }

    #[test]
    fn types_one_char_per_delay() {
        let mut tw = Typewriter::new(&words(&["Hello"]), Timing::HERO);
        tw.advance(ms(1000 + 80 * 2));
        assert_eq!(tw.text(), "Hel");
        tw.advance(ms(80 * 2));
        assert_eq!(tw.text(), "Hello");
        assert_eq!(tw.phase, Phase::Typing);
        tw.advance(ms(80));
        assert_eq!(tw.phase, Phase::Holding);
    }

    #[test]
    fn holds_then_erases_then_moves_on() {
        let mut tw = Typewriter::new(&words(&["ab", "xyz"]), Timing::HERO);
        tw.advance(ms(1000 + 80));
        assert_eq!(tw.text(), "ab");

        // One more type tick notices the word is complete, then the hold
        tw.advance(ms(80 + 1999));
        assert_eq!(tw.text(), "ab");
        tw.advance(ms(1));
        assert_eq!(tw.text(), "a");
        assert_eq!(tw.phase, Phase::Erasing);

        tw.advance(ms(40));
        assert_eq!(tw.text(), "");
        assert_eq!(tw.word, 0);
        tw.advance(ms(40));
        assert_eq!(tw.word, 1);
        assert_eq!(tw.phase, Phase::Pausing);

        tw.advance(ms(300));
        assert_eq!(tw.text(), "x");
    }

    #[test]
    fn word_list_wraps() {
        let mut tw = Typewriter::new(&words(&["a", "b"]), Timing::FOOTER);
        // type tick, hold, erase tick, pause for each one-letter word
        let cycle = ms(60 + 3000 + 30 + 500);
        tw.advance(ms(2000));
        assert_eq!(tw.text(), "a");
        tw.advance(cycle);
        assert_eq!(tw.text(), "b");
        tw.advance(cycle);
        assert_eq!(tw.text(), "a");
        assert_eq!(tw.word, 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut tw = Typewriter::new(&words(&["© • é"]), Timing::HERO);
        tw.advance(ms(1000 + 80));
        assert_eq!(tw.text(), "© ");
    }

    #[test]
    fn empty_word_list_is_inert() {
        let mut tw = Typewriter::new(&[], Timing::HERO);
        tw.advance(ms(10_000));
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn one_large_step_equals_many_small() {
        let list = words(&["Machine Learning", "Deep Learning"]);
        let mut big = Typewriter::new(&list, Timing::HERO);
        let mut small = Typewriter::new(&list, Timing::HERO);
        big.advance(ms(6_000));
        for _ in 0..600 {
            small.advance(ms(10));
        }
        assert_eq!(big.text(), small.text());
        assert_eq!(big.phase, small.phase);
    }
}
