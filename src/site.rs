//! The whole landing page: boot loader, then hero, globe and footer
//!
//! Every layer draws into its own braille canvas. Canvases are blitted back
//! to front (background, hero motes, globe, footer embers) and text goes on
//! top.

use crate::braille::BrailleCanvas;
use crate::colors::scheme_color;
use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::globe::camera::Camera;
use crate::globe::render::{draw_scene, surface_aspect};
use crate::globe::scene::Scene;
use crate::globe::update::advance;
use crate::terminal::Terminal;
use crate::viz::loader::{self, Loader};
use crate::viz::neural::{NeuralField, NEURON_COUNT};
use crate::viz::particles::{Drifters, Embers, DRIFTER_COUNT, EMBER_COUNT};
use crate::viz::typing::{draw_line, Timing, Typewriter};
use crate::viz::VizState;
use crossterm::style::Color;
use rand::prelude::*;
use std::time::{Duration, Instant};

const HELP: &str = "\
AIEC IITM
─────────────────";

const FOOTER_ROWS: u16 = 5;
/// Smallest region the globe is drawn in
const MIN_GLOBE: (u16, u16) = (24, 10);

const TITLE: &str = "AIEC IITM";
const SUBTITLE: &str = "AI Enthusiasts Club";

/// Rectangle of terminal cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub cols: u16,
    pub rows: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub hero: Region,
    /// Right half of the body, absent when too small to draw a globe in
    pub globe: Option<Region>,
    pub footer: Region,
}

impl Layout {
    pub fn compute(width: u16, height: u16) -> Self {
        let footer_rows = FOOTER_ROWS.min(height);
        let body_rows = height - footer_rows;
        let half = width / 2;

        let right = Region {
            x: half,
            y: 0,
            cols: width - half,
            rows: body_rows,
        };
        let globe = (right.cols >= MIN_GLOBE.0 && right.rows >= MIN_GLOBE.1).then_some(right);
        let hero = Region {
            x: 0,
            y: 0,
            cols: if globe.is_some() { half } else { width },
            rows: body_rows,
        };
        let footer = Region {
            x: 0,
            y: body_rows,
            cols: width,
            rows: footer_rows,
        };
        Self { hero, globe, footer }
    }
}

/// All page state, steppable without a terminal
pub struct Site {
    loader: Option<Loader>,
    layout: Layout,
    elapsed: Duration,

    field: NeuralField,
    drifters: Drifters,
    embers: Embers,
    hero: Typewriter,
    footer: Typewriter,
    scene: Scene,
    camera: Camera,

    background: BrailleCanvas,
    hero_canvas: BrailleCanvas,
    globe_canvas: BrailleCanvas,
    footer_canvas: BrailleCanvas,
}

impl Site {
    pub fn new(config: &SiteConfig, rng: &mut StdRng, width: u16, height: u16) -> Result<Self> {
        let scene = Scene::build(&config.globe, rng)?;
        let layout = Layout::compute(width, height);
        let background = BrailleCanvas::new(width, height);
        let footer_canvas = BrailleCanvas::new(layout.footer.cols, layout.footer.rows);
        let field = NeuralField::new(rng, NEURON_COUNT, background.width(), background.height());
        let embers = Embers::new(rng, EMBER_COUNT, footer_canvas.width(), footer_canvas.height());
        let drifters = Drifters::new(rng, DRIFTER_COUNT);

        let mut site = Self {
            loader: (!config.skip_loader).then(Loader::new),
            layout,
            elapsed: Duration::ZERO,
            field,
            drifters,
            embers,
            hero: Typewriter::new(&config.headlines.hero, Timing::HERO),
            footer: Typewriter::new(&config.headlines.footer, Timing::FOOTER),
            scene,
            camera: Camera::default(),
            background,
            hero_canvas: BrailleCanvas::new(0, 0),
            globe_canvas: BrailleCanvas::new(0, 0),
            footer_canvas,
        };
        site.fit_regions();
        Ok(site)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// True while the boot loader still covers the page
    pub fn loading(&self) -> bool {
        self.loader.is_some()
    }

    fn fit_regions(&mut self) {
        let Layout { hero, globe, .. } = self.layout;
        self.hero_canvas.resize(hero.cols, hero.rows);
        match globe {
            Some(region) => {
                self.globe_canvas.resize(region.cols, region.rows);
                self.camera.set_aspect(surface_aspect(region.cols, region.rows));
            }
            None => self.globe_canvas.resize(0, 0),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = Layout::compute(width, height);
        self.background.resize(width, height);
        self.field.resize(self.background.width(), self.background.height());
        self.footer_canvas.resize(self.layout.footer.cols, self.layout.footer.rows);
        self.embers.resize(self.footer_canvas.width(), self.footer_canvas.height());
        self.fit_regions();
        tracing::debug!(width, height, globe = self.layout.globe.is_some(), "site layout changed");
    }

    /// Step every layer by one frame of `elapsed` wall time
    pub fn advance(&mut self, elapsed: Duration, rng: &mut StdRng) {
        self.elapsed += elapsed;

        if let Some(loader) = &mut self.loader {
            loader.advance(elapsed);
            if loader.is_done() {
                tracing::info!("loader finished");
                self.loader = None;
            }
            return;
        }

        self.field.step();
        self.drifters.advance(elapsed.as_secs_f32());
        self.embers.step(rng);
        self.hero.advance(elapsed);
        self.footer.advance(elapsed);
        if self.layout.globe.is_some() {
            advance(&mut self.scene);
        }
    }

    pub fn draw(&mut self, term: &mut Terminal, scheme: u8) {
        if let Some(boot) = &self.loader {
            loader::draw(term, boot, scheme);
            return;
        }

        self.background.clear();
        self.field.draw(&mut self.background);
        self.background.blit(term, 0, 0, scheme);

        let Layout { hero, globe, footer } = self.layout;

        self.hero_canvas.clear();
        self.drifters.draw(&mut self.hero_canvas);
        self.hero_canvas.blit(term, hero.x as i32, hero.y as i32, scheme);

        if let Some(region) = globe {
            self.globe_canvas.clear();
            draw_scene(&mut self.globe_canvas, &self.scene, &self.camera);
            self.globe_canvas.blit(term, region.x as i32, region.y as i32, scheme);
        }

        self.footer_canvas.clear();
        self.embers.draw(&mut self.footer_canvas);
        self.footer_canvas.blit(term, footer.x as i32, footer.y as i32, scheme);

        let blink = self.elapsed.as_millis() / 500 % 2 == 0;
        let span = (hero.x as i32, hero.cols);
        let mid = hero.y as i32 + hero.rows as i32 / 2;
        let (title, _) = scheme_color(scheme, 3, true);
        let (subtitle, _) = scheme_color(scheme, 1, false);
        centred(term, span, mid - 3, TITLE, title, true);
        centred(term, span, mid - 2, SUBTITLE, subtitle, false);
        draw_line(term, span, mid, "Exploring ", &self.hero.text(), blink, scheme);

        if footer.rows > 0 {
            let y = footer.y as i32 + footer.rows as i32 - 1;
            draw_line(term, (0, footer.cols), y, "", &self.footer.text(), blink, scheme);
        }
    }
}

fn centred(term: &mut Terminal, (left, width): (i32, u16), y: i32, text: &str, color: Color, bold: bool) {
    let x = left + (width as i32 - text.chars().count() as i32).max(0) / 2;
    term.set_str(x, y, text, Some(color), bold);
}

/// Run the landing page until the user quits
pub fn run(config: &SiteConfig) -> Result<()> {
    config.globe.validate()?;
    let mut rng = config.rng();
    let mut term = Terminal::new().map_err(|err| Error::SurfaceUnavailable(err.to_string()))?;

    let (w, h) = term.size();
    let mut site = Site::new(config, &mut rng, w, h)?;
    let mut state = VizState::new(config.time_step, HELP);
    state.color_scheme = config.color_scheme;
    tracing::info!(
        width = w,
        height = h,
        globe = site.layout().globe.is_some(),
        loader = site.loading(),
        "site started"
    );

    let mut last = Instant::now();
    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            term.clear_screen()?;
            site.resize(width, height);
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

        site.advance(elapsed, &mut rng);

        term.clear();
        site.draw(&mut term, state.color_scheme);
        state.render_help(&mut term, width, height);
        term.present()?;
        term.sleep(state.speed);
    }

    tracing::info!(frames = site.scene().clock.frames(), "site stopped");
    Ok(())
}
