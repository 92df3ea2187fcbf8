//! Neural network background: drifting neurons linked by proximity

use crate::braille::{ink_for, BrailleCanvas, INK_CYAN};
use crate::config::VizConfig;
use crate::terminal::Terminal;
use super::VizState;
use rand::prelude::*;
use std::io;

pub const NEURON_COUNT: usize = 80;
/// Pairs closer than this (in dots) are linked
pub const LINK_DISTANCE: f32 = 24.0;
const MAX_SPEED: f32 = 0.25;

#[derive(Clone, Debug, PartialEq)]
pub struct Neuron {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

pub struct NeuralField {
    neurons: Vec<Neuron>,
    width: f32,
    height: f32,
}

impl NeuralField {
    /// Scatter `count` neurons over a field of `width` x `height` dots
    pub fn new(rng: &mut StdRng, count: usize, width: usize, height: usize) -> Self {
        let (w, h) = (width as f32, height as f32);
        let neurons = (0..count)
            .map(|_| Neuron {
                x: rng.gen::<f32>() * w,
                y: rng.gen::<f32>() * h,
                vx: rng.gen_range(-MAX_SPEED..MAX_SPEED),
                vy: rng.gen_range(-MAX_SPEED..MAX_SPEED),
                radius: rng.gen_range(1.0..3.0),
            })
            .collect();
        Self {
            neurons,
            width: w,
            height: h,
        }
    }

    /// Stretch neuron positions onto a new field size
    pub fn resize(&mut self, width: usize, height: usize) {
        let (w, h) = (width as f32, height as f32);
        let sx = if self.width > 0.0 { w / self.width } else { 0.0 };
        let sy = if self.height > 0.0 { h / self.height } else { 0.0 };
        for n in &mut self.neurons {
            n.x *= sx;
            n.y *= sy;
        }
        self.width = w;
        self.height = h;
    }

    /// Linked pairs with their brightness, `1 - d / LINK_DISTANCE`
    pub fn links(&self) -> Vec<(usize, usize, f32)> {
        let mut out = Vec::new();
        for (i, a) in self.neurons.iter().enumerate() {
            for (j, b) in self.neurons.iter().enumerate().skip(i + 1) {
                let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if d < LINK_DISTANCE {
                    out.push((i, j, 1.0 - d / LINK_DISTANCE));
                }
            }
        }
        out
    }

    /// Move every neuron, reversing a velocity component that left the field
    pub fn step(&mut self) {
        for n in &mut self.neurons {
            n.x += n.vx;
            n.y += n.vy;
            if n.x < 0.0 || n.x > self.width {
                n.vx = -n.vx;
            }
            if n.y < 0.0 || n.y > self.height {
                n.vy = -n.vy;
            }
        }
    }

    pub fn draw(&self, canvas: &mut BrailleCanvas) {
        for (i, j, brightness) in self.links() {
            let (a, b) = (&self.neurons[i], &self.neurons[j]);
            // Links stay subdued under the neurons
            canvas.line(
                a.x as i32,
                a.y as i32,
                b.x as i32,
                b.y as i32,
                ink_for(brightness * 0.6),
            );
        }
        for n in &self.neurons {
            canvas.disc(n.x as i32, n.y as i32, (n.radius * 0.5).round() as i32, INK_CYAN);
        }
    }
}

const HELP: &str = "\
NEURAL
─────────────────";

pub fn run(term: &mut Terminal, config: &VizConfig, rng: &mut StdRng) -> io::Result<()> {
    let mut state = VizState::new(config.time_step, HELP);
    state.color_scheme = config.color_scheme;

    let (w, h) = term.size();
    let mut canvas = BrailleCanvas::new(w, h);
    let mut field = NeuralField::new(rng, NEURON_COUNT, canvas.width(), canvas.height());

    loop {
        let (width, height) = crossterm::terminal::size().unwrap_or(term.size());
        if (width, height) != term.size() {
            term.resize(width, height);
            term.clear_screen()?;
            canvas.resize(width, height);
            field.resize(canvas.width(), canvas.height());
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
        field.draw(&mut canvas);
        field.step();
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

    fn field_of(neurons: Vec<Neuron>) -> NeuralField {
        NeuralField {
            neurons,
            width: 100.0,
            height: 50.0,
        }
    }

    fn still(x: f32, y: f32) -> Neuron {
        Neuron {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 2.0,
        }
    }

    #[test]
    fn spawns_inside_field_with_bounded_velocity() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = NeuralField::new(&mut rng, NEURON_COUNT, 160, 96);
        assert_eq!(field.neurons.len(), NEURON_COUNT);
        for n in field.neurons {
            assert!((0.0..=160.0).contains(&n.x));
            assert!((0.0..=96.0).contains(&n.y));
            assert!(n.vx.abs() <= MAX_SPEED && n.vy.abs() <= MAX_SPEED);
            assert!((1.0..3.0).contains(&n.radius));
        }
    }

    #[test]
    fn links_only_close_pairs_with_fading_brightness() {
        let field = field_of(vec![still(10.0, 10.0), still(22.0, 10.0), still(90.0, 40.0)]);
        let links = field.links();
        assert_eq!(links.len(), 1);
        let (i, j, brightness) = links[0];
        assert_eq!((i, j), (0, 1));
        assert!((brightness - 0.5).abs() < 1e-6);
    }

    #[test]
    fn bounces_off_edges() {
        let mut field = field_of(vec![Neuron {
            x: 99.9,
            y: 0.1,
            vx: 0.2,
            vy: -0.2,
            radius: 1.0,
        }]);
        field.step();
        let n = &field.neurons[0];
        assert!(n.vx < 0.0);
        assert!(n.vy > 0.0);
    }

    #[test]
    fn resize_rescales_positions() {
        let mut field = field_of(vec![still(50.0, 25.0)]);
        field.resize(200, 100);
        assert_eq!((field.width, field.height), (200.0, 100.0));
        assert_eq!(field.neurons[0].x, 100.0);
        assert_eq!(field.neurons[0].y, 50.0);
    }

    #[test]
    fn draw_marks_neurons_and_links() {
        let field = field_of(vec![still(10.0, 10.0), still(20.0, 10.0)]);
        let mut canvas = BrailleCanvas::new(50, 13);
        field.draw(&mut canvas);
        assert_eq!(canvas.dot(10, 10), INK_CYAN);
        assert!(canvas.dot(15, 10) > 0);
    }
}
