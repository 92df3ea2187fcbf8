//! Braille rasterization of a globe scene

use super::camera::Camera;
use super::math::{spherical, Vec3};
use super::scene::Scene;
use crate::braille::{hue_ink, ink_for, BrailleCanvas, INK_DIM, INK_FAINT};
use crate::help::render_help_overlay;
use crate::terminal::Terminal;
use crossterm::style::Color;
use std::f32::consts::{PI, TAU};
use std::io;

// Wireframe tessellation
const LAT_BANDS: usize = 8;
const LON_BANDS: usize = 12;
const RING_SEGMENTS: usize = 48;
const GLOW_SEGMENTS: usize = 96;
const NODE_SIZE: f32 = 0.08;

/// Per-frame presentation options that are not part of the scene
#[derive(Clone, Copy, Default)]
pub struct FrameStyle<'a> {
    pub color_scheme: u8,
    pub help: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Surface a frame driver draws into
pub trait Renderer {
    /// Surface size in cells
    fn size(&self) -> (u16, u16);

    fn set_size(&mut self, width: u16, height: u16);

    fn render(&mut self, scene: &Scene, camera: &Camera, style: &FrameStyle) -> io::Result<()>;

    /// Width over height of the drawable area
    fn aspect(&self) -> f32 {
        let (w, h) = self.size();
        surface_aspect(w, h)
    }
}

/// Aspect ratio of a braille surface. Dots are 2x4 per cell and roughly square.
pub fn surface_aspect(cols: u16, rows: u16) -> f32 {
    (cols.max(1) as f32 * 2.0) / (rows.max(1) as f32 * 4.0)
}

struct Viewport {
    w: f32,
    h: f32,
}

impl Viewport {
    fn of(canvas: &BrailleCanvas) -> Self {
        Self {
            w: canvas.width() as f32,
            h: canvas.height() as f32,
        }
    }

    fn to_dots(&self, x: f32, y: f32) -> (i32, i32) {
        (
            ((x + 1.0) * 0.5 * self.w) as i32,
            ((1.0 - y) * 0.5 * self.h) as i32,
        )
    }

    /// Far off-screen segments are skipped instead of walked
    fn reasonable(&self, (x, y): (i32, i32)) -> bool {
        let (w, h) = (self.w as i32, self.h as i32);
        x > -w && x < 2 * w && y > -h && y < 2 * h
    }
}

fn project(camera: &Camera, view: &Viewport, p: Vec3) -> Option<(i32, i32)> {
    let (x, y, _) = camera.project(p)?;
    let dots = view.to_dots(x, y);
    view.reasonable(dots).then_some(dots)
}

fn segment(canvas: &mut BrailleCanvas, camera: &Camera, view: &Viewport, a: Vec3, b: Vec3, ink: u8) {
    if let (Some((x0, y0)), Some((x1, y1))) = (project(camera, view, a), project(camera, view, b)) {
        canvas.line(x0, y0, x1, y1, ink);
    }
}

/// Draw the whole scene into `canvas`
pub fn draw_scene(canvas: &mut BrailleCanvas, scene: &Scene, camera: &Camera) {
    let view = Viewport::of(canvas);
    draw_glow(canvas, scene, camera, &view);
    draw_wireframe(canvas, scene, camera, &view);

    for conn in &scene.connections {
        let [a, b] = conn.endpoints;
        segment(canvas, camera, &view, a, b, ink_for(conn.opacity * 2.5));
    }

    for trail in &scene.streams {
        let points = trail.points();
        let len = points.len().max(1) as f32;
        for (i, pair) in points.windows(2).enumerate() {
            // Unfilled history is still parked at the origin
            if pair[0] == Vec3::ORIGIN || pair[1] == Vec3::ORIGIN {
                break;
            }
            let fade = 1.0 - i as f32 / len;
            segment(canvas, camera, &view, pair[0], pair[1], ink_for(fade));
        }
    }

    let globe_radius = scene.globe.radius;
    for node in &scene.nodes {
        if let Some((x, y, depth)) = camera.project(node.position) {
            let (dx, dy) = view.to_dots(x, y);
            let radius = camera.scale_at(NODE_SIZE * node.visual_scale, depth) * view.h * 0.5;
            let p = node.position;
            // Behind the globe: seen through the wireframe
            let hidden = p.z < 0.0 && Vec3::new(p.x, p.y, 0.0).length() < globe_radius;
            let ink = if hidden { INK_DIM } else { hue_ink(node.hue()) };
            canvas.disc(dx, dy, radius.round().max(1.0) as i32, ink);
        }
    }
}

/// Limb of the glow sphere: the circle where sight lines graze it
fn draw_glow(canvas: &mut BrailleCanvas, scene: &Scene, camera: &Camera, view: &Viewport) {
    let r = scene.globe.glow_radius * scene.globe.glow_scale;
    let d = camera.distance();
    if r <= 0.0 || r >= d {
        return;
    }
    let plane_z = r * r / d;
    let ring = r * (1.0 - (r * r) / (d * d)).sqrt();
    for i in (0..GLOW_SEGMENTS).step_by(2) {
        let t = i as f32 / GLOW_SEGMENTS as f32 * TAU;
        let p = Vec3::new(ring * t.cos(), ring * t.sin(), plane_z);
        if let Some((x, y)) = project(camera, view, p) {
            canvas.plot(x, y, INK_FAINT);
        }
    }
}

/// Latitude rings and meridians; the far hemisphere is drawn fainter
fn draw_wireframe(canvas: &mut BrailleCanvas, scene: &Scene, camera: &Camera, view: &Viewport) {
    let globe = &scene.globe;
    let r = globe.radius;
    let horizon = r * r / camera.distance();
    let place = |angle: f32, polar: f32| spherical(r, angle, polar).rotate_xy(globe.rotation_x, globe.rotation_y);

    let stroke = |canvas: &mut BrailleCanvas, a: Vec3, b: Vec3| {
        let ink = if (a.z + b.z) * 0.5 > horizon { INK_DIM } else { INK_FAINT };
        segment(canvas, camera, view, a, b, ink);
    };

    for band in 1..LAT_BANDS {
        let polar = band as f32 / LAT_BANDS as f32 * PI;
        for s in 0..RING_SEGMENTS {
            let a0 = s as f32 / RING_SEGMENTS as f32 * TAU;
            let a1 = (s + 1) as f32 / RING_SEGMENTS as f32 * TAU;
            stroke(canvas, place(a0, polar), place(a1, polar));
        }
    }

    for meridian in 0..LON_BANDS {
        let angle = meridian as f32 / LON_BANDS as f32 * TAU;
        for s in 0..RING_SEGMENTS / 2 {
            let p0 = s as f32 / (RING_SEGMENTS / 2) as f32 * PI;
            let p1 = (s + 1) as f32 / (RING_SEGMENTS / 2) as f32 * PI;
            stroke(canvas, place(angle, p0), place(angle, p1));
        }
    }
}

/// Renders into the full terminal
pub struct TerminalRenderer {
    term: Terminal,
    canvas: BrailleCanvas,
}

impl TerminalRenderer {
    pub fn new(term: Terminal) -> Self {
        let (w, h) = term.size();
        Self {
            term,
            canvas: BrailleCanvas::new(w, h),
        }
    }
}

impl Renderer for TerminalRenderer {
    fn size(&self) -> (u16, u16) {
        self.term.size()
    }

    fn set_size(&mut self, width: u16, height: u16) {
        if self.term.size() == (width, height) {
            return;
        }
        self.term.resize(width, height);
        self.canvas.resize(width, height);
        if let Err(err) = self.term.clear_screen() {
            tracing::warn!(%err, "failed to clear screen after resize");
        }
    }

    fn render(&mut self, scene: &Scene, camera: &Camera, style: &FrameStyle) -> io::Result<()> {
        self.canvas.clear();
        draw_scene(&mut self.canvas, scene, camera);

        self.term.clear();
        self.canvas.blit(&mut self.term, 0, 0, style.color_scheme);

        let (w, h) = self.term.size();
        if let Some(status) = style.status {
            self.term.set_str(1, h as i32 - 1, status, Some(Color::DarkGrey), false);
        }
        if let Some(help) = style.help {
            render_help_overlay(&mut self.term, w, h, help);
        }
        self.term.present()
    }
}
