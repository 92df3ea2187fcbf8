//! Frame loop for the globe: host events in, rendered frames out

use super::camera::Camera;
use super::render::{FrameStyle, Renderer};
use super::scene::Scene;
use super::update::advance;
use crate::viz::VizState;
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const HELP: &str = "\
GLOBE
─────────────────";

/// What the host reports between frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Time to draw the next frame
    Frame,
    Resize(u16, u16),
    Key(KeyCode, KeyModifiers),
    Closed,
}

/// Scheduling collaborator: paces frames and forwards input
pub trait Host {
    fn next_event(&mut self) -> io::Result<HostEvent>;
    fn set_frame_interval(&mut self, seconds: f32);
}

/// Paces frames off the wall clock, reading crossterm events while waiting
pub struct TerminalHost {
    interval: Duration,
    next_frame: Instant,
}

impl TerminalHost {
    pub fn new(seconds: f32) -> Self {
        Self {
            interval: frame_interval(seconds),
            next_frame: Instant::now(),
        }
    }
}

/// Frame interval for `seconds`, clamped to what a `Duration` can hold
fn frame_interval(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds.max(0.001)).unwrap_or(Duration::from_secs(1))
}

/// Deadline after a frame fired at `now`. Late frames are not made up.
fn next_deadline(previous: Instant, interval: Duration, now: Instant) -> Instant {
    (previous + interval).max(now)
}

impl Host for TerminalHost {
    fn next_event(&mut self) -> io::Result<HostEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_frame {
                self.next_frame = next_deadline(self.next_frame, self.interval, now);
                return Ok(HostEvent::Frame);
            }
            if poll(self.next_frame - now)? {
                match read() {
                    Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                        return Ok(HostEvent::Key(key.code, key.modifiers));
                    }
                    Ok(Event::Resize(w, h)) => return Ok(HostEvent::Resize(w, h)),
                    Ok(_) => {}
                    // Input went away with the terminal
                    Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(HostEvent::Closed),
                    Err(err) => return Err(err),
                }
            }
        }
    }

    fn set_frame_interval(&mut self, seconds: f32) {
        self.interval = frame_interval(seconds);
    }
}

/// Cloneable stop signal for a running driver
#[derive(Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Owns the scene and camera, and steps them once per host frame
pub struct FrameDriver<R: Renderer> {
    scene: Scene,
    camera: Camera,
    renderer: R,
    stop: StopHandle,
    state: VizState,
}

impl<R: Renderer> FrameDriver<R> {
    pub fn new(scene: Scene, renderer: R, frame_time: f32) -> Self {
        let camera = Camera::new(renderer.aspect());
        Self {
            scene,
            camera,
            renderer,
            stop: StopHandle::default(),
            state: VizState::new(frame_time, HELP),
        }
    }

    #[allow(dead_code)]
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn set_color_scheme(&mut self, scheme: u8) {
        self.state.color_scheme = scheme;
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Advance one frame and render it. A paused driver does nothing.
    pub fn tick(&mut self) -> io::Result<()> {
        if self.state.paused {
            return Ok(());
        }
        advance(&mut self.scene);
        self.render()
    }

    fn render(&mut self) -> io::Result<()> {
        let status = format!(
            "nodes {}  links {}  streams {}  t {:.2}{}",
            self.scene.nodes.len(),
            self.scene.connections.len(),
            self.scene.streams.len(),
            self.scene.clock.time,
            if self.is_paused() { "  [paused]" } else { "" },
        );
        let style = FrameStyle {
            color_scheme: self.state.color_scheme,
            help: self.state.help_text(),
            status: Some(status.as_str()),
        };
        self.renderer.render(&self.scene, &self.camera, &style)
    }

    /// Resize the surface and resync the camera. Repeating a size is a no-op.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.renderer.set_size(width, height);
        self.camera.set_aspect(self.renderer.aspect());
        tracing::debug!(width, height, aspect = self.camera.aspect(), "globe surface resized");
    }

    /// Run until the stop handle fires, the user quits or the host closes
    pub fn run<H: Host>(&mut self, host: &mut H) -> io::Result<()> {
        host.set_frame_interval(self.state.speed);
        tracing::info!(
            nodes = self.scene.nodes.len(),
            connections = self.scene.connections.len(),
            "globe started"
        );

        while !self.stop.is_stopped() {
            match host.next_event()? {
                HostEvent::Frame => self.tick()?,
                HostEvent::Resize(w, h) => self.resize(w, h),
                HostEvent::Key(code, mods) => {
                    if self.state.handle_key(code, mods) {
                        self.stop.stop();
                        continue;
                    }
                    host.set_frame_interval(self.state.speed);
                    if self.state.paused {
                        // Keep overlay and status current while frozen
                        self.render()?;
                    }
                }
                HostEvent::Closed => self.stop.stop(),
            }
        }

        tracing::info!(frames = self.scene.clock.frames(), "globe stopped");
        Ok(())
    }

    /// Tear down the driver and hand back the renderer
    pub fn dispose(self) -> R {
        self.stop.stop();
        self.renderer
    }
}
