//! Wireframe globe with orbiting data nodes, pulsing links and data streams
//!
//! The scene is built once, then `update::advance` moves it one frame at a
//! time. `driver::FrameDriver` ties the scene to a renderer and a host.

pub mod camera;
pub mod driver;
pub mod math;
pub mod render;
pub mod scene;
pub mod update;

use crate::config::GlobeConfig;
use crate::error::{Error, Result};
use crate::terminal::Terminal;
use driver::{FrameDriver, TerminalHost};
use render::TerminalRenderer;
use scene::Scene;

/// Run the full-screen globe until the user quits
pub fn run(config: &GlobeConfig) -> Result<()> {
    let mut rng = config.rng();
    let scene = Scene::build(&config.params, &mut rng)?;

    let term = Terminal::new().map_err(|err| Error::SurfaceUnavailable(err.to_string()))?;
    let mut driver = FrameDriver::new(scene, TerminalRenderer::new(term), config.time_step);
    driver.set_color_scheme(config.color_scheme);

    let mut host = TerminalHost::new(config.time_step);
    let outcome = driver.run(&mut host);

    // Restores the terminal before any error is reported
    drop(driver.dispose());
    outcome?;
    Ok(())
}
