//! Per-frame updaters. `advance` runs them in the only valid order.

use super::math::spherical;
use super::scene::{Connection, Globe, OrbitNode, Scene, StreamTrail};

const GLOBE_SPIN: f32 = 0.001;
const GLOBE_WOBBLE_RATE: f32 = 0.3;
const GLOBE_WOBBLE: f32 = 0.1;
const GLOW_PULSE: f32 = 0.05;
const NODE_PULSE_RATE: f32 = 3.0;
const NODE_PULSE: f32 = 0.3;
const LINK_BASE_OPACITY: f32 = 0.2;
const LINK_PULSE: f32 = 0.1;

/// One frame: clock, globe, orbits, connections, streams.
///
/// Connections read node positions written by the orbit step of the same
/// call, so the order is fixed.
pub fn advance(scene: &mut Scene) {
    scene.clock.tick();
    let time = scene.clock.time;
    spin_globe(&mut scene.globe, time);
    integrate_orbits(&mut scene.nodes, time);
    update_connections(&mut scene.connections, &scene.nodes, time);
    update_streams(&mut scene.streams);
}

pub fn spin_globe(globe: &mut Globe, time: f32) {
    globe.rotation_y += GLOBE_SPIN;
    globe.rotation_x = (time * GLOBE_WOBBLE_RATE).sin() * GLOBE_WOBBLE;
    globe.glow_scale = 1.0 + (time * 2.0).sin() * GLOW_PULSE;
}

pub fn integrate_orbits(nodes: &mut [OrbitNode], time: f32) {
    for node in nodes {
        node.angle += node.angular_speed();
        node.position = spherical(node.radius(), node.angle, node.polar_angle());
        node.visual_scale = 1.0 + (time * NODE_PULSE_RATE + node.angle).sin() * NODE_PULSE;
    }
}

pub fn update_connections(connections: &mut [Connection], nodes: &[OrbitNode], time: f32) {
    let opacity = link_opacity(time);
    for conn in connections {
        let (a, b) = conn.nodes();
        conn.endpoints = [nodes[a].position, nodes[b].position];
        conn.opacity = opacity;
    }
}

pub fn update_streams(streams: &mut [StreamTrail]) {
    for trail in streams {
        trail.advance();
    }
}

/// Opacity shared by every connection at `time`
pub fn link_opacity(time: f32) -> f32 {
    LINK_BASE_OPACITY + (time * 2.0).sin() * LINK_PULSE
}
