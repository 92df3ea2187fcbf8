//! Globe scene state and the one-time scene builder

use super::math::{spherical, Vec3};
use crate::colors::Hue;
use crate::error::{Error, Result};
use rand::prelude::*;
use std::f32::consts::{PI, TAU};
use std::ops::Range;

/// Parameters of a scene build. Defaults reproduce the landing page globe.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub node_count: usize,
    pub node_radius: Range<f32>,
    pub node_speed: Range<f32>,
    pub link_probability: f64,
    pub stream_count: usize,
    pub trail_length: usize,
    pub stream_radius: f32,
    pub stream_speed: Range<f32>,
    pub globe_radius: f32,
    pub glow_radius: f32,
    pub clock_step: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            node_count: 50,
            node_radius: 3.0..4.5,
            node_speed: 0.003..0.013,
            link_probability: 0.05,
            stream_count: 8,
            trail_length: 20,
            stream_radius: 2.8,
            stream_speed: 0.02..0.05,
            globe_radius: 2.5,
            glow_radius: 2.4,
            clock_step: 0.01,
        }
    }
}

/// Largest counts a scene accepts
pub const MAX_NODES: usize = 2000;
pub const MAX_STREAMS: usize = 500;
pub const MAX_TRAIL_LENGTH: usize = 1000;

fn check_count(name: &'static str, value: usize, max: usize) -> Result<()> {
    if value > max {
        return Err(Error::invalid(name, format!("{value} is more than {max}")));
    }
    Ok(())
}

fn check_speed(name: &'static str, range: &Range<f32>) -> Result<()> {
    check_range(name, range)?;
    if range.start < 0.0 || range.end <= 0.0 {
        return Err(Error::invalid(name, "speeds must be positive"));
    }
    Ok(())
}

fn check_range(name: &'static str, range: &Range<f32>) -> Result<()> {
    if !range.start.is_finite() || !range.end.is_finite() {
        return Err(Error::invalid(name, "bounds must be finite"));
    }
    if range.start > range.end {
        return Err(Error::invalid(
            name,
            format!("min {} is greater than max {}", range.start, range.end),
        ));
    }
    Ok(())
}

fn check_radius(name: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid(name, format!("{value} is not a non-negative number")));
    }
    Ok(())
}

impl SceneParams {
    pub fn validate(&self) -> Result<()> {
        check_range("node_radius", &self.node_radius)?;
        if self.node_radius.start < 0.0 {
            return Err(Error::invalid("node_radius", "radius cannot be negative"));
        }
        check_speed("node_speed", &self.node_speed)?;
        check_speed("stream_speed", &self.stream_speed)?;
        check_count("node_count", self.node_count, MAX_NODES)?;
        check_count("stream_count", self.stream_count, MAX_STREAMS)?;
        check_count("trail_length", self.trail_length, MAX_TRAIL_LENGTH)?;
        if !(0.0..=1.0).contains(&self.link_probability) {
            return Err(Error::invalid(
                "link_probability",
                format!("{} is outside 0.0..=1.0", self.link_probability),
            ));
        }
        if self.trail_length == 0 {
            return Err(Error::invalid("trail_length", "a trail needs at least one point"));
        }
        check_radius("stream_radius", self.stream_radius)?;
        check_radius("globe_radius", self.globe_radius)?;
        check_radius("glow_radius", self.glow_radius)?;
        if !self.clock_step.is_finite() || self.clock_step <= 0.0 {
            return Err(Error::invalid("clock_step", "must be a positive number"));
        }
        Ok(())
    }
}

/// Uniform sample from `range`, or the bound itself when the range is empty
fn sample(rng: &mut StdRng, range: &Range<f32>) -> f32 {
    if range.end > range.start {
        rng.gen_range(range.clone())
    } else {
        range.start
    }
}

/// A point moving on a sphere of fixed radius
#[derive(Clone, Debug)]
pub struct OrbitNode {
    radius: f32,
    polar_angle: f32,
    angular_speed: f32,
    hue: Hue,
    pub angle: f32,
    pub position: Vec3,
    pub visual_scale: f32,
}

impl OrbitNode {
    pub fn new(radius: f32, angle: f32, polar_angle: f32, angular_speed: f32, hue: Hue) -> Result<Self> {
        check_radius("radius", radius)?;
        if !angle.is_finite() || !polar_angle.is_finite() || !angular_speed.is_finite() {
            return Err(Error::invalid("orbit", "angles and speed must be finite"));
        }
        Ok(Self {
            radius,
            polar_angle,
            angular_speed,
            hue,
            angle,
            position: spherical(radius, angle, polar_angle),
            visual_scale: 1.0,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn polar_angle(&self) -> f32 {
        self.polar_angle
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    pub fn hue(&self) -> Hue {
        self.hue
    }
}

/// Edge between two nodes, addressed by index into `Scene::nodes`
#[derive(Clone, Debug)]
pub struct Connection {
    a: usize,
    b: usize,
    pub endpoints: [Vec3; 2],
    pub opacity: f32,
}

impl Connection {
    pub fn nodes(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

/// Fixed-length comet tail, head at index 0
#[derive(Clone, Debug)]
pub struct StreamTrail {
    points: Box<[Vec3]>,
    radius: f32,
    polar_angle: f32,
    angular_speed: f32,
    pub angle: f32,
}

impl StreamTrail {
    pub fn new(length: usize, radius: f32, angle: f32, polar_angle: f32, angular_speed: f32) -> Self {
        Self {
            points: vec![Vec3::ORIGIN; length].into_boxed_slice(),
            radius,
            polar_angle,
            angular_speed,
            angle,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Advance the head one step and drop the oldest sample
    pub fn advance(&mut self) {
        self.angle += self.angular_speed;
        let len = self.points.len();
        if len == 0 {
            return;
        }
        self.points.copy_within(0..len - 1, 1);
        self.points[0] = spherical(self.radius, self.angle, self.polar_angle);
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Clock {
    pub time: f32,
    pub step: f32,
    ticks: u64,
}

impl Clock {
    pub fn new(step: f32) -> Self {
        Self { time: 0.0, step, ticks: 0 }
    }

    pub fn tick(&mut self) {
        self.time += self.step;
        self.ticks += 1;
    }

    /// Number of steps taken so far
    pub fn frames(&self) -> u64 {
        self.ticks
    }
}

/// Wireframe sphere plus its inner glow
#[derive(Clone, Copy, Debug)]
pub struct Globe {
    pub radius: f32,
    pub glow_radius: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub glow_scale: f32,
}

/// Everything the frame driver mutates
#[derive(Clone, Debug)]
pub struct Scene {
    pub clock: Clock,
    pub globe: Globe,
    pub nodes: Vec<OrbitNode>,
    pub connections: Vec<Connection>,
    pub streams: Vec<StreamTrail>,
}

impl Scene {
    /// Build a scene from parameters. Counts are fixed for the scene's life.
    pub fn build(params: &SceneParams, rng: &mut StdRng) -> Result<Self> {
        params.validate()?;

        let mut nodes = Vec::with_capacity(params.node_count);
        for _ in 0..params.node_count {
            let hue = Hue::pick(rng);
            let radius = sample(rng, &params.node_radius);
            let angle = rng.gen_range(0.0..TAU);
            let polar = rng.gen_range(0.0..PI);
            let speed = sample(rng, &params.node_speed);
            nodes.push(OrbitNode::new(radius, angle, polar, speed, hue)?);
        }

        let connections = link_pairs(&nodes, params.link_probability, rng);

        let streams = (0..params.stream_count)
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                let polar = rng.gen_range(0.0..PI);
                let speed = sample(rng, &params.stream_speed);
                StreamTrail::new(params.trail_length, params.stream_radius, angle, polar, speed)
            })
            .collect();

        tracing::debug!(
            nodes = nodes.len(),
            connections = connections.len(),
            streams = params.stream_count,
            "globe scene built"
        );

        Ok(Self::from_parts(params, nodes, connections, streams))
    }

    /// Assemble a scene from prepared nodes, linking every listed pair
    #[cfg(test)]
    pub fn with_nodes(params: &SceneParams, nodes: Vec<OrbitNode>, links: &[(usize, usize)]) -> Result<Self> {
        params.validate()?;
        let mut connections = Vec::with_capacity(links.len());
        for &(a, b) in links {
            if a >= nodes.len() || b >= nodes.len() || a == b {
                return Err(Error::invalid("links", format!("({a}, {b}) is not a pair of distinct nodes")));
            }
            connections.push(connect(&nodes, a, b));
        }
        Ok(Self::from_parts(params, nodes, connections, Vec::new()))
    }

    fn from_parts(
        params: &SceneParams,
        nodes: Vec<OrbitNode>,
        connections: Vec<Connection>,
        streams: Vec<StreamTrail>,
    ) -> Self {
        Self {
            clock: Clock::new(params.clock_step),
            globe: Globe {
                radius: params.globe_radius,
                glow_radius: params.glow_radius,
                rotation_x: 0.0,
                rotation_y: 0.0,
                glow_scale: 1.0,
            },
            nodes,
            connections,
            streams,
        }
    }
}

fn connect(nodes: &[OrbitNode], a: usize, b: usize) -> Connection {
    Connection {
        a,
        b,
        endpoints: [nodes[a].position, nodes[b].position],
        opacity: 0.3,
    }
}

/// One Bernoulli trial per unordered pair
fn link_pairs(nodes: &[OrbitNode], probability: f64, rng: &mut StdRng) -> Vec<Connection> {
    let mut connections = Vec::new();
    for i in 0..nodes.len() {
        for j in i + 1..nodes.len() {
            if rng.gen_bool(probability) {
                connections.push(connect(nodes, i, j));
            }
        }
    }
    connections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn default_build_matches_counts() {
        let params = SceneParams::default();
        let scene = Scene::build(&params, &mut rng()).unwrap();
        assert_eq!(scene.nodes.len(), 50);
        assert_eq!(scene.streams.len(), 8);
        for trail in &scene.streams {
            assert_eq!(trail.points().len(), 20);
            assert!(trail.points().iter().all(|p| *p == Vec3::ORIGIN));
        }
    }

    #[test]
    fn nodes_sampled_inside_ranges() {
        let params = SceneParams::default();
        let scene = Scene::build(&params, &mut rng()).unwrap();
        for node in &scene.nodes {
            assert!(params.node_radius.contains(&node.radius()));
            assert!(params.node_speed.contains(&node.angular_speed()));
            assert!((0.0..TAU).contains(&node.angle));
            assert!((0.0..PI).contains(&node.polar_angle()));
        }
    }

    #[test]
    fn certain_link_between_two_nodes() {
        let params = SceneParams {
            node_count: 2,
            link_probability: 1.0,
            ..SceneParams::default()
        };
        let scene = Scene::build(&params, &mut rng()).unwrap();
        assert_eq!(scene.connections.len(), 1);
        assert_eq!(scene.connections[0].nodes(), (0, 1));
    }

    #[test]
    fn full_probability_links_every_pair_once() {
        let params = SceneParams {
            node_count: 6,
            link_probability: 1.0,
            ..SceneParams::default()
        };
        let scene = Scene::build(&params, &mut rng()).unwrap();
        assert_eq!(scene.connections.len(), 15);
        for conn in &scene.connections {
            let (a, b) = conn.nodes();
            assert!(a < b);
        }
    }

    #[test]
    fn zero_probability_leaves_nodes_isolated() {
        let params = SceneParams {
            link_probability: 0.0,
            ..SceneParams::default()
        };
        let scene = Scene::build(&params, &mut rng()).unwrap();
        assert!(scene.connections.is_empty());
    }

    #[test]
    fn same_seed_same_scene() {
        let params = SceneParams::default();
        let a = Scene::build(&params, &mut rng()).unwrap();
        let b = Scene::build(&params, &mut rng()).unwrap();
        assert_eq!(a.connections.len(), b.connections.len());
        for (na, nb) in a.nodes.iter().zip(&b.nodes) {
            assert_eq!(na.position, nb.position);
        }
    }

    #[test]
    fn degenerate_range_uses_bound() {
        let params = SceneParams {
            node_radius: 5.0..5.0,
            node_speed: 0.1..0.1,
            ..SceneParams::default()
        };
        let scene = Scene::build(&params, &mut rng()).unwrap();
        assert!(scene.nodes.iter().all(|n| n.radius() == 5.0 && n.angular_speed() == 0.1));
    }

    #[test]
    fn invalid_params_rejected() {
        let bad_probability = SceneParams {
            link_probability: 1.5,
            ..SceneParams::default()
        };
        assert!(matches!(
            bad_probability.validate(),
            Err(Error::InvalidParameter { name: "link_probability", .. })
        ));

        let inverted = SceneParams {
            node_radius: 4.0..3.0,
            ..SceneParams::default()
        };
        assert!(inverted.validate().is_err());

        let empty_trail = SceneParams {
            trail_length: 0,
            ..SceneParams::default()
        };
        assert!(empty_trail.validate().is_err());
    }

    #[test]
    fn oversized_counts_rejected() {
        let huge_trail = SceneParams {
            trail_length: usize::MAX,
            stream_count: 1,
            ..SceneParams::default()
        };
        assert!(matches!(
            huge_trail.validate(),
            Err(Error::InvalidParameter { name: "trail_length", .. })
        ));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Scene::build(&huge_trail, &mut rng).is_err());

        let crowd = SceneParams {
            node_count: MAX_NODES + 1,
            ..SceneParams::default()
        };
        assert!(matches!(
            crowd.validate(),
            Err(Error::InvalidParameter { name: "node_count", .. })
        ));

        let flood = SceneParams {
            stream_count: usize::MAX,
            ..SceneParams::default()
        };
        assert!(matches!(
            flood.validate(),
            Err(Error::InvalidParameter { name: "stream_count", .. })
        ));

        let at_limits = SceneParams {
            node_count: MAX_NODES,
            stream_count: MAX_STREAMS,
            trail_length: MAX_TRAIL_LENGTH,
            ..SceneParams::default()
        };
        assert!(at_limits.validate().is_ok());
    }

    #[test]
    fn clock_counts_every_tick_on_long_runs() {
        let mut clock = Clock::new(0.001);
        for _ in 0..3_000_000 {
            clock.tick();
        }
        assert_eq!(clock.frames(), 3_000_000);
    }

    #[test]
    fn speeds_must_be_positive() {
        let backwards = SceneParams {
            node_speed: -0.5..-0.1,
            ..SceneParams::default()
        };
        assert!(matches!(
            backwards.validate(),
            Err(Error::InvalidParameter { name: "node_speed", .. })
        ));

        let frozen = SceneParams {
            stream_speed: 0.0..0.0,
            ..SceneParams::default()
        };
        assert!(matches!(
            frozen.validate(),
            Err(Error::InvalidParameter { name: "stream_speed", .. })
        ));
    }

    #[test]
    fn orbit_node_rejects_bad_input() {
        assert!(OrbitNode::new(-1.0, 0.0, 0.0, 0.1, Hue::Cyan).is_err());
        assert!(OrbitNode::new(1.0, f32::NAN, 0.0, 0.1, Hue::Cyan).is_err());
        assert!(OrbitNode::new(1.0, 0.0, 0.0, 0.1, Hue::Cyan).is_ok());
    }

    #[test]
    fn with_nodes_rejects_self_links() {
        let nodes = vec![OrbitNode::new(1.0, 0.0, 1.0, 0.1, Hue::Cyan).unwrap()];
        assert!(Scene::with_nodes(&SceneParams::default(), nodes, &[(0, 0)]).is_err());
    }
}
