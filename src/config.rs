use crate::globe::scene::SceneParams;
use rand::prelude::*;

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Configuration for the full-screen globe
#[derive(Clone)]
pub struct GlobeConfig {
    pub params: SceneParams,
    pub time_step: f32,
    pub seed: Option<u64>,
    pub color_scheme: u8,
}

impl GlobeConfig {
    pub fn rng(&self) -> StdRng {
        seeded(self.seed)
    }
}

/// Standalone effects
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VizType {
    Neural,   // Drifting neurons joined by proximity links
    Matrix,   // Katakana rain with fading trails
    Embers,   // Footer particles rising off the bottom edge
    Drift,    // Hero particles easing back and forth
    Loader,   // Boot progress bar
    Typing,   // Typewriter headlines
}

impl VizType {
    pub const NAMES: &'static str = "neural, matrix, embers, drift, loader, typing";

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "neural" | "network" | "neurons" => Some(Self::Neural),
            "matrix" | "rain" => Some(Self::Matrix),
            "embers" | "footer" | "rise" => Some(Self::Embers),
            "drift" | "hero" | "particles" => Some(Self::Drift),
            "loader" | "boot" | "progress" => Some(Self::Loader),
            "typing" | "typewriter" | "type" => Some(Self::Typing),
            _ => None,
        }
    }
}

/// Word lists for the typewriter lines
#[derive(Clone, Debug, PartialEq)]
pub struct Headlines {
    pub hero: Vec<String>,
    pub footer: Vec<String>,
}

impl Default for Headlines {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            hero: owned(&[
                "Artificial Intelligence",
                "Machine Learning",
                "Deep Learning",
                "Neural Networks",
                "Future Technology",
            ]),
            footer: owned(&[
                "© 2025 AIEC IITM — Powering the Future with AI",
                "Innovate • Build • Inspire • Lead",
                "Join the AI Revolution",
            ]),
        }
    }
}

/// Configuration for a single effect
#[derive(Clone)]
pub struct VizConfig {
    pub viz_type: VizType,
    pub time_step: f32,
    pub seed: Option<u64>,
    pub color_scheme: u8,
    pub headlines: Headlines,
}

impl VizConfig {
    pub fn rng(&self) -> StdRng {
        seeded(self.seed)
    }
}

/// Configuration for the whole landing page
#[derive(Clone)]
pub struct SiteConfig {
    pub globe: SceneParams,
    pub time_step: f32,
    pub seed: Option<u64>,
    pub color_scheme: u8,
    pub skip_loader: bool,
    pub headlines: Headlines,
}

impl SiteConfig {
    pub fn rng(&self) -> StdRng {
        seeded(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viz_names_and_aliases() {
        assert_eq!(VizType::parse("Neural"), Some(VizType::Neural));
        assert_eq!(VizType::parse("rain"), Some(VizType::Matrix));
        assert_eq!(VizType::parse("typewriter"), Some(VizType::Typing));
        assert_eq!(VizType::parse("donut"), None);
        for name in VizType::NAMES.split(", ") {
            assert!(VizType::parse(name).is_some(), "{name}");
        }
    }

    #[test]
    fn seeded_rng_repeats() {
        let mut a = seeded(Some(9));
        let mut b = seeded(Some(9));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
