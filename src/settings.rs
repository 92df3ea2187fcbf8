use crate::config::Headlines;
use crate::error::{Error, Result};
use crate::globe::scene::SceneParams;
use serde::Deserialize;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Optional overrides read from `config.toml`
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub globe: GlobeSettings,
    #[serde(default)]
    pub typing: TypingSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// `{ min = .., max = .. }` table
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct RangeSetting {
    pub min: f32,
    pub max: f32,
}

impl From<RangeSetting> for Range<f32> {
    fn from(r: RangeSetting) -> Self {
        r.min..r.max
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct GlobeSettings {
    pub node_count: Option<usize>,
    pub node_radius: Option<RangeSetting>,
    pub node_speed: Option<RangeSetting>,
    pub link_probability: Option<f64>,
    pub stream_count: Option<usize>,
    pub trail_length: Option<usize>,
    pub stream_radius: Option<f32>,
    pub stream_speed: Option<RangeSetting>,
    pub globe_radius: Option<f32>,
    pub glow_radius: Option<f32>,
    pub clock_step: Option<f32>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct TypingSettings {
    pub hero_words: Option<Vec<String>>,
    pub footer_words: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct DisplaySettings {
    pub color_scheme: Option<u8>,  // 0-9, same as Shift+digit
    pub frame_time: Option<f32>,   // Seconds per frame
}

impl Settings {
    /// Load from `path`, or from the default location. A missing file is not
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let settings = toml::from_str(&content).map_err(|source| Error::Settings {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("neuralglobe")
            .join("config.toml")
    }

    /// Scene parameters with every `[globe]` override applied
    pub fn scene_params(&self) -> SceneParams {
        let g = &self.globe;
        let d = SceneParams::default();
        SceneParams {
            node_count: g.node_count.unwrap_or(d.node_count),
            node_radius: g.node_radius.map(Into::into).unwrap_or(d.node_radius),
            node_speed: g.node_speed.map(Into::into).unwrap_or(d.node_speed),
            link_probability: g.link_probability.unwrap_or(d.link_probability),
            stream_count: g.stream_count.unwrap_or(d.stream_count),
            trail_length: g.trail_length.unwrap_or(d.trail_length),
            stream_radius: g.stream_radius.unwrap_or(d.stream_radius),
            stream_speed: g.stream_speed.map(Into::into).unwrap_or(d.stream_speed),
            globe_radius: g.globe_radius.unwrap_or(d.globe_radius),
            glow_radius: g.glow_radius.unwrap_or(d.glow_radius),
            clock_step: g.clock_step.unwrap_or(d.clock_step),
        }
    }

    /// Typewriter word lists; empty lists fall back to the defaults
    pub fn headlines(&self) -> Headlines {
        let defaults = Headlines::default();
        let pick = |words: &Option<Vec<String>>, fallback: Vec<String>| match words {
            Some(list) if !list.is_empty() => list.clone(),
            _ => fallback,
        };
        Headlines {
            hero: pick(&self.typing.hero_words, defaults.hero),
            footer: pick(&self.typing.footer_words, defaults.footer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.scene_params(), SceneParams::default());
        assert_eq!(settings.headlines(), Headlines::default());
    }

    #[test]
    fn overrides_apply_to_scene_params() {
        let file = write_config(
            r#"
            [globe]
            node_count = 12
            link_probability = 0.5
            node_radius = { min = 3.5, max = 4.0 }
            trail_length = 8

            [display]
            color_scheme = 5
            frame_time = 0.05
            "#,
        );
        let settings = Settings::load(Some(file.path())).unwrap();
        let params = settings.scene_params();

        assert_eq!(params.node_count, 12);
        assert_eq!(params.link_probability, 0.5);
        assert_eq!(params.node_radius, 3.5..4.0);
        assert_eq!(params.trail_length, 8);
        assert_eq!(params.stream_count, SceneParams::default().stream_count);
        assert_eq!(settings.display.color_scheme, Some(5));
        assert_eq!(settings.display.frame_time, Some(0.05));
    }

    #[test]
    fn typing_words_replace_defaults() {
        let file = write_config(
            r#"
            [typing]
            hero_words = ["Robotics", "Vision"]
            footer_words = []
            "#,
        );
        let headlines = Settings::load(Some(file.path())).unwrap().headlines();
        assert_eq!(headlines.hero, vec!["Robotics".to_string(), "Vision".to_string()]);
        assert_eq!(headlines.footer, Headlines::default().footer);
    }

    #[test]
    fn malformed_file_reports_path() {
        let file = write_config("[globe]\nnode_count = \"many\"\n");
        match Settings::load(Some(file.path())) {
            Err(Error::Settings { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected settings error, got {other:?}"),
        }
    }

    #[test]
    fn default_path_is_under_config_dir() {
        let path = Settings::config_path();
        assert!(path.ends_with("neuralglobe/config.toml"));
    }
}
