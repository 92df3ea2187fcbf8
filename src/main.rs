mod braille;
mod colors;
mod config;
mod error;
mod globe;
mod help;
mod logging;
mod settings;
mod site;
mod terminal;
mod viz;

use clap::{Parser, Subcommand};
use colors::SCHEME_COUNT;
use config::{GlobeConfig, SiteConfig, VizConfig, VizType};
use error::{Error, Result};
use settings::Settings;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_FRAME_TIME: f32 = 0.016;
const MATRIX_FRAME_TIME: f32 = 0.05;
const MAX_FRAME_TIME: f32 = 10.0;

#[derive(Parser)]
#[command(name = "neuralglobe")]
#[command(author = "AIEC IITM")]
#[command(version)]
#[command(about = "Terminal AI landing page: wireframe globe, orbiting nodes and neural backgrounds", long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/neuralglobe/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rotating wireframe globe with orbiting nodes and data streams
    Globe {
        /// Seconds per frame
        #[arg(short, long)]
        time: Option<f32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of orbiting nodes
        #[arg(long)]
        nodes: Option<usize>,

        /// Number of data streams
        #[arg(long)]
        streams: Option<usize>,

        /// Points kept per stream trail
        #[arg(long)]
        trail_length: Option<usize>,

        /// Chance that any two nodes are linked (0.0-1.0)
        #[arg(long)]
        link_probability: Option<f64>,
    },

    /// Run a single effect (neural, matrix, embers, drift, loader, typing)
    Viz {
        /// Type of effect: neural, matrix, embers, drift, loader, typing
        #[arg(short = 'T', long, default_value = "neural")]
        viz_type: String,

        /// Seconds per frame
        #[arg(short, long)]
        time: Option<f32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// The whole landing page: loader, hero, globe and footer
    Site {
        /// Seconds per frame
        #[arg(short, long)]
        time: Option<f32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Go straight to the page
        #[arg(long)]
        skip_loader: bool,
    },
}

/// CLI flag, then settings file, then the mode's default
fn frame_time(flag: Option<f32>, settings: &Settings, fallback: f32) -> Result<f32> {
    let time = flag.or(settings.display.frame_time).unwrap_or(fallback);
    if !time.is_finite() || time <= 0.0 {
        return Err(Error::invalid("time", format!("{time} is not a positive number of seconds")));
    }
    if time > MAX_FRAME_TIME {
        return Err(Error::invalid("time", format!("{time} is longer than {MAX_FRAME_TIME} seconds")));
    }
    Ok(time)
}

fn load_settings(path: Option<&PathBuf>) -> Settings {
    match Settings::load(path.map(PathBuf::as_path)) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(%err, "ignoring settings file");
            eprintln!("Warning: {err}. Using defaults.");
            Settings::default()
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_ref());
    let color_scheme = settings.display.color_scheme.unwrap_or(0) % SCHEME_COUNT;

    match cli.command {
        Commands::Globe {
            time,
            seed,
            nodes,
            streams,
            trail_length,
            link_probability,
        } => {
            let mut params = settings.scene_params();
            params.node_count = nodes.unwrap_or(params.node_count);
            params.stream_count = streams.unwrap_or(params.stream_count);
            params.trail_length = trail_length.unwrap_or(params.trail_length);
            params.link_probability = link_probability.unwrap_or(params.link_probability);

            let config = GlobeConfig {
                params,
                time_step: frame_time(time, &settings, DEFAULT_FRAME_TIME)?,
                seed,
                color_scheme,
            };
            globe::run(&config)
        }
        Commands::Viz { viz_type, time, seed } => {
            let kind = VizType::parse(&viz_type).unwrap_or_else(|| {
                tracing::warn!(%viz_type, "unknown effect");
                eprintln!("Unknown viz type: {}. Using neural.", viz_type);
                eprintln!("Available: {}", VizType::NAMES);
                VizType::Neural
            });
            let fallback = if kind == VizType::Matrix { MATRIX_FRAME_TIME } else { DEFAULT_FRAME_TIME };
            let config = VizConfig {
                viz_type: kind,
                time_step: frame_time(time, &settings, fallback)?,
                seed,
                color_scheme,
                headlines: settings.headlines(),
            };
            viz::run(&config)
        }
        Commands::Site { time, seed, skip_loader } => {
            let config = SiteConfig {
                globe: settings.scene_params(),
                time_step: frame_time(time, &settings, DEFAULT_FRAME_TIME)?,
                seed,
                color_scheme,
                skip_loader,
                headlines: settings.headlines(),
            };
            site::run(&config)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log = logging::init(cli.verbose);
    tracing::debug!(log = ?log, "neuralglobe starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "exiting with error");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
