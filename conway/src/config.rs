// config.rs - Host settings: TOML file plus command-line overrides

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use serde::Deserialize;

use conway_core::{
    ALTERNATE_LIVE_SEED_PROBABILITY, DEFAULT_HEIGHT, DEFAULT_LIVE_SEED_PROBABILITY,
    DEFAULT_SAVE_PATH, DEFAULT_WIDTH, EngineConfig,
};

const DEFAULT_TICK_INTERVAL_MS: u64 = 300;
const ALTERNATE_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Debug, Parser)]
#[command(name = "conway", about = "Conway's Game of Life on a toroidal grid")]
pub struct Args {
    /// TOML settings file.
    #[arg(long, conflicts_with = "alternate")]
    pub config: Option<PathBuf>,

    /// Seed for the initial random grid.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sparser seeding, one generation per second, grid lines drawn.
    #[arg(long)]
    pub alternate: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    pub live_seed_probability: f64,
    pub tick_interval_ms: u64,
    pub save_path: PathBuf,
    pub show_grid_lines: bool,
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: 20.0,
            live_seed_probability: DEFAULT_LIVE_SEED_PROBABILITY,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            show_grid_lines: false,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn alternate() -> Self {
        Self {
            live_seed_probability: ALTERNATE_LIVE_SEED_PROBABILITY,
            tick_interval_ms: ALTERNATE_TICK_INTERVAL_MS,
            show_grid_lines: true,
            ..Self::default()
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("parsing settings")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid settings in {}", path.display()))
    }

    /// Settings file (or the chosen variant's defaults) with flags applied.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None if args.alternate => Self::alternate(),
            None => Self::default(),
        };
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.engine().validate()?;
        ensure!(self.cell_size > 0.0, "cell_size must be positive, got {}", self.cell_size);
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        Ok(())
    }

    pub fn engine(&self) -> EngineConfig {
        EngineConfig {
            width: self.width,
            height: self.height,
            live_seed_probability: self.live_seed_probability,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
