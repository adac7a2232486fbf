// main.rs - Conway's Game of Life desktop host
// Owns the window, the tick cadence and the save slot; all rules live in conway_core.

use std::time::{Duration, Instant};

use anyhow::anyhow;
use clap::Parser;
use eframe::egui;
use egui::Color32;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use conway_core::{LifeError, PATTERNS, SaveSlot, Simulation};

mod config; // TOML + CLI settings
mod ui; // eframe::App impl

use config::{Args, LifeConfig};

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args = Args::parse();
    let config = LifeConfig::from_args(&args)?;
    let app = GameOfLife::new(config)?;
    info!(
        width = app.config.width,
        height = app.config.height,
        interval_ms = app.config.tick_interval_ms,
        "starting Game of Life"
    );

    let (board_w, board_h) = app.board_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([board_w.max(640.0) + 32.0, board_h + 160.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow!("window error: {e}"))
}

pub struct GameOfLife {
    pub sim: Simulation,
    pub config: LifeConfig,
    pub slot: SaveSlot,
    rng: ChaCha8Rng,

    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,
    pub status: Option<String>,
}

impl GameOfLife {
    pub fn new(config: LifeConfig) -> anyhow::Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let sim = Simulation::seeded(config.engine(), &mut rng)?;

        Ok(Self {
            sim,
            slot: SaveSlot::new(config.save_path.clone()),
            update_interval: config.tick_interval(),
            config,
            rng,
            last_update: Instant::now(),
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
            selected_pattern: 0,
            status: None,
        })
    }

    pub fn board_size(&self) -> (f32, f32) {
        let (w, h) = self.sim.dimensions();
        (w as f32 * self.config.cell_size, h as f32 * self.config.cell_size)
    }

    /// Scheduler hook: one generation per elapsed interval while running.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.sim.is_paused() || now.duration_since(self.last_update) < self.update_interval {
            return false;
        }
        self.last_update = now;
        self.sim.advance()
    }

    /// Time left until the next scheduled generation.
    pub fn until_next_tick(&self, now: Instant) -> Duration {
        self.update_interval.saturating_sub(now.duration_since(self.last_update))
    }

    pub fn toggle_pause(&mut self) {
        if !self.sim.toggle_pause() {
            self.last_update = Instant::now();
        }
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        if let Err(e) = self.sim.toggle_cell(x, y) {
            warn!(error = %e, "ignored click outside the board");
        }
    }

    pub fn randomize(&mut self) {
        self.sim.reseed(&mut self.rng);
        self.status = None;
    }

    pub fn clear(&mut self) {
        self.sim.clear();
        self.status = None;
    }

    pub fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            self.sim.apply_pattern(pattern);
            self.status = Some(format!("Applied {}", pattern.name));
        }
    }

    pub fn save(&mut self) {
        self.status = Some(match self.sim.save_to(&self.slot) {
            Ok(()) => format!("Saved to {}", self.slot.path().display()),
            Err(e) => {
                warn!(error = %e, "save failed");
                format!("Save failed: {e}")
            }
        });
    }

    pub fn load(&mut self) {
        self.status = Some(match self.sim.load_from(&self.slot) {
            Ok(()) => format!("Loaded {}", self.slot.path().display()),
            Err(LifeError::NoSavedState { .. }) => "No saved game found.".to_owned(),
            Err(e) => {
                warn!(error = %e, "load failed, keeping current grid");
                format!("Load failed: {e}")
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn app_in(dir: &TempDir) -> GameOfLife {
        let config = LifeConfig {
            width: 6,
            height: 5,
            seed: Some(1),
            save_path: dir.path().join("gameState.txt"),
            ..LifeConfig::default()
        };
        GameOfLife::new(config).unwrap()
    }

    #[test]
    fn tick_waits_for_the_interval() {
        let dir = tempdir().unwrap();
        let mut app = app_in(&dir);
        let start = app.last_update;

        assert!(!app.tick(start + Duration::from_millis(100)));
        assert_eq!(app.sim.generation(), 0);
        assert!(app.tick(start + Duration::from_millis(300)));
        assert_eq!(app.sim.generation(), 1);
        assert_eq!(app.until_next_tick(app.last_update), app.update_interval);
    }

    #[test]
    fn tick_does_nothing_while_paused() {
        let dir = tempdir().unwrap();
        let mut app = app_in(&dir);
        app.toggle_pause();
        let later = app.last_update + Duration::from_secs(10);
        assert!(!app.tick(later));
        assert_eq!(app.sim.generation(), 0);
    }

    #[test]
    fn load_without_save_reports_notice() {
        let dir = tempdir().unwrap();
        let mut app = app_in(&dir);
        let before = app.sim.grid().clone();

        app.load();
        assert_eq!(app.status.as_deref(), Some("No saved game found."));
        assert_eq!(app.sim.grid(), &before);

        app.save();
        assert!(dir.path().join("gameState.txt").is_file());
        app.clear();
        app.load();
        assert_eq!(app.sim.grid(), &before);
    }
}
