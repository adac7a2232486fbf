// engine.rs - Double-buffered generation stepping with pause control

use rand::Rng;
use tracing::{debug, info};

use crate::codec;
use crate::error::{LifeError, Result};
use crate::grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Grid};
use crate::patterns::{self, Pattern};
use crate::save_slot::SaveSlot;

/// Seed probability of the primary variant.
pub const DEFAULT_LIVE_SEED_PROBABILITY: f64 = 0.5;
/// Seed probability of the sparser alternate variant.
pub const ALTERNATE_LIVE_SEED_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub live_seed_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            live_seed_probability: DEFAULT_LIVE_SEED_PROBABILITY,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::DimensionMismatch {
                expected: (DEFAULT_WIDTH, DEFAULT_HEIGHT),
                found: (self.width, self.height),
            });
        }
        if !(0.0..=1.0).contains(&self.live_seed_probability) {
            return Err(LifeError::InvalidProbability(self.live_seed_probability));
        }
        Ok(())
    }
}

/// The one rule: survive on 2 or 3, birth on exactly 3.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Simulation state owned by the host: two same-sized buffers, the index of
/// the active one, and the pause flag.
///
/// The host drives it: a periodic scheduler calls [`Simulation::advance`],
/// input handlers call [`Simulation::toggle_cell`] and
/// [`Simulation::toggle_pause`]. Nothing here spawns threads or registers
/// callbacks.
#[derive(Debug, Clone)]
pub struct Simulation {
    buffers: [Grid; 2],
    active: usize,
    paused: bool,
    generation: u64,
    live_seed_probability: f64,
}

impl Simulation {
    /// Wraps an existing grid; starts Running at generation 0.
    pub fn new(grid: Grid) -> Self {
        let scratch = Grid::new(grid.width(), grid.height());
        Self {
            buffers: [grid, scratch],
            active: 0,
            paused: false,
            generation: 0,
            live_seed_probability: DEFAULT_LIVE_SEED_PROBABILITY,
        }
    }

    /// Randomly seeded simulation.
    pub fn seeded<R: Rng + ?Sized>(config: EngineConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let grid = Grid::random(config.width, config.height, config.live_seed_probability, rng);
        info!(
            width = config.width,
            height = config.height,
            probability = config.live_seed_probability,
            live = grid.live_count(),
            "seeded simulation"
        );
        let mut sim = Self::new(grid);
        sim.live_seed_probability = config.live_seed_probability;
        Ok(sim)
    }

    pub fn grid(&self) -> &Grid {
        &self.buffers[self.active]
    }

    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.buffers[self.active]
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Generations stepped since the grid was last seeded, cleared or loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid().dimensions()
    }

    /// Flips Running/Paused and returns whether the simulation is now paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        info!(paused = self.paused, generation = self.generation, "pause toggled");
        self.paused
    }

    /// Steps one generation unless paused. Returns whether a step happened.
    pub fn advance(&mut self) -> bool {
        if self.paused {
            return false;
        }

        let (first, second) = self.buffers.split_at_mut(1);
        let (current, next) = if self.active == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        };

        for y in 0..current.height() {
            for x in 0..current.width() {
                let alive = next_state(current.get(x, y), current.count_live_neighbors(x, y));
                next.set(x, y, alive);
            }
        }

        self.active ^= 1;
        self.generation += 1;
        true
    }

    /// Flips one cell of the active grid, paused or not.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<bool> {
        self.grid_mut().toggle(x, y)
    }

    /// Swaps in a grid of the same dimensions, e.g. one fresh out of
    /// [`codec::decode`].
    pub fn install(&mut self, grid: Grid) -> Result<()> {
        if grid.dimensions() != self.dimensions() {
            return Err(LifeError::DimensionMismatch {
                expected: self.dimensions(),
                found: grid.dimensions(),
            });
        }
        self.buffers[self.active] = grid;
        self.generation = 0;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid_mut().fill(false);
        self.generation = 0;
    }

    /// Reseeds the active grid with the configured live probability.
    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (w, h) = self.dimensions();
        self.buffers[self.active] = Grid::random(w, h, self.live_seed_probability, rng);
        self.generation = 0;
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        patterns::apply_pattern(self.grid_mut(), pattern);
        self.generation = 0;
    }

    pub fn encode(&self) -> String {
        codec::encode(self.grid())
    }

    /// Decodes `text` into a fresh grid and installs it only if decoding
    /// succeeded; the active grid is untouched on error.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let (w, h) = self.dimensions();
        let grid = codec::decode(text, w, h)?;
        self.install(grid)
    }

    pub fn save_to(&self, slot: &SaveSlot) -> Result<()> {
        slot.save(self.grid())
    }

    pub fn load_from(&mut self, slot: &SaveSlot) -> Result<()> {
        let (w, h) = self.dimensions();
        let grid = slot.load(w, h)?;
        self.install(grid)?;
        debug!(live = self.grid().live_count(), "installed saved grid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid_from(rows: &[&str]) -> Grid {
        codec::decode(&rows.join("\n"), rows[0].len(), rows.len()).unwrap()
    }

    #[test]
    fn rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "live cell with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead cell with {n}");
        }
    }

    #[test]
    fn lone_center_cell_dies() {
        let mut sim = Simulation::new(grid_from(&["000", "010", "000"]));
        assert!(sim.advance());
        assert_eq!(sim.grid(), &Grid::new(3, 3));
    }

    #[test]
    fn block_is_a_still_life() {
        let mut grid = Grid::new(10, 10);
        for (x, y) in [(4, 4), (5, 4), (4, 5), (5, 5)] {
            grid.set(x, y, true);
        }
        let mut sim = Simulation::new(grid.clone());
        for _ in 0..3 {
            sim.advance();
            assert_eq!(sim.grid(), &grid);
        }
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let start = grid_from(&["00000", "00000", "01110", "00000", "00000"]);
        let turned = grid_from(&["00000", "00100", "00100", "00100", "00000"]);
        let mut sim = Simulation::new(start.clone());
        sim.advance();
        assert_eq!(sim.grid(), &turned);
        sim.advance();
        assert_eq!(sim.grid(), &start);
    }

    #[test]
    fn step_reads_only_the_previous_generation() {
        // Updated in place, the birth at (2, 1) would raise (3, 1) to three
        // neighbors and turn it on too.
        let start = grid_from(&["00000", "00000", "01110", "00000", "00000"]);
        let mut sim = Simulation::new(start);
        sim.advance();
        assert_eq!(sim.grid(), &grid_from(&["00000", "00100", "00100", "00100", "00000"]));
        assert!(!sim.grid().get(3, 1));
    }

    #[test]
    fn glider_wraps_back_to_its_start() {
        let mut grid = Grid::new(8, 8);
        patterns::apply_pattern(&mut grid, patterns::find("Glider").unwrap());
        let mut sim = Simulation::new(grid.clone());
        // A glider travels one cell diagonally every 4 generations.
        for _ in 0..4 * 8 {
            sim.advance();
        }
        assert_eq!(sim.grid(), &grid);
        assert_eq!(sim.generation(), 32);
    }

    #[test]
    fn fully_dead_and_fully_live_grids() {
        let mut sim = Simulation::new(Grid::new(5, 4));
        sim.advance();
        assert_eq!(sim.grid().live_count(), 0);

        let mut full = Grid::new(5, 4);
        full.fill(true);
        let mut sim = Simulation::new(full);
        sim.advance();
        assert_eq!(sim.grid().live_count(), 0, "every cell has 8 neighbors and dies");
    }

    #[test]
    fn paused_simulation_does_not_step() {
        let start = grid_from(&["00000", "00000", "01110", "00000", "00000"]);
        let mut sim = Simulation::new(start.clone());
        assert!(sim.toggle_pause());
        for _ in 0..5 {
            assert!(!sim.advance());
        }
        assert_eq!(sim.grid(), &start);
        assert_eq!(sim.generation(), 0);

        assert!(!sim.toggle_pause());
        assert!(sim.advance());
        assert_eq!(sim.generation(), 1);
        assert_eq!(sim.grid().live_count(), 3);
        assert!(sim.grid().get(2, 1) && sim.grid().get(2, 3));
    }

    #[test]
    fn toggle_cell_is_an_involution_even_when_paused() {
        let mut sim = Simulation::new(Grid::new(4, 4));
        sim.toggle_pause();
        assert!(sim.toggle_cell(3, 1).unwrap());
        assert!(!sim.toggle_cell(3, 1).unwrap());
        assert_eq!(sim.grid().live_count(), 0);
    }

    #[test]
    fn toggle_cell_out_of_bounds_is_an_error() {
        let mut sim = Simulation::new(Grid::new(4, 4));
        assert!(matches!(sim.toggle_cell(4, 0), Err(LifeError::OutOfBounds { .. })));
    }

    #[test]
    fn install_rejects_other_dimensions() {
        let mut sim = Simulation::new(Grid::new(4, 4));
        sim.toggle_cell(0, 0).unwrap();
        let err = sim.install(Grid::new(5, 4)).unwrap_err();
        assert!(matches!(err, LifeError::DimensionMismatch { expected: (4, 4), found: (5, 4) }));
        assert!(sim.grid().get(0, 0));
    }

    #[test]
    fn failed_load_leaves_grid_untouched() {
        let mut sim = Simulation::new(grid_from(&["101", "010"]));
        sim.advance();
        let before = sim.grid().clone();

        assert!(matches!(sim.load_str("111\n"), Err(LifeError::MalformedState { .. })));
        assert!(matches!(sim.load_str("111\n1a1\n"), Err(LifeError::MalformedState { .. })));
        assert_eq!(sim.grid(), &before);
        assert_eq!(sim.generation(), 1);

        sim.load_str("111\n111\n").unwrap();
        assert_eq!(sim.grid().live_count(), 6);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn seeded_is_deterministic_and_validated() {
        let config = EngineConfig::default();
        let a = Simulation::seeded(config, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = Simulation::seeded(config, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.dimensions(), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert!(!a.is_paused());

        let bad = EngineConfig { live_seed_probability: 1.5, ..config };
        assert!(matches!(
            Simulation::seeded(bad, &mut ChaCha8Rng::seed_from_u64(0)),
            Err(LifeError::InvalidProbability(_))
        ));
        let empty = EngineConfig { width: 0, ..config };
        assert!(Simulation::seeded(empty, &mut ChaCha8Rng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn clear_reseed_and_pattern_reset_generation() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut sim = Simulation::seeded(EngineConfig::default(), &mut rng).unwrap();
        sim.advance();
        sim.clear();
        assert_eq!(sim.grid().live_count(), 0);
        assert_eq!(sim.generation(), 0);

        sim.advance();
        sim.reseed(&mut rng);
        assert_eq!(sim.generation(), 0);
        assert!(sim.grid().live_count() > 0);

        sim.apply_pattern(patterns::find("Blinker").unwrap());
        assert_eq!(sim.grid().live_count(), 3);
    }
}
