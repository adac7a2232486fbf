//! Conway's Game of Life on a fixed-size torus.
//!
//! The crate is the simulation core only: a [`Grid`] with wraparound
//! neighbor counting, a double-buffered [`Simulation`] that a host scheduler
//! steps once per tick, and the flat `'0'`/`'1'` text [`codec`] used by the
//! [`SaveSlot`]. Windows, timers and input mapping belong to the host.

pub mod codec;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod save_slot;

pub use engine::{
    ALTERNATE_LIVE_SEED_PROBABILITY, DEFAULT_LIVE_SEED_PROBABILITY, EngineConfig, Simulation,
    next_state,
};
pub use error::{LifeError, Result};
pub use grid::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Grid};
pub use patterns::{PATTERNS, Pattern};
pub use save_slot::{DEFAULT_SAVE_PATH, SaveSlot};
