// save_slot.rs - The single on-disk save slot

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codec;
use crate::error::{LifeError, Result};
use crate::grid::Grid;

pub const DEFAULT_SAVE_PATH: &str = "gameState.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSlot {
    path: PathBuf,
}

impl Default for SaveSlot {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_PATH)
    }
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn io_error(&self, source: io::Error) -> LifeError {
        LifeError::Io { path: self.path.clone(), source }
    }

    /// Writes the encoded grid next to the slot first and renames it into
    /// place, so an interrupted save keeps the previous contents.
    pub fn save(&self, grid: &Grid) -> Result<()> {
        let text = codec::encode(grid);
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, text.as_bytes()).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), live = grid.live_count(), "saved grid");
        Ok(())
    }

    /// Reads and decodes the slot into a fresh grid.
    pub fn load(&self, width: usize, height: usize) -> Result<Grid> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LifeError::NoSavedState { path: self.path.clone() });
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let grid = codec::decode(&text, width, height)?;
        debug!(path = %self.path.display(), live = grid.live_count(), "loaded grid");
        Ok(grid)
    }
}
