use crate::error::{Error, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Display geometry and seeding shared by every automaton.
///
/// The engine never draws; the geometry only decides the grid dimensions and
/// lets a renderer or an input layer translate between pixels and cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub border_width: u32,
    /// Seed for `randomize`. Without one the generator is seeded from entropy.
    pub seed: Option<u64>,
}

/// The rectangle a renderer fills for one cell, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            width: 1280,
            height: 720,
            cell_size: 4,
            border_width: 0,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        EngineConfig {
            width,
            height,
            cell_size,
            ..Default::default()
        }
    }

    pub fn with_border(mut self, border_width: u32) -> Self {
        self.border_width = border_width;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// `(rows, columns)`: how many whole cells fit horizontally and vertically.
    pub fn grid_size(&self) -> Result<(usize, usize)> {
        if self.cell_size == 0 {
            return Err(Error::ZeroCellSize);
        }
        if self.border_width >= self.cell_size {
            return Err(Error::BorderTooWide {
                border_width: self.border_width,
                cell_size: self.cell_size,
            });
        }
        let rows = (self.width / self.cell_size) as usize;
        let columns = (self.height / self.cell_size) as usize;
        if rows == 0 || columns == 0 {
            return Err(Error::EmptyGrid { rows, columns });
        }
        Ok((rows, columns))
    }

    pub fn cell_rect(&self, x: usize, y: usize) -> CellRect {
        let side = self.cell_size.saturating_sub(self.border_width);
        CellRect {
            x: x as i64 * self.cell_size as i64,
            y: y as i64 * self.cell_size as i64,
            width: side,
            height: side,
        }
    }

    /// Maps a pointer position to grid space. The result may lie outside the
    /// grid; the automata wrap it.
    pub fn grid_coord(&self, px: i64, py: i64) -> Result<(i64, i64)> {
        if self.cell_size == 0 {
            return Err(Error::ZeroCellSize);
        }
        let size = self.cell_size as i64;
        Ok((px.div_euclid(size), py.div_euclid(size)))
    }

    pub(crate) fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
