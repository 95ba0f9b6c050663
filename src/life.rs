use crate::{
    automaton::Automaton,
    config::EngineConfig,
    error::{Error, Result},
    grid::ToroidalGrid,
    rule::LifeRule,
};
use log::{debug, trace};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeCell {
    Dead,
    Live,
}

impl LifeCell {
    pub fn is_live(self) -> bool {
        self == LifeCell::Live
    }

    pub fn toggled(self) -> Self {
        match self {
            LifeCell::Dead => LifeCell::Live,
            LifeCell::Live => LifeCell::Dead,
        }
    }
}

impl Default for LifeCell {
    fn default() -> Self {
        LifeCell::Dead
    }
}

impl From<bool> for LifeCell {
    fn from(alive: bool) -> Self {
        if alive {
            LifeCell::Live
        } else {
            LifeCell::Dead
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeParams {
    /// A life-like rulestring such as `B3/S23`.
    pub rule: String,
    /// Probability that `randomize_default` spawns a live cell.
    pub density: f64,
}

impl Default for LifeParams {
    fn default() -> Self {
        LifeParams {
            rule: "B3/S23".to_string(),
            density: 0.4,
        }
    }
}

/// Binary life-like automaton with synchronous update.
#[derive(Clone, Debug)]
pub struct LifeAutomaton {
    grid: ToroidalGrid<LifeCell>,
    next: ToroidalGrid<LifeCell>,
    rule: LifeRule,
    density: f64,
    rng: ChaCha8Rng,
    generation: u64,
}

fn check_density(density: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(Error::DensityOutOfRange(density))
    }
}

impl LifeAutomaton {
    pub fn new(config: &EngineConfig, params: &LifeParams) -> Result<Self> {
        let (rows, columns) = config.grid_size()?;
        let rule = params.rule.parse()?;
        let density = check_density(params.density)?;
        let grid = ToroidalGrid::new(rows, columns, LifeCell::Dead)?;
        debug!("life automaton {}x{} with rule {}", rows, columns, rule);
        Ok(LifeAutomaton {
            next: grid.clone(),
            grid,
            rule,
            density,
            rng: config.rng(),
            generation: 0,
        })
    }

    pub fn rule(&self) -> LifeRule {
        self.rule
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn grid(&self) -> &ToroidalGrid<LifeCell> {
        &self.grid
    }

    pub fn get(&self, x: i64, y: i64) -> LifeCell {
        self.grid.get(x, y)
    }

    pub fn set(&mut self, x: i64, y: i64, cell: LifeCell) {
        self.grid.set(x, y, cell);
    }

    pub fn toggle(&mut self, x: i64, y: i64) {
        let cell = self.grid.get(x, y);
        self.grid.set(x, y, cell.toggled());
    }

    pub fn population(&self) -> usize {
        self.grid.cells().filter(|(_, _, cell)| cell.is_live()).count()
    }

    /// Makes each cell live with probability `density`, independently.
    pub fn randomize(&mut self, density: f64) -> Result<()> {
        let density = check_density(density)?;
        self.scatter(density);
        Ok(())
    }

    /// Randomizes with the density given at construction.
    pub fn randomize_default(&mut self) {
        self.scatter(self.density);
    }

    fn scatter(&mut self, density: f64) {
        for (_, _, cell) in self.grid.cells_mut() {
            *cell = self.rng.gen_bool(density).into();
        }
        self.generation = 0;
        debug!("randomized life grid with density {}", density);
    }
}

fn live_neighbors(grid: &ToroidalGrid<LifeCell>, x: usize, y: usize) -> usize {
    grid.neighbors8(x as i64, y as i64)
        .iter()
        .filter(|cell| cell.is_live())
        .count()
}

impl Automaton for LifeAutomaton {
    type Tile = LifeCell;

    fn step(&mut self) {
        let rule = self.rule;
        self.grid.evolve_into(&mut self.next, |grid, x, y| {
            let alive = grid[(x, y)].is_live();
            rule.next_state(alive, live_neighbors(grid, x, y)).into()
        });
        std::mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;
        trace!(
            "life generation {}: population {}",
            self.generation,
            self.population()
        );
    }

    fn reset(&mut self) {
        self.grid.fill(LifeCell::Dead);
        self.generation = 0;
        debug!("reset life grid");
    }

    fn render<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, LifeCell),
    {
        for (x, y, &cell) in self.grid.cells() {
            f(x, y, cell);
        }
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn life(rows: u32, columns: u32) -> LifeAutomaton {
        let config = EngineConfig::new(rows, columns, 1).with_seed(7);
        LifeAutomaton::new(&config, &LifeParams::default()).unwrap()
    }

    fn live_cells(life: &LifeAutomaton) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        life.render(|x, y, cell| {
            if cell.is_live() {
                cells.push((x, y));
            }
        });
        cells
    }

    #[test]
    fn test_block_is_still() {
        let mut life = life(6, 6);
        for &(x, y) in &[(1, 1), (1, 2), (2, 1), (2, 2)] {
            life.toggle(x, y);
        }
        let before = live_cells(&life);
        life.step();
        assert_eq!(live_cells(&life), before);
        assert_eq!(life.generation(), 1);
    }

    #[test]
    fn test_blinker() {
        let mut life = life(6, 6);
        for &(x, y) in &[(2, 1), (2, 2), (2, 3)] {
            life.toggle(x, y);
        }
        life.step();
        assert_eq!(live_cells(&life), vec![(1, 2), (2, 2), (3, 2)]);
        life.step();
        assert_eq!(live_cells(&life), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_blinker_across_edge() {
        let mut life = life(5, 5);
        for &(x, y) in &[(0, 4), (0, 5), (0, 6)] {
            life.toggle(x, y);
        }
        assert_eq!(live_cells(&life), vec![(0, 0), (0, 1), (0, 4)]);
        life.step();
        assert_eq!(live_cells(&life), vec![(0, 0), (1, 0), (4, 0)]);
    }

    #[test]
    fn test_toggle() {
        let mut life = life(4, 4);
        life.toggle(-1, 4);
        assert_eq!(life.get(3, 0), LifeCell::Live);
        life.toggle(3, 0);
        assert_eq!(life.get(3, 0), LifeCell::Dead);
    }

    #[test]
    fn test_randomize_extremes() -> Result<(), Box<dyn Error>> {
        let mut life = life(8, 5);
        life.randomize(1.0)?;
        assert_eq!(life.population(), 40);
        life.randomize(0.0)?;
        assert_eq!(life.population(), 0);
        assert!(life.randomize(1.5).is_err());
        assert!(life.randomize(-0.1).is_err());
        assert!(life.randomize(f64::NAN).is_err());
        Ok(())
    }

    #[test]
    fn test_randomize_is_seeded() {
        let mut a = life(16, 16);
        let mut b = life(16, 16);
        a.randomize_default();
        b.randomize_default();
        assert_eq!(a.grid(), b.grid());
        assert!(a.population() > 0);
    }

    #[test]
    fn test_invalid_params() {
        let config = EngineConfig::new(10, 10, 1);
        let params = LifeParams {
            density: 2.0,
            ..Default::default()
        };
        assert!(LifeAutomaton::new(&config, &params).is_err());
        let params = LifeParams {
            rule: "nonsense".to_string(),
            ..Default::default()
        };
        assert!(LifeAutomaton::new(&config, &params).is_err());
    }

    #[test]
    fn test_reset() {
        let mut life = life(6, 6);
        life.toggle(1, 1);
        life.step();
        life.reset();
        let once = life.grid().clone();
        life.reset();
        assert_eq!(life.grid(), &once);
        assert_eq!(life.population(), 0);
        assert_eq!(life.generation(), 0);
    }

    #[test]
    fn test_highlife_replicator_seed() -> Result<(), Box<dyn Error>> {
        let config = EngineConfig::new(8, 8, 1);
        let params = LifeParams {
            rule: "B36/S23".to_string(),
            density: 0.5,
        };
        let mut life = LifeAutomaton::new(&config, &params)?;
        for &(x, y) in &[(2, 2), (2, 3), (2, 4), (3, 2), (4, 2), (4, 4)] {
            life.toggle(x, y);
        }
        life.step();
        assert_eq!(life.get(3, 3), LifeCell::Live);
        Ok(())
    }
}
