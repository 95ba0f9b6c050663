use crate::{
    automaton::Automaton,
    config::EngineConfig,
    error::{Error, Result},
    grid::ToroidalGrid,
};
use log::{debug, trace, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn clockwise(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// One orthogonal step. North decreases `y`, East increases `x`.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Heading::North => (0, -1),
            Heading::East => (1, 0),
            Heading::South => (0, 1),
            Heading::West => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    pub fn apply(self, heading: Heading) -> Heading {
        match self {
            Turn::Left => heading.counter_clockwise(),
            Turn::Right => heading.clockwise(),
        }
    }
}

impl TryFrom<char> for Turn {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        match c {
            'L' => Ok(Turn::Left),
            'R' => Ok(Turn::Right),
            c => Err(Error::InvalidTurn(c)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Rgb(rng.gen(), rng.gen(), rng.gen())
    }
}

/// The turn taken after writing a color, and how that color is displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AntRule {
    pub turn: Turn,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntParams {
    /// One `L` or `R` per color.
    pub rule: String,
    /// One display color per character of `rule`.
    pub colors: Vec<Rgb>,
}

/// Display colors of the default twelve-color rule, in rule order.
const DEFAULT_PALETTE: [Rgb; 12] = [
    Rgb::WHITE,
    Rgb::BLACK,
    Rgb(1, 33, 105),
    Rgb(255, 127, 0),
    Rgb(31, 120, 180),
    Rgb(228, 26, 28),
    Rgb(239, 187, 255),
    Rgb(216, 150, 255),
    Rgb(190, 41, 236),
    Rgb(128, 0, 128),
    Rgb(102, 0, 102),
    Rgb(255, 0, 0),
];

/// `LLRRRLRLRLLR` with a fixed palette. Use `random_colors` for a random one.
impl Default for AntParams {
    fn default() -> Self {
        AntParams {
            rule: "LLRRRLRLRLLR".to_string(),
            colors: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl AntParams {
    /// A rule with a random display color per turn.
    pub fn random_colors<R: Rng + ?Sized>(rule: &str, rng: &mut R) -> Self {
        AntParams {
            rule: rule.to_string(),
            colors: rule.chars().map(|_| Rgb::random(rng)).collect(),
        }
    }
}

/// What a renderer should draw for one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AntTile {
    Untouched,
    Painted { index: u8, color: Rgb },
    Agent(Heading),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Agent {
    x: usize,
    y: usize,
    heading: Heading,
}

/// A single turmite walking a multi-color toroidal grid.
///
/// Cells hold `None` until the agent first writes to them.
#[derive(Clone, Debug)]
pub struct AntAutomaton {
    grid: ToroidalGrid<Option<u8>>,
    rules: Vec<AntRule>,
    agent: Option<Agent>,
    touched: Option<(usize, usize)>,
    generation: u64,
}

fn parse_rules(params: &AntParams) -> Result<Vec<AntRule>> {
    let turns = params
        .rule
        .chars()
        .map(Turn::try_from)
        .collect::<Result<Vec<_>>>()?;
    if turns.is_empty() {
        return Err(Error::EmptyTurnRule);
    }
    if turns.len() > 1 << 8 {
        return Err(Error::TooManyColors(turns.len()));
    }
    if turns.len() != params.colors.len() {
        return Err(Error::PaletteMismatch {
            rules: turns.len(),
            colors: params.colors.len(),
        });
    }
    Ok(turns
        .into_iter()
        .zip(params.colors.iter())
        .map(|(turn, &color)| AntRule { turn, color })
        .collect())
}

impl AntAutomaton {
    pub fn new(config: &EngineConfig, params: &AntParams) -> Result<Self> {
        let (rows, columns) = config.grid_size()?;
        let rules = parse_rules(params)?;
        debug!(
            "ant automaton {}x{} with rule {}",
            rows, columns, params.rule
        );
        Ok(AntAutomaton {
            grid: ToroidalGrid::new(rows, columns, None)?,
            rules,
            agent: None,
            touched: None,
            generation: 0,
        })
    }

    pub fn rules(&self) -> &[AntRule] {
        &self.rules
    }

    pub fn num_colors(&self) -> usize {
        self.rules.len()
    }

    pub fn grid(&self) -> &ToroidalGrid<Option<u8>> {
        &self.grid
    }

    /// The color index of a cell, `None` if the agent never wrote to it.
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        self.grid.get(x, y)
    }

    pub fn position(&self) -> Option<(usize, usize)> {
        self.agent.map(|agent| (agent.x, agent.y))
    }

    pub fn heading(&self) -> Option<Heading> {
        self.agent.map(|agent| agent.heading)
    }

    /// Moves the agent to `(x, y)`. The cell it stood on becomes untouched
    /// again.
    pub fn place_agent(&mut self, x: i64, y: i64, heading: Heading) {
        self.touched = None;
        if let Some(old) = self.agent {
            self.grid[(old.x, old.y)] = None;
            self.touched = Some((old.x, old.y));
        }
        let (x, y) = self.grid.wrap(x, y);
        self.agent = Some(Agent { x, y, heading });
        debug!("placed agent at ({}, {}) facing {:?}", x, y, heading);
    }

    /// Like `step`, but reports a missing agent instead of ignoring it.
    pub fn try_step(&mut self) -> Result<()> {
        let agent = self.agent.as_mut().ok_or(Error::AgentNotPlaced)?;
        let (x, y) = (agent.x, agent.y);
        let index = match self.grid[(x, y)] {
            None => 0,
            Some(index) => (index as usize + 1) % self.rules.len(),
        };
        self.grid[(x, y)] = Some(index as u8);
        agent.heading = self.rules[index].turn.apply(agent.heading);
        let (dx, dy) = agent.heading.offset();
        let (nx, ny) = self.grid.wrap(x as i64 + dx, y as i64 + dy);
        agent.x = nx;
        agent.y = ny;
        self.touched = Some((x, y));
        self.generation += 1;
        trace!(
            "ant generation {}: agent at ({}, {}) facing {:?}",
            self.generation,
            nx,
            ny,
            agent.heading
        );
        Ok(())
    }

    pub fn tile(&self, x: i64, y: i64) -> AntTile {
        let (x, y) = self.grid.wrap(x, y);
        match self.agent {
            Some(agent) if (agent.x, agent.y) == (x, y) => AntTile::Agent(agent.heading),
            _ => self.paint(x, y),
        }
    }

    fn paint(&self, x: usize, y: usize) -> AntTile {
        match self.grid[(x, y)] {
            None => AntTile::Untouched,
            Some(index) => AntTile::Painted {
                index,
                color: self.rules[index as usize].color,
            },
        }
    }

    /// Reports every cell, for a full repaint.
    pub fn render_full<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, AntTile),
    {
        for (x, y, _) in self.grid.cells() {
            f(x, y, self.tile(x as i64, y as i64));
        }
    }
}

impl Automaton for AntAutomaton {
    type Tile = AntTile;

    /// Does nothing until an agent has been placed.
    fn step(&mut self) {
        if let Err(err) = self.try_step() {
            warn!("ant step skipped: {}", err);
        }
    }

    fn reset(&mut self) {
        self.grid.fill(None);
        self.agent = None;
        self.touched = None;
        self.generation = 0;
        debug!("reset ant grid");
    }

    /// Reports only the cell written last and the agent's cell.
    fn render<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, AntTile),
    {
        if let Some((x, y)) = self.touched {
            f(x, y, self.paint(x, y));
        }
        if let Some(agent) = self.agent {
            f(agent.x, agent.y, AntTile::Agent(agent.heading));
        }
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::error::Error;

    fn ant(size: u32, rule: &str) -> AntAutomaton {
        let config = EngineConfig::new(size, size, 1);
        let params = AntParams::random_colors(rule, &mut ChaCha8Rng::seed_from_u64(1));
        AntAutomaton::new(&config, &params).unwrap()
    }

    #[test]
    fn test_headings() {
        let mut heading = Heading::North;
        for &expected in &[Heading::East, Heading::South, Heading::West, Heading::North] {
            heading = Turn::Right.apply(heading);
            assert_eq!(heading, expected);
        }
        for &expected in &[Heading::West, Heading::South, Heading::East, Heading::North] {
            heading = Turn::Left.apply(heading);
            assert_eq!(heading, expected);
        }
    }

    #[test]
    fn test_four_steps_fixture() {
        let mut ant = ant(8, "LLRR");
        ant.place_agent(0, 0, Heading::North);
        ant.advance(4);
        assert_eq!(ant.position(), Some((0, 0)));
        assert_eq!(ant.heading(), Some(Heading::North));
        for &(x, y) in &[(0, 0), (7, 0), (7, 1), (0, 1)] {
            assert_eq!(ant.get(x, y), Some(0));
        }
        ant.advance(4);
        assert_eq!(ant.position(), Some((0, 0)));
        for &(x, y) in &[(0, 0), (7, 0), (7, 1), (0, 1)] {
            assert_eq!(ant.get(x, y), Some(1));
        }
        ant.step();
        assert_eq!(ant.get(0, 0), Some(2));
        assert_eq!(ant.position(), Some((1, 0)));
        assert_eq!(ant.heading(), Some(Heading::East));
        assert_eq!(ant.generation(), 9);
    }

    #[test]
    fn test_color_cycle() {
        let mut ant = ant(1, "LLRR");
        ant.place_agent(0, 0, Heading::North);
        let mut colors = Vec::new();
        for _ in 0..5 {
            ant.step();
            assert_eq!(ant.position(), Some((0, 0)));
            colors.push(ant.get(0, 0));
        }
        assert_eq!(colors, vec![Some(0), Some(1), Some(2), Some(3), Some(0)]);
    }

    #[test]
    fn test_unplaced_agent() {
        let mut ant = ant(4, "RL");
        ant.step();
        assert_eq!(ant.generation(), 0);
        assert!(ant.grid().cells().all(|(_, _, cell)| cell.is_none()));
        assert!(matches!(ant.try_step(), Err(super::Error::AgentNotPlaced)));
        let mut tiles = 0;
        ant.render(|_, _, _| tiles += 1);
        assert_eq!(tiles, 0);
    }

    #[test]
    fn test_place_agent_clears_previous_cell() {
        let mut ant = ant(8, "LLRR");
        ant.place_agent(0, 0, Heading::North);
        ant.advance(4);
        assert_eq!(ant.get(0, 0), Some(0));
        ant.place_agent(-5, 11, Heading::East);
        assert_eq!(ant.get(0, 0), None);
        assert_eq!(ant.get(7, 0), Some(0));
        assert_eq!(ant.position(), Some((3, 3)));
        assert_eq!(ant.heading(), Some(Heading::East));
    }

    #[test]
    fn test_render() {
        let mut ant = ant(8, "LLRR");
        ant.place_agent(0, 0, Heading::North);
        ant.step();
        let color = ant.rules()[0].color;
        let mut tiles = Vec::new();
        ant.render(|x, y, tile| tiles.push((x, y, tile)));
        assert_eq!(
            tiles,
            vec![
                (0, 0, AntTile::Painted { index: 0, color }),
                (7, 0, AntTile::Agent(Heading::West)),
            ]
        );
        let mut painted = 0;
        ant.render_full(|_, _, tile| {
            if tile != AntTile::Untouched {
                painted += 1;
            }
        });
        assert_eq!(painted, 2);
    }

    #[test]
    fn test_reset() {
        let mut ant = ant(8, "RL");
        ant.place_agent(3, 3, Heading::South);
        ant.advance(20);
        ant.reset();
        assert_eq!(ant.position(), None);
        assert_eq!(ant.generation(), 0);
        let once = ant.grid().clone();
        ant.reset();
        assert_eq!(ant.grid(), &once);
        assert!(once.cells().all(|(_, _, cell)| cell.is_none()));
    }

    #[test]
    fn test_invalid_params() -> Result<(), Box<dyn Error>> {
        let config = EngineConfig::new(8, 8, 1);
        let mismatch = AntParams {
            rule: "LRL".to_string(),
            colors: vec![Rgb::WHITE, Rgb::BLACK],
        };
        assert!(matches!(
            AntAutomaton::new(&config, &mismatch),
            Err(super::Error::PaletteMismatch { rules: 3, colors: 2 })
        ));
        let invalid = AntParams {
            rule: "LXR".to_string(),
            colors: vec![Rgb::WHITE; 3],
        };
        assert!(matches!(
            AntAutomaton::new(&config, &invalid),
            Err(super::Error::InvalidTurn('X'))
        ));
        let empty = AntParams {
            rule: String::new(),
            colors: Vec::new(),
        };
        assert!(matches!(
            AntAutomaton::new(&config, &empty),
            Err(super::Error::EmptyTurnRule)
        ));
        Ok(())
    }

    #[test]
    fn test_default_params() -> Result<(), Box<dyn Error>> {
        let params = AntParams::default();
        assert_eq!(params.rule, "LLRRRLRLRLLR");
        assert_eq!(params.colors.len(), 12);
        let ant = AntAutomaton::new(&EngineConfig::new(8, 8, 1), &params)?;
        assert_eq!(ant.num_colors(), 12);
        assert_eq!(ant.rules()[0].turn, Turn::Left);
        assert_eq!(ant.rules()[2].turn, Turn::Right);
        Ok(())
    }
}
