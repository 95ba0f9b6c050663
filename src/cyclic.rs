use crate::{
    automaton::Automaton,
    config::EngineConfig,
    error::{Error, Result},
    grid::ToroidalGrid,
};
use log::{debug, trace};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// A cell of a cyclic automaton.
///
/// The declaration order of the dominance symbols is also the tie-break
/// order of `step`: the earliest symbol wins a tied vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Background. Neither beats nor is beaten by anything.
    Empty,
    Rock,
    Paper,
    Scissors,
    Lizard,
    Spock,
}

impl Symbol {
    fn slot(self) -> Option<usize> {
        match self {
            Symbol::Empty => None,
            Symbol::Rock => Some(0),
            Symbol::Paper => Some(1),
            Symbol::Scissors => Some(2),
            Symbol::Lizard => Some(3),
            Symbol::Spock => Some(4),
        }
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::Empty
    }
}

const THREE: [Symbol; 3] = [Symbol::Rock, Symbol::Paper, Symbol::Scissors];
const FIVE: [Symbol; 5] = [
    Symbol::Rock,
    Symbol::Paper,
    Symbol::Scissors,
    Symbol::Lizard,
    Symbol::Spock,
];

// Bit `j` of entry `i` is set when slot `i` beats slot `j`.
// The five-symbol table is the standard Rock-Paper-Scissors-Lizard-Spock one
// (Rock crushes Lizard), not the rotated ordering of later Python revisions.
const BEATS_THREE: [u8; 5] = [0b00100, 0b00001, 0b00010, 0, 0];
const BEATS_FIVE: [u8; 5] = [0b01100, 0b10001, 0b01010, 0b10010, 0b00101];

/// Which dominance table is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CyclicVariant {
    /// Rock beats Scissors beats Paper beats Rock.
    Three,
    /// Rock-Paper-Scissors-Lizard-Spock; every symbol beats exactly two others.
    Five,
}

impl CyclicVariant {
    pub fn symbols(self) -> &'static [Symbol] {
        match self {
            CyclicVariant::Three => &THREE,
            CyclicVariant::Five => &FIVE,
        }
    }

    pub fn contains(self, symbol: Symbol) -> bool {
        symbol == Symbol::Empty || self.symbols().contains(&symbol)
    }

    /// Whether `winner` dominates `loser`.
    pub fn beats(self, winner: Symbol, loser: Symbol) -> bool {
        let table = match self {
            CyclicVariant::Three => &BEATS_THREE,
            CyclicVariant::Five => &BEATS_FIVE,
        };
        match (winner.slot(), loser.slot()) {
            (Some(w), Some(l)) => table[w] & 1 << l != 0,
            _ => false,
        }
    }
}

impl TryFrom<u8> for CyclicVariant {
    type Error = Error;

    fn try_from(symbols: u8) -> Result<Self> {
        match symbols {
            3 => Ok(CyclicVariant::Three),
            5 => Ok(CyclicVariant::Five),
            n => Err(Error::SymbolCount(n)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CyclicParams {
    /// Number of dominance symbols, 3 or 5.
    pub symbols: u8,
}

impl Default for CyclicParams {
    fn default() -> Self {
        CyclicParams { symbols: 3 }
    }
}

/// Multi-state cyclic-dominance automaton.
///
/// A cell is replaced by the most frequent of its dominating neighbours once
/// more than two neighbours dominate it.
#[derive(Clone, Debug)]
pub struct CyclicAutomaton {
    grid: ToroidalGrid<Symbol>,
    next: ToroidalGrid<Symbol>,
    variant: CyclicVariant,
    rng: ChaCha8Rng,
    generation: u64,
}

impl CyclicAutomaton {
    pub fn new(config: &EngineConfig, params: &CyclicParams) -> Result<Self> {
        let (rows, columns) = config.grid_size()?;
        let variant = CyclicVariant::try_from(params.symbols)?;
        let grid = ToroidalGrid::new(rows, columns, Symbol::Empty)?;
        debug!("cyclic automaton {}x{} with {:?} table", rows, columns, variant);
        Ok(CyclicAutomaton {
            next: grid.clone(),
            grid,
            variant,
            rng: config.rng(),
            generation: 0,
        })
    }

    pub fn variant(&self) -> CyclicVariant {
        self.variant
    }

    pub fn grid(&self) -> &ToroidalGrid<Symbol> {
        &self.grid
    }

    pub fn get(&self, x: i64, y: i64) -> Symbol {
        self.grid.get(x, y)
    }

    /// Paints a cell. Symbols outside the active table are rejected.
    pub fn set_cell(&mut self, x: i64, y: i64, symbol: Symbol) -> Result<()> {
        if !self.variant.contains(symbol) {
            return Err(Error::InactiveSymbol {
                symbol,
                variant: self.variant,
            });
        }
        self.grid.set(x, y, symbol);
        Ok(())
    }

    /// Fills the grid with symbols drawn uniformly from the active table.
    pub fn randomize(&mut self) {
        let symbols = self.variant.symbols();
        for (_, _, cell) in self.grid.cells_mut() {
            if let Some(&symbol) = symbols.choose(&mut self.rng) {
                *cell = symbol;
            }
        }
        self.generation = 0;
        debug!("randomized cyclic grid");
    }

    /// Cell counts per dominance symbol, in declaration order.
    pub fn census(&self) -> [usize; 5] {
        let mut census = [0; 5];
        for (_, _, cell) in self.grid.cells() {
            if let Some(slot) = cell.slot() {
                census[slot] += 1;
            }
        }
        census
    }
}

fn successor(variant: CyclicVariant, grid: &ToroidalGrid<Symbol>, x: usize, y: usize) -> Symbol {
    let current = grid[(x, y)];
    if current == Symbol::Empty {
        return current;
    }
    let mut votes = [0u8; 5];
    let mut total = 0;
    for &neighbor in grid.neighbors8(x as i64, y as i64).iter() {
        if !variant.beats(neighbor, current) {
            continue;
        }
        if let Some(slot) = neighbor.slot() {
            votes[slot] += 1;
            total += 1;
        }
    }
    if total <= 2 {
        return current;
    }
    let mut winner = current;
    let mut best = 0;
    for &symbol in variant.symbols() {
        if let Some(slot) = symbol.slot() {
            if votes[slot] > best {
                winner = symbol;
                best = votes[slot];
            }
        }
    }
    winner
}

impl Automaton for CyclicAutomaton {
    type Tile = Symbol;

    fn step(&mut self) {
        let variant = self.variant;
        self.grid.evolve_into(&mut self.next, |grid, x, y| {
            successor(variant, grid, x, y)
        });
        std::mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;
        trace!(
            "cyclic generation {}: census {:?}",
            self.generation,
            self.census()
        );
    }

    fn reset(&mut self) {
        self.grid.fill(Symbol::Empty);
        self.generation = 0;
        debug!("reset cyclic grid");
    }

    fn render<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, Symbol),
    {
        for (x, y, &cell) in self.grid.cells() {
            f(x, y, cell);
        }
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}
