use ca_rules::ParseRuleError;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Construction-time contract violations.
///
/// Coordinates never produce errors: every coordinate is reduced modulo the
/// grid dimensions before use.
#[derive(Debug, Error)]
pub enum Error {
    #[error("the grid must have at least one row and one column, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("the cell size must be positive")]
    ZeroCellSize,
    #[error("border width {border_width} leaves nothing of a {cell_size} pixel cell")]
    BorderTooWide { border_width: u32, cell_size: u32 },
    #[error("density {0} is outside [0, 1]")]
    DensityOutOfRange(f64),
    #[error("cyclic automata have 3 or 5 symbols, not {0}")]
    SymbolCount(u8),
    #[error("{symbol:?} is not a symbol of the {variant:?} variant")]
    InactiveSymbol {
        symbol: crate::cyclic::Symbol,
        variant: crate::cyclic::CyclicVariant,
    },
    #[error("invalid turn {0:?}, expected 'L' or 'R'")]
    InvalidTurn(char),
    #[error("the turn rule is empty")]
    EmptyTurnRule,
    #[error("a turn rule has at most 256 colors, got {0}")]
    TooManyColors(usize),
    #[error("{rules} turn rules but {colors} display colors")]
    PaletteMismatch { rules: usize, colors: usize },
    #[error("no agent has been placed")]
    AgentNotPlaced,
    #[error(transparent)]
    Rule(#[from] ParseRuleError),
}
