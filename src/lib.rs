#![allow(clippy::bool_assert_comparison)]

mod ant;
mod automaton;
mod config;
mod cyclic;
mod error;
mod grid;
mod life;
mod rule;

pub use ant::{AntAutomaton, AntParams, AntRule, AntTile, Heading, Rgb, Turn};
pub use automaton::Automaton;
pub use ca_rules;
pub use config::{CellRect, EngineConfig};
pub use cyclic::{CyclicAutomaton, CyclicParams, CyclicVariant, Symbol};
pub use error::{Error, Result};
pub use grid::ToroidalGrid;
pub use life::{LifeAutomaton, LifeCell, LifeParams};
pub use rule::LifeRule;
