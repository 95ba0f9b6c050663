use ca_rules::{ParseLife, ParseRuleError};
use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// A totalistic life-like rule over the Moore neighbourhood.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LifeRule {
    birth: [bool; 9],
    survival: [bool; 9],
}

impl LifeRule {
    /// Conway's Game of Life, `B3/S23`.
    pub const CONWAY: LifeRule = LifeRule {
        birth: [false, false, false, true, false, false, false, false, false],
        survival: [false, false, true, true, false, false, false, false, false],
    };

    pub fn next_state(&self, alive: bool, live_neighbors: usize) -> bool {
        let table = if alive { &self.survival } else { &self.birth };
        table.get(live_neighbors).copied().unwrap_or(false)
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        LifeRule::CONWAY
    }
}

impl ParseLife for LifeRule {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        let mut rule = LifeRule {
            birth: [false; 9],
            survival: [false; 9],
        };
        b.into_iter()
            .filter(|&n| n < 9)
            .for_each(|n| rule.birth[n as usize] = true);
        s.into_iter()
            .filter(|&n| n < 9)
            .for_each(|n| rule.survival[n as usize] = true);
        rule
    }
}

impl FromStr for LifeRule {
    type Err = ParseRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LifeRule::parse_rule(s)
    }
}

impl Display for LifeRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let counts = |table: &[bool; 9]| -> String {
            (0..9)
                .filter(|&n| table[n])
                .map(|n| char::from(b'0' + n as u8))
                .collect()
        };
        write!(f, "B{}/S{}", counts(&self.birth), counts(&self.survival))
    }
}

impl Debug for LifeRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("LifeRule").field(&self.to_string()).finish()
    }
}
