//! Parametrizable birth/survival rules.
//!
//! A rule is two sets of neighbor counts: `birth` (counts that bring a dead
//! cell alive) and `survive` (counts that keep a live cell alive). Counts
//! live in the domain 0..=12, the maximum practical neighbor count for the
//! vertex-adjacent face graphs this engine targets. Counts outside the
//! domain are accepted everywhere but never match and are never stored, so
//! the per-cell evaluation path stays branch-free.

use super::Cell;
use crate::error::LifeError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Largest neighbor count in the rule domain.
pub const MAX_NEIGHBOR_COUNT: u8 = 12;

/// Returns the bitset bit for a neighbor count, or None when the count is
/// outside the rule domain.
const fn domain_bit(count: u8) -> Option<u16> {
    if count <= MAX_NEIGHBOR_COUNT {
        Some(1 << count)
    } else {
        None
    }
}

/// A birth/survival rule over the neighbor-count domain 0..=12.
///
/// Both sets are stored as plain mutable bitsets. Every mutation replaces
/// the affected bit atomically from the point of view of the single-writer
/// model: readers between frames always observe a complete set.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LifeRule {
    birth: u16,
    survive: u16,
}

impl LifeRule {
    /// Create a rule from explicit birth and survival counts
    pub fn new(birth: &[u8], survive: &[u8]) -> Self {
        let mut rule = Self {
            birth: 0,
            survive: 0,
        };
        rule.set_birth_counts(birth.iter().copied());
        rule.set_survive_counts(survive.iter().copied());
        rule
    }

    /// Conway's Game of Life (B3/S23)
    pub const fn conway() -> Self {
        Self {
            birth: 1 << 3,
            survive: (1 << 2) | (1 << 3),
        }
    }

    /// HighLife (B36/S23) - like Conway's Life but 6 neighbors also give birth
    pub const fn high_life() -> Self {
        Self {
            birth: (1 << 3) | (1 << 6),
            survive: (1 << 2) | (1 << 3),
        }
    }

    /// Seeds (B2/S) - every live cell dies, creates expanding patterns
    pub const fn seeds() -> Self {
        Self {
            birth: 1 << 2,
            survive: 0,
        }
    }

    /// Whether a dead cell with `neighbors` alive neighbors becomes alive
    #[inline]
    pub const fn test_birth(&self, neighbors: u8) -> bool {
        match domain_bit(neighbors) {
            Some(bit) => self.birth & bit != 0,
            None => false,
        }
    }

    /// Whether a live cell with `neighbors` alive neighbors stays alive
    #[inline]
    pub const fn test_survive(&self, neighbors: u8) -> bool {
        match domain_bit(neighbors) {
            Some(bit) => self.survive & bit != 0,
            None => false,
        }
    }

    /// Include or exclude a neighbor count from the birth set.
    /// Counts outside the domain are ignored.
    pub fn set_birth(&mut self, count: u8, value: bool) {
        if let Some(bit) = domain_bit(count) {
            if value {
                self.birth |= bit;
            } else {
                self.birth &= !bit;
            }
        }
    }

    /// Include or exclude a neighbor count from the survival set.
    /// Counts outside the domain are ignored.
    pub fn set_survive(&mut self, count: u8, value: bool) {
        if let Some(bit) = domain_bit(count) {
            if value {
                self.survive |= bit;
            } else {
                self.survive &= !bit;
            }
        }
    }

    /// Flip a neighbor count in the birth set
    pub fn toggle_birth(&mut self, count: u8) {
        if let Some(bit) = domain_bit(count) {
            self.birth ^= bit;
        }
    }

    /// Flip a neighbor count in the survival set
    pub fn toggle_survive(&mut self, count: u8) {
        if let Some(bit) = domain_bit(count) {
            self.survive ^= bit;
        }
    }

    /// Replace the entire birth set with the given counts
    pub fn set_birth_counts(&mut self, counts: impl IntoIterator<Item = u8>) {
        self.birth = 0;
        for count in counts {
            self.set_birth(count, true);
        }
    }

    /// Replace the entire survival set with the given counts
    pub fn set_survive_counts(&mut self, counts: impl IntoIterator<Item = u8>) {
        self.survive = 0;
        for count in counts {
            self.set_survive(count, true);
        }
    }

    /// Replace both sets with a random subset of the domain: each count is
    /// included in birth and in survive with its own independent draw.
    pub fn randomize(
        &mut self,
        probability: f64,
        rng: &mut impl Rng,
    ) -> Result<(), LifeError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LifeError::InvalidProbability(probability));
        }

        self.birth = 0;
        self.survive = 0;
        for count in 0..=MAX_NEIGHBOR_COUNT {
            self.set_birth(count, rng.random_bool(probability));
            self.set_survive(count, rng.random_bool(probability));
        }
        Ok(())
    }

    /// Apply the rule to compute the next cell state: live cells take the
    /// survival test, dead cells the birth test.
    #[inline]
    pub const fn evolve(&self, current: Cell, neighbors: u8) -> Cell {
        let alive = match current {
            Cell::Alive => self.test_survive(neighbors),
            Cell::Dead => self.test_birth(neighbors),
        };
        Cell::from_alive(alive)
    }
}

impl Default for LifeRule {
    fn default() -> Self {
        Self::conway()
    }
}

/// Formats as "B.../S..." notation. Counts 10..=12 are written as the
/// letters A..=C so the notation round-trips over the whole domain.
impl fmt::Display for LifeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for count in 0..=MAX_NEIGHBOR_COUNT {
            if self.test_birth(count) {
                write!(f, "{}", count_char(count))?;
            }
        }
        write!(f, "/S")?;
        for count in 0..=MAX_NEIGHBOR_COUNT {
            if self.test_survive(count) {
                write!(f, "{}", count_char(count))?;
            }
        }
        Ok(())
    }
}

impl FromStr for LifeRule {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LifeError::InvalidRuleString(s.to_string());

        let (birth_part, survive_part) = s.split_once('/').ok_or_else(invalid)?;
        let birth_digits = birth_part
            .strip_prefix(['B', 'b'])
            .ok_or_else(invalid)?;
        let survive_digits = survive_part
            .strip_prefix(['S', 's'])
            .ok_or_else(invalid)?;

        let mut rule = Self {
            birth: 0,
            survive: 0,
        };
        for c in birth_digits.chars() {
            rule.set_birth(parse_count(c).ok_or_else(invalid)?, true);
        }
        for c in survive_digits.chars() {
            rule.set_survive(parse_count(c).ok_or_else(invalid)?, true);
        }
        Ok(rule)
    }
}

fn count_char(count: u8) -> char {
    char::from_digit(count as u32, 13)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

fn parse_count(c: char) -> Option<u8> {
    c.to_digit(13).map(|d| d as u8)
}
