//! Life-like rule sets.
//!
//! A rule maps a cell and the counts of its neighbors to the cell's next state,
//! along with the change it causes to the tracked population. Rules never look
//! at the grid themselves; the engine feeds them the previous generation's counts.

mod cancer;
mod table;

pub use self::cancer::Cancer;
use self::table::TransitionTable;
use crate::{CellState, Error, Neighborhood, Result};
use rand::Rng;
use regex::Regex;
use std::{fmt, str::FromStr, sync::OnceLock};

/// Largest neighbor count in a Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// A set of neighbor counts in `0..=8`, stored as a bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborSet(u16);

impl NeighborSet {
    #[inline]
    pub fn contains(self, n: u8) -> bool {
        n <= MAX_NEIGHBORS && self.0 & (1 << n) != 0
    }

    #[inline]
    pub fn insert(&mut self, n: u8) {
        debug_assert!(n <= MAX_NEIGHBORS, "neighbor count out of range");
        self.0 |= 1 << n;
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..=MAX_NEIGHBORS).filter(move |&n| self.contains(n))
    }
}

impl FromIterator<u8> for NeighborSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::default();
        for n in iter {
            set.insert(n);
        }
        set
    }
}

impl fmt::Display for NeighborSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for n in self.iter() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

/// Birth and survival neighbor counts of a life-like rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleSpec {
    pub birth: NeighborSet,
    pub survive: NeighborSet,
}

impl RuleSpec {
    pub fn new(birth: NeighborSet, survive: NeighborSet) -> Self {
        Self { birth, survive }
    }

    /// Conway's Game of Life, `b3s23`
    pub fn conway() -> Self {
        Self::new([3u8].into_iter().collect(), [2u8, 3].into_iter().collect())
    }
}

impl Default for RuleSpec {
    fn default() -> Self {
        Self::conway()
    }
}

fn rule_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[bB]([0-9]+)[sS]([0-9]+)$").expect("valid rule name regex"))
}

fn parse_counts(name: &str, digits: &str) -> Result<NeighborSet> {
    digits
        .bytes()
        .map(|b| b - b'0')
        .map(|n| {
            if n <= MAX_NEIGHBORS {
                Ok(n)
            } else {
                Err(Error::InvalidRuleName(name.to_owned()))
            }
        })
        .collect()
}

impl FromStr for RuleSpec {
    type Err = Error;

    /// Parses a rule identifier such as `b3s23` or `B36S23`
    fn from_str(name: &str) -> Result<Self> {
        let Some(caps) = rule_name_regex().captures(name) else {
            return Err(Error::InvalidRuleName(name.to_owned()));
        };
        let birth = parse_counts(name, &caps[1])?;
        let survive = parse_counts(name, &caps[2])?;
        Ok(Self { birth, survive })
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}s{}", self.birth, self.survive)
    }
}

/// The outcome of applying a rule to one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: CellState,
    /// Change to the tracked population, one of -1, 0 or 1
    pub delta: i8,
}

impl Transition {
    #[inline]
    pub const fn new(state: CellState, delta: i8) -> Self {
        Self { state, delta }
    }
    #[inline]
    pub const fn unchanged(state: CellState) -> Self {
        Self::new(state, 0)
    }
}

/// Standard two-state life-like rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standard {
    spec: RuleSpec,
    table: TransitionTable,
}

impl Standard {
    pub fn new(spec: RuleSpec) -> Self {
        Self {
            table: TransitionTable::generate(spec.birth, spec.survive),
            spec,
        }
    }

    #[inline]
    pub fn next(&self, cell: CellState, alive_neighbors: u8) -> Transition {
        self.table.get(cell, alive_neighbors)
    }
}

/// The rule sets an engine can run
#[derive(Debug, Clone)]
pub enum RuleSet {
    Standard(Standard),
    Cancer(Cancer),
}

impl RuleSet {
    pub fn standard(spec: RuleSpec) -> Self {
        Self::Standard(Standard::new(spec))
    }

    /// Creates the cancer variant, failing on out-of-range parameters
    pub fn cancer(spec: RuleSpec, mutation_chance: f64, growth_rate: u8) -> Result<Self> {
        Cancer::new(spec, mutation_chance, growth_rate).map(Self::Cancer)
    }

    /// Computes the next state of `cell` from its previous-generation neighborhood
    ///
    /// Only the cancer variant draws from `rng`.
    #[inline]
    pub fn next<R: Rng>(&self, cell: CellState, neighbors: Neighborhood, rng: &mut R) -> Transition {
        match self {
            Self::Standard(rule) => rule.next(cell, neighbors.alive),
            Self::Cancer(rule) => rule.next(cell, neighbors, rng),
        }
    }

    pub fn spec(&self) -> &RuleSpec {
        match self {
            Self::Standard(rule) => &rule.spec,
            Self::Cancer(rule) => rule.spec(),
        }
    }

    /// Whether a population of zero ends the run
    pub fn detects_extinction(&self) -> bool {
        matches!(self, Self::Cancer(_))
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self, Self::Cancer(_))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(rule) => write!(f, "{}", rule.spec),
            Self::Cancer(rule) => write!(f, "{} (cancer {})", rule.spec(), rule.parameters_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn parses_rule_names() {
        let spec: RuleSpec = "b3s23".parse().unwrap();
        assert_eq!(spec, RuleSpec::conway());

        let spec: RuleSpec = "B36S23".parse().unwrap();
        assert!(spec.birth.contains(3) && spec.birth.contains(6));
        assert!(!spec.birth.contains(2));
        assert_eq!(spec.to_string(), "b36s23");
    }

    #[test]
    fn display_sorts_and_dedups_digits() {
        let spec: RuleSpec = "b63s3322".parse().unwrap();

        assert_eq!(spec.to_string(), "b36s23");
    }

    #[test]
    fn rejects_malformed_names() {
        for name in ["", "b3", "s23", "b3s", "bs23", "x3s23", "b3s23 ", "b3s2a", "b9s23"] {
            assert!(
                matches!(name.parse::<RuleSpec>(), Err(Error::InvalidRuleName(_))),
                "{name:?} should not parse"
            );
        }
    }

    #[test]
    fn neighbor_set_ignores_out_of_range_queries() {
        let set: NeighborSet = [0u8, 8].into_iter().collect();

        assert!(set.contains(0));
        assert!(set.contains(8));
        assert!(!set.contains(9));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 8]);
    }

    #[test]
    fn standard_rule_births_and_kills() {
        let rules = RuleSet::standard(RuleSpec::conway());
        let mut rng = StdRng::seed_from_u64(0);
        let n = |alive| Neighborhood { alive, cancerous: 0 };

        assert_eq!(
            rules.next(CellState::Dead, n(3), &mut rng),
            Transition::new(CellState::Alive, 1)
        );
        assert_eq!(
            rules.next(CellState::Alive, n(0), &mut rng),
            Transition::new(CellState::Dead, -1)
        );
        assert_eq!(
            rules.next(CellState::Alive, n(2), &mut rng),
            Transition::unchanged(CellState::Alive)
        );
    }

    #[test]
    fn only_cancer_detects_extinction() {
        let standard = RuleSet::standard(RuleSpec::conway());
        let cancer = RuleSet::cancer(RuleSpec::conway(), 0.1, 3).unwrap();

        assert!(!standard.detects_extinction());
        assert!(cancer.detects_extinction());
        assert_eq!(standard.to_string(), "b3s23");
        assert_eq!(cancer.to_string(), "b3s23 (cancer 0.1-3)");
    }
}
