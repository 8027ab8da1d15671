use super::{NeighborSet, Transition};
use crate::CellState;

/// The number of distinct alive-neighbor counts, `0..=8`
const COUNTS: usize = 9;

/// Lookup table for a standard life-like rule
///
/// Indexed by the current state (dead or alive) and the number of alive
/// neighbors. Cancerous cells never reach the table; they are inert under a
/// standard rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TransitionTable {
    dead: [Transition; COUNTS],
    alive: [Transition; COUNTS],
}

impl TransitionTable {
    /// Creates the table for the given birth and survival sets
    pub(super) fn generate(birth: NeighborSet, survive: NeighborSet) -> Self {
        let mut dead = [Transition::unchanged(CellState::Dead); COUNTS];
        let mut alive = [Transition::unchanged(CellState::Alive); COUNTS];
        for n in 0..COUNTS as u8 {
            if birth.contains(n) {
                dead[n as usize] = Transition::new(CellState::Alive, 1);
            }
            if !survive.contains(n) {
                alive[n as usize] = Transition::new(CellState::Dead, -1);
            }
        }
        Self { dead, alive }
    }

    #[inline]
    pub(super) fn get(&self, cell: CellState, alive_neighbors: u8) -> Transition {
        let n = alive_neighbors as usize;
        match cell {
            CellState::Dead => self.dead[n],
            CellState::Alive => self.alive[n],
            CellState::Cancerous => Transition::unchanged(cell),
        }
    }
}
