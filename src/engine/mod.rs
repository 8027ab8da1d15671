//! Generation-stepping engine.

mod band;

use crate::{CellState, Grid, RuleSet, Snapshot, SnapshotSink, error::Error, error::Result};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// Lifecycle of a [`Simulation`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Running,
    Finished,
}

/// Why a simulation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The grid did not change from the previous generation
    Quiescent,
    /// No alive cells remain, for rules that track extinction
    Extinct,
}

/// A single run of a rule set over a grid
///
/// The simulation exclusively owns its grid. Each step builds the next
/// generation into a fresh buffer from the previous one and only then swaps it
/// in, so a step either completes fully or leaves the previous generation as it
/// was.
///
/// Only exact equality with the immediately preceding generation counts as a
/// steady state; oscillators with a period above one run until the caller stops.
#[derive(Debug)]
pub struct Simulation<R = StdRng> {
    grid: Grid,
    rules: RuleSet,
    rng: R,
    generation: u64,
    population: usize,
    status: Status,
    termination: Option<Termination>,
}

impl Simulation<StdRng> {
    /// Creates a simulation seeded from the operating system
    pub fn new(grid: Grid, rules: RuleSet) -> Self {
        Self::with_rng(grid, rules, StdRng::from_os_rng())
    }

    /// Creates a reproducible simulation
    pub fn seeded(grid: Grid, rules: RuleSet, seed: u64) -> Self {
        Self::with_rng(grid, rules, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(grid: Grid, rules: RuleSet, rng: R) -> Self {
        let population = grid.population();
        Self {
            grid,
            rules,
            rng,
            generation: 1,
            population,
            status: Status::Ready,
            termination: None,
        }
    }

    /// Moves a ready simulation to running and emits the first generation
    ///
    /// Has no effect once the simulation has started.
    pub fn start<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<Status> {
        if self.status != Status::Ready {
            return Ok(self.status);
        }
        self.status = Status::Running;
        debug!(
            rules = %self.rules,
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            population = self.population,
            "simulation started"
        );
        sink.emit(self.snapshot())?;
        Ok(self.status)
    }

    /// Computes the next generation on the current thread
    ///
    /// Returns the status after the step. Stepping a finished simulation does nothing.
    pub fn step<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<Status> {
        if !self.can_step()? {
            return Ok(self.status);
        }
        let (next, delta) = next_generation(&self.grid, &self.rules, &mut self.rng);
        self.commit(next, delta, sink)
    }

    /// Computes the next generation with rows split across the rayon pool
    ///
    /// For stochastic rules every row draws from its own generator seeded from
    /// this simulation's, in row order, so results do not depend on the number
    /// of threads but differ from [`Simulation::step`] for the same seed.
    pub fn step_parallel<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> Result<Status> {
        if !self.can_step()? {
            return Ok(self.status);
        }
        let (next, delta) = band::next_generation_parallel(
            &self.grid,
            &self.rules,
            &mut self.rng,
            rayon::current_num_threads(),
        );
        self.commit(next, delta, sink)
    }

    /// Starts the simulation and steps until it finishes or `max_steps` is reached
    pub fn run<S: SnapshotSink + ?Sized>(
        &mut self,
        sink: &mut S,
        max_steps: Option<u64>,
    ) -> Result<Status> {
        self.start(sink)?;
        let mut steps = 0;
        while self.status == Status::Running && max_steps.is_none_or(|max| steps < max) {
            self.step(sink)?;
            steps += 1;
        }
        Ok(self.status)
    }

    fn can_step(&self) -> Result<bool> {
        match self.status {
            Status::Ready => Err(Error::NotStarted),
            Status::Running => Ok(true),
            Status::Finished => Ok(false),
        }
    }

    fn commit<S: SnapshotSink + ?Sized>(
        &mut self,
        next: Grid,
        delta: i64,
        sink: &mut S,
    ) -> Result<Status> {
        let quiescent = next == self.grid;
        self.grid = next;
        self.generation += 1;

        let population = self.population as i64 + delta;
        debug_assert!(population >= 0, "population went negative");
        self.population = population as usize;
        debug_assert_eq!(
            self.population,
            self.grid.population(),
            "population drifted from the grid"
        );

        self.termination = if quiescent {
            Some(Termination::Quiescent)
        } else if self.rules.detects_extinction() && self.population == 0 {
            Some(Termination::Extinct)
        } else {
            None
        };
        debug!(
            generation = self.generation,
            population = self.population,
            "generation computed"
        );
        if let Some(reason) = self.termination {
            self.status = Status::Finished;
            info!(
                generation = self.generation,
                population = self.population,
                ?reason,
                "simulation finished"
            );
        }

        sink.emit(self.snapshot())?;
        Ok(self.status)
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            generation: self.generation,
            population: self.population,
            grid: &self.grid,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn population(&self) -> usize {
        self.population
    }
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }
    #[inline]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }
}

impl<R: Rng + SeedableRng> Simulation<R> {
    /// Restarts the generator from `seed`, leaving grid and generation as they are
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

/// Applies `rules` to row `r` of `grid`, appending the new cells to `out`
///
/// Returns the summed population delta of the row.
fn next_row<R: Rng>(
    grid: &Grid,
    rules: &RuleSet,
    r: usize,
    rng: &mut R,
    out: &mut Vec<CellState>,
) -> i64 {
    let mut delta = 0;
    for (c, &cell) in grid.row(r as isize).iter().enumerate() {
        let neighbors = grid.neighborhood(r as isize, c as isize);
        let transition = rules.next(cell, neighbors, rng);
        delta += i64::from(transition.delta);
        out.push(transition.state);
    }
    delta
}

/// Computes the generation after `grid`, along with its population delta
fn next_generation<R: Rng>(grid: &Grid, rules: &RuleSet, rng: &mut R) -> (Grid, i64) {
    let mut cells = Vec::with_capacity(grid.rows() * grid.cols());
    let mut delta = 0;
    for r in 0..grid.rows() {
        delta += next_row(grid, rules, r, rng, &mut cells);
    }
    (Grid::from_parts(grid.rows(), grid.cols(), cells), delta)
}
