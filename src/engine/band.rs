use super::next_row;
use crate::{CellState, Grid, RuleSet};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use std::ops::Range;
use tracing::trace;

/// A contiguous run of rows computed by one rayon task
struct RowBand<'a> {
    rows: Range<usize>,
    /// One generator seed per row in `rows`
    seeds: &'a [u64],
}

impl<'a> RowBand<'a> {
    fn create_bands(seeds: &'a [u64], n: usize) -> Vec<RowBand<'a>> {
        let total = seeds.len();
        if total == 0 || n == 0 {
            return Vec::new();
        }

        let n = n.min(total);
        let base = total / n;
        let remainder = total % n;
        let mut bands = Vec::with_capacity(n);
        let mut start = 0;
        for i in 0..n {
            let size = base + usize::from(i < remainder);
            let end = start + size;
            bands.push(Self {
                rows: start..end,
                seeds: &seeds[start..end],
            });
            start = end;
        }
        bands
    }

    fn compute(&self, grid: &Grid, rules: &RuleSet) -> (Vec<CellState>, i64) {
        let mut cells = Vec::with_capacity(self.rows.len() * grid.cols());
        let mut delta = 0;
        for (r, &seed) in self.rows.clone().zip(self.seeds) {
            let mut rng = StdRng::seed_from_u64(seed);
            delta += next_row(grid, rules, r, &mut rng, &mut cells);
        }
        (cells, delta)
    }
}

/// Computes the generation after `grid` with rows split into `threads` bands
///
/// Every band only reads the previous grid and writes its own buffer; the
/// buffers are joined in row order once all bands are done.
pub(super) fn next_generation_parallel<R: Rng>(
    grid: &Grid,
    rules: &RuleSet,
    rng: &mut R,
    threads: usize,
) -> (Grid, i64) {
    // deterministic rules never touch the per-row generators
    let seeds: Vec<u64> = if rules.is_stochastic() {
        (0..grid.rows()).map(|_| rng.random()).collect()
    } else {
        vec![0; grid.rows()]
    };

    let bands = RowBand::create_bands(&seeds, threads);
    trace!(bands = bands.len(), rows = grid.rows(), "computing generation in parallel");
    let band_outputs: Vec<(Vec<CellState>, i64)> = bands
        .into_par_iter()
        .map(|band| band.compute(grid, rules))
        .collect();

    let mut cells = Vec::with_capacity(grid.rows() * grid.cols());
    let mut delta = 0;
    for (output, band_delta) in band_outputs {
        cells.extend(output);
        delta += band_delta;
    }
    (Grid::from_parts(grid.rows(), grid.cols(), cells), delta)
}
