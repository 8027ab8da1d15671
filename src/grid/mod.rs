mod window;

pub use self::window::GridWindow;
use crate::{CellState, Error, Result};
use std::fmt;

/// Relative positions of the Moore neighborhood, row-major
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Alive and cancerous counts around a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighborhood {
    pub alive: u8,
    pub cancerous: u8,
}

/// A fixed-size toroidal grid of cells
///
/// Every index is taken modulo the grid dimensions, so lookups never go out of
/// bounds and every cell has exactly 8 neighbors. Two grids compare equal only
/// when they have the same dimensions and identical cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates an all-dead grid
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = Self::cell_count(rows, cols)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| Self::invalid_dimensions(rows, cols))?;
        cells.resize(len, CellState::Dead);
        Ok(Self { rows, cols, cells })
    }

    /// Creates a grid from row-major cells
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Result<Self> {
        let len = Self::cell_count(rows, cols)?;
        if cells.len() != len {
            return Err(Error::malformed(
                0,
                format!("expected {} cells, got {}", len, cells.len()),
            ));
        }
        Ok(Self { rows, cols, cells })
    }

    /// Creates a dead grid with the given `(row, col)` positions set alive
    pub fn with_alive(rows: usize, cols: usize, alive: &[(isize, isize)]) -> Result<Self> {
        let mut grid = Self::new(rows, cols)?;
        for &(r, c) in alive {
            grid.set(r, c, CellState::Alive);
        }
        Ok(grid)
    }

    fn invalid_dimensions(rows: usize, cols: usize) -> Error {
        Error::InvalidDimensions {
            rows: i64::try_from(rows).unwrap_or(i64::MAX),
            cols: i64::try_from(cols).unwrap_or(i64::MAX),
        }
    }

    /// Number of cells in a `rows x cols` grid
    ///
    /// Fails for empty grids and for grids whose cells cannot be indexed with `isize`.
    pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize> {
        rows.checked_mul(cols)
            .filter(|&len| len > 0 && len <= isize::MAX as usize)
            .ok_or_else(|| Self::invalid_dimensions(rows, cols))
    }

    /// Builds a grid from cells the caller already sized to `rows * cols`
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols, "cell buffer does not match dimensions");
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[inline]
    fn index(&self, r: isize, c: isize) -> usize {
        let r = r.rem_euclid(self.rows as isize) as usize;
        let c = c.rem_euclid(self.cols as isize) as usize;
        r * self.cols + c
    }

    #[inline]
    pub fn get(&self, r: isize, c: isize) -> CellState {
        self.cells[self.index(r, c)]
    }

    #[inline]
    pub fn set(&mut self, r: isize, c: isize, state: CellState) {
        let idx = self.index(r, c);
        self.cells[idx] = state;
    }

    pub fn row(&self, r: isize) -> &[CellState] {
        let start = self.index(r, 0);
        &self.cells[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks_exact(self.cols)
    }

    fn neighbors(&self, r: isize, c: isize) -> impl Iterator<Item = CellState> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dr, dc)| self.get(r + dr, c + dc))
    }

    /// Counts the wrapped neighbors of `(r, c)` whose state satisfies `predicate`
    pub fn neighbor_count<P>(&self, r: isize, c: isize, predicate: P) -> u8
    where
        P: Fn(CellState) -> bool,
    {
        self.neighbors(r, c).filter(|&state| predicate(state)).count() as u8
    }

    /// Counts alive and cancerous neighbors of `(r, c)` in a single pass
    pub fn neighborhood(&self, r: isize, c: isize) -> Neighborhood {
        self.neighbors(r, c)
            .fold(Neighborhood::default(), |mut acc, state| {
                match state {
                    CellState::Alive => acc.alive += 1,
                    CellState::Cancerous => acc.cancerous += 1,
                    CellState::Dead => {}
                }
                acc
            })
    }

    /// Number of alive cells, by full scan
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|s| s.is_alive()).count()
    }

    pub fn window(&self, top: isize, left: isize, rows: usize, cols: usize) -> GridWindow<'_> {
        GridWindow::new(self, top, left, rows, cols)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for state in row {
                write!(f, "{}", state)?;
            }
        }
        Ok(())
    }
}
