use super::Grid;
use crate::CellState;

/// A rectangular view into a [`Grid`], wrapping around its edges
pub struct GridWindow<'a> {
    top: isize,
    left: isize,
    rows: usize,
    cols: usize,
    grid: &'a Grid,
}
impl<'a> GridWindow<'a> {
    pub fn new(grid: &'a Grid, top: isize, left: isize, rows: usize, cols: usize) -> Self {
        Self {
            top,
            left,
            rows,
            cols,
            grid,
        }
    }

    /// Iterates the non-dead cells in view as `(row, col, state)`, relative to the window
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).filter_map(move |c| {
                let state = self
                    .grid
                    .get(self.top + r as isize, self.left + c as isize);
                (state != CellState::Dead).then_some((r, c, state))
            })
        })
    }
}

impl<'a> std::fmt::Display for GridWindow<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..self.cols {
                let state = self
                    .grid
                    .get(self.top + r as isize, self.left + c as isize);
                match state {
                    CellState::Dead => write!(f, " ")?,
                    _ => write!(f, "{}", state)?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_wraps_around_edges() {
        let grid = Grid::with_alive(4, 4, &[(0, 0), (3, 3)]).unwrap();
        let window = grid.window(-1, -1, 2, 2);

        let cells: Vec<_> = window.iter().collect();
        assert_eq!(
            cells,
            vec![(0, 0, CellState::Alive), (1, 1, CellState::Alive)]
        );
    }

    #[test]
    fn window_renders_dead_as_blank() {
        let grid = Grid::with_alive(3, 3, &[(1, 1)]).unwrap();

        assert_eq!(grid.window(0, 0, 3, 3).to_string(), "   \n \u{25A3} \n   ");
    }
}
