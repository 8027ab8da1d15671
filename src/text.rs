//! Plain-text grid format.
//!
//! Input files declare the row count and column count on their first two
//! lines, followed by one line of cell glyphs per row:
//!
//! ```text
//! 3
//! 4
//! □▣□□
//! □▣□□
//! □▣□□
//! ```
//!
//! Snapshots are dumped with a `gen:` and `pop:` header in front of the grid.

use crate::{CellState, Error, Grid, Result, Snapshot};

pub trait GridCodec {
    fn encode(&self, snapshot: Snapshot<'_>) -> String;
    fn decode(&self, value: &str) -> Result<Grid>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TextGrid;

impl TextGrid {
    fn decode_dimension(line_no: usize, line: Option<&str>) -> Result<i64> {
        let line = line.ok_or_else(|| Error::malformed(line_no, "missing grid dimension"))?;
        line.trim()
            .parse::<i64>()
            .map_err(|e| Error::malformed(line_no, format!("bad grid dimension {line:?}: {e}")))
    }

    fn decode_row(line_no: usize, line: &str, cols: usize, out: &mut Vec<CellState>) -> Result<()> {
        let mut found = 0;
        for c in line.chars().take(cols) {
            let state = CellState::from_glyph(c)
                .ok_or_else(|| Error::malformed(line_no, format!("unknown cell glyph {c:?}")))?;
            out.push(state);
            found += 1;
        }
        if found < cols {
            return Err(Error::malformed(
                line_no,
                format!("expected {cols} cells, found {found}"),
            ));
        }
        Ok(())
    }
}

impl GridCodec for TextGrid {
    fn encode(&self, snapshot: Snapshot<'_>) -> String {
        format!(
            "gen: {}\npop: {}\n{}",
            snapshot.generation, snapshot.population, snapshot.grid
        )
    }

    fn decode(&self, value: &str) -> Result<Grid> {
        // `lines` also strips a trailing '\r'
        let mut lines = value.lines();
        let rows = Self::decode_dimension(1, lines.next())?;
        let cols = Self::decode_dimension(2, lines.next())?;
        if rows <= 0 || cols <= 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let (rows, cols) = (rows as usize, cols as usize);
        Grid::cell_count(rows, cols)?;

        // grows with the rows actually present, never with the declared size
        let mut cells = Vec::new();
        for r in 0..rows {
            let line_no = r + 3;
            let line = lines.next().ok_or_else(|| {
                Error::malformed(line_no, format!("expected {rows} rows, found {r}"))
            })?;
            Self::decode_row(line_no, line, cols, &mut cells)?;
        }
        Grid::from_cells(rows, cols, cells)
    }
}
