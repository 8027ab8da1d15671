//! Destinations for per-generation snapshots.

use crate::{Grid, GridCodec, TextGrid};
use std::{
    fs, io,
    ops::Deref,
    path::{Path, PathBuf},
};

/// One generation of a simulation, lent out read-only
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub generation: u64,
    pub population: usize,
    pub grid: &'a Grid,
}

impl Snapshot<'_> {
    pub fn detach(&self) -> OwnedSnapshot {
        OwnedSnapshot {
            generation: self.generation,
            population: self.population,
            grid: self.grid.clone(),
        }
    }
}

/// A [`Snapshot`] holding its own copy of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedSnapshot {
    pub generation: u64,
    pub population: usize,
    pub grid: Grid,
}

/// Receives a snapshot every generation
pub trait SnapshotSink {
    fn emit(&mut self, snapshot: Snapshot<'_>) -> io::Result<()>;
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    #[inline]
    fn emit(&mut self, snapshot: Snapshot<'_>) -> io::Result<()> {
        (**self).emit(snapshot)
    }
}

impl<S: SnapshotSink> SnapshotSink for Option<S> {
    #[inline]
    fn emit(&mut self, snapshot: Snapshot<'_>) -> io::Result<()> {
        match self {
            Some(sink) => sink.emit(snapshot),
            None => Ok(()),
        }
    }
}

impl<A: SnapshotSink, B: SnapshotSink> SnapshotSink for (A, B) {
    fn emit(&mut self, snapshot: Snapshot<'_>) -> io::Result<()> {
        self.0.emit(snapshot)?;
        self.1.emit(snapshot)
    }
}

/// Drops every snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl SnapshotSink for Discard {
    #[inline]
    fn emit(&mut self, _: Snapshot<'_>) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps a copy of every snapshot in memory
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    snapshots: Vec<OwnedSnapshot>,
}

impl Deref for History {
    type Target = [OwnedSnapshot];

    fn deref(&self) -> &Self::Target {
        &self.snapshots
    }
}

impl SnapshotSink for History {
    fn emit(&mut self, snapshot: Snapshot<'_>) -> io::Result<()> {
        self.snapshots.push(snapshot.detach());
        Ok(())
    }
}

/// Overwrites a single file with the latest encoded snapshot
#[derive(Debug)]
pub struct FileSink<C = TextGrid> {
    path: PathBuf,
    codec: C,
}

impl FileSink<TextGrid> {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Self::with_codec(path, TextGrid)
    }
}

impl<C: GridCodec> FileSink<C> {
    /// Creates the sink, making sure the parent directory exists
    pub fn with_codec<P: AsRef<Path>>(path: P, codec: C) -> io::Result<Self> {
        let path = path.as_ref().to_owned();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path, codec })
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<C: GridCodec> SnapshotSink for FileSink<C> {
    fn emit(&mut self, snapshot: Snapshot<'_>) -> io::Result<()> {
        fs::write(&self.path, self.codec.encode(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellState;

    fn snapshot(grid: &Grid) -> Snapshot<'_> {
        Snapshot {
            generation: 3,
            population: grid.population(),
            grid,
        }
    }

    #[test]
    fn history_keeps_owned_copies() {
        let mut grid = Grid::with_alive(2, 2, &[(0, 0)]).unwrap();
        let mut history = History::default();
        history.emit(snapshot(&grid)).unwrap();

        grid.set(1, 1, CellState::Alive);

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].population, 1);
        assert_eq!(history[0].grid.get(1, 1), CellState::Dead);
    }

    #[test]
    fn pair_and_option_forward() {
        let grid = Grid::new(2, 2).unwrap();
        let mut sink = (History::default(), Some(History::default()));
        sink.emit(snapshot(&grid)).unwrap();
        let mut none: Option<History> = None;
        none.emit(snapshot(&grid)).unwrap();

        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.1.as_ref().map(|h| h.len()), Some(1));
    }

    #[test]
    fn file_sink_overwrites_latest() {
        let dir = std::env::temp_dir().join(format!("lifelike-sink-{}", std::process::id()));
        let path = dir.join("nested").join("grid");
        let mut sink = FileSink::new(&path).unwrap();
        assert_eq!(sink.path(), path);
        assert!(path.parent().unwrap().is_dir());

        let grid = Grid::with_alive(1, 2, &[(0, 0)]).unwrap();
        sink.emit(snapshot(&grid)).unwrap();
        sink.emit(Snapshot {
            generation: 4,
            population: 0,
            grid: &Grid::new(1, 2).unwrap(),
        })
        .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "gen: 4\npop: 0\n\u{25A1}\u{25A1}");
        fs::remove_dir_all(&dir).unwrap();
    }
}
