//! Core library for life-like cellular automata.

pub mod cell;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rules;
pub mod sink;
pub mod text;

pub use cell::CellState;
pub use engine::{Simulation, Status, Termination};
pub use error::{Error, Result};
pub use grid::{Grid, GridWindow, Neighborhood};
pub use rules::{Cancer, NeighborSet, RuleSet, RuleSpec, Standard, Transition};
pub use sink::{Discard, FileSink, History, OwnedSnapshot, Snapshot, SnapshotSink};
pub use text::{GridCodec, TextGrid};
