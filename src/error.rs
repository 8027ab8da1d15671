//! Error types for the automaton core and its loaders.

use thiserror::Error;

/// Errors raised while building grids, rules or driving a simulation.
#[derive(Debug, Error)]
pub enum Error {
    /// A grid was declared with zero rows or columns.
    #[error("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: i64, cols: i64 },

    /// Grid text does not match its declared dimensions or alphabet.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// A cancer rule parameter is out of range.
    #[error("invalid rule parameter: {0}")]
    InvalidRuleParameter(String),

    /// A rule identifier is not of the form `b<digits>s<digits>`.
    #[error("invalid rule name: {0:?}")]
    InvalidRuleName(String),

    /// `step` was called before `start`.
    #[error("simulation has not been started")]
    NotStarted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
