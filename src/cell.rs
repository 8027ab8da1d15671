use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
    Cancerous,
}

impl CellState {
    pub const DEAD_GLYPH: char = '\u{25A1}';
    pub const ALIVE_GLYPH: char = '\u{25A3}';
    pub const CANCER_GLYPH: char = '\u{25A9}';

    /// Maps a grid glyph to its state
    ///
    /// Accepts the canonical box glyphs as well as the ASCII stand-ins `.`, `O` and `X`.
    #[inline]
    pub fn from_glyph(c: char) -> Option<Self> {
        match c {
            Self::DEAD_GLYPH | '.' => Some(Self::Dead),
            Self::ALIVE_GLYPH | 'O' => Some(Self::Alive),
            Self::CANCER_GLYPH | 'X' => Some(Self::Cancerous),
            _ => None,
        }
    }

    #[inline]
    pub fn glyph(self) -> char {
        match self {
            Self::Dead => Self::DEAD_GLYPH,
            Self::Alive => Self::ALIVE_GLYPH,
            Self::Cancerous => Self::CANCER_GLYPH,
        }
    }

    #[inline]
    pub fn is_alive(self) -> bool {
        self == Self::Alive
    }
    #[inline]
    pub fn is_cancerous(self) -> bool {
        self == Self::Cancerous
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_round_trip() {
        for state in [CellState::Dead, CellState::Alive, CellState::Cancerous] {
            assert_eq!(CellState::from_glyph(state.glyph()), Some(state));
        }
    }

    #[test]
    fn ascii_glyphs_are_accepted() {
        assert_eq!(CellState::from_glyph('.'), Some(CellState::Dead));
        assert_eq!(CellState::from_glyph('O'), Some(CellState::Alive));
        assert_eq!(CellState::from_glyph('X'), Some(CellState::Cancerous));
        assert_eq!(CellState::from_glyph('#'), None);
    }
}
