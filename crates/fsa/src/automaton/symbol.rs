//! Symbol types for automata transitions.

use std::fmt;

/// A transition label.
///
/// Epsilon is a variant of its own rather than a reserved character, so no
/// alphabet member can ever be mistaken for it. `Epsilon` orders before
/// every ordinary symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// A move that consumes no input.
    Epsilon,
    /// A move that consumes exactly this character.
    Char(char),
}

impl Symbol {
    /// Check if the symbol is the epsilon marker.
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// The consumed character, or `None` for epsilon.
    #[inline]
    pub fn as_char(self) -> Option<char> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Char(c) => Some(c),
        }
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str("ε"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}
