//! Error types for automaton construction and transformation.

use crate::automaton::StateId;
use thiserror::Error;

/// Errors produced by the builder and by minimization.
#[derive(Debug, Error)]
pub enum Error {
    /// Minimization was asked to work on an automaton that has epsilon
    /// arcs or more than one destination for some (state, symbol) pair.
    #[error("precondition violation: input automaton is not deterministic")]
    NotDeterministic,

    /// A transition label in the graph description is not a single character.
    #[error("line {line}: label {label:?} must be a single character")]
    InvalidLabel {
        /// 1-based line number.
        line: usize,
        /// The offending label, trimmed.
        label: String,
    },

    /// A state identifier in the graph description is not a valid u32.
    #[error("line {line}: {value:?} is not a valid state identifier")]
    InvalidState {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        value: String,
    },

    /// A symbol cannot be written inside a quoted, comma separated label
    /// list and would be lost on the way back in.
    #[error("symbol {symbol:?} on {from} -> {to} cannot be written as a label")]
    UnrepresentableLabel {
        /// Source state of the transition.
        from: StateId,
        /// Destination state of the transition.
        to: StateId,
        /// The symbol.
        symbol: char,
    },

    /// Reading or writing a graph description failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the error is caused by the data rather than the environment.
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

/// A specialized `Result` type for automaton operations.
pub type Result<T> = std::result::Result<T, Error>;
