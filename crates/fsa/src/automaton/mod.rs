//! Finite automata over `char`.
//!
//! This module provides the automaton value together with:
//! - Epsilon closure and symbol-move primitives
//! - NFA/DFA word recognition
//! - Subset construction (NFA to DFA conversion)
//! - DFA minimization by partition refinement
//!
//! Transformations never mutate their input; each returns a new automaton.

mod closure;
mod machine;
mod minimize;
mod recognize;
mod state;
mod subset_construction;
mod symbol;

pub use machine::Automaton;
pub use minimize::{
    MinimizationTrace, RefinementPass, Signature, block_name, minimize, minimize_traced,
};
pub use recognize::{Recognition, Rejection};
pub use state::{StateId, StateSet};
pub use subset_construction::{DeterminizationTrace, determinize, determinize_traced};
pub use symbol::Symbol;
