//! Finite automata: determinization by subset construction and minimization
//! by partition refinement, plus a line-oriented graph description format
//! and plain-text renderings of automata and algorithm traces.
//!
//! ```
//! use fsa::{Automaton, Symbol, determinize, minimize};
//!
//! // (a|b)*ab with a redundant branch
//! let mut nfa = Automaton::new();
//! nfa.set_start_state(0);
//! nfa.add_final_state(2);
//! nfa.add_transition(0, Symbol::Char('a'), 0);
//! nfa.add_transition(0, Symbol::Char('b'), 0);
//! nfa.add_transition(0, Symbol::Char('a'), 1);
//! nfa.add_transition(1, Symbol::Char('b'), 2);
//!
//! let dfa = determinize(&nfa);
//! assert!(dfa.is_deterministic());
//!
//! let min = minimize(&dfa).unwrap();
//! assert!(min.recognize("abab"));
//! assert!(!min.recognize("aba"));
//! ```

pub mod automaton;
pub mod dot;
pub mod error;
pub mod render;

pub use automaton::{
    Automaton, DeterminizationTrace, MinimizationTrace, Recognition, Rejection, StateId, StateSet,
    Symbol, determinize, determinize_traced, minimize, minimize_traced,
};
pub use error::{Error, Result};
