//! Word recognition by simulating the automaton on a set of active states.
//!
//! The simulation is valid for NFAs and DFAs alike: a DFA simply never has
//! more than one active state.

use crate::automaton::machine::Automaton;
use crate::automaton::state::StateSet;

/// Why a word was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The active set became empty while reading `symbol`.
    NoTransition {
        /// Char index of `symbol` in the input.
        position: usize,
        /// The symbol that could not be consumed.
        symbol: char,
        /// Active states before the failed move.
        previous: StateSet,
    },
    /// The whole input was consumed but no active state is final.
    NoFinalState {
        /// Active states at end of input.
        reached: StateSet,
    },
}

/// Outcome of [`Automaton::recognize_traced`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognition {
    /// The input word.
    pub input: String,
    /// Whether the word is in the language.
    pub accepted: bool,
    /// Explanation, present iff the word was rejected.
    pub rejection: Option<Rejection>,
}

impl Automaton {
    /// Test if an input string is a word of the language of the automaton.
    pub fn recognize(&self, input: &str) -> bool {
        self.simulate(input).is_ok()
    }

    /// Like [`Automaton::recognize`], but also explains a rejection.
    pub fn recognize_traced(&self, input: &str) -> Recognition {
        let rejection = self.simulate(input).err();
        if let Some(reason) = &rejection {
            tracing::debug!(input, ?reason, "word rejected");
        }
        Recognition {
            input: input.to_string(),
            accepted: rejection.is_none(),
            rejection,
        }
    }

    fn simulate(&self, input: &str) -> Result<(), Rejection> {
        let mut active = self.epsilon_closure(self.start_state());

        for (position, symbol) in input.chars().enumerate() {
            let next = self.step(&active, symbol);
            if next.is_empty() {
                return Err(Rejection::NoTransition {
                    position,
                    symbol,
                    previous: active,
                });
            }
            active = next;
        }

        if active.intersects(self.final_states()) {
            Ok(())
        } else {
            Err(Rejection::NoFinalState { reached: active })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Symbol;

    /// (ab)*c as a DFA
    fn abc_dfa() -> Automaton {
        let mut fa = Automaton::new();
        fa.set_start_state(0);
        fa.add_final_state(3);
        fa.add_transition(0, Symbol::Char('a'), 1);
        fa.add_transition(0, Symbol::Char('c'), 3);
        fa.add_transition(1, Symbol::Char('b'), 2);
        fa.add_transition(2, Symbol::Char('a'), 1);
        fa.add_transition(2, Symbol::Char('c'), 3);
        fa
    }

    #[test]
    fn test_dfa_recognition() {
        let fa = abc_dfa();
        let samples = vec![
            ("ababac", false),
            ("ababc", true),
            ("", false),
            ("abc", true),
            ("c", true),
            ("ac", false),
            ("ababababababababababababababababababababc", true),
        ];

        for (input, expected) in samples {
            assert_eq!(fa.recognize(input), expected, "input: {input:?}");
            assert_eq!(fa.recognize_traced(input).accepted, expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_nfa_with_epsilon_recognition() {
        // 0 -ε-> 1 -a-> 2(final), 0 -a-> 0
        let mut fa = Automaton::new();
        fa.set_start_state(0);
        fa.add_final_state(2);
        fa.add_epsilon_transition(0, 1);
        fa.add_transition(1, Symbol::Char('a'), 2);
        fa.add_transition(0, Symbol::Char('a'), 0);

        assert!(fa.recognize("a"));
        assert!(fa.recognize("aaaa"));
        assert!(!fa.recognize(""));
        assert!(!fa.recognize("ab"));
    }

    #[test]
    fn test_start_closure_reaches_final() {
        let mut fa = Automaton::new();
        fa.set_start_state(0);
        fa.add_final_state(1);
        fa.add_epsilon_transition(0, 1);
        assert!(fa.recognize(""));
    }

    #[test]
    fn test_rejection_no_transition() {
        let fa = abc_dfa();
        let result = fa.recognize_traced("abx");
        assert!(!result.accepted);
        assert_eq!(
            result.rejection,
            Some(Rejection::NoTransition {
                position: 2,
                symbol: 'x',
                previous: StateSet::singleton(2),
            })
        );
    }

    #[test]
    fn test_rejection_no_final_state() {
        let fa = abc_dfa();
        let result = fa.recognize_traced("ab");
        assert!(!result.accepted);
        assert_eq!(
            result.rejection,
            Some(Rejection::NoFinalState {
                reached: StateSet::singleton(2),
            })
        );
    }

    #[test]
    fn test_accepted_has_no_rejection() {
        let result = abc_dfa().recognize_traced("abc");
        assert!(result.accepted);
        assert!(result.rejection.is_none());
        assert_eq!(result.input, "abc");
    }

    #[test]
    fn test_empty_automaton_rejects() {
        let fa = Automaton::new();
        assert!(!fa.recognize(""));
        assert!(!fa.recognize("a"));
    }
}
