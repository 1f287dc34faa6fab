//! Subset construction algorithm for converting an ε-NFA to a DFA.

use crate::automaton::machine::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use indexmap::IndexSet;
use std::collections::VecDeque;

const DETERMINIZED_SUFFIX: &str = "Determinized";

/// What subset construction did, step by step. Purely diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeterminizationTrace {
    /// The alphabet in the order it was iterated.
    pub alphabet: Vec<char>,
    /// Discovered subsets; the DFA state id of a subset is its index.
    pub subsets: IndexSet<StateSet>,
    /// One row per processed subset, in processing order: the target subset
    /// for every symbol, empty targets included.
    pub rows: Vec<(StateSet, Vec<(char, StateSet)>)>,
}

impl DeterminizationTrace {
    /// The DFA state assigned to a subset of NFA states.
    pub fn state_of(&self, subset: &StateSet) -> Option<StateId> {
        self.subsets.get_index_of(subset).map(|idx| idx as StateId)
    }
}

/// Convert an automaton to an equivalent deterministic one using the
/// powerset construction.
///
/// Only subsets reachable from the start closure are materialized. A missing
/// transition is the reject path; no dead state is added.
pub fn determinize(nfa: &Automaton) -> Automaton {
    subset_construction(nfa, None)
}

/// Like [`determinize`], but also records every `(subset, symbol) -> subset`
/// step.
pub fn determinize_traced(nfa: &Automaton) -> (Automaton, DeterminizationTrace) {
    let mut trace = DeterminizationTrace::default();
    let dfa = subset_construction(nfa, Some(&mut trace));
    (dfa, trace)
}

fn subset_construction(nfa: &Automaton, mut trace: Option<&mut DeterminizationTrace>) -> Automaton {
    let mut dfa = Automaton::with_title(format!("{}{DETERMINIZED_SUFFIX}", nfa.title()));

    if nfa.is_empty() {
        return dfa;
    }

    // Each DFA state corresponds to a set of NFA states; its id is the
    // position at which the set was first seen.
    let mut registry: IndexSet<StateSet> = IndexSet::new();
    let mut worklist: VecDeque<StateId> = VecDeque::new();
    let alphabet: Vec<char> = nfa.alphabet().iter().copied().collect();

    let initial_set = nfa.epsilon_closure(nfa.start_state());
    let (initial_idx, _) = registry.insert_full(initial_set);
    let initial_dfa_state = initial_idx as StateId;
    dfa.set_start_state(initial_dfa_state);
    worklist.push_back(initial_dfa_state);

    while let Some(current_dfa_state) = worklist.pop_front() {
        let Some(current_nfa_set) = registry.get_index(current_dfa_state as usize).cloned() else {
            continue;
        };

        if current_nfa_set.intersects(nfa.final_states()) {
            dfa.add_final_state(current_dfa_state);
        }

        let mut row = Vec::new();

        for &symbol in &alphabet {
            let next_nfa_set = nfa.step(&current_nfa_set, symbol);
            tracing::trace!(from = %current_nfa_set, %symbol, to = %next_nfa_set, "subset move");

            if trace.is_some() {
                row.push((symbol, next_nfa_set.clone()));
            }

            if next_nfa_set.is_empty() {
                continue;
            }

            let (next_idx, is_new) = registry.insert_full(next_nfa_set);
            let next_dfa_state = next_idx as StateId;
            if is_new {
                worklist.push_back(next_dfa_state);
            }

            dfa.add_transition(current_dfa_state, Symbol::Char(symbol), next_dfa_state);
        }

        if let Some(trace) = trace.as_deref_mut() {
            trace.rows.push((current_nfa_set, row));
        }
    }

    tracing::debug!(
        nfa_states = nfa.states().len(),
        dfa_states = registry.len(),
        transitions = dfa.transition_count(),
        "subset construction finished"
    );

    if let Some(trace) = trace {
        trace.alphabet = alphabet;
        trace.subsets = registry;
    }

    dfa
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subset_construction_basic() {
        // NFA: 0 -a-> 1, 0 -a-> 2, 1 -b-> 3(final), 2 -b-> 3(final)
        let mut nfa = Automaton::new();
        nfa.add_transition(0, Symbol::Char('a'), 1);
        nfa.add_transition(0, Symbol::Char('a'), 2);
        nfa.add_transition(1, Symbol::Char('b'), 3);
        nfa.add_transition(2, Symbol::Char('b'), 3);
        nfa.set_start_state(0);
        nfa.add_final_state(3);

        let dfa = determinize(&nfa);

        assert!(dfa.is_deterministic());
        assert_eq!(dfa.states().len(), 3);
        assert_eq!(dfa.start_state(), 0);
        assert_eq!(dfa.final_states().to_vec(), vec![2]);
        assert!(dfa.recognize("ab"));
        assert!(!dfa.recognize("a"));
    }

    #[test]
    fn test_subset_construction_with_epsilon() {
        // NFA: 0 -ε-> 1 -a-> 2(final)
        let mut nfa = Automaton::new();
        nfa.add_epsilon_transition(0, 1);
        nfa.add_transition(1, Symbol::Char('a'), 2);
        nfa.set_start_state(0);
        nfa.add_final_state(2);

        let (dfa, trace) = determinize_traced(&nfa);

        assert_eq!(dfa.states().len(), 2);
        assert_eq!(dfa.transition_count(), 1);
        // Initial DFA state is {0, 1}, the epsilon closure of {0}
        assert_eq!(trace.subsets[0].to_vec(), vec![0, 1]);
        assert_eq!(trace.state_of(&StateSet::singleton(2)), Some(1));
    }

    #[test]
    fn test_trace_records_empty_targets() {
        let mut nfa = Automaton::new();
        nfa.set_start_state(0);
        nfa.add_final_state(1);
        nfa.add_transition(0, Symbol::Char('a'), 1);
        nfa.add_transition(1, Symbol::Char('b'), 1);

        let (_, trace) = determinize_traced(&nfa);

        assert_eq!(trace.alphabet, vec!['a', 'b']);
        assert_eq!(trace.rows.len(), 2);
        let (subset, moves) = &trace.rows[0];
        assert_eq!(subset.to_vec(), vec![0]);
        assert_eq!(moves[0], ('a', StateSet::singleton(1)));
        assert_eq!(moves[1], ('b', StateSet::new()));
    }

    #[test]
    fn test_ids_follow_discovery_order() {
        // 0 -b-> 2, 0 -a-> 1: 'a' is iterated first, so {1} gets id 1
        let mut nfa = Automaton::new();
        nfa.set_start_state(0);
        nfa.add_transition(0, Symbol::Char('b'), 2);
        nfa.add_transition(0, Symbol::Char('a'), 1);
        nfa.add_final_state(2);

        let dfa = determinize(&nfa);
        assert_eq!(dfa.destinations(0, Symbol::Char('a')).map(StateSet::to_vec), Some(vec![1]));
        assert_eq!(dfa.destinations(0, Symbol::Char('b')).map(StateSet::to_vec), Some(vec![2]));
        assert_eq!(dfa.final_states().to_vec(), vec![2]);
    }

    #[test]
    fn test_title_suffix() {
        let mut nfa = Automaton::with_title("cycle");
        nfa.set_start_state(0);
        assert_eq!(determinize(&nfa).title(), "cycleDeterminized");
    }

    #[test]
    fn test_empty_nfa() {
        let nfa = Automaton::new();
        let dfa = determinize(&nfa);
        assert!(dfa.is_empty());
        assert_eq!(dfa.transition_count(), 0);
    }
}
