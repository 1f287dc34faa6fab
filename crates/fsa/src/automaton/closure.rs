//! Epsilon-closure and symbol-move primitives.
//!
//! These only read the transition relation, so any number of callers may
//! share one automaton while computing them.

use crate::automaton::machine::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use std::collections::VecDeque;

impl Automaton {
    /// Compute the epsilon closure of a single state using BFS.
    ///
    /// The result always contains `state` itself. Each state is visited at
    /// most once, so epsilon cycles terminate.
    pub fn epsilon_closure(&self, state: StateId) -> StateSet {
        let mut closure = StateSet::singleton(state);
        let mut queue = VecDeque::from([state]);

        while let Some(current) = queue.pop_front() {
            let Some(destinations) = self.destinations(current, Symbol::Epsilon) else {
                continue;
            };
            for dest in destinations.iter() {
                if closure.insert(dest) {
                    queue.push_back(dest);
                }
            }
        }

        closure
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure_of(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::new();
        for state in states.iter() {
            if !closure.contains(state) {
                closure.union_with(&self.epsilon_closure(state));
            }
        }
        closure
    }

    /// Get the states reachable from `states` by consuming `symbol`.
    ///
    /// Epsilon arcs are not followed, neither before nor after the move.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: char) -> StateSet {
        let mut reached = StateSet::new();
        for state in states.iter() {
            if let Some(destinations) = self.destinations(state, Symbol::Char(symbol)) {
                reached.union_with(destinations);
            }
        }
        reached
    }

    /// Move on `symbol`, then close over epsilon arcs.
    pub fn step(&self, states: &StateSet, symbol: char) -> StateSet {
        self.epsilon_closure_of(&self.move_on_symbol(states, symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_closure_chain() {
        let mut fa = Automaton::new();

        // 0 -ε-> 1 -ε-> 2
        fa.add_epsilon_transition(0, 1);
        fa.add_epsilon_transition(1, 2);
        fa.set_start_state(0);

        assert_eq!(fa.epsilon_closure(0).to_vec(), vec![0, 1, 2]);
        assert_eq!(fa.epsilon_closure(1).to_vec(), vec![1, 2]);
        assert_eq!(fa.epsilon_closure(2).to_vec(), vec![2]);
    }

    #[test]
    fn test_epsilon_closure_cycle() {
        let mut fa = Automaton::new();
        fa.add_epsilon_transition(0, 1);
        fa.add_epsilon_transition(1, 0);
        fa.add_epsilon_transition(1, 1);

        assert_eq!(fa.epsilon_closure(0).to_vec(), vec![0, 1]);
        assert_eq!(fa.epsilon_closure(1).to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_epsilon_closure_ignores_ordinary_arcs() {
        let mut fa = Automaton::new();
        fa.add_transition(0, Symbol::Char('a'), 1);
        assert_eq!(fa.epsilon_closure(0).to_vec(), vec![0]);
        // a state unknown to the automaton is still its own closure
        assert_eq!(fa.epsilon_closure(9).to_vec(), vec![9]);
    }

    #[test]
    fn test_epsilon_closure_of_set() {
        let mut fa = Automaton::new();
        fa.add_epsilon_transition(0, 1);
        fa.add_epsilon_transition(3, 4);

        let states: StateSet = [0, 3].into_iter().collect();
        assert_eq!(fa.epsilon_closure_of(&states).to_vec(), vec![0, 1, 3, 4]);
        assert!(fa.epsilon_closure_of(&StateSet::new()).is_empty());
    }

    #[test]
    fn test_move_on_symbol() {
        let mut fa = Automaton::new();

        // 0 -a-> 1, 0 -a-> 2, 1 -ε-> 3
        fa.add_transition(0, Symbol::Char('a'), 1);
        fa.add_transition(0, Symbol::Char('a'), 2);
        fa.add_epsilon_transition(1, 3);

        let start = StateSet::singleton(0);
        assert_eq!(fa.move_on_symbol(&start, 'a').to_vec(), vec![1, 2]);
        assert!(fa.move_on_symbol(&start, 'b').is_empty());
        assert_eq!(fa.step(&start, 'a').to_vec(), vec![1, 2, 3]);
    }
}
