//! The finite automaton value shared by every algorithm in this crate.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet};

/// A finite automaton over `char`, possibly non-deterministic and possibly
/// with epsilon arcs.
///
/// Every mutation keeps the structural invariants: any state mentioned by a
/// transition, the start state or the final set is also in `states`, and any
/// ordinary symbol on a transition is in `alphabet`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Automaton {
    /// Display name, not used by any algorithm
    title: String,
    /// All states
    states: StateSet,
    /// All symbols used (excluding epsilon)
    alphabet: BTreeSet<char>,
    /// Transitions: (source, symbol) -> set of destination states
    transitions: BTreeMap<(StateId, Symbol), StateSet>,
    /// Start state, 0 until set
    start: StateId,
    /// Final (accepting) states
    finals: StateSet,
}

impl Automaton {
    /// Create a new empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty automaton with a display name.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Get the display name (may be empty).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the display name.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Register a state that may have no transitions at all.
    pub fn add_state(&mut self, state: StateId) {
        self.states.insert(state);
    }

    /// Add a transition from source to destination on the given symbol.
    ///
    /// Both endpoints become states of the automaton and an ordinary symbol
    /// joins the alphabet. Adding the same arc twice has no further effect.
    pub fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.states.insert(source);
        self.states.insert(destination);

        if let Symbol::Char(c) = symbol {
            self.alphabet.insert(c);
        }

        self.transitions
            .entry((source, symbol))
            .or_default()
            .insert(destination);
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, Symbol::Epsilon, destination);
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        self.states.insert(state);
        self.start = state;
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.states.insert(state);
        self.finals.insert(state);
    }

    /// Get all states.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Get the alphabet in sorted order.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.finals
    }

    /// Check if a state is final.
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(state)
    }

    /// Check if the automaton has no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Get the destinations of `source` on `symbol`, if there are any.
    pub fn destinations(&self, source: StateId, symbol: Symbol) -> Option<&StateSet> {
        self.transitions.get(&(source, symbol))
    }

    /// Iterate over the labeled destination sets leaving `source`, epsilon first.
    pub fn outgoing(&self, source: StateId) -> impl Iterator<Item = (Symbol, &StateSet)> + '_ {
        self.transitions
            .range((source, Symbol::Epsilon)..=(source, Symbol::Char(char::MAX)))
            .map(|(&(_, symbol), destinations)| (symbol, destinations))
    }

    /// Get all transitions as an iterator, ordered by source, symbol, destination.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, Symbol, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Count the (source, symbol, destination) triples.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(StateSet::len).sum()
    }

    /// Check whether the automaton is deterministic: no epsilon arcs and at
    /// most one destination per (state, symbol) pair.
    pub fn is_deterministic(&self) -> bool {
        self.transitions
            .iter()
            .all(|(&(_, symbol), destinations)| !symbol.is_epsilon() && destinations.len() <= 1)
    }
}
