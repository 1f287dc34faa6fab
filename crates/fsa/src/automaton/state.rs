//! State types for automata.

use std::collections::BTreeSet;
use std::fmt;

/// A state identifier represented as a u32.
pub type StateId = u32;

/// A set of states keyed by the caller's own ids.
///
/// Ids are opaque and may be arbitrarily sparse, so storage grows with the
/// number of members rather than with the largest id. Iteration is always in
/// ascending order. Dense work (reachability, refinement) happens on
/// [`fixedbitset::FixedBitSet`]s over an interned numbering instead.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateSet {
    members: BTreeSet<StateId>,
}

impl StateSet {
    /// Create a new empty state set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId) -> Self {
        Self {
            members: BTreeSet::from([state]),
        }
    }

    /// Insert a state into the set. Returns `true` if it was not present.
    pub fn insert(&mut self, state: StateId) -> bool {
        self.members.insert(state)
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        self.members.contains(&state)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Iterate over all states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.members.iter().copied()
    }

    /// The smallest member, if any.
    pub fn first(&self) -> Option<StateId> {
        self.members.first().copied()
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        self.members.extend(other.iter());
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        !self.members.is_disjoint(&other.members)
    }

    /// Create a new set that is the intersection of this set and another.
    pub fn intersection(&self, other: &StateSet) -> StateSet {
        self.members.intersection(&other.members).copied().collect()
    }

    /// Create a new set with states not in other.
    pub fn difference(&self, other: &StateSet) -> StateSet {
        self.members.difference(&other.members).copied().collect()
    }

    /// The members as a sorted vec.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, state) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{state}")?;
        }
        f.write_str("}")
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}
