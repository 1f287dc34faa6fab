//! DFA minimization by partition refinement.
//!
//! Unreachable states are dropped first. The reachable states then start in
//! two blocks (final / non-final) and blocks are split by signature until a
//! pass no longer increases the block count. At that fixed point two states
//! share a block iff no suffix distinguishes them.

use crate::automaton::machine::Automaton;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::Symbol;
use crate::error::{Error, Result};
use fixedbitset::FixedBitSet;
use indexmap::IndexSet;
use std::collections::BTreeMap;

const MINIMIZED_SUFFIX: &str = "Minimized";

/// Destination block per alphabet symbol, `None` where the state has no
/// transition. `None` orders before every block index.
pub type Signature = Vec<Option<usize>>;

/// One pass of the refinement loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinementPass {
    /// 1-based pass number.
    pub number: usize,
    /// The partition examined by this pass.
    pub blocks: Vec<StateSet>,
    /// Signature of every reachable state against `blocks`.
    pub signatures: BTreeMap<StateId, Signature>,
}

/// Every refinement pass of one minimization. Purely diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinimizationTrace {
    /// The alphabet, in signature order.
    pub alphabet: Vec<char>,
    /// Passes in execution order; the last one found the partition stable.
    pub passes: Vec<RefinementPass>,
}

/// Display name of a block: a letter for the pass (`A` for the first,
/// wrapping after `Z`) followed by the 1-based block index.
pub fn block_name(pass: usize, block: usize) -> String {
    let letter = char::from(b'A' + (pass.saturating_sub(1) % 26) as u8);
    format!("{letter}{}", block + 1)
}

/// Minimize a deterministic automaton.
///
/// # Errors
///
/// Returns [`Error::NotDeterministic`] before looking at any state if the
/// input has epsilon arcs or several destinations for one (state, symbol).
pub fn minimize(dfa: &Automaton) -> Result<Automaton> {
    partition_refinement(dfa, None)
}

/// Like [`minimize`], but also records the partition of every pass.
///
/// # Errors
///
/// Same as [`minimize`].
pub fn minimize_traced(dfa: &Automaton) -> Result<(Automaton, MinimizationTrace)> {
    let mut trace = MinimizationTrace::default();
    let minimized = partition_refinement(dfa, Some(&mut trace))?;
    Ok((minimized, trace))
}

fn partition_refinement(
    dfa: &Automaton,
    mut trace: Option<&mut MinimizationTrace>,
) -> Result<Automaton> {
    if !dfa.is_deterministic() {
        return Err(Error::NotDeterministic);
    }

    if dfa.is_empty() {
        return Ok(dfa.clone());
    }

    let alphabet: Vec<char> = dfa.alphabet().iter().copied().collect();
    let reachable = find_reachable_states(dfa);
    let successors = dense_successors(dfa, &alphabet, &reachable);
    let finals = final_mask(dfa, &reachable);
    let mut partitions = initial_partition(&finals);

    let mut pass = 0;
    loop {
        pass += 1;
        let block_of = block_index(&partitions, reachable.len());
        let signatures = compute_signatures(&successors, &block_of);
        let refined = split_blocks(&partitions, &signatures);

        tracing::debug!(
            pass,
            blocks = partitions.len(),
            refined = refined.len(),
            "refinement pass"
        );

        let stable = refined.len() <= partitions.len();
        if stable {
            assert_homogeneous(&partitions, &signatures);
        }

        if let Some(trace) = trace.as_deref_mut() {
            trace.passes.push(RefinementPass {
                number: pass,
                blocks: partitions
                    .iter()
                    .map(|block| to_state_set(block, &reachable))
                    .collect(),
                signatures: reachable.iter().copied().zip(signatures).collect(),
            });
        }

        if stable {
            break;
        }
        partitions = refined;
    }

    if let Some(trace) = trace {
        trace.alphabet = alphabet.clone();
    }

    Ok(build_minimized(dfa, &partitions, &successors, &finals, &alphabet))
}

/// Find all states reachable from the start state.
///
/// The result numbers them densely in discovery order, so the start state
/// has index 0 and every bitset below is sized by the reachable count
/// rather than by the largest state id.
fn find_reachable_states(dfa: &Automaton) -> IndexSet<StateId> {
    let mut reachable = IndexSet::from([dfa.start_state()]);
    let mut next = 0;

    while let Some(&state) = reachable.get_index(next) {
        next += 1;
        for (_, destinations) in dfa.outgoing(state) {
            reachable.extend(destinations.iter());
        }
    }

    reachable
}

/// Dense destination of every reachable state on every alphabet symbol.
fn dense_successors(
    dfa: &Automaton,
    alphabet: &[char],
    reachable: &IndexSet<StateId>,
) -> Vec<Vec<Option<usize>>> {
    reachable
        .iter()
        .map(|&state| {
            alphabet
                .iter()
                .map(|&symbol| {
                    dfa.destinations(state, Symbol::Char(symbol))
                        .and_then(StateSet::first)
                        .and_then(|dest| reachable.get_index_of(&dest))
                })
                .collect()
        })
        .collect()
}

fn final_mask(dfa: &Automaton, reachable: &IndexSet<StateId>) -> FixedBitSet {
    let mut finals = FixedBitSet::with_capacity(reachable.len());
    for (idx, &state) in reachable.iter().enumerate() {
        finals.set(idx, dfa.is_final(state));
    }
    finals
}

/// Reachable final states, then reachable non-final states; empty blocks
/// are omitted.
fn initial_partition(finals: &FixedBitSet) -> Vec<FixedBitSet> {
    let mut non_finals = finals.clone();
    non_finals.toggle_range(..);

    [finals.clone(), non_finals]
        .into_iter()
        .filter(|block| !block.is_clear())
        .collect()
}

fn block_index(partitions: &[FixedBitSet], len: usize) -> Vec<usize> {
    let mut block_of = vec![0; len];
    for (idx, block) in partitions.iter().enumerate() {
        for state in block.ones() {
            block_of[state] = idx;
        }
    }
    block_of
}

fn compute_signatures(successors: &[Vec<Option<usize>>], block_of: &[usize]) -> Vec<Signature> {
    successors
        .iter()
        .map(|row| {
            row.iter()
                .map(|&dest| dest.map(|dest| block_of[dest]))
                .collect()
        })
        .collect()
}

/// Group the members of every block by signature. Groups of one block stay
/// adjacent and are ordered by signature.
fn split_blocks(partitions: &[FixedBitSet], signatures: &[Signature]) -> Vec<FixedBitSet> {
    let mut refined = Vec::with_capacity(partitions.len());
    for block in partitions {
        let mut groups: BTreeMap<&Signature, FixedBitSet> = BTreeMap::new();
        for state in block.ones() {
            groups
                .entry(&signatures[state])
                .or_insert_with(|| FixedBitSet::with_capacity(block.len()))
                .insert(state);
        }
        refined.extend(groups.into_values());
    }
    refined
}

/// At the fixed point every member of a block has the same signature; the
/// output construction reads transitions off one representative per block
/// and is only sound under this condition.
fn assert_homogeneous(partitions: &[FixedBitSet], signatures: &[Signature]) {
    for (idx, block) in partitions.iter().enumerate() {
        let mut members = block.ones().map(|state| &signatures[state]);
        if let Some(first) = members.next() {
            assert!(
                members.all(|signature| signature == first),
                "block {idx} is not homogeneous after refinement"
            );
        }
    }
}

fn to_state_set(block: &FixedBitSet, reachable: &IndexSet<StateId>) -> StateSet {
    block
        .ones()
        .filter_map(|idx| reachable.get_index(idx).copied())
        .collect()
}

/// Build a minimized DFA from a stable partition.
fn build_minimized(
    dfa: &Automaton,
    partitions: &[FixedBitSet],
    successors: &[Vec<Option<usize>>],
    finals: &FixedBitSet,
    alphabet: &[char],
) -> Automaton {
    let mut minimized = Automaton::with_title(format!("{}{MINIMIZED_SUFFIX}", dfa.title()));
    let block_of = block_index(partitions, successors.len());

    for (idx, block) in partitions.iter().enumerate() {
        let state = idx as StateId;
        minimized.add_state(state);
        if !block.is_disjoint(finals) {
            minimized.add_final_state(state);
        }
    }

    // The start state is always reachable index 0
    if let Some(&start_block) = block_of.first() {
        minimized.set_start_state(start_block as StateId);
    }

    // Any member will do as representative: they all share a signature
    for (idx, block) in partitions.iter().enumerate() {
        let Some(representative) = block.ones().next() else {
            continue;
        };
        for (&symbol, dest) in alphabet.iter().zip(&successors[representative]) {
            if let Some(dest) = dest {
                minimized.add_transition(
                    idx as StateId,
                    Symbol::Char(symbol),
                    block_of[*dest] as StateId,
                );
            }
        }
    }

    minimized
}
