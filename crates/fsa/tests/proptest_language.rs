//! Property-based tests: determinization and minimization preserve the
//! language and produce deterministic, stable results.

use fsa::{Automaton, StateId, Symbol, determinize, minimize};
use proptest::prelude::*;

const MAX_STATE: StateId = 6;

fn build_strategy(
    state: impl Strategy<Value = StateId> + Clone,
    labels: Vec<char>,
) -> impl Strategy<Value = Automaton> {
    let label = prop::option::weighted(0.8, prop::sample::select(labels));
    (
        state.clone(),
        prop::collection::vec((state.clone(), label, state.clone()), 0..18),
        prop::collection::vec(state, 0..4),
    )
        .prop_map(|(start, arcs, finals)| {
            let mut fa = Automaton::new();
            fa.set_start_state(start);
            for state in finals {
                fa.add_final_state(state);
            }
            for (from, label, to) in arcs {
                match label {
                    Some(c) => fa.add_transition(from, Symbol::Char(c), to),
                    None => fa.add_epsilon_transition(from, to),
                }
            }
            fa
        })
}

// Strategy for small automata over {a, b, c} with occasional epsilon arcs
fn automaton_strategy() -> impl Strategy<Value = Automaton> {
    build_strategy(0..MAX_STATE, vec!['a', 'b', 'c'])
}

// Sparse ids and labels that stress the graph description syntax
fn awkward_automaton_strategy() -> impl Strategy<Value = Automaton> {
    let state = prop::sample::select(vec![0, 7, 4_000_000_000, StateId::MAX]);
    let labels = vec!['a', ';', ']', '-', '>', '=', '\u{e9}', ',', '"', ' '];
    build_strategy(state, labels)
}

fn is_label_char(c: char) -> bool {
    c != ',' && c != '"' && !c.is_whitespace()
}

// Every word over {a, b, c, d} up to length `max_len`; 'd' is never in the alphabet
fn all_words(max_len: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix| ['a', 'b', 'c', 'd'].map(|c| format!("{prefix}{c}")))
            .collect();
        words.extend(frontier.iter().cloned());
    }
    words
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn determinize_is_deterministic(nfa in automaton_strategy()) {
        prop_assert!(determinize(&nfa).is_deterministic());
    }

    #[test]
    fn determinize_preserves_language(nfa in automaton_strategy()) {
        let dfa = determinize(&nfa);
        for word in all_words(4) {
            prop_assert_eq!(nfa.recognize(&word), dfa.recognize(&word), "word {:?}", word);
        }
    }

    #[test]
    fn minimize_preserves_language(nfa in automaton_strategy()) {
        let dfa = determinize(&nfa);
        let min = minimize(&dfa).unwrap();
        prop_assert!(min.is_deterministic());
        for word in all_words(4) {
            prop_assert_eq!(dfa.recognize(&word), min.recognize(&word), "word {:?}", word);
        }
    }

    #[test]
    fn minimize_never_grows(nfa in automaton_strategy()) {
        let dfa = determinize(&nfa);
        let min = minimize(&dfa).unwrap();
        prop_assert!(min.states().len() <= dfa.states().len());
        prop_assert!(min.transition_count() <= dfa.transition_count());
    }

    #[test]
    fn minimize_is_idempotent(nfa in automaton_strategy()) {
        let once = minimize(&determinize(&nfa)).unwrap();
        let twice = minimize(&once).unwrap();
        prop_assert_eq!(once.states().len(), twice.states().len());
        prop_assert_eq!(once.transition_count(), twice.transition_count());
        prop_assert_eq!(once.final_states().len(), twice.final_states().len());
    }

    #[test]
    fn determinize_of_minimal_dfa_is_a_renaming(nfa in automaton_strategy()) {
        let min = minimize(&determinize(&nfa)).unwrap();
        let again = determinize(&min);
        prop_assert_eq!(min.states().len(), again.states().len());
        prop_assert_eq!(min.transition_count(), again.transition_count());
        for word in all_words(3) {
            prop_assert_eq!(min.recognize(&word), again.recognize(&word), "word {:?}", word);
        }
    }

    #[test]
    fn dot_round_trip(nfa in automaton_strategy()) {
        let text = fsa::dot::to_string(&nfa, "generated").unwrap();
        let mut reparsed = fsa::dot::parse(&text).unwrap();
        reparsed.set_title("");
        prop_assert_eq!(reparsed, nfa);
    }

    #[test]
    fn dot_output_always_parses_back(fa in awkward_automaton_strategy()) {
        let writable = fa
            .transitions()
            .all(|(_, symbol, _)| symbol.as_char().is_none_or(is_label_char));
        match fsa::dot::to_string(&fa, "awkward-name") {
            Ok(text) => {
                prop_assert!(writable);
                let reparsed = fsa::dot::parse(&text).unwrap();
                prop_assert_eq!(reparsed.title(), "awkward_name");
                prop_assert_eq!(reparsed.states(), fa.states());
                prop_assert_eq!(reparsed.final_states(), fa.final_states());
                prop_assert_eq!(reparsed.start_state(), fa.start_state());
                prop_assert!(reparsed.transitions().eq(fa.transitions()));
            }
            Err(err) => {
                prop_assert!(!writable);
                let is_unrepresentable = matches!(err, fsa::Error::UnrepresentableLabel { .. });
                prop_assert!(is_unrepresentable);
            }
        }
    }
}
