//! Human-readable renderings of automata and algorithm traces.
//!
//! Nothing in the algorithms prints; these `Display` impls are what the
//! command-line tool writes to stdout.

use crate::automaton::{
    Automaton, DeterminizationTrace, MinimizationTrace, Recognition, RefinementPass, Rejection,
    StateSet, block_name,
};
use std::fmt;

const ALPHABET_COL_WIDTH: usize = 15;
const STATE_COL_WIDTH: usize = 4;

fn braced<I, T>(f: &mut fmt::Formatter<'_>, items: I) -> fmt::Result
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    f.write_str("{ ")?;
    for item in items {
        write!(f, "{item} ")?;
    }
    f.write_str("}")
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Automaton")?;
        if !self.title().is_empty() {
            write!(f, " {}", self.title())?;
        }
        writeln!(f)?;

        f.write_str("States (Q):       ")?;
        braced(f, self.states().iter())?;
        writeln!(f)?;

        f.write_str("Alphabet (Σ):     ")?;
        braced(f, self.alphabet().iter())?;
        writeln!(f)?;

        writeln!(f, "Start State (q₀): {{ {} }}", self.start_state())?;

        f.write_str("Final States (F): ")?;
        braced(f, self.final_states().iter())?;
        writeln!(f)?;

        writeln!(f, "Transitions (δ):  {{")?;
        if self.transition_count() == 0 {
            writeln!(f, "(No transitions defined)")?;
        } else {
            for source in self.states().iter() {
                for (symbol, destinations) in self.outgoing(source) {
                    write!(f, "\tδ({source}, {symbol}) -> ")?;
                    braced(f, destinations.iter())?;
                    writeln!(f)?;
                }
            }
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoTransition {
                position,
                symbol,
                previous,
            } => write!(
                f,
                "no valid transition on '{symbol}' at position {position} from states {previous}"
            ),
            Rejection::NoFinalState { reached } => {
                write!(f, "end of input, reached states {reached} contain no final state")
            }
        }
    }
}

impl fmt::Display for Recognition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rejection {
            None => write!(f, "{:?}: accepted", self.input),
            Some(reason) => write!(f, "{:?}: rejected ({reason})", self.input),
        }
    }
}

fn subset_cell(subset: &StateSet) -> String {
    if subset.is_empty() {
        "∅".to_string()
    } else {
        subset.to_string()
    }
}

impl fmt::Display for DeterminizationTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Determinization transition table")?;

        let mut table: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);
        let mut header = vec!["State".to_string(), "Subset".to_string()];
        header.extend(self.alphabet.iter().map(char::to_string));
        table.push(header);

        for (subset, moves) in &self.rows {
            let id = self
                .state_of(subset)
                .map_or_else(|| "?".to_string(), |id| id.to_string());
            let mut row = vec![id, subset_cell(subset)];
            row.extend(moves.iter().map(|(_, target)| subset_cell(target)));
            table.push(row);
        }

        let columns = table.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|col| {
                table
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for row in &table {
            f.write_str("|")?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, " {cell:<width$} |")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Renders one refinement pass as a table of destination blocks.
pub struct PassTable<'a> {
    alphabet: &'a [char],
    pass: &'a RefinementPass,
}

impl<'a> PassTable<'a> {
    /// Table for `pass`, with one row per symbol of `alphabet`.
    pub fn new(alphabet: &'a [char], pass: &'a RefinementPass) -> Self {
        Self { alphabet, pass }
    }
}

impl fmt::Display for PassTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pass = self.pass;
        let label_width = ALPHABET_COL_WIDTH - 2;
        let cell_width = STATE_COL_WIDTH - 1;
        let total_width = ALPHABET_COL_WIDTH
            + 1
            + pass
                .blocks
                .iter()
                .map(|block| block.len() * (STATE_COL_WIDTH + 1))
                .sum::<usize>();
        let line = "-".repeat(total_width);

        writeln!(f, "{line}")?;

        write!(f, "| {:<label_width$}|", "Class")?;
        for (idx, block) in pass.blocks.iter().enumerate() {
            let span = block.len() * STATE_COL_WIDTH - 1 + block.len().saturating_sub(1);
            write!(f, " {:<span$}|", block_name(pass.number, idx))?;
        }
        writeln!(f)?;
        writeln!(f, "{line}")?;

        write!(f, "| {:<label_width$}|", "Alph / State")?;
        for state in pass.blocks.iter().flat_map(StateSet::iter) {
            write!(f, " {state:<cell_width$}|")?;
        }
        writeln!(f)?;
        writeln!(f, "{line}")?;

        for (i, symbol) in self.alphabet.iter().enumerate() {
            write!(f, "| {symbol:<label_width$}|")?;
            for state in pass.blocks.iter().flat_map(StateSet::iter) {
                let dest = pass
                    .signatures
                    .get(&state)
                    .and_then(|signature| signature.get(i).copied().flatten())
                    .map_or_else(|| "-".to_string(), |block| block_name(pass.number, block));
                write!(f, " {dest:<cell_width$}|")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{line}")
    }
}

impl fmt::Display for MinimizationTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pass in &self.passes {
            writeln!(f)?;
            writeln!(f, "Iteration {}", pass.number)?;
            write!(f, "{}", PassTable::new(&self.alphabet, pass))?;
        }
        writeln!(f, "Partitions are stable. Minimization complete.")
    }
}
