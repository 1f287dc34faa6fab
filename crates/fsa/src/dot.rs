//! The line-oriented graph description format.
//!
//! ```text
//! digraph cycle
//! {
//!     start = 0;
//!     final = 2, 3;
//!
//!     0 -> 1 [label = "a, b"];
//!     1 -> 2;
//! }
//! ```
//!
//! Every line is read on its own. A `from -> to` line without a label, or
//! with an empty label list, is an epsilon transition; every other label must
//! be exactly one character. Lines that match no declaration are ignored.
//!
//! Serializing refuses symbols the label list cannot carry (`,`, `"` and
//! whitespace) and writes the graph name with every non-word character
//! replaced by `_`, so everything [`to_string`] produces parses back to the
//! same transitions.

use crate::automaton::{Automaton, StateId, Symbol};
use crate::error::{Error, Result};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, map, opt},
    sequence::{delimited, preceded, terminated},
};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq)]
enum Declaration<'a> {
    Title(&'a str),
    Start(&'a str),
    Final(&'a str),
    Edge {
        from: &'a str,
        to: &'a str,
        labels: Option<&'a str>,
    },
}

fn word(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_').parse(input)
}

fn equals(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char('='), multispace0).parse(input)
}

fn declaration_end(input: &str) -> IResult<&str, ()> {
    map((multispace0, opt(char(';')), multispace0), |_| ()).parse(input)
}

/// `digraph name {`, anything may follow.
fn title(input: &str) -> IResult<&str, &str> {
    terminated(
        preceded((multispace0, tag("digraph"), multispace1), word),
        (multispace0, opt(char('{'))),
    )
    .parse(input)
}

fn start(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited((multispace0, tag("start"), equals), word, declaration_end))
        .parse(input)
}

fn finals(input: &str) -> IResult<&str, &str> {
    all_consuming(delimited(
        (multispace0, tag("final"), equals),
        is_not(";"),
        declaration_end,
    ))
    .parse(input)
}

fn label(input: &str) -> IResult<&str, &str> {
    delimited(
        (multispace0, char('['), multispace0, tag("label"), equals, char('"')),
        take_while(|c: char| c != '"'),
        (char('"'), multispace0, char(']')),
    )
    .parse(input)
}

fn edge(input: &str) -> IResult<&str, (&str, &str, Option<&str>)> {
    all_consuming(map(
        (
            preceded(multispace0, word),
            delimited(multispace0, tag("->"), multispace0),
            word,
            opt(label),
            declaration_end,
        ),
        |(from, _, to, labels, _)| (from, to, labels),
    ))
    .parse(input)
}

fn declaration(line: &str) -> Option<Declaration<'_>> {
    alt((
        map(title, Declaration::Title),
        map(start, Declaration::Start),
        map(finals, Declaration::Final),
        map(edge, |(from, to, labels)| Declaration::Edge { from, to, labels }),
    ))
    .parse(line)
    .ok()
    .map(|(_, decl)| decl)
}

fn state_id(line: usize, text: &str) -> Result<StateId> {
    text.trim().parse().map_err(|_| Error::InvalidState {
        line,
        value: text.trim().to_string(),
    })
}

fn add_labeled_edges(
    automaton: &mut Automaton,
    line: usize,
    from: StateId,
    to: StateId,
    labels: &str,
) -> Result<()> {
    if labels.is_empty() {
        automaton.add_epsilon_transition(from, to);
        return Ok(());
    }

    for label in labels.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => automaton.add_transition(from, Symbol::Char(c), to),
            _ => {
                return Err(Error::InvalidLabel {
                    line,
                    label: label.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Build an automaton from a graph description.
///
/// # Errors
///
/// Returns [`Error::InvalidLabel`] for a label longer than one character and
/// [`Error::InvalidState`] for a state that is not a `u32`.
pub fn parse(source: &str) -> Result<Automaton> {
    let mut automaton = Automaton::new();

    for (idx, text) in source.lines().enumerate() {
        let line = idx + 1;
        let Some(decl) = declaration(text) else {
            continue;
        };

        match decl {
            Declaration::Title(name) => automaton.set_title(name),
            Declaration::Start(state) => automaton.set_start_state(state_id(line, state)?),
            Declaration::Final(list) => {
                for state in list.split(',').filter(|s| !s.trim().is_empty()) {
                    automaton.add_final_state(state_id(line, state)?);
                }
            }
            Declaration::Edge { from, to, labels } => {
                let from = state_id(line, from)?;
                let to = state_id(line, to)?;
                match labels {
                    Some(labels) => add_labeled_edges(&mut automaton, line, from, to, labels)?,
                    None => automaton.add_epsilon_transition(from, to),
                }
            }
        }
    }

    Ok(automaton)
}

/// Read and parse a graph description file.
///
/// # Errors
///
/// Fails if the file cannot be read or does not parse, see [`parse`].
pub fn from_file(path: impl AsRef<Path>) -> Result<Automaton> {
    let source = std::fs::read_to_string(path)?;
    parse(&source)
}

impl FromStr for Automaton {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Serializes an automaton back to the graph description format.
pub struct Dot<'a> {
    automaton: &'a Automaton,
    title: String,
}

impl<'a> Dot<'a> {
    /// `fallback_title` names the graph when the automaton has no title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrepresentableLabel`] for the first transition whose
    /// symbol cannot appear in a label list.
    pub fn new(automaton: &'a Automaton, fallback_title: &str) -> Result<Self> {
        let unrepresentable = automaton.transitions().find_map(|(from, symbol, to)| {
            symbol
                .as_char()
                .filter(|&c| !is_label_char(c))
                .map(|symbol| (from, to, symbol))
        });
        if let Some((from, to, symbol)) = unrepresentable {
            return Err(Error::UnrepresentableLabel { from, to, symbol });
        }

        let title = if automaton.title().is_empty() {
            fallback_title
        } else {
            automaton.title()
        };

        Ok(Self {
            automaton,
            title: graph_name(title),
        })
    }
}

/// Label lists are split on `,` and trimmed, and the list ends at the next `"`.
fn is_label_char(symbol: char) -> bool {
    symbol != ',' && symbol != '"' && !symbol.is_whitespace()
}

/// The longest graph name [`parse`] reads back unchanged.
fn graph_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        "automaton".to_string()
    } else {
        name
    }
}

impl fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fa = self.automaton;
        let title = &self.title;

        writeln!(f, "digraph {title}")?;
        writeln!(f, " {{")?;
        writeln!(f, "    start = {};", fa.start_state())?;
        let finals: Vec<String> = fa.final_states().iter().map(|s| s.to_string()).collect();
        writeln!(f, "    final = {};", finals.join(", "))?;
        writeln!(f)?;

        let mut by_pair: BTreeMap<(StateId, StateId), Vec<Symbol>> = BTreeMap::new();
        for (from, symbol, to) in fa.transitions() {
            by_pair.entry((from, to)).or_default().push(symbol);
        }

        for ((from, to), symbols) in &by_pair {
            let has_epsilon = symbols.iter().any(|s| s.is_epsilon());
            let labels: Vec<String> = symbols
                .iter()
                .filter_map(|s| s.as_char())
                .map(String::from)
                .collect();

            if has_epsilon && !labels.is_empty() {
                tracing::info!(
                    graph = %title,
                    from,
                    to,
                    labels = %labels.join(", "),
                    "transition has both ε and symbols"
                );
            }

            if !labels.is_empty() {
                writeln!(f, "    {from} -> {to} [label = \"{}\"];", labels.join(", "))?;
            }
            if has_epsilon {
                writeln!(f, "    {from} -> {to};")?;
            }
        }

        writeln!(f, "}}")
    }
}

/// Serialize an automaton to a graph description.
///
/// # Errors
///
/// See [`Dot::new`].
pub fn to_string(automaton: &Automaton, fallback_title: &str) -> Result<String> {
    Ok(Dot::new(automaton, fallback_title)?.to_string())
}

/// Write an automaton to a graph description file. The file stem names the
/// graph when the automaton has no title.
///
/// # Errors
///
/// Fails if the automaton cannot be serialized, see [`Dot::new`], or if the
/// file cannot be written.
pub fn write_file(automaton: &Automaton, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let fallback = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("automaton");
    std::fs::write(path, to_string(automaton, fallback)?)?;
    Ok(())
}
