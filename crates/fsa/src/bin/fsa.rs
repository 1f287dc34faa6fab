//! fsa - inspect, determinize, minimize and run finite automata described
//! in the line-oriented graph format.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fsa::{Automaton, dot};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_DATA: u8 = 2;

#[derive(Parser)]
#[command(name = "fsa")]
#[command(about = "Determinize and minimize finite automata")]
#[command(version)]
struct Cli {
    /// Log algorithm progress at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the intermediate tables of each algorithm
    #[arg(long, global = true, env = "FSA_LOG_STEPS")]
    log_steps: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the states, alphabet and transitions of an automaton
    Show {
        /// Graph description file
        input: PathBuf,
    },

    /// Convert an automaton to an equivalent deterministic one
    Determinize {
        /// Graph description file
        input: PathBuf,

        /// Write the result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Minimize a deterministic automaton
    Minimize {
        /// Graph description file
        input: PathBuf,

        /// Write the result to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Determinize first, so non-deterministic input is accepted
        #[arg(short, long)]
        determinize: bool,
    },

    /// Check which words the automaton accepts
    Recognize {
        /// Graph description file
        input: PathBuf,

        /// Words to check
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Automaton> {
    let automaton =
        dot::from_file(path).with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        states = automaton.states().len(),
        transitions = automaton.transition_count(),
        "automaton loaded"
    );
    Ok(automaton)
}

fn save(automaton: &Automaton, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        dot::write_file(automaton, path).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn execute(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Show { input } => {
            print!("{}", load(&input)?);
            Ok(true)
        }
        Commands::Determinize { input, output } => {
            let nfa = load(&input)?;
            let dfa = if cli.log_steps {
                let (dfa, trace) = fsa::determinize_traced(&nfa);
                print!("{trace}");
                dfa
            } else {
                fsa::determinize(&nfa)
            };
            print!("{dfa}");
            save(&dfa, output.as_deref())?;
            Ok(true)
        }
        Commands::Minimize {
            input,
            output,
            determinize,
        } => {
            let mut automaton = load(&input)?;
            if determinize {
                automaton = fsa::determinize(&automaton);
            }
            let minimized = if cli.log_steps {
                let (minimized, trace) = fsa::minimize_traced(&automaton)?;
                print!("{trace}");
                minimized
            } else {
                fsa::minimize(&automaton)?
            };
            print!("{minimized}");
            save(&minimized, output.as_deref())?;
            Ok(true)
        }
        Commands::Recognize { input, words } => {
            let automaton = load(&input)?;
            let mut all_accepted = true;
            for word in &words {
                let result = automaton.recognize_traced(word);
                all_accepted &= result.accepted;
                if cli.log_steps {
                    println!("{result}");
                } else if result.accepted {
                    println!("{word:?}: accepted");
                } else {
                    println!("{word:?}: rejected");
                }
            }
            Ok(all_accepted)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let data_error = err
                .downcast_ref::<fsa::Error>()
                .is_some_and(fsa::Error::is_data_error);
            if data_error {
                ExitCode::from(EXIT_DATA)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
