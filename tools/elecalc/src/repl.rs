//! Interactive REPL
//!
//! A line-oriented front end over [`Session`]: one calculation per line,
//! with Tab completion for command names, modes and waveform names.

use crate::request::COMMANDS;
use crate::session::{Reply, Session};
use anyhow::{Context, Result};
use colored::*;
use elec_calc::Waveform;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

// ============================================================================
// Tab Completion Helper
// ============================================================================

struct CalcHelper;

impl Helper for CalcHelper {}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CalcHelper {}

impl Validator for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(complete(&line[..pos]))
    }
}

fn pairs<'a>(candidates: impl IntoIterator<Item = &'a str>, prefix: &str) -> Vec<Pair> {
    let prefix = prefix.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| c.starts_with(&prefix))
        .map(|c| Pair {
            display: c.to_string(),
            replacement: c.to_string(),
        })
        .collect()
}

/// Completion candidates for the text left of the cursor
fn complete(line: &str) -> (usize, Vec<Pair>) {
    // Command name (no space yet)
    if !line.contains(' ') {
        return (0, pairs(COMMANDS.iter().copied(), line));
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(cmd) = parts.first() else {
        return (line.len(), vec![]);
    };
    let typing = if line.ends_with(' ') { "" } else { parts.last().copied().unwrap_or("") };
    let start = line.len() - typing.len();
    let arg_index = if typing.is_empty() { parts.len() } else { parts.len() - 1 };

    match (cmd.to_lowercase().as_str(), arg_index) {
        ("mode", 1) => (start, pairs(["dc", "ac", "reader"], typing)),
        ("rms", 2) => (start, pairs(Waveform::ALL.iter().map(|w| w.name()), typing)),
        ("three-phase" | "3p", 4) => (start, pairs(["wye", "delta"], typing)),
        ("resistor" | "color", 1) => (start, pairs(["4-band", "5-band"], typing)),
        _ => (start, vec![]),
    }
}

/// Interactive REPL loop
pub fn run(session: &mut Session) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(config).context("Failed to initialize readline")?;
    rl.set_helper(Some(CalcHelper));

    println!("{}", "Electrical Calculator".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    loop {
        match rl.readline(&session.prompt()) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Add to history (ignore errors)
                let _ = rl.add_history_entry(line);

                match session.handle_line(line) {
                    Reply::Output(text) => println!("{}", text.bright_green()),
                    Reply::Error(text) => eprintln!("{} {}", "Error:".red(), text),
                    Reply::Quit => break,
                    Reply::Nothing => {},
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - ignore and continue
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                break;
            },
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    println!("Bye!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(result: (usize, Vec<Pair>)) -> (usize, Vec<String>) {
        (result.0, result.1.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn test_complete_command() {
        let (start, found) = names(complete("re"));
        assert_eq!(start, 0);
        assert_eq!(found, vec!["resonance", "resistor"]);
    }

    #[test]
    fn test_complete_mode_argument() {
        let (start, found) = names(complete("mode a"));
        assert_eq!(start, 5);
        assert_eq!(found, vec!["ac"]);
    }

    #[test]
    fn test_complete_waveform() {
        let (start, found) = names(complete("rms 10 h"));
        assert_eq!(start, 7);
        assert_eq!(found, vec!["half-wave rectified"]);
    }

    #[test]
    fn test_complete_blank_line() {
        let (start, found) = names(complete("  "));
        assert_eq!(start, 2);
        assert!(found.is_empty());
    }

    #[test]
    fn test_complete_connection_after_space() {
        let (_, found) = names(complete("3p 230 10 1 "));
        assert_eq!(found, vec!["wye", "delta"]);
    }
}
