//! Parsing of the line commands typed by the user.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the search query (empty clears it).
    Search(String),
    /// Jump to a zero-based page.
    GoTo(u64),
    Next,
    Previous,
    /// Print the current view again.
    Reprint,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command '{0}' (type 'h' for help)")]
    Unknown(String),

    #[error("Invalid page number '{0}' (pages start at 1)")]
    InvalidPage(String),
}

pub const USAGE: &str = "\
Commands:
  s <text>   search (bare 's' clears the query)
  p <n>      go to page n
  n          next page
  b          previous page
  r          print the current view again
  h          show this help
  q          quit";

/// Parse one input line.
///
/// Search text is taken verbatim after the first space, so queries may
/// contain spaces.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Err(CommandError::Empty);
    }

    let trimmed = line.trim_start();
    let (head, rest) = match trimmed.split_once(' ') {
        Some((head, rest)) => (head, rest),
        None => (trimmed, ""),
    };

    match head {
        "s" | "search" => Ok(Command::Search(rest.to_string())),
        "p" | "page" => parse_page(rest.trim()),
        "n" | "next" => Ok(Command::Next),
        "b" | "prev" | "previous" => Ok(Command::Previous),
        "r" | "refresh" => Ok(Command::Reprint),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_page(raw: &str) -> Result<Command, CommandError> {
    match raw.parse::<u64>() {
        Ok(n) if n >= 1 => Ok(Command::GoTo(n - 1)),
        _ => Err(CommandError::InvalidPage(raw.to_string())),
    }
}
