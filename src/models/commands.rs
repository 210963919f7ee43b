//! Console command parsing
//!
//! Turns one input line into a [`Command`].

use crate::error::{CacheError, Result};

/// A console command.
///
/// # Syntax
/// - `SET key value...` - value is the rest of the line, inner spaces kept
/// - `GET key`
/// - `DEL key`
/// - `EVICT` - drop the least recently used entry
/// - `LEN`
/// - `STATS`
/// - `QUIT` (alias `EXIT`)
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Del { key: String },
    Evict,
    Len,
    Stats,
    Quit,
}

impl Command {
    /// Parses a line. Verbs are case-insensitive; keys are not.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb.to_ascii_uppercase().as_str() {
            "SET" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| invalid("SET needs a key and a value"))?;
                Ok(Command::Set {
                    key: key.to_string(),
                    value: value.trim_start().to_string(),
                })
            }
            "GET" => Ok(Command::Get {
                key: single_key("GET", rest)?,
            }),
            "DEL" => Ok(Command::Del {
                key: single_key("DEL", rest)?,
            }),
            "EVICT" => no_args("EVICT", rest, Command::Evict),
            "LEN" => no_args("LEN", rest, Command::Len),
            "STATS" => no_args("STATS", rest, Command::Stats),
            "QUIT" | "EXIT" => no_args("QUIT", rest, Command::Quit),
            "" => Err(invalid("empty command")),
            other => Err(invalid(&format!("unknown command '{}'", other))),
        }
    }
}

fn invalid(msg: &str) -> CacheError {
    CacheError::InvalidCommand(msg.to_string())
}

fn single_key(verb: &str, rest: &str) -> Result<String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(key), None) => Ok(key.to_string()),
        _ => Err(invalid(&format!("{} takes exactly one key", verb))),
    }
}

fn no_args(verb: &str, rest: &str, command: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(invalid(&format!("{} takes no arguments", verb)))
    }
}
