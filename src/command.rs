use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sort::SortKey;

/// Represents all possible user commands that can be executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    // Global commands
    NextFocus,
    Quit,

    // Search box commands
    FocusInput,
    TypeChar(char),
    Backspace,
    ClearQuery,
    Submit,

    // Results table commands
    SelectUp,
    SelectDown,
    ToggleExpand,
    ToggleRow(usize),
    SortBy(SortKey),
    Visit,
    OpenDownload(usize),

    // Multi-step commands for testing
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "next_focus" | "tab" => return Ok(Command::NextFocus),
            "quit" | "q" => return Ok(Command::Quit),

            "focus_input" | "/" => return Ok(Command::FocusInput),
            "backspace" => return Ok(Command::Backspace),
            "clear_query" | "clear" => return Ok(Command::ClearQuery),
            "submit" | "search" | "enter" => return Ok(Command::Submit),

            "select_up" | "up" => return Ok(Command::SelectUp),
            "select_down" | "down" => return Ok(Command::SelectDown),
            "toggle_expand" | "expand" => return Ok(Command::ToggleExpand),
            "visit" | "o" => return Ok(Command::Visit),
            _ => {}
        }

        // Character input keeps its case
        if let Some(char_str) = s.strip_prefix("type:") {
            let mut chars = char_str.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(Command::TypeChar(ch)),
                _ => Err(format!("Expected exactly one character in '{}'", s)),
            };
        }

        if let Some(field) = s.strip_prefix("sort:") {
            return SortKey::from_field_name(field)
                .map(Command::SortBy)
                .ok_or_else(|| format!("Unknown sort field: {}", field));
        }

        if let Some(index) = s.strip_prefix("row:") {
            return index
                .parse()
                .map(Command::ToggleRow)
                .map_err(|e| format!("Invalid row index '{}': {}", index, e));
        }

        if let Some(number) = s.strip_prefix("download:") {
            return match number.parse() {
                Ok(0) => Err("Download numbers start at 1".to_string()),
                Ok(n) => Ok(Command::OpenDownload(n)),
                Err(e) => Err(format!("Invalid download number '{}': {}", number, e)),
            };
        }

        if s.starts_with("sequence:[") && s.ends_with(']') {
            // Parse sequence: sequence:[cmd1,cmd2,cmd3]
            let inner = &s["sequence:[".len()..s.len() - 1];
            if inner.is_empty() {
                return Ok(Command::Sequence(vec![]));
            }

            let mut commands = Vec::new();
            for cmd_str in split_sequence(inner) {
                match Command::from_string(cmd_str) {
                    Ok(cmd) => commands.push(cmd),
                    Err(e) => {
                        return Err(format!("Invalid command in sequence '{}': {}", cmd_str, e))
                    }
                }
            }

            return Ok(Command::Sequence(commands));
        }

        Err(format!("Unknown command: {}", s))
    }
}

/// Split a sequence body on commas. The character after `type:` is taken
/// literally, so `type:,` and `type: ` survive.
fn split_sequence(inner: &str) -> Vec<&str> {
    const TYPE_PREFIX: &str = "type:";

    let mut parts = Vec::new();
    let mut rest = inner;
    loop {
        rest = rest.trim_start();

        let literal = rest
            .strip_prefix(TYPE_PREFIX)
            .and_then(|arg| arg.chars().next())
            .map(|ch| TYPE_PREFIX.len() + ch.len_utf8());

        let (part, end) = match literal {
            Some(literal_end) => {
                let end = rest[literal_end..]
                    .find(',')
                    .map_or(rest.len(), |i| literal_end + i);
                let trailing = rest[literal_end..end].trim_end().len();
                (&rest[..literal_end + trailing], end)
            }
            None => {
                let end = rest.find(',').unwrap_or(rest.len());
                (rest[..end].trim_end(), end)
            }
        };
        parts.push(part);

        if end >= rest.len() {
            break;
        }
        rest = &rest[end + 1..];
    }
    parts
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::NextFocus => write!(f, "next_focus"),
            Command::Quit => write!(f, "quit"),

            Command::FocusInput => write!(f, "focus_input"),
            Command::TypeChar(ch) => write!(f, "type:{}", ch),
            Command::Backspace => write!(f, "backspace"),
            Command::ClearQuery => write!(f, "clear_query"),
            Command::Submit => write!(f, "submit"),

            Command::SelectUp => write!(f, "select_up"),
            Command::SelectDown => write!(f, "select_down"),
            Command::ToggleExpand => write!(f, "toggle_expand"),
            Command::ToggleRow(index) => write!(f, "row:{}", index),
            Command::SortBy(key) => write!(f, "sort:{}", key.field_name()),
            Command::Visit => write!(f, "visit"),
            Command::OpenDownload(n) => write!(f, "download:{}", n),

            Command::Sequence(commands) => {
                let inner: Vec<String> = commands.iter().map(|c| c.to_string()).collect();
                write!(f, "sequence:[{}]", inner.join(","))
            }
        }
    }
}
