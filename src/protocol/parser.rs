//! Line parser
//!
//! Splits a raw input line into a command token and its argument string.

/// A non-empty input line split into command and arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Command token, normalised to uppercase
    pub command: String,

    /// Everything after the command token, leading whitespace removed
    pub args: &'a str,
}

/// Parse one input line
///
/// Returns `None` for a line that is empty after trimming; the caller
/// should ignore it rather than report an error.
pub fn parse(line: &str) -> Option<ParsedLine<'_>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (command, args) = match line.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim_start()),
        None => (line, ""),
    };

    Some(ParsedLine {
        command: command.to_ascii_uppercase(),
        args,
    })
}
