//! Jsh line parser.
//!
//! Turns one raw input line into a [`Command`], or classifies it as blank.
//! The scan is a single forward pass: every byte must be ASCII printable or
//! whitespace, and the first `&` unconditionally ends the command and marks
//! it for background execution. Because the two checks share one pass, an
//! invalid byte after a `&` is never seen; one before it still fails the
//! whole line.

use crate::errors::{Error, Result};

/// A parsed command line: a program name and its full argument vector.
///
/// `argv[0]` is always the program name, so `argv` holds at least one
/// element. The vector maps directly onto the NUL-terminated argv handed to
/// `execvp` when the command is spawned.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// The program to execute.
    pub program: String,
    /// The full argument vector, `program` included as the first element.
    pub argv: Vec<String>,
    /// Run the command in the background, defaults to false.
    pub background: bool,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a line with no tokens before end-of-line or
    /// the `&` marker (including a lone `&`: background execution requires
    /// at least one argument). Returns `Err` if the line contains a byte
    /// that is neither printable nor whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsh::parse::Command;
    ///
    /// let command = Command::parse("sleep 5 &").unwrap().unwrap();
    /// assert_eq!(command.program, "sleep");
    /// assert_eq!(command.argv, vec!["sleep", "5"]);
    /// assert!(command.background);
    /// ```
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut background = false;
        let mut end = line.len();
        for (i, c) in line.char_indices() {
            if c == '&' {
                background = true;
                end = i;
                break;
            }
            if !c.is_ascii_graphic() && !c.is_ascii_whitespace() {
                return Err(Error::syntax(line));
            }
        }

        let argv: Vec<String> = line[..end].split_whitespace().map(String::from).collect();
        if argv.is_empty() {
            return Ok(None);
        }

        let program = argv[0].clone();
        Ok(Some(Command {
            program,
            argv,
            background,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<Command> {
        Command::parse(line).unwrap()
    }

    #[test]
    fn empty_line_is_blank() {
        assert!(parse("").is_none());
        assert!(parse("\n").is_none());
        assert!(parse("   \t  \n").is_none());
    }

    #[test]
    fn marker_without_tokens_is_blank() {
        assert!(parse("&").is_none());
        assert!(parse("   & echo ignored\n").is_none());
    }

    #[test]
    fn control_character_fails() {
        assert!(Command::parse("echo \x07bell\n").is_err());
        assert!(Command::parse("\x1b[A\n").is_err());
    }

    #[test]
    fn non_ascii_fails() {
        assert!(Command::parse("echo caf\u{e9}\n").is_err());
    }

    #[test]
    fn foreground_tokens_in_order() {
        let command = parse("echo   a   b\n").unwrap();
        assert_eq!(command.program, "echo");
        assert_eq!(command.argv, vec!["echo", "a", "b"]);
        assert!(!command.background);
    }

    #[test]
    fn single_token() {
        let command = parse("pwd\n").unwrap();
        assert_eq!(command.program, "pwd");
        assert_eq!(command.argv, vec!["pwd"]);
    }

    #[test]
    fn background_marker_ends_command() {
        let command = parse("sleep 5 & echo ignored\n").unwrap();
        assert_eq!(command.argv, vec!["sleep", "5"]);
        assert!(command.background);
    }

    #[test]
    fn background_marker_splits_token() {
        let command = parse("sleep 5&\n").unwrap();
        assert_eq!(command.argv, vec!["sleep", "5"]);
        assert!(command.background);
    }

    #[test]
    fn invalid_byte_after_marker_goes_unnoticed() {
        // The validity scan stops at the marker; this is deliberate.
        let command = parse("sleep 5 & \x07\n").unwrap();
        assert_eq!(command.argv, vec!["sleep", "5"]);
        assert!(command.background);
    }

    #[test]
    fn invalid_byte_before_marker_fails() {
        assert!(Command::parse("sleep \x07 5 &\n").is_err());
    }
}
