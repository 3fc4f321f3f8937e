use failure::Fail;
use rustyline::{self, error::ReadlineError, Config};

use crate::errors::{ErrorKind, Result};

const HISTORY_CAPACITY: usize = 100;

/// Thin wrapper over rustyline: read one line, keep in-memory history.
pub struct Editor {
    internal: rustyline::Editor<()>,
}

impl Editor {
    pub fn new() -> Editor {
        let config = Config::builder()
            .max_history_size(HISTORY_CAPACITY)
            .history_ignore_space(true)
            .build();

        Editor {
            internal: rustyline::Editor::with_config(config),
        }
    }

    /// Reads the next input line.
    ///
    /// Returns `None` at end of input. Ctrl-C is treated as an empty line
    /// rather than a reason to leave the shell.
    pub fn readline(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.internal.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(e.context(ErrorKind::Readline).into()),
        }
    }

    pub fn add_history_entry(&mut self, line: &str) {
        self.internal.add_history_entry(line);
    }
}
