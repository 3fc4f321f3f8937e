//! Jsh - Shell Module
//!
//! The Shell owns the job table and the line editor and runs the
//! read-parse-dispatch-reap loop. Every error below startup is local to one
//! command cycle: it is reported, its sentinel code is recorded, and the
//! loop continues. Only the `exit` builtin (or end of input) leaves the
//! loop.

use std::fmt;
use std::process;

use log::info;

use crate::builtins::Builtin;
use crate::editor::Editor;
use crate::execute;
use crate::jobs::JobTable;
use crate::parse::Command;
use crate::util;

const DEFAULT_PROMPT: &str = "jsh> ";

/// Recorded when startup argument validation or a line read fails.
pub const USAGE_ERROR_STATUS: i32 = -1;
/// Recorded when a line cannot be parsed into a command.
pub const PARSE_ERROR_STATUS: i32 = -2;
/// Recorded when process creation fails.
pub const FORK_ERROR_STATUS: i32 = -3;
/// Recorded (by the child, as its exit code) when exec fails.
pub const EXEC_ERROR_STATUS: i32 = -4;

/// Jsh Shell
pub struct Shell {
    editor: Editor,
    jobs: JobTable,
    prompt: String,
    /// Sentinel code of the last failure, 0 if none occurred.
    last_error_status: i32,
}

impl Shell {
    /// Constructs a new Shell to track background jobs, with `prompt`
    /// overriding the default prompt text.
    pub fn new(prompt: Option<String>) -> Shell {
        info!("jsh started up");
        Shell {
            editor: Editor::new(),
            jobs: JobTable::new(),
            prompt: prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            last_error_status: 0,
        }
    }

    /// Runs command cycles from stdin until end of input or `exit`.
    ///
    /// Finished background children are reaped once per iteration, after
    /// the current command's own handling, so a foreground completion
    /// report is never interleaved with background reap reports.
    pub fn execute_from_stdin(&mut self) -> ! {
        loop {
            let line = match self.editor.readline(&self.prompt) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                e => {
                    // no command cycle for a failed read; retry the prompt
                    eprintln!("jsh: failed to read command line");
                    log_if_err!(e, "readline");
                    self.last_error_status = USAGE_ERROR_STATUS;
                    continue;
                }
            };

            self.execute_command_string(&line);

            let temp_result = execute::reap_background(&mut self.jobs);
            log_if_err!(temp_result, "reap_background");
        }

        self.exit()
    }

    /// Runs one command cycle from a line of input.
    pub fn execute_command_string(&mut self, input: &str) {
        let command = match Command::parse(input) {
            Ok(Some(command)) => command,
            Ok(None) => return,
            Err(e) => {
                eprintln!("jsh: could not parse command from line");
                info!("parse error: {}", e);
                self.last_error_status = PARSE_ERROR_STATUS;
                return;
            }
        };
        self.editor.add_history_entry(input);

        match Builtin::from_command(&command) {
            Some(Builtin::Exit) => self.exit(),
            Some(builtin) => builtin.run(&command, &self.jobs),
            None => self.run_external(&command),
        }
    }

    fn run_external(&mut self, command: &Command) {
        let pid = match execute::spawn(command) {
            Ok(pid) => pid,
            Err(e) => {
                eprintln!("jsh: fork failed: {}", e);
                self.last_error_status = FORK_ERROR_STATUS;
                return;
            }
        };

        if command.background {
            self.jobs.insert(pid, &command.program);
        } else {
            match execute::wait_foreground(pid) {
                Ok(status) => println!(">>> [{}] {} {}", pid, command.program, status),
                Err(e) => eprintln!("jsh: failed to wait for {}: {}", pid, e),
            }
        }
    }

    /// Returns `true` if the shell is tracking background jobs.
    pub fn has_background_jobs(&self) -> bool {
        self.jobs.has_jobs()
    }

    /// Exits the shell with the last recorded error status, 0 if no error
    /// occurred since startup.
    pub fn exit(&mut self) -> ! {
        self.jobs.clear();
        info!("jsh has shut down");
        process::exit(util::to_exit_code(self.last_error_status));
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "prompt: {:?}\tlast_error_status: {}\n{:?}",
            self.prompt, self.last_error_status, self.jobs
        )
    }
}
