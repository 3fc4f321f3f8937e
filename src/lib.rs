//! Jsh - Job Shell
//!
//! A line-oriented command interpreter. Each input line is parsed into a
//! command and argument vector, dispatched to a builtin or spawned as an
//! external process, and tracked either synchronously (foreground) or in a
//! background job table that is reaped without blocking on every loop
//! iteration.

/// Logs an error, e.g. `log_if_err!(result, "reap_background")`.
macro_rules! log_if_err {
    ($result:expr, $($arg:tt)*) => {
        if let Err(ref e) = $result {
            log::error!("{}: {}", format_args!($($arg)*), e);
        }
    };
}

pub mod builtins;
mod editor;
pub mod errors;
pub mod execute;
pub mod jobs;
pub mod parse;
pub mod shell;
mod util;

pub use crate::shell::Shell;
pub use crate::util::to_exit_code;
