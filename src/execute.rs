//! External command execution.
//!
//! Spawning is fork + execvp: the child announces itself, replaces its
//! image with the requested program, and terminates itself if the exec
//! fails. It never returns into shell logic. The parent either blocks on
//! the one child it spawned (foreground) or registers it in the job table
//! and harvests finished background children later without blocking.

use std::ffi::CString;
use std::fmt;
use std::process;

use failure::{Fail, ResultExt};
use log::debug;
use nix::errno::Errno;
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::{self, ForkResult, Pid};

use crate::errors::{ErrorKind, Result};
use crate::jobs::JobTable;
use crate::parse::Command;
use crate::shell::EXEC_ERROR_STATUS;
use crate::util;

/// The reportable ways a child can change state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChildStatus {
    Exited(i32),
    Killed(i32),
    Stopped(i32),
    Continued(i32),
}

impl ChildStatus {
    fn from_wait(status: &WaitStatus) -> Option<(Pid, ChildStatus)> {
        match *status {
            WaitStatus::Exited(pid, code) => Some((pid, ChildStatus::Exited(i32::from(code)))),
            WaitStatus::Signaled(pid, signal, ..) => {
                Some((pid, ChildStatus::Killed(signal as i32)))
            }
            WaitStatus::Stopped(pid, signal) => Some((pid, ChildStatus::Stopped(signal as i32))),
            // nix does not surface the raw status word, so continued
            // children are reported with the SIGCONT signal number.
            WaitStatus::Continued(pid) => {
                Some((pid, ChildStatus::Continued(nix::libc::SIGCONT as i32)))
            }
            _ => None,
        }
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ChildStatus::Exited(code) => write!(f, "Exited {}", code),
            ChildStatus::Killed(signal) => write!(f, "Killed {}", signal),
            ChildStatus::Stopped(signal) => write!(f, "Stopped {}", signal),
            ChildStatus::Continued(signal) => write!(f, "Continued {}", signal),
        }
    }
}

/// Forks and execs `command`, returning the child's pid to the parent.
///
/// The child prints the spawn announcement with its own pid, then replaces
/// its image with the program. If the exec fails the child reports the
/// failure and exits with the exec-failure code; it does not continue
/// running as a copy of the shell.
pub fn spawn(command: &Command) -> Result<Pid> {
    let program = CString::new(command.program.as_str()).context(ErrorKind::Io)?;
    let argv = command
        .argv
        .iter()
        .map(|arg| CString::new(arg.as_str()))
        .collect::<::std::result::Result<Vec<_>, _>>()
        .context(ErrorKind::Io)?;

    match unistd::fork().context(ErrorKind::Fork)? {
        ForkResult::Parent { child } => {
            debug!("forked child {} for {}", child, command.program);
            Ok(child)
        }
        ForkResult::Child => {
            println!(">>> [{}] {}", unistd::getpid(), command.program);
            if let Err(e) = unistd::execvp(&program, &argv) {
                eprintln!("Command Not Found: {}", e);
            }
            process::exit(util::to_exit_code(EXEC_ERROR_STATUS));
        }
    }
}

/// Blocks until `pid` changes state and classifies the change.
pub fn wait_foreground(pid: Pid) -> Result<ChildStatus> {
    let flags = WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
    loop {
        let wait_status = wait::waitpid(pid, Some(flags)).context(ErrorKind::Nix)?;
        if let Some((_, status)) = ChildStatus::from_wait(&wait_status) {
            return Ok(status);
        }
    }
}

/// Harvests every child with a status change available, without blocking.
///
/// Each reaped pid found in the job table has its status reported and its
/// entry removed. A reaped child with no table entry (e.g. a foreground
/// child that stopped and later exited) is silently ignored.
pub fn reap_background(jobs: &mut JobTable) -> Result<()> {
    let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
    loop {
        match wait::waitpid(None, Some(flags)) {
            Ok(WaitStatus::StillAlive) | Err(nix::Error::Sys(Errno::ECHILD)) => break,
            Ok(wait_status) => {
                if let Some((pid, status)) = ChildStatus::from_wait(&wait_status) {
                    if let Some(job) = jobs.remove(pid) {
                        println!(">>> [{}] {} {}", pid, job.name(), status);
                    } else {
                        debug!("reaped untracked child {}: {}", pid, status);
                    }
                }
            }
            Err(e) => return Err(e.context(ErrorKind::Nix).into()),
        }
    }

    Ok(())
}
