//! Jsh builtins.
//!
//! Commands handled entirely within the shell process. Lookup is an exact,
//! case-sensitive match on the program name; anything unrecognized is run
//! externally. A failed builtin reports its error and nothing more: the
//! shell never aborts over a bad `cd`.

use std::env;
use std::path::PathBuf;

use nix::unistd;

use crate::jobs::JobTable;
use crate::parse::Command;

/// The fixed set of builtin commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Builtin {
    Exit,
    Pid,
    Ppid,
    Cd,
    Pwd,
    Jobs,
}

impl Builtin {
    /// Matches `command` against the builtin set. Returns `None` when the
    /// command should be run externally.
    pub fn from_command(command: &Command) -> Option<Builtin> {
        match command.program.as_str() {
            "exit" => Some(Builtin::Exit),
            "pid" => Some(Builtin::Pid),
            "ppid" => Some(Builtin::Ppid),
            // A parse where the program name and argv[0] disagree is not
            // trusted to change directory; it falls through to external
            // execution instead.
            "cd" if command.argv.first().map(String::as_str) == Some("cd") => Some(Builtin::Cd),
            "pwd" => Some(Builtin::Pwd),
            "jobs" => Some(Builtin::Jobs),
            _ => None,
        }
    }

    /// Runs the builtin. `Exit` is a no-op here; the caller terminates the
    /// main loop when it sees it.
    pub fn run(self, command: &Command, jobs: &JobTable) {
        match self {
            Builtin::Exit => {}
            Builtin::Pid => println!("Shell pid: {}", unistd::getpid()),
            Builtin::Ppid => println!("Shell's Parent pid: {}", unistd::getppid()),
            Builtin::Cd => run_cd(command),
            Builtin::Pwd => run_pwd(),
            Builtin::Jobs => run_jobs(jobs),
        }
    }
}

fn run_cd(command: &Command) {
    let target = match command.argv.get(1) {
        Some(dir) => PathBuf::from(dir),
        None => match env::var("HOME") {
            Ok(home) => PathBuf::from(home),
            Err(_) => {
                eprintln!("cd: HOME not set");
                return;
            }
        },
    };

    if let Err(e) = env::set_current_dir(&target) {
        eprintln!("cd: {}: {}", target.display(), e);
    }
}

fn run_pwd() {
    match env::current_dir() {
        Ok(cwd) => println!("{}", cwd.display()),
        Err(e) => eprintln!("pwd: {}", e),
    }
}

fn run_jobs(jobs: &JobTable) {
    for job in jobs.iter() {
        println!("[{}] {}", job.pid(), job.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(program: &str, argv: &[&str]) -> Command {
        Command {
            program: program.to_string(),
            argv: argv.iter().map(|s| s.to_string()).collect(),
            background: false,
        }
    }

    fn lookup(line: &str) -> Option<Builtin> {
        let command = Command::parse(line).unwrap().unwrap();
        Builtin::from_command(&command)
    }

    #[test]
    fn recognizes_builtin_names() {
        assert_eq!(lookup("exit"), Some(Builtin::Exit));
        assert_eq!(lookup("pid"), Some(Builtin::Pid));
        assert_eq!(lookup("ppid"), Some(Builtin::Ppid));
        assert_eq!(lookup("cd /tmp"), Some(Builtin::Cd));
        assert_eq!(lookup("pwd"), Some(Builtin::Pwd));
        assert_eq!(lookup("jobs"), Some(Builtin::Jobs));
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(lookup("Exit"), None);
        assert_eq!(lookup("PWD"), None);
        assert_eq!(lookup("exi"), None);
        assert_eq!(lookup("exitt"), None);
        assert_eq!(lookup("ls"), None);
    }

    #[test]
    fn cd_requires_matching_argv() {
        let mismatched = command("cd", &["notcd", "/tmp"]);
        assert_eq!(Builtin::from_command(&mismatched), None);

        let matched = command("cd", &["cd", "/tmp"]);
        assert_eq!(Builtin::from_command(&matched), Some(Builtin::Cd));
    }
}
