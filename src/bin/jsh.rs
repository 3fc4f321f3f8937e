use std::path::PathBuf;
use std::process;

use docopt::Docopt;
use log::debug;
use nix::unistd::Pid;
use serde_derive::Deserialize;

use jsh::shell::USAGE_ERROR_STATUS;
use jsh::{to_exit_code, Shell};

const LOG_FILE_NAME: &str = ".jsh_log";

const USAGE: &str = "
jsh.

Usage:
    jsh [options]
    jsh (-h | --help)
    jsh --version

Options:
    -h --help       Show this screen.
    --version       Show version.
    -p <prompt>     Text to display as the command prompt.
    --log=<path>    File to write log to, defaults to ~/.jsh_log
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    flag_p: Option<String>,
    flag_version: bool,
    flag_log: Option<String>,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| exit_usage(e));

    init_logger(&args.flag_log);
    debug!("{:?}", args);

    if args.flag_version {
        println!("jsh version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let mut shell = Shell::new(args.flag_p);
    shell.execute_from_stdin()
}

fn exit_usage(e: docopt::Error) -> ! {
    if e.fatal() {
        eprintln!("{}", e);
        process::exit(to_exit_code(USAGE_ERROR_STATUS));
    }

    // --help and --version are handled by docopt itself
    e.exit()
}

fn init_logger(path: &Option<String>) {
    let log_path = path
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(default_log_path);

    let pid = Pid::this();
    let dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug);

    match fern::log_file(&log_path) {
        Ok(log_file) => {
            if dispatch.chain(log_file).apply().is_err() {
                eprintln!("jsh: logger was already installed");
            }
        }
        Err(e) => eprintln!("jsh: unable to open log file {}: {}", log_path.display(), e),
    }
}

fn default_log_path() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(LOG_FILE_NAME)
}
