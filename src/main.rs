use atrium::error::ShellError;
use atrium::flags::Flags;
use atrium::shell::Shell;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("atrium: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!(
            "Shell Version: {}.{}",
            env!("CARGO_PKG_VERSION_MAJOR"),
            env!("CARGO_PKG_VERSION_MINOR")
        );
        return Ok(());
    }

    init_logging(&flags);

    let mut shell = Shell::new(flags)?;
    shell.run()
}

fn init_logging(flags: &Flags) {
    let level = if flags.is_set("quiet") {
        LevelFilter::Off
    } else if flags.is_set("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: Couldn't initialize logging: {}", e);
    }
}
