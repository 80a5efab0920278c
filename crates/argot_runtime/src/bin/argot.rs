//! Argot CLI entry point.

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use argot_grammar::DispatcherConfig;
use argot_runtime::{Console, ConsoleConfig, DemoSource, Outcome, Repl, demo_dispatcher};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    commands: Vec<String>,
    show_help: bool,
    show_version: bool,
    no_banner: bool,
    sequential: bool,
    exhaustive: bool,
    verbosity: u8,
    permission: u8,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--no-banner" => config.no_banner = true,
            "--sequential" => config.sequential = true,
            "--exhaustive" => config.exhaustive = true,
            "-v" | "--verbose" => config.verbosity = config.verbosity.saturating_add(1),
            "-vv" => config.verbosity = config.verbosity.saturating_add(2),
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    return Err("--command requires a value".into());
                }
                config.commands.push(args[i].clone());
            }
            "-p" | "--permission" => {
                i += 1;
                if i >= args.len() {
                    return Err("--permission requires a value".into());
                }
                config.permission = args[i]
                    .parse()
                    .map_err(|_| format!("invalid --permission value: {}", args[i]))?;
            }
            arg => return Err(format!("unknown option: {arg}").into()),
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_env("ARGOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_outcome(outcome: &Outcome) {
    for line in outcome.feedback() {
        println!("{line}");
    }
    for line in outcome.diagnostics() {
        eprintln!("\x1b[31m{line}\x1b[0m");
    }
}

/// Returns `Ok(false)` if any `-c` command failed.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(true);
    }

    if config.show_version {
        println!("argot {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    init_logging(config.verbosity);

    let mut dispatcher_config = DispatcherConfig::default();
    if config.sequential {
        dispatcher_config = dispatcher_config.with_parallel_suggestions(false);
    }
    if config.exhaustive {
        dispatcher_config = dispatcher_config.with_exhaustive_parse(true);
    }

    let console_config = ConsoleConfig::default().with_banner(!config.no_banner);
    let console = Arc::new(Console::with_config(
        demo_dispatcher(dispatcher_config),
        console_config,
    ));
    let source = DemoSource::new("player", config.permission);

    if !config.commands.is_empty() {
        let mut all_succeeded = true;
        for command in &config.commands {
            let outcome = console.execute_line(command, source.clone());
            print_outcome(&outcome);
            all_succeeded &= outcome.is_success();
        }
        return Ok(all_succeeded);
    }

    Repl::new(console, source)?.run()?;
    Ok(true)
}

fn print_help() {
    println!(
        "\x1b[1mArgot\x1b[0m - Command grammar console

\x1b[1mUSAGE:\x1b[0m
    argot [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help               Print help information
    -V, --version            Print version information
    -c, --command CMD        Run CMD and exit (repeatable)
    -p, --permission N       Permission level of the console user (default 0)
    --no-banner              Do not print the welcome banner

\x1b[1mDEBUG OPTIONS:\x1b[0m
    -v, --verbose            More logging on stderr (repeatable)
    --sequential             Collect completions on one thread
    --exhaustive             Try every branch when parsing

    ARGOT_LOG sets the log filter when no -v is given.

\x1b[1mEXAMPLES:\x1b[0m
    argot                            Start the interactive console
    argot -c '/add 1 2'              Run one command
    argot -p 2 -c '/teleport ~1 ~'   Run a restricted command

\x1b[1mCOMMANDS:\x1b[0m
    /echo <message>                  Print the rest of the line
    /add <a> <b>                     Add two integers
    /toggle <flag> [<value>]         Flip or set a flag
    /teleport <x> <y>                Move (permission 2, ~ is relative)
    /say <message>                   Speak a word or a quoted phrase
    /help [<command>]                List usage
    Tab                              Complete at the cursor
    Ctrl+D                           Exit"
    );
}
