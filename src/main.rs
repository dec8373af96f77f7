//! NovelKeep CLI entry point.

use clap::Parser;
use novelkeep::cli::commands::import::ImportArgs;
use novelkeep::cli::{Cli, Commands, commands};
use novelkeep::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Init { force } => commands::init::execute(*force, cli.db.as_ref(), cli.json),
        Commands::Export { file } => commands::export::execute(file, cli.db.as_ref(), cli.json),
        Commands::Inspect { file } => commands::inspect::execute(file, cli.json),
        Commands::Import {
            file,
            replace,
            skip_library,
            skip_bookmarks,
            skip_history,
            skip_stats,
            skip_settings,
        } => commands::import::execute(
            file,
            ImportArgs {
                replace: *replace,
                skip_library: *skip_library,
                skip_bookmarks: *skip_bookmarks,
                skip_history: *skip_history,
                skip_stats: *skip_stats,
                skip_settings: *skip_settings,
            },
            cli.db.as_ref(),
            cli.json,
        ),
    }
}
