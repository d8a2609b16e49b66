use clap::Parser;
use yellowstrip::cli::commands::Cli;
use yellowstrip::cli::handlers;
use yellowstrip::io::logging::init_stderr_logging;
use yellowstrip::io::paths::DataPaths;

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let paths = DataPaths::resolve(cli.db.as_deref())?;
    match cli.command {
        // No subcommand → launch TUI
        None => yellowstrip::tui::run(&paths),
        Some(command) => {
            init_stderr_logging();
            handlers::dispatch(command, cli.json, &paths)
        }
    }
}
