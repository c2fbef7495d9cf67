use approval_inbox::cli::commands::Cli;
use approval_inbox::cli::handlers;
use approval_inbox::io::config_io::process_env;
use approval_inbox::io::logging;
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    // Logs go to a file so they never land on the alternate screen
    let data_dir = logging::data_dir(&process_env);
    if let Err(e) = logging::init_file_logging(&data_dir) {
        eprintln!("warning: could not open log file: {}", e);
    }

    let result = match cli.command {
        // No subcommand → launch TUI
        None => approval_inbox::tui::run(cli.config.as_deref(), data_dir),
        Some(_) => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
