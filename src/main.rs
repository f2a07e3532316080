use asgard::cli::dispatcher::Dispatcher;
use asgard::cli::main_types::Cli;
use asgard::storage::config::Config;
use asgard::utils::logging::{init_logging, log_error, log_warning};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Resolve config location
    let location = match Config::resolve_path(cli.config.clone()) {
        Ok(location) => location,
        Err(err) => {
            log_error(&format!("Error locating config: {}", err));
            std::process::exit(1);
        }
    };

    if !location.isolated_env {
        log_warning("No virtual environment detected (VIRTUAL_ENV is unset)");
    }

    if cli.verbose {
        println!("Verbose mode is enabled");
        println!("Using config file: {}", location.path.display());
    }

    let dispatcher = Dispatcher::new(location, cli.verbose, cli.helm_bin, cli.process_timeout);

    // Execute the command
    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} Error: {}", e.severity().emoji(), e.display_friendly());
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(e.exit_code());
    }
}
