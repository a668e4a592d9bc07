use clap::Parser;
use sp_listings::AppError;
use sp_listings::cli::dispatcher::Dispatcher;
use sp_listings::cli::main_types::Cli;
use sp_listings::storage::config::Config;
use sp_listings::utils::logging::init_logging;
use std::path::PathBuf;

fn report(error: &AppError) {
    eprintln!("{} Error: {}", error.severity().emoji(), error);

    if let Some(violations) = error.violations() {
        for violation in violations {
            eprintln!("  - {}", violation);
        }
    }

    if let Some(hint) = error.troubleshooting_hint() {
        eprintln!("Hint: {}", hint);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            report(&AppError::from(err));
            std::process::exit(1);
        }
    };

    let mut dispatcher = Dispatcher::new(config, config_path, cli.profile, cli.access_token);

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        report(&e);
        std::process::exit(1);
    }
}
