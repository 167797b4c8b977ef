//! Kinship CLI - Command-line viewer for a family tree.

use clap::Parser;
use kinship_cli::commands;
use kinship_cli::config::Profile;
use kinship_cli::{Cli, Command, Config, Formatter};
use kinship_sdk::KinshipClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `KINSHIP_LOG` sets the filter, `--verbose` forces debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("KINSHIP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> kinship_cli::Result<()> {
    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &config_path, &formatter).await?;
        }

        // Derived views over the loaded collection
        Command::People(args) => {
            let session = commands::load_session(active_profile(&config)?, false).await?;
            commands::execute_people(args, session.tree(), &formatter).await?;
        }
        Command::Relatives(args) => {
            let session = commands::load_session(active_profile(&config)?, false).await?;
            commands::execute_relatives(args, session.tree(), &formatter).await?;
        }
        Command::Stats(args) => {
            commands::execute_stats(args, active_profile(&config)?, &formatter).await?;
        }
        Command::Timeline(args) => {
            let session = commands::load_session(active_profile(&config)?, true).await?;
            commands::execute_timeline(args, &session, &formatter).await?;
        }
        Command::Decade(args) => {
            let session = commands::load_session(active_profile(&config)?, true).await?;
            commands::execute_decade(args, &session, &formatter).await?;
        }

        // Gateway operations
        Command::Show(args) => {
            let client = gateway(&config)?;
            commands::execute_show(args, &client, &formatter).await?;
        }
        Command::Health => {
            let client = gateway(&config)?;
            commands::execute_health(&client, &formatter).await?;
        }
        Command::Favorite(args) => {
            let client = gateway(&config)?;
            commands::execute_favorite(args, &client, &formatter).await?;
        }
        Command::Flag(args) => {
            let client = gateway(&config)?;
            commands::execute_flag(args, &client, &formatter).await?;
        }
        Command::Immigrant(args) => {
            let client = gateway(&config)?;
            commands::execute_immigrant(args, &client, &formatter).await?;
        }
        Command::Delete(args) => {
            let client = gateway(&config)?;
            commands::execute_delete(args, &client, &formatter).await?;
        }
        Command::Marriage(args) => {
            let client = gateway(&config)?;
            commands::execute_marriage(args, &client, &formatter).await?;
        }
    }

    Ok(())
}

fn active_profile(config: &Config) -> kinship_cli::Result<&Profile> {
    let profile = config.get_active_profile()?;
    tracing::debug!("Using profile '{}' ({})", config.active_profile, profile.api_url);
    Ok(profile)
}

fn gateway(config: &Config) -> kinship_cli::Result<KinshipClient> {
    commands::client_for(active_profile(config)?)
}
