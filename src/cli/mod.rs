//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod args;
mod commands;
mod logging;
pub mod output;
mod resources;
mod session;
mod watch;

pub use args::{Args, Command};
pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;

use crate::api::connect;
use crate::config::ConfigLoader;
use anyhow::{Context, Result};

/// Run a parsed command line
pub async fn run(args: Args) -> Result<()> {
    let command = match args.command {
        Command::Config { subcommand } => return handle_config_command(subcommand),
        command => command,
    };

    let config = ConfigLoader::load().context("Failed to load configuration")?;
    ConfigLoader::check(&config)?;
    let format = args.output.unwrap_or(config.output);
    tracing::debug!(
        "Configuration loaded: apiBaseUrl={}, devMode={}",
        config.api_base_url,
        config.dev_mode
    );

    let conn = connect(&config).await?;
    let client = &conn.client;

    match command {
        Command::Login { token, oidc } => session::login(&conn, token, oidc).await,
        Command::Callback { code, state } => session::callback(&conn, &code, &state).await,
        Command::Logout => session::logout(&conn).await,
        Command::Status => {
            session::status(&conn, &config);
            Ok(())
        }
        Command::Clusters { name, addons } => {
            resources::clusters(client, name, addons, format).await
        }
        Command::Clustersets { name } => resources::cluster_sets(client, name, format).await,
        Command::Bindings { namespace, name } => {
            resources::bindings(client, namespace, name, format).await
        }
        Command::Placements {
            placement,
            namespace,
        } => resources::placements(client, placement, namespace, format).await,
        Command::Decisions { namespace, name } => {
            resources::decisions(client, namespace, name, format).await
        }
        Command::Addons { cluster, name } => {
            resources::addons(client, &cluster, name, format).await
        }
        Command::Works { namespace, name } => {
            resources::works(client, &namespace, name, format).await
        }
        Command::Watch => watch::watch(&conn, &config).await,
        Command::Config { .. } => Ok(()),
    }
}
