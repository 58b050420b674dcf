//! Command-line arguments

use super::commands::ConfigSubcommand;
use crate::config::OutputFormat;
use clap::{Parser, Subcommand};

/// Command-line client for the Open Cluster Management dashboard API
#[derive(Parser, Debug)]
#[command(name = "ocmdash", version)]
#[command(
    about = "Observe Open Cluster Management resources through the dashboard API",
    long_about = None
)]
pub struct Args {
    /// Enable debug logging to a temporary file
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Output format (defaults to the configured `output`)
    #[arg(long, short = 'o', global = true, value_enum)]
    pub output: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with a bearer token or through OIDC
    Login {
        /// Bearer token, with or without the `Bearer ` prefix
        #[arg(long, conflicts_with = "oidc")]
        token: Option<String>,
        /// Print the identity provider sign-in URL
        #[arg(long)]
        oidc: bool,
    },
    /// Complete an OIDC sign-in with the values from the callback URL
    Callback {
        #[arg(long)]
        code: String,
        #[arg(long)]
        state: String,
    },
    /// Forget the stored credentials
    Logout,
    /// Show the authentication mode and API endpoint
    Status,
    /// List clusters or show one cluster
    #[command(alias = "mcl")]
    Clusters {
        name: Option<String>,
        /// Include addon counts
        #[arg(long)]
        addons: bool,
    },
    /// List cluster sets or show one with its members and bindings
    #[command(alias = "clusterset")]
    Clustersets { name: Option<String> },
    /// List cluster set bindings
    Bindings {
        #[arg(long, short = 'n')]
        namespace: Option<String>,
        name: Option<String>,
    },
    /// List placements or show one (`namespace/name`) with its decisions
    #[command(alias = "pl")]
    Placements {
        placement: Option<String>,
        #[arg(long, short = 'n')]
        namespace: Option<String>,
    },
    /// List placement decisions
    #[command(alias = "pd")]
    Decisions {
        #[arg(long, short = 'n')]
        namespace: Option<String>,
        name: Option<String>,
    },
    /// List the addons of a cluster
    Addons { cluster: String, name: Option<String> },
    /// List manifest works in a namespace
    #[command(alias = "mw")]
    Works { namespace: String, name: Option<String> },
    /// Follow cluster changes until interrupted
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_placement_detail() {
        let args = Args::parse_from(["ocmdash", "-o", "yaml", "placements", "p1", "-n", "ns1"]);
        assert_eq!(args.output, Some(OutputFormat::Yaml));
        match args.command {
            Command::Placements {
                placement,
                namespace,
            } => {
                assert_eq!(placement.as_deref(), Some("p1"));
                assert_eq!(namespace.as_deref(), Some("ns1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_login_token_conflicts_with_oidc() {
        assert!(Args::try_parse_from(["ocmdash", "login", "--token", "t", "--oidc"]).is_err());
    }
}
