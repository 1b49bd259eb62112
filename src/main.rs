use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod aggregate;
mod build;
mod command;
mod config;
mod core;
mod deploy;
mod dns;
mod error;

use command::ProcessRunner;
use config::Config;
use crate::core::target::TargetKind;
use error::Error;

#[derive(Parser)]
#[command(name = "site-deploy")]
#[command(about = "Build the static site and publish it, or reconcile its DNS", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy to every enabled target and print a summary
    All,

    /// Build and deploy to a single provider
    Deploy {
        #[arg(value_enum)]
        target: TargetKind,
    },

    /// Reconcile DNS state with the declared configuration
    Dns {
        #[command(subcommand)]
        command: DnsCommand,
    },
}

#[derive(Subcommand)]
enum DnsCommand {
    /// Create or update the declared Cloudflare DNS records
    Cloudflare,
    /// Point the Spaceship domain at the configured nameservers
    Spaceship,
}

async fn run(command: Commands, config: &Config) -> Result<bool, Error> {
    let runner = ProcessRunner;
    match command {
        Commands::All => {
            let summary = aggregate::deploy_all(config, &runner).await?;
            Ok(summary.is_success())
        }
        Commands::Deploy { target } => {
            let deployer = deploy::deployer_for(target, config);
            deploy::run(config, &runner, deployer.as_ref()).await?;
            Ok(true)
        }
        Commands::Dns {
            command: DnsCommand::Cloudflare,
        } => {
            let zones = dns::load_zones(&config.cloudflare)?;
            let report = dns::cloudflare::sync_records(&config.cloudflare, &zones).await?;
            Ok(report.is_complete())
        }
        Commands::Dns {
            command: DnsCommand::Spaceship,
        } => {
            let action = dns::spaceship::sync_nameservers(&config.spaceship).await?;
            info!("Nameservers: {action:?}");
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine, the environment may already be populated
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env();
    match run(cli.command, &config).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["site-deploy", "deploy", "github-pages"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Deploy {
                target: TargetKind::GithubPages
            }
        ));

        let cli = Cli::try_parse_from(["site-deploy", "-v", "dns", "spaceship"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Dns {
                command: DnsCommand::Spaceship
            }
        ));

        let cli = Cli::try_parse_from(["site-deploy", "all"]).unwrap();
        assert!(matches!(cli.command, Commands::All));

        assert!(Cli::try_parse_from(["site-deploy", "deploy", "geocities"]).is_err());
    }
}
