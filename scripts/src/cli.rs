//! Definitions of CLI arguments and commands for deploy scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{list_accounts, migrate, show_deployments},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_RPC},
    errors::ScriptError,
    tx::client::{create_rpc_provider, RpcProvider},
};

/// Scripts for deploying the Ethereum934 & BismuthCoin contracts
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub priv_key: Option<String>,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC)]
    pub rpc_url: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Run the selected command
    pub async fn run(self) -> Result<(), ScriptError> {
        let Cli {
            priv_key,
            rpc_url,
            command,
        } = self;
        command.run(&rpc_url, priv_key.as_deref()).await
    }
}

/// The possible CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy all the contracts
    Migrate(MigrateArgs),
    /// List the node accounts
    Accounts,
    /// Show the addresses recorded by a previous migration
    ShowDeployments(OutputArgs),
}

impl Command {
    /// Run the command
    pub async fn run(self, rpc_url: &str, priv_key: Option<&str>) -> Result<(), ScriptError> {
        match self {
            Command::Migrate(args) => {
                info!("Deploying contracts...");
                let client = connect(rpc_url, priv_key).await?;
                migrate(args, client).await
            }
            Command::Accounts => {
                let client = connect(rpc_url, priv_key).await?;
                list_accounts(client).await
            }
            Command::ShowDeployments(args) => show_deployments(args),
        }
    }
}

/// Build the RPC client, failing if no private key was given
async fn connect(rpc_url: &str, priv_key: Option<&str>) -> Result<RpcProvider, ScriptError> {
    let priv_key = priv_key.ok_or(ScriptError::ClientInitialization(String::from(
        "no private key given, set --priv-key or PRIVATE_KEY",
    )))?;
    create_rpc_provider(rpc_url, priv_key).await
}

/// Deploy contracts
#[derive(Args)]
pub struct MigrateArgs {
    /// Directory holding the compiled contract artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,
    /// File the deployed addresses are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
}

/// Read deployments
#[derive(Args)]
pub struct OutputArgs {
    /// File the deployed addresses were written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,
}
