//! Implementation of the CLI commands

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::{
    artifacts::{Artifact, FsArtifactResolver},
    cli::{MigrateArgs, OutputArgs},
    constants::{BLOCK_HEIGHT_ACCOUNT_INDEX, BLOCK_HEIGHT_CONTRACT, TOKEN_CONTRACT},
    deploy::{AccountProvider, Deployer, Deployment, RpcDeployer},
    errors::ScriptError,
    migration::{self, DeployDirective},
    output_writer::{read_output_file, write_deployment, OutputKeys},
    tx::client::RpcProvider,
};

/// Deploy the Ethereum934 and BismuthCoin contracts
pub async fn migrate(args: MigrateArgs, client: RpcProvider) -> Result<(), ScriptError> {
    let resolver = FsArtifactResolver::new(&args.artifacts);
    let deployer = RpcDeployer::new(client);
    let recorder = RecordingDeployer {
        inner: deployer.clone(),
        output: args.output.clone(),
    };

    info!("Running migration...");
    let deployments = migration::run(&deployer, &resolver, &recorder).await?;
    info!(
        "Deployed {} contracts, addresses written to {}",
        deployments.len(),
        args.output.display()
    );

    Ok(())
}

/// Print the node accounts, flagging the one the block height contract receives
pub async fn list_accounts(client: RpcProvider) -> Result<(), ScriptError> {
    let accounts = RpcDeployer::new(client).accounts().await?;
    if accounts.len() <= BLOCK_HEIGHT_ACCOUNT_INDEX {
        warn!(
            "Only {} accounts, migrate needs at least {}",
            accounts.len(),
            BLOCK_HEIGHT_ACCOUNT_INDEX + 1
        );
    }

    for (index, account) in accounts.iter().enumerate() {
        let marker = if index == BLOCK_HEIGHT_ACCOUNT_INDEX {
            format!(" <- {BLOCK_HEIGHT_CONTRACT}")
        } else {
            String::new()
        };
        println!("{index:>3}: {account}{marker}");
    }

    Ok(())
}

/// Print the recorded address of every migrated contract
pub fn show_deployments(args: OutputArgs) -> Result<(), ScriptError> {
    for name in [BLOCK_HEIGHT_CONTRACT, TOKEN_CONTRACT] {
        match read_output_file(&args.output, OutputKeys::Deployment { key: name })? {
            Some(address) => println!("{name}: {address}"),
            None => println!("{name}: not deployed"),
        }
    }

    Ok(())
}

/// Deployer writing each deployment to the output file as soon as it lands
struct RecordingDeployer<D> {
    /// The deployer doing the actual work
    inner: D,
    /// The output file
    output: PathBuf,
}

impl<D: Deployer> Deployer for RecordingDeployer<D> {
    async fn deploy(
        &self,
        artifact: &Artifact,
        directive: &DeployDirective,
    ) -> Result<Deployment, ScriptError> {
        let deployment = self.inner.deploy(artifact, directive).await?;
        record(&self.output, &deployment)?;
        Ok(deployment)
    }
}

/// Write a deployment to the output file
fn record(output: &Path, deployment: &Deployment) -> Result<(), ScriptError> {
    write_deployment(output, deployment)?;
    info!(
        "Recorded {} at {} in {}",
        deployment.name,
        deployment.address,
        output.display()
    );
    Ok(())
}
