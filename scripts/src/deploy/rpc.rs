//! Deployment through a signing JSON-RPC provider

use alloy::{
    network::TransactionBuilder,
    primitives::Address,
    providers::{Provider, WalletProvider},
    rpc::types::eth::TransactionRequest,
};
use tracing::{info, warn};

use crate::{
    artifacts::Artifact,
    deploy::{predict_contract_address, AccountProvider, Deployer, Deployment},
    errors::ScriptError,
    migration::DeployDirective,
    tx::client::RpcProvider,
};

/// Deploys contracts through a signing RPC provider
#[derive(Clone)]
pub struct RpcDeployer {
    /// The provider, with the deployer wallet attached
    client: RpcProvider,
}

impl RpcDeployer {
    /// Wrap the given client
    pub fn new(client: RpcProvider) -> Self {
        Self { client }
    }
}

impl AccountProvider for RpcDeployer {
    async fn accounts(&self) -> Result<Vec<Address>, ScriptError> {
        self.client
            .get_accounts()
            .await
            .map_err(|e| ScriptError::AccountFetching(e.to_string()))
    }
}

impl Deployer for RpcDeployer {
    async fn deploy(
        &self,
        artifact: &Artifact,
        directive: &DeployDirective,
    ) -> Result<Deployment, ScriptError> {
        // Predict the contract address
        let sender = self.client.default_signer_address();
        let nonce = self
            .client
            .get_transaction_count(sender)
            .await
            .map_err(|e| ScriptError::NonceFetching(e.to_string()))?;
        let predicted = predict_contract_address(sender, nonce);
        info!("Deploying {} to {}", artifact.name, predicted);

        // Send it
        let pending_tx = self
            .client
            .send_transaction(creation_request(sender, artifact, directive))
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        info!("Pending deploy transaction... {}", pending_tx.tx_hash());

        // Wait for the transaction to be included.
        let receipt = pending_tx
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        let address = deployed_address(
            &artifact.name,
            receipt.status(),
            receipt.contract_address,
            predicted,
        )?;
        info!(
            "{} deployed at {} on block {:?}",
            artifact.name, address, receipt.block_number
        );

        Ok(Deployment {
            name: artifact.name.clone(),
            address,
            tx_hash: receipt.transaction_hash,
        })
    }
}

/// Build the creation transaction of `artifact`, sent by `sender`
fn creation_request(
    sender: Address,
    artifact: &Artifact,
    directive: &DeployDirective,
) -> TransactionRequest {
    let tx_request = TransactionRequest::default()
        .with_from(sender)
        .with_deploy_code(artifact.deploy_code(&directive.args));

    match directive.value {
        Some(value) => tx_request.with_value(value),
        None => tx_request,
    }
}

/// Address a contract landed at, given its creation receipt
///
/// Nodes omitting `contractAddress` get the `predicted` one.
fn deployed_address(
    name: &str,
    succeeded: bool,
    contract_address: Option<Address>,
    predicted: Address,
) -> Result<Address, ScriptError> {
    if !succeeded {
        return Err(ScriptError::ContractDeployment(format!(
            "{} creation reverted",
            name
        )));
    }

    let address = contract_address.unwrap_or(predicted);
    if address != predicted {
        warn!(
            "{} landed at {} instead of the predicted {}",
            name, address, predicted
        );
    }
    Ok(address)
}
