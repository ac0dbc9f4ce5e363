//! Contract deployment: the seams the migration talks to, and their RPC backed implementation

use alloy::primitives::{Address, TxHash};

use crate::{artifacts::Artifact, errors::ScriptError, migration::DeployDirective};

mod address;
mod rpc;

pub use address::predict_contract_address;
pub use rpc::RpcDeployer;

/// A contract that made it on chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Name of the deployed contract
    pub name: String,
    /// Address the contract lives at
    pub address: Address,
    /// Hash of the creation transaction
    pub tx_hash: TxHash,
}

/// Source of the accounts known by the node
#[allow(async_fn_in_trait)]
pub trait AccountProvider {
    /// Fetch the ordered account list
    async fn accounts(&self) -> Result<Vec<Address>, ScriptError>;
}

/// Submits contract creations
#[allow(async_fn_in_trait)]
pub trait Deployer {
    /// Deploy `artifact` as described by `directive`, waiting for its inclusion
    async fn deploy(
        &self,
        artifact: &Artifact,
        directive: &DeployDirective,
    ) -> Result<Deployment, ScriptError>;
}
