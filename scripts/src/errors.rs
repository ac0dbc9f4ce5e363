//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error when reading or writing the deployment output file
    JsonOutputError(String),
    /// Error when creating the client
    ClientInitialization(String),
    /// Error when fetching the nonce to deploy a contract
    NonceFetching(String),
    /// Error when fetching the account list from the node
    AccountFetching(String),
    /// The account list is too short for the requested index
    AccountIndexOutOfRange {
        /// The index that was requested
        index: usize,
        /// The number of accounts the node returned
        available: usize,
    },
    /// Error loading a compiled contract artifact
    ArtifactResolution(String),
    /// Error deploying a contract
    ContractDeployment(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::JsonOutputError(s) => write!(f, "error with json output: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error during client init: {}", s),
            ScriptError::NonceFetching(s) => {
                write!(f, "error during nonce fetching for client signing: {}", s)
            }
            ScriptError::AccountFetching(s) => write!(f, "error fetching accounts: {}", s),
            ScriptError::AccountIndexOutOfRange { index, available } => write!(
                f,
                "account index {} out of range, node only has {} accounts",
                index, available
            ),
            ScriptError::ArtifactResolution(s) => write!(f, "error resolving artifact: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
        }
    }
}

impl Error for ScriptError {}
