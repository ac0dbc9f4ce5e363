//! Scripts for deploying the Ethereum934 and BismuthCoin contracts.

#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod migration;

/// Our deploy utils
pub mod deploy;

// Our output utils
mod output_writer;

/// Our transaction utils
pub mod tx;
