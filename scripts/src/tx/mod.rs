//! Transaction plumbing

/// RPC client construction
pub mod client;
