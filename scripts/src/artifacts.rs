//! Resolution of compiled contract artifacts by name

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{dyn_abi::DynSolValue, hex, primitives::Bytes};
use json::JsonValue;

use crate::errors::ScriptError;

/// A compiled contract, ready to be deployed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// The contract name
    pub name: String,
    /// The contract creation bytecode
    pub bytecode: Bytes,
}

impl Artifact {
    /// The creation calldata: bytecode followed by the abi encoded constructor arguments
    pub fn deploy_code(&self, args: &[DynSolValue]) -> Bytes {
        if args.is_empty() {
            return self.bytecode.clone();
        }

        let mut code = self.bytecode.to_vec();
        code.extend(DynSolValue::Tuple(args.to_vec()).abi_encode_params());
        Bytes::from(code)
    }
}

/// Something able to find a compiled contract from its name
pub trait ArtifactResolver {
    /// Resolve the artifact of the contract `name`
    fn resolve(&self, name: &str) -> Result<Artifact, ScriptError>;
}

/// Resolve artifacts from a build directory on disk.
///
/// Both the truffle layout (`<root>/<Name>.json`) and the foundry layout
/// (`<root>/<Name>.sol/<Name>.json`) are looked up, in that order.
pub struct FsArtifactResolver {
    /// The build directory
    root: PathBuf,
}

impl FsArtifactResolver {
    /// Build a resolver reading from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the artifact file for `name`
    fn artifact_path(&self, name: &str) -> Result<PathBuf, ScriptError> {
        let file_name = format!("{name}.json");
        [
            self.root.join(&file_name),
            self.root.join(format!("{name}.sol")).join(&file_name),
        ]
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| {
            ScriptError::ArtifactResolution(format!(
                "no artifact for {} in {}",
                name,
                self.root.display()
            ))
        })
    }
}

impl ArtifactResolver for FsArtifactResolver {
    fn resolve(&self, name: &str) -> Result<Artifact, ScriptError> {
        let path = self.artifact_path(name)?;
        let parsed = read_json(&path)?;

        // Truffle stores a plain string, foundry nests it under `object`
        let raw_bytecode = parsed["bytecode"]
            .as_str()
            .or_else(|| parsed["bytecode"]["object"].as_str())
            .ok_or_else(|| {
                ScriptError::ArtifactResolution(format!(
                    "missing bytecode in {}",
                    path.display()
                ))
            })?;

        let bytecode =
            hex::decode(raw_bytecode).map_err(|e| ScriptError::ArtifactResolution(e.to_string()))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactResolution(format!(
                "{} has no bytecode, is it abstract?",
                name
            )));
        }

        Ok(Artifact {
            name: name.to_string(),
            bytecode: Bytes::from(bytecode),
        })
    }
}

/// Parses the JSON file at the given path
fn read_json(path: &Path) -> Result<JsonValue, ScriptError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ScriptError::ArtifactResolution(e.to_string()))?;
    json::parse(&contents).map_err(|e| ScriptError::ArtifactResolution(e.to_string()))
}
