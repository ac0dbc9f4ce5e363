//! Bookkeeping of the deployed addresses in a JSON file

use std::{fmt::LowerHex, fs, fs::File, io::Read, path::Path};

use json::JsonValue;

use crate::{deploy::Deployment, errors::ScriptError};

/// Location of a value in the output file
pub enum OutputKeys<'a> {
    /// Address of a deployed contract
    Deployment {
        /// The contract name
        key: &'a str,
    },
    /// Hash of a transaction sent for a contract
    Tx {
        /// The contract name
        key: &'a str,
        /// The transaction name
        tx_key: &'a str,
    },
}

/// Read a value back from the output file
///
/// A missing file or key yields `None`, an unreadable or corrupt file is an error.
pub fn read_output_file(
    file_path: &Path,
    key: OutputKeys,
) -> Result<Option<String>, ScriptError> {
    if !file_path.exists() {
        return Ok(None);
    }

    // Parse it's json content into objects
    let parsed_json = get_json_from_file(file_path)?;
    let final_key = match key {
        OutputKeys::Deployment { key } => &parsed_json[key]["deploy"],
        OutputKeys::Tx { key, tx_key } => &parsed_json[key]["txs"][tx_key],
    };

    Ok(final_key.as_str().map(str::to_string))
}

/// Writes the given value at `key`, creating the file if needed
pub fn write_output_file<T: LowerHex>(
    file_path: &Path,
    key: OutputKeys,
    value: T,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !file_path.exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    }

    // Parse it's json content into objects
    let mut parsed_json = get_json_from_file(file_path)?;

    // Update the right key
    match key {
        OutputKeys::Deployment { key } => {
            parsed_json[key]["deploy"] = JsonValue::String(format!("{value:#x}"))
        }
        OutputKeys::Tx { key, tx_key } => {
            parsed_json[key]["txs"][tx_key] = JsonValue::String(format!("{value:#x}"))
        }
    };

    // Write the updated json back to the file
    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}

/// Record both the address and the creation tx of a deployment
pub fn write_deployment(file_path: &Path, deployment: &Deployment) -> Result<(), ScriptError> {
    write_output_file(
        file_path,
        OutputKeys::Deployment {
            key: &deployment.name,
        },
        deployment.address,
    )?;
    write_output_file(
        file_path,
        OutputKeys::Tx {
            key: &deployment.name,
            tx_key: "deploy",
        },
        deployment.tx_hash,
    )
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &Path) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}
