//! Module providing JSON IO for generated reaction networks
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::reaction_network::network::ReactionNetwork;

/// Serialize a network into a JSON string
pub fn to_json_string(network: &ReactionNetwork) -> Result<String, IoError> {
    serde_json::to_string_pretty(network).map_err(|e| IoError::Serialize(e.to_string()))
}

/// Deserialize a network from a JSON string
///
/// Networks with reactions referencing species outside of the pool are rejected.
pub fn from_json_str(json: &str) -> Result<ReactionNetwork, IoError> {
    let network: ReactionNetwork =
        serde_json::from_str(json).map_err(|e| IoError::Deserialize(e.to_string()))?;
    if !network.is_well_formed() {
        return Err(IoError::InvalidNetwork);
    }
    Ok(network)
}

/// Write a network to a JSON file
pub fn write_json<P: AsRef<Path>>(network: &ReactionNetwork, path: P) -> Result<(), IoError> {
    let json = to_json_string(network)?;
    fs::write(path, json).map_err(|e| IoError::Write(e.to_string()))
}

/// Read a network from a JSON file
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<ReactionNetwork, IoError> {
    let json = fs::read_to_string(path).map_err(|e| IoError::Read(e.to_string()))?;
    from_json_str(&json)
}

/// Errors from reading or writing networks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IoError {
    #[error("Failed to read network file: {0}")]
    Read(String),
    #[error("Failed to write network file: {0}")]
    Write(String),
    #[error("Failed to serialize network: {0}")]
    Serialize(String),
    #[error("Failed to deserialize network: {0}")]
    Deserialize(String),
    /// A reaction references a species outside of the species pool
    #[error("Network references species outside of its species pool")]
    InvalidNetwork,
}
