//! Compiled contract artifacts.
//!
//! Only the ABI is read; the program body stays opaque and is forwarded untouched by
//! whatever declares or deploys the contract.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use starknet::core::types::Felt;
use tracing::debug;

use crate::error::ToolkitError;

#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    pub abi: Vec<AbiEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    /// Felt width of a `struct` entry.
    #[serde(default)]
    pub size: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiParam {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl ContractArtifact {
    pub fn load(path: &Path) -> Result<Self, ToolkitError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| ToolkitError::Artifact(format!("failed to read {path:?}: {err}")))?;
        let artifact = Self::from_json(&contents)?;
        debug!(path = %path.display(), entries = artifact.abi.len(), "loaded artifact");
        Ok(artifact)
    }

    pub fn from_json(contents: &str) -> Result<Self, ToolkitError> {
        serde_json::from_str(contents).map_err(|err| ToolkitError::Artifact(err.to_string()))
    }

    pub fn constructor(&self) -> Option<&AbiEntry> {
        self.abi.iter().find(|entry| entry.kind == "constructor")
    }

    pub fn function(&self, name: &str) -> Option<&AbiEntry> {
        self.abi
            .iter()
            .find(|entry| entry.kind == "function" && entry.name == name)
    }

    /// Declared width of a struct type, from its `struct` ABI entry.
    pub fn struct_size(&self, name: &str) -> Option<usize> {
        self.abi
            .iter()
            .find(|entry| entry.kind == "struct" && entry.name == name)
            .and_then(|entry| entry.size)
    }

    /// Checks assembled constructor calldata against the ABI's felt count.
    pub fn check_constructor_calldata(&self, calldata: &[Felt]) -> Result<(), ToolkitError> {
        self.check_constructor_len(calldata.len())
    }

    pub fn check_constructor_len(&self, len: usize) -> Result<(), ToolkitError> {
        let expected = match self.constructor() {
            Some(entry) => entry.calldata_len(self)?,
            None => 0,
        };
        if len != expected {
            return Err(ToolkitError::Artifact(format!(
                "constructor expects {expected} felts, got {len}"
            )));
        }
        Ok(())
    }
}

impl AbiEntry {
    /// Felt count of the inputs, with struct widths resolved against `artifact`.
    pub fn calldata_len(&self, artifact: &ContractArtifact) -> Result<usize, ToolkitError> {
        let mut total = 0;
        for input in &self.inputs {
            total += input.felt_width(artifact)?;
        }
        Ok(total)
    }

    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .inputs
            .iter()
            .map(|input| format!("{}: {}", input.name, input.ty))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

impl AbiParam {
    fn felt_width(&self, artifact: &ContractArtifact) -> Result<usize, ToolkitError> {
        match self.ty.as_str() {
            "felt"
            | "core::felt252"
            | "core::starknet::contract_address::ContractAddress"
            | "core::integer::u8"
            | "core::integer::u64"
            | "core::integer::u128"
            | "core::bool" => Ok(1),
            ty if ty.ends_with('*') => Err(ToolkitError::Artifact(format!(
                "array parameter {} has no fixed width",
                self.name
            ))),
            ty => match artifact.struct_size(ty) {
                Some(size) => Ok(size),
                // older artifacts omit the Uint256 struct entry
                None if ty == "Uint256" || ty == "core::integer::u256" => Ok(2),
                None => Err(ToolkitError::Artifact(format!(
                    "parameter {} has unknown type {ty}",
                    self.name
                ))),
            },
        }
    }
}
