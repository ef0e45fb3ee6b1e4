use std::fs;
use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::account::{BASE_ACCOUNT, METHOD_ADD_GIF, METHOD_START_STUFF_OFF};
use crate::keys::Pubkey;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdlError {
    #[error("failed to read interface description: {0}")]
    Io(String),
    #[error("interface description is not valid JSON: {0}")]
    Parse(String),
    #[error("interface description has no metadata.address")]
    MissingAddress,
    #[error("program address is invalid: {0}")]
    InvalidAddress(String),
    #[error("instruction `{0}` is not declared")]
    MissingInstruction(String),
    #[error("account type `{0}` is not declared")]
    MissingAccountType(String),
}

/// Anchor interface description, trimmed to the parts the client uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Idl {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub name: String,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlTypeDef>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    pub accounts: Vec<IdlAccount>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlAccount {
    pub name: String,
    #[serde(default)]
    pub is_mut: bool,
    #[serde(default)]
    pub is_signer: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeDef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlMetadata {
    pub address: Option<String>,
}

impl Idl {
    pub fn from_json_str(json: &str) -> Result<Self, IdlError> {
        serde_json::from_str(json).map_err(|err| IdlError::Parse(err.to_string()))
    }

    /// Loads and validates the description shipped next to the config.
    pub fn read_from_file(path: &Path) -> Result<Self, IdlError> {
        let json = fs::read_to_string(path)
            .map_err(|err| IdlError::Io(format!("{}: {err}", path.display())))?;
        let idl = Self::from_json_str(&json)?;
        idl.validate()?;
        Ok(idl)
    }

    pub fn program_id(&self) -> Result<Pubkey, IdlError> {
        let address = self
            .metadata
            .as_ref()
            .and_then(|meta| meta.address.as_deref())
            .ok_or(IdlError::MissingAddress)?;
        address
            .parse()
            .map_err(|err: crate::ParsePubkeyError| IdlError::InvalidAddress(err.to_string()))
    }

    pub fn instruction(&self, name: &str) -> Result<&IdlInstruction, IdlError> {
        self.instructions
            .iter()
            .find(|ix| ix.name == name)
            .ok_or_else(|| IdlError::MissingInstruction(name.to_string()))
    }

    /// Checks that everything the portal calls is actually declared.
    pub fn validate(&self) -> Result<(), IdlError> {
        self.program_id()?;
        self.instruction(METHOD_START_STUFF_OFF)?;
        self.instruction(METHOD_ADD_GIF)?;
        if !self.accounts.iter().any(|acc| acc.name == BASE_ACCOUNT) {
            return Err(IdlError::MissingAccountType(BASE_ACCOUNT.to_string()));
        }
        Ok(())
    }
}

/// First 8 bytes of `sha256("global:<snake_case name>")`.
pub fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator(&format!("global:{}", snake_case(name)))
}

/// First 8 bytes of `sha256("account:<TypeName>")`.
pub fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator(&format!("account:{name}"))
}

fn discriminator(preimage: &str) -> [u8; 8] {
    let digest = Sha256::digest(preimage.as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
