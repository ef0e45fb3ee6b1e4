use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
pub use solana_pubkey::{ParsePubkeyError, Pubkey};
use thiserror::Error;

const PUBKEY_LEN: usize = 32;
const KEYPAIR_LEN: usize = 64;

/// The system program, which creates accounts. All-zero key.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0; PUBKEY_LEN]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeypairError {
    #[error("expected {expected} key bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("keypair file is malformed: {0}")]
    Malformed(String),
    #[error("failed to read keypair file: {0}")]
    Io(String),
}

/// Ed25519 keypair in the 64-byte `secret || public` layout used by
/// Solana tooling. Only ever handed to the wallet as a co-signer.
#[derive(Clone, PartialEq, Eq)]
pub struct Keypair([u8; KEYPAIR_LEN]);

impl Keypair {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeypairError> {
        let array: [u8; KEYPAIR_LEN] =
            bytes
                .try_into()
                .map_err(|_| KeypairError::InvalidLength {
                    expected: KEYPAIR_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(array))
    }

    /// Parses either a plain 64-number array or a web3.js keypair export
    /// (`{"_keypair": {"secretKey": {"0": 12, "1": 200, ...}}}`).
    pub fn from_json_str(json: &str) -> Result<Self, KeypairError> {
        let file: KeypairFile =
            serde_json::from_str(json).map_err(|err| KeypairError::Malformed(err.to_string()))?;
        match file {
            KeypairFile::Bytes(bytes) => Self::from_bytes(&bytes),
            KeypairFile::Exported { keypair } => {
                let bytes = indexed_bytes(keypair.secret_key)?;
                Self::from_bytes(&bytes)
            }
        }
    }

    pub fn read_from_file(path: &Path) -> Result<Self, KeypairError> {
        let json = fs::read_to_string(path)
            .map_err(|err| KeypairError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn pubkey(&self) -> Pubkey {
        let mut bytes = [0u8; PUBKEY_LEN];
        bytes.copy_from_slice(&self.0[PUBKEY_LEN..]);
        Pubkey::new_from_array(bytes)
    }

    pub fn to_base58_string(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KeypairFile {
    Bytes(Vec<u8>),
    Exported {
        #[serde(rename = "_keypair")]
        keypair: ExportedKeypair,
    },
}

#[derive(Deserialize)]
struct ExportedKeypair {
    #[serde(rename = "secretKey")]
    secret_key: BTreeMap<String, u8>,
}

fn indexed_bytes(map: BTreeMap<String, u8>) -> Result<Vec<u8>, KeypairError> {
    let mut indexed = map
        .into_iter()
        .map(|(key, value)| {
            key.parse::<usize>()
                .map(|index| (index, value))
                .map_err(|_| KeypairError::Malformed(format!("non-numeric index `{key}`")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    indexed.sort_by_key(|(index, _)| *index);

    let mut bytes = Vec::with_capacity(indexed.len());
    for (position, (index, value)) in indexed.into_iter().enumerate() {
        if index != position {
            return Err(KeypairError::Malformed(format!("missing index {position}")));
        }
        bytes.push(value);
    }
    Ok(bytes)
}
