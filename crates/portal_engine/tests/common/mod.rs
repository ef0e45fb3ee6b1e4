#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use portal_engine::{Keypair, Pubkey, TransactionRequest, TransactionSigner, WalletError};

pub const PROGRAM_ID: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

pub const IDL_JSON: &str = r#"{
  "version": "0.0.0",
  "name": "myepicproject",
  "instructions": [
    {
      "name": "startStuffOff",
      "accounts": [
        { "name": "baseAccount", "isMut": true, "isSigner": true },
        { "name": "user", "isMut": true, "isSigner": true },
        { "name": "systemProgram", "isMut": false, "isSigner": false }
      ],
      "args": []
    },
    {
      "name": "addGif",
      "accounts": [
        { "name": "baseAccount", "isMut": true, "isSigner": false },
        { "name": "user", "isMut": true, "isSigner": true }
      ],
      "args": [{ "name": "gifLink", "type": "string" }]
    }
  ],
  "accounts": [
    {
      "name": "BaseAccount",
      "type": {
        "kind": "struct",
        "fields": [
          { "name": "totalGifs", "type": "u64" },
          { "name": "gifList", "type": { "vec": { "defined": "ItemStruct" } } }
        ]
      }
    }
  ],
  "types": [
    {
      "name": "ItemStruct",
      "type": {
        "kind": "struct",
        "fields": [
          { "name": "gifLink", "type": "string" },
          { "name": "userAddress", "type": "publicKey" }
        ]
      }
    }
  ],
  "metadata": { "address": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin" }
}"#;

pub fn init_logging() {
    portal_logging::initialize_for_tests();
}

pub fn program_id() -> Pubkey {
    PROGRAM_ID.parse().expect("program id")
}

/// Deterministic keypair whose public half is `[seed; 32]`.
pub fn keypair(seed: u8) -> Keypair {
    let mut bytes = [seed.wrapping_add(100); 64];
    bytes[32..].fill(seed);
    Keypair::from_bytes(&bytes).expect("keypair")
}

/// Signer that records what it was asked to send.
pub struct RecordingSigner {
    pub key: Pubkey,
    pub requests: Arc<Mutex<Vec<TransactionRequest>>>,
    pub fail_with: Option<WalletError>,
}

impl RecordingSigner {
    pub fn new(key: Pubkey) -> Self {
        Self {
            key,
            requests: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn take(&self) -> Vec<TransactionRequest> {
        self.requests.lock().unwrap().drain(..).collect()
    }
}

#[async_trait::async_trait]
impl TransactionSigner for RecordingSigner {
    fn public_key(&self) -> Pubkey {
        self.key
    }

    async fn sign_and_send(&self, request: TransactionRequest) -> Result<String, WalletError> {
        self.requests.lock().unwrap().push(request);
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok("5igNaTuRe".to_string()),
        }
    }
}
