use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::keys::{Keypair, Pubkey};
use crate::WalletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectMode {
    /// Prompt the user.
    Interactive,
    /// Succeed only if the user already trusts this app; never prompts.
    OnlyIfTrusted,
}

/// A detected wallet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletProvider {
    pub name: String,
}

/// Result of a successful connect: who the user is and what can sign for them.
#[derive(Clone)]
pub struct WalletSession {
    pub public_key: Pubkey,
    pub signer: Arc<dyn TransactionSigner>,
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// The wallet the user runs. Key custody stays on the other side.
#[async_trait::async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Returns the provider if one is installed and usable.
    async fn detect(&self) -> Option<WalletProvider>;

    async fn connect(&self, mode: ConnectMode) -> Result<WalletSession, WalletError>;
}

/// Signing capability handed explicitly into every mutating call.
#[async_trait::async_trait]
pub trait TransactionSigner: Send + Sync {
    fn public_key(&self) -> Pubkey;

    /// Has the wallet build, sign, and submit a transaction carrying the
    /// given instructions. Returns the transaction signature.
    async fn sign_and_send(&self, request: TransactionRequest) -> Result<String, WalletError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub rpc_url: String,
    pub commitment: String,
    pub instructions: Vec<InstructionRequest>,
    /// Extra signers besides the wallet, e.g. a freshly created account.
    pub co_signers: Vec<CoSigner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionRequest {
    pub program_id: String,
    pub accounts: Vec<AccountMetaRequest>,
    /// Base64 instruction data.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetaRequest {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// Base58 secret key of a co-signer. Never printed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoSigner(String);

impl CoSigner {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&Keypair> for CoSigner {
    fn from(keypair: &Keypair) -> Self {
        Self(keypair.to_base58_string())
    }
}

impl fmt::Debug for CoSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CoSigner(..)")
    }
}
