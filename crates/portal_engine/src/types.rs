use std::fmt;

use thiserror::Error;

use crate::keys::Pubkey;
use crate::program::FetchOutcome;

/// Which mutating call an [`EngineEvent::MutationCompleted`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Initialize,
    AddEntry,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Initialize => write!(f, "initialize"),
            Mutation::AddEntry => write!(f, "add entry"),
        }
    }
}

#[derive(Debug)]
pub enum EngineEvent {
    /// No wallet provider answered; nothing was asked to connect.
    WalletMissing,
    WalletConnected {
        public_key: Pubkey,
        silent: bool,
    },
    WalletConnectFailed {
        silent: bool,
        error: WalletError,
    },
    ListFetched(Result<FetchOutcome, ClientError>),
    MutationCompleted {
        mutation: Mutation,
        /// Transaction signature on success.
        result: Result<String, ClientError>,
    },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("wallet rejected the request: {0}")]
    Rejected(String),
    #[error("wallet bridge returned http status {0}")]
    HttpStatus(u16),
    #[error("wallet bridge timed out")]
    Timeout,
    #[error("wallet bridge unreachable: {0}")]
    Transport(String),
    #[error("wallet bridge sent an invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    #[error("wallet is not connected")]
    NotConnected,
    #[error("rpc request timed out")]
    Timeout,
    #[error("rpc endpoint unreachable: {0}")]
    Transport(String),
    #[error("rpc endpoint returned http status {0}")]
    HttpStatus(u16),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("account data could not be decoded: {0}")]
    Decode(String),
    #[error("account {account} is owned by {owner}, not by the program")]
    WrongOwner { account: Pubkey, owner: Pubkey },
    #[error("failed to encode instruction: {0}")]
    Encode(String),
    #[error("instruction `{0}` is not in the program interface")]
    UnknownInstruction(String),
    #[error("account `{0}` required by the instruction was not supplied")]
    MissingAccount(String),
    #[error("no signer available for account `{0}`")]
    MissingSigner(String),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}
