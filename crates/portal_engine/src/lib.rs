//! Portal engine: wallet and program seams, codecs, and effect execution.
mod account;
mod bridge;
mod config;
mod engine;
mod idl;
mod keys;
mod program;
mod rpc;
mod types;
mod wallet;

pub use account::{BaseAccount, GifItem, ProgramCall, BASE_ACCOUNT};
pub use bridge::HttpWalletBridge;
pub use config::{Cluster, ConfigError, HttpSettings, PortalConfig};
pub use engine::{EngineHandle, EngineServices};
pub use idl::{
    account_discriminator, instruction_discriminator, Idl, IdlAccount, IdlError, IdlInstruction,
};
pub use keys::{Keypair, KeypairError, ParsePubkeyError, Pubkey, SYSTEM_PROGRAM_ID};
pub use program::{AccountSnapshot, AnchorProgramClient, CallAccounts, FetchOutcome, ProgramClient};
pub use rpc::{AccountInfo, RpcClient};
pub use types::{ClientError, EngineEvent, Mutation, WalletError};
pub use wallet::{
    AccountMetaRequest, CoSigner, ConnectMode, InstructionRequest, TransactionRequest,
    TransactionSigner, WalletAdapter, WalletProvider, WalletSession,
};
