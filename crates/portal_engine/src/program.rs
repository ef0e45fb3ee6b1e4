use std::collections::BTreeMap;

use base64::Engine as _;
use portal_logging::{portal_debug, portal_info};

use crate::account::{BaseAccount, GifItem, ProgramCall};
use crate::idl::Idl;
use crate::keys::{Keypair, Pubkey};
use crate::rpc::RpcClient;
use crate::wallet::{
    AccountMetaRequest, CoSigner, InstructionRequest, TransactionRequest, TransactionSigner,
};
use crate::{ClientError, IdlError};

/// What a read of the base account found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded(AccountSnapshot),
    /// The account has not been created on chain.
    Uninitialized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub address: Pubkey,
    pub total_gifs: u64,
    pub gif_list: Vec<GifItem>,
}

/// Named account references for one instruction, plus any keypairs that
/// must co-sign next to the wallet.
#[derive(Debug, Clone, Default)]
pub struct CallAccounts {
    named: BTreeMap<String, Pubkey>,
    co_signers: Vec<Keypair>,
}

impl CallAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, name: impl Into<String>, key: Pubkey) -> Self {
        self.named.insert(name.into(), key);
        self
    }

    pub fn co_signer(mut self, keypair: Keypair) -> Self {
        self.co_signers.push(keypair);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Pubkey> {
        self.named.get(name)
    }
}

/// Reads and writes the program's account state.
#[async_trait::async_trait]
pub trait ProgramClient: Send + Sync {
    async fn fetch(&self, address: &Pubkey) -> Result<FetchOutcome, ClientError>;

    /// Submits `call` through `signer`. Returns the transaction signature.
    async fn call(
        &self,
        call: &ProgramCall,
        accounts: &CallAccounts,
        signer: &dyn TransactionSigner,
    ) -> Result<String, ClientError>;
}

/// Anchor-style client: reads over JSON-RPC, writes through the wallet.
#[derive(Debug)]
pub struct AnchorProgramClient {
    idl: Idl,
    program_id: Pubkey,
    rpc: RpcClient,
}

impl AnchorProgramClient {
    pub fn new(idl: Idl, rpc: RpcClient) -> Result<Self, IdlError> {
        let program_id = idl.program_id()?;
        Ok(Self {
            idl,
            program_id,
            rpc,
        })
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Resolves the IDL's account list against the supplied references.
    fn build_request(
        &self,
        call: &ProgramCall,
        accounts: &CallAccounts,
        signer: &dyn TransactionSigner,
    ) -> Result<TransactionRequest, ClientError> {
        let instruction = self
            .idl
            .instruction(call.method())
            .map_err(|_| ClientError::UnknownInstruction(call.method().to_string()))?;

        let wallet_key = signer.public_key();
        let mut metas = Vec::with_capacity(instruction.accounts.len());
        let mut co_signers = Vec::new();
        for declared in &instruction.accounts {
            let key = *accounts
                .get(&declared.name)
                .ok_or_else(|| ClientError::MissingAccount(declared.name.clone()))?;
            if declared.is_signer && key != wallet_key {
                let keypair = accounts
                    .co_signers
                    .iter()
                    .find(|kp| kp.pubkey() == key)
                    .ok_or_else(|| ClientError::MissingSigner(declared.name.clone()))?;
                co_signers.push(CoSigner::from(keypair));
            }
            metas.push(AccountMetaRequest {
                pubkey: key.to_string(),
                is_signer: declared.is_signer,
                is_writable: declared.is_mut,
            });
        }

        let data = call.instruction_data()?;
        Ok(TransactionRequest {
            rpc_url: self.rpc.url().to_string(),
            commitment: self.rpc.commitment().to_string(),
            instructions: vec![InstructionRequest {
                program_id: self.program_id.to_string(),
                accounts: metas,
                data: base64::engine::general_purpose::STANDARD.encode(data),
            }],
            co_signers,
        })
    }
}

#[async_trait::async_trait]
impl ProgramClient for AnchorProgramClient {
    async fn fetch(&self, address: &Pubkey) -> Result<FetchOutcome, ClientError> {
        let Some(info) = self.rpc.get_account_info(address).await? else {
            portal_debug!("account {} does not exist yet", address);
            return Ok(FetchOutcome::Uninitialized);
        };
        if info.owner != self.program_id {
            return Err(ClientError::WrongOwner {
                account: *address,
                owner: info.owner,
            });
        }
        let account = BaseAccount::decode(&info.data)?;
        portal_debug!(
            "Got the account {}: {} entries",
            address,
            account.gif_list.len()
        );
        Ok(FetchOutcome::Loaded(AccountSnapshot {
            address: *address,
            total_gifs: account.total_gifs,
            gif_list: account.gif_list,
        }))
    }

    async fn call(
        &self,
        call: &ProgramCall,
        accounts: &CallAccounts,
        signer: &dyn TransactionSigner,
    ) -> Result<String, ClientError> {
        let request = self.build_request(call, accounts, signer)?;
        let signature = signer.sign_and_send(request).await?;
        portal_info!("{} submitted: {}", call.method(), signature);
        Ok(signature)
    }
}
