use borsh::{BorshDeserialize, BorshSerialize};

use crate::idl::{account_discriminator, instruction_discriminator};
use crate::keys::Pubkey;
use crate::ClientError;

/// Account type holding the shared list.
pub const BASE_ACCOUNT: &str = "BaseAccount";
pub(crate) const METHOD_START_STUFF_OFF: &str = "startStuffOff";
pub(crate) const METHOD_ADD_GIF: &str = "addGif";

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct GifItem {
    pub gif_link: String,
    pub user_address: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, BorshSerialize, BorshDeserialize)]
pub struct BaseAccount {
    pub total_gifs: u64,
    pub gif_list: Vec<GifItem>,
}

impl BaseAccount {
    /// Decodes raw account data: discriminator, then the borsh body.
    /// Trailing bytes are allowed since accounts are allocated with slack.
    pub fn decode(data: &[u8]) -> Result<Self, ClientError> {
        let (discriminator, mut body) = data.split_first_chunk::<8>().ok_or_else(|| {
            ClientError::Decode(format!("account data too short ({} bytes)", data.len()))
        })?;
        if *discriminator != account_discriminator(BASE_ACCOUNT) {
            return Err(ClientError::Decode(format!("account is not a {BASE_ACCOUNT}")));
        }
        Self::deserialize(&mut body).map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// Account data as the program stores it.
    pub fn to_account_data(&self) -> Result<Vec<u8>, ClientError> {
        let mut data = account_discriminator(BASE_ACCOUNT).to_vec();
        let body = borsh::to_vec(self).map_err(|err| ClientError::Encode(err.to_string()))?;
        data.extend_from_slice(&body);
        Ok(data)
    }
}

/// The two program instructions the portal issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramCall {
    /// One-time creation of the base account.
    StartStuffOff,
    AddGif { gif_link: String },
}

impl ProgramCall {
    pub fn method(&self) -> &'static str {
        match self {
            ProgramCall::StartStuffOff => METHOD_START_STUFF_OFF,
            ProgramCall::AddGif { .. } => METHOD_ADD_GIF,
        }
    }

    /// Discriminator followed by the borsh-encoded arguments.
    pub fn instruction_data(&self) -> Result<Vec<u8>, ClientError> {
        let mut data = instruction_discriminator(self.method()).to_vec();
        match self {
            ProgramCall::StartStuffOff => {}
            ProgramCall::AddGif { gif_link } => {
                let args = borsh::to_vec(gif_link)
                    .map_err(|err| ClientError::Encode(err.to_string()))?;
                data.extend_from_slice(&args);
            }
        }
        Ok(data)
    }
}
