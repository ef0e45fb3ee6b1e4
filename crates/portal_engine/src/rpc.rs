use std::sync::atomic::{AtomicU64, Ordering};

use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::config::HttpSettings;
use crate::keys::Pubkey;
use crate::{ClientError, ConfigError};

/// Minimal JSON-RPC reader for the cluster.
#[derive(Debug)]
pub struct RpcClient {
    url: Url,
    commitment: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

/// Decoded result of `getAccountInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
}

#[derive(Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct AccountInfoResult {
    value: Option<RpcAccount>,
}

#[derive(Deserialize)]
struct RpcAccount {
    /// `[payload, encoding]`
    data: (String, String),
    owner: String,
    lamports: u64,
}

impl RpcClient {
    pub fn new(
        url: Url,
        commitment: impl Into<String>,
        settings: &HttpSettings,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            url,
            commitment: commitment.into(),
            http: settings.build_client()?,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn commitment(&self) -> &str {
        &self.commitment
    }

    /// `Ok(None)` means the account does not exist.
    pub async fn get_account_info(
        &self,
        address: &Pubkey,
    ) -> Result<Option<AccountInfo>, ClientError> {
        let params = json!([
            address.to_string(),
            { "encoding": "base64", "commitment": self.commitment }
        ]);
        let result: AccountInfoResult = self.call("getAccountInfo", params).await?;
        let Some(account) = result.value else {
            return Ok(None);
        };

        let (payload, encoding) = account.data;
        if encoding != "base64" {
            return Err(ClientError::Decode(format!(
                "unexpected account encoding `{encoding}`"
            )));
        }
        let data = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|err| ClientError::Decode(err.to_string()))?;
        let owner = account
            .owner
            .parse()
            .map_err(|err: crate::ParsePubkeyError| ClientError::Decode(err.to_string()))?;

        Ok(Some(AccountInfo {
            owner,
            lamports: account.lamports,
            data,
        }))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T, ClientError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        let envelope: RpcResponse<T> = response.json().await.map_err(map_reqwest_error)?;
        if let Some(error) = envelope.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        envelope
            .result
            .ok_or_else(|| ClientError::Decode(format!("`{method}` returned no result")))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout;
    }
    if err.is_decode() {
        return ClientError::Decode(err.to_string());
    }
    ClientError::Transport(err.to_string())
}
