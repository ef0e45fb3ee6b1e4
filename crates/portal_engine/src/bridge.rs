use std::sync::Arc;

use portal_logging::{portal_debug, portal_warn};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::HttpSettings;
use crate::keys::Pubkey;
use crate::wallet::{
    ConnectMode, TransactionRequest, TransactionSigner, WalletAdapter, WalletProvider,
    WalletSession,
};
use crate::{ConfigError, WalletError};

/// Talks to a local wallet bridge that fronts the user's wallet extension.
///
/// Endpoints (relative to the bridge URL):
/// - `GET v1/provider` answers whether a wallet is installed
/// - `POST v1/connect` connects, interactively or only-if-trusted
/// - `POST v1/sign-and-send` signs and submits, authorized by the session
///
/// Provider detection uses the regular request timeout; connect and signing
/// wait on the user and use the approval timeout.
#[derive(Debug, Clone)]
pub struct HttpWalletBridge {
    base: Url,
    http: reqwest::Client,
    approval_http: reqwest::Client,
}

#[derive(Deserialize)]
struct ProviderResponse {
    name: String,
    #[serde(default)]
    is_phantom: bool,
}

#[derive(Serialize)]
struct ConnectRequest {
    only_if_trusted: bool,
}

#[derive(Deserialize)]
struct ConnectResponse {
    public_key: String,
    session: String,
}

#[derive(Deserialize)]
struct SignResponse {
    signature: String,
}

impl HttpWalletBridge {
    pub fn new(mut base: Url, settings: &HttpSettings) -> Result<Self, ConfigError> {
        // Url::join drops the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            http: settings.build_client()?,
            approval_http: settings.build_approval_client()?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, WalletError> {
        self.base
            .join(path)
            .map_err(|err| WalletError::Transport(err.to_string()))
    }
}

#[async_trait::async_trait]
impl WalletAdapter for HttpWalletBridge {
    async fn detect(&self) -> Option<WalletProvider> {
        let url = self.endpoint("v1/provider").ok()?;
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                portal_debug!("wallet bridge not reachable: {}", err);
                return None;
            }
        };
        if !response.status().is_success() {
            portal_debug!("wallet bridge provider lookup returned {}", response.status());
            return None;
        }
        match response.json::<ProviderResponse>().await {
            Ok(provider) if provider.is_phantom => Some(WalletProvider {
                name: provider.name,
            }),
            Ok(provider) => {
                portal_warn!("wallet provider `{}` is not supported", provider.name);
                None
            }
            Err(err) => {
                portal_warn!("wallet bridge sent an unreadable provider answer: {}", err);
                None
            }
        }
    }

    async fn connect(&self, mode: ConnectMode) -> Result<WalletSession, WalletError> {
        let url = self.endpoint("v1/connect")?;
        let request = ConnectRequest {
            only_if_trusted: mode == ConnectMode::OnlyIfTrusted,
        };
        let response = self
            .approval_http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body: ConnectResponse = response
            .json()
            .await
            .map_err(|err| WalletError::InvalidResponse(err.to_string()))?;
        let public_key: Pubkey = body
            .public_key
            .parse()
            .map_err(|err: crate::ParsePubkeyError| WalletError::InvalidResponse(err.to_string()))?;

        let signer = BridgeSigner {
            bridge: self.clone(),
            session: body.session,
            public_key,
        };
        Ok(WalletSession {
            public_key,
            signer: Arc::new(signer),
        })
    }
}

/// Signing capability bound to one bridge session.
struct BridgeSigner {
    bridge: HttpWalletBridge,
    session: String,
    public_key: Pubkey,
}

#[async_trait::async_trait]
impl TransactionSigner for BridgeSigner {
    fn public_key(&self) -> Pubkey {
        self.public_key
    }

    async fn sign_and_send(&self, request: TransactionRequest) -> Result<String, WalletError> {
        let url = self.bridge.endpoint("v1/sign-and-send")?;
        let response = self
            .bridge
            .approval_http
            .post(url)
            .bearer_auth(&self.session)
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let body: SignResponse = response
            .json()
            .await
            .map_err(|err| WalletError::InvalidResponse(err.to_string()))?;
        Ok(body.signature)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, WalletError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let reason = response.text().await.unwrap_or_default();
        let reason = if reason.trim().is_empty() {
            status.to_string()
        } else {
            reason.trim().to_string()
        };
        return Err(WalletError::Rejected(reason));
    }
    Err(WalletError::HttpStatus(status.as_u16()))
}

fn map_reqwest_error(err: reqwest::Error) -> WalletError {
    if err.is_timeout() {
        return WalletError::Timeout;
    }
    WalletError::Transport(err.to_string())
}
