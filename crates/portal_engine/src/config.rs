use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("invalid url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
    #[error(transparent)]
    Idl(#[from] crate::IdlError),
    #[error(transparent)]
    Keypair(#[from] crate::KeypairError),
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Which cluster the program is deployed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Cluster {
    #[default]
    Devnet,
    Testnet,
    MainnetBeta,
    Localnet,
    Custom(String),
}

impl Cluster {
    pub fn rpc_url(&self) -> Result<Url, ConfigError> {
        let raw = match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Custom(url) => url.as_str(),
        };
        parse_url(raw)
    }
}

/// Everything the engine needs, loaded once at startup from a RON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub cluster: Cluster,
    pub commitment: String,
    /// Anchor interface description of the deployed program.
    pub idl_path: PathBuf,
    /// Keypair of the account holding the list.
    pub base_account_keypair: PathBuf,
    pub wallet_bridge_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// How long a wallet prompt may stay open before connect or signing
    /// gives up.
    pub wallet_approval_timeout_secs: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            cluster: Cluster::Devnet,
            commitment: "processed".to_string(),
            idl_path: PathBuf::from("idl.json"),
            base_account_keypair: PathBuf::from("keypair.json"),
            wallet_bridge_url: "http://127.0.0.1:8765".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            wallet_approval_timeout_secs: 300,
        }
    }
}

impl PortalConfig {
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        ron::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads the file and resolves relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let config = Self::from_ron_str(&text)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_paths(base_dir))
    }

    pub fn resolve_paths(mut self, base_dir: &Path) -> Self {
        if self.idl_path.is_relative() {
            self.idl_path = base_dir.join(&self.idl_path);
        }
        if self.base_account_keypair.is_relative() {
            self.base_account_keypair = base_dir.join(&self.base_account_keypair);
        }
        self
    }

    pub fn rpc_url(&self) -> Result<Url, ConfigError> {
        self.cluster.rpc_url()
    }

    pub fn wallet_bridge_url(&self) -> Result<Url, ConfigError> {
        parse_url(&self.wallet_bridge_url)
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            approval_timeout: Duration::from_secs(self.wallet_approval_timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Budget for calls that wait on the user approving in the wallet.
    pub approval_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            approval_timeout: Duration::from_secs(300),
        }
    }
}

impl HttpSettings {
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        self.client_with_timeout(self.request_timeout)
    }

    pub(crate) fn build_approval_client(&self) -> Result<reqwest::Client, ConfigError> {
        self.client_with_timeout(self.approval_timeout)
    }

    fn client_with_timeout(&self, timeout: Duration) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        url: raw.to_string(),
        message: err.to_string(),
    })
}
