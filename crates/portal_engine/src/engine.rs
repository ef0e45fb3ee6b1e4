use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use portal_logging::{portal_info, portal_warn, short_key};

use crate::account::ProgramCall;
use crate::bridge::HttpWalletBridge;
use crate::config::{ConfigError, PortalConfig};
use crate::idl::Idl;
use crate::keys::{Keypair, SYSTEM_PROGRAM_ID};
use crate::program::{AnchorProgramClient, CallAccounts, ProgramClient};
use crate::rpc::RpcClient;
use crate::wallet::{ConnectMode, TransactionSigner, WalletAdapter};
use crate::{ClientError, EngineEvent, Mutation};

/// The collaborators the engine drives, injected at construction.
#[derive(Clone)]
pub struct EngineServices {
    pub wallet: Arc<dyn WalletAdapter>,
    pub program: Arc<dyn ProgramClient>,
    /// The account holding the list; co-signs its own creation.
    pub base_account: Keypair,
}

impl EngineServices {
    /// Wires the HTTP wallet bridge and the Anchor client from config.
    pub fn from_config(config: &PortalConfig) -> Result<Self, ConfigError> {
        let settings = config.http_settings();
        let idl = Idl::read_from_file(&config.idl_path)?;
        let base_account = Keypair::read_from_file(&config.base_account_keypair)?;
        let rpc = RpcClient::new(config.rpc_url()?, config.commitment.clone(), &settings)?;
        let program = AnchorProgramClient::new(idl, rpc)?;
        let wallet = HttpWalletBridge::new(config.wallet_bridge_url()?, &settings)?;

        portal_info!(
            "Program {} on {}, base account {}",
            program.program_id(),
            config.rpc_url()?,
            base_account.pubkey()
        );
        Ok(Self {
            wallet: Arc::new(wallet),
            program: Arc::new(program),
            base_account,
        })
    }
}

enum EngineCommand {
    Connect { mode: ConnectMode },
    FetchList,
    Initialize,
    AddEntry { link: String },
}

type SharedSigner = Arc<Mutex<Option<Arc<dyn TransactionSigner>>>>;

/// Runs collaborator calls on a tokio runtime owned by a worker thread.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(services: EngineServices) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let services = Arc::new(services);
        let signer: SharedSigner = Arc::new(Mutex::new(None));

        thread::Builder::new()
            .name("portal-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let services = services.clone();
                    let signer = signer.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(&services, &signer, command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn reconnect_silently(&self) {
        self.send(EngineCommand::Connect {
            mode: ConnectMode::OnlyIfTrusted,
        });
    }

    pub fn connect(&self) {
        self.send(EngineCommand::Connect {
            mode: ConnectMode::Interactive,
        });
    }

    pub fn fetch_list(&self) {
        self.send(EngineCommand::FetchList);
    }

    pub fn initialize(&self) {
        self.send(EngineCommand::Initialize);
    }

    pub fn add_entry(&self, link: impl Into<String>) {
        self.send(EngineCommand::AddEntry { link: link.into() });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            portal_warn!("engine worker has stopped; command dropped");
        }
    }
}

async fn handle_command(
    services: &EngineServices,
    signer: &SharedSigner,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Connect { mode } => connect(services, signer, mode).await,
        EngineCommand::FetchList => {
            let result = services
                .program
                .fetch(&services.base_account.pubkey())
                .await;
            if let Err(err) = &result {
                portal_warn!("fetching the list failed: {}", err);
            }
            EngineEvent::ListFetched(result)
        }
        EngineCommand::Initialize => {
            let call = ProgramCall::StartStuffOff;
            let result = mutate(services, signer, Mutation::Initialize, call).await;
            EngineEvent::MutationCompleted {
                mutation: Mutation::Initialize,
                result,
            }
        }
        EngineCommand::AddEntry { link } => {
            let call = ProgramCall::AddGif { gif_link: link };
            let result = mutate(services, signer, Mutation::AddEntry, call).await;
            EngineEvent::MutationCompleted {
                mutation: Mutation::AddEntry,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}

async fn connect(
    services: &EngineServices,
    signer: &SharedSigner,
    mode: ConnectMode,
) -> EngineEvent {
    let silent = mode == ConnectMode::OnlyIfTrusted;
    // Detection always precedes connect so an absent wallet is reported first.
    let Some(provider) = services.wallet.detect().await else {
        portal_warn!("no wallet provider found");
        return EngineEvent::WalletMissing;
    };
    portal_info!("{} wallet found", provider.name);

    match services.wallet.connect(mode).await {
        Ok(session) => {
            if let Ok(mut slot) = signer.lock() {
                *slot = Some(session.signer.clone());
            }
            portal_info!(
                "Connected with public key {}",
                short_key(&session.public_key.to_string())
            );
            EngineEvent::WalletConnected {
                public_key: session.public_key,
                silent,
            }
        }
        Err(error) => {
            portal_warn!("wallet connect failed (silent={}): {}", silent, error);
            EngineEvent::WalletConnectFailed { silent, error }
        }
    }
}

async fn mutate(
    services: &EngineServices,
    signer: &SharedSigner,
    mutation: Mutation,
    call: ProgramCall,
) -> Result<String, ClientError> {
    let current = signer.lock().ok().and_then(|slot| slot.clone());
    let Some(current) = current else {
        return Err(ClientError::NotConnected);
    };

    let base = services.base_account.pubkey();
    let mut accounts = CallAccounts::new()
        .account("baseAccount", base)
        .account("user", current.public_key());
    if mutation == Mutation::Initialize {
        accounts = accounts
            .account("systemProgram", SYSTEM_PROGRAM_ID)
            .co_signer(services.base_account.clone());
    }

    let result = services
        .program
        .call(&call, &accounts, current.as_ref())
        .await;
    if let Err(err) = &result {
        portal_warn!("{} failed: {}", mutation, err);
    }
    result
}
