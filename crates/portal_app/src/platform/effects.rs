use std::thread;
use std::time::Duration;

use portal_core::{Effect, Entry, ListFetch, Msg, MutationKind};
use portal_engine::{EngineEvent, EngineHandle, FetchOutcome, Mutation};
use portal_logging::{portal_debug, portal_info, portal_warn};

/// Hands core effects to the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// `deliver` returns false once the receiving loop has gone away.
    pub fn new<F>(engine: EngineHandle, deliver: F) -> Self
    where
        F: Fn(Msg) -> bool + Send + 'static,
    {
        let runner = Self { engine };
        runner.spawn_event_loop(deliver);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ReconnectSilently => self.engine.reconnect_silently(),
                Effect::ConnectWallet => self.engine.connect(),
                Effect::FetchList => self.engine.fetch_list(),
                Effect::InitializeAccount => {
                    portal_info!("Initializing the base account");
                    self.engine.initialize();
                }
                Effect::SubmitEntry { link } => {
                    portal_info!("Submitting link len={} link={}", link.len(), link);
                    self.engine.add_entry(link);
                }
            }
        }
    }

    fn spawn_event_loop<F>(&self, deliver: F)
    where
        F: Fn(Msg) -> bool + Send + 'static,
    {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.recv_timeout(Duration::from_millis(100)) else {
                continue;
            };
            if !deliver(map_event(event)) {
                portal_debug!("message loop closed; effect runner stopping");
                break;
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::WalletMissing => Msg::WalletMissing,
        EngineEvent::WalletConnected { public_key, silent } => Msg::WalletConnected {
            public_key: public_key.to_string(),
            silent,
        },
        EngineEvent::WalletConnectFailed { silent, error } => Msg::WalletConnectFailed {
            reason: error.to_string(),
            silent,
        },
        EngineEvent::ListFetched(Ok(FetchOutcome::Loaded(snapshot))) => {
            let entries = snapshot
                .gif_list
                .into_iter()
                .map(|item| Entry::new(item.gif_link))
                .collect();
            Msg::ListFetched(ListFetch::Loaded(entries))
        }
        EngineEvent::ListFetched(Ok(FetchOutcome::Uninitialized)) => {
            Msg::ListFetched(ListFetch::Uninitialized)
        }
        EngineEvent::ListFetched(Err(err)) => Msg::ListFetched(ListFetch::Failed(err.to_string())),
        EngineEvent::MutationCompleted { mutation, result } => {
            let kind = map_mutation(mutation);
            match result {
                Ok(signature) => {
                    portal_info!("{} confirmed: {}", mutation, signature);
                    Msg::MutationSucceeded { kind }
                }
                Err(err) => {
                    portal_warn!("{} failed: {}", mutation, err);
                    Msg::MutationFailed {
                        kind,
                        reason: err.to_string(),
                    }
                }
            }
        }
    }
}

fn map_mutation(mutation: Mutation) -> MutationKind {
    match mutation {
        Mutation::Initialize => MutationKind::Initialize,
        Mutation::AddEntry => MutationKind::Submit,
    }
}
