use crate::{
    AppState, Effect, Msg, MutationKind, NoticeLevel, PendingOp, SessionState, WalletPresence,
    WALLET_MISSING_ALERT,
};

const BUSY_NOTICE: &str = "A transaction is still being processed. Please wait...";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if *state.session() == SessionState::Disconnected {
                state.begin_connect(true);
                vec![Effect::ReconnectSilently]
            } else {
                Vec::new()
            }
        }
        Msg::ConnectClicked => {
            if state.wallet() == WalletPresence::Absent {
                // Warn again; the engine re-detects before any connect.
                state.wallet_missing(WALLET_MISSING_ALERT);
            }
            if *state.session() == SessionState::Disconnected {
                state.begin_connect(false);
                vec![Effect::ConnectWallet]
            } else {
                Vec::new()
            }
        }
        Msg::WalletMissing => {
            state.wallet_missing(WALLET_MISSING_ALERT);
            Vec::new()
        }
        Msg::WalletConnected { public_key, .. } => {
            // The list is fetched once, on the unset -> set transition only.
            if state.connected(public_key) {
                vec![Effect::FetchList]
            } else {
                Vec::new()
            }
        }
        Msg::WalletConnectFailed { .. } => {
            state.connect_failed();
            Vec::new()
        }
        Msg::DraftChanged(text) => {
            state.set_draft(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.draft().trim().is_empty() || !state.is_connected() {
                return (state, Vec::new());
            }
            if state.pending().is_some() {
                state.set_notice(NoticeLevel::Warning, BUSY_NOTICE);
                return (state, Vec::new());
            }
            // Cleared before the call resolves, whatever its outcome.
            let link = state.take_draft().trim().to_string();
            state.clear_notice();
            state.set_pending(Some(PendingOp::Submitting));
            vec![Effect::SubmitEntry { link }]
        }
        Msg::InitializeClicked => {
            if !state.is_connected() {
                return (state, Vec::new());
            }
            if state.pending().is_some() {
                state.set_notice(NoticeLevel::Warning, BUSY_NOTICE);
                return (state, Vec::new());
            }
            state.clear_notice();
            state.set_pending(Some(PendingOp::Initializing));
            vec![Effect::InitializeAccount]
        }
        Msg::RefreshClicked => {
            if state.is_connected() {
                vec![Effect::FetchList]
            } else {
                Vec::new()
            }
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
        Msg::ListFetched(fetch) => {
            if state.is_connected() {
                state.apply_fetch(fetch);
            }
            Vec::new()
        }
        Msg::MutationSucceeded { .. } => {
            state.set_pending(Some(PendingOp::Refreshing));
            vec![Effect::FetchList]
        }
        Msg::MutationFailed { kind, reason } => {
            state.set_pending(None);
            let what = match kind {
                MutationKind::Initialize => "Account initialization",
                MutationKind::Submit => "Submitting the link",
            };
            state.set_notice(NoticeLevel::Error, format!("{what} failed: {reason}"));
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
