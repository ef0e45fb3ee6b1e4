use std::sync::Once;

use portal_core::{
    update, AppState, Effect, ListFetch, ListState, Msg, SessionState, WalletPresence,
    WALLET_MISSING_ALERT,
};

const KEY: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(portal_logging::initialize_for_tests);
}

fn connected(key: &str, silent: bool) -> Msg {
    Msg::WalletConnected {
        public_key: key.to_string(),
        silent,
    }
}

#[test]
fn start_requests_silent_reconnect() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(effects, vec![Effect::ReconnectSilently]);
    assert_eq!(*state.session(), SessionState::Connecting { silent: true });
    assert!(state.consume_dirty());
    assert!(state.view().connecting);
}

#[test]
fn silent_reconnect_fetches_list_exactly_once_after_identity_is_set() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    assert!(state.public_key().is_none());

    let (state, effects) = update(state, connected(KEY, true));
    assert_eq!(state.public_key(), Some(KEY));
    assert_eq!(effects, vec![Effect::FetchList]);

    // A repeated connect report must not trigger a second refresh.
    let (state, effects) = update(state, connected(KEY, false));
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::ListFetched(ListFetch::Loaded(Vec::new())));
    assert!(effects.is_empty());
    assert_eq!(*state.list(), ListState::Loaded(Vec::new()));
}

#[test]
fn wallet_missing_surfaces_alert_and_stays_disconnected() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, effects) = update(state, Msg::WalletMissing);

    assert!(effects.is_empty());
    assert_eq!(*state.session(), SessionState::Disconnected);
    assert_eq!(state.wallet(), WalletPresence::Absent);
    let view = state.view();
    assert_eq!(view.alert.as_deref(), Some(WALLET_MISSING_ALERT));
    assert!(view.show_connect);
    assert!(!view.connecting);
}

#[test]
fn connect_after_missing_wallet_warns_again_and_retries_detection() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(state, Msg::WalletMissing);
    let (state, _) = update(state, Msg::AlertDismissed);
    assert!(state.view().alert.is_none());

    let (state, effects) = update(state, Msg::ConnectClicked);

    assert_eq!(effects, vec![Effect::ConnectWallet]);
    assert_eq!(state.view().alert.as_deref(), Some(WALLET_MISSING_ALERT));
    assert_eq!(*state.session(), SessionState::Connecting { silent: false });

    // Still absent: back to the connect button, alert still up.
    let (state, effects) = update(state, Msg::WalletMissing);
    assert!(effects.is_empty());
    assert_eq!(*state.session(), SessionState::Disconnected);
    assert_eq!(state.view().alert.as_deref(), Some(WALLET_MISSING_ALERT));
}

#[test]
fn wallet_installed_after_launch_can_still_connect() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(state, Msg::WalletMissing);
    let (state, effects) = update(state, Msg::ConnectClicked);
    assert_eq!(effects, vec![Effect::ConnectWallet]);

    let (state, effects) = update(state, connected(KEY, false));

    assert_eq!(effects, vec![Effect::FetchList]);
    assert_eq!(state.wallet(), WalletPresence::Present);
    let view = state.view();
    assert!(view.alert.is_none());
    assert!(!view.show_connect);
}

#[test]
fn interactive_connect_emits_effect_and_then_fetches() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::ConnectClicked);
    assert_eq!(effects, vec![Effect::ConnectWallet]);
    assert_eq!(*state.session(), SessionState::Connecting { silent: false });

    // Clicking again while the prompt is open does nothing.
    let (state, effects) = update(state, Msg::ConnectClicked);
    assert!(effects.is_empty());

    let (state, effects) = update(state, connected(KEY, false));
    assert_eq!(effects, vec![Effect::FetchList]);
    assert!(!state.view().show_connect);
}

#[test]
fn silent_reconnect_failure_leaves_session_unset() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (mut state, effects) = update(
        state,
        Msg::WalletConnectFailed {
            reason: "site is not trusted".to_string(),
            silent: true,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(*state.session(), SessionState::Disconnected);
    assert!(state.view().alert.is_none());
    assert!(state.consume_dirty());

    let (_, effects) = update(state, Msg::ConnectClicked);
    assert_eq!(effects, vec![Effect::ConnectWallet]);
}

#[test]
fn started_twice_does_not_reconnect_again() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(state, connected(KEY, true));

    let (_, effects) = update(state, Msg::Started);
    assert!(effects.is_empty());
}
