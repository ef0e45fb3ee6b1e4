use std::sync::Once;

use portal_core::{
    update, AppState, Effect, Entry, ListFetch, ListState, ListView, Msg, MutationKind, PendingOp,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(portal_logging::initialize_for_tests);
}

fn connected_state() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::WalletConnected {
            public_key: "Ab1...Z9".to_string(),
            silent: true,
        },
    );
    state
}

#[test]
fn list_is_loading_until_first_fetch_completes() {
    init_logging();
    let state = connected_state();

    assert_eq!(*state.list(), ListState::Unknown);
    assert_eq!(state.view().list, ListView::Loading);
}

#[test]
fn empty_loaded_list_renders_form_without_initialization() {
    init_logging();
    let (state, _) = update(connected_state(), Msg::ListFetched(ListFetch::Loaded(Vec::new())));

    let view = state.view();
    assert_eq!(view.wallet_address_short.as_deref(), Some("Ab1...Z9"));
    assert_eq!(view.list, ListView::Ready { entries: Vec::new() });
    assert!(!view.show_connect);
}

#[test]
fn fetch_failure_is_a_named_state_that_still_offers_initialization() {
    init_logging();
    let (state, _) = update(
        connected_state(),
        Msg::ListFetched(ListFetch::Failed("network error".to_string())),
    );

    assert_eq!(
        *state.list(),
        ListState::FetchFailed("network error".to_string())
    );
    assert_eq!(
        state.view().list,
        ListView::NeedsInitialization {
            fetch_error: Some("network error".to_string())
        }
    );
}

#[test]
fn uninitialized_account_offers_initialization() {
    init_logging();
    let (state, _) = update(connected_state(), Msg::ListFetched(ListFetch::Uninitialized));

    assert_eq!(
        state.view().list,
        ListView::NeedsInitialization { fetch_error: None }
    );
}

#[test]
fn initialize_success_moves_list_from_uninitialized_to_loaded() {
    init_logging();
    let (state, _) = update(connected_state(), Msg::ListFetched(ListFetch::Uninitialized));

    let (state, effects) = update(state, Msg::InitializeClicked);
    assert_eq!(effects, vec![Effect::InitializeAccount]);
    assert_eq!(state.pending(), Some(PendingOp::Initializing));
    assert!(state.view().busy);

    let (state, effects) = update(
        state,
        Msg::MutationSucceeded {
            kind: MutationKind::Initialize,
        },
    );
    assert_eq!(effects, vec![Effect::FetchList]);
    assert_eq!(state.pending(), Some(PendingOp::Refreshing));

    let (state, effects) = update(state, Msg::ListFetched(ListFetch::Loaded(Vec::new())));
    assert!(effects.is_empty());
    assert_eq!(*state.list(), ListState::Loaded(Vec::new()));
    assert_eq!(state.pending(), None);
    assert!(!state.view().busy);
}

#[test]
fn initialize_failure_clears_busy_and_keeps_list() {
    init_logging();
    let (state, _) = update(connected_state(), Msg::ListFetched(ListFetch::Uninitialized));
    let (state, _) = update(state, Msg::InitializeClicked);

    let (state, effects) = update(
        state,
        Msg::MutationFailed {
            kind: MutationKind::Initialize,
            reason: "account already in use".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.pending(), None);
    assert_eq!(*state.list(), ListState::Uninitialized);
    let notice = state.view().notice.expect("failure notice");
    assert!(notice.text.contains("account already in use"));
}

#[test]
fn initialize_has_no_local_duplicate_guard() {
    init_logging();
    let (state, _) = update(connected_state(), Msg::ListFetched(ListFetch::Loaded(Vec::new())));

    let (_, effects) = update(state, Msg::InitializeClicked);
    assert_eq!(effects, vec![Effect::InitializeAccount]);
}

#[test]
fn refreshing_twice_with_same_snapshot_is_idempotent() {
    init_logging();
    let snapshot = vec![
        Entry::new("https://a.example/1.gif"),
        Entry::new("https://b.example/2.gif"),
    ];
    let (state, _) = update(
        connected_state(),
        Msg::ListFetched(ListFetch::Loaded(snapshot.clone())),
    );

    let (state, effects) = update(state, Msg::RefreshClicked);
    assert_eq!(effects, vec![Effect::FetchList]);
    let first = state.list().clone();

    let (state, _) = update(state, Msg::ListFetched(ListFetch::Loaded(snapshot.clone())));
    assert_eq!(*state.list(), first);
    let (state, _) = update(state, Msg::ListFetched(ListFetch::Loaded(snapshot)));
    assert_eq!(*state.list(), first);
}

#[test]
fn manual_refresh_does_not_clear_an_in_flight_mutation() {
    init_logging();
    let (state, _) = update(connected_state(), Msg::ListFetched(ListFetch::Uninitialized));
    let (state, _) = update(state, Msg::InitializeClicked);

    let (state, _) = update(state, Msg::ListFetched(ListFetch::Uninitialized));

    assert_eq!(state.pending(), Some(PendingOp::Initializing));
}

#[test]
fn refresh_and_fetch_results_are_ignored_while_disconnected() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RefreshClicked);
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::ListFetched(ListFetch::Uninitialized));
    assert_eq!(*state.list(), ListState::Unknown);
    assert_eq!(state.view().list, ListView::Hidden);
}
