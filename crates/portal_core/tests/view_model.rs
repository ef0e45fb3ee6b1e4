use portal_core::{short_address, update, AppState, ListFetch, Msg};

#[test]
fn long_addresses_keep_ten_characters_each_side() {
    assert_eq!(
        short_address("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"),
        "9xQeWvG816...Zb9PusVFin"
    );
}

#[test]
fn short_addresses_are_shown_whole() {
    assert_eq!(short_address("Ab1...Z9"), "Ab1...Z9");
    assert_eq!(short_address(""), "");
}

#[test]
fn busy_indicator_needs_a_session() {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::WalletConnected {
            public_key: "Ab1...Z9".to_string(),
            silent: true,
        },
    );
    let (state, _) = update(state, Msg::ListFetched(ListFetch::Uninitialized));
    assert!(!state.view().busy);

    let (state, _) = update(state, Msg::InitializeClicked);
    let view = state.view();
    assert!(view.busy);
    assert_eq!(view.wallet_address.as_deref(), Some("Ab1...Z9"));
}

#[test]
fn non_http_links_have_no_host() {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::WalletConnected {
            public_key: "Ab1...Z9".to_string(),
            silent: false,
        },
    );
    let (state, _) = update(
        state,
        Msg::ListFetched(ListFetch::Loaded(vec![
            portal_core::Entry::new("not a url"),
            portal_core::Entry::new("https://media.example.com/cat.gif"),
        ])),
    );

    match state.view().list {
        portal_core::ListView::Ready { entries } => {
            assert_eq!(entries[0].host, None);
            assert_eq!(entries[1].host.as_deref(), Some("media.example.com"));
            assert_eq!(entries[1].index, 1);
        }
        other => panic!("unexpected list view: {other:?}"),
    }
}
