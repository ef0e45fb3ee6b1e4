use portal_core::{AppViewModel, EntryView, ListView, NoticeLevel};

use super::constants::*;

/// One printable element of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Header { title: String, subtitle: String },
    Alert { text: String },
    Notice { level: NoticeLevel, text: String },
    ConnectButton { label: String, enabled: bool },
    Identity { address: String },
    /// A transaction or its follow-up refresh is in flight.
    Busy { label: String },
    InitializeButton { label: String, fetch_error: Option<String> },
    Loading,
    Form { draft: String, busy: bool },
    Grid { rows: Vec<String> },
}

/// Builds a full frame; the caller prints it top to bottom.
#[allow(clippy::vec_init_then_push)]
pub fn render(view: &AppViewModel) -> Vec<UiCommand> {
    let mut cmds = Vec::new();

    cmds.push(UiCommand::Header {
        title: TITLE.to_string(),
        subtitle: SUBTITLE.to_string(),
    });

    if let Some(alert) = &view.alert {
        cmds.push(UiCommand::Alert {
            text: alert.clone(),
        });
    }
    if let Some(notice) = &view.notice {
        cmds.push(UiCommand::Notice {
            level: notice.level,
            text: notice.text.clone(),
        });
    }

    if view.show_connect {
        let label = if view.connecting {
            CONNECTING_LABEL
        } else {
            CONNECT_LABEL
        };
        cmds.push(UiCommand::ConnectButton {
            label: label.to_string(),
            enabled: !view.connecting,
        });
        return cmds;
    }

    if let Some(address) = &view.wallet_address_short {
        cmds.push(UiCommand::Identity {
            address: address.clone(),
        });
    }
    if view.busy {
        cmds.push(UiCommand::Busy {
            label: BUSY_LABEL.to_string(),
        });
    }

    match &view.list {
        ListView::Hidden => {}
        ListView::Loading => cmds.push(UiCommand::Loading),
        ListView::NeedsInitialization { fetch_error } => {
            cmds.push(UiCommand::InitializeButton {
                label: INITIALIZE_LABEL.to_string(),
                fetch_error: fetch_error.clone(),
            });
        }
        ListView::Ready { entries } => {
            cmds.push(UiCommand::Form {
                draft: view.draft.clone(),
                busy: view.busy,
            });
            cmds.push(UiCommand::Grid {
                rows: entries.iter().map(format_entry_row).collect(),
            });
        }
    }

    cmds
}

fn format_entry_row(entry: &EntryView) -> String {
    match &entry.host {
        Some(host) => format!("[{}] {} ({})", entry.index + 1, entry.link, host),
        None => format!("[{}] {}", entry.index + 1, entry.link),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{update, AppState, Entry, ListFetch, Msg, MutationKind};
    use pretty_assertions::assert_eq;

    const KEY: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";

    fn drive(msgs: Vec<Msg>) -> AppViewModel {
        let mut state = AppState::new();
        for msg in msgs {
            state = update(state, msg).0;
        }
        state.view()
    }

    fn connected() -> Msg {
        Msg::WalletConnected {
            public_key: KEY.to_string(),
            silent: false,
        }
    }

    #[test]
    fn disconnected_frame_offers_only_the_connect_button() {
        let cmds = render(&drive(vec![]));

        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[1],
            UiCommand::ConnectButton {
                label: CONNECT_LABEL.to_string(),
                enabled: true
            }
        );
    }

    #[test]
    fn connecting_disables_the_button() {
        let cmds = render(&drive(vec![Msg::Started]));

        assert!(cmds.contains(&UiCommand::ConnectButton {
            label: CONNECTING_LABEL.to_string(),
            enabled: false
        }));
    }

    #[test]
    fn missing_wallet_shows_the_alert() {
        let cmds = render(&drive(vec![Msg::Started, Msg::WalletMissing]));

        assert!(matches!(&cmds[1], UiCommand::Alert { .. }));
    }

    #[test]
    fn uninitialized_account_shows_the_initialize_button() {
        let cmds = render(&drive(vec![
            connected(),
            Msg::ListFetched(ListFetch::Uninitialized),
        ]));

        assert_eq!(
            cmds.last(),
            Some(&UiCommand::InitializeButton {
                label: INITIALIZE_LABEL.to_string(),
                fetch_error: None
            })
        );
        assert!(cmds.contains(&UiCommand::Identity {
            address: "9xQeWvG816...Zb9PusVFin".to_string()
        }));
    }

    #[test]
    fn failed_fetch_still_offers_initialization_with_the_reason() {
        let cmds = render(&drive(vec![
            connected(),
            Msg::ListFetched(ListFetch::Failed("rpc endpoint unreachable".to_string())),
        ]));

        assert_eq!(
            cmds.last(),
            Some(&UiCommand::InitializeButton {
                label: INITIALIZE_LABEL.to_string(),
                fetch_error: Some("rpc endpoint unreachable".to_string())
            })
        );
    }

    #[test]
    fn initialization_in_flight_shows_busy_indicator() {
        let cmds = render(&drive(vec![
            connected(),
            Msg::ListFetched(ListFetch::Uninitialized),
            Msg::InitializeClicked,
        ]));

        let identity = cmds
            .iter()
            .position(|cmd| matches!(cmd, UiCommand::Identity { .. }))
            .unwrap();
        assert_eq!(
            cmds[identity + 1],
            UiCommand::Busy {
                label: BUSY_LABEL.to_string()
            }
        );
        assert!(matches!(cmds.last(), Some(UiCommand::InitializeButton { .. })));
    }

    #[test]
    fn follow_up_refresh_keeps_busy_indicator_until_list_arrives() {
        let msgs = vec![
            connected(),
            Msg::ListFetched(ListFetch::Uninitialized),
            Msg::InitializeClicked,
            Msg::MutationSucceeded {
                kind: MutationKind::Initialize,
            },
        ];
        let cmds = render(&drive(msgs.clone()));
        assert!(cmds.iter().any(|cmd| matches!(cmd, UiCommand::Busy { .. })));

        let mut done = msgs;
        done.push(Msg::ListFetched(ListFetch::Loaded(Vec::new())));
        let cmds = render(&drive(done));
        assert!(!cmds.iter().any(|cmd| matches!(cmd, UiCommand::Busy { .. })));
    }

    #[test]
    fn idle_session_has_no_busy_indicator() {
        let cmds = render(&drive(vec![
            connected(),
            Msg::ListFetched(ListFetch::Uninitialized),
        ]));
        assert!(!cmds.iter().any(|cmd| matches!(cmd, UiCommand::Busy { .. })));
    }

    #[test]
    fn loaded_list_renders_form_and_numbered_rows() {
        let cmds = render(&drive(vec![
            connected(),
            Msg::ListFetched(ListFetch::Loaded(vec![
                Entry::new("https://media.example/a.gif"),
                Entry::new("not a url"),
            ])),
            Msg::DraftChanged("http://x/y.gif".to_string()),
        ]));

        let n = cmds.len();
        assert_eq!(
            cmds[n - 2],
            UiCommand::Form {
                draft: "http://x/y.gif".to_string(),
                busy: false
            }
        );
        assert_eq!(
            cmds[n - 1],
            UiCommand::Grid {
                rows: vec![
                    "[1] https://media.example/a.gif (media.example)".to_string(),
                    "[2] not a url".to_string(),
                ]
            }
        );
    }
}
