use crate::view_model::{AppViewModel, EntryView, ListView, Notice, NoticeLevel};
use crate::{short_address, ListFetch};

/// One link stored in the base account's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub link: String,
}

impl Entry {
    pub fn new(link: impl Into<String>) -> Self {
        Self { link: link.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalletPresence {
    #[default]
    Unknown,
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting {
        silent: bool,
    },
    Connected {
        public_key: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    /// No fetch has completed for this session.
    #[default]
    Unknown,
    Loaded(Vec<Entry>),
    Uninitialized,
    FetchFailed(String),
}

/// Mutating work currently in flight. Only one may be pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    Initializing,
    Submitting,
    /// The list refresh that follows a successful mutation.
    Refreshing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    wallet: WalletPresence,
    session: SessionState,
    list: ListState,
    draft: String,
    pending: Option<PendingOp>,
    alert: Option<String>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let public_key = self.public_key();
        let connected = public_key.is_some();
        let list = match (&self.session, &self.list) {
            (SessionState::Connected { .. }, ListState::Unknown) => ListView::Loading,
            (SessionState::Connected { .. }, ListState::Loaded(entries)) => ListView::Ready {
                entries: entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| EntryView::new(index, &entry.link))
                    .collect(),
            },
            (SessionState::Connected { .. }, ListState::Uninitialized) => {
                ListView::NeedsInitialization { fetch_error: None }
            }
            (SessionState::Connected { .. }, ListState::FetchFailed(reason)) => {
                ListView::NeedsInitialization {
                    fetch_error: Some(reason.clone()),
                }
            }
            _ => ListView::Hidden,
        };

        AppViewModel {
            wallet_address: public_key.map(str::to_owned),
            wallet_address_short: public_key.map(short_address),
            show_connect: !connected,
            connecting: matches!(self.session, SessionState::Connecting { .. }),
            alert: self.alert.clone(),
            notice: self.notice.clone(),
            list,
            draft: self.draft.clone(),
            busy: connected && self.pending.is_some(),
            dirty: self.dirty,
        }
    }

    pub fn wallet(&self) -> WalletPresence {
        self.wallet
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn pending(&self) -> Option<PendingOp> {
        self.pending
    }

    pub fn public_key(&self) -> Option<&str> {
        match &self.session {
            SessionState::Connected { public_key } => Some(public_key),
            _ => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.public_key().is_some()
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_connect(&mut self, silent: bool) {
        self.session = SessionState::Connecting { silent };
        self.mark_dirty();
    }

    /// Returns true when this call moved the session from unset to set.
    pub(crate) fn connected(&mut self, public_key: String) -> bool {
        self.wallet = WalletPresence::Present;
        let was_connected = self.is_connected();
        if !was_connected {
            self.session = SessionState::Connected { public_key };
            self.alert = None;
            self.mark_dirty();
        }
        !was_connected
    }

    pub(crate) fn connect_failed(&mut self) {
        if matches!(self.session, SessionState::Connecting { .. }) {
            self.session = SessionState::Disconnected;
            self.mark_dirty();
        }
    }

    pub(crate) fn wallet_missing(&mut self, alert: &str) {
        self.wallet = WalletPresence::Absent;
        self.connect_failed();
        self.alert = Some(alert.to_string());
        self.mark_dirty();
    }

    pub(crate) fn dismiss_alert(&mut self) {
        if self.alert.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        if self.draft != text {
            self.draft = text;
            self.mark_dirty();
        }
    }

    /// Clears the draft and hands back its previous content.
    pub(crate) fn take_draft(&mut self) -> String {
        self.mark_dirty();
        std::mem::take(&mut self.draft)
    }

    pub(crate) fn set_pending(&mut self, pending: Option<PendingOp>) {
        self.pending = pending;
        self.mark_dirty();
    }

    pub(crate) fn apply_fetch(&mut self, fetch: ListFetch) {
        self.list = match fetch {
            ListFetch::Loaded(entries) => ListState::Loaded(entries),
            ListFetch::Uninitialized => ListState::Uninitialized,
            ListFetch::Failed(reason) => ListState::FetchFailed(reason),
        };
        if self.pending == Some(PendingOp::Refreshing) {
            self.pending = None;
        }
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }
}
