//! Portal core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{ListFetch, MutationKind, Msg};
pub use state::{AppState, Entry, ListState, PendingOp, SessionState, WalletPresence};
pub use update::update;
pub use view_model::{
    short_address, AppViewModel, EntryView, ListView, Notice, NoticeLevel, WALLET_MISSING_ALERT,
};
