use crate::Entry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished loading; try the silent reconnect.
    Started,
    /// User clicked "Connect to Wallet".
    ConnectClicked,
    /// No wallet provider was found.
    WalletMissing,
    /// Wallet accepted the connection.
    WalletConnected { public_key: String, silent: bool },
    /// Wallet rejected or failed the connection.
    WalletConnectFailed { reason: String, silent: bool },
    /// User edited the link input box.
    DraftChanged(String),
    /// User confirmed the submission form with the current draft.
    SubmitClicked,
    /// User clicked the one-time initialization button.
    InitializeClicked,
    /// User asked for a fresh copy of the list.
    RefreshClicked,
    /// User acknowledged the blocking alert.
    AlertDismissed,
    /// Result of a list fetch.
    ListFetched(ListFetch),
    /// A mutating remote call succeeded.
    MutationSucceeded { kind: MutationKind },
    /// A mutating remote call failed.
    MutationFailed { kind: MutationKind, reason: String },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Outcome of reading the base account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListFetch {
    Loaded(Vec<Entry>),
    /// The account does not exist on chain yet.
    Uninitialized,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Initialize,
    Submit,
}
