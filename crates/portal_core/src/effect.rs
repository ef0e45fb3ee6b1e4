/// Side effects requested by [`crate::update`]; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Connect without prompting; only succeeds for an already trusted site.
    ReconnectSilently,
    /// Connect interactively; the wallet prompts the user.
    ConnectWallet,
    /// Replace the entry list with a fresh snapshot of the base account.
    FetchList,
    /// One-time creation of the base account.
    InitializeAccount,
    /// Append a link to the base account's list.
    SubmitEntry { link: String },
}
