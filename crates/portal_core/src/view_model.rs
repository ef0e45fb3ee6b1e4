use url::Url;

/// Shown when no wallet provider answers on startup or on connect.
pub const WALLET_MISSING_ALERT: &str = "Wallet not found! Install and unlock a Phantom wallet.";

const ADDRESS_EDGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub wallet_address: Option<String>,
    pub wallet_address_short: Option<String>,
    pub show_connect: bool,
    pub connecting: bool,
    pub alert: Option<String>,
    pub notice: Option<Notice>,
    pub list: ListView,
    pub draft: String,
    pub busy: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListView {
    /// Nothing to show until a wallet is connected.
    #[default]
    Hidden,
    /// Connected, first fetch still outstanding.
    Loading,
    /// Offer the one-time initialization. `fetch_error` is set when the
    /// account state is unknown because the fetch itself failed.
    NeedsInitialization { fetch_error: Option<String> },
    Ready { entries: Vec<EntryView> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    /// Position in the account's list; doubles as the render key.
    pub index: usize,
    pub link: String,
    /// Host of the link when it parses as an http(s) URL.
    pub host: Option<String>,
}

impl EntryView {
    pub(crate) fn new(index: usize, link: &str) -> Self {
        let host = Url::parse(link)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .and_then(|url| url.host_str().map(ToOwned::to_owned));
        Self {
            index,
            link: link.to_string(),
            host,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// `first10...last10` for long addresses; short ones are shown whole.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= ADDRESS_EDGE * 2 + 3 {
        return address.to_string();
    }
    let head: String = chars[..ADDRESS_EDGE].iter().collect();
    let tail: String = chars[chars.len() - ADDRESS_EDGE..].iter().collect();
    format!("{head}...{tail}")
}
