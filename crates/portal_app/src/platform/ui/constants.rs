pub const TITLE: &str = "🖼 GIF Portal";
pub const SUBTITLE: &str = "View your GIF collection in the metaverse ✨";
pub const CONNECT_LABEL: &str = "Connect to Wallet  (/connect)";
pub const CONNECTING_LABEL: &str = "Connecting to wallet...";
pub const INITIALIZE_LABEL: &str =
    "Do One-Time Initialization For GIF Program Account  (/init)";
pub const RETRY_HINT: &str = "Try /refresh, or /init if the account was never created.";
pub const INPUT_PLACEHOLDER: &str = "Enter gif link!";
pub const SUBMIT_LABEL: &str = "Submit  (type a link and press Enter)";
pub const BUSY_LABEL: &str = "Working...";
pub const LOADING_LABEL: &str = "Loading GIFs...";
pub const EMPTY_LIST_LABEL: &str = "No GIFs yet. Be the first!";
pub const ALERT_HINT: &str = "(/dismiss to close)";

pub const HELP_TEXT: &str = "\
Commands:
  <link>          submit a GIF link
  /connect        connect your wallet
  /init           create the GIF program account
  /refresh        reload the list
  /draft <text>   edit the input box without submitting
  /submit         submit the current input box
  /dismiss        close the alert
  /help           show this help
  /quit           exit";
