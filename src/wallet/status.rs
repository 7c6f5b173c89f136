use alloy_primitives::Address;

pub const CONNECT_LABEL: &str = "Connect Wallet to Get Started";
pub const CONNECTED_LABEL: &str = "Wallet Connected";
pub const NOT_CONNECTED_TEXT: &str = "Wallet not connected";

/// What the page shows about the wallet. Derived from the session, never
/// read back as state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletStatus {
    pub connected: bool,
    pub text: String,
    pub button_label: &'static str,
    pub button_enabled: bool,
}

impl WalletStatus {
    pub fn connected(address: Address) -> Self {
        Self {
            connected: true,
            text: format!("Connected: {}", short_address(&address)),
            button_label: CONNECTED_LABEL,
            button_enabled: false,
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            text: NOT_CONNECTED_TEXT.to_string(),
            button_label: CONNECT_LABEL,
            button_enabled: true,
        }
    }
}

/// `0xAbCd...1234` form of a checksummed address
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Where the bridge renders status and raises blocking notifications
pub trait WalletView: Send + Sync {
    fn show_status(&self, status: &WalletStatus);

    fn alert(&self, message: &str);
}

/// Terminal rendition of the wallet widgets
#[derive(Default)]
pub struct ConsoleView;

impl WalletView for ConsoleView {
    fn show_status(&self, status: &WalletStatus) {
        let marker = if status.connected { "🟢" } else { "⚪" };
        let button = if status.button_enabled {
            status.button_label.to_string()
        } else {
            format!("{} (disabled)", status.button_label)
        };
        println!("{} {}  [{}]", marker, status.text, button);
    }

    fn alert(&self, message: &str) {
        println!("\n⚠️  {}\n", message);
    }
}
