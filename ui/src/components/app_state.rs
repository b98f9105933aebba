use dioxus::prelude::*;

use passport_common::address::WalletId;
use passport_common::config::PassportConfig;
use passport_common::finance::FinanceBook;
use passport_common::mock_data;
use passport_common::passport::Document;
use passport_common::profile::{Preferences, Profile};

/// Global the wallet kit is exposed on unless overridden at build time.
pub const DEFAULT_WALLET_GLOBAL: &str = "stellarWalletsKit";

/// State shared by every page for the lifetime of the tab.
///
/// Nothing here is persisted; a reload starts from the mock seed again.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: PassportConfig,
    pub profile: Profile,
    pub preferences: Preferences,
    pub documents: Vec<Document>,
    /// Last address reported by a wallet widget; `None` once disconnected.
    pub wallet_address: Option<String>,
    pub finance: FinanceBook,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let mut finance = FinanceBook::new();
        // Admin is a placeholder until real roles exist.
        if let Err(e) = finance.initialize("platform-admin") {
            tracing::warn!("finance book: {e}");
        }
        Self {
            config: ui_config(),
            profile: mock_data::profile(),
            preferences: Preferences::default(),
            documents: mock_data::documents(),
            wallet_address: None,
            finance,
        }
    }

    /// Record the address a wallet widget reported. `""` means disconnected.
    pub fn set_wallet_address(&mut self, address: &str) {
        if address.is_empty() {
            self.wallet_address = None;
            return;
        }
        mock_data::seed_ledger(&mut self.finance, address);
        self.wallet_address = Some(address.to_string());
    }

    pub fn net_worth(&self) -> Option<i128> {
        self.wallet_address
            .as_deref()
            .map(|addr| self.finance.net_worth(addr))
    }
}

/// Defaults with build-time overrides.
pub fn ui_config() -> PassportConfig {
    let mut config = PassportConfig::default();
    if let Some(url) = option_env!("PASSPORT_WALLET_INSTALL_URL") {
        config.install_url = url.to_string();
    }
    if let Some(wallet) = option_env!("PASSPORT_DEFAULT_WALLET").and_then(WalletId::parse) {
        config.default_wallet = wallet;
    }
    config
}

#[cfg_attr(not(target_family = "wasm"), allow(dead_code))]
pub fn wallet_global() -> &'static str {
    option_env!("PASSPORT_WALLET_GLOBAL").unwrap_or(DEFAULT_WALLET_GLOBAL)
}

pub fn use_app_state() -> Signal<AppState> {
    use_context::<Signal<AppState>>()
}
