//! The browser wallet extension as seen from the dashboard.
//!
//! Only three calls are consumed: a connection status check, an address lookup and
//! (for multi-wallet kits) a wallet switch. The extension's own messaging
//! protocol is out of scope; implementations translate these calls to
//! whatever the host provides.

use serde::{Deserialize, Serialize};

use crate::address::WalletId;

/// Response shape of `isConnected()`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub is_connected: bool,
}

/// Response shape of `getAddress()`. An empty address means "not authorized".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    #[serde(default)]
    pub address: String,
}

/// Failures reported by an extension call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ExtensionError {
    #[error("wallet extension not installed")]
    NotInstalled,
    #[error("request rejected by user: {0}")]
    Rejected(String),
    #[error("extension call failed: {0}")]
    Failed(String),
}

/// Abstraction over a browser-extension-style signing wallet.
///
/// `is_connected` answers whether this page is already authorized;
/// an absent extension is reported as `ExtensionError::NotInstalled`.
#[allow(async_fn_in_trait)]
pub trait WalletExtension {
    async fn is_connected(&self) -> Result<ConnectionStatus, ExtensionError>;

    async fn get_address(&self) -> Result<AddressResponse, ExtensionError>;

    /// Change the extension's active wallet/account.
    async fn set_wallet(&self, wallet: WalletId) -> Result<(), ExtensionError>;

    /// Human-readable name (e.g. "freighter", "mock").
    fn extension_name(&self) -> &str;
}

#[cfg(any(test, feature = "dev"))]
pub use mock::MockExtension;

#[cfg(any(test, feature = "dev"))]
mod mock {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use futures::channel::oneshot;

    use super::*;

    /// Scripted extension for development and tests.
    ///
    /// Connecting authorizes the page, so a later `is_connected` call
    /// reports `true` the way a real extension remembers the grant.
    pub struct MockExtension {
        installed: Cell<bool>,
        authorized: Cell<bool>,
        addresses: RefCell<HashMap<WalletId, String>>,
        active: Cell<WalletId>,
        fail_get_address: Cell<bool>,
        fail_set_wallet: Cell<bool>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
        address_calls: Cell<u32>,
        set_wallet_calls: Cell<u32>,
    }

    impl MockExtension {
        pub fn installed() -> Self {
            Self {
                installed: Cell::new(true),
                authorized: Cell::new(false),
                addresses: RefCell::new(HashMap::new()),
                active: Cell::new(WalletId::default()),
                fail_get_address: Cell::new(false),
                fail_set_wallet: Cell::new(false),
                gate: RefCell::new(None),
                address_calls: Cell::new(0),
                set_wallet_calls: Cell::new(0),
            }
        }

        pub fn missing() -> Self {
            let ext = Self::installed();
            ext.installed.set(false);
            ext
        }

        pub fn with_address(self, wallet: WalletId, address: impl Into<String>) -> Self {
            self.addresses.borrow_mut().insert(wallet, address.into());
            self
        }

        /// Page was authorized in an earlier visit.
        pub fn pre_authorized(self) -> Self {
            self.authorized.set(true);
            self
        }

        /// Simulate the extension being removed or added mid-session.
        pub fn set_installed(&self, installed: bool) {
            self.installed.set(installed);
        }

        pub fn set_fail_get_address(&self, fail: bool) {
            self.fail_get_address.set(fail);
        }

        pub fn set_fail_set_wallet(&self, fail: bool) {
            self.fail_set_wallet.set(fail);
        }

        /// Hold the next `get_address` call pending until the returned sender fires.
        pub fn gate_next_address(&self) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            *self.gate.borrow_mut() = Some(rx);
            tx
        }

        pub fn address_calls(&self) -> u32 {
            self.address_calls.get()
        }

        pub fn set_wallet_calls(&self) -> u32 {
            self.set_wallet_calls.get()
        }

        pub fn active_wallet(&self) -> WalletId {
            self.active.get()
        }
    }

    impl WalletExtension for MockExtension {
        async fn is_connected(&self) -> Result<ConnectionStatus, ExtensionError> {
            if !self.installed.get() {
                return Err(ExtensionError::NotInstalled);
            }
            Ok(ConnectionStatus {
                is_connected: self.authorized.get(),
            })
        }

        async fn get_address(&self) -> Result<AddressResponse, ExtensionError> {
            if !self.installed.get() {
                return Err(ExtensionError::NotInstalled);
            }
            self.address_calls.set(self.address_calls.get() + 1);

            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                // A dropped sender releases the call too.
                let _ = rx.await;
            }

            if self.fail_get_address.get() {
                return Err(ExtensionError::Failed("getAddress threw".into()));
            }
            let address = self
                .addresses
                .borrow()
                .get(&self.active.get())
                .cloned()
                .unwrap_or_default();
            if !address.is_empty() {
                self.authorized.set(true);
            }
            Ok(AddressResponse { address })
        }

        async fn set_wallet(&self, wallet: WalletId) -> Result<(), ExtensionError> {
            if !self.installed.get() {
                return Err(ExtensionError::NotInstalled);
            }
            self.set_wallet_calls.set(self.set_wallet_calls.get() + 1);
            if self.fail_set_wallet.get() {
                return Err(ExtensionError::Failed(format!(
                    "setWallet({}) threw",
                    wallet.as_str()
                )));
            }
            self.active.set(wallet);
            Ok(())
        }

        fn extension_name(&self) -> &str {
            "mock"
        }
    }
}
