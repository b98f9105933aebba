//! Connection state for a browser wallet extension.
//!
//! `WalletSession` owns the only copy of the connected address. Hosts read it
//! through snapshots and learn about changes through two observers: the
//! address listener (fires when the visible address changes, `""` meaning no
//! address) and the state observer (fires on every transition so a view can
//! re-render).
//!
//! All methods take `&self` and never hold a borrow across an `.await`, so a
//! session can be shared (`Rc`) between the handlers of one event loop.

use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::address::WalletId;
use crate::wallet_extension::{ExtensionError, WalletExtension};

pub const CONNECT_FAILED_MESSAGE: &str = "Failed to connect wallet. Please try again.";
pub const SWITCH_FAILED_MESSAGE: &str = "Failed to switch wallet. Please try again.";
pub const EXTENSION_MISSING_MESSAGE: &str = "Wallet extension not found. Install it to connect.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Errors surfaced by session operations. Never fatal to the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WalletError {
    #[error("wallet extension missing; install from {install_url}")]
    ExtensionMissing { install_url: String },
    #[error("wallet connection failed: {0}")]
    ConnectionFailed(String),
    #[error("wallet switch failed: {0}")]
    SwitchFailed(String),
}

/// What a successful `connect`/`switch_account` call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(String),
    /// Another request was outstanding; nothing was sent to the extension.
    AlreadyPending,
    /// `disconnect` ran while the request was in flight; its result was dropped.
    Superseded,
}

/// Externally visible session state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub address: Option<String>,
    pub connection_state: ConnectionState,
    pub last_error: Option<String>,
    pub extension_missing: bool,
    pub active_wallet: WalletId,
}

impl SessionSnapshot {
    pub fn is_busy(&self) -> bool {
        self.connection_state == ConnectionState::Connecting
    }

    /// Address as carried by change notifications.
    pub fn address_str(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }
}

type AddressListener = Box<dyn FnMut(&str)>;
type StateObserver = Box<dyn FnMut(&SessionSnapshot)>;

pub struct WalletSession<E> {
    extension: E,
    install_url: String,
    state: RefCell<SessionSnapshot>,
    /// Bumped by `disconnect`; in-flight requests from an older generation are discarded.
    generation: Cell<u64>,
    address_listener: RefCell<Option<AddressListener>>,
    state_observers: RefCell<Vec<StateObserver>>,
}

impl<E: WalletExtension> WalletSession<E> {
    pub fn new(extension: E, install_url: impl Into<String>, default_wallet: WalletId) -> Self {
        Self {
            extension,
            install_url: install_url.into(),
            state: RefCell::new(SessionSnapshot {
                active_wallet: default_wallet,
                ..SessionSnapshot::default()
            }),
            generation: Cell::new(0),
            address_listener: RefCell::new(None),
            state_observers: RefCell::new(Vec::new()),
        }
    }

    pub fn extension(&self) -> &E {
        &self.extension
    }

    pub fn install_url(&self) -> &str {
        &self.install_url
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Register the single address listener, replacing any previous one.
    pub fn on_address_change(&self, listener: impl FnMut(&str) + 'static) {
        *self.address_listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn observe(&self, observer: impl FnMut(&SessionSnapshot) + 'static) {
        self.state_observers.borrow_mut().push(Box::new(observer));
    }

    /// Query the extension and silently adopt an already-authorized address.
    ///
    /// The session reads `Connecting` until the check settles, so a
    /// `connect()` issued meanwhile reports `AlreadyPending`.
    pub async fn initialize(&self) {
        if self.state.borrow().connection_state == ConnectionState::Connecting {
            debug!("wallet request already in flight; skipping startup check");
            return;
        }
        let generation = self.generation.get();
        self.update(|s| {
            s.connection_state = ConnectionState::Connecting;
            s.last_error = None;
        });

        match self.extension.is_connected().await {
            Err(ExtensionError::NotInstalled) => {
                info!("wallet extension not detected");
                self.update(|s| {
                    s.extension_missing = true;
                    s.connection_state = ConnectionState::Error;
                    s.last_error = Some(EXTENSION_MISSING_MESSAGE.into());
                });
            }
            Err(e) => {
                warn!("wallet status check failed: {e}");
                self.finish_initialize(generation);
            }
            Ok(status) => {
                if !status.is_connected {
                    debug!("wallet extension present, page not yet authorized");
                    self.finish_initialize(generation);
                    return;
                }
                let result = self.extension.get_address().await;
                if self.generation.get() != generation {
                    return;
                }
                match result {
                    Ok(resp) if !resp.address.is_empty() => {
                        debug!("adopting previously authorized address");
                        self.set_connected(resp.address);
                    }
                    Ok(_) => {
                        debug!("authorized extension returned no address");
                        self.finish_initialize(generation);
                    }
                    Err(e) => {
                        debug!("silent address lookup failed: {e}");
                        self.finish_initialize(generation);
                    }
                }
            }
        }
    }

    /// Leave `Connecting` after a startup check that adopted nothing.
    fn finish_initialize(&self, generation: u64) {
        if self.generation.get() != generation {
            return;
        }
        self.update(|s| {
            s.extension_missing = false;
            if s.connection_state == ConnectionState::Connecting {
                s.connection_state = if s.address.is_some() {
                    ConnectionState::Connected
                } else {
                    ConnectionState::Disconnected
                };
            }
        });
    }

    /// Request the address from the extension.
    ///
    /// Returns `AlreadyPending` without touching the extension while another
    /// request is outstanding.
    pub async fn connect(&self) -> Result<ConnectOutcome, WalletError> {
        let Some(generation) = self.begin_request()? else {
            return Ok(ConnectOutcome::AlreadyPending);
        };
        self.fetch_address(generation).await
    }

    /// Ask the extension to change its active wallet, then reconnect.
    pub async fn switch_account(&self, wallet: WalletId) -> Result<ConnectOutcome, WalletError> {
        let Some(generation) = self.begin_request()? else {
            return Ok(ConnectOutcome::AlreadyPending);
        };
        if let Err(e) = self.extension.set_wallet(wallet).await {
            warn!(wallet = wallet.as_str(), "wallet switch error: {e}");
            if self.generation.get() == generation {
                self.update(|s| {
                    s.connection_state = ConnectionState::Error;
                    s.last_error = Some(SWITCH_FAILED_MESSAGE.into());
                });
            }
            return Err(WalletError::SwitchFailed(e.to_string()));
        }
        if self.generation.get() == generation {
            self.update(|s| s.active_wallet = wallet);
        }
        self.fetch_address(generation).await
    }

    /// Forget the local address. Extension-side authorization is left alone.
    pub fn disconnect(&self) {
        self.generation.set(self.generation.get() + 1);
        self.update(|s| {
            s.address = None;
            if s.extension_missing {
                s.connection_state = ConnectionState::Error;
                s.last_error = Some(EXTENSION_MISSING_MESSAGE.into());
            } else {
                s.connection_state = ConnectionState::Disconnected;
                s.last_error = None;
            }
        });
        debug!("wallet disconnected locally");
        self.notify_address("");
    }

    pub fn dismiss_error(&self) {
        self.update(|s| {
            if s.extension_missing {
                return;
            }
            s.last_error = None;
            if s.connection_state == ConnectionState::Error {
                s.connection_state = if s.address.is_some() {
                    ConnectionState::Connected
                } else {
                    ConnectionState::Disconnected
                };
            }
        });
    }

    /// Enter `Connecting`. `Ok(None)` means a request is already outstanding.
    fn begin_request(&self) -> Result<Option<u64>, WalletError> {
        let mut state = self.state.borrow_mut();
        if state.extension_missing {
            return Err(WalletError::ExtensionMissing {
                install_url: self.install_url.clone(),
            });
        }
        if state.connection_state == ConnectionState::Connecting {
            debug!("wallet request already in flight; ignoring");
            return Ok(None);
        }
        state.connection_state = ConnectionState::Connecting;
        state.last_error = None;
        drop(state);
        self.publish();
        Ok(Some(self.generation.get()))
    }

    async fn fetch_address(&self, generation: u64) -> Result<ConnectOutcome, WalletError> {
        let result = self.extension.get_address().await;
        if self.generation.get() != generation {
            debug!("discarding wallet response after disconnect");
            return Ok(ConnectOutcome::Superseded);
        }
        match result {
            Ok(resp) if !resp.address.is_empty() => {
                info!(wallet = self.extension.extension_name(), "wallet connected");
                self.set_connected(resp.address.clone());
                Ok(ConnectOutcome::Connected(resp.address))
            }
            Ok(_) => {
                warn!("wallet connection error: extension returned no address");
                self.fail_connect();
                Err(WalletError::ConnectionFailed("no address returned".into()))
            }
            Err(ExtensionError::NotInstalled) => {
                warn!("wallet extension disappeared during connect");
                self.update(|s| {
                    s.extension_missing = true;
                    s.connection_state = ConnectionState::Error;
                    s.last_error = Some(EXTENSION_MISSING_MESSAGE.into());
                });
                Err(WalletError::ExtensionMissing {
                    install_url: self.install_url.clone(),
                })
            }
            Err(e) => {
                warn!("wallet connection error: {e}");
                self.fail_connect();
                Err(WalletError::ConnectionFailed(e.to_string()))
            }
        }
    }

    fn fail_connect(&self) {
        self.update(|s| {
            s.connection_state = ConnectionState::Error;
            s.last_error = Some(CONNECT_FAILED_MESSAGE.into());
        });
    }

    fn set_connected(&self, address: String) {
        let changed = self.state.borrow().address.as_deref() != Some(address.as_str());
        self.update(|s| {
            s.address = Some(address.clone());
            s.connection_state = ConnectionState::Connected;
            s.last_error = None;
        });
        if changed {
            self.notify_address(&address);
        }
    }

    fn update(&self, f: impl FnOnce(&mut SessionSnapshot)) {
        f(&mut self.state.borrow_mut());
        self.publish();
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        for observer in self.state_observers.borrow_mut().iter_mut() {
            observer(&snapshot);
        }
    }

    fn notify_address(&self, address: &str) {
        if let Some(listener) = self.address_listener.borrow_mut().as_mut() {
            listener(address);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;
    use crate::wallet_extension::MockExtension;

    const ADDR: &str = "GCKFBEIYV2U22IO2BJ4KVJOIP7XPWQGQFKKWXR6DOSJBV7STMAQSMTGG";
    const XBULL_ADDR: &str = "GBXBULLXBULLXBULLXBULLXBULLXBULLXBULLXBULLXBULLXBULL1234";
    const INSTALL: &str = "https://www.freighter.app/";

    fn session(ext: MockExtension) -> WalletSession<MockExtension> {
        WalletSession::new(ext, INSTALL, WalletId::Freighter)
    }

    fn recorded(session: &WalletSession<MockExtension>) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        session.on_address_change(move |a| sink.borrow_mut().push(a.to_string()));
        seen
    }

    #[test]
    fn missing_extension_shows_install_prompt() {
        let s = session(MockExtension::missing());
        block_on(s.initialize());
        let snap = s.snapshot();
        assert_eq!(snap.connection_state, ConnectionState::Error);
        assert!(snap.extension_missing);
        assert!(snap.address.is_none());
    }

    #[test]
    fn connect_without_extension_points_to_install_page() {
        let s = session(MockExtension::missing());
        let seen = recorded(&s);
        block_on(s.initialize());
        let err = block_on(s.connect()).unwrap_err();
        assert_eq!(
            err,
            WalletError::ExtensionMissing {
                install_url: INSTALL.into()
            }
        );
        assert!(s.snapshot().address.is_none());
        assert!(seen.borrow().is_empty());
        assert_eq!(s.extension().address_calls(), 0);
    }

    #[test]
    fn initialize_adopts_authorized_address_silently() {
        let ext = MockExtension::installed()
            .with_address(WalletId::Freighter, ADDR)
            .pre_authorized();
        let s = session(ext);
        let seen = recorded(&s);
        block_on(s.initialize());
        assert_eq!(s.snapshot().connection_state, ConnectionState::Connected);
        assert_eq!(s.snapshot().address.as_deref(), Some(ADDR));
        assert_eq!(*seen.borrow(), vec![ADDR.to_string()]);
    }

    #[test]
    fn initialize_without_authorization_stays_disconnected() {
        let ext = MockExtension::installed().with_address(WalletId::Freighter, ADDR);
        let s = session(ext);
        block_on(s.initialize());
        assert_eq!(s.snapshot().connection_state, ConnectionState::Disconnected);
        assert_eq!(s.extension().address_calls(), 0);
    }

    #[test]
    fn connect_sets_address_and_notifies() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        let seen = recorded(&s);
        block_on(s.initialize());
        let outcome = block_on(s.connect()).unwrap();
        assert_eq!(outcome, ConnectOutcome::Connected(ADDR.into()));
        assert_eq!(s.snapshot().connection_state, ConnectionState::Connected);
        assert_eq!(*seen.borrow(), vec![ADDR.to_string()]);
    }

    #[test]
    fn failed_connect_keeps_previous_address() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        block_on(s.connect()).unwrap();

        s.extension().set_fail_get_address(true);
        let err = block_on(s.connect()).unwrap_err();
        assert!(matches!(err, WalletError::ConnectionFailed(_)));

        let snap = s.snapshot();
        assert_eq!(snap.connection_state, ConnectionState::Error);
        assert_eq!(snap.address.as_deref(), Some(ADDR));
        assert_eq!(snap.last_error.as_deref(), Some(CONNECT_FAILED_MESSAGE));
    }

    #[test]
    fn empty_address_is_a_connection_failure() {
        let s = session(MockExtension::installed());
        let err = block_on(s.connect()).unwrap_err();
        assert!(matches!(err, WalletError::ConnectionFailed(_)));
        assert!(s.snapshot().address.is_none());
    }

    #[test]
    fn dismiss_error_returns_to_previous_state() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        block_on(s.connect()).unwrap();
        s.extension().set_fail_get_address(true);
        let _ = block_on(s.connect());
        s.dismiss_error();
        let snap = s.snapshot();
        assert!(snap.last_error.is_none());
        assert_eq!(snap.connection_state, ConnectionState::Connected);
    }

    #[test]
    fn disconnect_always_notifies_empty_address() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        let seen = recorded(&s);

        // From a fresh session...
        s.disconnect();
        // ...and from a connected one.
        block_on(s.connect()).unwrap();
        s.disconnect();

        assert_eq!(s.snapshot().address_str(), "");
        assert_eq!(s.snapshot().connection_state, ConnectionState::Disconnected);
        assert_eq!(
            *seen.borrow(),
            vec![String::new(), ADDR.to_string(), String::new()]
        );
    }

    #[test]
    fn rapid_double_connect_sends_one_request() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        let release = s.extension().gate_next_address();

        let (first, second) = block_on(async {
            futures::join!(s.connect(), async {
                let second = s.connect().await;
                release.send(()).unwrap();
                second
            })
        });

        assert_eq!(first.unwrap(), ConnectOutcome::Connected(ADDR.into()));
        assert_eq!(second.unwrap(), ConnectOutcome::AlreadyPending);
        assert_eq!(s.extension().address_calls(), 1);
    }

    #[test]
    fn disconnect_during_connect_discards_result() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        let seen = recorded(&s);
        let release = s.extension().gate_next_address();

        let (outcome, ()) = block_on(async {
            futures::join!(s.connect(), async {
                assert!(s.snapshot().is_busy());
                s.disconnect();
                release.send(()).unwrap();
            })
        });

        assert_eq!(outcome.unwrap(), ConnectOutcome::Superseded);
        assert!(s.snapshot().address.is_none());
        assert_eq!(*seen.borrow(), vec![String::new()]);
    }

    #[test]
    fn switch_account_reconnects_with_new_wallet() {
        let ext = MockExtension::installed()
            .with_address(WalletId::Freighter, ADDR)
            .with_address(WalletId::XBull, XBULL_ADDR);
        let s = session(ext);
        let seen = recorded(&s);
        block_on(s.connect()).unwrap();

        let outcome = block_on(s.switch_account(WalletId::XBull)).unwrap();
        assert_eq!(outcome, ConnectOutcome::Connected(XBULL_ADDR.into()));
        assert_eq!(s.snapshot().active_wallet, WalletId::XBull);
        assert_eq!(*seen.borrow(), vec![ADDR.to_string(), XBULL_ADDR.to_string()]);
    }

    #[test]
    fn failed_switch_does_not_fall_back() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        block_on(s.connect()).unwrap();
        s.extension().set_fail_set_wallet(true);

        let err = block_on(s.switch_account(WalletId::Albedo)).unwrap_err();
        assert!(matches!(err, WalletError::SwitchFailed(_)));

        let snap = s.snapshot();
        assert_eq!(snap.connection_state, ConnectionState::Error);
        assert_eq!(snap.last_error.as_deref(), Some(SWITCH_FAILED_MESSAGE));
        assert_eq!(snap.active_wallet, WalletId::Freighter);
        assert_eq!(snap.address.as_deref(), Some(ADDR));
        assert_eq!(s.extension().address_calls(), 1);
    }

    #[test]
    fn observers_see_busy_state() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = states.clone();
        s.observe(move |snap| sink.borrow_mut().push(snap.connection_state));
        block_on(s.connect()).unwrap();
        let states = states.borrow();
        assert_eq!(states.first(), Some(&ConnectionState::Connecting));
        assert_eq!(states.last(), Some(&ConnectionState::Connected));
    }

    #[test]
    fn connect_during_initialize_is_already_pending() {
        let ext = MockExtension::installed()
            .with_address(WalletId::Freighter, ADDR)
            .pre_authorized();
        let s = session(ext);
        let release = s.extension().gate_next_address();

        let ((), during) = block_on(async {
            futures::join!(s.initialize(), async {
                assert!(s.snapshot().is_busy());
                let during = s.connect().await;
                release.send(()).unwrap();
                during
            })
        });

        assert_eq!(during.unwrap(), ConnectOutcome::AlreadyPending);
        assert_eq!(s.extension().address_calls(), 1);
        assert_eq!(s.snapshot().connection_state, ConnectionState::Connected);
        assert_eq!(s.snapshot().address.as_deref(), Some(ADDR));
    }

    #[test]
    fn unauthorized_startup_passes_through_busy_state() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = states.clone();
        s.observe(move |snap| sink.borrow_mut().push(snap.connection_state));
        block_on(s.initialize());
        assert_eq!(
            *states.borrow(),
            vec![ConnectionState::Connecting, ConnectionState::Disconnected]
        );
    }

    #[test]
    fn switch_during_connect_is_already_pending() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        let release = s.extension().gate_next_address();

        let (first, switched) = block_on(async {
            futures::join!(s.connect(), async {
                let switched = s.switch_account(WalletId::XBull).await;
                release.send(()).unwrap();
                switched
            })
        });

        assert_eq!(first.unwrap(), ConnectOutcome::Connected(ADDR.into()));
        assert_eq!(switched.unwrap(), ConnectOutcome::AlreadyPending);
        assert_eq!(s.extension().set_wallet_calls(), 0);
        assert_eq!(s.snapshot().active_wallet, WalletId::Freighter);
    }

    #[test]
    fn extension_removed_before_connect_shows_install_prompt() {
        let s = session(MockExtension::installed().with_address(WalletId::Freighter, ADDR));
        block_on(s.initialize());
        s.extension().set_installed(false);

        let err = block_on(s.connect()).unwrap_err();
        assert_eq!(
            err,
            WalletError::ExtensionMissing {
                install_url: INSTALL.into()
            }
        );
        let snap = s.snapshot();
        assert!(snap.extension_missing);
        assert_eq!(snap.connection_state, ConnectionState::Error);
        assert_eq!(snap.last_error.as_deref(), Some(EXTENSION_MISSING_MESSAGE));
    }

    #[test]
    fn disconnect_keeps_install_prompt_when_extension_missing() {
        let s = session(MockExtension::missing());
        block_on(s.initialize());
        s.disconnect();
        s.dismiss_error();

        let snap = s.snapshot();
        assert_eq!(snap.connection_state, ConnectionState::Error);
        assert_eq!(snap.last_error.as_deref(), Some(EXTENSION_MISSING_MESSAGE));
    }
}
