use std::cell::RefCell;
use std::rc::Rc;

use passport_common::address::{format_address, WalletId};
use passport_common::config::PassportConfig;
use passport_common::mock_data;
use passport_common::wallet_extension::MockExtension;
use passport_common::wallet_session::{ConnectOutcome, SessionSnapshot, WalletSession};
use tracing::{info, warn};

/// How the mock extension should behave for one run.
#[derive(Clone, Debug, Default)]
pub struct WalletScript {
    pub missing: bool,
    /// Address for the default wallet; the demo account when unset.
    pub address: Option<String>,
    pub pre_authorized: bool,
    pub fail_connect: bool,
    pub switch_to: Option<WalletId>,
}

impl WalletScript {
    fn extension(&self, default_wallet: WalletId) -> MockExtension {
        if self.missing {
            return MockExtension::missing();
        }
        let mut ext = mock_data::DEMO_ADDRESSES
            .iter()
            .fold(MockExtension::installed(), |ext, (wallet, address)| {
                ext.with_address(*wallet, *address)
            });
        if let Some(address) = &self.address {
            ext = ext.with_address(default_wallet, address.clone());
        }
        if self.pre_authorized {
            ext = ext.pre_authorized();
        }
        ext.set_fail_get_address(self.fail_connect);
        ext
    }
}

/// Walk a session through initialize, connect, an optional switch and
/// disconnect. Returns one line per state change or address notification.
///
/// Session errors are recorded in the transcript; they never abort the run.
pub async fn run_wallet_flow(config: &PassportConfig, script: &WalletScript) -> Vec<String> {
    let transcript = Rc::new(RefCell::new(Vec::new()));
    let session = WalletSession::new(
        script.extension(config.default_wallet),
        config.install_url.clone(),
        config.default_wallet,
    );

    let log = Rc::clone(&transcript);
    session.observe(move |snap: &SessionSnapshot| log.borrow_mut().push(describe(snap)));
    let log = Rc::clone(&transcript);
    session.on_address_change(move |address: &str| {
        let shown = if address.is_empty() { "(none)".to_string() } else { format_address(address) };
        log.borrow_mut().push(format!("address -> {shown}"));
    });

    session.initialize().await;

    if session.snapshot().address.is_none() {
        match session.connect().await {
            Ok(ConnectOutcome::Connected(address)) => info!(address = %format_address(&address), "connected"),
            Ok(outcome) => info!(?outcome, "connect did not complete"),
            Err(e) => {
                warn!("connect failed: {e}");
                transcript.borrow_mut().push(format!("error: {e}"));
            }
        }
    }

    if let Some(wallet) = script.switch_to {
        match session.switch_account(wallet).await {
            Ok(outcome) => info!(?outcome, wallet = wallet.as_str(), "switched"),
            Err(e) => {
                warn!("switch failed: {e}");
                transcript.borrow_mut().push(format!("error: {e}"));
            }
        }
    }

    session.disconnect();

    transcript.take()
}

fn describe(snap: &SessionSnapshot) -> String {
    let address = snap.address.as_deref().map(format_address).unwrap_or_else(|| "-".into());
    let mut line = format!(
        "{:?} wallet={} address={}",
        snap.connection_state,
        snap.active_wallet.as_str(),
        address
    );
    if let Some(err) = &snap.last_error {
        line.push_str(&format!(" error=\"{err}\""));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn missing_extension_reports_install_url() {
        let cfg = PassportConfig::default();
        let script = WalletScript { missing: true, ..WalletScript::default() };
        let lines = block_on(run_wallet_flow(&cfg, &script));
        assert!(lines.iter().any(|l| l.contains("freighter.app")));
        assert!(!lines.iter().any(|l| l.starts_with("address -> G")));
    }
}
