use passport_common::address::{format_address, WalletId};
use passport_common::config::PassportConfig;
use passport_common::mock_data::demo_address;
use passport_common::wallet_session::{CONNECT_FAILED_MESSAGE, SWITCH_FAILED_MESSAGE};
use passport_sim::{run_wallet_flow, WalletScript};

fn address_lines(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|l| l.strip_prefix("address -> "))
        .collect()
}

#[tokio::test]
async fn connect_then_disconnect_notifies_twice() {
    let lines = run_wallet_flow(&PassportConfig::default(), &WalletScript::default()).await;

    let freighter = format_address(demo_address(WalletId::Freighter));
    assert_eq!(address_lines(&lines), vec![freighter.as_str(), "(none)"]);
    assert!(lines.iter().any(|l| l.starts_with("Connecting")));
    assert!(lines.last().is_some_and(|l| l.starts_with("address -> ")));
}

#[tokio::test]
async fn pre_authorized_page_connects_silently() {
    let script = WalletScript {
        pre_authorized: true,
        address: Some("GAUTHORIZEDXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX".into()),
        ..WalletScript::default()
    };
    let lines = run_wallet_flow(&PassportConfig::default(), &script).await;

    // Only the startup check enters Connecting; no explicit connect follows it.
    assert_eq!(lines.iter().filter(|l| l.starts_with("Connecting")).count(), 1);
    assert!(!lines.iter().any(|l| l.contains("error")));
    assert_eq!(address_lines(&lines), vec!["GAUT...XXXX", "(none)"]);
}

#[tokio::test]
async fn switching_wallets_reports_the_new_account() {
    let script = WalletScript {
        switch_to: Some(WalletId::XBull),
        ..WalletScript::default()
    };
    let lines = run_wallet_flow(&PassportConfig::default(), &script).await;

    let xbull = format_address(demo_address(WalletId::XBull));
    assert!(address_lines(&lines).contains(&xbull.as_str()));
    assert!(lines.iter().any(|l| l.starts_with("Connected wallet=xbull")));
    assert!(!lines.iter().any(|l| l.contains(SWITCH_FAILED_MESSAGE)));
}

#[tokio::test]
async fn rejected_connect_surfaces_retry_message() {
    let script = WalletScript {
        fail_connect: true,
        ..WalletScript::default()
    };
    let lines = run_wallet_flow(&PassportConfig::default(), &script).await;

    assert!(lines.iter().any(|l| l.contains(CONNECT_FAILED_MESSAGE)));
    assert!(lines.iter().any(|l| l.starts_with("error: wallet connection failed")));
    assert_eq!(address_lines(&lines), vec!["(none)"]);
}

#[tokio::test]
async fn missing_extension_never_connects() {
    let script = WalletScript {
        missing: true,
        switch_to: Some(WalletId::Albedo),
        ..WalletScript::default()
    };
    let lines = run_wallet_flow(&PassportConfig::default(), &script).await;

    assert_eq!(address_lines(&lines), vec!["(none)"]);
    assert!(lines
        .iter()
        .any(|l| l.starts_with("error: wallet extension missing; install from https://www.freighter.app/")));
    assert!(lines.last().is_some_and(|l| l.starts_with("address -> ")));
}
