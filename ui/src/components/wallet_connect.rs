use std::rc::Rc;

use dioxus::prelude::*;

use passport_common::address::{format_address, WalletId};
use passport_common::wallet_session::{ConnectionState, SessionSnapshot, WalletSession};

use super::app_state::use_app_state;
use super::extension::{platform_extension, PlatformExtension};

type Session = Rc<WalletSession<PlatformExtension>>;

/// Connect button, address dropdown and error banner for the wallet extension.
///
/// Each instance owns its own session; the address it reports through
/// `on_address_change` is `""` after a disconnect.
#[component]
pub fn WalletConnect(on_address_change: EventHandler<String>) -> Element {
    let app_state = use_app_state();
    let mut snapshot = use_signal(SessionSnapshot::default);
    let mut menu_open = use_signal(|| false);

    let session: Session = use_hook(|| {
        let config = app_state.peek().config.clone();
        let session = Rc::new(WalletSession::new(
            platform_extension(),
            config.install_url,
            config.default_wallet,
        ));
        session.observe(move |s| snapshot.set(s.clone()));
        session.on_address_change(move |address| on_address_change.call(address.to_string()));

        let startup = session.clone();
        spawn(async move {
            startup.initialize().await;
        });
        session
    });

    let current = snapshot.read().clone();
    let address = current.address_str().to_string();
    let short_address = format_address(&address);
    let install_url = session.install_url().to_string();
    let menu_visible = *menu_open.read() && current.connection_state == ConnectionState::Connected;

    let connect = {
        let session = session.clone();
        move |_: MouseEvent| {
            let session = session.clone();
            spawn(async move {
                if let Err(e) = session.connect().await {
                    tracing::warn!("connect: {e}");
                }
            });
        }
    };

    let disconnect = {
        let session = session.clone();
        move |_: MouseEvent| {
            menu_open.set(false);
            session.disconnect();
        }
    };

    let dismiss = {
        let session = session.clone();
        move |_: MouseEvent| session.dismiss_error()
    };

    rsx! {
        div { class: "wallet-connect",
            if current.extension_missing {
                a {
                    class: "wallet-install-btn",
                    href: "{install_url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "Install Wallet"
                }
            } else {
                match current.connection_state {
                    ConnectionState::Connecting => rsx! {
                        button { class: "wallet-btn", disabled: true,
                            span { class: "spinner" }
                            "Connecting..."
                        }
                    },
                    ConnectionState::Connected => rsx! {
                        button {
                            class: "wallet-btn wallet-connected",
                            onclick: move |_| {
                                let open = *menu_open.read();
                                menu_open.set(!open);
                            },
                            "{short_address}"
                        }
                    },
                    ConnectionState::Disconnected | ConnectionState::Error => rsx! {
                        button { class: "wallet-btn", onclick: connect, "Connect Wallet" }
                    },
                }
            }

            if menu_visible {
                div { class: "wallet-menu",
                    div { class: "wallet-menu-header",
                        p { class: "wallet-menu-label", "Connected Address" }
                        p { class: "wallet-menu-address", "{address}" }
                    }
                    for wallet in WalletId::all().iter().copied() {
                        SwitchWalletItem {
                            key: "{wallet}",
                            wallet,
                            active: wallet == current.active_wallet,
                            session: session.clone(),
                            on_done: move |_| menu_open.set(false),
                        }
                    }
                    button { class: "wallet-menu-item wallet-disconnect", onclick: disconnect,
                        "Disconnect"
                    }
                }
            }

            if let Some(message) = current.last_error.clone() {
                div { class: "wallet-error",
                    span { "{message}" }
                    if !current.extension_missing {
                        button { class: "wallet-error-dismiss", onclick: dismiss, "×" }
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
struct SessionProp(Session);

impl PartialEq for SessionProp {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Session> for SessionProp {
    fn from(session: Session) -> Self {
        Self(session)
    }
}

#[component]
fn SwitchWalletItem(
    wallet: WalletId,
    active: bool,
    #[props(into)] session: SessionProp,
    on_done: EventHandler<()>,
) -> Element {
    let label = if active {
        format!("{} (active)", wallet.label())
    } else {
        format!("Switch to {}", wallet.label())
    };
    rsx! {
        button {
            class: "wallet-menu-item",
            onclick: move |_| {
                on_done.call(());
                let session = session.0.clone();
                spawn(async move {
                    if let Err(e) = session.switch_account(wallet).await {
                        tracing::warn!(wallet = wallet.as_str(), "switch: {e}");
                    }
                });
            },
            "{label}"
        }
    }
}
