use dioxus::prelude::*;

use passport_common::account::KycStatus;
use passport_common::conversation::{ChatRole, Participant};
use passport_common::dashboard::format_usd;
use passport_common::mock_data;
use passport_common::passport::DocumentSummary;

use super::app_state::use_app_state;
use super::chat_widget::ChatWidget;
use super::wallet_connect::WalletConnect;
use super::widgets::{tone_class, ActivityList, StatGrid};

fn signed_usd(amount: i128) -> String {
    let magnitude = format_usd(amount.unsigned_abs().min(u64::MAX as u128) as u64);
    if amount < 0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

#[component]
pub fn DashboardView() -> Element {
    let mut app_state = use_app_state();

    // The wallet widget dies with this page; its address must not outlive it.
    use_drop(move || {
        if let Ok(mut state) = app_state.try_write() {
            state.set_wallet_address("");
        }
    });

    let state = app_state.read();
    let stats = mock_data::user_stats(&state.documents);
    let summary = DocumentSummary::of(&state.documents);
    let overall: KycStatus = summary.overall();
    let net_worth = state.net_worth();
    let goals: Vec<(String, i128, i128, u8)> = state
        .wallet_address
        .as_deref()
        .map(|addr| {
            state
                .finance
                .goals(addr)
                .iter()
                .map(|g| (g.name.clone(), g.current_amount, g.target_amount, g.percent_complete()))
                .collect()
        })
        .unwrap_or_default();
    let me = Participant::new(mock_data::USER_ID, state.profile.name.clone(), ChatRole::User);
    drop(state);

    rsx! {
        div { class: "dashboard",
            header { class: "page-header",
                div {
                    h1 { "Dashboard" }
                    p { class: "subtitle", "Welcome back! Here's an overview of your financial passport." }
                }
                WalletConnect {
                    on_address_change: move |address: String| {
                        tracing::info!(%address, "wallet address changed");
                        app_state.write().set_wallet_address(&address);
                    },
                }
            }

            StatGrid { stats }

            div { class: "dashboard-columns",
                ActivityList { title: "Recent Activity", activities: mock_data::user_activities() }

                section { class: "card document-summary",
                    h2 { "Documents" }
                    p { "{summary.verified} of {summary.total} verified" }
                    if summary.pending > 0 {
                        p { class: "muted", "{summary.pending} awaiting review" }
                    }
                    span { class: tone_class(overall.tone()), {overall.label()} }
                }

                section { class: "card ledger",
                    h2 { "Net Worth" }
                    match net_worth {
                        Some(total) => rsx! {
                            p { class: "ledger-total", {signed_usd(total)} }
                            ul { class: "goal-list",
                                for (name, current, target, pct) in goals {
                                    li { key: "{name}",
                                        span { "{name}" }
                                        span { class: "muted", {format!("{} / {}", signed_usd(current), signed_usd(target))} }
                                        progress { max: "100", value: "{pct}" }
                                    }
                                }
                            }
                        },
                        None => rsx! {
                            p { class: "muted", "Connect a wallet to see your ledger." }
                        },
                    }
                }
            }

            ChatWidget { me, other: mock_data::assigned_advisor() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::signed_usd;

    #[test]
    fn negative_amounts_keep_sign() {
        assert_eq!(signed_usd(16_000), "$16,000");
        assert_eq!(signed_usd(-2_000), "-$2,000");
    }
}
