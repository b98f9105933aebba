use dioxus::prelude::*;

use passport_common::account::{
    filter_people, initials, AdvisorRecord, Person, StatusFilter, UserRecord,
};
use passport_common::dashboard::{format_usd, format_usd_compact};
use passport_common::mock_data;

use super::wallet_connect::WalletConnect;
use super::widgets::{tone_class, FilterBar, StatGrid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Advisors,
    Users,
}

/// What the detail panel is showing.
#[derive(Clone, Debug, PartialEq)]
enum Selection {
    Advisor(AdvisorRecord),
    User(UserRecord),
}

#[component]
fn PersonRow(person: Person, summary: String, selected: bool, onselect: EventHandler<()>) -> Element {
    rsx! {
        li {
            class: if selected { "person-row selected" } else { "person-row" },
            onclick: move |_| onselect.call(()),
            span { class: "avatar avatar-initials", {initials(&person.name)} }
            div {
                p { "{person.name}" }
                p { class: "muted", "{person.email}" }
            }
            span { class: "muted", "{summary}" }
            span { class: tone_class(person.status.tone()), {person.status.label()} }
        }
    }
}

#[component]
fn DetailPanel(selection: Selection, onclose: EventHandler<()>) -> Element {
    let person = match &selection {
        Selection::Advisor(a) => a.person.clone(),
        Selection::User(u) => u.person.clone(),
    };
    rsx! {
        aside { class: "card detail-panel",
            div { class: "section-header",
                h3 { "{person.name}" }
                button { class: "chat-close-btn", onclick: move |_| onclose.call(()), "X" }
            }
            dl {
                div { dt { "Email" } dd { "{person.email}" } }
                div { dt { "Phone" } dd { "{person.phone}" } }
                div { dt { "Location" } dd { "{person.location}" } }
            }
            match selection {
                Selection::Advisor(a) => rsx! {
                    dl {
                        div { dt { "Experience" } dd { "{a.experience_years} years" } }
                        div { dt { "Clients" } dd { "{a.clients}" } }
                        div { dt { "AUM" } dd { {format_usd_compact(a.aum)} } }
                        div { dt { "Rating" } dd { "{a.rating:.1}" } }
                        div { dt { "Education" } dd { "{a.education}" } }
                        div { dt { "Specializations" } dd { {a.specializations.join(", ")} } }
                        div { dt { "Certifications" } dd { {a.certifications.join(", ")} } }
                    }
                },
                Selection::User(u) => rsx! {
                    dl {
                        div { dt { "Portfolio" } dd { {format_usd(u.portfolio_value)} } }
                        div { dt { "Advisor" } dd { {u.advisor.clone().unwrap_or_else(|| "Unassigned".into())} } }
                        div { dt { "Account" } dd { {u.tier.label()} } }
                        div { dt { "KYC" } dd { span { class: tone_class(u.kyc_status.tone()), {u.kyc_status.label()} } } }
                        div { dt { "Last login" } dd { "{u.last_login}" } }
                    }
                },
            }
        }
    }
}

#[component]
pub fn AdminDashboard() -> Element {
    let mut tab = use_signal(|| Tab::Advisors);
    let query = use_signal(String::new);
    let filter = use_signal(StatusFilter::default);
    let mut selection = use_signal(|| None::<Selection>);

    let advisors = use_hook(mock_data::advisors);
    let users = use_hook(mock_data::users);

    let current_tab = *tab.read();
    let q = query.read().clone();
    let f = *filter.read();
    let shown_advisors: Vec<AdvisorRecord> = filter_people(&advisors, |a| &a.person, &q, f)
        .into_iter()
        .cloned()
        .collect();
    let shown_users: Vec<UserRecord> = filter_people(&users, |u| &u.person, &q, f)
        .into_iter()
        .cloned()
        .collect();
    let selected = selection.read().clone();
    let selected_id = selected.as_ref().map(|s| match s {
        Selection::Advisor(a) => a.person.id.clone(),
        Selection::User(u) => u.person.id.clone(),
    });

    let placeholder = match current_tab {
        Tab::Advisors => "Search advisors...",
        Tab::Users => "Search users...",
    };

    let mut switch_tab = move |next: Tab| {
        tab.set(next);
        selection.set(None);
    };

    rsx! {
        div { class: "admin-dashboard",
            header { class: "page-header",
                h1 { "Admin Dashboard" }
                WalletConnect {
                    on_address_change: move |address: String| {
                        tracing::info!(%address, "admin wallet address changed");
                    },
                }
            }

            StatGrid { stats: mock_data::admin_stats() }

            div { class: "tabs",
                button {
                    class: if current_tab == Tab::Advisors { "tab active" } else { "tab" },
                    onclick: move |_| switch_tab(Tab::Advisors),
                    "Advisors"
                }
                button {
                    class: if current_tab == Tab::Users { "tab active" } else { "tab" },
                    onclick: move |_| switch_tab(Tab::Users),
                    "Users"
                }
            }

            FilterBar { query, filter, placeholder }

            div { class: "admin-columns",
                ul { class: "person-list",
                    if current_tab == Tab::Advisors {
                        for advisor in shown_advisors {
                            {
                                let id = advisor.person.id.clone();
                                let summary = format!("{} clients · {}", advisor.clients, format_usd_compact(advisor.aum));
                                let is_selected = selected_id.as_deref() == Some(id.as_str());
                                rsx! {
                                    PersonRow {
                                        key: "{id}",
                                        person: advisor.person.clone(),
                                        summary,
                                        selected: is_selected,
                                        onselect: move |_| selection.set(Some(Selection::Advisor(advisor.clone()))),
                                    }
                                }
                            }
                        }
                    } else {
                        for user in shown_users {
                            {
                                let id = user.person.id.clone();
                                let summary = format!("{} · {}", format_usd(user.portfolio_value), user.last_login);
                                let is_selected = selected_id.as_deref() == Some(id.as_str());
                                rsx! {
                                    PersonRow {
                                        key: "{id}",
                                        person: user.person.clone(),
                                        summary,
                                        selected: is_selected,
                                        onselect: move |_| selection.set(Some(Selection::User(user.clone()))),
                                    }
                                }
                            }
                        }
                    }
                }

                if let Some(current) = selected {
                    DetailPanel {
                        selection: current,
                        onclose: move |_| selection.set(None),
                    }
                }
            }
        }
    }
}
