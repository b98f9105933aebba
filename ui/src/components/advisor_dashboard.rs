use dioxus::prelude::*;

use passport_common::account::{filter_people, initials, ClientRecord, StatusFilter};
use passport_common::conversation::{ChatRole, Participant};
use passport_common::dashboard::{format_usd, upcoming};
use passport_common::mock_data;

use super::chat_widget::ChatWidget;
use super::wallet_connect::WalletConnect;
use super::widgets::{tone_class, ActivityList, FilterBar, StatGrid};

#[component]
pub fn AdvisorDashboard() -> Element {
    let query = use_signal(String::new);
    let filter = use_signal(StatusFilter::default);
    let mut selected = use_signal(|| None::<Participant>);

    let clients = use_hook(mock_data::clients);
    let meetings = use_hook(mock_data::meetings);

    let visible: Vec<ClientRecord> = filter_people(&clients, |c| &c.person, &query.read(), *filter.read())
        .into_iter()
        .cloned()
        .collect();
    let schedule: Vec<_> = upcoming(&meetings).into_iter().cloned().collect();
    let me = Participant::new(mock_data::ADVISOR_ID, mock_data::ADVISOR_NAME, ChatRole::Advisor);
    let chatting_with = selected.read().clone();
    let advisor_name = mock_data::ADVISOR_NAME;

    rsx! {
        div { class: "advisor-dashboard",
            header { class: "page-header",
                div {
                    h1 { "Welcome back, {advisor_name}" }
                    p { class: "subtitle", "Here's an overview of your client portfolio and upcoming activities." }
                }
                WalletConnect {
                    on_address_change: move |address: String| {
                        tracing::info!(%address, "advisor wallet address changed");
                    },
                }
            }

            StatGrid { stats: mock_data::advisor_stats() }

            div { class: "dashboard-columns",
                ActivityList { title: "Recent Activities", activities: mock_data::advisor_activities() }

                section { class: "card meetings",
                    h2 { "Upcoming Meetings" }
                    ul {
                        for meeting in schedule {
                            li { key: "{meeting.id}",
                                div {
                                    p { class: "meeting-client", "{meeting.client}" }
                                    p { class: "muted", "{meeting.kind}" }
                                }
                                span { class: "meeting-when", {format!("{} {}", meeting.date, meeting.time_label())} }
                                span { class: tone_class(meeting.priority.tone()), {meeting.priority.label()} }
                            }
                        }
                    }
                }
            }

            section { class: "card clients",
                div { class: "section-header",
                    h3 { "Connected Clients" }
                    p { class: "muted", "Chat with your clients" }
                }
                FilterBar { query, filter, placeholder: "Search clients..." }
                if visible.is_empty() {
                    p { class: "muted", "No clients match." }
                }
                ul { class: "client-list",
                    for client in visible {
                        {
                            let participant = Participant::new(
                                client.person.id.clone(),
                                client.person.name.clone(),
                                ChatRole::User,
                            );
                            let is_selected = chatting_with.as_ref().map(|p| &p.id) == Some(&participant.id);
                            rsx! {
                                li {
                                    key: "{client.person.id}",
                                    class: if is_selected { "client-row selected" } else { "client-row" },
                                    onclick: move |_| selected.set(Some(participant.clone())),
                                    span { class: "avatar avatar-initials", {initials(&client.person.name)} }
                                    div {
                                        p { "{client.person.name}" }
                                        p { class: "muted",
                                            {format!("{} · {}", format_usd(client.portfolio_value), client.last_contact)}
                                        }
                                    }
                                    span { class: tone_class(client.person.status.tone()), {client.person.status.label()} }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(other) = chatting_with {
                ChatWidget {
                    key: "{other.id}",
                    me,
                    other,
                    start_open: true,
                }
            }
        }
    }
}
