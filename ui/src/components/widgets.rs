use dioxus::prelude::*;

use passport_common::account::{StatusFilter, Tone};
use passport_common::dashboard::{Activity, StatCard, StatIcon};

pub fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "badge badge-positive",
        Tone::Caution => "badge badge-caution",
        Tone::Critical => "badge badge-critical",
        Tone::Muted => "badge badge-muted",
    }
}

fn icon_glyph(icon: StatIcon) -> &'static str {
    match icon {
        StatIcon::Chart => "📊",
        StatIcon::Document => "📄",
        StatIcon::Alert => "⚠",
        StatIcon::Users => "👥",
        StatIcon::Portfolio => "🥧",
        StatIcon::Dollar => "$",
        StatIcon::Star => "★",
        StatIcon::Shield => "🛡",
        StatIcon::Card => "💳",
    }
}

#[component]
pub fn StatGrid(stats: Vec<StatCard>) -> Element {
    rsx! {
        div { class: "stat-grid",
            for stat in stats {
                {
                    let change_class = format!("stat-change {}", tone_class(stat.change_kind.tone()));
                    rsx! {
                        div { class: "stat-card", key: "{stat.name}",
                            span { class: "stat-icon", {icon_glyph(stat.icon)} }
                            dl {
                                dt { "{stat.name}" }
                                dd {
                                    span { class: "stat-value", "{stat.value}" }
                                    span { class: "{change_class}", "{stat.change}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ActivityList(#[props(into)] title: String, activities: Vec<Activity>) -> Element {
    rsx! {
        section { class: "activity-list",
            h2 { "{title}" }
            ul {
                for activity in activities {
                    li { key: "{activity.id}",
                        div {
                            p { class: "activity-kind", "{activity.kind}" }
                            if let Some(subject) = activity.subject.clone() {
                                p { class: "activity-subject", "{subject}" }
                            }
                        }
                        span { class: "activity-date", "{activity.date}" }
                        span { class: tone_class(activity.status.tone()), {activity.status.label()} }
                    }
                }
            }
        }
    }
}

/// Search box plus the All/Active/Pending buttons above a list.
#[component]
pub fn FilterBar(
    query: Signal<String>,
    filter: Signal<StatusFilter>,
    placeholder: &'static str,
) -> Element {
    let mut query = query;
    let mut filter = filter;
    let active = *filter.read();
    rsx! {
        div { class: "filter-bar",
            input {
                r#type: "search",
                placeholder,
                value: "{query}",
                oninput: move |evt| query.set(evt.value()),
            }
            div { class: "filter-buttons",
                for choice in StatusFilter::all().iter().copied() {
                    button {
                        key: "{choice:?}",
                        class: if choice == active { "filter-btn active" } else { "filter-btn" },
                        onclick: move |_| filter.set(choice),
                        {choice.label()}
                    }
                }
            }
        }
    }
}
