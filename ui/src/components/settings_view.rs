use dioxus::prelude::*;

use passport_common::profile::ProfileVisibility;

use super::app_state::use_app_state;

#[component]
fn Toggle(on: bool, onchange: EventHandler<bool>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: if on { "toggle toggle-on" } else { "toggle" },
            role: "switch",
            aria_checked: "{on}",
            onclick: move |_| onchange.call(!on),
            span { class: "toggle-knob" }
        }
    }
}

/// Preference toggles. Changes live in app state until the tab closes.
#[component]
pub fn SettingsView() -> Element {
    let mut app_state = use_app_state();
    let prefs = app_state.read().preferences;

    rsx! {
        div { class: "settings",
            header { class: "page-header",
                h1 { "Settings" }
                p { class: "subtitle", "Manage your account preferences" }
            }

            section { class: "card settings-section",
                h3 { "Notifications" }
                div { class: "setting-row",
                    div {
                        p { class: "setting-name", "Email Notifications" }
                        p { class: "muted", "Receive updates about your account" }
                    }
                    Toggle {
                        on: prefs.email_notifications,
                        onchange: move |on| app_state.write().preferences.email_notifications = on,
                    }
                }
            }

            section { class: "card settings-section",
                h3 { "Privacy" }
                div { class: "setting-row",
                    div {
                        p { class: "setting-name", "Profile Visibility" }
                        p { class: "muted", "Control who can see your profile" }
                    }
                    select {
                        value: prefs.visibility.label(),
                        onchange: move |evt| {
                            match ProfileVisibility::from_label(&evt.value()) {
                                Some(v) => app_state.write().preferences.visibility = v,
                                None => tracing::warn!(value = %evt.value(), "unknown visibility option"),
                            }
                        },
                        for choice in ProfileVisibility::all().iter().copied() {
                            option {
                                key: "{choice:?}",
                                value: choice.label(),
                                selected: choice == prefs.visibility,
                                {choice.label()}
                            }
                        }
                    }
                }
            }

            section { class: "card settings-section",
                h3 { "Appearance" }
                div { class: "setting-row",
                    div {
                        p { class: "setting-name", "Dark Mode" }
                        p { class: "muted", "Use dark theme" }
                    }
                    Toggle {
                        on: prefs.dark_mode,
                        onchange: move |on| app_state.write().preferences.dark_mode = on,
                    }
                }
            }
        }
    }
}
