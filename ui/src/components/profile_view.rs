use dioxus::prelude::*;

use passport_common::account::initials;
use passport_common::profile::ProfileDraft;

use super::app_state::use_app_state;

#[component]
fn DraftField(label: &'static str, value: String, oninput: EventHandler<String>) -> Element {
    rsx! {
        label { class: "form-field",
            span { "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                oninput: move |evt| oninput.call(evt.value()),
            }
        }
    }
}

#[component]
pub fn ProfileView() -> Element {
    let mut app_state = use_app_state();
    let mut draft = use_signal(|| None::<ProfileDraft>);
    let mut error = use_signal(|| None::<String>);

    let profile = app_state.read().profile.clone();
    let editing = draft.read().clone();

    let save = move |_: MouseEvent| {
        let Some(current) = draft.read().clone() else {
            return;
        };
        let base = app_state.read().profile.clone();
        match current.validate(&base) {
            Ok(updated) => {
                tracing::info!("profile updated");
                app_state.write().profile = updated;
                draft.set(None);
                error.set(None);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    rsx! {
        div { class: "profile",
            header { class: "page-header",
                h1 { "Profile" }
                p { class: "subtitle", "Manage your personal information and preferences" }
            }

            section { class: "card profile-card",
                div { class: "profile-identity",
                    match profile.avatar_url.clone() {
                        Some(url) => rsx! { img { class: "avatar", src: "{url}", alt: "Profile" } },
                        None => rsx! { div { class: "avatar avatar-initials", {initials(&profile.name)} } },
                    }
                    div {
                        h2 { "{profile.name}" }
                        p { class: "muted", "Personal Account" }
                    }
                }

                if let Some(d) = editing {
                    div { class: "profile-form",
                        DraftField {
                            label: "Name",
                            value: d.name.clone(),
                            oninput: move |v: String| if let Some(d) = draft.write().as_mut() { d.name = v },
                        }
                        DraftField {
                            label: "Email",
                            value: d.email.clone(),
                            oninput: move |v: String| if let Some(d) = draft.write().as_mut() { d.email = v },
                        }
                        DraftField {
                            label: "Phone",
                            value: d.phone.clone(),
                            oninput: move |v: String| if let Some(d) = draft.write().as_mut() { d.phone = v },
                        }
                        DraftField {
                            label: "Address",
                            value: d.address.clone(),
                            oninput: move |v: String| if let Some(d) = draft.write().as_mut() { d.address = v },
                        }
                        DraftField {
                            label: "Company",
                            value: d.company.clone(),
                            oninput: move |v: String| if let Some(d) = draft.write().as_mut() { d.company = v },
                        }
                        if let Some(msg) = error.read().clone() {
                            p { class: "form-error", "{msg}" }
                        }
                        div { class: "form-actions",
                            button { class: "btn-primary", onclick: save, "Save" }
                            button {
                                class: "btn-secondary",
                                onclick: move |_| {
                                    draft.set(None);
                                    error.set(None);
                                },
                                "Cancel"
                            }
                        }
                    }
                } else {
                    dl { class: "profile-details",
                        div { dt { "Email" } dd { "{profile.email}" } }
                        div { dt { "Phone" } dd { "{profile.phone}" } }
                        div { dt { "Address" } dd { "{profile.address}" } }
                        div { dt { "Company" } dd { "{profile.company}" } }
                    }
                    button {
                        class: "btn-primary",
                        onclick: move |_| {
                            let base = app_state.read().profile.clone();
                            draft.set(Some(ProfileDraft::from_profile(&base)));
                        },
                        "Edit Profile"
                    }
                }
            }
        }
    }
}
