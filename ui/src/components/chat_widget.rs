use chrono::Utc;
use dioxus::prelude::*;

use passport_common::conversation::{Conversation, Participant, PendingReply};

use super::app_state::use_app_state;

/// Floating two-party chat.
///
/// Remount (e.g. with a `key`) to start a fresh conversation with someone else.
#[component]
pub fn ChatWidget(me: Participant, other: Participant, #[props(default)] start_open: bool) -> Element {
    let app_state = use_app_state();
    let mut conversation = use_signal(|| {
        let mut convo = app_state.peek().config.conversation(me.clone(), other.clone());
        if start_open {
            convo.open();
        }
        convo
    });

    let container_id = use_hook(|| format!("chat-messages-{}", other.id));

    use_drop(move || {
        if let Ok(mut convo) = conversation.try_write() {
            convo.teardown();
        }
    });

    {
        let container_id = container_id.clone();
        use_effect(move || {
            let _ = conversation.read().messages().len();
            scroll_to_bottom(&container_id);
        });
    }

    let convo = conversation.read();
    let is_open = convo.is_open();
    let draft = convo.draft().to_string();
    let can_send = !draft.trim().is_empty();
    let other_name = convo.other().display_name.clone();
    let other_role = convo.other().role.label();
    let bubbles: Vec<(u64, bool, String, String, String)> = convo
        .messages()
        .iter()
        .map(|m| {
            (
                m.id,
                convo.is_mine(m),
                convo.sender_name(m).to_string(),
                m.content.clone(),
                m.timestamp.format("%H:%M").to_string(),
            )
        })
        .collect();
    drop(convo);

    rsx! {
        div { class: "chat-widget",
            if is_open {
                div { class: "chat-panel",
                    div { class: "chat-panel-header",
                        div {
                            h3 { "{other_name}" }
                            span { class: "chat-role", "{other_role}" }
                        }
                        button {
                            class: "chat-close-btn",
                            onclick: move |_| conversation.write().close(),
                            "X"
                        }
                    }

                    div { class: "chat-messages", id: "{container_id}",
                        if bubbles.is_empty() {
                            p { class: "chat-empty", "Say hello to {other_name}" }
                        }
                        for (id, mine, sender, content, time) in bubbles {
                            div {
                                key: "{id}",
                                class: if mine { "chat-bubble chat-sent" } else { "chat-bubble chat-received" },
                                span { class: "chat-sender", "{sender}" }
                                p { "{content}" }
                                span { class: "chat-time", "{time}" }
                            }
                        }
                    }

                    div { class: "chat-input",
                        input {
                            r#type: "text",
                            placeholder: "Type a message...",
                            value: "{draft}",
                            oninput: move |evt| conversation.write().set_draft(evt.value()),
                            onkeypress: move |evt: KeyboardEvent| {
                                if evt.key() == Key::Enter {
                                    send_draft(conversation);
                                }
                            },
                        }
                        button {
                            class: "chat-send-btn",
                            disabled: !can_send,
                            onclick: move |_| send_draft(conversation),
                            "Send"
                        }
                    }
                }
            }
            button {
                class: "chat-toggle-btn",
                onclick: move |_| conversation.write().toggle(),
                if is_open { "Close chat" } else { "Chat with {other_name}" }
            }
        }
    }
}

fn send_draft(mut conversation: Signal<Conversation>) {
    let pending = conversation.write().submit_draft(Utc::now());
    if let Some(pending) = pending {
        schedule_reply(conversation, pending);
    }
}

/// Fire the simulated reply once its delay has elapsed.
///
/// The task belongs to the widget's scope, so unmounting drops it; the
/// ticket is also cancelled by `teardown`, so a late wake-up is a no-op.
fn schedule_reply(mut conversation: Signal<Conversation>, pending: PendingReply) {
    let delay_ms = pending.delay.num_milliseconds().clamp(0, u32::MAX as i64) as u32;
    spawn(async move {
        #[cfg(target_family = "wasm")]
        gloo_timers::future::TimeoutFuture::new(delay_ms).await;
        #[cfg(not(target_family = "wasm"))]
        tracing::debug!(delay_ms, "no timer on this platform; replying immediately");

        if let Ok(mut convo) = conversation.try_write() {
            convo.deliver(pending.ticket, Utc::now());
        }
    });
}

fn scroll_to_bottom(element_id: &str) {
    #[cfg(target_family = "wasm")]
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
    {
        el.set_scroll_top(el.scroll_height());
    }
    #[cfg(not(target_family = "wasm"))]
    let _ = element_id;
}
