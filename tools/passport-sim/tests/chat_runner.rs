use std::time::Duration;

use passport_common::config::PassportConfig;
use passport_common::conversation::{ChatRole, Participant};
use passport_sim::ChatRunner;
use tokio::task::LocalSet;

fn participants() -> (Participant, Participant) {
    (
        Participant::new("user-1", "Raveesh", ChatRole::User),
        Participant::new("advisor-1", "Sarah Smith", ChatRole::Advisor),
    )
}

fn default_runner() -> ChatRunner {
    let (me, other) = participants();
    ChatRunner::new(PassportConfig::default().conversation(me, other))
}

#[tokio::test(start_paused = true)]
async fn reply_lands_after_configured_delay() {
    LocalSet::new()
        .run_until(async {
            let mut chat = default_runner();
            chat.send("Hello").expect("reply scheduled");

            tokio::time::sleep(Duration::from_millis(999)).await;
            assert_eq!(chat.conversation().messages().len(), 1);

            tokio::time::sleep(Duration::from_millis(2)).await;
            let convo = chat.conversation();
            let messages = convo.messages();
            assert_eq!(messages.len(), 2);
            assert_eq!(messages[0].content, "Hello");
            assert_eq!(messages[1].content, "Hello there, I am Sarah Smith");
            assert!(!convo.is_mine(&messages[1]));
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn each_message_gets_its_own_reply() {
    LocalSet::new()
        .run_until(async {
            let mut chat = default_runner();
            for text in ["one", "two", "three"] {
                chat.send(text);
            }
            chat.settle().await;

            let convo = chat.conversation();
            assert_eq!(convo.messages().len(), 6);
            assert!(convo.pending().is_empty());
            let replies = convo.messages().iter().filter(|m| !convo.is_mine(m)).count();
            assert_eq!(replies, 3);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_outstanding_replies() {
    LocalSet::new()
        .run_until(async {
            let mut chat = default_runner();
            chat.send("first");
            chat.send("second");
            assert_eq!(chat.teardown(), 2);

            tokio::time::sleep(Duration::from_secs(5)).await;
            assert_eq!(chat.conversation().messages().len(), 2);
            assert_eq!(chat.pending_timers(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn config_controls_delay_and_wording() {
    LocalSet::new()
        .run_until(async {
            let config = PassportConfig {
                reply_delay_ms: 250,
                reply_template: "Thanks, {name} will get back to you".into(),
                ..PassportConfig::default()
            };
            let (me, other) = participants();
            let mut chat = ChatRunner::new(config.conversation(me, other));
            chat.send("Can we review my goals?");

            tokio::time::sleep(Duration::from_millis(251)).await;
            let convo = chat.conversation();
            let last = convo.messages().last().expect("reply delivered");
            assert_eq!(last.content, "Thanks, Sarah Smith will get back to you");
        })
        .await;
}
