//! Two-party message log behind the chat widget.
//!
//! There is no transport yet. Every submitted message schedules exactly one
//! canned reply from the other party; the host fires it with `deliver` once
//! its timer elapses (or sweeps with `deliver_due`). Timers belong to the host,
//! but the schedule lives here so `teardown` can cancel whatever is left.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default delay before the simulated counterpart answers.
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1_000;

/// Longer configured delays are clamped to one day.
pub const MAX_REPLY_DELAY_MS: u64 = 86_400_000;

/// `{name}` is replaced with the other participant's display name.
pub const DEFAULT_REPLY_TEMPLATE: &str = "Hello there, I am {name}";

pub type MessageId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Advisor,
}

impl ChatRole {
    pub fn label(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Advisor => "advisor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub role: ChatRole,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, role: ChatRole) -> Self {
        Self {
            id: ParticipantId(id.into()),
            display_name: display_name.into(),
            role,
        }
    }
}

/// A chat message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender_id: ParticipantId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReplyTicket(pub u64);

/// A simulated reply waiting for its timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub ticket: ReplyTicket,
    pub due_at: DateTime<Utc>,
    pub delay: TimeDelta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationEvent {
    Opened,
    Closed,
    /// A message was appended; hosts scroll it into view.
    Appended(MessageId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ChatError {
    #[error("sender {0} is not a participant in this conversation")]
    UnknownSender(String),
}

type Observer = Box<dyn FnMut(&ConversationEvent)>;

pub struct Conversation {
    me: Participant,
    other: Participant,
    messages: Vec<ChatMessage>,
    draft: String,
    visibility: Visibility,
    pending: Vec<PendingReply>,
    reply_delay: TimeDelta,
    reply_template: String,
    next_message_id: MessageId,
    next_ticket: u64,
    observers: Vec<Observer>,
}

impl fmt::Debug for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conversation")
            .field("me", &self.me.id)
            .field("other", &self.other.id)
            .field("messages", &self.messages.len())
            .field("pending", &self.pending.len())
            .field("visibility", &self.visibility)
            .finish()
    }
}

impl Conversation {
    pub fn new(me: Participant, other: Participant) -> Self {
        Self {
            me,
            other,
            messages: Vec::new(),
            draft: String::new(),
            visibility: Visibility::Closed,
            pending: Vec::new(),
            reply_delay: TimeDelta::milliseconds(DEFAULT_REPLY_DELAY_MS as i64),
            reply_template: DEFAULT_REPLY_TEMPLATE.to_string(),
            next_message_id: 1,
            next_ticket: 1,
            observers: Vec::new(),
        }
    }

    pub fn with_reply_delay_ms(mut self, delay_ms: u64) -> Self {
        if delay_ms > MAX_REPLY_DELAY_MS {
            tracing::warn!(delay_ms, max = MAX_REPLY_DELAY_MS, "reply delay clamped");
        }
        self.reply_delay = TimeDelta::milliseconds(delay_ms.min(MAX_REPLY_DELAY_MS) as i64);
        self
    }

    pub fn with_reply_template(mut self, template: impl Into<String>) -> Self {
        self.reply_template = template.into();
        self
    }

    pub fn me(&self) -> &Participant {
        &self.me
    }

    pub fn other(&self) -> &Participant {
        &self.other
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn pending(&self) -> &[PendingReply] {
        &self.pending
    }

    pub fn reply_delay(&self) -> TimeDelta {
        self.reply_delay
    }

    pub fn is_mine(&self, message: &ChatMessage) -> bool {
        message.sender_id == self.me.id
    }

    pub fn sender_name(&self, message: &ChatMessage) -> &str {
        if message.sender_id == self.me.id {
            &self.me.display_name
        } else {
            &self.other.display_name
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ConversationEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ---------- visibility ----------

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    pub fn open(&mut self) {
        if self.visibility != Visibility::Open {
            self.visibility = Visibility::Open;
            self.emit(ConversationEvent::Opened);
        }
    }

    pub fn close(&mut self) {
        if self.visibility != Visibility::Closed {
            self.visibility = Visibility::Closed;
            self.emit(ConversationEvent::Closed);
        }
    }

    pub fn toggle(&mut self) {
        match self.visibility {
            Visibility::Open => self.close(),
            Visibility::Closed => self.open(),
        }
    }

    // ---------- input ----------

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the current draft.
    pub fn submit_draft(&mut self, now: DateTime<Utc>) -> Option<PendingReply> {
        let text = std::mem::take(&mut self.draft);
        let pending = self.submit(&text, now);
        if pending.is_none() {
            // Whitespace-only drafts stay in the box untouched.
            self.draft = text;
        }
        pending
    }

    /// Append `text` from the current user and schedule the canned reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn submit(&mut self, text: &str, now: DateTime<Utc>) -> Option<PendingReply> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }
        self.push(self.me.id.clone(), content.to_string(), now);
        self.draft.clear();

        let ticket = ReplyTicket(self.next_ticket);
        self.next_ticket += 1;
        let reply = PendingReply {
            ticket,
            due_at: now
                .checked_add_signed(self.reply_delay)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            delay: self.reply_delay,
        };
        self.pending.push(reply.clone());
        tracing::debug!(ticket = ticket.0, "scheduled simulated reply");
        Some(reply)
    }

    /// Fire one scheduled reply. Unknown or cancelled tickets are ignored.
    pub fn deliver(&mut self, ticket: ReplyTicket, now: DateTime<Utc>) -> Option<MessageId> {
        let idx = self.pending.iter().position(|p| p.ticket == ticket)?;
        self.pending.remove(idx);
        let content = self.reply_text();
        Some(self.push(self.other.id.clone(), content, now))
    }

    /// Fire every reply whose due time has passed, oldest first.
    pub fn deliver_due(&mut self, now: DateTime<Utc>) -> usize {
        let due: Vec<ReplyTicket> = self
            .pending
            .iter()
            .filter(|p| p.due_at <= now)
            .map(|p| p.ticket)
            .collect();
        for ticket in &due {
            self.deliver(*ticket, now);
        }
        due.len()
    }

    /// Cancel every outstanding reply. Returns how many were dropped.
    pub fn teardown(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        if cancelled > 0 {
            tracing::debug!(cancelled, "cancelled pending replies");
        }
        cancelled
    }

    /// Checked append for either participant.
    pub fn append_from(
        &mut self,
        sender: &ParticipantId,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<MessageId, ChatError> {
        if *sender != self.me.id && *sender != self.other.id {
            return Err(ChatError::UnknownSender(sender.0.clone()));
        }
        Ok(self.push(sender.clone(), content.into(), now))
    }

    fn reply_text(&self) -> String {
        self.reply_template
            .replace("{name}", &self.other.display_name)
    }

    fn push(&mut self, sender_id: ParticipantId, content: String, now: DateTime<Utc>) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender_id,
            content,
            timestamp: now,
        });
        self.emit(ConversationEvent::Appended(id));
        id
    }

    fn emit(&mut self, event: ConversationEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    fn conversation() -> Conversation {
        Conversation::new(
            Participant::new("u1", "John Smith", ChatRole::User),
            Participant::new("a1", "Sarah Smith", ChatRole::Advisor),
        )
    }

    #[test]
    fn hello_gets_one_reply_after_delay() {
        let mut chat = conversation();
        let pending = chat.submit("Hello", t0()).unwrap();

        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].sender_id.0, "u1");
        assert_eq!(chat.messages()[0].content, "Hello");
        assert_eq!(pending.due_at, t0() + TimeDelta::seconds(1));

        // Not yet due.
        assert_eq!(chat.deliver_due(t0() + TimeDelta::milliseconds(999)), 0);
        assert_eq!(chat.messages().len(), 1);

        assert_eq!(chat.deliver_due(pending.due_at), 1);
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].sender_id.0, "a1");
        assert_eq!(chat.messages()[1].content, "Hello there, I am Sarah Smith");
    }

    #[test]
    fn blank_input_never_touches_the_log() {
        let mut chat = conversation();
        assert!(chat.submit("", t0()).is_none());
        assert!(chat.submit("   ", t0()).is_none());
        assert!(chat.submit("\t\n", t0()).is_none());
        assert!(chat.messages().is_empty());
        assert!(chat.pending().is_empty());
    }

    #[test]
    fn log_doubles_once_replies_fire() {
        let mut chat = conversation();
        let inputs = ["one", "  ", "two", "", "three"];
        for (i, text) in inputs.iter().enumerate() {
            chat.submit(text, t0() + TimeDelta::milliseconds(i as i64 * 100));
        }
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.pending().len(), 3);

        chat.deliver_due(t0() + TimeDelta::seconds(10));
        assert_eq!(chat.messages().len(), 6);
        assert!(chat.pending().is_empty());
    }

    #[test]
    fn order_is_append_order() {
        let mut chat = conversation();
        let first = chat.submit("first", t0()).unwrap();
        chat.submit("second", t0()).unwrap();
        chat.deliver(first.ticket, t0() + TimeDelta::seconds(1));
        chat.submit("third", t0() + TimeDelta::seconds(2));

        let contents: Vec<&str> = chat.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            ["first", "second", "Hello there, I am Sarah Smith", "third"]
        );
        let ids: Vec<MessageId> = chat.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn submit_trims_and_clears_draft() {
        let mut chat = conversation();
        chat.set_draft("  hi there  ");
        chat.submit_draft(t0()).unwrap();
        assert_eq!(chat.messages()[0].content, "hi there");
        assert_eq!(chat.draft(), "");
    }

    #[test]
    fn blank_draft_is_kept() {
        let mut chat = conversation();
        chat.set_draft("   ");
        assert!(chat.submit_draft(t0()).is_none());
        assert_eq!(chat.draft(), "   ");
    }

    #[test]
    fn visibility_does_not_affect_log() {
        let mut chat = conversation();
        chat.open();
        chat.submit("Hello", t0());
        chat.close();
        assert!(!chat.is_open());
        assert_eq!(chat.messages().len(), 1);
        chat.toggle();
        assert!(chat.is_open());
    }

    #[test]
    fn teardown_cancels_pending_replies() {
        let mut chat = conversation();
        let pending = chat.submit("Hello", t0()).unwrap();
        assert_eq!(chat.teardown(), 1);
        assert_eq!(chat.deliver(pending.ticket, t0() + TimeDelta::seconds(1)), None);
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn delivering_twice_is_a_no_op() {
        let mut chat = conversation();
        let pending = chat.submit("Hello", t0()).unwrap();
        assert!(chat.deliver(pending.ticket, t0()).is_some());
        assert!(chat.deliver(pending.ticket, t0()).is_none());
        assert_eq!(chat.messages().len(), 2);
    }

    #[test]
    fn strangers_cannot_post() {
        let mut chat = conversation();
        let err = chat
            .append_from(&ParticipantId("x9".into()), "hi", t0())
            .unwrap_err();
        assert_eq!(err, ChatError::UnknownSender("x9".into()));
        assert!(chat
            .append_from(&ParticipantId("a1".into()), "hi", t0())
            .is_ok());
    }

    #[test]
    fn observers_see_every_append() {
        let mut chat = conversation();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        chat.subscribe(move |e| sink.borrow_mut().push(*e));

        chat.open();
        let pending = chat.submit("Hello", t0()).unwrap();
        chat.deliver(pending.ticket, t0());

        assert_eq!(
            *events.borrow(),
            vec![
                ConversationEvent::Opened,
                ConversationEvent::Appended(1),
                ConversationEvent::Appended(2),
            ]
        );
    }

    #[test]
    fn custom_template_and_delay() {
        let mut chat = conversation()
            .with_reply_delay_ms(250)
            .with_reply_template("{name} will reply shortly");
        let pending = chat.submit("ping", t0()).unwrap();
        assert_eq!(pending.delay, TimeDelta::milliseconds(250));
        chat.deliver_due(t0() + TimeDelta::milliseconds(250));
        assert_eq!(chat.messages()[1].content, "Sarah Smith will reply shortly");
    }

    #[test]
    fn oversized_delay_is_clamped() {
        for delay_ms in [u64::MAX, 10_u64.pow(16), MAX_REPLY_DELAY_MS + 1] {
            let chat = conversation().with_reply_delay_ms(delay_ms);
            assert_eq!(chat.reply_delay().num_milliseconds(), MAX_REPLY_DELAY_MS as i64);
        }
        let chat = conversation().with_reply_delay_ms(MAX_REPLY_DELAY_MS);
        assert_eq!(chat.reply_delay(), TimeDelta::days(1));
    }

    #[test]
    fn reply_due_time_saturates_at_end_of_calendar() {
        let mut chat = conversation().with_reply_delay_ms(MAX_REPLY_DELAY_MS);
        let pending = chat.submit("late", DateTime::<Utc>::MAX_UTC).unwrap();
        assert_eq!(pending.due_at, DateTime::<Utc>::MAX_UTC);
        assert_eq!(chat.deliver_due(DateTime::<Utc>::MAX_UTC), 1);
    }
}
