use std::cell::{Ref, RefCell};
use std::rc::Rc;

use chrono::Utc;
use passport_common::conversation::{Conversation, ReplyTicket};
use tokio::task::JoinHandle;
use tracing::debug;

/// Owns a conversation and the timers delivering its simulated replies.
///
/// Timers are spawned with `spawn_local`, so every method that schedules one
/// must run inside a `tokio::task::LocalSet`. Dropping the runner aborts
/// whatever is still waiting.
pub struct ChatRunner {
    convo: Rc<RefCell<Conversation>>,
    timers: Vec<JoinHandle<()>>,
}

impl ChatRunner {
    pub fn new(convo: Conversation) -> Self {
        Self {
            convo: Rc::new(RefCell::new(convo)),
            timers: Vec::new(),
        }
    }

    pub fn conversation(&self) -> Ref<'_, Conversation> {
        self.convo.borrow()
    }

    /// Submit `text` as the local participant and arm its reply timer.
    ///
    /// Blank input schedules nothing.
    pub fn send(&mut self, text: &str) -> Option<ReplyTicket> {
        let pending = self.convo.borrow_mut().submit(text, Utc::now())?;
        let delay = pending.delay.to_std().unwrap_or_default();
        let ticket = pending.ticket;
        let convo = Rc::clone(&self.convo);

        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if convo.borrow_mut().deliver(ticket, Utc::now()).is_none() {
                debug!(ticket = ticket.0, "reply ticket no longer pending");
            }
        });
        self.timers.retain(|h| !h.is_finished());
        self.timers.push(handle);
        Some(ticket)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.iter().filter(|h| !h.is_finished()).count()
    }

    /// Wait until every armed reply has been delivered.
    pub async fn settle(&mut self) {
        for handle in self.timers.drain(..) {
            if let Err(e) = handle.await {
                debug!("reply timer ended early: {e}");
            }
        }
    }

    /// Abort outstanding timers and cancel their tickets.
    pub fn teardown(&mut self) -> usize {
        for handle in self.timers.drain(..) {
            handle.abort();
        }
        self.convo.borrow_mut().teardown()
    }
}

impl Drop for ChatRunner {
    fn drop(&mut self) {
        for handle in &self.timers {
            handle.abort();
        }
    }
}
