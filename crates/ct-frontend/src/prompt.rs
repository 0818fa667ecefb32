//! One-shot answer channel for blocking prompts
//!
//! A native thread creates a pair, hands the [`Responder`] to the UI and
//! blocks on the [`PendingReply`] until the UI answers or drops it.

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;

/// How a prompt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Answered(bool),
    /// The responder was dropped without an answer
    Dismissed,
}

impl Reply {
    /// The answer, with a dismissal counting as "no"
    pub fn accepted(self) -> bool {
        matches!(self, Self::Answered(true))
    }
}

#[derive(Default)]
struct Slot {
    reply: Mutex<Option<Reply>>,
    ready: Condvar,
}

impl Slot {
    /// First reply wins
    fn complete(&self, reply: Reply) {
        let mut slot = self.reply.lock();
        if slot.is_none() {
            *slot = Some(reply);
            self.ready.notify_all();
        }
    }
}

/// Answering half, given to the UI
pub struct Responder {
    slot: Arc<Slot>,
}

impl Responder {
    pub fn respond(self, answer: bool) {
        self.slot.complete(Reply::Answered(answer));
    }

    /// Close the prompt without an answer
    pub fn dismiss(self) {
        self.slot.complete(Reply::Dismissed);
    }
}

impl Drop for Responder {
    fn drop(&mut self) {
        // No-op when respond() already filled the slot
        self.slot.complete(Reply::Dismissed);
    }
}

impl std::fmt::Debug for Responder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Responder").finish_non_exhaustive()
    }
}

/// Waiting half, kept by the thread that asked
pub struct PendingReply {
    slot: Arc<Slot>,
}

impl PendingReply {
    /// Block until the prompt is answered or dismissed
    pub fn wait(self) -> Reply {
        let mut slot = self.slot.reply.lock();
        loop {
            if let Some(reply) = *slot {
                return reply;
            }
            self.slot.ready.wait(&mut slot);
        }
    }

    /// Like [`wait`](Self::wait), giving up after `timeout`
    pub fn wait_timeout(self, timeout: Duration) -> Option<Reply> {
        let mut slot = self.slot.reply.lock();
        if slot.is_none() {
            let _ = self
                .slot
                .ready
                .wait_while_for(&mut slot, |reply| reply.is_none(), timeout);
        }
        *slot
    }
}

/// Create a connected responder and pending reply
pub fn channel() -> (Responder, PendingReply) {
    let slot = Arc::new(Slot::default());
    (Responder { slot: Arc::clone(&slot) }, PendingReply { slot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_answer_from_other_thread() {
        let (responder, pending) = channel();
        let ui = thread::spawn(move || responder.respond(true));
        assert_eq!(pending.wait(), Reply::Answered(true));
        ui.join().unwrap();
    }

    #[test]
    fn test_drop_counts_as_dismissed() {
        let (responder, pending) = channel();
        drop(responder);
        let reply = pending.wait();
        assert_eq!(reply, Reply::Dismissed);
        assert!(!reply.accepted());
    }

    #[test]
    fn test_answer_before_wait() {
        let (responder, pending) = channel();
        responder.respond(false);
        assert_eq!(pending.wait(), Reply::Answered(false));
    }

    #[test]
    fn test_timeout_without_answer() {
        let (_responder, pending) = channel();
        assert_eq!(pending.wait_timeout(Duration::from_millis(10)), None);
    }
}
