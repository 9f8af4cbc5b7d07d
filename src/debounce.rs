//! Cancel-and-replace debounce.
//!
//! Every signal produces a fresh [`Ticket`] and hands back the timer handle of
//! the previous, now stale, signal so the caller can cancel it. Only the ticket
//! of the most recent signal fires; late callbacks of cancelled timers are
//! rejected even if the cancel raced with the timer.

/// Identifies one armed signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Debouncer<H> {
    delay_ms: u32,
    generation: u64,
    pending: Option<(Ticket, Option<H>)>,
}

impl<H> Debouncer<H> {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Registers a new signal. Returns its ticket and the timer handle of the
    /// signal it supersedes, if one was still armed.
    pub fn rearm(&mut self) -> (Ticket, Option<H>) {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        let stale = self.pending.replace((ticket, None)).and_then(|(_, handle)| handle);
        (ticket, stale)
    }

    /// Remembers the timer handle backing `ticket`. Ignored if `ticket` was
    /// superseded in the meantime.
    pub fn armed(&mut self, ticket: Ticket, handle: H) {
        if let Some((current, slot)) = self.pending.as_mut() {
            if *current == ticket {
                *slot = Some(handle);
            }
        }
    }

    /// Called when the timer of `ticket` elapses. True exactly once, for the
    /// latest ticket only.
    pub fn fire(&mut self, ticket: Ticket) -> bool {
        match self.pending {
            Some((current, _)) if current == ticket => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
