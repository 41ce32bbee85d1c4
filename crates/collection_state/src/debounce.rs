//! Generation-counted debouncing.
//!
//! The timer itself lives in the host runtime. Each [`Debouncer::schedule`] call supersedes the
//! previous one; when a timer fires, only the ticket from the latest call yields a value.

use crate::config::DebounceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Handle returned by [`Debouncer::schedule`] and redeemed by [`Debouncer::fire`].
pub struct DebounceTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
/// Pending value plus the generation that may release it.
pub struct Debouncer<T> {
    config: DebounceConfig,
    generation: u64,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            generation: 0,
            pending: None,
        }
    }

    /// Delay the host timer should wait before calling [`Debouncer::fire`].
    pub fn delay_ms(&self) -> u64 {
        self.config.delay_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Stores `value` and invalidates every earlier ticket.
    pub fn schedule(&mut self, value: T) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(value);
        DebounceTicket {
            generation: self.generation,
        }
    }

    /// Releases the pending value if `ticket` is the latest one.
    pub fn fire(&mut self, ticket: DebounceTicket) -> Option<T> {
        if ticket.generation != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drops the pending value; outstanding tickets yield nothing.
    pub fn cancel(&mut self) -> bool {
        self.generation += 1;
        self.pending.take().is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn only_latest_ticket_releases_value() {
        let mut debouncer = Debouncer::default();
        assert_eq!(debouncer.delay_ms(), 300);
        let first = debouncer.schedule("b");
        let second = debouncer.schedule("bo");
        let third = debouncer.schedule("boo");

        assert_eq!(debouncer.fire(first), None);
        assert_eq!(debouncer.fire(second), None);
        assert_eq!(debouncer.fire(third), Some("boo"));
        assert_eq!(debouncer.fire(third), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new(DebounceConfig { delay_ms: 50 });
        let ticket = debouncer.schedule(1);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.fire(ticket), None);
    }
}
