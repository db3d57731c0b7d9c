//! Request-generation slots.
//!
//! A slot holds the latest result of some asynchronous request. Every request
//! takes a [`Ticket`] from [`Slot::begin`]; only the ticket from the most
//! recent `begin` may write its result back. Results from superseded or
//! cancelled requests are dropped, so responses are applied in issue order
//! no matter when they resolve.

/// Proof of a request issued against a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a ticket is required to resolve the request"]
pub struct Ticket(u64);

/// Outcome of [`Slot::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The value was stored.
    Applied,
    /// A newer request was issued, or the slot was cancelled.
    Stale,
}

/// Latest-wins holder for an asynchronous result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    value: Option<T>,
    generation: u64,
    in_flight: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: None,
            generation: 0,
            in_flight: false,
        }
    }
}

impl<T> Slot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, superseding any outstanding one.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.in_flight = true;
        Ticket(self.generation)
    }

    /// Store `value` if `ticket` is still the latest.
    pub fn resolve(&mut self, ticket: Ticket, value: T) -> Resolution {
        if self.is_current(ticket) {
            self.value = Some(value);
            self.in_flight = false;
            Resolution::Applied
        } else {
            Resolution::Stale
        }
    }

    /// Finish `ticket` without a value (e.g. the request produced nothing).
    pub fn settle(&mut self, ticket: Ticket) -> Resolution {
        if self.is_current(ticket) {
            self.in_flight = false;
            Resolution::Applied
        } else {
            Resolution::Stale
        }
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Whether the latest request has not resolved yet.
    #[must_use]
    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request_applies() {
        let mut slot = Slot::new();
        let ticket = slot.begin();
        assert!(slot.in_flight());
        assert_eq!(slot.resolve(ticket, "first"), Resolution::Applied);
        assert_eq!(slot.value(), Some(&"first"));
        assert!(!slot.in_flight());
    }

    #[test]
    fn test_late_response_is_discarded() {
        let mut slot = Slot::new();
        let older = slot.begin();
        let newer = slot.begin();

        // Newer resolves first, older arrives late.
        assert_eq!(slot.resolve(newer, "newer"), Resolution::Applied);
        assert_eq!(slot.resolve(older, "older"), Resolution::Stale);
        assert_eq!(slot.value(), Some(&"newer"));
    }

    #[test]
    fn test_older_resolving_first_does_not_clear_in_flight() {
        let mut slot = Slot::new();
        let older = slot.begin();
        let newer = slot.begin();
        assert_eq!(slot.resolve(older, 1), Resolution::Stale);
        assert!(slot.in_flight());
        assert_eq!(slot.value(), None);
        assert_eq!(slot.resolve(newer, 2), Resolution::Applied);
        assert_eq!(slot.value(), Some(&2));
    }

    #[test]
    fn test_cancel_invalidates_outstanding() {
        let mut slot = Slot::new();
        let ticket = slot.begin();
        slot.cancel();
        assert!(!slot.in_flight());
        assert_eq!(slot.resolve(ticket, 1), Resolution::Stale);
        assert_eq!(slot.value(), None);
    }

    #[test]
    fn test_settle_keeps_previous_value() {
        let mut slot = Slot::new();
        let first = slot.begin();
        let _ = slot.resolve(first, "kept");
        let second = slot.begin();
        assert_eq!(slot.settle(second), Resolution::Applied);
        assert_eq!(slot.value(), Some(&"kept"));
        assert!(!slot.in_flight());
    }
}
