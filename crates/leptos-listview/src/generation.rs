//! Request Generations
//!
//! Every fetch takes a ticket; only the newest ticket may apply its result.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestGeneration {
    current: u64,
}

/// Captured at fetch start, checked at completion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestGeneration {
    pub fn begin(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut generation = RequestGeneration::default();
        let slow = generation.begin();
        let fast = generation.begin();

        assert!(generation.is_current(fast));
        assert!(!generation.is_current(slow));
    }
}
