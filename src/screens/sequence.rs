/// Monotonic request counter. Only the most recently issued ticket may apply
/// its response; everything older is stale.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl RequestSequence {
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// Makes every outstanding ticket stale without issuing a new request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut seq = RequestSequence::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn invalidate_stales_outstanding_ticket() {
        let mut seq = RequestSequence::default();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));
        let next = seq.issue();
        assert!(seq.is_current(next));
    }
}
