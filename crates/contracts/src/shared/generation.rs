/// Ticket counter for async results.
///
/// Each `next` call issues a new ticket and makes every earlier one stale, so
/// a response that arrives after a newer request (or after the screen moved
/// on) can be recognised and dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Latest ticket handed out
    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.current == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_ticket_makes_older_stale() {
        let mut generation = Generation::new();
        let first = generation.next();
        assert!(generation.is_current(first));

        let second = generation.next();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_eq!(generation.current(), second);
    }
}
