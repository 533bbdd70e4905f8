use super::response::CreateDevisResponse;
use super::submission::{CreatedDevis, SubmissionGate, SubmitError};
use crate::shared::generation::Generation;

/// Lifetime of one quote-editing surface.
///
/// `open` hands out a ticket that async work (catalog load, submission)
/// carries along; once the surface is closed or reopened the ticket is stale
/// and its results must not land in the new session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSession {
    generation: Generation,
    open: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) -> u64 {
        self.open = true;
        self.generation.next()
    }

    pub fn close(&mut self) {
        self.open = false;
        self.generation.next();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Ticket of the session in progress
    pub fn ticket(&self) -> u64 {
        self.generation.current()
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.open && self.generation.is_current(ticket)
    }

    /// Maps a submission outcome. The gate is released only when `ticket`
    /// still names this session; a newer session keeps its own attempt.
    pub fn settle(
        &self,
        ticket: u64,
        gate: &mut SubmissionGate,
        outcome: Result<CreateDevisResponse, String>,
    ) -> Result<CreatedDevis, SubmitError> {
        if self.is_current(ticket) {
            gate.finish(outcome)
        } else {
            SubmissionGate::new().finish(outcome)
        }
    }
}
