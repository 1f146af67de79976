use super::{client::ClientId, schedule::ScheduleParams};

/// Input of `create_loan`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    pub client_id: Option<ClientId>,
    pub principal: f64,
    /// Percent.
    pub interest_rate: f64,
    pub schedule: ScheduleParams,
    pub notes: Option<String>,
}

impl LoanRequest {
    pub fn new(
        client_id: ClientId,
        principal: f64,
        interest_rate: f64,
        schedule: ScheduleParams,
    ) -> Self {
        Self {
            client_id: Some(client_id),
            principal,
            interest_rate,
            schedule,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Principal plus the one-time interest, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    pub interest_rate: f64,
    pub profit: f64,
    pub total_owing: f64,
}

/// Preview of a loan before it is registered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanQuote {
    pub terms: LoanTerms,
    pub term_days: u32,
    /// Total owing divided by the number of days in the term.
    pub daily_cost: f64,
}
