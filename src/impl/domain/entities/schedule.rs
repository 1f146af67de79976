use chrono::NaiveDate;

/// How installment due dates are spaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleTiming {
    /// Fixed number of days between consecutive installments.
    Interval { days: u32 },
    /// Total span in days, divided evenly across the installments (any
    /// remainder days are dropped).
    Span { total_days: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleParams {
    pub installment_count: u32,
    pub timing: ScheduleTiming,
}

impl ScheduleParams {
    /// Single payment due `days` after the start date.
    pub fn single(days: u32) -> Self {
        Self {
            installment_count: 1,
            timing: ScheduleTiming::Interval { days },
        }
    }

    /// `count` installments, one every `days` days.
    pub fn every(count: u32, days: u32) -> Self {
        Self {
            installment_count: count,
            timing: ScheduleTiming::Interval { days },
        }
    }

    /// `count` installments spread over `total_days` days.
    pub fn spread(count: u32, total_days: u32) -> Self {
        Self {
            installment_count: count,
            timing: ScheduleTiming::Span { total_days },
        }
    }
}

/// Explicit rescheduling of a loan. Only due dates are rewritten; amounts and
/// statuses are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleUpdate {
    /// New due date of a single-payment loan.
    DueDate(NaiveDate),
    /// New due dates for installments of a plan, keyed by installment number.
    /// Installments not listed keep their current date.
    InstallmentDueDates(Vec<(u32, NaiveDate)>),
}
