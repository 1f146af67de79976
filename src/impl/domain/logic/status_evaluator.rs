use chrono::NaiveDate;

use crate::entities::{DisplayStatus, Installment, InstallmentStatus, Loan, LoanStatus};

impl DisplayStatus {
    /// Derives the display status from the persisted state. `today` is the
    /// current calendar date, supplied by the caller.
    pub fn evaluate(paid: bool, due_date: NaiveDate, today: NaiveDate) -> Self {
        if paid {
            return DisplayStatus::Paid;
        }
        match today.cmp(&due_date) {
            std::cmp::Ordering::Greater => DisplayStatus::Late,
            std::cmp::Ordering::Equal => DisplayStatus::DueToday,
            std::cmp::Ordering::Less => DisplayStatus::Open,
        }
    }
}

impl Loan {
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        DisplayStatus::evaluate(self.status == LoanStatus::Paid, self.due_date, today)
    }
}

impl Installment {
    pub fn display_status(&self, today: NaiveDate) -> DisplayStatus {
        DisplayStatus::evaluate(self.status == InstallmentStatus::Paid, self.due_date, today)
    }
}
