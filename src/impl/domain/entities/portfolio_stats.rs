use super::stored::StoredLoan;

/// Dashboard figures over the whole loan book.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PortfolioStats {
    /// Sum of principal over all loans.
    pub total_lent: f64,
    /// Outstanding balance of active loans (total owing less paid
    /// installments).
    pub total_receivable: f64,
    /// Sum of total owing of active loans, ignoring paid installments.
    pub gross_receivable: f64,
    /// Sum of profit over all loans, regardless of status.
    pub total_profit: f64,
    pub active_loans_count: usize,
    /// Active loans due today or already late.
    pub loans_due_today_count: usize,
}

/// Active loans split by whether collection is due now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionWorklist {
    /// Due today or late.
    pub due_now: Vec<StoredLoan>,
    pub upcoming: Vec<StoredLoan>,
    pub total_to_collect_now: f64,
}

/// Figures over settled loans.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HistorySummary {
    pub paid_loans_count: usize,
    pub realized_profit: f64,
    pub volume_moved: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientSummary {
    pub active_loans: usize,
    pub paid_loans: usize,
    /// Remaining balance over the client's active loans.
    pub outstanding_debt: f64,
}
